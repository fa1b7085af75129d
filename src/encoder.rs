//! Percent-encoders used by the builder on top of those of [`fluent_uri`].

use fluent_uri::encoding::{encoder::Query, Encoder, Table};

/// An encoder for a name or a value of a query parameter.
///
/// Allows what [`Query`] allows except `'&'`, `'='` and `'+'`, so that encoded
/// names and values never contain the delimiters of `name=value&name=value`
/// and a literal `'+'` is never read back as a space.
///
/// # Examples
///
/// ```
/// use uri_builder::{
///     encoder::QueryParam,
///     fluent_uri::encoding::{encoder::Query, EString},
/// };
///
/// let mut query = EString::<Query>::new();
/// query.encode::<QueryParam>("a&b");
/// query.push('=');
/// query.encode::<QueryParam>("1+1=2");
/// assert_eq!(query, "a%26b=1%2B1%3D2");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct QueryParam(());

impl Encoder for QueryParam {
    const TABLE: &'static Table = &Query::TABLE.sub(&Table::new(b"&=+"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_encoder_of_query() {
        assert!(QueryParam::TABLE.is_subset(Query::TABLE));
        assert!(QueryParam::TABLE.allows_pct_encoded());
        assert!(Query::TABLE.allows('&'));
        for ch in ['&', '=', '+', '#', ' ', '%'] {
            assert!(!QueryParam::TABLE.allows(ch));
        }
        for ch in ['a', '/', '?', ':', '@', '~', ';'] {
            assert!(QueryParam::TABLE.allows(ch));
        }
    }
}
