//! An ordered multimap of query parameters.

use crate::encoder::QueryParam;
use alloc::{borrow::ToOwned, string::String, vec, vec::Vec};
use core::{iter::FusedIterator, slice};
use fluent_uri::encoding::{encoder::Query, EStr, EString};

/// An ordered multimap from query parameter names to their values.
///
/// Names are kept in the order they were first inserted and values in the
/// order they were given. A name present in the map always has at least one value.
///
/// Names and values are stored *decoded*. They are percent-encoded only when the
/// query is serialized by [`UriBuilder::build`]. A pair taken from a seed query
/// is serialized as it was encoded in the seed, until its name is replaced.
///
/// [`UriBuilder::build`]: crate::UriBuilder::build
///
/// # Examples
///
/// ```
/// use uri_builder::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.append("k", ["v1"]).append("k", ["v2"]).append("x", ["1"]);
/// assert_eq!(params.get("k"), Some(&["v1".to_owned(), "v2".to_owned()][..]));
///
/// params.replace_all("k", ["v3"]);
/// assert!(params.iter().eq([("k", &["v3".to_owned()][..]), ("x", &["1".to_owned()][..])]));
///
/// // Empty names and empty value lists are ignored.
/// params.append("", ["v"]).append("y", Vec::<String>::new());
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<Entry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    name: String,
    values: Vec<String>,
    // Encoded `name=value` text of each value taken from a seed.
    seeds: Vec<Option<EString<Query>>>,
}

impl QueryParams {
    /// Creates an empty `QueryParams`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Appends values to the given name, in order.
    ///
    /// The name is inserted at the end if it is not yet present.
    /// This is a no-op if `name` is empty or `values` yields nothing.
    pub fn append<I>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if name.is_empty() || values.is_empty() {
            return self;
        }

        match self.position(name) {
            Some(i) => {
                let e = &mut self.entries[i];
                e.seeds.resize(e.values.len() + values.len(), None);
                e.values.extend(values);
            }
            None => self.entries.push(Entry {
                name: name.into(),
                seeds: vec![None; values.len()],
                values,
            }),
        }
        self
    }

    /// Replaces all values of the given name.
    ///
    /// A name already present keeps its position; otherwise it is inserted at the end.
    /// This is a no-op if `name` is empty or `values` yields nothing.
    pub fn replace_all<I>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if name.is_empty() || values.is_empty() {
            return self;
        }

        let entry = Entry {
            name: name.into(),
            seeds: vec![None; values.len()],
            values,
        };
        match self.position(name) {
            Some(i) => self.entries[i] = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// Returns the values of the given name, or `None` if it is not present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|i| &self.entries[i].values[..])
    }

    /// Checks whether the given name is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over names and their values, in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over `(name, value)` pairs, in serialization order.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_builder::QueryParams;
    ///
    /// let mut params = QueryParams::new();
    /// params.append("a", ["1", "2"]).append("b", ["3"]);
    /// assert!(params.pairs().eq([("a", "1"), ("a", "2"), ("b", "3")]));
    /// ```
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .flat_map(|e| e.values.iter().map(move |v| (&e.name[..], &v[..])))
    }

    /// Parses an encoded query into parameters.
    ///
    /// Pairs are separated by `'&'` and split on the first `'='`. A pair without
    /// `'='` gets an empty value. Empty pairs and pairs with an empty name are
    /// skipped. Names and values are decoded lossily and `'+'` is kept as is.
    /// Each pair remembers its encoded text.
    pub(crate) fn from_encoded(query: &EStr<Query>) -> Self {
        let mut params = Self::new();
        for pair in query.split('&') {
            let (k, v) = pair.split_once('=').unwrap_or((pair, EStr::EMPTY));
            if k.is_empty() {
                continue;
            }
            let k = k.decode().into_string_lossy();
            let v = v.decode().into_string_lossy().into_owned();

            params.append(&k, [v]);
            if let Some(e) = params.entries.iter_mut().find(|e| e.name == k) {
                if let Some(seed) = e.seeds.last_mut() {
                    *seed = Some(pair.to_owned());
                }
            }
        }
        params
    }

    /// Percent-encodes the parameters into a query.
    ///
    /// Pairs taken from a seed are written as they were encoded.
    pub(crate) fn to_encoded(&self) -> EString<Query> {
        let mut buf = EString::new();
        for e in &self.entries {
            for (v, seed) in e.values.iter().zip(&e.seeds) {
                if !buf.is_empty() {
                    buf.push('&');
                }
                match seed {
                    Some(pair) => buf.push_estr(pair),
                    None => {
                        buf.encode::<QueryParam>(&e.name);
                        buf.push('=');
                        buf.encode::<QueryParam>(v);
                    }
                }
            }
        }
        buf
    }
}

/// An iterator over the names and values of a [`QueryParams`].
///
/// This struct is created by [`QueryParams::iter`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a> {
    inner: slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.name[..], &e.values[..]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|e| (&e.name[..], &e.values[..]))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueryParams {
    /// Serializes as a map from each name to its sequence of values.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, values) in self {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(vs: &[&str]) -> Vec<String> {
        vs.iter().map(|&s| s.into()).collect()
    }

    #[test]
    fn append_keeps_key_and_value_order() {
        let mut params = QueryParams::new();
        params.append("b", ["1"]).append("a", ["2"]).append("b", ["3", "4"]);

        assert!(params
            .pairs()
            .eq([("b", "1"), ("b", "3"), ("b", "4"), ("a", "2")]));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn replace_all_keeps_position() {
        let mut params = QueryParams::new();
        params.append("a", ["1"]).append("b", ["2"]).append("c", ["3"]);
        params.replace_all("b", ["x", "y"]);

        assert_eq!(params.get("b"), Some(&strings(&["x", "y"])[..]));
        assert!(params
            .iter()
            .map(|(k, _)| k)
            .eq(["a", "b", "c"]));

        params.replace_all("d", ["4"]);
        assert_eq!(params.iter().last().map(|(k, _)| k), Some("d"));
    }

    #[test]
    fn empty_input_is_ignored() {
        let mut params = QueryParams::new();
        params.append("", ["v"]);
        params.append("k", Vec::<String>::new());
        params.replace_all("k", Vec::<String>::new());
        assert!(params.is_empty());

        params.append("k", ["v"]);
        params.replace_all("k", Vec::<String>::new());
        assert_eq!(params.get("k"), Some(&strings(&["v"])[..]));
    }

    #[test]
    fn empty_value_is_kept() {
        let mut params = QueryParams::new();
        params.append("k", [""]);
        assert_eq!(params.get("k"), Some(&strings(&[""])[..]));
        assert_eq!(params.to_encoded(), "k=");
    }

    #[test]
    fn from_encoded() {
        let query = EStr::new_or_panic("a=1&&b&c=x=y&a=%26%3D&d=a+b&e=%FF&=z");
        let params = QueryParams::from_encoded(query);

        assert!(params.pairs().eq([
            ("a", "1"),
            ("a", "&="),
            ("b", ""),
            ("c", "x=y"),
            ("d", "a+b"),
            ("e", "\u{fffd}"),
        ]));
        assert_eq!(params.to_encoded(), "a=1&a=%26%3D&b&c=x=y&d=a+b&e=%FF");
        assert!(QueryParams::from_encoded(EStr::EMPTY).is_empty());
    }

    #[test]
    fn seeded_pairs_keep_encoding() {
        let mut params = QueryParams::from_encoded(EStr::new_or_panic("sig=%FF%00&k=%7e&t"));
        params.append("k", ["~"]).append("n", ["1 2"]);
        assert_eq!(params.to_encoded(), "sig=%FF%00&k=%7e&k=~&t&n=1%202");

        params.replace_all("sig", ["x"]);
        assert_eq!(params.to_encoded(), "sig=x&k=%7e&k=~&t&n=1%202");
    }

    #[test]
    fn to_encoded() {
        let mut params = QueryParams::new();
        params
            .append("q", ["a&b=c"])
            .append("sp ace", ["1+1", "50%"])
            .append("path", ["/x?y#z"]);

        assert_eq!(
            params.to_encoded(),
            "q=a%26b%3Dc&sp%20ace=1%2B1&sp%20ace=50%25&path=/x?y%23z"
        );
    }
}
