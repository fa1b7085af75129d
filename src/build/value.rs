//! Conversion of typed values into query parameter values.
//!
//! [`QueryValues`] is the argument type of [`UriBuilder::query_param`] and
//! [`UriBuilder::replace_query_param`]. It describes a sequence of values,
//! each of which is a [`QueryValue`]: either a scalar, stringified through
//! [`Display`], or a collection whose members are taken individually.
//!
//! Collections are flattened exactly one level. A member of a collection is
//! taken by its string form, so a collection nested deeper has to say which
//! string form it wants. [`Listed`] gives the `[a, b]` form; without a wrapper
//! the value is rejected at compile time:
//!
//! ```compile_fail
//! use uri_builder::UriBuilder;
//!
//! UriBuilder::new().query_param("k", [vec![vec![1]]]);
//! ```
//!
//! [`UriBuilder::query_param`]: crate::UriBuilder::query_param
//! [`UriBuilder::replace_query_param`]: crate::UriBuilder::replace_query_param
//!
//! # Examples
//!
//! ```
//! use uri_builder::{Listed, UriBuilder};
//!
//! let uri = UriBuilder::new()
//!     .query_param("a", 1)
//!     .query_param("b", ["x", "y"])
//!     .query_param("c", ("z", 2, vec![3, 4], true))
//!     .query_param("d", [vec![5], vec![6, 7]])
//!     .query_param("e", None::<u8>)
//!     .query_param("f", [vec![Listed(vec![8, 9])]])
//!     .build()?;
//!
//! assert_eq!(
//!     uri.query().unwrap(),
//!     "a=1&b=x&b=y&c=z&c=2&c=3&c=4&c=true&d=5&d=6&d=7&f=%5B8,%209%5D"
//! );
//! # Ok::<_, uri_builder::error::BuildError>(())
//! ```
//!
//! [`Display`]: core::fmt::Display

use alloc::{
    borrow::Cow,
    boxed::Box,
    collections::VecDeque,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Display};

/// A collection taken by its string form `[a, b, ...]` instead of by its members.
///
/// # Examples
///
/// ```
/// use uri_builder::{Listed, QueryValues};
///
/// assert_eq!(Listed(["a", "b"]).to_string(), "[a, b]");
/// assert_eq!(
///     [vec![Listed(vec![1, 2])], vec![Listed(vec![])]].into_strings(),
///     ["[1, 2]", "[]"]
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Listed<C>(pub C);

impl<C> Display for Listed<C>
where
    for<'a> &'a C: IntoIterator,
    for<'a> <&'a C as IntoIterator>::Item: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, x) in (&self.0).into_iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            Display::fmt(&x, f)?;
        }
        f.write_str("]")
    }
}

/// A single element of a query parameter value sequence.
///
/// A scalar pushes its string form. A collection pushes the string form of
/// each of its members, which must themselves be scalars.
pub trait QueryValue {
    /// Pushes the string form of this value onto `out`.
    fn push_to(&self, out: &mut Vec<String>);
}

/// A sequence of query parameter values.
///
/// Implemented for a single [`QueryValue`], for arrays, vectors and tuples of
/// them, and for `Option`, where `None` is an empty sequence.
pub trait QueryValues {
    /// Pushes every value of this sequence onto `out`, in order.
    fn push_to(self, out: &mut Vec<String>);

    /// Collects the values of this sequence.
    fn into_strings(self) -> Vec<String>
    where
        Self: Sized,
    {
        let mut out = Vec::new();
        QueryValues::push_to(self, &mut out);
        out
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),+) => {$(
        impl QueryValue for $ty {
            fn push_to(&self, out: &mut Vec<String>) {
                out.push(self.to_string());
            }
        }

        impl QueryValues for $ty {
            fn push_to(self, out: &mut Vec<String>) {
                QueryValue::push_to(&self, out);
            }
        }
    )+};
}

impl_scalar!(
    String, char, bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32,
    f64
);

impl<C> QueryValue for Listed<C>
where
    Self: Display,
{
    fn push_to(&self, out: &mut Vec<String>) {
        out.push(self.to_string());
    }
}

impl<C> QueryValues for Listed<C>
where
    Self: Display,
{
    fn push_to(self, out: &mut Vec<String>) {
        QueryValue::push_to(&self, out);
    }
}

impl QueryValue for str {
    fn push_to(&self, out: &mut Vec<String>) {
        out.push(self.into());
    }
}

impl QueryValue for Cow<'_, str> {
    fn push_to(&self, out: &mut Vec<String>) {
        out.push(self.as_ref().into());
    }
}

impl QueryValues for Cow<'_, str> {
    fn push_to(self, out: &mut Vec<String>) {
        out.push(self.into_owned());
    }
}

impl QueryValue for Box<str> {
    fn push_to(&self, out: &mut Vec<String>) {
        out.push(self.as_ref().into());
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn push_to(&self, out: &mut Vec<String>) {
        QueryValue::push_to(&**self, out);
    }
}

impl<T: Display> QueryValue for [T] {
    fn push_to(&self, out: &mut Vec<String>) {
        out.extend(self.iter().map(ToString::to_string));
    }
}

impl<T: Display, const N: usize> QueryValue for [T; N] {
    fn push_to(&self, out: &mut Vec<String>) {
        QueryValue::push_to(&self[..], out);
    }
}

impl<T: Display> QueryValue for Vec<T> {
    fn push_to(&self, out: &mut Vec<String>) {
        QueryValue::push_to(&self[..], out);
    }
}

impl<T: Display> QueryValue for VecDeque<T> {
    fn push_to(&self, out: &mut Vec<String>) {
        out.extend(self.iter().map(ToString::to_string));
    }
}

impl<T: QueryValue + ?Sized> QueryValues for &T {
    fn push_to(self, out: &mut Vec<String>) {
        QueryValue::push_to(self, out);
    }
}

impl<V: QueryValue, const N: usize> QueryValues for [V; N] {
    fn push_to(self, out: &mut Vec<String>) {
        for v in &self {
            QueryValue::push_to(v, out);
        }
    }
}

impl<V: QueryValue> QueryValues for Vec<V> {
    fn push_to(self, out: &mut Vec<String>) {
        for v in &self {
            QueryValue::push_to(v, out);
        }
    }
}

impl<V: QueryValue> QueryValues for VecDeque<V> {
    fn push_to(self, out: &mut Vec<String>) {
        for v in &self {
            QueryValue::push_to(v, out);
        }
    }
}

impl<V: QueryValue> QueryValues for Option<V> {
    fn push_to(self, out: &mut Vec<String>) {
        if let Some(v) = self {
            QueryValue::push_to(&v, out);
        }
    }
}

macro_rules! impl_tuple {
    ($($name:ident)*) => {
        impl<$($name: QueryValue),*> QueryValues for ($($name,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn push_to(self, out: &mut Vec<String>) {
                let ($($name,)*) = self;
                $(QueryValue::push_to(&$name, out);)*
            }
        }
    };
}

impl_tuple!();
impl_tuple!(A);
impl_tuple!(A B);
impl_tuple!(A B C);
impl_tuple!(A B C D);
impl_tuple!(A B C D E);
impl_tuple!(A B C D E F);
impl_tuple!(A B C D E F G);
impl_tuple!(A B C D E F G H);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn scalars() {
        assert_eq!("a".into_strings(), ["a"]);
        assert_eq!(String::from("b").into_strings(), ["b"]);
        assert_eq!(42u16.into_strings(), ["42"]);
        assert_eq!((-7i64).into_strings(), ["-7"]);
        assert_eq!(1.5f64.into_strings(), ["1.5"]);
        assert_eq!(false.into_strings(), ["false"]);
        assert_eq!('c'.into_strings(), ["c"]);
        assert_eq!(Cow::Borrowed("d").into_strings(), ["d"]);
    }

    #[test]
    fn sequences() {
        assert_eq!(["a", "b"].into_strings(), ["a", "b"]);
        assert_eq!(vec![1, 2, 3].into_strings(), ["1", "2", "3"]);
        assert_eq!(Some("x").into_strings(), ["x"]);
        assert!(None::<&str>.into_strings().is_empty());
        assert!(Vec::<String>::new().into_strings().is_empty());
        assert!(().into_strings().is_empty());
    }

    #[test]
    fn flattens_one_level() {
        assert_eq!([vec![1, 2], vec![3]].into_strings(), ["1", "2", "3"]);
        assert_eq!(
            ("a", [1, 2], vec!['x'], VecDeque::from([true])).into_strings(),
            ["a", "1", "2", "x", "true"]
        );
        assert_eq!((&[1u8, 2][..],).into_strings(), ["1", "2"]);
        assert!(vec![Vec::<u8>::new()].into_strings().is_empty());
    }

    #[test]
    fn listed_uses_string_form() {
        assert_eq!(Listed(vec!["x", "y"]).into_strings(), ["[x, y]"]);
        assert_eq!(Listed(Vec::<u8>::new()).into_strings(), ["[]"]);
        assert_eq!(
            [vec![Listed(vec![1, 2]), Listed(vec![3])]].into_strings(),
            ["[1, 2]", "[3]"]
        );
        assert_eq!(
            vec![Listed(vec![Listed(['a'])])].into_strings(),
            ["[[a]]"]
        );
    }
}
