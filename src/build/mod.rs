//! Module for URI building.

mod imp;
pub mod query;
pub mod value;

use imp::Text;
use query::QueryParams;
use value::QueryValues;

use alloc::string::String;
use borrow_or_share::Bos;
use core::str::FromStr;
use fluent_uri::{error::ParseError, UriRef};
use tracing::{debug, trace};

/// Detailed cause of a [`BuildError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildErrorKind {
    /// The port is neither `-1` nor within `0..=65535`.
    PortOutOfRange(i32),
    /// The scheme does not match the [`scheme`][abnf] ABNF rule from RFC 3986.
    ///
    /// [abnf]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    InvalidScheme,
    /// The host is neither an IP literal, an IPv4 address nor a registered name.
    InvalidHost,
    /// Authority is not present, but the path starts with `"//"`.
    PathStartsWithDoubleSlash,
    /// Neither scheme nor authority is present, but the first path segment contains `':'`.
    FirstPathSegmentContainsColon,
    /// The assembled string does not match the `URI-reference` ABNF rule.
    ///
    /// The underlying [`ParseError`] is available through [`BuildError::parse_error`].
    Syntax,
}

/// An error occurred when building a URI reference.
///
/// The error carries the assembled string which failed validation.
///
/// # Examples
///
/// ```
/// use uri_builder::{error::BuildErrorKind, UriBuilder};
///
/// let e = UriBuilder::new()
///     .scheme("http")
///     .host("exa mple.com")
///     .build()
///     .unwrap_err();
///
/// assert_eq!(e.input(), "http://exa mple.com");
/// assert_eq!(e.kind(), BuildErrorKind::InvalidHost);
/// ```
#[derive(Clone, Debug)]
pub struct BuildError {
    pub(crate) input: String,
    pub(crate) kind: BuildErrorKind,
    pub(crate) source: Option<ParseError>,
}

impl BuildError {
    /// Returns the assembled string which failed validation.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> BuildErrorKind {
        self.kind
    }

    /// Returns the error from reparsing the assembled string,
    /// if the kind is [`Syntax`](BuildErrorKind::Syntax).
    #[must_use]
    pub fn parse_error(&self) -> Option<&ParseError> {
        self.source.as_ref()
    }

    /// Recovers the assembled string which failed validation.
    #[must_use]
    pub fn into_input(self) -> String {
        self.input
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as _)
    }
}

/// A builder for URI references.
///
/// Mutators take `&mut self` and return `&mut Self` so that calls can be chained.
/// [`build`] borrows the builder and leaves it unchanged: it can be mutated and
/// built again, and [`Clone`] gives an independent snapshot to diverge from.
///
/// Component values are given *decoded* and are percent-encoded only by [`build`].
/// Absent values never cause an error: `None` clears a component, and an empty
/// query parameter name or value list is ignored. The only point of failure is [`build`].
///
/// [`build`]: Self::build
///
/// # Examples
///
/// Build from scratch:
///
/// ```
/// use uri_builder::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .scheme("foo")
///     .userinfo("user")
///     .host("example.com")
///     .port(8042)
///     .path("over")
///     .path("there")
///     .query_param("name", "ferret")
///     .fragment("nose")
///     .build()?;
///
/// assert_eq!(uri, "foo://user@example.com:8042/over/there?name=ferret#nose");
/// # Ok::<_, uri_builder::error::BuildError>(())
/// ```
///
/// Start from an existing URI reference:
///
/// ```
/// use uri_builder::UriBuilder;
///
/// let mut builder = UriBuilder::parse("http://example.com/api?v=1")?;
/// let base = builder.clone();
///
/// let uri = builder
///     .replace_path("/other path")
///     .replace_query_param("v", 2)
///     .build()?;
/// assert_eq!(uri, "http://example.com/other%20path?v=2");
///
/// assert_eq!(base.build()?, "http://example.com/api?v=1");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct UriBuilder {
    scheme: Option<String>,
    userinfo: Option<Text>,
    host: Option<String>,
    port: i32,
    port_seed: Option<String>,
    path: Text,
    query: QueryParams,
    query_seed: Option<String>,
    fragment: Option<Text>,
}

impl Default for UriBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UriBuilder {
    /// Creates a new builder with every component absent and an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheme: None,
            userinfo: None,
            host: None,
            port: -1,
            port_seed: None,
            path: Text::Decoded(String::new()),
            query: QueryParams::new(),
            query_seed: None,
            fragment: None,
        }
    }

    /// Creates a builder seeded with the components of a URI reference.
    ///
    /// Components left untouched are emitted exactly as they appear in `uri`,
    /// so building without any mutation reproduces `uri`. Appending to the path
    /// keeps the seeded path as it is encoded, and a query parameter of the seed
    /// keeps its encoding until its name is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_builder::{UriBuilder, UriRef};
    ///
    /// let uri_ref = UriRef::parse("HTTP://[::1]:/%7e?a&&b=1#")?;
    /// assert_eq!(UriBuilder::from_uri(&uri_ref).build()?, uri_ref);
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_uri<T: Bos<str>>(uri: &UriRef<T>) -> Self {
        let mut b = Self::new();
        b.scheme = uri.scheme().map(|s| s.as_str().into());

        if let Some(auth) = uri.authority() {
            b.userinfo = auth.userinfo().map(Text::seed);
            b.host = Some(auth.host().into());
            if let Some(port) = auth.port() {
                b.port = match auth.port_to_u16() {
                    Ok(Some(port)) => i32::from(port),
                    _ => -1,
                };
                b.port_seed = Some(port.as_str().into());
            }
        }

        b.path = Text::seed(uri.path());

        if let Some(query) = uri.query() {
            b.query = QueryParams::from_encoded(query);
            b.query_seed = Some(query.as_str().into());
        }

        b.fragment = uri.fragment().map(Text::seed);
        b
    }

    /// Parses a URI reference and creates a builder seeded with its components.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string does not match the
    /// [`URI-reference`][abnf] ABNF rule from RFC 3986.
    ///
    /// [abnf]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.1
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        match UriRef::parse(s) {
            Ok(uri) => Ok(Self::from_uri(&uri)),
            Err(e) => {
                trace!(input = s, error = %e, "failed to parse seed URI");
                Err(e)
            }
        }
    }

    fn has_authority(&self) -> bool {
        self.userinfo.is_some() || self.host.is_some() || self.port != -1 || self.port_seed.is_some()
    }

    /// Sets or clears the [scheme] component.
    ///
    /// The scheme is never percent-encoded. An invalid scheme makes [`build`] fail.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    /// [`build`]: Self::build
    pub fn scheme<'a>(&mut self, scheme: impl Into<Option<&'a str>>) -> &mut Self {
        self.scheme = scheme.into().map(Into::into);
        self
    }

    /// Sets or clears the [userinfo] subcomponent of authority.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    pub fn userinfo<'a>(&mut self, userinfo: impl Into<Option<&'a str>>) -> &mut Self {
        self.userinfo = userinfo.into().map(|s| Text::Decoded(s.into()));
        self
    }

    /// Sets or clears the [host] subcomponent of authority.
    ///
    /// The host is never percent-encoded. A host which contains `':'` and is not
    /// enclosed in square brackets is taken as an IPv6 address and enclosed.
    /// A host which is not a valid IP literal, IPv4 address or registered name
    /// makes [`build`] fail.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    /// [`build`]: Self::build
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_builder::UriBuilder;
    ///
    /// let uri = UriBuilder::new().scheme("http").host("::1").port(8080).build()?;
    /// assert_eq!(uri, "http://[::1]:8080");
    /// # Ok::<_, uri_builder::error::BuildError>(())
    /// ```
    pub fn host<'a>(&mut self, host: impl Into<Option<&'a str>>) -> &mut Self {
        self.host = host.into().map(Into::into);
        self
    }

    /// Sets the [port] subcomponent of authority.
    ///
    /// `-1` means unspecified, in which case the port is omitted.
    /// A value outside `-1..=65535` makes [`build`] fail.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    /// [`build`]: Self::build
    pub fn port(&mut self, port: i32) -> &mut Self {
        self.port = port;
        self.port_seed = None;
        self
    }

    /// Appends to the [path] component.
    ///
    /// Exactly one `'/'` is kept between the current path and `segment`, whether or
    /// not either side already has one. If the current path is empty, `segment`
    /// becomes the path as is. `None` and an empty segment are ignored.
    ///
    /// A path taken from a seed keeps its encoding: `segment` is encoded
    /// on its own and joined to the encoded seed path.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_builder::UriBuilder;
    ///
    /// let uri = UriBuilder::new().path("/a/").path("/b").path("c").build()?;
    /// assert_eq!(uri.path(), "/a/b/c");
    ///
    /// let uri = UriBuilder::new().path("a").path("b").build()?;
    /// assert_eq!(uri.path(), "a/b");
    ///
    /// let uri = UriBuilder::parse("http://h/a%2Fb")?.path("c d").build()?;
    /// assert_eq!(uri, "http://h/a%2Fb/c%20d");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn path<'a>(&mut self, segment: impl Into<Option<&'a str>>) -> &mut Self {
        if let Some(segment) = segment.into().filter(|s| !s.is_empty()) {
            self.path.append_path(segment);
        }
        self
    }

    /// Replaces the [path] component. `None` is ignored.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
    pub fn replace_path<'a>(&mut self, path: impl Into<Option<&'a str>>) -> &mut Self {
        if let Some(path) = path.into() {
            self.path = Text::Decoded(path.into());
        }
        self
    }

    /// Appends values to a query parameter.
    ///
    /// See [`QueryParams::append`] and the [`value`] module for
    /// the accepted value types.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_builder::UriBuilder;
    ///
    /// let uri = UriBuilder::new()
    ///     .query_param("k", "v1")
    ///     .query_param("k", "v2")
    ///     .query_param("n", [1, 2])
    ///     .build()?;
    /// assert_eq!(uri, "?k=v1&k=v2&n=1&n=2");
    /// # Ok::<_, uri_builder::error::BuildError>(())
    /// ```
    pub fn query_param(&mut self, name: &str, values: impl QueryValues) -> &mut Self {
        let values = values.into_strings();
        if !name.is_empty() && !values.is_empty() {
            self.query_seed = None;
            self.query.append(name, values);
        }
        self
    }

    /// Replaces all values of a query parameter.
    ///
    /// See [`QueryParams::replace_all`] and the [`value`] module for
    /// the accepted value types.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_builder::UriBuilder;
    ///
    /// let uri = UriBuilder::parse("?k=v1&x=0&k=v2")?
    ///     .replace_query_param("k", "v3")
    ///     .build()?;
    /// assert_eq!(uri, "?k=v3&x=0");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn replace_query_param(&mut self, name: &str, values: impl QueryValues) -> &mut Self {
        let values = values.into_strings();
        if !name.is_empty() && !values.is_empty() {
            self.query_seed = None;
            self.query.replace_all(name, values);
        }
        self
    }

    /// Returns the query parameters.
    #[must_use]
    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// Sets or clears the [fragment] component.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
    pub fn fragment<'a>(&mut self, fragment: impl Into<Option<&'a str>>) -> &mut Self {
        self.fragment = fragment.into().map(|s| Text::Decoded(s.into()));
        self
    }

    /// Builds the URI reference.
    ///
    /// Userinfo, path, query parameters and fragment are percent-encoded, then
    /// the components are assembled into
    /// `scheme://userinfo@host:port/path?query#fragment`, leaving out absent ones.
    /// An authority is present if any of userinfo, host and port is set.
    /// When an authority is present, a non-empty path is prefixed with `'/'` if needed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any of the following is true.
    ///
    /// - The port is outside `-1..=65535`.
    /// - The scheme or the host does not match its ABNF rule from RFC 3986.
    /// - Authority is not present and the path starts with `"//"`.
    /// - Neither scheme nor authority is present and the first path segment contains `':'`.
    /// - The assembled string does not match the `URI-reference` ABNF rule.
    pub fn build(&self) -> Result<UriRef<String>, BuildError> {
        let res = self.assemble().finish();
        match &res {
            Ok(uri) => trace!(uri = uri.as_str(), "built URI"),
            Err(e) => debug!(input = e.input(), kind = ?e.kind(), "failed to build URI"),
        }
        res
    }
}

impl<T: Bos<str>> From<&UriRef<T>> for UriBuilder {
    /// Equivalent to [`from_uri`](UriBuilder::from_uri).
    fn from(uri: &UriRef<T>) -> Self {
        Self::from_uri(uri)
    }
}

impl<T: Bos<str>> From<UriRef<T>> for UriBuilder {
    /// Equivalent to [`from_uri`](UriBuilder::from_uri).
    fn from(uri: UriRef<T>) -> Self {
        Self::from_uri(&uri)
    }
}

impl TryFrom<&str> for UriBuilder {
    type Error = ParseError;

    /// Equivalent to [`parse`](UriBuilder::parse).
    fn try_from(s: &str) -> Result<Self, ParseError> {
        Self::parse(s)
    }
}

impl FromStr for UriBuilder {
    type Err = ParseError;

    /// Equivalent to [`parse`](UriBuilder::parse).
    fn from_str(s: &str) -> Result<Self, ParseError> {
        Self::parse(s)
    }
}
