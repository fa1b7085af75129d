use super::{BuildError, BuildErrorKind, UriBuilder};
use fluent_uri::{
    component::Scheme,
    encoding::{
        encoder::{Fragment, Path, Userinfo},
        EStr, EString, Encoder,
    },
    UriRef,
};
use alloc::string::String;
use core::fmt::Write;

/// Percent-encodes `s` with `E`.
pub(crate) fn encode<E: Encoder>(s: &str) -> EString<E> {
    let mut buf = EString::new();
    buf.encode::<E>(s);
    buf
}

/// A component value held by the builder.
///
/// Values set through the builder are decoded. Values taken from a seed URI
/// reference are kept in their original encoded form, so that they are emitted
/// verbatim and never encoded twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Text {
    Decoded(String),
    Encoded(String),
}

impl Text {
    pub fn seed<E: Encoder>(s: &EStr<E>) -> Self {
        Self::Encoded(s.as_str().into())
    }

    /// Appends a decoded path segment, joining at the level this text is kept at.
    pub fn append_path(&mut self, seg: &str) {
        let joined = match self {
            Self::Decoded(cur) => Self::Decoded(join_path(cur, seg)),
            Self::Encoded(cur) => Self::Encoded(join_path(cur, encode::<Path>(seg).as_str())),
        };
        *self = joined;
    }

    fn encode_to<E: Encoder>(&self, buf: &mut String) {
        match self {
            Self::Decoded(s) => buf.push_str(encode::<E>(s).as_str()),
            Self::Encoded(s) => buf.push_str(s),
        }
    }
}

/// Appends `seg` to `cur` with exactly one `'/'` at the junction.
pub(crate) fn join_path(cur: &str, seg: &str) -> String {
    if cur.is_empty() {
        return seg.into();
    }

    let head = cur.trim_end_matches('/');
    let tail = seg.trim_start_matches('/');

    let mut buf = String::with_capacity(head.len() + tail.len() + 1);
    buf.push_str(head);
    buf.push('/');
    buf.push_str(tail);
    buf
}

/// Checks that `host` alone is an IP literal, an IPv4 address or a registered name.
fn is_valid_host(host: &str) -> bool {
    let mut buf = String::with_capacity(host.len() + 2);
    buf.push_str("//");
    buf.push_str(host);

    let Ok(r) = UriRef::parse(buf.as_str()) else {
        return false;
    };
    r.authority()
        .map_or(false, |a| a.as_str() == host && a.host() == host)
}

#[derive(Default)]
pub(crate) struct BuilderInner {
    buf: String,
    scheme_end: Option<usize>,
    host_bounds: Option<(usize, usize)>,
    path_bounds: (usize, usize),
    bad_port: Option<i32>,
}

impl BuilderInner {
    fn push_scheme(&mut self, v: &str) {
        self.buf.push_str(v);
        self.scheme_end = Some(self.buf.len());
        self.buf.push(':');
    }

    fn start_authority(&mut self) {
        self.buf.push_str("//");
    }

    fn push_userinfo(&mut self, v: &Text) {
        v.encode_to::<Userinfo>(&mut self.buf);
        self.buf.push('@');
    }

    fn push_host(&mut self, v: &str) {
        let start = self.buf.len();
        if v.contains(':') && !v.starts_with('[') {
            self.buf.push('[');
            self.buf.push_str(v);
            self.buf.push(']');
        } else {
            self.buf.push_str(v);
        }
        self.host_bounds = Some((start, self.buf.len()));
    }

    fn push_port(&mut self, v: i32) {
        if !(-1..=65535).contains(&v) {
            self.bad_port = Some(v);
        }
        write!(self.buf, ":{v}").unwrap();
    }

    fn push_port_str(&mut self, v: &str) {
        self.buf.push(':');
        self.buf.push_str(v);
    }

    fn push_path(&mut self, v: &Text) {
        let start = self.buf.len();
        v.encode_to::<Path>(&mut self.buf);
        if self.host_bounds.is_some() && self.buf.len() > start && !self.buf[start..].starts_with('/') {
            self.buf.insert(start, '/');
        }
        self.path_bounds = (start, self.buf.len());
    }

    fn push_query(&mut self, v: &str) {
        self.buf.push('?');
        self.buf.push_str(v);
    }

    fn push_fragment(&mut self, v: &Text) {
        self.buf.push('#');
        v.encode_to::<Fragment>(&mut self.buf);
    }

    fn error(self, kind: BuildErrorKind) -> BuildError {
        BuildError {
            input: self.buf,
            kind,
            source: None,
        }
    }

    pub fn finish(self) -> Result<UriRef<String>, BuildError> {
        fn first_segment_contains_colon(path: &str) -> bool {
            path.split_once('/').map_or(path, |x| x.0).contains(':')
        }

        if let Some(port) = self.bad_port {
            return Err(self.error(BuildErrorKind::PortOutOfRange(port)));
        }

        if let Some(end) = self.scheme_end {
            if Scheme::new(&self.buf[..end]).is_none() {
                return Err(self.error(BuildErrorKind::InvalidScheme));
            }
        }

        if let Some((start, end)) = self.host_bounds {
            if !is_valid_host(&self.buf[start..end]) {
                return Err(self.error(BuildErrorKind::InvalidHost));
            }
        } else {
            let path = &self.buf[self.path_bounds.0..self.path_bounds.1];
            if path.starts_with("//") {
                return Err(self.error(BuildErrorKind::PathStartsWithDoubleSlash));
            }
            if self.scheme_end.is_none() && first_segment_contains_colon(path) {
                return Err(self.error(BuildErrorKind::FirstPathSegmentContainsColon));
            }
        }

        UriRef::parse(self.buf).map_err(|e| BuildError {
            source: Some(e.strip_input()),
            input: e.into_input(),
            kind: BuildErrorKind::Syntax,
        })
    }
}

impl UriBuilder {
    pub(crate) fn assemble(&self) -> BuilderInner {
        let mut b = BuilderInner::default();

        if let Some(scheme) = &self.scheme {
            b.push_scheme(scheme);
        }

        if self.has_authority() {
            b.start_authority();
            if let Some(userinfo) = &self.userinfo {
                b.push_userinfo(userinfo);
            }
            b.push_host(self.host.as_deref().unwrap_or(""));
            match &self.port_seed {
                Some(port) => b.push_port_str(port),
                None if self.port != -1 => b.push_port(self.port),
                None => {}
            }
        }

        b.push_path(&self.path);

        match &self.query_seed {
            Some(query) => b.push_query(query),
            None if !self.query.is_empty() => b.push_query(self.query.to_encoded().as_str()),
            None => {}
        }

        if let Some(fragment) = &self.fragment {
            b.push_fragment(fragment);
        }
        b
    }
}
