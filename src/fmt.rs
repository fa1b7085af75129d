use crate::error::{BuildError, BuildErrorKind};
use core::fmt;

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PortOutOfRange(port) => {
                write!(f, "port {port} is out of range, expected -1 or 0..=65535")
            }
            Self::InvalidScheme => f.write_str("invalid scheme"),
            Self::InvalidHost => {
                f.write_str("host is neither an IP literal, an IPv4 address nor a registered name")
            }
            Self::PathStartsWithDoubleSlash => {
                f.write_str("when authority is not present, path should not start with \"//\"")
            }
            Self::FirstPathSegmentContainsColon => f.write_str(
                "when neither scheme nor authority is present, first path segment should not contain ':'",
            ),
            Self::Syntax => f.write_str("not a URI reference"),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(e) => write!(f, "invalid URI {:?}: {}", self.input, e),
            None => write!(f, "invalid URI {:?}: {}", self.input, self.kind),
        }
    }
}
