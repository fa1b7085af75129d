#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]

//! A fluent builder for URIs that strictly adhere to IETF [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! Start from scratch with [`UriBuilder::new`] or from an existing URI reference
//! with [`UriBuilder::parse`] or [`UriBuilder::from_uri`], set or append components
//! in any order, then call [`build`] to obtain a [`UriRef`].
//!
//! Component values are given to the builder *decoded*. Percent-encoding happens
//! exactly once, inside [`build`], and the assembled string is checked against the
//! URI grammar by [`fluent_uri`] before it is returned. Components taken from a
//! seed URI reference keep their original encoding until they are replaced.
//!
//! [`build`]: UriBuilder::build
//!
//! # Examples
//!
//! ```
//! use uri_builder::UriBuilder;
//!
//! let uri = UriBuilder::new()
//!     .scheme("https")
//!     .host("example.com")
//!     .path("/api/")
//!     .path("/users")
//!     .query_param("name", "张三")
//!     .query_param("tag", ["a", "b"])
//!     .fragment("top")
//!     .build()?;
//!
//! assert_eq!(
//!     uri,
//!     "https://example.com/api/users?name=%E5%BC%A0%E4%B8%89&tag=a&tag=b#top"
//! );
//! # Ok::<_, uri_builder::error::BuildError>(())
//! ```
//!
//! # Crate features
//!
//! - `std` (default): Enables [`std::error::Error`] implementations.
//!   The crate is `no_std` with `alloc` when this feature is disabled.
//!
//! - `serde`: Implements [`Serialize`] for [`QueryParams`], and enables
//!   the `serde` feature of [`fluent_uri`] for [`UriRef`].
//!
//! [`Serialize`]: serde::Serialize

extern crate alloc;

pub mod build;
pub mod encoder;
pub mod error;

mod fmt;

pub use build::{
    query::QueryParams,
    value::{Listed, QueryValue, QueryValues},
    UriBuilder,
};
pub use fluent_uri::{self, UriRef};
