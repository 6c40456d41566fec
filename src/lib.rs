#![cfg_attr(not(feature = "std"), no_std)]
//! Byte-oriented URL decomposition for request routing.
//!
//! [`Url`] splits raw bytes into zero-copy spans over one reusable buffer,
//! normalizes the pathname eagerly and decodes the query on first use.
//! Authority parsing is deliberately simple: userinfo ends at the first
//! `@`, the host at the first `/`, and hosts are only ASCII-lowercased.

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;
mod log;

// Internal modules (not public API)
mod character_sets;
mod encoder;
mod error;
mod normalize;
mod parser;
mod path_parts;
mod percent_encode;
mod query;
mod request_path;
mod url;
mod url_components;

// Public API
pub use character_sets::EncodeMode;
pub use error::{ParseError, Result};
pub use normalize::{normalize_pathname, normalize_pathname_into};
pub use parser::{ParseOptions, parse_request_path, parse_url};
pub use path_parts::PathParts;
pub use percent_encode::{
    escape, escape_into, escape_query, unescape, unescape_into, unescape_query,
};
pub use query::Query;
pub use request_path::RequestPath;
pub use url::Url;
