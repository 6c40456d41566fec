use crate::error::Result;
use crate::query::Query;

/// The path-level parts shared by [`crate::Url`] and [`crate::RequestPath`]
///
/// Lets a router take either one:
///
/// ```
/// use urlsplit::{PathParts, RequestPath, Url};
///
/// fn route(target: &mut impl PathParts) -> Vec<u8> {
///     let mut key = target.normalized_pathname().to_vec();
///     if let Ok(query) = target.query() {
///         if let Some(lang) = query.get("lang") {
///             key.push(b'@');
///             key.extend_from_slice(lang);
///         }
///     }
///     key
/// }
///
/// let mut url = Url::parse(b"https://example.com/docs/./intro?lang=en").unwrap();
/// let mut path = RequestPath::parse(b"/docs//intro?lang=en").unwrap();
/// assert_eq!(route(&mut url), route(&mut path));
/// ```
pub trait PathParts {
    /// Get the pathname, which always starts with `/`
    fn pathname(&self) -> &[u8];

    /// Get the pathname after decoding and dot-segment resolution
    fn normalized_pathname(&self) -> &[u8];

    /// Get the query string without its `?`
    fn raw_query(&self) -> &[u8];

    /// Get the fragment including its `#`
    fn hash(&self) -> &[u8];

    /// Get the decoded query, decoding it on first use
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParseError::InvalidCharacter`] if the raw query has
    /// a malformed escape.
    fn query(&mut self) -> Result<&Query>;

    /// Get the decoded query for editing, decoding it on first use
    ///
    /// # Errors
    ///
    /// Same as [`PathParts::query`].
    fn query_mut(&mut self) -> Result<&mut Query>;

    /// Clear every part, keeping the allocated buffers
    fn reset(&mut self);

    /// Check if there is a non-empty query string
    fn has_query(&self) -> bool {
        !self.raw_query().is_empty()
    }

    /// Check if there is a fragment
    fn has_hash(&self) -> bool {
        !self.hash().is_empty()
    }
}
