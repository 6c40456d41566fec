use crate::compat::Vec;
use crate::error::Result;
use crate::parser::parse_request_path;
use crate::path_parts::PathParts;
use crate::query::{LazyQuery, Query};
use crate::url_components::Span;

/// A decomposed request target: `/p/a/t/h?query#hash`.
///
/// The cheaper sibling of [`crate::Url`] for servers that only see the
/// origin-form target of a request line. There is no scheme or authority,
/// so every byte before the query belongs to the pathname.
///
/// ```
/// use urlsplit::RequestPath;
///
/// let mut path = RequestPath::new();
/// path.set_href(b"/api//v1/../v2/users?id=7").unwrap();
/// assert_eq!(path.normalized_pathname(), b"/api/v2/users");
/// assert_eq!(path.query().unwrap().get("id"), Some(&b"7"[..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestPath {
    pub(crate) buffer: Vec<u8>,
    pub(crate) pathname: Span,
    pub(crate) raw_query: Span,
    pub(crate) hash: Span,
    pub(crate) normalized_pathname: Vec<u8>,
    pub(crate) query: LazyQuery,
}

impl RequestPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`crate::ParseError::InvalidCharacter`] if an ASCII control
    /// byte appears before the fragment.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let mut path = Self::new();
        parse_request_path(&mut path, input)?;
        Ok(path)
    }

    /// Re-parse from `input`, reusing the buffers.
    ///
    /// # Errors
    ///
    /// Same as [`RequestPath::parse`].
    pub fn set_href(&mut self, input: &[u8]) -> Result<()> {
        parse_request_path(self, input)
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pathname = Span::default();
        self.raw_query = Span::default();
        self.hash = Span::default();
        self.normalized_pathname.clear();
        self.query.reset();
    }

    pub fn pathname(&self) -> &[u8] {
        <Self as PathParts>::pathname(self)
    }

    pub fn normalized_pathname(&self) -> &[u8] {
        <Self as PathParts>::normalized_pathname(self)
    }

    pub fn raw_query(&self) -> &[u8] {
        <Self as PathParts>::raw_query(self)
    }

    pub fn hash(&self) -> &[u8] {
        <Self as PathParts>::hash(self)
    }

    /// # Errors
    ///
    /// Returns [`crate::ParseError::InvalidCharacter`] if the raw query has
    /// a malformed escape.
    pub fn query(&mut self) -> Result<&Query> {
        <Self as PathParts>::query(self)
    }

    /// # Errors
    ///
    /// Same as [`RequestPath::query`].
    pub fn query_mut(&mut self) -> Result<&mut Query> {
        <Self as PathParts>::query_mut(self)
    }
}

impl PathParts for RequestPath {
    fn pathname(&self) -> &[u8] {
        self.pathname.get(&self.buffer)
    }

    fn normalized_pathname(&self) -> &[u8] {
        &self.normalized_pathname
    }

    fn raw_query(&self) -> &[u8] {
        self.raw_query.get(&self.buffer)
    }

    fn hash(&self) -> &[u8] {
        self.hash.get(&self.buffer)
    }

    fn query(&mut self) -> Result<&Query> {
        self.query.get(self.raw_query.get(&self.buffer))
    }

    fn query_mut(&mut self) -> Result<&mut Query> {
        self.query.get_mut(self.raw_query.get(&self.buffer))
    }

    fn reset(&mut self) {
        RequestPath::reset(self);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ParseError;

    #[test]
    fn test_empty_path() {
        let path = RequestPath::parse(b"").unwrap();
        assert_eq!(path.pathname(), b"/");
        assert_eq!(path.normalized_pathname(), b"/");
        assert!(!path.has_query());
        assert!(!path.has_hash());
    }

    #[test]
    fn test_query_and_hash_only() {
        let mut path = RequestPath::parse(b"?a=1#top").unwrap();
        assert_eq!(path.pathname(), b"/");
        assert_eq!(path.raw_query(), b"a=1");
        assert_eq!(path.hash(), b"#top");
        assert_eq!(path.query().unwrap().get("a"), Some(&b"1"[..]));
    }

    #[test]
    fn test_reuse_resets_query() {
        let mut path = RequestPath::new();
        path.set_href(b"/a?x=1").unwrap();
        assert!(path.query().unwrap().has("x"));

        path.set_href(b"/b?y=2").unwrap();
        assert!(!path.query().unwrap().has("x"));
        assert_eq!(path.query().unwrap().get("y"), Some(&b"2"[..]));
    }

    #[test]
    fn test_control_byte() {
        assert_eq!(
            RequestPath::parse(b"/a\x00b").err(),
            Some(ParseError::InvalidCharacter)
        );
        let path = RequestPath::parse(b"/a#\x00").unwrap();
        assert_eq!(path.hash(), b"#\x00");
    }

    #[test]
    fn test_query_edit() {
        let mut path = RequestPath::parse(b"/a?x=1&x=2").unwrap();
        let query = path.query_mut().unwrap();
        query.del_all("x");
        query.set("y", "3");
        let mut out = Vec::new();
        path.query().unwrap().encode(&mut out);
        assert_eq!(out, b"y=3");
    }
}
