use crate::compat::Vec;
use crate::encoder::encode_url;
use crate::error::Result;
use crate::normalize::normalize_pathname_into;
use crate::parser::{ParseOptions, parse_url, pathname_span};
use crate::path_parts::PathParts;
use crate::query::{LazyQuery, Query};
use crate::url_components::{Span, UrlComponents};

/// A decomposed URL.
///
/// ```text
/// [protocol:][//[user[:pass]@]hostname[:port]]pathname[?query][#hash]
/// ```
///
/// All components are zero-copy views into one buffer owned by the `Url`.
/// A `Url` is meant to be reused: [`Url::set_href`] and [`Url::reset`]
/// clear it while keeping every allocation, so parsing in a loop does not
/// allocate once the buffers have grown to fit.
///
/// ```
/// use urlsplit::Url;
///
/// let mut url = Url::parse(b"HtTp://user:pw@Example.com:8080/a/../b?q=1#top").unwrap();
/// assert_eq!(url.protocol(), b"http");
/// assert_eq!(url.host(), b"example.com:8080");
/// assert_eq!(url.normalized_pathname(), b"/b");
/// assert_eq!(url.query().unwrap().get("q"), Some(&b"1"[..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Url {
    pub(crate) buffer: Vec<u8>,
    pub(crate) components: UrlComponents,
    pub(crate) normalized_pathname: Vec<u8>,
    pub(crate) query: LazyQuery,
}

impl Url {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `Url` whose buffer can hold `capacity` input bytes without
    /// growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            normalized_pathname: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Parse a URL that may start with a scheme.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParseError::InvalidCharacter`] if an ASCII control
    /// byte appears before the fragment.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let mut url = Self::new();
        parse_url(&mut url, input, ParseOptions::new())?;
        Ok(url)
    }

    /// Parse a schemeless URL (`host:port/path`, `//host/path`, `/path`).
    ///
    /// # Errors
    ///
    /// Same as [`Url::parse`].
    pub fn parse_without_protocol(input: &[u8]) -> Result<Self> {
        let mut url = Self::new();
        parse_url(&mut url, input, ParseOptions::without_protocol())?;
        Ok(url)
    }

    /// Re-parse this `Url` from `input`, reusing its buffers.
    ///
    /// # Errors
    ///
    /// Same as [`Url::parse`]. On error the fields may be partially
    /// populated; call [`Url::reset`] before reading them.
    pub fn set_href(&mut self, input: &[u8]) -> Result<()> {
        parse_url(self, input, ParseOptions::new())
    }

    /// [`Url::set_href`] with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`Url::set_href`].
    pub fn set_href_with(&mut self, input: &[u8], options: ParseOptions) -> Result<()> {
        parse_url(self, input, options)
    }

    /// Clear every component, keeping the allocated buffers.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.components = UrlComponents::new();
        self.normalized_pathname.clear();
        self.query.reset();
    }

    /// Append the canonical form of this URL to `buffer`.
    ///
    /// The query is written from the multimap (decoding the raw query first
    /// if nothing has read it yet), so edits made through
    /// [`Url::query_mut`] show up here. Encoding is a normalization: `//`
    /// is written because authority fields are present, not because the
    /// input had it. Parsing the output and encoding again reproduces it
    /// exactly.
    pub fn encode(&mut self, buffer: &mut Vec<u8>) {
        encode_url(self, buffer);
    }

    /// [`Url::encode`] into a new buffer.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.buffer.len());
        self.encode(&mut buffer);
        buffer
    }

    fn get(&self, span: Span) -> &[u8] {
        span.get(&self.buffer)
    }

    /// Get the lowercased protocol without its `:` (e.g. `https`)
    pub fn protocol(&self) -> &[u8] {
        self.get(self.components.protocol)
    }

    /// Get the raw userinfo (`user:pass`) as it appeared before the `@`
    pub fn auth(&self) -> &[u8] {
        self.get(self.components.auth)
    }

    /// Get the username
    pub fn user(&self) -> &[u8] {
        self.get(self.components.user)
    }

    /// Get the password
    pub fn pass(&self) -> &[u8] {
        self.get(self.components.pass)
    }

    /// Get the lowercased host including port (e.g. `example.com:8080`)
    pub fn host(&self) -> &[u8] {
        self.get(self.components.host)
    }

    /// Get the hostname without port
    pub fn hostname(&self) -> &[u8] {
        self.get(self.components.hostname)
    }

    /// Get the port, everything after the first `:` of the host
    pub fn port(&self) -> &[u8] {
        self.get(self.components.port)
    }

    /// Get the pathname, which always starts with `/`
    pub fn pathname(&self) -> &[u8] {
        <Self as PathParts>::pathname(self)
    }

    /// Get the pathname after decoding and dot-segment resolution
    pub fn normalized_pathname(&self) -> &[u8] {
        <Self as PathParts>::normalized_pathname(self)
    }

    /// Get the query string without its `?`, as it appeared in the input
    pub fn raw_query(&self) -> &[u8] {
        <Self as PathParts>::raw_query(self)
    }

    /// Get the fragment including its `#`
    pub fn hash(&self) -> &[u8] {
        <Self as PathParts>::hash(self)
    }

    /// Get the decoded query, decoding it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParseError::InvalidCharacter`] if the raw query has a
    /// malformed escape. The outcome is cached until the next reset.
    pub fn query(&mut self) -> Result<&Query> {
        <Self as PathParts>::query(self)
    }

    /// Get the decoded query for editing, decoding it on first use.
    ///
    /// # Errors
    ///
    /// Same as [`Url::query`].
    pub fn query_mut(&mut self) -> Result<&mut Query> {
        <Self as PathParts>::query_mut(self)
    }

    /// Set the protocol (stored lowercased, without `:`)
    ///
    /// The value is appended to the internal buffer; the bytes it replaces
    /// are only released by the next [`Url::reset`] or [`Url::set_href`].
    pub fn set_protocol(&mut self, protocol: impl AsRef<[u8]>) {
        let span = self.push(protocol.as_ref());
        self.buffer[span.start..span.end].make_ascii_lowercase();
        self.components.protocol = span;
    }

    /// Set the username; `auth` is rebuilt from user and password
    ///
    /// The value is appended to the internal buffer; the bytes it replaces
    /// are only released by the next [`Url::reset`] or [`Url::set_href`].
    pub fn set_user(&mut self, user: impl AsRef<[u8]>) {
        self.components.user = self.push(user.as_ref());
        self.rebuild_auth();
    }

    /// Set the password; `auth` is rebuilt from user and password
    ///
    /// The value is appended to the internal buffer; the bytes it replaces
    /// are only released by the next [`Url::reset`] or [`Url::set_href`].
    pub fn set_pass(&mut self, pass: impl AsRef<[u8]>) {
        self.components.pass = self.push(pass.as_ref());
        self.rebuild_auth();
    }

    /// Set the hostname (stored lowercased); `host` is rebuilt
    ///
    /// The value is appended to the internal buffer; the bytes it replaces
    /// are only released by the next [`Url::reset`] or [`Url::set_href`].
    pub fn set_hostname(&mut self, hostname: impl AsRef<[u8]>) {
        self.components.hostname = self.push(hostname.as_ref());
        self.rebuild_host();
    }

    /// Set the port; `host` is rebuilt
    ///
    /// The value is appended to the internal buffer; the bytes it replaces
    /// are only released by the next [`Url::reset`] or [`Url::set_href`].
    pub fn set_port(&mut self, port: impl AsRef<[u8]>) {
        self.components.port = self.push(port.as_ref());
        self.rebuild_host();
    }

    /// Set the pathname. A missing leading `/` is added and the normalized
    /// pathname is recomputed.
    ///
    /// The value is appended to the internal buffer; the bytes it replaces
    /// are only released by the next [`Url::reset`] or [`Url::set_href`].
    pub fn set_pathname(&mut self, pathname: impl AsRef<[u8]>) {
        let raw = self.push(pathname.as_ref());
        let Self {
            buffer,
            components,
            normalized_pathname,
            ..
        } = self;
        components.pathname = pathname_span(buffer, raw);
        normalize_pathname_into(normalized_pathname, components.pathname.get(buffer));
    }

    /// Set the fragment. A missing leading `#` is added; empty clears it.
    ///
    /// The value is appended to the internal buffer; the bytes it replaces
    /// are only released by the next [`Url::reset`] or [`Url::set_href`].
    pub fn set_hash(&mut self, hash: impl AsRef<[u8]>) {
        let hash = hash.as_ref();
        let start = self.buffer.len();
        if !hash.is_empty() && hash[0] != b'#' {
            self.buffer.push(b'#');
        }
        self.buffer.extend_from_slice(hash);
        self.components.hash = Span::new(start, self.buffer.len());
    }

    fn push(&mut self, bytes: &[u8]) -> Span {
        let start = self.buffer.len();
        self.buffer.extend_from_slice(bytes);
        Span::new(start, self.buffer.len())
    }

    fn rebuild_auth(&mut self) {
        let c = &mut self.components;
        (c.auth, c.user, c.pass) = join_pair(&mut self.buffer, c.user, c.pass);
    }

    fn rebuild_host(&mut self) {
        let c = &mut self.components;
        (c.host, c.hostname, c.port) = join_pair(&mut self.buffer, c.hostname, c.port);
        self.buffer[c.host.start..c.host.end].make_ascii_lowercase();
    }
}

/// Append `first[:second]` to the buffer. Returns the span of the whole and
/// of both parts inside it.
fn join_pair(buffer: &mut Vec<u8>, first: Span, second: Span) -> (Span, Span, Span) {
    let start = buffer.len();
    buffer.extend_from_within(first.start..first.end);
    let first = Span::new(start, buffer.len());

    if second.is_empty() {
        let end = buffer.len();
        return (first, first, Span::new(end, end));
    }

    buffer.push(b':');
    let second_start = buffer.len();
    buffer.extend_from_within(second.start..second.end);
    let end = buffer.len();
    (Span::new(start, end), first, Span::new(second_start, end))
}

impl PathParts for Url {
    fn pathname(&self) -> &[u8] {
        self.get(self.components.pathname)
    }

    fn normalized_pathname(&self) -> &[u8] {
        &self.normalized_pathname
    }

    fn raw_query(&self) -> &[u8] {
        self.get(self.components.raw_query)
    }

    fn hash(&self) -> &[u8] {
        self.get(self.components.hash)
    }

    fn query(&mut self) -> Result<&Query> {
        let raw = self.components.raw_query.get(&self.buffer);
        self.query.get(raw)
    }

    fn query_mut(&mut self) -> Result<&mut Query> {
        let raw = self.components.raw_query.get(&self.buffer);
        self.query.get_mut(raw)
    }

    fn reset(&mut self) {
        Url::reset(self);
    }
}
