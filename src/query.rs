use crate::character_sets::EncodeMode;
use crate::compat::Vec;
use crate::error::Result;
use crate::log::debug;
use crate::percent_encode::{escape_into, unescape_into};
use crate::url_components::Span;

#[derive(Debug, Clone, Copy)]
struct QueryPair {
    name: Span,
    value: Span,
}

/// Ordered query multimap.
///
/// Pairs keep their insertion order and duplicate names are allowed. Names
/// and values are stored decoded, back to back in one buffer that keeps its
/// capacity across [`Query::reset`].
#[derive(Debug, Clone, Default)]
pub struct Query {
    bytes: Vec<u8>,
    pairs: Vec<QueryPair>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a query string (without the leading `?`) into a new multimap.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParseError::InvalidCharacter`] on a malformed escape.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let mut query = Self::new();
        query.decode(input)?;
        Ok(query)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Drop every pair, keeping the allocated buffers.
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.pairs.clear();
    }

    /// Get the first value for a name.
    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<&[u8]> {
        let name = name.as_ref();
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Get every value for a name, in insertion order.
    pub fn get_all(&self, name: impl AsRef<[u8]>) -> impl Iterator<Item = &[u8]> {
        self.iter()
            .filter(move |(n, _)| *n == name.as_ref())
            .map(|(_, v)| v)
    }

    /// Check if a name exists.
    pub fn has(&self, name: impl AsRef<[u8]>) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over all name/value pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.pairs
            .iter()
            .map(|pair| (pair.name.get(&self.bytes), pair.value.get(&self.bytes)))
    }

    /// Call `f` with each pair in order until it returns `false`.
    pub fn range(&self, mut f: impl FnMut(&[u8], &[u8]) -> bool) {
        for (name, value) in self.iter() {
            if !f(name, value) {
                return;
            }
        }
    }

    /// Append a pair, even if the name is already present.
    pub fn add(&mut self, name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) {
        let name = self.push_bytes(name.as_ref());
        let value = self.push_bytes(value.as_ref());
        self.pairs.push(QueryPair { name, value });
    }

    /// Replace the value of the first pair with this name, or append a new
    /// pair if there is none. Later duplicates are left alone.
    pub fn set(&mut self, name: impl AsRef<[u8]>, value: impl AsRef<[u8]>) {
        let name = name.as_ref();
        match self.position(name) {
            Some(i) => {
                let value = value.as_ref();
                let old = self.pairs[i].value;
                if value.len() <= old.len() {
                    let end = old.start + value.len();
                    self.bytes[old.start..end].copy_from_slice(value);
                    self.pairs[i].value = Span::new(old.start, end);
                } else {
                    self.pairs[i].value = self.push_bytes(value);
                }
                self.compact();
            }
            None => self.add(name, value),
        }
    }

    /// Remove the first pair with this name.
    pub fn del(&mut self, name: impl AsRef<[u8]>) {
        if let Some(i) = self.position(name.as_ref()) {
            self.pairs.remove(i);
            self.compact();
        }
    }

    /// Remove every pair with this name; the rest keep their order.
    pub fn del_all(&mut self, name: impl AsRef<[u8]>) {
        let name = name.as_ref();
        let bytes = &self.bytes;
        self.pairs.retain(|pair| pair.name.get(bytes) != name);
        self.compact();
    }

    /// Decode a query string and append its pairs.
    ///
    /// Pairs are separated by `&` or `;`; empty pairs are skipped and a pair
    /// without `=` gets an empty value. Names and values are unescaped in
    /// query mode, so `+` becomes a space.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParseError::InvalidCharacter`] on the first malformed
    /// escape. The failing pair is dropped; the pairs decoded before it stay.
    pub fn decode(&mut self, input: &[u8]) -> Result<()> {
        let mut rest = input;
        while !rest.is_empty() {
            let pair = match memchr::memchr2(b'&', b';', rest) {
                Some(i) => {
                    let pair = &rest[..i];
                    rest = &rest[i + 1..];
                    pair
                }
                None => core::mem::take(&mut rest),
            };
            if pair.is_empty() {
                continue;
            }

            let (name, value) = match memchr::memchr(b'=', pair) {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &b""[..]),
            };

            let mark = self.bytes.len();
            if let Err(err) = self.push_decoded_pair(name, value) {
                debug!("query decode stopped after {} pairs: {err}", self.pairs.len());
                self.bytes.truncate(mark);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Encode the pairs, in order and joined by `&`, onto the end of `buffer`.
    pub fn encode(&self, buffer: &mut Vec<u8>) {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                buffer.push(b'&');
            }
            escape_into(buffer, name, EncodeMode::QueryComponent);
            buffer.push(b'=');
            escape_into(buffer, value, EncodeMode::QueryComponent);
        }
    }

    fn position(&self, name: &[u8]) -> Option<usize> {
        self.pairs
            .iter()
            .position(|pair| pair.name.get(&self.bytes) == name)
    }

    /// Rebuild `bytes` from the live spans once the bytes no pair points
    /// at outnumber the ones that are still used.
    fn compact(&mut self) {
        let live: usize = self
            .pairs
            .iter()
            .map(|pair| pair.name.len() + pair.value.len())
            .sum();
        if self.bytes.len() - live <= live {
            return;
        }

        let capacity = self.bytes.capacity();
        let old = core::mem::replace(&mut self.bytes, Vec::with_capacity(capacity));
        for pair in &mut self.pairs {
            pair.name = copy_span(&mut self.bytes, &old, pair.name);
            pair.value = copy_span(&mut self.bytes, &old, pair.value);
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> Span {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(bytes);
        Span::new(start, self.bytes.len())
    }

    fn push_decoded_pair(&mut self, name: &[u8], value: &[u8]) -> Result<()> {
        let start = self.bytes.len();
        unescape_into(&mut self.bytes, name, EncodeMode::QueryComponent)?;
        let name = Span::new(start, self.bytes.len());
        unescape_into(&mut self.bytes, value, EncodeMode::QueryComponent)?;
        let value = Span::new(name.end, self.bytes.len());
        self.pairs.push(QueryPair { name, value });
        Ok(())
    }
}

fn copy_span(buffer: &mut Vec<u8>, from: &[u8], span: Span) -> Span {
    let start = buffer.len();
    buffer.extend_from_slice(span.get(from));
    Span::new(start, buffer.len())
}

/// Query multimap decoded on first read.
///
/// `decoded` is the memoization flag; the outcome of the one decode is kept
/// next to the pairs so every later read sees the same result. Only
/// [`LazyQuery::reset`] clears it.
#[derive(Debug, Clone)]
pub(crate) struct LazyQuery {
    decoded: bool,
    outcome: Result<()>,
    query: Query,
}

impl Default for LazyQuery {
    fn default() -> Self {
        Self {
            decoded: false,
            outcome: Ok(()),
            query: Query::new(),
        }
    }
}

impl LazyQuery {
    pub fn reset(&mut self) {
        self.decoded = false;
        self.outcome = Ok(());
        self.query.reset();
    }

    /// Decode `raw` unless that already happened, and hand out the pairs
    /// whatever the outcome was.
    pub fn materialize(&mut self, raw: &[u8]) -> &mut Query {
        if !self.decoded {
            self.outcome = self.query.decode(raw);
            self.decoded = true;
        }
        &mut self.query
    }

    pub fn get(&mut self, raw: &[u8]) -> Result<&Query> {
        self.materialize(raw);
        self.outcome?;
        Ok(&self.query)
    }

    pub fn get_mut(&mut self, raw: &[u8]) -> Result<&mut Query> {
        self.materialize(raw);
        self.outcome?;
        Ok(&mut self.query)
    }
}
