mod decompose;

pub use decompose::{parse_request_path, parse_url};

use crate::character_sets::has_ascii_control;
use crate::compat::Vec;
use crate::error::{ParseError, Result};
use crate::log::trace;
use crate::url_components::Span;

/// Options for [`parse_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Look for a `scheme:` prefix. When disabled the input is treated as
    /// schemeless (`[//][userinfo@]host[/path]...`), so a `:` before the
    /// first `/` separates hostname from port instead.
    pub parse_protocol: bool,
}

impl ParseOptions {
    /// Parse with a scheme.
    pub const fn new() -> Self {
        Self {
            parse_protocol: true,
        }
    }

    /// Parse schemeless or path-relative input.
    pub const fn without_protocol() -> Self {
        Self {
            parse_protocol: false,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The fragment and query of an input, split off its end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tail {
    /// Fragment including its `#`.
    pub hash: Span,
    /// Query without its `?`.
    pub raw_query: Span,
    /// Where the part before both ends.
    pub end: usize,
}

/// Split the fragment and then the query off `input`.
///
/// The fragment is kept verbatim. Everything before it must be free of
/// ASCII control bytes.
pub(crate) fn split_tail(input: &[u8]) -> Result<Tail> {
    let mut tail = Tail {
        end: input.len(),
        ..Tail::default()
    };

    if let Some(i) = memchr::memchr(b'#', input) {
        tail.hash = Span::new(i, input.len());
        tail.end = i;
    }

    if has_ascii_control(&input[..tail.end]) {
        trace!("rejected control byte in {} byte url", input.len());
        return Err(ParseError::InvalidCharacter);
    }

    if let Some(i) = memchr::memchr(b'?', &input[..tail.end]) {
        tail.raw_query = Span::new(i + 1, tail.end);
        tail.end = i;
    }

    Ok(tail)
}

/// Span of the pathname for the bytes in `rest`: `rest` itself when it
/// already starts with `/`, otherwise a `/`-prefixed copy appended to
/// the buffer. An empty `rest` becomes `/`.
pub(crate) fn pathname_span(buffer: &mut Vec<u8>, rest: Span) -> Span {
    if rest.get(buffer).first() == Some(&b'/') {
        return rest;
    }
    let start = buffer.len();
    buffer.push(b'/');
    buffer.extend_from_within(rest.start..rest.end);
    Span::new(start, buffer.len())
}
