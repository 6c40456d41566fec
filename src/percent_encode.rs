use crate::character_sets::{EncodeMode, is_percent_triple, should_escape, unhex};
use crate::compat::{Cow, Vec};
use crate::error::{ParseError, Result};
use percent_encoding::{percent_decode, percent_encode};

/// Percent-escape `input` for the given URL section.
///
/// Borrows the input when nothing needs escaping.
pub fn escape(input: &[u8], mode: EncodeMode) -> Cow<'_, [u8]> {
    if mode == EncodeMode::QueryComponent && memchr::memchr(b' ', input).is_some() {
        let mut buffer = Vec::with_capacity(input.len());
        escape_into(&mut buffer, input, mode);
        return Cow::Owned(buffer);
    }

    match Cow::<str>::from(percent_encode(input, mode.ascii_set())) {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Write percent-escaped `input` directly to buffer
pub fn escape_into(buffer: &mut Vec<u8>, input: &[u8], mode: EncodeMode) {
    buffer.reserve(input.len());

    if mode != EncodeMode::QueryComponent {
        push_encoded(buffer, input, mode);
        return;
    }

    // Space is the one byte written as something other than itself or %XX
    for (i, chunk) in input.split(|&b| b == b' ').enumerate() {
        if i > 0 {
            buffer.push(b'+');
        }
        push_encoded(buffer, chunk, mode);
    }
}

fn push_encoded(buffer: &mut Vec<u8>, input: &[u8], mode: EncodeMode) {
    for chunk in percent_encode(input, mode.ascii_set()) {
        buffer.extend_from_slice(chunk.as_bytes());
    }
}

/// Decode percent-escapes in `input` for the given URL section.
///
/// Borrows the input when it holds no `%` (and, in query mode, no `+`).
///
/// # Errors
///
/// Returns [`ParseError::InvalidCharacter`] if a `%` is not followed by two
/// hex digits, or if a host/zone contains a byte it may not carry.
pub fn unescape(input: &[u8], mode: EncodeMode) -> Result<Cow<'_, [u8]>> {
    if !validate_escapes(input, mode)? {
        return Ok(Cow::Borrowed(input));
    }
    let mut buffer = Vec::with_capacity(input.len());
    push_decoded(&mut buffer, input, mode);
    Ok(Cow::Owned(buffer))
}

/// Decode percent-escapes in `input` and append the result to buffer.
///
/// Validation runs before anything is written, so the buffer is untouched
/// on error.
///
/// # Errors
///
/// Same as [`unescape`].
pub fn unescape_into(buffer: &mut Vec<u8>, input: &[u8], mode: EncodeMode) -> Result<()> {
    if validate_escapes(input, mode)? {
        push_decoded(buffer, input, mode);
    } else {
        buffer.extend_from_slice(input);
    }
    Ok(())
}

/// Escape a query name or value (`+` for space).
pub fn escape_query(input: &[u8]) -> Cow<'_, [u8]> {
    escape(input, EncodeMode::QueryComponent)
}

/// Unescape a query name or value (`+` decodes to space).
///
/// # Errors
///
/// Same as [`unescape`].
pub fn unescape_query(input: &[u8]) -> Result<Cow<'_, [u8]>> {
    unescape(input, EncodeMode::QueryComponent)
}

/// Check every escape in `input`. Returns whether any byte needs
/// substituting on decode.
fn validate_escapes(input: &[u8], mode: EncodeMode) -> Result<bool> {
    let host_like = matches!(mode, EncodeMode::Host | EncodeMode::Zone);
    let mut needs_decode = false;
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            b'%' => {
                let triple = &input[i..];
                if !is_percent_triple(triple) {
                    return Err(ParseError::InvalidCharacter);
                }
                let is_escaped_percent = triple.starts_with(b"%25");

                // RFC 3986 §3.2.2: a host may only escape non-ASCII bytes.
                // RFC 6874 adds %25 for the percent sign of a zone.
                if mode == EncodeMode::Host && unhex(triple[1]) < 8 && !is_escaped_percent {
                    return Err(ParseError::InvalidCharacter);
                }
                // A zone may escape anything it could carry raw, and space
                // for Windows interface names.
                if mode == EncodeMode::Zone {
                    let v = (unhex(triple[1]) << 4) | unhex(triple[2]);
                    if !is_escaped_percent && v != b' ' && should_escape(v, EncodeMode::Host) {
                        return Err(ParseError::InvalidCharacter);
                    }
                }
                needs_decode = true;
                i += 3;
            }
            b'+' => {
                needs_decode |= mode == EncodeMode::QueryComponent;
                i += 1;
            }
            b => {
                if host_like && b < 0x80 && should_escape(b, mode) {
                    return Err(ParseError::InvalidCharacter);
                }
                i += 1;
            }
        }
    }

    Ok(needs_decode)
}

/// Decode an input already accepted by `validate_escapes`.
fn push_decoded(buffer: &mut Vec<u8>, input: &[u8], mode: EncodeMode) {
    buffer.reserve(input.len());

    if mode != EncodeMode::QueryComponent {
        buffer.extend(percent_decode(input));
        return;
    }

    for (i, chunk) in input.split(|&b| b == b'+').enumerate() {
        if i > 0 {
            buffer.push(b' ');
        }
        buffer.extend(percent_decode(chunk));
    }
}
