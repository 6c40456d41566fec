/// Errors that can occur while parsing, decoding or normalizing a URL.
///
/// Authority syntax, a missing scheme and an empty host are all accepted
/// as-is; the only failure is a byte that may not appear where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// An ASCII control byte outside the fragment, a malformed percent
    /// triple, or a byte (raw or escaped) a host/zone may not contain.
    InvalidCharacter,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidCharacter => "Invalid character in url",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Result type for URL parsing operations
pub type Result<T> = core::result::Result<T, ParseError>;
