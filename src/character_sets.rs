use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Which section of a URL a byte string belongs to.
///
/// Each mode has its own set of bytes that must be percent-escaped, following
/// RFC 3986 §2.2–§2.3 with a few deliberate deviations (see the individual
/// sets below).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeMode {
    /// A whole path; only `?` among the reserved characters is escaped.
    Path,
    /// A single path segment; `/ ; ,` are escaped as well.
    PathSegment,
    /// A host, including the `:port` and `[ipv6]` syntax.
    Host,
    /// An IPv6 zone identifier (RFC 6874).
    Zone,
    /// The user or password part of the userinfo.
    UserPassword,
    /// A query name or value; space is written as `+`.
    QueryComponent,
    /// The fragment.
    Fragment,
}

/// §2.3 unreserved characters are the only ASCII bytes left alone.
/// Every reserved character is escaped, which is exactly what a query
/// name or value needs.
pub const QUERY_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// §3.3 allows `: @ & = + $` in a path. `/ ; ,` are kept as well because
/// the path is handled as a whole, which leaves only `?` to escape.
pub const PATH_SET: &AsciiSet = &QUERY_COMPONENT_SET
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

/// `PATH_SET` with `/ ; ,` escaped, as they delimit segments.
pub const PATH_SEGMENT_SET: &AsciiSet = &QUERY_COMPONENT_SET
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// §3.2.1 userinfo. `:` is escaped too since it splits user from password.
pub const USERINFO_SET: &AsciiSet = &QUERY_COMPONENT_SET
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// §3.2.2 sub-delims, plus `:` for the port, `[ ]` for IPv6 literals and
/// `< > "`, which a host can never carry escaped anyway.
pub const HOST_SET: &AsciiSet = &QUERY_COMPONENT_SET
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'[')
    .remove(b']')
    .remove(b'<')
    .remove(b'>')
    .remove(b'"');

/// §4.1: no reserved character is escaped. Of the sub-delims only
/// `! ( ) *` pass through; `'` stays escaped.
pub const FRAGMENT_SET: &AsciiSet = &PATH_SET
    .remove(b'?')
    .remove(b'!')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

impl EncodeMode {
    /// The percent-encode set used when escaping in this mode.
    pub const fn ascii_set(self) -> &'static AsciiSet {
        match self {
            Self::Path => PATH_SET,
            Self::PathSegment => PATH_SEGMENT_SET,
            Self::Host | Self::Zone => HOST_SET,
            Self::UserPassword => USERINFO_SET,
            Self::QueryComponent => QUERY_COMPONENT_SET,
            Self::Fragment => FRAGMENT_SET,
        }
    }
}

/// Whether `c` must be percent-escaped when it appears in `mode`.
///
/// `AsciiSet` does not expose membership, so unescape validation goes
/// through this function; the tests keep the two in agreement.
pub fn should_escape(c: u8, mode: EncodeMode) -> bool {
    if c.is_ascii_alphanumeric() {
        return false;
    }

    if matches!(mode, EncodeMode::Host | EncodeMode::Zone)
        && matches!(
            c,
            b'!' | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'['
                | b']'
                | b'<'
                | b'>'
                | b'"'
        )
    {
        return false;
    }

    match c {
        b'-' | b'_' | b'.' | b'~' => return false,
        b'$' | b'&' | b'+' | b',' | b'/' | b':' | b';' | b'=' | b'?' | b'@' => match mode {
            EncodeMode::Path => return c == b'?',
            EncodeMode::PathSegment => return matches!(c, b'/' | b';' | b',' | b'?'),
            EncodeMode::UserPassword => return matches!(c, b'@' | b'/' | b'?' | b':'),
            EncodeMode::QueryComponent => return true,
            EncodeMode::Fragment => return false,
            EncodeMode::Host | EncodeMode::Zone => {}
        },
        _ => {}
    }

    if mode == EncodeMode::Fragment && matches!(c, b'!' | b'(' | b')' | b'*') {
        return false;
    }

    true
}

/// ASCII control bytes: 0x00–0x1F and DEL.
pub fn is_ascii_control(b: u8) -> bool {
    b < b' ' || b == 0x7f
}

/// Check if any byte is an ASCII control byte
pub fn has_ascii_control(input: &[u8]) -> bool {
    input.iter().any(|&b| is_ascii_control(b))
}

/// Value of a single hex digit. Callers validate with `is_ascii_hexdigit`
/// first; anything else maps to 0.
pub fn unhex(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

/// Check if `input` starts with a well-formed `%XX` triple
pub fn is_percent_triple(input: &[u8]) -> bool {
    matches!(input, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}
