use super::{ParseOptions, pathname_span, split_tail};
use crate::error::Result;
use crate::normalize::normalize_pathname_into;
use crate::request_path::RequestPath;
use crate::url::Url;
use crate::url_components::Span;
use memchr::memchr;

/// Decompose `input` into `url`, reusing its buffers.
///
/// Scan order: fragment, query, protocol, userinfo, host, path. Each step
/// takes a prefix of what the previous one left. `url` is reset first; on
/// error its fields may be partially populated.
///
/// # Errors
///
/// Returns [`crate::ParseError::InvalidCharacter`] if an ASCII control byte
/// appears before the fragment.
pub fn parse_url(url: &mut Url, input: &[u8], options: ParseOptions) -> Result<()> {
    url.reset();
    url.buffer.extend_from_slice(input);

    let Url {
        buffer,
        components,
        normalized_pathname,
        ..
    } = url;

    let tail = split_tail(input)?;
    components.hash = tail.hash;
    components.raw_query = tail.raw_query;
    let end = tail.end;

    let mut pos = 0;
    if options.parse_protocol {
        if input[..end].starts_with(b"//") {
            pos = 2;
        } else {
            if let Some(i) = memchr(b':', &input[..end]) {
                components.protocol = Span::new(0, i);
                buffer[..i].make_ascii_lowercase();
                pos = i + 1;
            }
            if input[pos..end].starts_with(b"//") {
                pos += 2;
            }
        }
    }

    // Userinfo ends at the first '@' anywhere before the query; later '@'
    // and ':' get no special treatment.
    if let Some(i) = memchr(b'@', &input[pos..end]) {
        components.auth = Span::new(pos, pos + i);
        components.split_auth(buffer);
        pos += i + 1;
    }

    let host_end = memchr(b'/', &input[pos..end]).map_or(end, |i| pos + i);
    components.host = Span::new(pos, host_end);
    buffer[pos..host_end].make_ascii_lowercase();
    components.split_host(buffer);

    components.pathname = pathname_span(buffer, Span::new(host_end, end));
    normalize_pathname_into(normalized_pathname, components.pathname.get(buffer));

    Ok(())
}

/// Decompose a request target (`/p/a/t/h?query#hash`) into `path`.
///
/// Everything before the query is the pathname; there is no scheme or
/// authority to look for.
///
/// # Errors
///
/// Returns [`crate::ParseError::InvalidCharacter`] if an ASCII control byte
/// appears before the fragment.
pub fn parse_request_path(path: &mut RequestPath, input: &[u8]) -> Result<()> {
    path.reset();
    path.buffer.extend_from_slice(input);

    let tail = split_tail(input)?;
    path.hash = tail.hash;
    path.raw_query = tail.raw_query;
    path.pathname = pathname_span(&mut path.buffer, Span::new(0, tail.end));
    normalize_pathname_into(
        &mut path.normalized_pathname,
        path.pathname.get(&path.buffer),
    );

    Ok(())
}
