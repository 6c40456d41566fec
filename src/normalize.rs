use crate::character_sets::{EncodeMode, is_percent_triple};
use crate::compat::Vec;
use crate::log::debug;
use crate::percent_encode::unescape_into;
use memchr::{memchr, memmem, memrchr};

/// Normalize a pathname into a fresh buffer.
///
/// See [`normalize_pathname_into`].
pub fn normalize_pathname(pathname: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(pathname.len() + 1);
    normalize_pathname_into(&mut buffer, pathname);
    buffer
}

/// Normalize `pathname` into `buffer`, replacing its contents.
///
/// The path is percent-decoded, runs of `/` are collapsed, `/./` is removed
/// and `/x/../` is resolved. `..` above the root is dropped, so the result
/// never climbs out of `/`.
///
/// This never fails: if the pathname holds a malformed escape, `buffer`
/// receives the pathname unchanged. Running the result through again yields
/// the same bytes.
///
/// ```
/// use urlsplit::normalize_pathname;
///
/// assert_eq!(normalize_pathname(b"/a/./b//c/../d"), b"/a/b/d");
/// assert_eq!(normalize_pathname(b"/aaa/../../../../xxx"), b"/xxx");
/// ```
pub fn normalize_pathname_into(buffer: &mut Vec<u8>, pathname: &[u8]) {
    buffer.clear();
    if pathname.first() != Some(&b'/') {
        buffer.push(b'/');
    }

    if unescape_into(buffer, pathname, EncodeMode::Path).is_err() {
        debug!(
            "pathname left unnormalized: bad percent escape in {} bytes",
            pathname.len()
        );
        buffer.clear();
        buffer.extend_from_slice(pathname);
        return;
    }

    collapse_slashes(buffer);
    remove_dot_segments(buffer);
    resolve_parent_segments(buffer);
    pop_trailing_parent(buffer);
    escape_decoded_triples(buffer);
}

fn collapse_slashes(path: &mut Vec<u8>) {
    path.dedup_by(|b, prev| *b == b'/' && *prev == b'/');
}

fn remove_dot_segments(path: &mut Vec<u8>) {
    while let Some(n) = memmem::find(path, b"/./") {
        path.drain(n..n + 2);
    }
}

/// Splice out every `/x/../`, left to right. Without a preceding segment
/// the `/..` itself is dropped.
fn resolve_parent_segments(path: &mut Vec<u8>) {
    while let Some(n) = memmem::find(path, b"/../") {
        let start = memrchr(b'/', &path[..n]).unwrap_or(0);
        path.drain(start..n + 3);
    }
}

fn pop_trailing_parent(path: &mut Vec<u8>) {
    if !path.ends_with(b"/..") {
        return;
    }
    let n = path.len() - 3;
    match memrchr(b'/', &path[..n]) {
        Some(start) => path.truncate(start + 1),
        None => {
            path.clear();
            path.push(b'/');
        }
    }
}

/// A decoded `%` that still reads as an escape (`%2541` → `%41`) would decode
/// again on the next pass; write it back as `%25`.
fn escape_decoded_triples(path: &mut Vec<u8>) {
    let mut i = 0;
    while let Some(offset) = memchr(b'%', &path[i..]) {
        let at = i + offset;
        if is_percent_triple(&path[at..]) {
            path.insert(at + 1, b'2');
            path.insert(at + 2, b'5');
            i = at + 3;
        } else {
            i = at + 1;
        }
    }
}
