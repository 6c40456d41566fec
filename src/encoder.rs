use crate::compat::Vec;
use crate::url::Url;
use memchr::memchr;

/// Append the canonical bytes of `url` to `out`.
///
/// `[protocol:][//][user:pass@][hostname][:port]pathname[?query][hash]`
///
/// `//` and the userinfo are written based on which fields are set, plus
/// the few markers a re-parse needs to land every byte in the same field:
/// `//` before a pathname that starts with `//` (or that holds a `:` while
/// there is no protocol), and an empty `:@` userinfo when a later
/// component holds an `@`.
pub(crate) fn encode_url(url: &mut Url, out: &mut Vec<u8>) {
    let Url {
        buffer,
        components,
        query,
        ..
    } = url;
    let buffer = &buffer[..];

    let protocol = components.protocol.get(buffer);
    let user = components.user.get(buffer);
    let pass = components.pass.get(buffer);
    let hostname = components.hostname.get(buffer);
    let port = components.port.get(buffer);
    let pathname = components.pathname.get(buffer);
    let hash = components.hash.get(buffer);

    let has_at = |bytes: &[u8]| memchr(b'@', bytes).is_some();
    let userinfo = !user.is_empty()
        || !pass.is_empty()
        || has_at(hostname)
        || has_at(port)
        || has_at(pathname);
    let slashes = userinfo
        || !hostname.is_empty()
        || !port.is_empty()
        || pathname.starts_with(b"//")
        || (protocol.is_empty() && memchr(b':', pathname).is_some());

    if !protocol.is_empty() {
        out.extend_from_slice(protocol);
        out.push(b':');
    }
    if slashes {
        out.extend_from_slice(b"//");
    }
    if userinfo {
        out.extend_from_slice(user);
        out.push(b':');
        out.extend_from_slice(pass);
        out.push(b'@');
    }
    out.extend_from_slice(hostname);
    if !port.is_empty() {
        out.push(b':');
        out.extend_from_slice(port);
    }
    out.extend_from_slice(pathname);

    let query = query.materialize(components.raw_query.get(buffer));
    if !query.is_empty() {
        out.push(b'?');
        query.encode(out);
    }

    out.extend_from_slice(hash);
}
