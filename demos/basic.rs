use urlsplit::Url;

fn show(label: &str, bytes: &[u8]) {
    println!("{label}: {}", String::from_utf8_lossy(bytes));
}

fn main() {
    // Parse a URL with every component present
    let mut url = Url::parse(b"HTTPS://user:pw@Example.com:8080/a/./b/../c?q=1#top")
        .expect("Failed to parse URL");

    show("Protocol", url.protocol()); // https
    show("User", url.user()); // user
    show("Host", url.host()); // example.com:8080
    show("Port", url.port()); // 8080
    show("Pathname", url.pathname()); // /a/./b/../c
    show("Normalized", url.normalized_pathname()); // /a/c
    show("Query", url.raw_query()); // q=1
    show("Hash", url.hash()); // #top

    // Reuse the same Url for the next input
    url.set_href(b"//cdn.example.com/img.png")
        .expect("Failed to parse URL");
    show("Host", url.host()); // cdn.example.com

    // Edit and re-encode
    url.set_protocol("https");
    url.set_port("443");
    show("Encoded", &url.to_bytes()); // https://cdn.example.com:443/img.png
}
