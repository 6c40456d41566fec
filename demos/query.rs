use urlsplit::{Query, RequestPath};

fn main() {
    // Query strings keep order and duplicates
    let mut path = RequestPath::parse(b"/search?tag=rust&tag=url&page=2")
        .expect("Failed to parse request path");
    let query = path.query_mut().expect("Failed to decode query");

    for tag in query.get_all("tag") {
        println!("tag: {}", String::from_utf8_lossy(tag)); // rust, url
    }

    query.set("page", "3");
    query.add("q", "hello world");
    query.del("tag");

    let mut out = Vec::new();
    query.encode(&mut out);
    println!("{}", String::from_utf8_lossy(&out)); // tag=url&page=3&q=hello+world

    // Standalone decoding
    let standalone = Query::parse(b"a=1;b=%41").expect("Failed to decode query");
    standalone.range(|name, value| {
        println!(
            "{} = {}",
            String::from_utf8_lossy(name),
            String::from_utf8_lossy(value)
        );
        true
    });
}
