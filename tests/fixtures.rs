#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// JSON fixture suites for decomposition, encoding and query decoding
#[path = "fixtures/loader.rs"]
mod loader;

use loader::{FixtureResult, QueryCase, UrlCase, load_query_cases, load_url_cases};
use urlsplit::{ParseOptions, Query, Url};

fn run_url_cases(cases: Vec<UrlCase>) -> FixtureResult {
    let mut result = FixtureResult::new();
    let mut url = Url::new();
    let mut test_num = 0;

    for case in cases {
        let UrlCase::Test(test) = case else {
            continue;
        };
        test_num += 1;
        let input = test.input.as_str();

        let options = if test.without_protocol {
            ParseOptions::without_protocol()
        } else {
            ParseOptions::new()
        };
        let parsed = url.set_href_with(input.as_bytes(), options);

        if test.failure {
            let passed = parsed.is_err();
            if !passed {
                result.check(test_num, input, "parsing", Some("failure"), b"success");
            }
            result.record(passed);
            continue;
        }
        if parsed.is_err() {
            result.check(test_num, input, "parsing", Some("success"), b"failure");
            result.record(false);
            continue;
        }

        let mut passed = true;
        let fields = [
            ("protocol", test.protocol.as_deref(), url.protocol()),
            ("auth", test.auth.as_deref(), url.auth()),
            ("user", test.user.as_deref(), url.user()),
            ("pass", test.pass.as_deref(), url.pass()),
            ("host", test.host.as_deref(), url.host()),
            ("hostname", test.hostname.as_deref(), url.hostname()),
            ("port", test.port.as_deref(), url.port()),
            ("pathname", test.pathname.as_deref(), url.pathname()),
            (
                "normalized_pathname",
                test.normalized_pathname.as_deref(),
                url.normalized_pathname(),
            ),
            ("raw_query", test.raw_query.as_deref(), url.raw_query()),
            ("hash", test.hash.as_deref(), url.hash()),
        ];
        for (field, expected, actual) in fields {
            passed &= result.check(test_num, input, field, expected, actual);
        }

        if test.href.is_some() {
            let href = url.to_bytes();
            passed &= result.check(test_num, input, "href", test.href.as_deref(), &href);
        }

        result.record(passed);
    }

    result
}

fn run_query_cases(cases: Vec<QueryCase>) -> FixtureResult {
    let mut result = FixtureResult::new();
    let mut query = Query::new();
    let mut test_num = 0;

    for case in cases {
        let QueryCase::Test(test) = case else {
            continue;
        };
        test_num += 1;
        let input = test.input.as_str();

        query.reset();
        let decoded = query.decode(input.as_bytes());
        let mut passed = decoded.is_err() == test.failure;
        if !passed {
            let expected = if test.failure { "failure" } else { "success" };
            let actual: &[u8] = if decoded.is_err() { b"failure" } else { b"success" };
            result.check(test_num, input, "decoding", Some(expected), actual);
        }

        let pairs: Vec<String> = query
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    String::from_utf8_lossy(name),
                    String::from_utf8_lossy(value)
                )
            })
            .collect();
        let expected: Vec<String> = test
            .pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        passed &= result.check(
            test_num,
            input,
            "pairs",
            Some(&expected.join(" | ")),
            pairs.join(" | ").as_bytes(),
        );

        let mut encoded = Vec::new();
        query.encode(&mut encoded);
        passed &= result.check(test_num, input, "encoded", test.encoded.as_deref(), &encoded);

        result.record(passed);
    }

    result
}

#[test]
fn test_url_fixtures() {
    let cases = load_url_cases(include_str!("fixtures/urls.json"));
    println!("\nRunning {} url fixtures...", cases.len());
    let result = run_url_cases(cases);
    result.assert_clean("url");
    assert!(result.passed >= 30, "fixture file lost cases: {}", result.summary());
}

#[test]
fn test_query_fixtures() {
    let cases = load_query_cases(include_str!("fixtures/queries.json"));
    let result = run_query_cases(cases);
    result.assert_clean("query");
    assert!(result.passed >= 10, "fixture file lost cases: {}", result.summary());
}
