/// Fixture loader
///
/// Fixtures are JSON arrays mixing comment strings and test objects. A
/// field left out of an object is not checked.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum UrlCase {
    Test(Box<UrlTest>),
    #[allow(dead_code)]
    Comment(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct UrlTest {
    pub input: String,
    pub without_protocol: bool,
    pub failure: bool,
    pub href: Option<String>,
    pub protocol: Option<String>,
    pub auth: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub host: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<String>,
    pub pathname: Option<String>,
    pub normalized_pathname: Option<String>,
    pub raw_query: Option<String>,
    pub hash: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum QueryCase {
    Test(QueryTest),
    #[allow(dead_code)]
    Comment(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct QueryTest {
    pub input: String,
    pub failure: bool,
    pub pairs: Vec<(String, String)>,
    pub encoded: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub test_num: usize,
    pub input: String,
    pub field: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureResult {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<Failure>,
}

impl FixtureResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one checked field; returns whether it matched
    pub fn check(
        &mut self,
        test_num: usize,
        input: &str,
        field: &str,
        expected: Option<&str>,
        actual: &[u8],
    ) -> bool {
        let Some(expected) = expected else {
            return true;
        };
        let actual = String::from_utf8_lossy(actual);
        if actual == expected {
            return true;
        }
        self.failures.push(Failure {
            test_num,
            input: input.to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.into_owned(),
        });
        false
    }

    pub fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn summary(&self) -> String {
        format!("Passed: {}, Failed: {}", self.passed, self.failed)
    }

    /// Print the first failures and panic if there were any
    pub fn assert_clean(&self, suite: &str) {
        println!("\n{suite}: {}", self.summary());
        for (i, failure) in self.failures.iter().take(20).enumerate() {
            println!("\n{}. Test #{}: {}", i + 1, failure.test_num, failure.field);
            println!("   Input: {:?}", failure.input);
            println!("   Expected: {:?}", failure.expected);
            println!("   Actual: {:?}", failure.actual);
        }
        assert_eq!(
            self.failed, 0,
            "{suite} fixtures failed; run with --nocapture for details"
        );
    }
}

pub fn load_url_cases(data: &str) -> Vec<UrlCase> {
    serde_json::from_str(data).expect("Failed to parse url fixtures")
}

pub fn load_query_cases(data: &str) -> Vec<QueryCase> {
    serde_json::from_str(data).expect("Failed to parse query fixtures")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_mixed_cases() {
        let cases = load_url_cases(r#"["comment", {"input": "/a", "pathname": "/a"}]"#);
        assert_eq!(cases.len(), 2);
        assert!(matches!(cases[0], UrlCase::Comment(_)));
        match &cases[1] {
            UrlCase::Test(test) => {
                assert_eq!(test.input, "/a");
                assert!(!test.failure);
                assert_eq!(test.host, None);
            }
            UrlCase::Comment(_) => panic!("expected a test"),
        }
    }

    #[test]
    fn test_check_skips_unset_fields() {
        let mut result = FixtureResult::new();
        assert!(result.check(1, "x", "host", None, b"anything"));
        assert!(!result.check(1, "x", "host", Some("a"), b"b"));
        assert_eq!(result.failures.len(), 1);
    }
}
