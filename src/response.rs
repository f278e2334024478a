//! Parsing of the raw gist-creation response.

use once_cell::sync::Lazy;
use regex::Regex;

/// Status line the gist API answers with on successful creation.
pub const SUCCESS_STATUS_LINE: &str = "201 Created";

static GIST_URL_MATCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""html_url":"(https://gist\.github\.com/\w+)""#).expect("valid gist url pattern")
});

/// Extracts the created gist's URL from the response body, or `None` when
/// the `html_url` key or a well-formed URL value is absent.
pub fn parse_gist_url(body: &str) -> Option<String> {
    GIST_URL_MATCH
        .captures(body)
        .map(|caps| caps[1].to_string())
}
