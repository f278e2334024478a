//! Gist creation payload types and the JSON string-escaping wire contract.
//!
//! The request body is built structurally and serialized with serde_json, so
//! escaping is never hand-assembled into the payload. `escape_json_fragment`
//! states the escaping contract for log content embedded in a JSON string
//! literal and is held equivalent to a standard decoder by the test suite.

use std::collections::BTreeMap;

use serde::Serialize;

/// Fixed description attached to every published gist.
pub const GIST_DESCRIPTION: &str = "Application log published with gist-publisher";

/// Fixed filename the log text is published under.
pub const OUTPUT_LOG_FILENAME: &str = "output_log.txt";

#[derive(Debug, Clone, Serialize)]
pub struct GistFile {
    pub content: String,
}

/// Body of the gist-creation POST:
/// `{description, public: true, files: {<filename>: {content}}}`.
#[derive(Debug, Clone, Serialize)]
pub struct GistPayload {
    pub description: String,
    pub public: bool,
    pub files: BTreeMap<String, GistFile>,
}

impl GistPayload {
    /// Wraps flattened bundle text as a public gist with the fixed
    /// description and filename.
    pub fn for_log(content: String) -> Self {
        let mut files = BTreeMap::new();
        files.insert(OUTPUT_LOG_FILENAME.to_string(), GistFile { content });
        GistPayload {
            description: GIST_DESCRIPTION.to_string(),
            public: true,
            files,
        }
    }
}

/// Escapes a string for embedding inside a JSON string literal: backslash,
/// double-quote and forward-slash are backslash-escaped; backspace, tab,
/// newline, form-feed and carriage-return map to their two-character escapes;
/// any other control character below 0x20 becomes a `\u00XX` escape. All
/// other characters pass through unchanged. Empty input yields empty output.
pub fn escape_json_fragment(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '\\' | '"' | '/' => {
                out.push('\\');
                out.push(c);
            }
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}
