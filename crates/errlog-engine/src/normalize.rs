use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Placeholder substituted for every filename in a message.
pub const DEFAULT_PLACEHOLDER: &str = "{}";

/// One or more contiguous `/segment` groups; stops at whitespace and quotes.
static RE_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:/[^/\s"']+)+"#).unwrap());

/// All path-like substrings of `message`, left to right.
pub fn find_filenames(message: &str) -> Vec<String> {
    RE_FILENAME
        .find_iter(message)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Replace every path-like substring with `placeholder`.
pub fn normalize(message: &str, placeholder: &str) -> String {
    RE_FILENAME
        .replace_all(message, NoExpand(placeholder))
        .into_owned()
}

/// Split a message body into its normalized form and the filenames it mentions.
pub fn normalize_with_filenames(message: &str, placeholder: &str) -> (String, Vec<String>) {
    (normalize(message, placeholder), find_filenames(message))
}
