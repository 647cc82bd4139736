//! Parser for `.env` style `KEY=VALUE` files

use std::collections::HashMap;

/// Parse the contents of an env file into a key/value map.
///
/// Blank lines, `#` comments and lines without `=` are skipped. Keys and
/// values are trimmed and surrounding quotes are removed from values.
/// A later assignment of the same key wins.
pub fn parse(contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        vars.insert(key.trim().to_string(), strip_quotes(value.trim()).to_string());
    }

    vars
}

/// Remove any run of double quotes, then single quotes, from both ends.
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"').trim_matches('\'')
}
