//! Parse raw HTTP response header lines into an associative map.

use std::collections::HashMap;

use super::{CONTENT_LENGTH, CONTENT_TYPE};

/// Turns collected header lines into a name → value map.
///
/// Status lines (no `:`) are skipped. When a redirect chain repeats a
/// header, the last value wins, so the map describes the final response.
/// The two keys verification cares about are stored under canonical
/// casing regardless of how the server spelled them.
pub(crate) fn parse_header_lines(lines: &[String]) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        let canonical = if name.eq_ignore_ascii_case("content-length") {
            CONTENT_LENGTH
        } else if name.eq_ignore_ascii_case("content-type") {
            CONTENT_TYPE
        } else {
            name
        };
        headers.insert(canonical.to_string(), value.to_string());
    }
    headers
}
