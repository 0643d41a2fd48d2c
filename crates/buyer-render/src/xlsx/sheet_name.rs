//! Worksheet tab names
//!
//! Spreadsheet applications reject a workbook outright if any tab name is
//! empty, longer than 31 characters, or contains one of `[ ] : * ? / \`.

use super::escape::is_xml_char;
use std::collections::HashSet;

/// Maximum length of a sheet name, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Substitute used when nothing legal is left of the input
pub const PLACEHOLDER_SHEET_NAME: &str = "Sheet";

/// Characters that may not appear in a sheet name
pub const FORBIDDEN_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Turn an arbitrary title into a legal sheet name.
///
/// Control characters are dropped and forbidden characters become `_`.
/// The result is cut to the first 31 characters, and an empty result falls
/// back to `"Sheet"`. Names are not deduplicated here.
pub fn sanitize_sheet_name(title: &str) -> String {
    let name: String = title
        .chars()
        .filter(|&c| !c.is_control() && is_xml_char(c))
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    if name.is_empty() {
        PLACEHOLDER_SHEET_NAME.to_string()
    } else {
        name
    }
}

/// Sanitized names that occur more than once, compared case-insensitively
/// (applications treat `Sheet` and `SHEET` as the same tab).
pub fn duplicate_sheet_names<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for title in titles {
        let name = sanitize_sheet_name(title);
        let key = name.to_lowercase();
        if !seen.insert(key.clone()) && reported.insert(key) {
            duplicates.push(name);
        }
    }
    duplicates
}
