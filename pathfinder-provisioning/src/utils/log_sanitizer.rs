//! Keeps raw response documents from flooding the logs.

use std::borrow::Cow;

/// Maximum number of characters of a document written to a log line.
const TRUNCATE_LIMIT: usize = 512;

/// Shorten `s` to at most `TRUNCATE_LIMIT` characters for logging.
///
/// Short input is borrowed unchanged. Longer input is cut on a character
/// boundary and suffixed with the original length in bytes.
pub fn truncate_for_log(s: &str) -> Cow<'_, str> {
    match s.char_indices().nth(TRUNCATE_LIMIT) {
        None => Cow::Borrowed(s),
        Some((cut, _)) => Cow::Owned(format!(
            "{}... [truncated, total {} bytes]",
            &s[..cut],
            s.len()
        )),
    }
}
