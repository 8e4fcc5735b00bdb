//! Log sanitization utilities
//!
//! TXT/DKIM content and raw provider bodies can be long; debug and error logs only
//! carry a bounded prefix of them.

/// Maximum number of bytes of a value included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for logging.
///
/// Strings within [`TRUNCATE_LIMIT`] bytes are returned unchanged. Longer strings are cut
/// at the last character boundary inside the limit and suffixed with the full length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}
