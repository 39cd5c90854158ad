//! String formatting utilities.
//!
//! Request identifiers are long hex strings; this keeps them readable in log
//! output.

/// Truncates an identifier for display purposes.
///
/// Shows only the first 10 characters (enough for `0x` plus 8 hex digits)
/// followed by ".." for longer strings.
pub fn truncate_id(id: &str) -> String {
	match id.char_indices().nth(10) {
		Some((cut, _)) => format!("{}..", &id[..cut]),
		None => id.to_string(),
	}
}
