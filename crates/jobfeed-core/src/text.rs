/// Truncates `s` to at most `max_chars` characters on a char boundary,
/// appending `...` when anything was cut.
#[must_use]
pub fn excerpt(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
