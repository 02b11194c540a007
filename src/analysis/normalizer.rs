//! Input cleanup for the summarizer's bounded context window.

/// Hard cap on normalized text, in characters.
pub const MAX_INPUT_CHARS: usize = 3000;
/// Appended when the cap clips the text.
pub const TRUNCATION_MARKER: &str = "...";
/// Lines whose trimmed length is at or below this are dropped as noise.
pub const NOISE_LINE_MAX_CHARS: usize = 10;

/// Normalize raw text for summarization.
///
/// Drops short noisy lines (headers, bullets, page numbers), collapses every
/// whitespace run to a single space, trims, then caps the result at
/// [`MAX_INPUT_CHARS`] characters followed by [`TRUNCATION_MARKER`].
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let kept: Vec<&str> = text
        .split(is_line_break)
        .filter(|line| line.trim().chars().count() > NOISE_LINE_MAX_CHARS)
        .collect();

    let collapsed = collapse_whitespace(&kept.join(" "));
    truncate_with_marker(collapsed, MAX_INPUT_CHARS)
}

/// Every line boundary recognised when splitting, not just `\n` and `\r\n`.
/// A `\r\n` pair yields an empty segment, which the noise filter drops.
const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Collapse whitespace runs into one space and trim both ends.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn truncate_with_marker(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text,
        Some((cut, _)) => {
            let mut truncated = text[..cut].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}
