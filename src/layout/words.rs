//! Word splitting for line breaking.

/// Split text into wrap units without losing any whitespace.
///
/// Each word keeps the whitespace that follows it, and leading whitespace
/// stays with the first word. Text made only of whitespace is a single
/// unit. Concatenating the result gives back the input.
pub fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut seen_word = false;
    let mut in_gap = false;

    for (i, c) in text.char_indices() {
        if is_break_space(c) {
            in_gap = seen_word;
        } else {
            if in_gap {
                words.push(&text[start..i]);
                start = i;
                in_gap = false;
            }
            seen_word = true;
        }
    }

    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}

/// Whitespace a line may wrap at. No-break spaces glue their neighbours.
fn is_break_space(c: char) -> bool {
    c.is_whitespace() && !matches!(c, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}
