use unicode_normalization::UnicodeNormalization;

/// Canonical form for question text and options: BOMs dropped, NFC, every run
/// of Unicode whitespace (tabs and newlines included) replaced by one space,
/// ends trimmed.
pub fn normalize_text(text: &str) -> String {
    let no_bom = text.replace('\u{FEFF}', "");
    let nfc: String = no_bom.nfc().collect();
    let mut result = String::with_capacity(nfc.len());
    let mut prev_space = false;
    for c in nfc.chars() {
        if c.is_whitespace() {
            if !prev_space {
                result.push(' ');
                prev_space = true;
            }
        } else {
            result.push(c);
            prev_space = false;
        }
    }
    result.trim().to_string()
}

/// Truncate to at most `max_chars` characters, appending `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let byte_idx = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    format!("{}...", text[..byte_idx].trim_end())
}
