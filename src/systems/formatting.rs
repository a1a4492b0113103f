use crate::constants::ui::LABEL_MAX_CHARS;

/// Formats a countdown as `MM:SS`. A missing countdown shows as `00:00`.
pub fn format_countdown(seconds: Option<u32>) -> String {
    let seconds = seconds.unwrap_or(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Shortens answer labels to fit on a tile.
///
/// Labels over [`LABEL_MAX_CHARS`] characters keep their first `LABEL_MAX_CHARS - 1`
/// characters followed by `...`. Counts characters, not bytes.
pub fn truncate_label(text: &str) -> String {
    if text.chars().count() <= LABEL_MAX_CHARS {
        return text.to_string();
    }
    let mut label: String = text.chars().take(LABEL_MAX_CHARS - 1).collect();
    label.push_str("...");
    label
}
