//! Formatting utilities used for CLI and topbar outputs.

use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells (CJK counts as two).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Text progress bar, e.g. `[#######.....]`.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let p = progress.clamp(0.0, 1.0);
    let filled = ((p * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_clamped() {
        assert_eq!(progress_bar(0.5, 4), "[##..]");
        assert_eq!(progress_bar(2.0, 3), "[###]");
        assert_eq!(progress_bar(-1.0, 2), "[..]");
    }

    #[test]
    fn padding_counts_wide_chars() {
        assert_eq!(pad_right("周一", 6), "周一  ");
        assert_eq!(pad_right("ab", 1), "ab");
    }
}
