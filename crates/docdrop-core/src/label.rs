//! Width-aware label truncation.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended to elided labels.
pub const ELLIPSIS: char = '…';

/// Columns left for a label once `reserve` columns are set aside.
pub fn available_width(total: usize, reserve: usize) -> usize {
    total.saturating_sub(reserve)
}

/// Elide `name` on the right so it fits in `width` display columns.
///
/// Names that already fit are returned unchanged. Otherwise characters are
/// kept while they and the trailing ellipsis fit. A width of zero yields an
/// empty label.
pub fn truncate_label(name: &str, width: usize) -> String {
    if name.width() <= width {
        return name.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut label = String::with_capacity(name.len());
    for c in name.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        label.push(c);
    }
    label.push(ELLIPSIS);
    label
}

/// Number of terminal columns `text` occupies.
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Pad `text` with spaces on the right to `width` display columns.
///
/// Text that is already as wide or wider is returned unchanged.
pub fn pad_label(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}
