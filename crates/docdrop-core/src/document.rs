//! Document types offered by the file dialog.

use std::path::Path;

/// Extensions the conversion step accepts, without the leading dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "pdf", "docx", "doc", "docm", "xlsx", "xls", "pptx", "ppt", "odt", "odg", "odp", "ods", "jpg",
    "jpeg", "gif", "png", "tif", "tiff",
];

/// Check if `path` has one of the [`SUPPORTED_EXTENSIONS`], ignoring case.
pub fn is_supported_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Name filter for a native file dialog, e.g. `Documents (*.pdf *.docx ...)`.
pub fn file_dialog_filter() -> String {
    let patterns: Vec<String> = SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!("*.{ext}"))
        .collect();
    format!("Documents ({})", patterns.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_document(Path::new("/in/report.pdf")));
        assert!(is_supported_document(Path::new("scan.TIFF")));
        assert!(!is_supported_document(Path::new("notes.txt")));
        assert!(!is_supported_document(Path::new("/in/folder")));
    }

    #[test]
    fn test_file_dialog_filter() {
        let filter = file_dialog_filter();
        assert!(filter.starts_with("Documents (*.pdf *.docx"));
        assert!(filter.ends_with("*.tiff)"));
    }
}
