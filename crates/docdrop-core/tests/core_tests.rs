use docdrop_core::{
    ChangeEvent, ChangeKind, CollectionConfig, CollectionError, EntryKind, FileEntry, PathStat,
    available_width, display_name, truncate_label,
};
use std::path::{Path, PathBuf};

#[test]
fn test_entry_kind_discrimination() {
    assert!(EntryKind::File.is_file());
    assert!(!EntryKind::File.is_dir());
    assert!(EntryKind::Directory.is_dir());
    assert!(!EntryKind::Directory.is_file());
}

#[test]
fn test_path_stat_constructors() {
    let file = PathStat::file(5000);
    assert_eq!(file.kind, EntryKind::File);
    assert_eq!(file.size, 5000);

    let dir = PathStat::directory();
    assert_eq!(dir.kind, EntryKind::Directory);
    assert_eq!(dir.size, 0);
}

#[test]
fn test_directory_entry_properties() {
    let entry = FileEntry::new_directory("/home/user/scans/", 12000);

    assert!(entry.is_dir());
    assert_eq!(entry.display_name.as_str(), "scans");
    assert_eq!(entry.size_bytes, 12000);
    assert_eq!(entry.path, PathBuf::from("/home/user/scans"));
}

#[test]
fn test_entry_label_uses_display_name() {
    let entry = FileEntry::new_file("/tmp/an-extremely-long-document-name.pdf", 1);
    assert_eq!(entry.label(1000), "an-extremely-long-document-name.pdf");
    assert_eq!(entry.label(5), "an-e…");
}

#[test]
fn test_entries_serialize() {
    let entry = FileEntry::new_file("/tmp/a.pdf", 5000);
    let json = serde_json::to_string(&entry).unwrap();
    assert!(json.contains("\"display_name\":\"a.pdf\""));

    let back: FileEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn test_change_event_serializes() {
    let event = ChangeEvent::new(7, ChangeKind::Dropped { added: 2 });
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("Dropped"));
    assert!(event.removed_paths().is_empty());
}

#[test]
fn test_config_deserialize_fills_defaults() {
    let config: CollectionConfig = serde_json::from_str("{\"threads\": 2}").unwrap();
    assert_eq!(config.threads, 2);
    assert!(config.dedupe_hardlinks);
    assert!(config.require_readable);
    assert_eq!(config.label_reserve, 200);
    assert_eq!(config.event_capacity, 100);
}

#[test]
fn test_label_row_width() {
    // A 260 column row leaves 60 columns for the name.
    let width = available_width(260, CollectionConfig::default().label_reserve);
    assert_eq!(width, 60);
    assert_eq!(truncate_label("short.pdf", width), "short.pdf");
}

#[test]
fn test_display_name_of_root_path() {
    let name = display_name(Path::new("/"));
    assert_eq!(name.as_str(), "/");
}

#[test]
fn test_error_display() {
    let err = CollectionError::io(
        "/missing.pdf",
        std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    );
    let msg = err.to_string();
    assert!(msg.starts_with("Cannot read /missing.pdf"));
}
