//! Drag-and-drop session state.
//!
//! A [`DragSession`] follows one drag gesture over the drop target. It has
//! two states: `Idle`, and `Hovering` while an accepted drag is over the
//! target. The session is advisory state for the presentation layer; the
//! only thing it does to a collection is forward dropped paths to `add`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use docdrop_core::CollectionError;
use docdrop_scan::Filesystem;

use crate::collection::{AddOutcome, FileCollection};

const FILE_SCHEME: &str = "file://";

/// Data carried by a drag event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPayload {
    /// Local files or directories.
    Files(Vec<PathBuf>),
    /// Plain text.
    Text(String),
    /// Anything else the platform offered.
    Other,
}

impl DragPayload {
    /// Build a file payload.
    pub fn files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::Files(paths.into_iter().map(Into::into).collect())
    }

    /// Parse a `text/uri-list` body.
    ///
    /// Comment lines and URIs that are not local `file://` URIs are skipped.
    /// Percent-escapes are decoded. Yields [`DragPayload::Other`] when no
    /// local file remains.
    pub fn from_uri_list(text: &str) -> Self {
        let paths: Vec<PathBuf> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(file_uri_to_path)
            .collect();

        if paths.is_empty() {
            Self::Other
        } else {
            Self::Files(paths)
        }
    }

    /// Check if this payload carries at least one local path.
    pub fn has_files(&self) -> bool {
        matches!(self, Self::Files(paths) if !paths.is_empty())
    }

    /// Number of items being dragged, 0 for non-file payloads.
    pub fn candidate_count(&self) -> usize {
        match self {
            Self::Files(paths) => paths.len(),
            _ => 0,
        }
    }
}

/// Convert one `file://` URI to a local path.
fn file_uri_to_path(uri: &str) -> Option<PathBuf> {
    let rest = uri.strip_prefix(FILE_SCHEME)?;
    // Only an empty host or "localhost" refers to this machine.
    let rest = if rest.starts_with('/') {
        rest
    } else {
        rest.strip_prefix("localhost").filter(|r| r.starts_with('/'))?
    };
    let bytes = urlencoding::decode_binary(rest.as_bytes());
    bytes_to_path(bytes.into_owned())
}

/// File names are raw bytes on Unix, so any decoded sequence is a valid path.
#[cfg(unix)]
fn bytes_to_path(bytes: Vec<u8>) -> Option<PathBuf> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    Some(PathBuf::from(OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: Vec<u8>) -> Option<PathBuf> {
    let decoded = String::from_utf8(bytes).ok()?;
    // "/C:/dir" names a drive path.
    let path = match decoded.as_bytes() {
        [b'/', _, b':', ..] => &decoded[1..],
        _ => decoded.as_str(),
    };
    Some(PathBuf::from(path))
}

/// Whether the drop target takes the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragResponse {
    /// Accept as a copy; the cursor shows "copy".
    Accept,
    /// Ignore; the cursor shows "not allowed".
    Reject,
}

impl DragResponse {
    /// Check if the event was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, DragResponse::Accept)
    }
}

/// State of a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag over the target.
    #[default]
    Idle,
    /// An accepted drag of `count` items is over the target.
    Hovering { count: usize },
}

/// What a drop did to the collection.
#[derive(Debug, Default)]
pub struct DropOutcome {
    /// Whether the drop was a file payload.
    pub accepted: bool,
    /// New entries inserted.
    pub added: usize,
    /// Paths that were already tracked.
    pub duplicates: usize,
    /// Paths that could not be read.
    pub errors: Vec<CollectionError>,
}

impl DropOutcome {
    fn rejected() -> Self {
        Self::default()
    }
}

/// Tracks an in-progress drag over the drop target.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Number of items hovering, 0 when idle.
    pub fn hover_count(&self) -> usize {
        match self.state {
            DragState::Idle => 0,
            DragState::Hovering { count } => count,
        }
    }

    /// Check if an accepted drag is over the target.
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Hovering { .. })
    }

    /// Live counter text shown while hovering, e.g. `+3`.
    pub fn counter_label(&self) -> Option<String> {
        match self.state {
            DragState::Idle => None,
            DragState::Hovering { count } => Some(format!("+{count}")),
        }
    }

    /// A drag entered the drop target.
    ///
    /// Only payloads carrying local files are accepted; anything else leaves
    /// the session unchanged.
    pub fn on_drag_enter(&mut self, payload: &DragPayload) -> DragResponse {
        if !payload.has_files() {
            debug!("rejecting drag without files");
            return DragResponse::Reject;
        }
        let count = payload.candidate_count();
        self.state = DragState::Hovering { count };
        debug!(count, "drag entered");
        DragResponse::Accept
    }

    /// A drag moved within the drop target. Never changes state.
    pub fn on_drag_move(&self, payload: &DragPayload) -> DragResponse {
        if payload.has_files() {
            DragResponse::Accept
        } else {
            DragResponse::Reject
        }
    }

    /// The drag left the drop target. Idempotent.
    pub fn on_drag_leave(&mut self) {
        self.state = DragState::Idle;
    }

    /// Files were dropped on the target.
    ///
    /// Each path is added in order; an unreadable path is reported in the
    /// outcome and does not stop the rest. A non-file payload is rejected and
    /// leaves the session unchanged.
    pub fn on_drop<F: Filesystem>(
        &mut self,
        payload: &DragPayload,
        collection: &mut FileCollection<F>,
    ) -> DropOutcome {
        let paths = match payload {
            DragPayload::Files(paths) if !paths.is_empty() => paths,
            _ => {
                debug!("rejecting drop without files");
                return DropOutcome::rejected();
            }
        };

        let mut outcome = DropOutcome {
            accepted: true,
            ..DropOutcome::default()
        };
        for path in paths {
            match collection.add(path) {
                Ok(AddOutcome::Added(_)) => outcome.added += 1,
                Ok(AddOutcome::Duplicate) => outcome.duplicates += 1,
                Err(err) => {
                    warn!("dropped path not added: {err}");
                    outcome.errors.push(err);
                }
            }
        }

        collection.notify_dropped(outcome.added);
        self.state = DragState::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_list_parsing() {
        let payload = DragPayload::from_uri_list(
            "# dragged from a file manager\r\n\
             file:///home/user/My%20Report.pdf\r\n\
             file://localhost/tmp/scan.png\r\n\
             https://example.com/page.html\r\n\
             file://otherhost/share/x.pdf\r\n",
        );

        assert_eq!(
            payload,
            DragPayload::files(["/home/user/My Report.pdf", "/tmp/scan.png"])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_uri_list_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let payload = DragPayload::from_uri_list("file:///tmp/r%FFport.pdf\r\n");
        let expected = PathBuf::from(OsStr::from_bytes(b"/tmp/r\xffport.pdf"));
        assert_eq!(payload, DragPayload::Files(vec![expected]));
        assert!(payload.has_files());
    }

    #[test]
    fn test_uri_list_without_files() {
        assert_eq!(
            DragPayload::from_uri_list("https://example.com\n"),
            DragPayload::Other
        );
        assert_eq!(DragPayload::from_uri_list(""), DragPayload::Other);
    }

    #[test]
    fn test_candidate_count() {
        assert_eq!(DragPayload::files(["/a", "/b", "/c"]).candidate_count(), 3);
        assert_eq!(DragPayload::Text("hi".into()).candidate_count(), 0);
        assert!(!DragPayload::Files(Vec::new()).has_files());
    }

    #[test]
    fn test_enter_and_leave() {
        let mut session = DragSession::new();
        let response = session.on_drag_enter(&DragPayload::files(["/a", "/b", "/c"]));

        assert!(response.is_accepted());
        assert_eq!(session.state(), DragState::Hovering { count: 3 });
        assert_eq!(session.counter_label().as_deref(), Some("+3"));

        session.on_drag_leave();
        assert_eq!(session.state(), DragState::Idle);
        assert_eq!(session.hover_count(), 0);

        session.on_drag_leave();
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn test_text_payload_rejected() {
        let mut session = DragSession::new();
        let payload = DragPayload::Text("hello".into());

        assert_eq!(session.on_drag_enter(&payload), DragResponse::Reject);
        assert_eq!(session.on_drag_move(&payload), DragResponse::Reject);
        assert!(!session.is_active());
        assert!(session.counter_label().is_none());
    }

    #[test]
    fn test_rejected_enter_keeps_hovering_state() {
        let mut session = DragSession::new();
        session.on_drag_enter(&DragPayload::files(["/a"]));
        session.on_drag_enter(&DragPayload::Other);
        assert_eq!(session.hover_count(), 1);
    }
}
