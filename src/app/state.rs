// LogTriage - app/state.rs
//
// Session state owned exclusively by the controller: the selected file,
// the last reached phase of each workflow, and the most recent report.

use crate::core::model::AnalysisReport;
use crate::util::error::TriageError;
use std::path::{Path, PathBuf};

/// The file chosen in the file picker.
///
/// Replaced wholesale on every pick; read-only while a workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Name sent as the multipart filename (final path component only).
    pub name: String,
    /// File content.
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Read a file from disk.
    pub fn from_path(path: &Path) -> Result<Self, TriageError> {
        let content = std::fs::read(path).map_err(|e| TriageError::Io {
            path: path.to_path_buf(),
            operation: "read selected file",
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content))
    }
}

/// Analyze workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzePhase {
    #[default]
    Idle,
    /// Upload in flight.
    Submitting,
    /// Success status received; decoding and rendering.
    AwaitingResult,
    /// Report rendered and visible.
    Rendered,
    /// Last run failed; the error region says why.
    Error,
}

/// Download workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadPhase {
    #[default]
    Idle,
    /// Upload to the export endpoint in flight.
    Submitting,
    /// Payload received; handing it to the save sink.
    Saving,
    /// Payload saved.
    Downloaded,
    /// Last run failed; the error region says why.
    Error,
}

/// Mutable session owned by the controller.
#[derive(Debug, Default)]
pub struct Session {
    /// Currently selected file.
    pub selected_file: Option<SelectedFile>,

    /// Last reached analyze state.
    pub analyze: AnalyzePhase,

    /// Last reached download state.
    pub download: DownloadPhase,

    /// Most recently rendered report; replaced, never merged.
    pub last_report: Option<AnalysisReport>,

    /// Where the most recent download was saved.
    pub last_download: Option<PathBuf>,
}
