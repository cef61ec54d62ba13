// LogTriage - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors keep their causal chain
// for diagnostic logging.
//
// The workflow taxonomy mirrors what the user can observe:
//   Validation  -- no file chosen, caught before any network activity
//   Server      -- non-success HTTP outcome, body text shown verbatim
//   Transport   -- the request never produced a response
//   Malformed   -- the body could not be interpreted as expected
//   Save        -- the downloaded payload could not be stored

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogTriage operations.
#[derive(Debug)]
pub enum TriageError {
    /// A user-triggered workflow failed.
    Workflow(WorkflowError),

    /// Local report export failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for TriageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workflow(e) => write!(f, "{e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for TriageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Workflow(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow errors
// ---------------------------------------------------------------------------

/// Failure of the analyze or download workflow.
///
/// `Display` yields exactly the text placed in the error region.
#[derive(Debug)]
pub enum WorkflowError {
    /// No file was selected; nothing was sent.
    Validation { message: &'static str },

    /// The service answered with a non-success status.
    Server {
        prefix: &'static str,
        status: u16,
        body: String,
    },

    /// The request did not complete.
    Transport(TransportError),

    /// The success body could not be decoded as a report.
    Malformed { source: serde_json::Error },

    /// The downloaded payload could not be saved.
    Save(SaveError),
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message } => f.write_str(message),
            Self::Server { prefix, body, .. } => write!(f, "{prefix}{body}"),
            Self::Transport(e) => write!(f, "Network error: {e}"),
            Self::Malformed { source } => write!(f, "Malformed response: {source}"),
            Self::Save(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for WorkflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Malformed { source } => Some(source),
            Self::Save(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for WorkflowError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<SaveError> for WorkflowError {
    fn from(e: SaveError) -> Self {
        Self::Save(e)
    }
}

impl From<WorkflowError> for TriageError {
    fn from(e: WorkflowError) -> Self {
        Self::Workflow(e)
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Errors raised before an HTTP response was obtained.
#[derive(Debug)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    Client { source: reqwest::Error },

    /// Sending the request or reading the body failed.
    Request {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client { source } => write!(f, "failed to create HTTP client: {source}"),
            Self::Request { url, source } => write!(f, "request to '{url}' failed: {source}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client { source } => Some(source),
            Self::Request { source, .. } => Some(source.as_ref()),
        }
    }
}

// ---------------------------------------------------------------------------
// Save errors
// ---------------------------------------------------------------------------

/// Errors related to storing a downloaded payload.
#[derive(Debug)]
pub enum SaveError {
    /// The suggested filename has no usable final component.
    InvalidFilename { filename: String },

    /// Writing, renaming or creating the target failed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilename { filename } => {
                write!(f, "Could not save '{filename}': not a valid file name")
            }
            Self::Io { path, source } => {
                write!(f, "Could not save '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to local report export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for TriageError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Problems found while loading config.toml.
///
/// Never fatal: each one becomes a startup warning and the affected value
/// falls back to its default.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for LogTriage results.
pub type Result<T> = std::result::Result<T, TriageError>;
