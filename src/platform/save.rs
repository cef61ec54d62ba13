// LogTriage - platform/save.rs
//
// Save-trigger abstraction for downloaded payloads.
//
// `DirectorySink` stages the payload in a temporary `.part` file next to
// the target and renames it into place, so a failed or interrupted save
// never leaves a truncated file under the final name. The staging file is
// removed on every failure path.

use crate::util::constants::PARTIAL_DOWNLOAD_SUFFIX;
use crate::util::error::SaveError;
use std::path::PathBuf;

/// Stores a downloaded payload under a suggested filename.
pub trait SaveSink {
    /// Save `content` as `filename`; returns where it ended up.
    fn save(&mut self, filename: &str, content: &[u8]) -> Result<PathBuf, SaveError>;
}

/// Saves downloads into a fixed output directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveSink for DirectorySink {
    fn save(&mut self, filename: &str, content: &[u8]) -> Result<PathBuf, SaveError> {
        let name = safe_file_name(filename).ok_or_else(|| SaveError::InvalidFilename {
            filename: filename.to_string(),
        })?;

        std::fs::create_dir_all(&self.dir).map_err(|e| SaveError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let target = self.dir.join(name);
        let staging = self.dir.join(format!("{name}{PARTIAL_DOWNLOAD_SUFFIX}"));

        let result = std::fs::write(&staging, content)
            .and_then(|()| std::fs::rename(&staging, &target));

        if let Err(e) = result {
            let _ = std::fs::remove_file(&staging);
            return Err(SaveError::Io {
                path: target,
                source: e,
            });
        }

        tracing::info!(path = %target.display(), bytes = content.len(), "Download saved");
        Ok(target)
    }
}

/// Reduce a server-suggested name to its final path component so the
/// payload can never land outside the output directory.
fn safe_file_name(suggested: &str) -> Option<&str> {
    let last = suggested
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .unwrap_or_default();
    match last {
        "" | "." | ".." => None,
        name => Some(name),
    }
}
