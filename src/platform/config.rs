// LogTriage - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogTriage configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logtriage/ or %APPDATA%\LogTriage\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[server]` section.
    pub server: ServerSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[download]` section.
    pub download: DownloadSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[server]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Analyzer base URL, e.g. "http://127.0.0.1:8000".
    pub base_url: Option<String>,
    /// Connection setup timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// How long "100%" stays visible before the progress bar hides (ms).
    pub progress_hide_delay_ms: Option<u64>,
}

/// `[download]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DownloadSection {
    /// Directory downloaded CSVs are saved into.
    pub output_dir: Option<String>,
    /// Name used when the server suggests none.
    pub default_filename: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Analyzer base URL.
    pub server_url: String,
    /// Connection setup timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Delay before hiding a completed progress bar (ms).
    pub progress_hide_delay_ms: u64,
    /// Download directory; `None` means the current directory.
    pub output_dir: Option<PathBuf>,
    /// Fallback download filename.
    pub default_filename: String,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: constants::DEFAULT_SERVER_URL.to_string(),
            connect_timeout_secs: constants::DEFAULT_CONNECT_TIMEOUT_SECS,
            progress_hide_delay_ms: constants::DEFAULT_PROGRESS_HIDE_DELAY_MS,
            output_dir: None,
            default_filename: constants::DEFAULT_DOWNLOAD_FILENAME.to_string(),
            log_level: None,
        }
    }
}

/// Load and validate config.toml at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run); an unreadable
/// or unparseable file yields defaults plus a warning so the user is told.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Server: base_url --
    if let Some(url) = raw.server.base_url {
        let trimmed = url.trim();
        if is_http_url(trimmed) {
            config.server_url = trimmed.to_string();
        } else {
            warnings.push(format!(
                "[server] base_url = \"{url}\" must start with http:// or https://. Using default ({}).",
                constants::DEFAULT_SERVER_URL,
            ));
        }
    }

    // -- Server: connect_timeout_secs --
    if let Some(secs) = raw.server.connect_timeout_secs {
        if (constants::MIN_CONNECT_TIMEOUT_SECS..=constants::MAX_CONNECT_TIMEOUT_SECS).contains(&secs) {
            config.connect_timeout_secs = secs;
        } else {
            out_of_range(
                warnings,
                "server.connect_timeout_secs",
                secs,
                format!(
                    "{}-{}",
                    constants::MIN_CONNECT_TIMEOUT_SECS,
                    constants::MAX_CONNECT_TIMEOUT_SECS
                ),
                constants::DEFAULT_CONNECT_TIMEOUT_SECS,
            );
        }
    }

    // -- UI: progress_hide_delay_ms --
    if let Some(ms) = raw.ui.progress_hide_delay_ms {
        if ms <= constants::MAX_PROGRESS_HIDE_DELAY_MS {
            config.progress_hide_delay_ms = ms;
        } else {
            out_of_range(
                warnings,
                "ui.progress_hide_delay_ms",
                ms,
                format!("0-{}", constants::MAX_PROGRESS_HIDE_DELAY_MS),
                constants::DEFAULT_PROGRESS_HIDE_DELAY_MS,
            );
        }
    }

    // -- Download: output_dir --
    if let Some(dir) = raw.download.output_dir {
        if !dir.trim().is_empty() {
            config.output_dir = Some(PathBuf::from(dir.trim()));
        }
    }

    // -- Download: default_filename --
    if let Some(name) = raw.download.default_filename {
        if is_plain_file_name(&name) {
            config.default_filename = name;
        } else {
            warnings.push(format!(
                "[download] default_filename = \"{name}\" must be a non-empty name without path separators. \
                 Using default ({}).",
                constants::DEFAULT_DOWNLOAD_FILENAME,
            ));
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    config
}

fn out_of_range(warnings: &mut Vec<String>, field: &str, value: u64, expected: String, default: u64) {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    };
    warnings.push(format!("{err}. Using default ({default})."));
}

/// True for an absolute http(s) URL with a non-empty host part.
pub fn is_http_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

fn is_plain_file_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
