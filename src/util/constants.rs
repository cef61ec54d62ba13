// LogTriage - util/constants.rs
//
// Single source of truth for all named constants, limits, captions and
// defaults. Nothing else in the crate hard-codes a user-visible string.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogTriage";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogTriage";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Analyzer service
// =============================================================================

/// Base URL of the analyzer service when neither config nor CLI set one.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Path of the analysis endpoint (multipart upload, JSON report back).
pub const ANALYZE_ENDPOINT: &str = "/api/analyze";

/// Path of the CSV export endpoint (multipart upload, binary body back).
pub const EXPORT_ENDPOINT: &str = "/api/download_csv";

/// Path of the liveness endpoint.
pub const HEALTH_ENDPOINT: &str = "/api/health";

/// Name of the single multipart form field carrying the uploaded file.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Default connect timeout. Only establishing the connection is bounded;
/// once a request is sent it runs until the analyzer answers or fails.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Minimum user-configurable connect timeout.
pub const MIN_CONNECT_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable connect timeout.
pub const MAX_CONNECT_TIMEOUT_SECS: u64 = 300;

/// The liveness endpoint reports this status value when the model is loaded.
pub const HEALTH_OK_STATUS: &str = "ok";

// =============================================================================
// Report rendering limits
// =============================================================================

/// Maximum attack-type rows shown in the type breakdown.
pub const TYPE_COUNTS_LIMIT: usize = 50;

/// Maximum rows shown in each of the "top" breakdowns (source IP,
/// destination IP, URL path).
pub const TOP_N_LIMIT: usize = 10;

// =============================================================================
// Progress
// =============================================================================

/// Progress shown while the file is uploaded and analysed.
pub const ANALYZE_UPLOAD_PERCENT: u8 = 15;

/// Progress shown once the analyzer answered and the report is built.
pub const ANALYZE_RENDER_PERCENT: u8 = 80;

/// Progress shown while the CSV export is generated.
pub const DOWNLOAD_START_PERCENT: u8 = 20;

/// Progress shown on completion of either workflow.
pub const COMPLETE_PERCENT: u8 = 100;

/// How long the "100%" state stays visible before the indicator is hidden (ms).
pub const DEFAULT_PROGRESS_HIDE_DELAY_MS: u64 = 400;

/// Upper bound on the configurable hide delay (ms).
pub const MAX_PROGRESS_HIDE_DELAY_MS: u64 = 10_000;

// =============================================================================
// Captions
// =============================================================================

pub const CAPTION_UPLOADING: &str = "Uploading and analyzing...";
pub const CAPTION_GENERATING_REPORT: &str = "Generating report...";
pub const CAPTION_DONE: &str = "Done";
pub const CAPTION_GENERATING_CSV: &str = "Generating downloadable CSV...";
pub const CAPTION_DOWNLOADED: &str = "Downloaded";

/// Prefix of the risk-grade caption; the grade label follows.
pub const RISK_GRADE_PREFIX: &str = "Overall risk grade: ";

/// Status caption before the first liveness answer arrives.
pub const STATUS_CHECKING: &str = "Checking service...";
pub const STATUS_ONLINE: &str = "Online \u{00b7} model loaded";
pub const STATUS_ABNORMAL: &str = "Abnormal";
pub const STATUS_OFFLINE: &str = "Offline or not started";

// =============================================================================
// Error messages
// =============================================================================

pub const MSG_SELECT_FILE_ANALYZE: &str = "Please select a CSV/XLSX/XLS file first.";
pub const MSG_SELECT_FILE_DOWNLOAD: &str =
    "Please select a file before downloading the prediction results.";
pub const PREFIX_ANALYZE_FAILED: &str = "Backend returned an error: ";
pub const PREFIX_DOWNLOAD_FAILED: &str = "Download failed: ";

// =============================================================================
// Placeholders and labels
// =============================================================================

/// Placeholder row for an empty key-value mapping.
pub const PLACEHOLDER_NO_DATA: &str = "(no data)";

/// Header of the high-risk table when there are no rows.
pub const TABLE_HINT_HEADER: &str = "Hint";

/// Placeholder body cell of the high-risk table when there are no rows.
pub const PLACEHOLDER_NO_SAMPLES: &str = "(no high-risk samples)";

pub const METRIC_TOTAL: &str = "Total alerts";
pub const METRIC_HIGH: &str = "High risk";
pub const METRIC_MID: &str = "Medium risk";
pub const METRIC_LOW: &str = "Low risk / suspicious";
pub const METRIC_NORMAL: &str = "Normal access";

// =============================================================================
// Download
// =============================================================================

/// Filename used when the export response suggests none.
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "pred_result.csv";

/// Suffix of the temporary file a download is staged in before the rename.
pub const PARTIAL_DOWNLOAD_SUFFIX: &str = ".part";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
