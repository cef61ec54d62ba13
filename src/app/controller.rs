// LogTriage - app/controller.rs
//
// The viewer controller: owns the view model and session, and exposes one
// method per user action. Network and save collaborators are injected per
// call so tests can pass fakes.
//
// Workflow exit discipline:
//   - every failure is caught here; nothing propagates past a workflow method
//   - progress is hidden on every failure path
//   - the triggering control is held by a `ControlLease` for the whole run
//     and is re-enabled when the lease drops, whatever the outcome
//   - the lease is released before a finished progress bar is held on
//     screen, so the control is usable during the hold

use crate::app::health::{HealthMonitor, HealthStatus};
use crate::app::lease::ControlLease;
use crate::app::state::{AnalyzePhase, DownloadPhase, SelectedFile, Session};
use crate::app::view::{ControlId, ViewModel};
use crate::core::disposition;
use crate::core::model::AnalysisReport;
use crate::platform::config::AppConfig;
use crate::platform::http::Transport;
use crate::platform::save::SaveSink;
use crate::util::constants;
use crate::util::error::WorkflowError;
use std::path::PathBuf;
use std::time::Duration;

/// Tunables the controller takes from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// How long a completed (100%) progress bar stays visible.
    pub progress_hide_delay: Duration,
    /// Download filename used when the server suggests none.
    pub default_filename: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            progress_hide_delay: Duration::from_millis(constants::DEFAULT_PROGRESS_HIDE_DELAY_MS),
            default_filename: constants::DEFAULT_DOWNLOAD_FILENAME.to_string(),
        }
    }
}

impl From<&AppConfig> for ControllerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            progress_hide_delay: Duration::from_millis(config.progress_hide_delay_ms),
            default_filename: config.default_filename.clone(),
        }
    }
}

/// Viewer controller. Constructed once at startup.
#[derive(Debug)]
pub struct Controller {
    pub view: ViewModel,
    pub session: Session,
    settings: ControllerSettings,
    /// Keeps a finished (100%) progress bar on screen.
    hold: fn(&ViewModel, Duration),
}

impl Controller {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            view: ViewModel::new(),
            session: Session::default(),
            settings,
            hold: hold_progress,
        }
    }

    /// Replace the selected file.
    pub fn select_file(&mut self, file: SelectedFile) {
        tracing::debug!(file = %file.name, bytes = file.content.len(), "File selected");
        self.session.selected_file = Some(file);
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Forget the selected file, hide the report, lock download, clear errors.
    ///
    /// The rendered markup is left in place (hidden); the report itself is
    /// dropped from the session.
    pub fn reset(&mut self) {
        self.session.selected_file = None;
        self.session.last_report = None;
        self.view.report.visible = false;
        self.view.download_button.enabled = false;
        self.view.error.clear();
        tracing::debug!("Session reset");
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Show a health check result in the status caption.
    pub fn show_health(&mut self, status: HealthStatus) {
        self.view.status = status.caption().to_string();
        tracing::info!(?status, "Service status");
    }

    /// Pick up the background health check result if it has arrived.
    /// The caption keeps its "checking" text until then.
    pub fn poll_health(&mut self, monitor: &HealthMonitor) -> Option<HealthStatus> {
        let status = monitor.try_status()?;
        self.show_health(status);
        Some(status)
    }

    // =========================================================================
    // Analyze
    // =========================================================================

    /// Upload the selected file for analysis and render the report.
    ///
    /// Returns the phase the workflow settled in (`Rendered` or `Error`).
    pub fn analyze(&mut self, transport: &dyn Transport) -> AnalyzePhase {
        self.view.error.clear();

        let Some(file) = self.session.selected_file.as_ref() else {
            let err = WorkflowError::Validation {
                message: constants::MSG_SELECT_FILE_ANALYZE,
            };
            tracing::warn!(error = %err, "Analyze requested without a file");
            self.view.error.show(&err.to_string());
            self.session.analyze = AnalyzePhase::Error;
            return AnalyzePhase::Error;
        };

        let mut view = ControlLease::acquire(&mut self.view, ControlId::Analyze);
        let phase = &mut self.session.analyze;

        view.download_button.enabled = false;
        view.report.visible = false;
        view.progress
            .set(constants::ANALYZE_UPLOAD_PERCENT, constants::CAPTION_UPLOADING);
        *phase = AnalyzePhase::Submitting;
        tracing::debug!(file = %file.name, "Analyze: submitting");

        match submit_analysis(&mut view, phase, transport, file) {
            Ok(report) => {
                view.report.visible = true;
                view.download_button.enabled = true;
                view.progress
                    .set(constants::COMPLETE_PERCENT, constants::CAPTION_DONE);
                *phase = AnalyzePhase::Rendered;
                tracing::info!(
                    file = %file.name,
                    grade = %report.overall_risk_grade,
                    total = report.stats.total,
                    preview_rows = report.preview_len(),
                    "Analysis report rendered"
                );
                self.session.last_report = Some(report);
            }
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "Analyze failed");
                view.progress.hide();
                view.error.show(&err.to_string());
                *phase = AnalyzePhase::Error;
            }
        }

        drop(view);
        if self.session.analyze == AnalyzePhase::Rendered {
            self.finish_progress();
        }
        self.session.analyze
    }

    // =========================================================================
    // Download
    // =========================================================================

    /// Upload the selected file to the export endpoint and save the CSV
    /// through `sink` under the server-suggested name.
    ///
    /// Returns the phase the workflow settled in (`Downloaded` or `Error`).
    pub fn download(&mut self, transport: &dyn Transport, sink: &mut dyn SaveSink) -> DownloadPhase {
        self.view.error.clear();

        let Some(file) = self.session.selected_file.as_ref() else {
            let err = WorkflowError::Validation {
                message: constants::MSG_SELECT_FILE_DOWNLOAD,
            };
            tracing::warn!(error = %err, "Download requested without a file");
            self.view.error.show(&err.to_string());
            self.session.download = DownloadPhase::Error;
            return DownloadPhase::Error;
        };

        let mut view = ControlLease::acquire(&mut self.view, ControlId::Download);
        let phase = &mut self.session.download;

        view.progress
            .set(constants::DOWNLOAD_START_PERCENT, constants::CAPTION_GENERATING_CSV);
        *phase = DownloadPhase::Submitting;
        tracing::debug!(file = %file.name, "Download: submitting");

        match fetch_and_save(phase, transport, sink, file, &self.settings.default_filename) {
            Ok(path) => {
                view.progress
                    .set(constants::COMPLETE_PERCENT, constants::CAPTION_DOWNLOADED);
                *phase = DownloadPhase::Downloaded;
                self.session.last_download = Some(path);
            }
            Err(err) => {
                tracing::warn!(file = %file.name, error = %err, "Download failed");
                view.progress.hide();
                view.error.show(&err.to_string());
                *phase = DownloadPhase::Error;
            }
        }

        drop(view);
        if self.session.download == DownloadPhase::Downloaded {
            self.finish_progress();
        }
        self.session.download
    }

    /// Hold the 100% state briefly, then hide the bar.
    fn finish_progress(&mut self) {
        (self.hold)(&self.view, self.settings.progress_hide_delay);
        self.view.progress.hide();
    }
}

/// Upload, check the status, decode the report and render it into the view.
fn submit_analysis(
    view: &mut ViewModel,
    phase: &mut AnalyzePhase,
    transport: &dyn Transport,
    file: &SelectedFile,
) -> Result<AnalysisReport, WorkflowError> {
    let response = transport.post_file(constants::ANALYZE_ENDPOINT, &file.name, &file.content)?;

    if !response.is_success() {
        return Err(WorkflowError::Server {
            prefix: constants::PREFIX_ANALYZE_FAILED,
            status: response.status,
            body: response.text(),
        });
    }

    *phase = AnalyzePhase::AwaitingResult;
    view.progress.set(
        constants::ANALYZE_RENDER_PERCENT,
        constants::CAPTION_GENERATING_REPORT,
    );

    let report = AnalysisReport::from_json(&response.body)
        .map_err(|e| WorkflowError::Malformed { source: e })?;

    // The analyzer's arithmetic is trusted; inconsistencies are only logged.
    for problem in report.stats.invariant_violations() {
        tracing::warn!(problem = %problem, "Report stats are inconsistent");
    }

    view.report.render(&report);
    Ok(report)
}

/// Upload to the export endpoint and hand the payload to the save sink.
/// The response (and its body buffer) is released when this returns.
fn fetch_and_save(
    phase: &mut DownloadPhase,
    transport: &dyn Transport,
    sink: &mut dyn SaveSink,
    file: &SelectedFile,
    default_filename: &str,
) -> Result<PathBuf, WorkflowError> {
    let response = transport.post_file(constants::EXPORT_ENDPOINT, &file.name, &file.content)?;

    if !response.is_success() {
        return Err(WorkflowError::Server {
            prefix: constants::PREFIX_DOWNLOAD_FAILED,
            status: response.status,
            body: response.text(),
        });
    }

    *phase = DownloadPhase::Saving;
    let filename =
        disposition::filename_or_default(response.content_disposition.as_deref(), default_filename);
    tracing::debug!(filename = %filename, bytes = response.body.len(), "Download: saving");

    Ok(sink.save(&filename, &response.body)?)
}

fn hold_progress(_view: &ViewModel, delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
