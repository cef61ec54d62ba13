// LogTriage - tests/e2e_workflows.rs
//
// End-to-end tests for the controller workflows.
//
// The controller is driven exactly as the CLI drives it, with the network
// replaced by a scripted in-memory transport. The liveness check runs on
// its own thread, as it does in the CLI. Downloads go through the real
// `DirectorySink` into a temporary directory, or through a recording sink
// when the test cares about the suggested filename only.

use logtriage::app::controller::{Controller, ControllerSettings};
use logtriage::app::health::{HealthMonitor, HealthStatus};
use logtriage::app::state::{AnalyzePhase, DownloadPhase, SelectedFile};
use logtriage::platform::http::{HttpResponse, Transport};
use logtriage::platform::save::{DirectorySink, SaveSink};
use logtriage::util::constants;
use logtriage::util::error::{SaveError, TransportError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

// =============================================================================
// Helpers
// =============================================================================

/// One scripted answer: a response or a transport failure.
type Scripted = Result<HttpResponse, &'static str>;

/// Transport that replays scripted answers and records every request.
#[derive(Default)]
struct ScriptedTransport {
    answers: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<(String, String)>>,
}

impl ScriptedTransport {
    fn with(answers: Vec<Scripted>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn next(&self, method: &str, endpoint: &str) -> Result<HttpResponse, TransportError> {
        self.requests
            .borrow_mut()
            .push((method.to_string(), endpoint.to_string()));
        match self.answers.borrow_mut().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(TransportError::Request {
                url: endpoint.to_string(),
                source: reason.into(),
            }),
            None => panic!("unexpected request to {endpoint}"),
        }
    }
}

impl Transport for ScriptedTransport {
    fn post_file(
        &self,
        endpoint: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        assert!(!file_name.is_empty());
        assert!(!content.is_empty());
        self.next("POST", endpoint)
    }

    fn get(&self, endpoint: &str) -> Result<HttpResponse, TransportError> {
        self.next("GET", endpoint)
    }
}

/// Sink that remembers what it was asked to save.
#[derive(Default)]
struct RecordingSink {
    saved: Vec<(String, Vec<u8>)>,
}

impl SaveSink for RecordingSink {
    fn save(&mut self, filename: &str, content: &[u8]) -> Result<PathBuf, SaveError> {
        self.saved.push((filename.to_string(), content.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

fn ok_json(body: &str) -> Scripted {
    Ok(HttpResponse {
        status: 200,
        content_disposition: None,
        body: body.as_bytes().to_vec(),
    })
}

fn status(code: u16, body: &str) -> Scripted {
    Ok(HttpResponse {
        status: code,
        content_disposition: None,
        body: body.as_bytes().to_vec(),
    })
}

fn csv_payload(disposition: Option<&str>) -> Scripted {
    Ok(HttpResponse {
        status: 200,
        content_disposition: disposition.map(str::to_string),
        body: b"row_id,attack_type_pred\n0,Normal\n".to_vec(),
    })
}

/// A report as the analyzer produces it (float counts, ordered mappings).
const REPORT: &str = r#"{
    "overall_risk_grade": "high",
    "stats": {"total": 40.0, "normal": 20.0, "low": 8.0, "mid": 6.0, "high": 6.0,
              "high_ratio": 0.15, "mid_ratio": 0.15},
    "type_counts": {"Normal": 20, "SQL injection": 6, "RCE": 6, "XSS": 8},
    "top_src_ip": {"10.0.0.9": 30, "10.0.0.1": 10},
    "top_dst_ip": {},
    "top_url_path": {"/login": 12, "/<script>": 3},
    "high_risk_preview": [
        {"timestamp": "2024-05-01 10:00:00", "src_ip": "10.0.0.9", "url_path": "/cmd?x=<b>", "confidence": 0.97},
        {"timestamp": "2024-05-01 10:00:05", "src_ip": "10.0.0.9", "confidence": null}
    ]
}"#;

/// Transport whose liveness request hangs until released, then fails.
struct StalledHealth(mpsc::Receiver<()>);

impl Transport for StalledHealth {
    fn post_file(&self, _: &str, _: &str, _: &[u8]) -> Result<HttpResponse, TransportError> {
        unreachable!("health check never uploads")
    }

    fn get(&self, endpoint: &str) -> Result<HttpResponse, TransportError> {
        let _ = self.0.recv();
        Err(TransportError::Request {
            url: endpoint.to_string(),
            source: "no route to host".into(),
        })
    }
}

/// Poll until the background health check has answered.
fn settle(c: &mut Controller, monitor: &HealthMonitor) -> HealthStatus {
    for _ in 0..500 {
        if let Some(status) = c.poll_health(monitor) {
            return status;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("health check never answered");
}

fn kv_rows(fragment: &str) -> usize {
    fragment.matches("class=\"kv\"").count()
}

fn controller() -> Controller {
    Controller::new(ControllerSettings {
        progress_hide_delay: Duration::ZERO,
        default_filename: constants::DEFAULT_DOWNLOAD_FILENAME.to_string(),
    })
}

fn controller_with_file() -> Controller {
    let mut c = controller();
    c.select_file(SelectedFile::new("alerts.csv", b"method,url_path\nGET,/\n".to_vec()));
    c
}

// =============================================================================
// Analyze
// =============================================================================

/// Analyze without a file: no request, error shown, analyze still enabled.
#[test]
fn e2e_analyze_without_file_makes_no_request() {
    let transport = ScriptedTransport::default();
    let mut c = controller();

    let phase = c.analyze(&transport);

    assert_eq!(phase, AnalyzePhase::Error);
    assert_eq!(transport.request_count(), 0);
    assert!(c.view.error.is_visible());
    assert_eq!(c.view.error.message(), constants::MSG_SELECT_FILE_ANALYZE);
    assert!(c.view.analyze_button.enabled);
    assert!(!c.view.progress.is_visible());
}

/// A successful analysis renders every region and unlocks download.
#[test]
fn e2e_analyze_success_renders_report() {
    let transport = ScriptedTransport::with(vec![ok_json(REPORT)]);
    let mut c = controller_with_file();
    assert!(!c.view.download_button.enabled);

    let phase = c.analyze(&transport);

    assert_eq!(phase, AnalyzePhase::Rendered);
    assert_eq!(
        transport.requests.borrow()[0],
        ("POST".to_string(), constants::ANALYZE_ENDPOINT.to_string())
    );
    assert!(c.view.report.visible);
    assert!(c.view.download_button.enabled);
    assert!(c.view.analyze_button.enabled);
    assert!(!c.view.error.is_visible());
    assert!(!c.view.progress.is_visible(), "progress hidden after the delay");

    let report = &c.view.report;
    assert_eq!(report.risk_grade, "Overall risk grade: high");
    assert_eq!(report.metrics.as_str().matches("class=\"metric\"").count(), 5);
    assert!(report.metrics.as_str().contains("6 (15.00%)"));
    assert_eq!(report.type_counts.as_str().matches("class=\"kv\"").count(), 4);
    assert_eq!(report.top_src.as_str().matches("class=\"kv\"").count(), 2);
    assert!(report.top_dst.as_str().contains(constants::PLACEHOLDER_NO_DATA));
    assert!(report.top_path.as_str().contains("/&lt;script&gt;"));

    assert_eq!(
        report.high_table.head.as_str(),
        "<tr><th>timestamp</th><th>src_ip</th><th>url_path</th><th>confidence</th></tr>"
    );
    assert_eq!(report.high_table.body.as_str().matches("<tr>").count(), 2);
    assert_eq!(report.high_table.body.as_str().matches("<td>").count(), 8);
    assert!(report.high_table.body.as_str().contains("/cmd?x=&lt;b&gt;"));

    let stored = c.session.last_report.as_ref().unwrap();
    assert_eq!(stored.stats.total, 40);
}

/// Non-success status: body text surfaced verbatim with the prefix.
#[test]
fn e2e_analyze_server_error_shows_body() {
    let transport = ScriptedTransport::with(vec![status(400, "bad file")]);
    let mut c = controller_with_file();

    let phase = c.analyze(&transport);

    assert_eq!(phase, AnalyzePhase::Error);
    assert!(c.view.error.message().contains("bad file"));
    assert!(c.view.error.message().starts_with(constants::PREFIX_ANALYZE_FAILED));
    assert!(!c.view.progress.is_visible());
    assert!(!c.view.report.visible);
    assert!(!c.view.download_button.enabled);
    assert!(c.view.analyze_button.enabled);
}

/// Unparseable success body: error shown, controls restored.
#[test]
fn e2e_analyze_malformed_body_is_error() {
    let transport = ScriptedTransport::with(vec![ok_json("<html>proxy error</html>")]);
    let mut c = controller_with_file();

    let phase = c.analyze(&transport);

    assert_eq!(phase, AnalyzePhase::Error);
    assert!(c.view.error.message().starts_with("Malformed response"));
    assert!(!c.view.progress.is_visible());
    assert!(c.view.analyze_button.enabled);
    assert!(c.session.last_report.is_none());
}

/// Transport failure during analyze.
#[test]
fn e2e_analyze_transport_failure_is_error() {
    let transport = ScriptedTransport::with(vec![Err("connection refused")]);
    let mut c = controller_with_file();

    assert_eq!(c.analyze(&transport), AnalyzePhase::Error);
    assert!(c.view.error.message().contains("connection refused"));
    assert!(c.view.analyze_button.enabled);
}

/// A failed re-analysis hides the previous report and locks download again.
#[test]
fn e2e_failed_reanalysis_hides_previous_report() {
    let transport = ScriptedTransport::with(vec![ok_json(REPORT), status(500, "model crashed")]);
    let mut c = controller_with_file();

    assert_eq!(c.analyze(&transport), AnalyzePhase::Rendered);
    assert_eq!(c.analyze(&transport), AnalyzePhase::Error);

    assert!(!c.view.report.visible);
    assert!(!c.view.download_button.enabled);
    assert_eq!(c.view.error.message(), "Backend returned an error: model crashed");
}

/// A second successful analysis replaces the report rather than merging.
#[test]
fn e2e_reanalysis_replaces_report() {
    let second = r#"{
        "overall_risk_grade": "low",
        "stats": {"total": 1, "normal": 1, "low": 0, "mid": 0, "high": 0,
                  "high_ratio": 0.0, "mid_ratio": 0.0},
        "type_counts": {"Normal": 1}
    }"#;
    let transport = ScriptedTransport::with(vec![ok_json(REPORT), ok_json(second)]);
    let mut c = controller_with_file();

    c.analyze(&transport);
    assert_eq!(c.analyze(&transport), AnalyzePhase::Rendered);

    assert_eq!(c.view.report.risk_grade, "Overall risk grade: low");
    assert_eq!(c.view.report.type_counts.as_str().matches("class=\"kv\"").count(), 1);
    assert!(c.view.report.top_src.is_empty(), "absent mapping renders nothing");
    assert!(c.view.report.high_table.body.as_str().contains(constants::PLACEHOLDER_NO_SAMPLES));
    assert_eq!(c.session.last_report.as_ref().unwrap().stats.total, 1);
}

/// Inconsistent stats are rendered as given.
#[test]
fn e2e_inconsistent_stats_still_render() {
    let body = r#"{
        "overall_risk_grade": "mid",
        "stats": {"total": 1, "normal": 5, "low": 0, "mid": 0, "high": 0,
                  "high_ratio": 0.0, "mid_ratio": 2.0}
    }"#;
    let transport = ScriptedTransport::with(vec![ok_json(body)]);
    let mut c = controller_with_file();

    assert_eq!(c.analyze(&transport), AnalyzePhase::Rendered);
    assert!(c.view.report.metrics.as_str().contains("0 (200.00%)"));
}

/// Type counts keep their first 50 entries, the top-N mappings their first 10.
#[test]
fn e2e_report_mappings_are_capped() {
    let type_counts: Vec<String> = (0..60).map(|i| format!(r#""type_{i}": {}"#, 100 - i)).collect();
    let ips: Vec<String> = (0..15).map(|i| format!(r#""10.0.0.{i}": {}"#, 50 - i)).collect();
    let paths: Vec<String> = (0..12).map(|i| format!(r#""/p{i}": 3"#)).collect();
    let body = format!(
        r#"{{"overall_risk_grade": "mid",
            "stats": {{"total": 100, "high": 1, "mid": 2, "low": 3, "normal": 94,
                       "high_ratio": 0.01, "mid_ratio": 0.02}},
            "type_counts": {{{}}},
            "top_src_ip": {{{}}},
            "top_dst_ip": {{{}}},
            "top_url_path": {{{}}}}}"#,
        type_counts.join(","),
        ips.join(","),
        ips.join(","),
        paths.join(","),
    );
    let transport = ScriptedTransport::with(vec![ok_json(&body)]);
    let mut c = controller_with_file();

    assert_eq!(c.analyze(&transport), AnalyzePhase::Rendered);
    let report = &c.view.report;

    assert_eq!(kv_rows(report.type_counts.as_str()), 50);
    assert_eq!(kv_rows(report.top_src.as_str()), 10);
    assert_eq!(kv_rows(report.top_dst.as_str()), 10);
    assert_eq!(kv_rows(report.top_path.as_str()), 10);

    let types = report.type_counts.as_str();
    let first = types.find(">type_0<").unwrap();
    let last_kept = types.find(">type_49<").unwrap();
    assert!(first < last_kept);
    assert!(!types.contains(">type_50<"));

    let src = report.top_src.as_str();
    assert!(src.contains(">10.0.0.0<"));
    assert!(src.contains(">10.0.0.9<"));
    assert!(!src.contains(">10.0.0.10<"));
    assert!(!report.top_path.as_str().contains(">/p10<"));
}

// =============================================================================
// Download
// =============================================================================

/// Download without a file: no request, error shown.
#[test]
fn e2e_download_without_file_makes_no_request() {
    let transport = ScriptedTransport::default();
    let mut sink = RecordingSink::default();
    let mut c = controller();

    assert_eq!(c.download(&transport, &mut sink), DownloadPhase::Error);
    assert_eq!(transport.request_count(), 0);
    assert!(sink.saved.is_empty());
    assert_eq!(c.view.error.message(), constants::MSG_SELECT_FILE_DOWNLOAD);
}

/// The suggested filename from Content-Disposition is used.
#[test]
fn e2e_download_uses_suggested_filename() {
    let transport =
        ScriptedTransport::with(vec![csv_payload(Some(r#"attachment; filename="report123.csv""#))]);
    let mut sink = RecordingSink::default();
    let mut c = controller_with_file();

    let phase = c.download(&transport, &mut sink);

    assert_eq!(phase, DownloadPhase::Downloaded);
    assert_eq!(
        transport.requests.borrow()[0],
        ("POST".to_string(), constants::EXPORT_ENDPOINT.to_string())
    );
    assert_eq!(sink.saved.len(), 1);
    assert_eq!(sink.saved[0].0, "report123.csv");
    assert!(c.view.download_button.enabled);
    assert!(!c.view.progress.is_visible());
    assert!(!c.view.error.is_visible());
}

/// Without Content-Disposition the default name is used.
#[test]
fn e2e_download_falls_back_to_default_name() {
    let transport = ScriptedTransport::with(vec![csv_payload(None)]);
    let mut sink = RecordingSink::default();
    let mut c = controller_with_file();

    c.download(&transport, &mut sink);

    assert_eq!(sink.saved[0].0, constants::DEFAULT_DOWNLOAD_FILENAME);
}

/// A configured default name replaces the built-in one.
#[test]
fn e2e_download_configured_default_name() {
    let transport = ScriptedTransport::with(vec![csv_payload(Some("attachment"))]);
    let mut sink = RecordingSink::default();
    let mut c = Controller::new(ControllerSettings {
        progress_hide_delay: Duration::ZERO,
        default_filename: "result.csv".to_string(),
    });
    c.select_file(SelectedFile::new("a.csv", b"x".to_vec()));

    c.download(&transport, &mut sink);

    assert_eq!(sink.saved[0].0, "result.csv");
}

/// Non-success status during download.
#[test]
fn e2e_download_server_error() {
    let transport = ScriptedTransport::with(vec![status(422, "unsupported format")]);
    let mut sink = RecordingSink::default();
    let mut c = controller_with_file();

    assert_eq!(c.download(&transport, &mut sink), DownloadPhase::Error);
    assert_eq!(c.view.error.message(), "Download failed: unsupported format");
    assert!(!c.view.progress.is_visible());
    assert!(c.view.download_button.enabled);
    assert!(sink.saved.is_empty());
}

/// The real directory sink stores the payload under the suggested name.
#[test]
fn e2e_download_to_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::with(vec![csv_payload(Some(
        r#"attachment; filename="pred_alerts.csv""#,
    ))]);
    let mut sink = DirectorySink::new(tmp.path());
    let mut c = controller_with_file();

    assert_eq!(c.download(&transport, &mut sink), DownloadPhase::Downloaded);

    let saved = tmp.path().join("pred_alerts.csv");
    assert_eq!(c.session.last_download.as_deref(), Some(saved.as_path()));
    assert_eq!(
        std::fs::read(&saved).unwrap(),
        b"row_id,attack_type_pred\n0,Normal\n"
    );
}

/// A save failure is reported and the control restored.
#[test]
fn e2e_download_save_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let transport =
        ScriptedTransport::with(vec![csv_payload(Some(r#"attachment; filename="..""#))]);
    let mut sink = DirectorySink::new(tmp.path());
    let mut c = controller_with_file();

    assert_eq!(c.download(&transport, &mut sink), DownloadPhase::Error);
    assert!(c.view.error.message().starts_with("Could not save"));
    assert!(c.view.download_button.enabled);
}

/// Download while a report is displayed leaves the report untouched.
#[test]
fn e2e_download_keeps_report_visible() {
    let transport = ScriptedTransport::with(vec![ok_json(REPORT), csv_payload(None)]);
    let mut sink = RecordingSink::default();
    let mut c = controller_with_file();

    c.analyze(&transport);
    let before = c.view.report.clone();
    assert_eq!(c.download(&transport, &mut sink), DownloadPhase::Downloaded);

    assert_eq!(c.view.report, before);
    assert!(c.view.report.visible);
    assert_eq!(c.session.analyze, AnalyzePhase::Rendered);
}

// =============================================================================
// Reset
// =============================================================================

/// Reset after a rendered report with an error showing.
#[test]
fn e2e_reset_clears_everything() {
    let transport = ScriptedTransport::with(vec![ok_json(REPORT), status(500, "boom")]);
    let mut sink = RecordingSink::default();
    let mut c = controller_with_file();
    c.analyze(&transport);
    c.download(&transport, &mut sink);
    assert!(c.view.error.is_visible());

    c.reset();

    assert!(c.session.selected_file.is_none());
    assert!(c.session.last_report.is_none());
    assert!(!c.view.report.visible);
    assert!(!c.view.download_button.enabled);
    assert!(!c.view.error.is_visible());
    assert_eq!(transport.request_count(), 2, "reset makes no request");
}

/// Reset from the initial state is a no-op apart from the guarantees.
#[test]
fn e2e_reset_from_initial_state() {
    let mut c = controller();
    c.reset();
    assert!(c.session.selected_file.is_none());
    assert!(!c.view.report.visible);
    assert!(!c.view.download_button.enabled);
    assert!(!c.view.error.is_visible());
}

// =============================================================================
// Health
// =============================================================================

#[test]
fn e2e_health_captions() {
    let mut c = controller();

    let monitor = HealthMonitor::spawn(ScriptedTransport::with(vec![Err("refused")]));
    assert_eq!(settle(&mut c, &monitor), HealthStatus::Offline);
    assert_eq!(c.view.status, constants::STATUS_OFFLINE);

    let monitor = HealthMonitor::spawn(ScriptedTransport::with(vec![ok_json(r#"{"status":"ok"}"#)]));
    assert_eq!(settle(&mut c, &monitor), HealthStatus::Online);
    assert_eq!(c.view.status, constants::STATUS_ONLINE);

    let monitor =
        HealthMonitor::spawn(ScriptedTransport::with(vec![ok_json(r#"{"status":"loading"}"#)]));
    assert_eq!(settle(&mut c, &monitor), HealthStatus::Abnormal);
    assert_eq!(c.view.status, constants::STATUS_ABNORMAL);
}

/// The health check asks the liveness endpoint with a plain GET.
#[test]
fn e2e_health_uses_liveness_endpoint() {
    let t = ScriptedTransport::with(vec![ok_json(r#"{"status":"ok"}"#)]);
    assert_eq!(logtriage::app::health::probe(&t), HealthStatus::Online);
    assert_eq!(
        t.requests.borrow()[0],
        ("GET".to_string(), constants::HEALTH_ENDPOINT.to_string())
    );
}

/// The health check never touches the workflow controls.
#[test]
fn e2e_health_leaves_controls_alone() {
    let mut c = controller();
    let monitor = HealthMonitor::spawn(ScriptedTransport::with(vec![status(502, "bad gateway")]));
    let before = (c.view.analyze_button, c.view.download_button);
    assert_eq!(settle(&mut c, &monitor), HealthStatus::Offline);
    assert_eq!((c.view.analyze_button, c.view.download_button), before);
    assert!(!c.view.error.is_visible());
}

/// A hung liveness request holds up neither workflow.
#[test]
fn e2e_stalled_health_check_does_not_block_workflows() {
    let (release, stalled) = mpsc::channel();
    let monitor = HealthMonitor::spawn(StalledHealth(stalled));
    let transport = ScriptedTransport::with(vec![ok_json(REPORT), csv_payload(None)]);
    let mut sink = RecordingSink::default();
    let mut c = controller_with_file();

    assert_eq!(c.analyze(&transport), AnalyzePhase::Rendered);
    assert_eq!(c.download(&transport, &mut sink), DownloadPhase::Downloaded);
    assert_eq!(c.poll_health(&monitor), None);
    assert_eq!(c.view.status, constants::STATUS_CHECKING);

    release.send(()).unwrap();
    assert_eq!(settle(&mut c, &monitor), HealthStatus::Offline);
    assert_eq!(c.view.status, constants::STATUS_OFFLINE);
}
