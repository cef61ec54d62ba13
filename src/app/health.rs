// LogTriage - app/health.rs
//
// Best-effort liveness probe. Failure detail is logged at DEBUG and then
// dropped: this is a status caption, not a user action.
//
// `HealthMonitor` runs the check on a background thread and hands the
// result back over an mpsc channel. The workflows never wait for it; the
// host polls whenever it is convenient.

use crate::platform::http::Transport;
use crate::util::constants;
use serde_json::Value;
use std::sync::mpsc;

/// Outcome of one liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Service answered `{"status": "ok"}`.
    Online,
    /// Service answered, but not with an ok status.
    Abnormal,
    /// No usable answer.
    Offline,
}

impl HealthStatus {
    /// Status caption shown to the user.
    pub fn caption(&self) -> &'static str {
        match self {
            HealthStatus::Online => constants::STATUS_ONLINE,
            HealthStatus::Abnormal => constants::STATUS_ABNORMAL,
            HealthStatus::Offline => constants::STATUS_OFFLINE,
        }
    }
}

/// Issue one liveness request and classify the answer.
pub fn probe(transport: &dyn Transport) -> HealthStatus {
    let response = match transport.get(constants::HEALTH_ENDPOINT) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(error = %e, "Health probe failed");
            return HealthStatus::Offline;
        }
    };

    if !response.is_success() {
        tracing::debug!(status = response.status, "Health probe returned non-success");
        return HealthStatus::Offline;
    }

    match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Null) | Err(_) => HealthStatus::Offline,
        Ok(body) => match body.get("status").and_then(Value::as_str) {
            Some(status) if status == constants::HEALTH_OK_STATUS => HealthStatus::Online,
            _ => HealthStatus::Abnormal,
        },
    }
}

/// A liveness check running on its own thread.
pub struct HealthMonitor {
    status_rx: mpsc::Receiver<HealthStatus>,
}

impl HealthMonitor {
    /// Start checking immediately; `transport` moves to the worker thread.
    pub fn spawn<T>(transport: T) -> Self
    where
        T: Transport + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            // Receiver dropped means nobody wants the answer any more.
            let _ = tx.send(probe(&transport));
        });
        Self { status_rx: rx }
    }

    /// The result if it has arrived. Never blocks.
    pub fn try_status(&self) -> Option<HealthStatus> {
        self.status_rx.try_recv().ok()
    }

    /// Block until the check finishes. `None` if the worker thread died.
    pub fn wait(&self) -> Option<HealthStatus> {
        self.status_rx.recv().ok()
    }
}
