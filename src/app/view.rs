// LogTriage - app/view.rs
//
// View model: one value per named UI region. Constructed once by the
// controller and mutated only through the controller's workflows.
// Presentation (ui::page) reads it; nothing here performs I/O.

use crate::core::markup::Markup;
use crate::core::model::AnalysisReport;
use crate::core::render::{self, TableMarkup};
use crate::util::constants;

/// Identifies one of the triggering controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Analyze,
    Download,
    Reset,
}

/// A clickable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub enabled: bool,
}

/// The single user-visible error slot.
///
/// A new message replaces the previous one; messages never queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorRegion {
    message: String,
    visible: bool,
}

impl ErrorRegion {
    /// Set and reveal the message.
    pub fn show(&mut self, message: &str) {
        self.message = message.to_string();
        self.visible = true;
    }

    /// Empty and hide the slot.
    pub fn clear(&mut self) {
        self.message.clear();
        self.visible = false;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Progress bar with caption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressRegion {
    visible: bool,
    percent: u8,
    caption: String,
}

impl ProgressRegion {
    /// Show the indicator at `percent` with `caption`.
    pub fn set(&mut self, percent: u8, caption: &str) {
        self.visible = true;
        self.percent = percent;
        self.caption = caption.to_string();
    }

    /// Hide the indicator and reset fill and caption.
    pub fn hide(&mut self) {
        self.visible = false;
        self.percent = 0;
        self.caption.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }
}

/// The report container and all regions inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRegion {
    pub visible: bool,
    pub risk_grade: String,
    pub metrics: Markup,
    pub type_counts: Markup,
    pub top_src: Markup,
    pub top_dst: Markup,
    pub top_path: Markup,
    pub high_table: TableMarkup,
}

impl ReportRegion {
    /// Re-render every sub-region from `report`. Visibility is left to the
    /// caller.
    pub fn render(&mut self, report: &AnalysisReport) {
        self.risk_grade = format!(
            "{}{}",
            constants::RISK_GRADE_PREFIX,
            report.overall_risk_grade
        );
        render::metrics(&mut self.metrics, &report.stats);
        render::kv_list(
            &mut self.type_counts,
            report.type_counts.as_ref(),
            constants::TYPE_COUNTS_LIMIT,
        );
        render::kv_list(
            &mut self.top_src,
            report.top_src_ip.as_ref(),
            constants::TOP_N_LIMIT,
        );
        render::kv_list(
            &mut self.top_dst,
            report.top_dst_ip.as_ref(),
            constants::TOP_N_LIMIT,
        );
        render::kv_list(
            &mut self.top_path,
            report.top_url_path.as_ref(),
            constants::TOP_N_LIMIT,
        );
        render::high_risk_table(&mut self.high_table, report.high_risk_preview.as_deref());
    }
}

/// Every named region of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub analyze_button: Control,
    pub download_button: Control,
    pub reset_button: Control,
    pub error: ErrorRegion,
    /// Service status caption written by the health monitor.
    pub status: String,
    pub progress: ProgressRegion,
    pub report: ReportRegion,
}

impl ViewModel {
    /// Initial layout: download locked until a report exists.
    pub fn new() -> Self {
        Self {
            analyze_button: Control { enabled: true },
            download_button: Control { enabled: false },
            reset_button: Control { enabled: true },
            error: ErrorRegion::default(),
            status: constants::STATUS_CHECKING.to_string(),
            progress: ProgressRegion::default(),
            report: ReportRegion::default(),
        }
    }

    pub fn control(&self, id: ControlId) -> &Control {
        match id {
            ControlId::Analyze => &self.analyze_button,
            ControlId::Download => &self.download_button,
            ControlId::Reset => &self.reset_button,
        }
    }

    pub fn control_mut(&mut self, id: ControlId) -> &mut Control {
        match id {
            ControlId::Analyze => &mut self.analyze_button,
            ControlId::Download => &mut self.download_button,
            ControlId::Reset => &mut self.reset_button,
        }
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}
