// LogTriage - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// The report is produced by the remote analyzer; this crate only decodes
// and displays it. Key order of every mapping is the analyzer's order
// (serde_json is built with `preserve_order`).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label-to-count mapping, already ordered (and usually truncated) by the
/// analyzer.
pub type CountMap = serde_json::Map<String, Value>;

/// One row of the high-risk preview: column name to display value.
pub type Row = serde_json::Map<String, Value>;

// =============================================================================
// Analysis report
// =============================================================================

/// The structured result of analysing one submitted file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Single label summarising the overall severity.
    pub overall_risk_grade: String,

    /// Summary statistics.
    pub stats: Stats,

    /// Predicted attack type to row count.
    #[serde(default)]
    pub type_counts: Option<CountMap>,

    /// Most frequent source addresses.
    #[serde(default)]
    pub top_src_ip: Option<CountMap>,

    /// Most frequent destination addresses.
    #[serde(default)]
    pub top_dst_ip: Option<CountMap>,

    /// Most frequent request paths.
    #[serde(default)]
    pub top_url_path: Option<CountMap>,

    /// Bounded excerpt of the most severe rows. All rows share the column
    /// set of the first row.
    #[serde(default)]
    pub high_risk_preview: Option<Vec<Row>>,
}

impl AnalysisReport {
    /// Decode a report from the analyzer's JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Number of preview rows (0 when absent).
    pub fn preview_len(&self) -> usize {
        self.high_risk_preview.as_ref().map_or(0, Vec::len)
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Summary statistics of one report.
///
/// Counts are trusted from the analyzer; see [`Stats::invariant_violations`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(deserialize_with = "deserialize_count")]
    pub total: u64,
    #[serde(deserialize_with = "deserialize_count")]
    pub high: u64,
    #[serde(deserialize_with = "deserialize_count")]
    pub mid: u64,
    #[serde(deserialize_with = "deserialize_count")]
    pub low: u64,
    #[serde(deserialize_with = "deserialize_count")]
    pub normal: u64,
    pub high_ratio: f64,
    pub mid_ratio: f64,
}

impl Stats {
    /// Describe every way these stats break the analyzer's own contract.
    ///
    /// Used for diagnostics only; rendering never alters the numbers.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut out = Vec::new();

        let parts = self
            .high
            .saturating_add(self.mid)
            .saturating_add(self.low)
            .saturating_add(self.normal);
        if parts > self.total {
            out.push(format!(
                "high+mid+low+normal = {parts} exceeds total = {}",
                self.total
            ));
        }

        for (name, ratio) in [("high_ratio", self.high_ratio), ("mid_ratio", self.mid_ratio)] {
            if !(0.0..=1.0).contains(&ratio) {
                out.push(format!("{name} = {ratio} is outside [0, 1]"));
            }
        }

        out
    }
}

/// Accept a count written either as a JSON integer or as an integral float
/// (the analyzer serialises its counts as floats).
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole count, got {number}"
        ))),
    }
}

// =============================================================================
// Display coercion
// =============================================================================

/// Coerce a report value to the text shown in a cell or key-value row.
///
/// Null becomes empty, strings are taken verbatim, whole numbers lose any
/// trailing `.0`, and nested values are shown as compact JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                        return format!("{}", f as i64);
                    }
                }
            }
            n.to_string()
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
