// LogTriage - core/export.rs
//
// Local CSV and JSON export of a rendered report.
// Core layer: writes to any Write trait object.

use crate::core::model::{display_text, AnalysisReport};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export the high-risk preview to CSV.
///
/// The header is the first row's key order (the same column set the table
/// shows); missing values are written as empty fields. An absent or empty
/// preview writes nothing at all. Returns the number of data rows written.
pub fn export_preview_csv<W: Write>(
    report: &AnalysisReport,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let rows = report.high_risk_preview.as_deref().unwrap_or_default();
    let Some(first) = rows.first() else {
        return Ok(0);
    };

    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    let columns: Vec<&String> = first.keys().collect();
    csv_writer.write_record(&columns).map_err(csv_err)?;

    let mut count = 0;
    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|c| row.get(c.as_str()).map(display_text).unwrap_or_default())
            .collect();
        csv_writer.write_record(&record).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export the full report as pretty-printed JSON, keys in analyzer order.
/// Returns the number of preview rows contained.
pub fn export_report_json<W: Write>(
    report: &AnalysisReport,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(report.preview_len())
}
