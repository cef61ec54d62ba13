// LogTriage - ui/theme.rs
//
// Stylesheet and grade-to-colour mapping for the rendered page.
// No dependencies on app state or business logic.

/// Visual class for a risk-grade label.
///
/// The analyzer's grade labels are free text; both English and the
/// analyzer's native labels are recognised, anything else is neutral.
pub fn grade_class(label: &str) -> &'static str {
    match label.trim().to_lowercase().as_str() {
        "high" | "高" | "高风险" => "pill pill-high",
        "mid" | "medium" | "中" | "中风险" => "pill pill-mid",
        "low" | "低" | "低风险" => "pill pill-low",
        _ => "pill",
    }
}

/// Inline stylesheet for the standalone report page.
pub const STYLESHEET: &str = r#"
body { font-family: system-ui, sans-serif; margin: 24px; background: #111827; color: #d1d5db; }
h1 { font-size: 20px; margin: 0 0 4px 0; }
h2 { font-size: 15px; margin: 18px 0 6px 0; color: #f3f4f6; }
.hidden { display: none; }
.muted { color: #6b7280; }
.status { font-size: 13px; color: #9ca3af; }
.error { background: #7f1d1d; color: #fee2e2; padding: 8px 12px; border-radius: 6px; margin: 12px 0; }
.progress { background: #1f2937; border-radius: 6px; height: 8px; margin-top: 12px; }
.progress-bar { background: #2563eb; height: 8px; border-radius: 6px; }
.pill { display: inline-block; padding: 4px 12px; border-radius: 999px; background: #374151; }
.pill-high { background: #dc2626; color: #fff; }
.pill-mid { background: #d97706; color: #fff; }
.pill-low { background: #16a34a; color: #fff; }
.metrics { display: flex; gap: 12px; flex-wrap: wrap; }
.metric { background: #1f2937; padding: 8px 12px; border-radius: 6px; min-width: 140px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 16px; }
.kv { display: flex; justify-content: space-between; border-bottom: 1px solid #1f2937; padding: 2px 0; }
.k { color: #9ca3af; margin-right: 12px; overflow-wrap: anywhere; }
.v { font-variant-numeric: tabular-nums; }
table { border-collapse: collapse; width: 100%; font-size: 12px; }
th, td { border: 1px solid #374151; padding: 4px 6px; text-align: left; }
th { background: #1f2937; }
footer { margin-top: 24px; font-size: 11px; color: #6b7280; }
"#;
