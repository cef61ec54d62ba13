// LogTriage - core/render.rs
//
// Report renderers. Each one empties its target and rebuilds it from a
// read-only view of the report; none of them keeps state between calls.

use crate::core::markup::Markup;
use crate::core::model::{display_text, CountMap, Row, Stats};
use crate::util::constants;

/// Header and body fragments of a table region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMarkup {
    pub head: Markup,
    pub body: Markup,
}

/// Format a ratio in [0, 1] as a percentage with two decimals, e.g. `6.25%`.
///
/// Exact ties round away from zero, so 1 of 800 reads `0.13%`.
pub fn format_percent(ratio: f64) -> String {
    let percent = ratio * 100.0;

    // A value halfway between two cents is an odd multiple of 1/8;
    // `{:.2}` would break that tie to even.
    let eighths = percent * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let cents = (percent * 100.0).abs().ceil().copysign(percent);
        return format!("{:.2}%", cents / 100.0);
    }

    format!("{percent:.2}%")
}

/// Render up to `max_items` label/value rows from `mapping`.
///
/// Absent mapping: the target is left empty. Empty mapping: a single
/// placeholder row. Extra entries beyond `max_items` are dropped silently.
pub fn kv_list(target: &mut Markup, mapping: Option<&CountMap>, max_items: usize) {
    target.clear();
    let Some(mapping) = mapping else {
        return;
    };

    if mapping.is_empty() {
        target.element_class("div", "muted", constants::PLACEHOLDER_NO_DATA);
        return;
    }

    for (label, value) in mapping.iter().take(max_items) {
        kv_row(target, "kv", label, &display_text(value));
    }
}

/// Render the five fixed summary rows.
pub fn metrics(target: &mut Markup, stats: &Stats) {
    target.clear();
    let rows = [
        (constants::METRIC_TOTAL, stats.total.to_string()),
        (
            constants::METRIC_HIGH,
            format!("{} ({})", stats.high, format_percent(stats.high_ratio)),
        ),
        (
            constants::METRIC_MID,
            format!("{} ({})", stats.mid, format_percent(stats.mid_ratio)),
        ),
        (constants::METRIC_LOW, stats.low.to_string()),
        (constants::METRIC_NORMAL, stats.normal.to_string()),
    ];
    for (label, value) in &rows {
        kv_row(target, "metric", label, value);
    }
}

fn kv_row(target: &mut Markup, class: &'static str, label: &str, value: &str) {
    target
        .open_class("div", class)
        .element_class("div", "k", label)
        .element_class("div", "v", value)
        .close("div");
}

/// Render the high-risk preview table.
///
/// Columns come from the key order of the first row only. Missing or null
/// values render as empty cells. Without rows, a one-column hint table is
/// rendered so the table never ends up column-less.
pub fn high_risk_table(table: &mut TableMarkup, rows: Option<&[Row]>) {
    table.head.clear();
    table.body.clear();

    let Some(first) = rows.and_then(|r| r.first()) else {
        table
            .head
            .open("tr")
            .element("th", constants::TABLE_HINT_HEADER)
            .close("tr");
        table
            .body
            .open("tr")
            .element_class("td", "muted", constants::PLACEHOLDER_NO_SAMPLES)
            .close("tr");
        return;
    };

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();

    table.head.open("tr");
    for column in &columns {
        table.head.element("th", column);
    }
    table.head.close("tr");

    for row in rows.unwrap_or_default() {
        table.body.open("tr");
        for column in &columns {
            let cell = row.get(*column).map(display_text).unwrap_or_default();
            table.body.element("td", &cell);
        }
        table.body.close("tr");
    }
}
