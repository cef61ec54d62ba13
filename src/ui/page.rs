// LogTriage - ui/page.rs
//
// Assembles the view model into a standalone HTML page. Every region of
// the viewer is emitted, hidden ones with the `hidden` class, so the page
// reflects exactly the state the workflows left behind.

use crate::app::state::Session;
use crate::app::view::ViewModel;
use crate::core::markup::Markup;
use crate::ui::theme;
use crate::util::constants;
use chrono::{DateTime, Local};

/// Render the whole viewer as an HTML document.
pub fn render_page(view: &ViewModel, session: &Session, generated_at: DateTime<Local>) -> String {
    let mut page = Markup::new();
    page.static_raw("<!DOCTYPE html>")
        .open_with("html", &[("lang", "en")])
        .open("head")
        .void("meta", &[("charset", "utf-8")])
        .element("title", &format!("{} report", constants::APP_NAME))
        .open("style")
        .static_raw(theme::STYLESHEET)
        .close("style")
        .close("head")
        .open("body");

    header(&mut page, view, session);
    progress(&mut page, view);
    report(&mut page, view, session);

    page.open("footer")
        .text(&format!(
            "Generated by {} v{} at {}",
            constants::APP_NAME,
            constants::APP_VERSION,
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ))
        .close("footer")
        .close("body")
        .close("html");

    page.into_string()
}

fn class_list(base: &str, hidden: bool) -> String {
    if hidden {
        format!("{base} hidden")
    } else {
        base.to_string()
    }
}

fn header(page: &mut Markup, view: &ViewModel, session: &Session) {
    page.open("header")
        .element("h1", constants::APP_NAME)
        .open_with("div", &[("id", "sysStatus"), ("class", "status")])
        .text(&view.status)
        .close("div")
        .close("header");

    let file_label = match &session.selected_file {
        Some(file) => format!("Selected file: {}", file.name),
        None => "No file selected".to_string(),
    };
    page.open_with("div", &[("id", "fileInput"), ("class", "muted")])
        .text(&file_label)
        .close("div");

    page.open_with(
        "div",
        &[
            ("id", "errorBox"),
            ("class", class_list("error", !view.error.is_visible()).as_str()),
        ],
    )
    .text(view.error.message())
    .close("div");
}

fn progress(page: &mut Markup, view: &ViewModel) {
    let hidden = !view.progress.is_visible();
    let width = format!("width: {}%", view.progress.percent());
    page.open_with(
        "div",
        &[("id", "progressWrap"), ("class", class_list("progress", hidden).as_str())],
    )
    .open_with("div", &[("id", "progressBar"), ("class", "progress-bar"), ("style", width.as_str())])
    .close("div")
    .close("div")
    .open_with(
        "div",
        &[("id", "progressText"), ("class", class_list("muted", hidden).as_str())],
    )
    .text(view.progress.caption())
    .close("div");
}

fn report(page: &mut Markup, view: &ViewModel, session: &Session) {
    let region = &view.report;
    let grade_class = session
        .last_report
        .as_ref()
        .map_or("pill", |r| theme::grade_class(&r.overall_risk_grade));

    page.open_with(
        "section",
        &[("id", "report"), ("class", class_list("report", !region.visible).as_str())],
    )
    .open_with("div", &[("id", "riskPill"), ("class", grade_class)])
    .text(&region.risk_grade)
    .close("div");

    page.element("h2", "Summary")
        .open_with("div", &[("id", "metrics"), ("class", "metrics")])
        .append(&region.metrics)
        .close("div");

    page.open_class("div", "grid");
    for (id, title, fragment) in [
        ("typeCounts", "Attack types", &region.type_counts),
        ("topSrc", "Top source IPs", &region.top_src),
        ("topDst", "Top destination IPs", &region.top_dst),
        ("topPath", "Top URL paths", &region.top_path),
    ] {
        page.open("div")
            .element("h2", title)
            .open_with("div", &[("id", id)])
            .append(fragment)
            .close("div")
            .close("div");
    }
    page.close("div");

    page.element("h2", "High-risk preview")
        .open_with("table", &[("id", "highTable")])
        .open("thead")
        .append(&region.high_table.head)
        .close("thead")
        .open("tbody")
        .append(&region.high_table.body)
        .close("tbody")
        .close("table")
        .close("section");
}
