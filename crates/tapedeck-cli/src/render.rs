//! Terminal rendering of the console view.

use console::style;
use std::time::Instant;
use tapedeck_core::feedback::{ButtonIcon, PopupPhase};
use tapedeck_core::{CopyTarget, DropdownKind, ListView, View};

/// Recording rows, or the single placeholder row
pub fn list(view: &View) {
    match &view.list {
        ListView::Loading => println!("  {}", style("Loading...").dim()),
        ListView::Rows(rows) => {
            for row in rows {
                println!(
                    "  {} {}  {}",
                    style(format!("[{}]", row.id)).dim(),
                    style(row.title()).bold(),
                    row.details()
                );
            }
        }
        placeholder => {
            if let Some(text) = placeholder.placeholder() {
                println!("  {}", style(text).italic());
            }
        }
    }
}

pub fn pagination(view: &View) {
    let button = |label: &str, enabled: bool| {
        if enabled {
            style(label.to_string()).cyan().to_string()
        } else {
            style(label.to_string()).dim().to_string()
        }
    };
    println!(
        "  {}  {}",
        button("< Previous", view.pagination.previous_enabled),
        button("Next >", view.pagination.next_enabled)
    );
}

/// Dropdown labels of the filter form
pub fn filters(view: &View, filename: &str) {
    println!(
        "  Department: {}  Language: {}  Filename: {}",
        view.label(DropdownKind::DepartmentFilter),
        view.label(DropdownKind::LanguageFilter),
        if filename.is_empty() { "-" } else { filename }
    );
}

/// Player source, transcript and pattern panels of the selected recording
pub fn detail(view: &View) {
    let now = Instant::now();

    if let Some(url) = &view.player_source {
        println!("{} {}", style("Stream:").bold(), url);
    }

    if let Some(text) = view.transcript_text() {
        let copy = if view.copy_transcript_visible() {
            copy_button(view, CopyTarget::Transcript, now)
        } else {
            String::new()
        };
        println!("{} {}", style("Transcript:").bold(), copy);
        println!("{text}");
    }

    if let Some(results) = &view.pattern_results {
        println!();
        println!(
            "{} {}",
            style("Pattern results:").bold(),
            copy_button(view, CopyTarget::PatternResults, now)
        );
        println!("{results}");
    }
}

/// Copy button text, showing the check mark while feedback is active
fn copy_button(view: &View, target: CopyTarget, now: Instant) -> String {
    match view.feedback.get(&target) {
        Some(feedback) if feedback.button_icon(now) == ButtonIcon::Check => {
            style("[✓]").green().to_string()
        }
        _ => style("[copy]").dim().to_string(),
    }
}

/// Popup line for a copy that just succeeded
pub fn copy_popup(view: &View, target: CopyTarget) {
    if let Some(feedback) = view.feedback.get(&target)
        && feedback.popup(Instant::now()) != PopupPhase::Hidden
    {
        println!("{} {}", style("✓").green().bold(), feedback.message());
    }
}
