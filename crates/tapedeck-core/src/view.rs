//! Rendering: console state and backend responses in, view patches out.
//!
//! The front-end owns no logic. It renders a [`View`] snapshot, and every
//! console action returns the [`ViewPatch`]es it applied to that snapshot.

use std::collections::HashMap;
use std::time::Instant;

use crate::dropdown::DropdownKind;
use crate::feedback::{CopyFeedback, CopyTarget};
use crate::model::{ListResponse, Recording, RecordingId};

pub const NO_RECORDINGS: &str = "No recordings found.";
pub const LIST_ERROR: &str = "Error loading recordings.";
pub const NO_TRANSCRIPT: &str = "No transcript available.";

/// One rendered recording row
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingRow {
    pub id: RecordingId,
    pub filename: String,
    /// Seconds with two decimals, e.g. `"12.35"`
    pub duration: String,
    pub department: String,
    pub language: String,
}

impl RecordingRow {
    pub fn from_recording(recording: &Recording) -> Self {
        Self {
            id: recording.id.clone(),
            filename: recording.original_filename.clone(),
            duration: format_seconds(recording.duration),
            department: recording.department.clone(),
            language: recording.language.clone(),
        }
    }

    /// `"name.mp3 (12.35 seconds)"`
    pub fn title(&self) -> String {
        format!("{} ({} seconds)", self.filename, self.duration)
    }

    /// `"Department: Sales, Language: en"`
    pub fn details(&self) -> String {
        format!(
            "Department: {}, Language: {}",
            self.department, self.language
        )
    }
}

/// Contents of the recordings list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListView {
    /// Nothing fetched yet
    #[default]
    Loading,
    Rows(Vec<RecordingRow>),
    Empty,
    Error,
}

impl ListView {
    /// Placeholder text for the single-row states
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListView::Empty => Some(NO_RECORDINGS),
            ListView::Error => Some(LIST_ERROR),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[RecordingRow] {
        match self {
            ListView::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Number of visible list entries, placeholders included
    pub fn entry_count(&self) -> usize {
        match self {
            ListView::Loading => 0,
            ListView::Rows(rows) => rows.len(),
            ListView::Empty | ListView::Error => 1,
        }
    }
}

/// Enabled state of the pagination buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// Transcript panel contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptView {
    Text(String),
    Placeholder,
}

impl TranscriptView {
    pub fn from_transcript(transcript: Option<&str>) -> Self {
        match transcript {
            Some(text) if !text.is_empty() => TranscriptView::Text(text.to_string()),
            _ => TranscriptView::Placeholder,
        }
    }

    /// Displayed text, placeholder included
    pub fn text(&self) -> &str {
        match self {
            TranscriptView::Text(text) => text,
            TranscriptView::Placeholder => NO_TRANSCRIPT,
        }
    }

    /// The copy-transcript button is hidden for the placeholder
    pub fn copy_visible(&self) -> bool {
        matches!(self, TranscriptView::Text(_))
    }

    /// Transcript text usable for copying and pattern generation
    pub fn usable_text(&self) -> Option<&str> {
        match self {
            TranscriptView::Text(text) if !text.is_empty() && text != NO_TRANSCRIPT => {
                Some(text.as_str())
            }
            _ => None,
        }
    }
}

/// A single change to the rendered view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPatch {
    List(ListView),
    Pagination(Pagination),
    /// Point the player at a stream URL and reload it
    PlayerSource(String),
    Transcript(TranscriptView),
    ShowPatternSection,
    /// Pretty-printed pattern results, revealed
    PatternResults(String),
    DropdownLabel { kind: DropdownKind, label: String },
    DropdownOpen(Option<DropdownKind>),
    FilenameSearch(String),
    UploadFormReset,
    CopyFeedback(CopyTarget),
}

/// Rendered snapshot of the whole console
#[derive(Debug, Clone, Default)]
pub struct View {
    pub list: ListView,
    pub pagination: Pagination,
    pub player_source: Option<String>,
    pub transcript: Option<TranscriptView>,
    pub pattern_section_visible: bool,
    pub pattern_results: Option<String>,
    pub labels: HashMap<DropdownKind, String>,
    pub open_dropdown: Option<DropdownKind>,
    pub filename_search: String,
    pub feedback: HashMap<CopyTarget, CopyFeedback>,
}

impl View {
    pub fn apply(&mut self, patch: &ViewPatch, now: Instant) {
        match patch {
            ViewPatch::List(list) => self.list = list.clone(),
            ViewPatch::Pagination(pagination) => self.pagination = *pagination,
            ViewPatch::PlayerSource(url) => self.player_source = Some(url.clone()),
            ViewPatch::Transcript(transcript) => self.transcript = Some(transcript.clone()),
            ViewPatch::ShowPatternSection => self.pattern_section_visible = true,
            ViewPatch::PatternResults(text) => self.pattern_results = Some(text.clone()),
            ViewPatch::DropdownLabel { kind, label } => {
                self.labels.insert(*kind, label.clone());
            }
            ViewPatch::DropdownOpen(kind) => self.open_dropdown = *kind,
            ViewPatch::FilenameSearch(text) => self.filename_search = text.clone(),
            ViewPatch::UploadFormReset => {}
            ViewPatch::CopyFeedback(target) => {
                self.feedback
                    .insert(*target, CopyFeedback::start(*target, now));
            }
        }
    }

    /// Drop feedback whose popup has finished fading
    pub fn tick(&mut self, now: Instant) {
        self.feedback.retain(|_, f| !f.is_finished(now));
    }

    pub fn label(&self, kind: DropdownKind) -> &str {
        self.labels
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_label())
    }

    pub fn transcript_text(&self) -> Option<&str> {
        self.transcript.as_ref().map(TranscriptView::text)
    }

    pub fn copy_transcript_visible(&self) -> bool {
        self.transcript
            .as_ref()
            .is_some_and(TranscriptView::copy_visible)
    }
}

/// Seconds with two decimals, rounding exact halves away from zero.
///
/// `{:.2}` rounds a value sitting exactly between two hundredths (3.125) to the
/// even digit; durations are shown rounded up instead (3.13).
pub fn format_seconds(seconds: f64) -> String {
    // A tie at two decimals is exactly an odd number of eighths
    let eighths = seconds * 8.0;
    if eighths.abs() < 1e15 && eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let hundredths = (eighths * 25.0 + eighths.signum()) / 2.0;
        return format!("{:.2}", hundredths / 100.0);
    }
    format!("{:.2}", seconds)
}

/// Render a list response into the list contents and pagination state
pub fn render_list(response: &ListResponse) -> (ListView, Pagination) {
    let list = if response.recordings.is_empty() {
        ListView::Empty
    } else {
        ListView::Rows(
            response
                .recordings
                .iter()
                .map(RecordingRow::from_recording)
                .collect(),
        )
    };

    let pagination = Pagination {
        previous_enabled: response.has_previous,
        next_enabled: response.has_next,
    };

    (list, pagination)
}

/// Pattern results as two-space indented JSON
pub fn render_pattern_results(results: &serde_json::Value) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| results.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(id: &str, duration: f64) -> Recording {
        Recording {
            id: RecordingId::new(id),
            original_filename: format!("{id}.mp3"),
            duration,
            department: "Sales".to_string(),
            language: "en".to_string(),
            transcript: None,
        }
    }

    #[test]
    fn test_empty_response_renders_one_placeholder() {
        let (list, pagination) = render_list(&ListResponse::default());
        assert_eq!(list, ListView::Empty);
        assert_eq!(list.entry_count(), 1);
        assert_eq!(list.placeholder(), Some(NO_RECORDINGS));
        assert!(!pagination.previous_enabled);
        assert!(!pagination.next_enabled);
    }

    #[test]
    fn test_rows_and_pagination_follow_response() {
        let response = ListResponse {
            recordings: vec![recording("1", 12.345), recording("2", 3.0)],
            has_previous: true,
            has_next: false,
        };
        let (list, pagination) = render_list(&response);

        let rows = list.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].duration, "12.35");
        assert_eq!(rows[1].title(), "2.mp3 (3.00 seconds)");
        assert_eq!(rows[1].details(), "Department: Sales, Language: en");
        assert!(pagination.previous_enabled);
        assert!(!pagination.next_enabled);
    }

    #[test]
    fn test_duration_halves_round_up() {
        let response = ListResponse {
            recordings: vec![
                recording("a", 3.125),
                recording("b", 10.625),
                recording("c", 12.345),
                recording("d", 0.125),
                recording("e", 7.0),
            ],
            has_previous: false,
            has_next: false,
        };
        let (list, _) = render_list(&response);

        let durations: Vec<&str> = list.rows().iter().map(|r| r.duration.as_str()).collect();
        assert_eq!(durations, vec!["3.13", "10.63", "12.35", "0.13", "7.00"]);
        assert_eq!(format_seconds(-3.125), "-3.13");
        assert_eq!(format_seconds(2.675), "2.67");
    }

    #[test]
    fn test_transcript_placeholder_hides_copy() {
        let missing = TranscriptView::from_transcript(None);
        let empty = TranscriptView::from_transcript(Some(""));
        let text = TranscriptView::from_transcript(Some("Speaker A: hi"));

        assert_eq!(missing, TranscriptView::Placeholder);
        assert_eq!(empty.text(), NO_TRANSCRIPT);
        assert!(!empty.copy_visible());
        assert_eq!(empty.usable_text(), None);
        assert!(text.copy_visible());
        assert_eq!(text.usable_text(), Some("Speaker A: hi"));
    }

    #[test]
    fn test_pattern_results_pretty_printed() {
        let value = serde_json::json!({"summary": "short"});
        assert_eq!(
            render_pattern_results(&value),
            "{\n  \"summary\": \"short\"\n}"
        );
    }

    #[test]
    fn test_default_labels() {
        let view = View::default();
        assert_eq!(view.label(DropdownKind::Pattern), "Select Patterns");
        assert!(!view.copy_transcript_visible());
    }
}
