//! Recording detail, copy buttons and pattern generation.

use super::{Console, LOAD_FAILED_MESSAGE, PATTERNS_FAILED_MESSAGE, PATTERNS_MISSING_MESSAGE, Surface};
use crate::api::RecordingsBackend;
use crate::dropdown::DropdownKind;
use crate::feedback::CopyTarget;
use crate::error::Result;
use crate::model::{DetailResponse, PatternRequest, RecordingId};
use crate::state::RequestToken;
use crate::view::{TranscriptView, ViewPatch, render_pattern_results};

/// A detail load that has been issued but not yet completed
#[derive(Debug, Clone)]
pub struct PendingDetail {
    pub token: RequestToken,
    pub id: RecordingId,
}

impl<B: RecordingsBackend> Console<B> {
    pub(super) async fn load_recording(
        &mut self,
        id: RecordingId,
        surface: &mut dyn Surface,
    ) -> Vec<ViewPatch> {
        let pending = self.begin_detail_load(id);
        let result = self.backend.details(&pending.id).await;
        self.complete_detail_load(pending, result, surface)
    }

    /// Issue a detail load for a recording row
    pub fn begin_detail_load(&mut self, id: RecordingId) -> PendingDetail {
        PendingDetail {
            token: self.state.detail_requests.issue(),
            id,
        }
    }

    /// Show a completed detail load.
    ///
    /// Completions of superseded loads are dropped without touching the view
    /// or the selection.
    pub fn complete_detail_load(
        &mut self,
        pending: PendingDetail,
        result: Result<DetailResponse>,
        surface: &mut dyn Surface,
    ) -> Vec<ViewPatch> {
        let PendingDetail { token, id } = pending;
        if !self.state.detail_requests.is_current(token) {
            crate::verbose!("Dropping stale detail response for {}", id);
            return Vec::new();
        }

        match result {
            Ok(detail) => {
                let patches = vec![
                    ViewPatch::PlayerSource(self.backend.stream_url(&id)),
                    ViewPatch::Transcript(TranscriptView::from_transcript(
                        detail.transcript.as_deref(),
                    )),
                    ViewPatch::ShowPatternSection,
                ];
                self.selected = Some(id);
                self.apply(patches)
            }
            Err(e) => {
                crate::failure!(format!("Failed to load recording {id}"), e);
                surface.alert(LOAD_FAILED_MESSAGE);
                Vec::new()
            }
        }
    }

    /// Text a copy button would put on the clipboard, if any
    fn copy_text(&self, target: CopyTarget) -> Option<String> {
        match target {
            CopyTarget::Transcript => self
                .view
                .transcript
                .as_ref()
                .and_then(TranscriptView::usable_text)
                .map(str::to_string),
            CopyTarget::PatternResults => self
                .view
                .pattern_results
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string),
        }
    }

    pub(super) fn copy(&mut self, target: CopyTarget, surface: &mut dyn Surface) -> Vec<ViewPatch> {
        let Some(text) = self.copy_text(target) else {
            surface.alert(target.empty_message());
            return Vec::new();
        };

        if let Err(e) = surface.write_clipboard(&text) {
            crate::failure!("Failed to copy", e);
            surface.alert(target.failure_message());
            return Vec::new();
        }

        self.apply(vec![ViewPatch::CopyFeedback(target)])
    }

    pub(super) async fn generate_patterns(&mut self, surface: &mut dyn Surface) -> Vec<ViewPatch> {
        let transcript = self
            .view
            .transcript
            .as_ref()
            .and_then(TranscriptView::usable_text)
            .map(str::to_string);
        let patterns = self.dropdowns.selected(DropdownKind::Pattern);

        let Some(transcript) = transcript.filter(|_| !patterns.is_empty()) else {
            surface.alert(PATTERNS_MISSING_MESSAGE);
            return Vec::new();
        };

        let request = PatternRequest {
            transcript,
            patterns,
        };
        match self.backend.generate_patterns(&request).await {
            Ok(response) => {
                let rendered = render_pattern_results(&response.results);
                self.apply(vec![ViewPatch::PatternResults(rendered)])
            }
            Err(e) => {
                crate::failure!("Failed to generate patterns", e);
                surface.alert(PATTERNS_FAILED_MESSAGE);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Call, FakeBackend, ScriptedSurface, console};
    use super::super::{Action, Console, RowTarget};
    use super::*;
    use crate::error::ConsoleError;
    use crate::feedback::{ButtonIcon, SUCCESS_COLOR};
    use crate::view::NO_TRANSCRIPT;
    use std::time::Instant;

    fn backend_with_transcript(transcript: Option<&str>) -> FakeBackend {
        let backend = FakeBackend::new();
        backend.set_detail(Some(DetailResponse {
            transcript: transcript.map(str::to_string),
        }));
        backend
    }

    async fn open(
        console: &mut Console<FakeBackend>,
        surface: &mut ScriptedSurface,
        id: &str,
    ) -> Vec<ViewPatch> {
        console
            .dispatch(
                Action::RowClicked {
                    id: RecordingId::new(id),
                    target: RowTarget::Body,
                },
                surface,
            )
            .await
    }

    async fn check_pattern(console: &mut Console<FakeBackend>, surface: &mut ScriptedSurface) {
        console
            .dispatch(
                Action::SetOption {
                    kind: DropdownKind::Pattern,
                    value: "summary".to_string(),
                    checked: true,
                },
                surface,
            )
            .await;
    }

    #[tokio::test]
    async fn test_row_click_loads_detail_once() {
        let mut console = console(backend_with_transcript(Some("hello")));
        let mut surface = ScriptedSurface::default();

        open(&mut console, &mut surface, "42").await;

        assert_eq!(
            console.backend().calls(),
            vec![Call::Details(RecordingId::new("42"))]
        );
        assert!(surface.confirms.is_empty());
        let view = console.view();
        assert_eq!(view.player_source.as_deref(), Some("/serve-audio/42"));
        assert_eq!(view.transcript_text(), Some("hello"));
        assert!(view.copy_transcript_visible());
        assert!(view.pattern_section_visible);
        assert_eq!(console.selected(), Some(&RecordingId::new("42")));
    }

    #[tokio::test]
    async fn test_stale_detail_response_is_dropped() {
        let mut console = console(FakeBackend::new());
        let mut surface = ScriptedSurface::default();

        let slow = console.begin_detail_load(RecordingId::new("1"));
        let fast = console.begin_detail_load(RecordingId::new("2"));

        let applied = console.complete_detail_load(
            fast,
            Ok(DetailResponse {
                transcript: Some("second".to_string()),
            }),
            &mut surface,
        );
        assert_eq!(applied.len(), 3);

        let dropped = console.complete_detail_load(
            slow,
            Ok(DetailResponse {
                transcript: Some("first".to_string()),
            }),
            &mut surface,
        );
        assert!(dropped.is_empty());
        assert_eq!(console.view().transcript_text(), Some("second"));
        assert_eq!(console.view().player_source.as_deref(), Some("/serve-audio/2"));
        assert_eq!(console.selected(), Some(&RecordingId::new("2")));

        // a stale failure stays silent too
        let older = console.begin_detail_load(RecordingId::new("3"));
        let newest = console.begin_detail_load(RecordingId::new("4"));
        console.complete_detail_load(
            older,
            Err(ConsoleError::InvalidResponse("late".to_string())),
            &mut surface,
        );
        assert!(surface.alerts.is_empty());
        console.complete_detail_load(
            newest,
            Ok(DetailResponse { transcript: None }),
            &mut surface,
        );
        assert_eq!(console.selected(), Some(&RecordingId::new("4")));
    }

    #[tokio::test]
    async fn test_missing_transcript_shows_placeholder() {
        let mut console = console(backend_with_transcript(None));
        let mut surface = ScriptedSurface::default();

        open(&mut console, &mut surface, "9").await;

        assert_eq!(console.view().transcript_text(), Some(NO_TRANSCRIPT));
        assert!(!console.view().copy_transcript_visible());
        assert!(console.view().pattern_section_visible);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_detail() {
        let backend = backend_with_transcript(Some("first"));
        let mut console = console(backend);
        let mut surface = ScriptedSurface::default();
        open(&mut console, &mut surface, "1").await;

        console.backend().set_detail(None);
        let patches = open(&mut console, &mut surface, "2").await;

        assert!(patches.is_empty());
        assert_eq!(surface.alerts, vec![LOAD_FAILED_MESSAGE.to_string()]);
        assert_eq!(console.view().transcript_text(), Some("first"));
        assert_eq!(console.selected(), Some(&RecordingId::new("1")));
    }

    #[tokio::test]
    async fn test_copy_placeholder_never_touches_clipboard() {
        let mut console = console(backend_with_transcript(Some("")));
        let mut surface = ScriptedSurface::default();

        // nothing loaded yet
        console.dispatch(Action::CopyTranscript, &mut surface).await;
        open(&mut console, &mut surface, "3").await;
        console.dispatch(Action::CopyTranscript, &mut surface).await;
        console.dispatch(Action::CopyPatternResults, &mut surface).await;

        assert!(surface.clipboard.is_empty());
        assert_eq!(
            surface.alerts,
            vec![
                CopyTarget::Transcript.empty_message().to_string(),
                CopyTarget::Transcript.empty_message().to_string(),
                CopyTarget::PatternResults.empty_message().to_string(),
            ]
        );
        assert!(console.view().feedback.is_empty());
    }

    #[tokio::test]
    async fn test_copy_transcript_shows_feedback() {
        let mut console = console(backend_with_transcript(Some("Speaker A: hi")));
        let mut surface = ScriptedSurface::default();
        open(&mut console, &mut surface, "5").await;

        let patches = console.dispatch(Action::CopyTranscript, &mut surface).await;

        assert_eq!(patches, vec![ViewPatch::CopyFeedback(CopyTarget::Transcript)]);
        assert_eq!(surface.clipboard, vec!["Speaker A: hi".to_string()]);
        let feedback = &console.view().feedback[&CopyTarget::Transcript];
        let now = Instant::now();
        assert_eq!(feedback.message(), "Transcript copied!");
        assert_eq!(feedback.button_icon(now), ButtonIcon::Check);
        assert_eq!(feedback.button_color(now), Some(SUCCESS_COLOR));
    }

    #[tokio::test]
    async fn test_clipboard_failure_alerts_without_feedback() {
        let mut console = console(backend_with_transcript(Some("text")));
        let mut surface = ScriptedSurface {
            clipboard_fails: true,
            ..ScriptedSurface::default()
        };
        open(&mut console, &mut surface, "5").await;

        let patches = console.dispatch(Action::CopyTranscript, &mut surface).await;

        assert!(patches.is_empty());
        assert_eq!(
            surface.alerts,
            vec![CopyTarget::Transcript.failure_message().to_string()]
        );
        assert!(console.view().feedback.is_empty());
    }

    #[tokio::test]
    async fn test_generate_patterns_renders_results() {
        let backend = backend_with_transcript(Some("hello"));
        backend.set_patterns(Some(serde_json::json!({"summary": "greeting"})));
        let mut console = console(backend);
        let mut surface = ScriptedSurface::default();
        open(&mut console, &mut surface, "1").await;
        check_pattern(&mut console, &mut surface).await;

        console.dispatch(Action::GeneratePatterns, &mut surface).await;

        assert!(console.backend().calls().contains(&Call::Patterns(PatternRequest {
            transcript: "hello".to_string(),
            patterns: vec!["summary".to_string()],
        })));
        assert_eq!(
            console.view().pattern_results.as_deref(),
            Some("{\n  \"summary\": \"greeting\"\n}")
        );

        console.dispatch(Action::CopyPatternResults, &mut surface).await;
        assert_eq!(surface.clipboard.len(), 1);
        assert!(surface.clipboard[0].contains("greeting"));
    }

    #[tokio::test]
    async fn test_generate_patterns_requires_transcript_and_pattern() {
        let backend = backend_with_transcript(None);
        backend.set_patterns(Some(serde_json::json!({})));
        let mut console = console(backend);
        let mut surface = ScriptedSurface::default();

        // transcript but no pattern
        console.backend().set_detail(Some(DetailResponse {
            transcript: Some("hello".to_string()),
        }));
        open(&mut console, &mut surface, "1").await;
        console.dispatch(Action::GeneratePatterns, &mut surface).await;

        // pattern but only the placeholder
        console.backend().set_detail(Some(DetailResponse { transcript: None }));
        open(&mut console, &mut surface, "2").await;
        check_pattern(&mut console, &mut surface).await;
        console.dispatch(Action::GeneratePatterns, &mut surface).await;

        assert_eq!(
            surface.alerts,
            vec![
                PATTERNS_MISSING_MESSAGE.to_string(),
                PATTERNS_MISSING_MESSAGE.to_string()
            ]
        );
        assert!(!console
            .backend()
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Patterns(_))));
    }

    #[tokio::test]
    async fn test_generate_patterns_failure_keeps_panel() {
        let backend = backend_with_transcript(Some("hello"));
        backend.set_patterns(None);
        let mut console = console(backend);
        let mut surface = ScriptedSurface::default();
        open(&mut console, &mut surface, "1").await;
        check_pattern(&mut console, &mut surface).await;

        console.dispatch(Action::GeneratePatterns, &mut surface).await;

        assert_eq!(surface.alerts, vec![PATTERNS_FAILED_MESSAGE.to_string()]);
        assert_eq!(console.view().pattern_results, None);
    }
}
