//! Transient "copied" feedback for the copy buttons.
//!
//! After a successful copy the button shows a check mark on a green background
//! and a popup appears. The button reverts after [`FEEDBACK_VISIBLE`]; the popup
//! then fades out over [`POPUP_FADE_OUT`] before it is hidden.

use std::time::{Duration, Instant};

pub const FEEDBACK_VISIBLE: Duration = Duration::from_secs(2);
pub const POPUP_FADE_OUT: Duration = Duration::from_millis(500);

pub const SUCCESS_COLOR: &str = "#28a745";

/// Which copy button a feedback belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyTarget {
    Transcript,
    PatternResults,
}

impl CopyTarget {
    pub fn success_message(&self) -> &'static str {
        match self {
            CopyTarget::Transcript => "Transcript copied!",
            CopyTarget::PatternResults => "Pattern results copied!",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            CopyTarget::Transcript => "No transcript available to copy.",
            CopyTarget::PatternResults => "No pattern results available to copy.",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            CopyTarget::Transcript => "Failed to copy transcript. Please try again.",
            CopyTarget::PatternResults => "Failed to copy pattern results. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIcon {
    Copy,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupPhase {
    Visible,
    FadingOut,
    Hidden,
}

/// One run of copy feedback, anchored at the moment of the copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    pub target: CopyTarget,
    started: Instant,
}

impl CopyFeedback {
    pub fn start(target: CopyTarget, now: Instant) -> Self {
        Self {
            target,
            started: now,
        }
    }

    pub fn message(&self) -> &'static str {
        self.target.success_message()
    }

    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    pub fn button_icon(&self, now: Instant) -> ButtonIcon {
        if self.elapsed(now) < FEEDBACK_VISIBLE {
            ButtonIcon::Check
        } else {
            ButtonIcon::Copy
        }
    }

    /// Background color override; `None` restores the default styling
    pub fn button_color(&self, now: Instant) -> Option<&'static str> {
        match self.button_icon(now) {
            ButtonIcon::Check => Some(SUCCESS_COLOR),
            ButtonIcon::Copy => None,
        }
    }

    pub fn popup(&self, now: Instant) -> PopupPhase {
        let elapsed = self.elapsed(now);
        if elapsed < FEEDBACK_VISIBLE {
            PopupPhase::Visible
        } else if elapsed < FEEDBACK_VISIBLE + POPUP_FADE_OUT {
            PopupPhase::FadingOut
        } else {
            PopupPhase::Hidden
        }
    }

    /// Whole feedback finished; the console drops it on the next tick
    pub fn is_finished(&self, now: Instant) -> bool {
        self.popup(now) == PopupPhase::Hidden
    }

    /// Total time from copy until the popup is gone
    pub fn total_duration() -> Duration {
        FEEDBACK_VISIBLE + POPUP_FADE_OUT
    }
}
