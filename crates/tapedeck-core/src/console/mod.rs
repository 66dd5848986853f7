//! The recordings console: state, dispatcher and rendered view in one place.
//!
//! A front-end turns user input into [`Action`]s and hands them to
//! [`Console::dispatch`] together with a [`Surface`] for alerts, confirmations
//! and clipboard access. Every action returns the view patches it applied; the
//! full snapshot is always available from [`Console::view`].
//!
//! No action ever fails outward: validation problems become alerts before any
//! request is made, backend failures are logged and shown as alerts or
//! placeholder rows, and the console keeps accepting actions afterwards.

mod detail;
mod listing;
mod mutations;
#[cfg(test)]
mod testing;

use std::time::Instant;

use crate::api::RecordingsBackend;
use crate::dropdown::{Dropdown, DropdownKind, DropdownSet};
use crate::error::Result;
use crate::feedback::CopyTarget;
use crate::model::{RecordingId, UploadFile};
use crate::settings::Settings;
use crate::state::ConsoleState;
use crate::view::{View, ViewPatch};

pub use detail::PendingDetail;
pub use listing::PendingList;

pub const SELECT_FILE_MESSAGE: &str = "Please select a file to upload.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload the file. Please try again.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load the recording.";
pub const DELETE_PROMPT: &str = "Do you want to delete the audio file?";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete the file. Please try again.";
pub const PATTERNS_MISSING_MESSAGE: &str =
    "Please ensure there's a transcript and at least one pattern is selected.";
pub const PATTERNS_FAILED_MESSAGE: &str = "Failed to generate patterns. Please try again.";

/// User-facing side effects the console cannot perform itself
pub trait Surface {
    /// Blocking notification
    fn alert(&mut self, message: &str);

    /// Yes/no question; `false` when declined or when no answer could be read
    fn confirm(&mut self, prompt: &str) -> bool;

    fn write_clipboard(&mut self, text: &str) -> Result<()>;
}

/// Where inside a recording row a click landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Body,
    /// The delete control; the click never reaches the row
    DeleteControl,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Re-fetch the current page with the current filters (also the initial load)
    Refresh,
    NextPage,
    PreviousPage,
    ToggleDropdown(DropdownKind),
    SetOption {
        kind: DropdownKind,
        value: String,
        checked: bool,
    },
    ClickOutside,
    SetFilenameSearch(String),
    SubmitFilters,
    ClearFilters,
    SelectUploadFile(Option<UploadFile>),
    SetCreateTranscript(bool),
    SetUploadDepartment(String),
    SubmitUpload,
    RowClicked {
        id: RecordingId,
        target: RowTarget,
    },
    CopyTranscript,
    CopyPatternResults,
    GeneratePatterns,
}

/// Fields of the upload form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadForm {
    pub file: Option<UploadFile>,
    pub create_transcript: bool,
    pub department: String,
}

pub struct Console<B> {
    backend: B,
    state: ConsoleState,
    dropdowns: DropdownSet,
    upload_form: UploadForm,
    default_department: String,
    filename_input: String,
    selected: Option<RecordingId>,
    view: View,
}

impl<B: RecordingsBackend> Console<B> {
    /// Build a console whose dropdown options come from the settings
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self::with_options(
            backend,
            &settings.departments,
            &settings.languages,
            &settings.patterns,
        )
    }

    pub fn with_options(
        backend: B,
        departments: &[String],
        languages: &[String],
        patterns: &[String],
    ) -> Self {
        let dropdowns = DropdownSet::new(vec![
            Dropdown::new(DropdownKind::DepartmentFilter, departments),
            Dropdown::new(DropdownKind::LanguageFilter, languages),
            Dropdown::new(DropdownKind::UploadLanguage, languages),
            Dropdown::new(DropdownKind::Pattern, patterns),
        ]);
        let default_department = departments.first().cloned().unwrap_or_default();

        let mut view = View::default();
        for dropdown in dropdowns.iter() {
            view.labels
                .insert(dropdown.kind(), dropdown.label().to_string());
        }

        Self {
            backend,
            state: ConsoleState::default(),
            dropdowns,
            upload_form: UploadForm {
                department: default_department.clone(),
                ..UploadForm::default()
            },
            default_department,
            filename_input: String::new(),
            selected: None,
            view,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn dropdowns(&self) -> &DropdownSet {
        &self.dropdowns
    }

    pub fn upload_form(&self) -> &UploadForm {
        &self.upload_form
    }

    pub fn filename_input(&self) -> &str {
        &self.filename_input
    }

    /// Recording whose detail is currently shown
    pub fn selected(&self) -> Option<&RecordingId> {
        self.selected.as_ref()
    }

    /// Handle one user action
    pub async fn dispatch(&mut self, action: Action, surface: &mut dyn Surface) -> Vec<ViewPatch> {
        crate::verbose!("dispatch {}", action_name(&action));

        match action {
            Action::Refresh => self.fetch_recordings().await,
            Action::NextPage => self.next_page().await,
            Action::PreviousPage => self.previous_page().await,
            Action::ToggleDropdown(kind) => self.toggle_dropdown(kind),
            Action::SetOption {
                kind,
                value,
                checked,
            } => self.set_option(kind, &value, checked),
            Action::ClickOutside => self.click_outside(),
            Action::SetFilenameSearch(text) => {
                self.filename_input = text.clone();
                self.apply(vec![ViewPatch::FilenameSearch(text)])
            }
            Action::SubmitFilters => self.submit_filters().await,
            Action::ClearFilters => self.clear_filters().await,
            Action::SelectUploadFile(file) => {
                self.upload_form.file = file;
                Vec::new()
            }
            Action::SetCreateTranscript(create) => {
                self.upload_form.create_transcript = create;
                Vec::new()
            }
            Action::SetUploadDepartment(department) => {
                self.upload_form.department = department;
                Vec::new()
            }
            Action::SubmitUpload => self.submit_upload(surface).await,
            Action::RowClicked { id, target } => match target {
                RowTarget::Body => self.load_recording(id, surface).await,
                RowTarget::DeleteControl => self.delete_recording(id, surface).await,
            },
            Action::CopyTranscript => self.copy(CopyTarget::Transcript, surface),
            Action::CopyPatternResults => self.copy(CopyTarget::PatternResults, surface),
            Action::GeneratePatterns => self.generate_patterns(surface).await,
        }
    }

    /// Expire copy feedback that has finished fading
    pub fn tick(&mut self, now: Instant) {
        self.view.tick(now);
    }

    fn apply(&mut self, patches: Vec<ViewPatch>) -> Vec<ViewPatch> {
        let now = Instant::now();
        for patch in &patches {
            self.view.apply(patch, now);
        }
        patches
    }

    fn label_patch(&self, kind: DropdownKind) -> Option<ViewPatch> {
        self.dropdowns.get(kind).map(|d| ViewPatch::DropdownLabel {
            kind,
            label: d.label().to_string(),
        })
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Refresh => "refresh",
        Action::NextPage => "next-page",
        Action::PreviousPage => "previous-page",
        Action::ToggleDropdown(_) => "toggle-dropdown",
        Action::SetOption { .. } => "set-option",
        Action::ClickOutside => "click-outside",
        Action::SetFilenameSearch(_) => "set-filename-search",
        Action::SubmitFilters => "submit-filters",
        Action::ClearFilters => "clear-filters",
        Action::SelectUploadFile(_) => "select-upload-file",
        Action::SetCreateTranscript(_) => "set-create-transcript",
        Action::SetUploadDepartment(_) => "set-upload-department",
        Action::SubmitUpload => "submit-upload",
        Action::RowClicked { .. } => "row-clicked",
        Action::CopyTranscript => "copy-transcript",
        Action::CopyPatternResults => "copy-pattern-results",
        Action::GeneratePatterns => "generate-patterns",
    }
}
