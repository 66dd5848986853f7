//! Upload and delete.

use super::{
    Console, DELETE_FAILED_MESSAGE, DELETE_PROMPT, SELECT_FILE_MESSAGE, Surface,
    UPLOAD_FAILED_MESSAGE, UploadForm,
};
use crate::api::RecordingsBackend;
use crate::dropdown::DropdownKind;
use crate::error::ConsoleError;
use crate::model::{RecordingId, UploadRequest};
use crate::view::ViewPatch;

impl<B: RecordingsBackend> Console<B> {
    pub(super) async fn submit_upload(&mut self, surface: &mut dyn Surface) -> Vec<ViewPatch> {
        let Some(file) = self.upload_form.file.clone() else {
            surface.alert(SELECT_FILE_MESSAGE);
            return Vec::new();
        };

        let request = UploadRequest {
            file,
            create_transcript: self.upload_form.create_transcript,
            department: self.upload_form.department.clone(),
            languages: self.dropdowns.selected(DropdownKind::UploadLanguage),
        };

        match self.backend.upload(request).await {
            Ok(response) => {
                crate::verbose!("Upload finished: {}", response.message);
                surface.alert(&response.message);
            }
            Err(e) => {
                crate::failure!("Upload failed", e);
                surface.alert(upload_failure_message(&e));
            }
        }

        let mut patches = self.fetch_recordings().await;
        patches.extend(self.reset_upload_form());
        patches
    }

    /// Clear the picked file and upload languages, back to the default department
    fn reset_upload_form(&mut self) -> Vec<ViewPatch> {
        if let Some(dropdown) = self.dropdowns.get_mut(DropdownKind::UploadLanguage) {
            dropdown.clear();
        }
        self.upload_form = UploadForm {
            department: self.default_department.clone(),
            ..UploadForm::default()
        };

        let mut patches = vec![ViewPatch::UploadFormReset];
        patches.extend(
            [
                DropdownKind::DepartmentFilter,
                DropdownKind::LanguageFilter,
                DropdownKind::UploadLanguage,
            ]
            .into_iter()
            .filter_map(|kind| self.label_patch(kind)),
        );
        self.apply(patches)
    }

    pub(super) async fn delete_recording(
        &mut self,
        id: RecordingId,
        surface: &mut dyn Surface,
    ) -> Vec<ViewPatch> {
        if !surface.confirm(DELETE_PROMPT) {
            crate::verbose!("Delete of {} declined", id);
            return Vec::new();
        }

        match self.backend.delete(&id).await {
            Ok(response) => {
                surface.alert(&response.message);
                self.fetch_recordings().await
            }
            Err(e) => {
                crate::failure!(format!("Failed to delete recording {id}"), e);
                surface.alert(DELETE_FAILED_MESSAGE);
                Vec::new()
            }
        }
    }
}

/// The server's own explanation for a rejected upload, or the generic alert
fn upload_failure_message(error: &ConsoleError) -> &str {
    match error {
        ConsoleError::Server { status, message }
            if (400..500).contains(status) && !message.trim().is_empty() =>
        {
            message.as_str()
        }
        _ => UPLOAD_FAILED_MESSAGE,
    }
}
