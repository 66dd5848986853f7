use anyhow::Result;
use std::path::Path;
use tapedeck_core::{Action, DropdownKind};

use super::check_options;
use crate::{app, ui};

pub async fn run(
    server: Option<&str>,
    file: &Path,
    transcript: bool,
    department: Option<String>,
    languages: Vec<String>,
) -> Result<()> {
    let file = app::read_upload(file).await?;
    let mut console = app::connect(server);
    let mut surface = ui::TerminalSurface::default();

    console
        .dispatch(Action::SelectUploadFile(Some(file)), &mut surface)
        .await;
    console
        .dispatch(Action::SetCreateTranscript(transcript), &mut surface)
        .await;
    if let Some(department) = department {
        console
            .dispatch(Action::SetUploadDepartment(department), &mut surface)
            .await;
    }
    check_options(&mut console, &mut surface, DropdownKind::UploadLanguage, &languages).await;

    console.dispatch(Action::SubmitUpload, &mut surface).await;
    Ok(())
}
