use anyhow::{Context, Result};
use std::path::PathBuf;
use tapedeck_core::{HttpBackend, RecordingId};

use crate::{app, ui};

fn default_destination(id: &RecordingId) -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(format!("recording-{id}.audio"))
}

pub async fn run(server: Option<&str>, id: &str, output: Option<PathBuf>) -> Result<()> {
    let settings = app::load_settings(server);
    let backend = HttpBackend::from_settings(&settings).context("Invalid server URL")?;

    let id = RecordingId::from(id);
    let dest = output.unwrap_or_else(|| default_destination(&id));

    let bytes = backend
        .download_audio(&id, &dest)
        .await
        .with_context(|| format!("Failed to download recording {id}"))?;

    ui::success(&format!("Saved {} bytes to {}", bytes, dest.display()));
    Ok(())
}
