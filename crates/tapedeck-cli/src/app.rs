use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::Write;
use std::path::Path;
use tapedeck_core::{Console, HttpBackend, Settings, UploadFile, settings::SERVER_URL_ENV_VAR};

use crate::ui;

/// Settings with the `--server` override applied
pub fn load_settings(server: Option<&str>) -> Settings {
    let mut settings = Settings::load();
    if let Some(url) = server {
        settings.server_url = url.to_string();
    }
    settings
}

/// Build a console against the configured server, exiting on a bad server URL
pub fn connect(server: Option<&str>) -> Console<HttpBackend> {
    let settings = load_settings(server);
    match HttpBackend::from_settings(&settings) {
        Ok(backend) => Console::new(backend, &settings),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("\nSet the server URL with:");
            eprintln!("  tapedeck config --server-url http://localhost:8000\n");
            eprintln!("Or set the {SERVER_URL_ENV_VAR} environment variable.");
            std::process::exit(1);
        }
    }
}

/// Read an audio file from disk for upload
pub async fn read_upload(path: &Path) -> Result<UploadFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("Upload path has no file name")?;
    Ok(UploadFile::new(file_name, data))
}

/// Hand a stream URL to the system player, printing it if that fails
pub fn play(url: &str) {
    match open::that(url) {
        Ok(()) => ui::info(&format!("Playing {url}")),
        Err(e) => {
            tapedeck_core::verbose!("Failed to open player: {}", e);
            ui::error("Could not open a player for the stream.");
            println!("  {url}");
        }
    }
}

pub fn wait_for_enter() -> Result<()> {
    print!("Press Enter to continue...");
    std::io::stdout().flush()?;

    enable_raw_mode()?;
    loop {
        if let Event::Key(key_event) = event::read()?
            && key_event.code == KeyCode::Enter
        {
            break;
        }
    }
    disable_raw_mode()?;

    println!();
    Ok(())
}
