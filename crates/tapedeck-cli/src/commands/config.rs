use anyhow::{Context, Result};
use tapedeck_core::{Settings, settings::normalize_server_url};

use crate::ui;

pub fn run(server_url: Option<String>, show: bool) -> Result<()> {
    let mut settings = Settings::load();
    let changed = server_url.is_some();

    if let Some(url) = server_url {
        settings.server_url = normalize_server_url(&url)?;
        settings.save().context("Failed to save settings")?;
        ui::success(&format!("Server URL set to {}", settings.server_url));
    }

    if show || !changed {
        ui::header("tapedeck configuration");
        println!("Settings file: {}", Settings::path().display());
        println!();
        println!("{}", serde_json::to_string_pretty(&settings)?);
    }

    Ok(())
}
