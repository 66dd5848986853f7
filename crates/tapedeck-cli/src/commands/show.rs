use anyhow::Result;
use tapedeck_core::{Action, CopyTarget};

use super::open_recording;
use crate::{app, render, ui};

pub async fn run(server: Option<&str>, id: &str, play: bool, copy: bool) -> Result<()> {
    let mut console = app::connect(server);
    let mut surface = ui::TerminalSurface::default();

    open_recording(&mut console, &mut surface, id).await;
    render::detail(console.view());

    if copy {
        console.dispatch(Action::CopyTranscript, &mut surface).await;
        render::copy_popup(console.view(), CopyTarget::Transcript);
    }

    if play && let Some(url) = &console.view().player_source {
        app::play(url);
    }

    Ok(())
}
