use anyhow::Result;
use tapedeck_core::{Action, RecordingId, RowTarget};

use crate::{app, ui};

pub async fn run(server: Option<&str>, id: &str, yes: bool) -> Result<()> {
    let mut console = app::connect(server);
    let mut surface = ui::TerminalSurface { assume_yes: yes };

    console
        .dispatch(
            Action::RowClicked {
                id: RecordingId::from(id),
                target: RowTarget::DeleteControl,
            },
            &mut surface,
        )
        .await;

    Ok(())
}
