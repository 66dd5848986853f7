use anyhow::Result;
use tapedeck_core::{Action, CopyTarget, DropdownKind};

use super::{check_options, open_recording};
use crate::{app, render, ui};

pub async fn run(server: Option<&str>, id: &str, patterns: Vec<String>, copy: bool) -> Result<()> {
    let mut console = app::connect(server);
    let mut surface = ui::TerminalSurface::default();

    open_recording(&mut console, &mut surface, id).await;
    check_options(&mut console, &mut surface, DropdownKind::Pattern, &patterns).await;
    console.dispatch(Action::GeneratePatterns, &mut surface).await;

    let Some(results) = &console.view().pattern_results else {
        std::process::exit(1);
    };
    println!("{results}");

    if copy {
        console.dispatch(Action::CopyPatternResults, &mut surface).await;
        render::copy_popup(console.view(), CopyTarget::PatternResults);
    }

    Ok(())
}
