use anyhow::Result;
use tapedeck_core::{Action, DropdownKind};

use super::check_options;
use crate::{app, render, ui};

pub async fn run(
    server: Option<&str>,
    page: u32,
    departments: Vec<String>,
    languages: Vec<String>,
    filename: Option<String>,
) -> Result<()> {
    let mut console = app::connect(server);
    let mut surface = ui::TerminalSurface::default();

    check_options(&mut console, &mut surface, DropdownKind::DepartmentFilter, &departments).await;
    check_options(&mut console, &mut surface, DropdownKind::LanguageFilter, &languages).await;
    if let Some(filename) = filename {
        console
            .dispatch(Action::SetFilenameSearch(filename), &mut surface)
            .await;
    }
    console.dispatch(Action::SubmitFilters, &mut surface).await;

    while console.state().cursor.page() < page {
        if !console.view().pagination.next_enabled {
            ui::info(&format!(
                "No page {page}; showing page {}",
                console.state().cursor.page()
            ));
            break;
        }
        console.dispatch(Action::NextPage, &mut surface).await;
    }

    ui::header(&format!("Recordings (page {})", console.state().cursor.page()));
    render::filters(console.view(), console.filename_input());
    println!();
    render::list(console.view());
    println!();
    render::pagination(console.view());

    Ok(())
}
