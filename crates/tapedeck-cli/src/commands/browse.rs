//! Interactive console
//!
//! Redraws the list after every action and offers only the controls that are
//! currently usable (disabled pagination buttons are left out of the menu).

use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tapedeck_core::{
    Action, Console, CopyTarget, DropdownKind, HttpBackend, RecordingId, RowTarget,
};

use crate::{app, render, ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Open,
    Delete,
    Next,
    Previous,
    Filter,
    ClearFilters,
    Upload,
    Detail,
    Play,
    CopyTranscript,
    Patterns,
    CopyPatternResults,
    Refresh,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::Open => "Open recording",
            MenuItem::Delete => "Delete recording",
            MenuItem::Next => "Next page",
            MenuItem::Previous => "Previous page",
            MenuItem::Filter => "Filter",
            MenuItem::ClearFilters => "Clear filters",
            MenuItem::Upload => "Upload",
            MenuItem::Detail => "Show transcript",
            MenuItem::Play => "Play",
            MenuItem::CopyTranscript => "Copy transcript",
            MenuItem::Patterns => "Generate patterns",
            MenuItem::CopyPatternResults => "Copy pattern results",
            MenuItem::Refresh => "Refresh",
            MenuItem::Quit => "Quit",
        };
        write!(f, "{label}")
    }
}

fn menu(console: &Console<HttpBackend>) -> Vec<MenuItem> {
    let view = console.view();
    let has_rows = !view.list.rows().is_empty();
    let selected = console.selected().is_some();

    let mut items = Vec::new();
    if has_rows {
        items.extend([MenuItem::Open, MenuItem::Delete]);
    }
    if view.pagination.next_enabled {
        items.push(MenuItem::Next);
    }
    if view.pagination.previous_enabled {
        items.push(MenuItem::Previous);
    }
    items.extend([MenuItem::Filter, MenuItem::ClearFilters, MenuItem::Upload]);
    if selected {
        items.extend([MenuItem::Detail, MenuItem::Play]);
    }
    if view.copy_transcript_visible() {
        items.push(MenuItem::CopyTranscript);
    }
    if view.pattern_section_visible {
        items.push(MenuItem::Patterns);
    }
    if view.pattern_results.is_some() {
        items.push(MenuItem::CopyPatternResults);
    }
    items.extend([MenuItem::Refresh, MenuItem::Quit]);
    items
}

fn draw(console: &Console<HttpBackend>) {
    let view = console.view();
    ui::header(&format!("Recordings (page {})", console.state().cursor.page()));
    render::filters(view, console.filename_input());
    println!();
    render::list(view);
    println!();
    render::pagination(view);
    if let Some(id) = console.selected() {
        println!();
        println!("  Selected recording: {id}");
    }
    println!();
}

pub async fn run(server: Option<&str>) -> Result<()> {
    let mut console = app::connect(server);
    let mut surface = ui::TerminalSurface::default();

    console.dispatch(Action::Refresh, &mut surface).await;

    loop {
        console.tick(Instant::now());
        draw(&console);

        let items = menu(&console);
        let choice = items[ui::select("Action", &items, Some(0))?];

        match choice {
            MenuItem::Open => {
                if let Some(id) = pick_row(&console, "Open which recording?")? {
                    let target = RowTarget::Body;
                    console
                        .dispatch(Action::RowClicked { id, target }, &mut surface)
                        .await;
                    show_detail(&console)?;
                }
            }
            MenuItem::Delete => {
                if let Some(id) = pick_row(&console, "Delete which recording?")? {
                    let target = RowTarget::DeleteControl;
                    console
                        .dispatch(Action::RowClicked { id, target }, &mut surface)
                        .await;
                }
            }
            MenuItem::Next => {
                console.dispatch(Action::NextPage, &mut surface).await;
            }
            MenuItem::Previous => {
                console.dispatch(Action::PreviousPage, &mut surface).await;
            }
            MenuItem::Filter => filter(&mut console, &mut surface).await?,
            MenuItem::ClearFilters => {
                console.dispatch(Action::ClearFilters, &mut surface).await;
            }
            MenuItem::Upload => upload(&mut console, &mut surface).await?,
            MenuItem::Detail => show_detail(&console)?,
            MenuItem::Play => {
                if let Some(url) = &console.view().player_source {
                    app::play(url);
                }
            }
            MenuItem::CopyTranscript => {
                console.dispatch(Action::CopyTranscript, &mut surface).await;
                render::copy_popup(console.view(), CopyTarget::Transcript);
            }
            MenuItem::Patterns => {
                edit_dropdown(&mut console, &mut surface, DropdownKind::Pattern, "Patterns")
                    .await?;
                let patches = console.dispatch(Action::GeneratePatterns, &mut surface).await;
                if !patches.is_empty() {
                    show_detail(&console)?;
                }
            }
            MenuItem::CopyPatternResults => {
                console
                    .dispatch(Action::CopyPatternResults, &mut surface)
                    .await;
                render::copy_popup(console.view(), CopyTarget::PatternResults);
            }
            MenuItem::Refresh => {
                console.dispatch(Action::Refresh, &mut surface).await;
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}

fn show_detail(console: &Console<HttpBackend>) -> Result<()> {
    if console.selected().is_none() {
        return Ok(());
    }
    println!();
    render::detail(console.view());
    println!();
    app::wait_for_enter()
}

fn pick_row(console: &Console<HttpBackend>, prompt: &str) -> Result<Option<RecordingId>> {
    let rows = console.view().list.rows();
    if rows.is_empty() {
        return Ok(None);
    }
    let titles: Vec<String> = rows.iter().map(|r| r.title()).collect();
    let idx = ui::select(prompt, &titles, Some(0))?;
    Ok(rows.get(idx).map(|r| r.id.clone()))
}

/// Open a dropdown, let the user check options, then close it
async fn edit_dropdown(
    console: &mut Console<HttpBackend>,
    surface: &mut ui::TerminalSurface,
    kind: DropdownKind,
    prompt: &str,
) -> Result<()> {
    console
        .dispatch(Action::ToggleDropdown(kind), surface)
        .await;

    let options = console
        .dropdowns()
        .get(kind)
        .map(|d| d.options().to_vec())
        .unwrap_or_default();
    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    let checked: Vec<bool> = options.iter().map(|o| o.checked).collect();

    let chosen = ui::multi_select(prompt, &values, &checked)?;

    for (idx, option) in options.iter().enumerate() {
        let want = chosen.contains(&idx);
        if want != option.checked {
            let action = Action::SetOption {
                kind,
                value: option.value.clone(),
                checked: want,
            };
            console.dispatch(action, surface).await;
        }
    }

    console.dispatch(Action::ClickOutside, surface).await;
    ui::info(&format!("{}: {}", prompt, console.view().label(kind)));
    Ok(())
}

async fn filter(console: &mut Console<HttpBackend>, surface: &mut ui::TerminalSurface) -> Result<()> {
    edit_dropdown(console, surface, DropdownKind::DepartmentFilter, "Departments").await?;
    edit_dropdown(console, surface, DropdownKind::LanguageFilter, "Languages").await?;

    let current = console.filename_input().to_string();
    let filename = ui::input("Filename contains", Some(&current))?;
    console
        .dispatch(Action::SetFilenameSearch(filename), surface)
        .await;

    console.dispatch(Action::SubmitFilters, surface).await;
    Ok(())
}

async fn upload(console: &mut Console<HttpBackend>, surface: &mut ui::TerminalSurface) -> Result<()> {
    let path = ui::input("Audio file", None)?;
    if path.trim().is_empty() {
        console
            .dispatch(Action::SelectUploadFile(None), surface)
            .await;
        console.dispatch(Action::SubmitUpload, surface).await;
        return Ok(());
    }

    let file = match app::read_upload(Path::new(path.trim())).await {
        Ok(file) => file,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            return Ok(());
        }
    };
    console
        .dispatch(Action::SelectUploadFile(Some(file)), surface)
        .await;

    let departments: Vec<String> = console
        .dropdowns()
        .get(DropdownKind::DepartmentFilter)
        .map(|d| d.options().iter().map(|o| o.value.clone()).collect())
        .unwrap_or_default();
    if !departments.is_empty() {
        let current = &console.upload_form().department;
        let default = departments.iter().position(|d| d == current);
        let idx = ui::select("Department", &departments, default)?;
        console
            .dispatch(Action::SetUploadDepartment(departments[idx].clone()), surface)
            .await;
    }

    edit_dropdown(console, surface, DropdownKind::UploadLanguage, "Languages").await?;

    let create = ui::confirm("Create transcript?", true)?;
    console
        .dispatch(Action::SetCreateTranscript(create), surface)
        .await;

    console.dispatch(Action::SubmitUpload, surface).await;
    Ok(())
}
