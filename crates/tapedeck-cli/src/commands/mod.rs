pub mod browse;
pub mod config;
pub mod delete;
pub mod download;
pub mod list;
pub mod patterns;
pub mod show;
pub mod upload;

use tapedeck_core::{Action, Console, DropdownKind, HttpBackend, RecordingId, RowTarget, Surface};

use crate::ui;

/// Check the given values in a dropdown, exiting on a value it does not offer
pub async fn check_options(
    console: &mut Console<HttpBackend>,
    surface: &mut dyn Surface,
    kind: DropdownKind,
    values: &[String],
) {
    let offered: Vec<String> = console
        .dropdowns()
        .get(kind)
        .map(|d| d.options().iter().map(|o| o.value.clone()).collect())
        .unwrap_or_default();

    for value in values {
        if !offered.contains(value) {
            ui::error(&format!(
                "Unknown {} option '{}' (available: {})",
                kind,
                value,
                offered.join(", ")
            ));
            std::process::exit(1);
        }
        console
            .dispatch(
                Action::SetOption {
                    kind,
                    value: value.clone(),
                    checked: true,
                },
                surface,
            )
            .await;
    }
}

/// Load a recording's detail, exiting if it could not be loaded
pub async fn open_recording(
    console: &mut Console<HttpBackend>,
    surface: &mut dyn Surface,
    id: &str,
) {
    console
        .dispatch(
            Action::RowClicked {
                id: RecordingId::from(id),
                target: RowTarget::Body,
            },
            surface,
        )
        .await;

    if console.selected().is_none() {
        std::process::exit(1);
    }
}
