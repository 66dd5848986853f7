//! Interactive prompt helpers using dialoguer
//!
//! Also provides the terminal [`Surface`] the console uses for alerts,
//! confirmations and clipboard writes.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
use tapedeck_core::{ConsoleError, Surface};

/// Get the shared theme for all prompts
pub fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Select from a list of options with arrow keys
pub fn select<T: std::fmt::Display>(
    prompt: &str,
    items: &[T],
    default: Option<usize>,
) -> Result<usize> {
    let theme = theme();
    let mut select = Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(items);

    if let Some(idx) = default {
        select = select.default(idx);
    }

    Ok(select.interact()?)
}

/// Check any number of options; returns the indices left checked
pub fn multi_select<T: std::fmt::Display>(
    prompt: &str,
    items: &[T],
    checked: &[bool],
) -> Result<Vec<usize>> {
    let theme = theme();
    Ok(MultiSelect::with_theme(&theme)
        .with_prompt(prompt)
        .items(items)
        .defaults(checked)
        .interact()?)
}

/// Confirm yes/no with default
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    let theme = theme();
    Ok(Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Get text input; an empty answer is allowed
pub fn input(prompt: &str, default: Option<&str>) -> Result<String> {
    let theme = theme();
    let mut input = Input::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(d) = default {
        input = input.default(d.to_string());
    }

    Ok(input.interact_text()?)
}

/// Print a styled header
pub fn header(text: &str) {
    println!();
    println!("{}", style(text).bold().cyan());
    println!();
}

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

/// Print an error message
pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

/// Print an info message
pub fn info(text: &str) {
    println!("{} {}", style("ℹ").blue(), text);
}

/// Alerts and prompts on the terminal, clipboard through the system
#[derive(Debug, Default)]
pub struct TerminalSurface {
    /// Answer every confirmation with yes (`--yes`)
    pub assume_yes: bool,
}

impl Surface for TerminalSurface {
    fn alert(&mut self, message: &str) {
        info(message);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        confirm(prompt, false).unwrap_or_else(|e| {
            tapedeck_core::verbose!("Confirmation prompt failed: {}", e);
            false
        })
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ConsoleError> {
        tapedeck_core::copy_to_clipboard(text)
    }
}
