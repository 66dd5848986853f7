//! Multi-select dropdowns.
//!
//! Each dropdown is a trigger with a label plus a menu of checkable options.
//! At most one menu is open at a time; the label is recomputed whenever the
//! menu is toggled or an option changes.

use std::fmt;

/// The dropdowns the console knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownKind {
    DepartmentFilter,
    LanguageFilter,
    UploadLanguage,
    Pattern,
}

impl DropdownKind {
    /// Label shown while nothing is checked
    pub fn default_label(&self) -> &'static str {
        match self {
            DropdownKind::DepartmentFilter => "Select Department",
            DropdownKind::LanguageFilter => "Select Languages",
            DropdownKind::UploadLanguage => "Select Languages",
            DropdownKind::Pattern => "Select Patterns",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DropdownKind::DepartmentFilter => "department-filter",
            DropdownKind::LanguageFilter => "language-filter",
            DropdownKind::UploadLanguage => "upload-language",
            DropdownKind::Pattern => "pattern",
        }
    }

    pub fn all() -> &'static [DropdownKind] {
        &[
            DropdownKind::DepartmentFilter,
            DropdownKind::LanguageFilter,
            DropdownKind::UploadLanguage,
            DropdownKind::Pattern,
        ]
    }
}

impl fmt::Display for DropdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    kind: DropdownKind,
    options: Vec<DropdownOption>,
    open: bool,
    label: String,
}

impl Dropdown {
    pub fn new<S: AsRef<str>>(kind: DropdownKind, values: &[S]) -> Self {
        Self {
            kind,
            options: values
                .iter()
                .map(|v| DropdownOption {
                    value: v.as_ref().to_string(),
                    checked: false,
                })
                .collect(),
            open: false,
            label: kind.default_label().to_string(),
        }
    }

    pub fn kind(&self) -> DropdownKind {
        self.kind
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Checked values, in option order
    pub fn selected(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.value.clone())
            .collect()
    }

    /// Check or uncheck an option. Returns false if no option has that value.
    pub fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        let Some(option) = self.options.iter_mut().find(|o| o.value == value) else {
            return false;
        };
        option.checked = checked;
        self.refresh_label();
        true
    }

    /// Uncheck everything and restore the default label
    pub fn clear(&mut self) {
        for option in &mut self.options {
            option.checked = false;
        }
        self.refresh_label();
    }

    pub fn refresh_label(&mut self) {
        let selected = self.selected();
        self.label = if selected.is_empty() {
            self.kind.default_label().to_string()
        } else {
            selected.join(", ")
        };
    }
}

/// All dropdowns of the console, with mutual exclusion of open menus
#[derive(Debug, Clone, Default)]
pub struct DropdownSet {
    dropdowns: Vec<Dropdown>,
}

impl DropdownSet {
    pub fn new(dropdowns: Vec<Dropdown>) -> Self {
        Self { dropdowns }
    }

    pub fn get(&self, kind: DropdownKind) -> Option<&Dropdown> {
        self.dropdowns.iter().find(|d| d.kind == kind)
    }

    pub fn get_mut(&mut self, kind: DropdownKind) -> Option<&mut Dropdown> {
        self.dropdowns.iter_mut().find(|d| d.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dropdown> {
        self.dropdowns.iter()
    }

    /// Checked values of one dropdown (empty if it is not registered)
    pub fn selected(&self, kind: DropdownKind) -> Vec<String> {
        self.get(kind).map(|d| d.selected()).unwrap_or_default()
    }

    /// Trigger click: close every menu, then flip this one and refresh its label
    pub fn toggle(&mut self, kind: DropdownKind) -> bool {
        let was_open = self.get(kind).is_some_and(|d| d.open);
        self.close_all();
        match self.get_mut(kind) {
            Some(dropdown) => {
                dropdown.open = !was_open;
                dropdown.refresh_label();
                dropdown.open
            }
            None => false,
        }
    }

    /// Click that landed outside every trigger and menu
    pub fn close_all(&mut self) {
        for dropdown in &mut self.dropdowns {
            dropdown.open = false;
        }
    }

    pub fn open_menu(&self) -> Option<DropdownKind> {
        self.dropdowns.iter().find(|d| d.open).map(|d| d.kind)
    }
}
