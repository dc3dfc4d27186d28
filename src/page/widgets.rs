//! Widget types - plain data plus the transient state enhancements mutate.
//!
//! Nothing here persists past the page: invalid marks, scroll offsets,
//! previews and busy labels are all discarded on navigation.

use crate::enhance::notify::Severity;

// =============================================================================
// PAGE
// =============================================================================

/// A page of widgets rendered by the backend.
#[derive(Debug, Default)]
pub struct Page {
    pub nav: Option<NavMenu>,
    pub forms: Vec<Form>,
    pub tables: Vec<Table>,
    pub stat_cards: Vec<StatCard>,
    /// Status messages the backend rendered with the page. Adopted by the
    /// notifier at init so they get the same lifetime treatment as notices
    /// emitted locally.
    pub server_messages: Vec<ServerMessage>,
}

/// A status message rendered by the backend.
#[derive(Debug, Clone)]
pub struct ServerMessage {
    pub text: String,
    pub severity: Severity,
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// Top navigation menu.
#[derive(Debug)]
pub struct NavMenu {
    pub items: Vec<String>,
    /// Whether the item list is currently shown.
    pub menu_visible: bool,
    /// Present only while the terminal is narrow.
    pub toggle: Option<MenuToggle>,
}

impl NavMenu {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            menu_visible: true,
            toggle: None,
        }
    }
}

/// Collapse/expand control injected before the item list on narrow terminals.
#[derive(Debug, Default)]
pub struct MenuToggle {
    pub expanded: bool,
}

impl MenuToggle {
    pub fn label(&self) -> &'static str {
        if self.expanded { "x Close" } else { "= Menu" }
    }
}

// =============================================================================
// FORMS
// =============================================================================

/// A form the backend rendered; submission goes back to `action`.
#[derive(Debug)]
pub struct Form {
    pub name: String,
    pub action: String,
    pub fields: Vec<Field>,
    pub submit: Option<SubmitButton>,
    pub links: Vec<ActionLink>,
}

impl Form {
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            fields: Vec::new(),
            submit: None,
            links: Vec::new(),
        }
    }
}

/// Input field kinds. File fields carry their preview state inline.
#[derive(Debug)]
pub enum FieldKind {
    Text,
    Search,
    TextArea,
    File(FileState),
}

/// Transient state of a file field.
#[derive(Debug, Default)]
pub struct FileState {
    /// File accepted, preview decode still running.
    pub pending: bool,
    pub preview: Option<Preview>,
}

/// Decoded preview shown under a file field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub file_name: String,
    pub size: u64,
    pub width: u32,
    pub height: u32,
}

/// An input field.
#[derive(Debug)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    pub max_length: Option<usize>,
    /// Set by the form guard, cleared on input or by timer.
    pub invalid: bool,
    /// Tooltip metadata. Carried but not auto-invoked.
    pub title: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            value: String::new(),
            required: false,
            max_length: None,
            invalid: false,
            title: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Append a typed character, honoring the length limit.
    pub fn push_char(&mut self, c: char) {
        if let Some(max) = self.max_length {
            if self.value.chars().count() >= max {
                return;
            }
        }
        self.value.push(c);
    }

    /// Remove the last character.
    pub fn backspace(&mut self) {
        self.value.pop();
    }
}

/// Submit control with busy-state bookkeeping.
#[derive(Debug)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
    /// Original label stashed while the busy indicator is shown.
    pub saved_label: Option<String>,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            saved_label: None,
        }
    }
}

/// A navigation action attached to a form (link or named button).
#[derive(Debug, Clone)]
pub struct ActionLink {
    pub label: String,
    /// Route or action name. Matching is by substring, mirroring the
    /// backend's URL conventions.
    pub target: String,
}

impl ActionLink {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Delete-style action requiring confirmation before navigating.
    pub fn is_destructive(&self) -> bool {
        self.target.contains("excluir") || self.target.contains("delete")
    }

    /// "New record" affordance.
    pub fn is_new_record(&self) -> bool {
        self.target.contains("nova") || self.target.contains("novo")
    }
}

// =============================================================================
// TABLES AND CARDS
// =============================================================================

/// A data table. Wrapping in a scroll container and live filtering are
/// applied by enhancements.
#[derive(Debug)]
pub struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// True once the table sits inside a horizontal-scroll container.
    pub wrapped: bool,
    pub scroll_x: u16,
    /// Live filter term; empty shows everything.
    pub filter: String,
}

impl Table {
    pub fn new(title: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
            wrapped: false,
            scroll_x: 0,
            filter: String::new(),
        }
    }

    /// Indices of rows that match the current filter (case-insensitive
    /// substring over the whole row).
    pub fn visible_rows(&self) -> Vec<usize> {
        if self.filter.is_empty() {
            return (0..self.rows.len()).collect();
        }
        let term = self.filter.to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|cell| cell.to_lowercase().contains(&term)))
            .map(|(i, _)| i)
            .collect()
    }
}

/// A numeric summary card; its text is animated by the count-up enhancement.
#[derive(Debug)]
pub struct StatCard {
    pub label: String,
    pub text: String,
}

impl StatCard {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_push_char_honors_max_length() {
        let mut field =
            Field::new("obs", "Notes", FieldKind::TextArea).with_max_length(3);
        field.push_char('a');
        field.push_char('b');
        field.push_char('c');
        field.push_char('d');
        assert_eq!(field.value, "abc");
    }

    #[test]
    fn test_field_is_blank_trims() {
        let field = Field::new("f", "F", FieldKind::Text).with_value("   ");
        assert!(field.is_blank());
        let field = Field::new("f", "F", FieldKind::Text).with_value(" x ");
        assert!(!field.is_blank());
    }

    #[test]
    fn test_action_link_classification() {
        assert!(ActionLink::new("Delete", "/item/excluir/3").is_destructive());
        assert!(ActionLink::new("Delete", "/item/delete/3").is_destructive());
        assert!(!ActionLink::new("Back", "/itens").is_destructive());
        assert!(ActionLink::new("New", "/item/novo").is_new_record());
        assert!(ActionLink::new("New", "/conferencia/nova").is_new_record());
    }

    #[test]
    fn test_table_filter_case_insensitive() {
        let mut table = Table::new("Items", vec!["Code".into(), "Name".into()]);
        table.rows.push(vec!["1001".into(), "Monitor Dell".into()]);
        table.rows.push(vec!["1002".into(), "Keyboard".into()]);
        table.rows.push(vec!["1003".into(), "Dell Dock".into()]);

        table.filter = "dell".into();
        assert_eq!(table.visible_rows(), vec![0, 2]);

        table.filter.clear();
        assert_eq!(table.visible_rows(), vec![0, 1, 2]);
    }

    #[test]
    fn test_menu_toggle_label() {
        let mut toggle = MenuToggle::default();
        assert_eq!(toggle.label(), "= Menu");
        toggle.expanded = true;
        assert_eq!(toggle.label(), "x Close");
    }
}
