//! Reply keyboard layout.
//!
//! The menu is plain data: rows of labelled actions. The Telegram layer turns
//! it into a keyboard, and incoming button presses are matched back by label.

/// What a menu button asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Balance,
    CurrencyRates,
    TodayStatement,
}

/// One button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Keyboard rows, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    rows: Vec<Vec<MenuItem>>,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new(vec![
            vec![
                MenuItem::new("💵 Balance", MenuAction::Balance),
                MenuItem::new("❓ Currency rates", MenuAction::CurrencyRates),
            ],
            vec![MenuItem::new("🧾 Today's statement 💰", MenuAction::TodayStatement)],
        ])
    }
}

impl Menu {
    pub fn new(rows: Vec<Vec<MenuItem>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<MenuItem>] {
        &self.rows
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.rows.iter().flatten()
    }

    /// Action whose label matches `text` exactly (surrounding whitespace ignored).
    pub fn resolve(&self, text: &str) -> Option<MenuAction> {
        let text = text.trim();
        self.items().find(|item| item.label == text).map(|item| item.action)
    }

    /// Label of the first button bound to `action`.
    pub fn label_of(&self, action: MenuAction) -> Option<&str> {
        self.items()
            .find(|item| item.action == action)
            .map(|item| item.label.as_str())
    }
}
