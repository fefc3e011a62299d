//! Editing state behind the terminal prompts

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means for the prompt loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep reading keys
    Continue,
    /// Accept the current value
    Confirm,
    /// Abort the prompt
    Cancel,
}

const fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c' | 'd'))
}

/// Filterable single-choice list
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    labels: Vec<String>,
    filter: String,
    selected: usize,
}

impl SelectState {
    /// Create a list over the given option labels
    #[must_use]
    pub const fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            filter: String::new(),
            selected: 0,
        }
    }

    /// Current filter text
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Indices of the options matching the filter, in original order
    #[must_use]
    pub fn filtered(&self) -> Vec<usize> {
        let filter_lower = self.filter.to_lowercase();
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| {
                filter_lower.is_empty() || label.to_lowercase().contains(&filter_lower)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Position of the highlighted option within [`Self::filtered`]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.selected
    }

    /// Select next option in the filtered list
    pub fn select_next(&mut self) {
        let count = self.filtered().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// Select previous option in the filtered list
    pub fn select_prev(&mut self) {
        let count = self.filtered().len();
        if count > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Index into the original options of the highlighted entry
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.filtered().get(self.selected).copied()
    }

    /// Label of the highlighted entry
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        self.selected_index()
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
    }

    /// Apply a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Step {
        if is_interrupt(&key) {
            return Step::Cancel;
        }
        match key.code {
            KeyCode::Enter if self.selected_index().is_some() => return Step::Confirm,
            KeyCode::Esc => return Step::Cancel,
            KeyCode::Down | KeyCode::Tab => self.select_next(),
            KeyCode::Up | KeyCode::BackTab => self.select_prev(),
            KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.select_next();
            }
            KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.select_prev();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.selected = 0;
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.selected = 0;
            }
            _ => {}
        }
        Step::Continue
    }
}

/// Single-line text input
#[derive(Debug, Clone, Default)]
pub struct InputState {
    value: String,
}

impl InputState {
    /// Create an input pre-filled with `default`
    #[must_use]
    pub fn new(default: &str) -> Self {
        Self {
            value: default.to_string(),
        }
    }

    /// Current text
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Step {
        if is_interrupt(&key) {
            return Step::Cancel;
        }
        match key.code {
            KeyCode::Enter => return Step::Confirm,
            KeyCode::Esc => return Step::Cancel,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
            }
            KeyCode::Backspace => {
                self.value.pop();
            }
            _ => {}
        }
        Step::Continue
    }
}
