use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::ColorVariant;

/// Something the user asked the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    NextPage,
    PreviousPage,
    /// 0-based page index
    JumpToPage(usize),
    FocusNextCard,
    FocusPreviousCard,
    SelectVariant(ColorVariant),
    CycleVariant,
}

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: String,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, description: &str) -> Self {
        Self {
            key,
            modifiers,
            description: description.to_string(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(KeyBinding, Action)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let none = KeyModifiers::NONE;
        let bindings = vec![
            (KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Quit"), Action::Quit),
            (KeyBinding::new(KeyCode::Char('q'), none, "Quit"), Action::Quit),
            (KeyBinding::new(KeyCode::Char('g'), KeyModifiers::CONTROL, "Show/hide help"), Action::ToggleHelp),
            (KeyBinding::new(KeyCode::Char('?'), none, "Show/hide help"), Action::ToggleHelp),
            (KeyBinding::new(KeyCode::Right, none, "Next page"), Action::NextPage),
            (KeyBinding::new(KeyCode::Char('l'), none, "Next page"), Action::NextPage),
            (KeyBinding::new(KeyCode::Left, none, "Previous page"), Action::PreviousPage),
            (KeyBinding::new(KeyCode::Char('h'), none, "Previous page"), Action::PreviousPage),
            (KeyBinding::new(KeyCode::Tab, none, "Focus next product"), Action::FocusNextCard),
            (KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT, "Focus previous product"), Action::FocusPreviousCard),
            (KeyBinding::new(KeyCode::Char('y'), none, "Yellow gold"), Action::SelectVariant(ColorVariant::Yellow)),
            (KeyBinding::new(KeyCode::Char('w'), none, "White gold"), Action::SelectVariant(ColorVariant::White)),
            (KeyBinding::new(KeyCode::Char('r'), none, "Rose gold"), Action::SelectVariant(ColorVariant::Rose)),
            (KeyBinding::new(KeyCode::Char('c'), none, "Cycle color"), Action::CycleVariant),
        ];

        Self { bindings }
    }
}

impl KeyMap {
    /// Resolve a key press to an action
    pub fn action(&self, event: &KeyEvent) -> Option<Action> {
        if let Some((_, action)) = self.bindings.iter().find(|(binding, _)| binding.matches(event)) {
            return Some(*action);
        }

        // Some terminals report Shift+Tab without the modifier
        if event.code == KeyCode::BackTab {
            return Some(Action::FocusPreviousCard);
        }

        match event.code {
            KeyCode::Char(c @ '1'..='9') if event.modifiers == KeyModifiers::NONE => {
                Some(Action::JumpToPage(c as usize - '1' as usize))
            }
            _ => None,
        }
    }

    /// Get help text for all key bindings
    pub fn help_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for (binding, _) in &self.bindings {
            let line = format!("{:<10} {}", describe_key(binding), binding.description);
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
        lines.push(format!("{:<10} {}", "1-9", "Jump to page"));
        lines.join("\n")
    }
}

fn describe_key(binding: &KeyBinding) -> String {
    let key = match binding.key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        other => format!("{:?}", other),
    };

    if binding.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{}", key.to_uppercase())
    } else if binding.modifiers.contains(KeyModifiers::SHIFT) {
        format!("Shift+{}", key)
    } else {
        key
    }
}
