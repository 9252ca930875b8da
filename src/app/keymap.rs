//! Keybinding configuration: parse a keybinds file, provide defaults, and map keys to actions.
//!
//! The search box always has focus, so printable characters are never bound by
//! default; an unbound plain or shifted character goes into the query.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Remove the last character of the query.
    DeleteBackward,
    /// Empty the query.
    ClearQuery,
    /// Move the cursor up one row.
    MoveUp,
    /// Move the cursor down one row.
    MoveDown,
    /// Move the cursor up one page.
    PageUp,
    /// Move the cursor down one page.
    PageDown,
    /// Swallow the key.
    Ignore,
}

/// What a key press means for the view once bindings are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Action(KeyAction),
    Insert(char),
}

/// Mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Esc), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Backspace), KeyAction::DeleteBackward);
        bindings.insert((M::CONTROL, Char('u')), KeyAction::ClearQuery);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        Self { bindings }
    }

    /// Parse `Action = KeySpec` lines on top of the defaults.
    ///
    /// The legacy `KeySpec = Action` order is accepted too. Lines that parse as
    /// neither are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        map
    }

    /// Load a keymap file; `None` if it cannot be read.
    pub fn from_file(path: &std::path::Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Load from `path` when given, falling back to defaults.
    pub fn load(path: Option<&std::path::Path>) -> Self {
        path.and_then(Self::from_file).unwrap_or_default()
    }

    /// Resolve a key event to its bound action.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Resolve a key event, treating unbound plain or shifted characters as query input.
    pub fn interpret(&self, key: &KeyEvent) -> Option<KeyInput> {
        if let Some(action) = self.resolve(key) {
            return Some(KeyInput::Action(action));
        }
        match key.code {
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                Some(KeyInput::Insert(c))
            }
            _ => None,
        }
    }

    /// First key bound to `action`, formatted for display (e.g. in the status bar).
    pub fn key_for(&self, action: KeyAction) -> Option<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys.into_iter().next()
    }

    /// Format a key (modifiers + code) into a human-readable spec like "Ctrl+u".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Backspace => "Backspace".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Backspace" => Backspace,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "DeleteBackward" => Some(KeyAction::DeleteBackward),
        "ClearQuery" => Some(KeyAction::ClearQuery),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mods: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn printable_chars_are_inserted_by_default() {
        let km = Keymap::default();
        assert_eq!(
            km.interpret(&key(KeyModifiers::NONE, KeyCode::Char('q'))),
            Some(KeyInput::Insert('q'))
        );
        assert_eq!(
            km.interpret(&key(KeyModifiers::SHIFT, KeyCode::Char('J'))),
            Some(KeyInput::Insert('J'))
        );
        assert_eq!(km.interpret(&key(KeyModifiers::ALT, KeyCode::Char('x'))), None);
    }

    #[test]
    fn defaults_bind_quit_and_editing() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Backspace)),
            Some(KeyAction::DeleteBackward)
        );
    }

    #[test]
    fn parse_accepts_both_orders_and_skips_garbage() {
        let km = Keymap::parse("# keys\nQuit = Ctrl+q\nCtrl+l = ClearQuery\nnonsense\nMoveUp = NotAKey\n");
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('q'))),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('l'))),
            Some(KeyAction::ClearQuery)
        );
        assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Up)), Some(KeyAction::MoveUp));
    }

    #[test]
    fn key_for_formats_binding() {
        let km = Keymap::default();
        assert_eq!(km.key_for(KeyAction::ClearQuery).as_deref(), Some("Ctrl+u"));
        assert_eq!(km.key_for(KeyAction::Quit).as_deref(), Some("Ctrl+c"));
    }
}
