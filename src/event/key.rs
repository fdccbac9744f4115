//! Keyboard keys delivered with `keydown` events.

/// A keyboard key, named after the DOM `KeyboardEvent.key` values the
/// components react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Space,
    Tab,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Parse a DOM key name (`"Escape"`, `"ArrowDown"`, `" "`, `"a"`).
    pub fn from_dom(name: &str) -> Option<Key> {
        let key = match name {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            " " | "Spacebar" => Key::Space,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Whether this key activates the focused control (Enter or Space).
    pub fn is_activation(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}
