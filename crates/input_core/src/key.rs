//! Keyboard input.

/// Logical key, as reported by the host's `KeyboardEvent.key`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Shift,
    Control,
    Alt,
    Meta,
    Escape,
    Character(char),
    /// Any other named key, verbatim.
    Named(String),
}

impl Key {
    /// Parse a `KeyboardEvent.key` string.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Shift" => Key::Shift,
            "Control" => Key::Control,
            "Alt" => Key::Alt,
            "Meta" => Key::Meta,
            "Escape" => Key::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Named(key.to_string()),
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub phase: KeyPhase,
    /// Set by the platform for auto-repeated key-downs.
    pub repeat: bool,
}

impl KeyInput {
    pub fn down(key: Key) -> Self {
        Self {
            key,
            phase: KeyPhase::Down,
            repeat: false,
        }
    }

    pub fn repeat(key: Key) -> Self {
        Self {
            key,
            phase: KeyPhase::Down,
            repeat: true,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            phase: KeyPhase::Up,
            repeat: false,
        }
    }

    /// A key-down that is not an auto-repeat.
    #[inline]
    pub fn is_fresh_press(&self) -> bool {
        self.phase == KeyPhase::Down && !self.repeat
    }
}
