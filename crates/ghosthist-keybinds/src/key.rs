//! Keys, modifiers and key combinations

use std::fmt;
use std::str::FromStr;

use crate::error::KeybindError;

/// Keyboard modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Ctrl => write!(f, "ctrl"),
            Modifier::Alt => write!(f, "alt"),
            Modifier::Shift => write!(f, "shift"),
        }
    }
}

impl FromStr for Modifier {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "alt" | "meta" => Ok(Modifier::Alt),
            "shift" => Ok(Modifier::Shift),
            _ => Err(KeybindError::InvalidModifier(s.to_string())),
        }
    }
}

/// A key on the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "space"),
            Key::Char('+') => write!(f, "plus"),
            Key::Char(c) => write!(f, "{}", c),
            Key::F(n) => write!(f, "f{}", n),
            Key::Enter => write!(f, "enter"),
            Key::Escape => write!(f, "escape"),
            Key::Tab => write!(f, "tab"),
            Key::Backspace => write!(f, "backspace"),
            Key::Delete => write!(f, "delete"),
            Key::Home => write!(f, "home"),
            Key::End => write!(f, "end"),
            Key::PageUp => write!(f, "pageup"),
            Key::PageDown => write!(f, "pagedown"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Key {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "escape" | "esc" => Ok(Key::Escape),
            "tab" => Ok(Key::Tab),
            "backspace" | "bksp" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            "pageup" | "page_up" => Ok(Key::PageUp),
            "pagedown" | "page_down" => Ok(Key::PageDown),
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "space" => Ok(Key::Char(' ')),
            "plus" => Ok(Key::Char('+')),
            name if name.starts_with('f') && name.len() > 1 => {
                let num: u8 = name[1..].parse().map_err(|_| {
                    KeybindError::InvalidKeySyntax(format!("Invalid function key: {}", s))
                })?;
                if (1..=12).contains(&num) {
                    Ok(Key::F(num))
                } else {
                    Err(KeybindError::InvalidKeySyntax(format!(
                        "Function key must be F1-F12, got: {}",
                        s
                    )))
                }
            }
            name => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Key::Char(c)),
                    _ => Err(KeybindError::InvalidKeySyntax(format!("Unknown key: {}", s))),
                }
            }
        }
    }
}

/// Modifiers plus a key, e.g. `ctrl+e` or `alt+f`
///
/// Modifiers are kept sorted and deduplicated so that `alt+ctrl+x` and
/// `ctrl+alt+x` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    modifiers: Vec<Modifier>,
    key: Key,
}

impl KeyCombo {
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: Key) -> Self {
        let mut modifiers: Vec<Modifier> = modifiers.into_iter().collect();
        modifiers.sort();
        modifiers.dedup();
        Self { modifiers, key }
    }

    /// A key without modifiers
    pub fn plain(key: Key) -> Self {
        Self::new([], key)
    }

    pub fn ctrl(key: Key) -> Self {
        Self::new([Modifier::Ctrl], key)
    }

    pub fn alt(key: Key) -> Self {
        Self::new([Modifier::Alt], key)
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn key(&self) -> Key {
        self.key
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyCombo {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KeybindError::InvalidKeySyntax(
                "Empty key combination".to_string(),
            ));
        }

        // A trailing "++" means the key itself is '+'
        let (head, key) = match trimmed.strip_suffix("++") {
            Some(head) => (head, Key::Char('+')),
            None => match trimmed.rsplit_once('+') {
                Some((head, last)) => (head, Key::from_str(last)?),
                None => ("", Key::from_str(trimmed)?),
            },
        };

        let modifiers = head
            .split('+')
            .filter(|part| !part.is_empty())
            .map(Modifier::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(KeyCombo::new(modifiers, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!("enter".parse::<KeyCombo>().unwrap(), KeyCombo::plain(Key::Enter));
        assert_eq!("Ctrl+E".parse::<KeyCombo>().unwrap(), KeyCombo::ctrl(Key::Char('e')));
        assert_eq!("alt+f".parse::<KeyCombo>().unwrap(), KeyCombo::alt(Key::Char('f')));
    }

    #[test]
    fn test_modifier_order_is_normalized() {
        let a: KeyCombo = "alt+ctrl+x".parse().unwrap();
        let b: KeyCombo = "ctrl+alt+alt+x".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "ctrl+alt+x");
    }

    #[test]
    fn test_special_chars() {
        assert_eq!("ctrl+space".parse::<KeyCombo>().unwrap(), KeyCombo::ctrl(Key::Char(' ')));
        assert_eq!("ctrl++".parse::<KeyCombo>().unwrap(), KeyCombo::ctrl(Key::Char('+')));
        assert_eq!(KeyCombo::ctrl(Key::Char('+')).to_string(), "ctrl+plus");
    }

    #[test]
    fn test_function_keys() {
        assert_eq!("F5".parse::<Key>().unwrap(), Key::F(5));
        assert!("f13".parse::<Key>().is_err());
    }

    #[test]
    fn test_invalid() {
        assert!("".parse::<KeyCombo>().is_err());
        assert!("hyper+x".parse::<KeyCombo>().is_err());
        assert!("ctrl+nope".parse::<KeyCombo>().is_err());
    }
}
