use std::{collections::VecDeque, fmt::Display, hash::Hash};

#[derive(Clone, Debug, Eq)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: Vec<KeyModifier>,
}

impl Key {
    pub fn new(code: KeyCode, modifiers: Vec<KeyModifier>) -> Self {
        Self { code, modifiers }
    }

    /// Parses vim like notation: `j`, `G`, `<cr>`, `<C-c>` or `<S-tab>`.
    pub fn from_keycode_string(keycode: &str) -> Option<Self> {
        let regex = regex::Regex::new(r"[^-<>]+|^-$|--").ok()?;
        let mut codes = regex
            .find_iter(keycode)
            .map(|m| m.as_str())
            .collect::<VecDeque<_>>();

        let mut last = codes.pop_back()?;
        if last == "--" {
            last = "-";
        }

        let mut modifiers = Vec::new();
        if last.chars().count() == 1 && last.chars().all(|c| c.is_ascii_uppercase()) {
            modifiers.push(KeyModifier::Shift);
        }

        for modifier in codes {
            match modifier.to_ascii_uppercase().as_str() {
                "A" => modifiers.push(KeyModifier::Alt),
                "C" => modifiers.push(KeyModifier::Ctrl),
                "S" => modifiers.push(KeyModifier::Shift),
                _ => return None,
            }
        }

        KeyCode::from_keycode_string(last).map(|code| Self { code, modifiers })
    }

    /// Text inserted by the key when typed into an input, if any.
    pub fn to_input(&self) -> Option<String> {
        if self.modifiers.contains(&KeyModifier::Ctrl) || self.modifiers.contains(&KeyModifier::Alt)
        {
            return None;
        }

        match self.code {
            KeyCode::Char(c) if self.modifiers.contains(&KeyModifier::Shift) => {
                Some(c.to_uppercase().to_string())
            }
            KeyCode::Char(c) => Some(c.to_string()),
            KeyCode::LessThan => Some(String::from("<")),
            KeyCode::Space => Some(String::from(" ")),
            _ => None,
        }
    }
}

impl Hash for Key {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.modifiers.len() == other.modifiers.len()
            && self.modifiers.iter().all(|m| other.modifiers.contains(m))
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut modifiers = self.modifiers.clone();
        modifiers.sort();

        let (code, bracketed) = match self.code {
            KeyCode::Char(c) => {
                if modifiers.contains(&KeyModifier::Shift) {
                    modifiers.retain(|modifier| *modifier != KeyModifier::Shift);
                    (c.to_uppercase().to_string(), false)
                } else {
                    (c.to_string(), false)
                }
            }
            _ => (self.code.to_string(), true),
        };

        if modifiers.is_empty() && !bracketed {
            return write!(f, "{}", code);
        }

        write!(f, "<")?;
        for modifier in modifiers {
            write!(f, "{}-", modifier)?;
        }
        write!(f, "{}>", code)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum KeyCode {
    Backspace,
    Char(char),
    Delete,
    Down,
    End,
    Enter,
    Esc,
    Home,
    Left,
    LessThan,
    PageDown,
    PageUp,
    Right,
    Space,
    Tab,
    Up,
}

impl KeyCode {
    pub fn from_keycode_string(keycode: &str) -> Option<Self> {
        match keycode {
            "bs" => Some(KeyCode::Backspace),
            "cr" => Some(KeyCode::Enter),
            "del" => Some(KeyCode::Delete),
            "down" => Some(KeyCode::Down),
            "end" => Some(KeyCode::End),
            "esc" => Some(KeyCode::Esc),
            "home" => Some(KeyCode::Home),
            "left" => Some(KeyCode::Left),
            "lt" => Some(KeyCode::LessThan),
            "pagedown" => Some(KeyCode::PageDown),
            "pageup" => Some(KeyCode::PageUp),
            "right" => Some(KeyCode::Right),
            "space" => Some(KeyCode::Space),
            "tab" => Some(KeyCode::Tab),
            "up" => Some(KeyCode::Up),
            code => {
                let mut chars = code.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::from_char(c)),
                    _ => None,
                }
            }
        }
    }

    pub fn from_char(c: char) -> KeyCode {
        match c {
            '<' => KeyCode::LessThan,
            ' ' => KeyCode::Space,
            passed => KeyCode::Char(passed.to_ascii_lowercase()),
        }
    }
}

impl Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            KeyCode::Backspace => "bs",
            KeyCode::Char(c) => return write!(f, "{}", c),
            KeyCode::Delete => "del",
            KeyCode::Down => "down",
            KeyCode::End => "end",
            KeyCode::Enter => "cr",
            KeyCode::Esc => "esc",
            KeyCode::Home => "home",
            KeyCode::Left => "left",
            KeyCode::LessThan => "lt",
            KeyCode::PageDown => "pagedown",
            KeyCode::PageUp => "pageup",
            KeyCode::Right => "right",
            KeyCode::Space => "space",
            KeyCode::Tab => "tab",
            KeyCode::Up => "up",
        };

        write!(f, "{}", code)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum KeyModifier {
    Alt,
    Ctrl,
    Shift,
}

impl Display for KeyModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyModifier::Alt => write!(f, "A"),
            KeyModifier::Ctrl => write!(f, "C"),
            KeyModifier::Shift => write!(f, "S"),
        }
    }
}
