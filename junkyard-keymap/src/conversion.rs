use std::collections::VecDeque;

use crossterm::event::{self, KeyEvent, KeyEventKind, KeyModifiers};

use crate::key::{Key, KeyCode, KeyModifier};

pub fn from_keycode_string(keycodes: &str) -> VecDeque<Key> {
    let mut keys = VecDeque::new();

    let regex = match regex::Regex::new(r"<[^>]*>|.") {
        Ok(it) => it,
        Err(_) => return keys,
    };

    for capture in regex.find_iter(keycodes).map(|m| m.as_str()) {
        if let Some(key) = Key::from_keycode_string(capture) {
            keys.push_back(key);
        }
    }

    keys
}

pub fn to_key(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let mut modifiers = to_modifiers(event.modifiers);

    let code = match event.code {
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::BackTab => {
            if !modifiers.contains(&KeyModifier::Shift) {
                modifiers.push(KeyModifier::Shift);
            }
            KeyCode::Tab
        }
        event::KeyCode::Char(c) => {
            if c.is_alphabetic() {
                if c.is_uppercase() && !modifiers.contains(&KeyModifier::Shift) {
                    modifiers.push(KeyModifier::Shift);
                }
            } else {
                modifiers.retain(|modifier| *modifier != KeyModifier::Shift);
            }
            KeyCode::from_char(c)
        }
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Up => KeyCode::Up,
        _ => return None,
    };

    Some(Key::new(code, modifiers))
}

fn to_modifiers(modifiers: KeyModifiers) -> Vec<KeyModifier> {
    modifiers
        .iter_names()
        .filter_map(|(name, _)| match name {
            "ALT" | "META" => Some(KeyModifier::Alt),
            "CONTROL" => Some(KeyModifier::Ctrl),
            "SHIFT" => Some(KeyModifier::Shift),
            _ => None,
        })
        .collect()
}
