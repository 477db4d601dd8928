use std::fmt::Display;

use crate::key::{Key, KeyCode};

#[derive(Debug, Default)]
pub struct KeyBuffer {
    buffer: Vec<Key>,
}

impl KeyBuffer {
    pub fn add_key(&mut self, key: Key) {
        if key.code == KeyCode::Esc && !self.buffer.is_empty() {
            self.buffer.clear();
            return;
        }

        self.buffer.push(key);
    }

    pub fn get_keys(&self) -> Vec<Key> {
        self.buffer.to_vec()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Text the buffered keys would type into an input. Keys without a
    /// textual form are skipped.
    pub fn to_input(&self) -> String {
        self.buffer.iter().filter_map(Key::to_input).collect()
    }
}

impl Display for KeyBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for key in &self.buffer {
            write!(f, "{}", key)?;
        }

        Ok(())
    }
}
