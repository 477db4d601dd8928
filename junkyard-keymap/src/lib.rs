use buffer::KeyBuffer;
use key::{Key, KeyCode};
use map::KeyMap;
use message::{Binding, BindingKind, KeySequence, KeymapMessage, Mode};
use tree::KeyTree;

mod buffer;
pub mod conversion;
pub mod key;
mod map;
pub mod message;
mod tree;

#[derive(Debug, thiserror::Error, PartialEq)]
enum KeyMapError {
    #[error("Key sequence is incomplete.")]
    KeySequenceIncomplete,
    #[error("Mapping conflicts with an existing one.")]
    MappingConflict,
    #[error("Failed to add mapping for mode {0}.")]
    ModeUnresolvable(String),
    #[error("Failed to resolve valid binding.")]
    NoValidBindingFound,
    #[error("No keys left.")]
    NoKeysRemaining,
}

/// Turns single key presses into messages for the current mode. Keys are
/// buffered until they form a complete binding, which allows count prefixes
/// like `3j`.
#[derive(Debug)]
pub struct MessageResolver {
    buffer: KeyBuffer,
    pub mode: Mode,
    tree: KeyTree,
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self {
            buffer: KeyBuffer::default(),
            mode: Mode::default(),
            tree: KeyMap::default().into_tree(),
        }
    }
}

impl MessageResolver {
    /// True when `key` on its own resolves to quit in the current mode.
    pub fn is_quit(&self, key: &Key) -> bool {
        if !self.buffer.get_keys().is_empty() {
            return false;
        }

        match self.tree.get_binding(&self.mode, &[key.clone()]) {
            Ok((binding, rest)) => {
                rest.is_empty() && binding.kind == BindingKind::Message(KeymapMessage::Quit)
            }
            Err(_) => false,
        }
    }

    pub fn add_key(&mut self, key: Key) -> (Vec<KeymapMessage>, KeySequence) {
        let keys = self.buffer.get_keys();
        if key.code == KeyCode::Esc && !keys.is_empty() {
            let sequence = format!("{}{}", self.buffer, key);
            self.buffer.clear();
            return (Vec::new(), KeySequence::Completed(sequence));
        }

        self.buffer.add_key(key);

        let keys = self.buffer.get_keys();
        let binding = resolve_binding(&self.tree, &self.mode, &keys);
        let sequence = self.buffer.to_string();

        match binding {
            Ok(binding) => {
                self.buffer.clear();
                (
                    get_messages_from_binding(binding),
                    KeySequence::Completed(sequence),
                )
            }
            Err(KeyMapError::KeySequenceIncomplete) => {
                (Vec::new(), KeySequence::Changed(sequence))
            }
            Err(error) => {
                tracing::trace!("no binding for {} in {}: {:?}", sequence, self.mode, error);

                let messages = if get_passthrough_by_mode(&self.mode) {
                    let input = self.buffer.to_input();
                    if input.is_empty() {
                        Vec::new()
                    } else {
                        vec![KeymapMessage::InsertSearch(input)]
                    }
                } else {
                    Vec::new()
                };

                self.buffer.clear();
                (messages, KeySequence::Completed(sequence))
            }
        }
    }
}

fn resolve_binding(tree: &KeyTree, mode: &Mode, keys: &[Key]) -> Result<Binding, KeyMapError> {
    if keys.is_empty() {
        return Err(KeyMapError::NoKeysRemaining);
    }

    let (binding, unused_keys) = tree.get_binding(mode, keys)?;

    let mut next = match resolve_binding(tree, mode, &unused_keys) {
        Ok(it) => it,
        Err(KeyMapError::NoKeysRemaining) => {
            if binding.kind == BindingKind::Repeat {
                return Err(KeyMapError::KeySequenceIncomplete);
            } else {
                return Ok(binding);
            }
        }
        Err(error) => return Err(error),
    };

    if binding.kind == BindingKind::Repeat {
        next.repeat = get_repeat(&binding, &next);
        Ok(next)
    } else {
        Ok(binding)
    }
}

fn get_repeat(current: &Binding, next: &Binding) -> Option<usize> {
    if !next.repeatable {
        return next.repeat;
    }

    let current_repeat = match current.repeat {
        Some(it) => it,
        None => return next.repeat,
    };

    let repeat = match next.repeat {
        Some(it) => {
            let repeat_len = it.to_string().len();
            let pow = match 10_usize.checked_pow(repeat_len as u32) {
                Some(it) => it,
                None => return next.repeat,
            };

            current_repeat.checked_mul(pow)?.checked_add(it)?
        }
        None => current_repeat,
    };

    Some(repeat)
}

fn get_messages_from_binding(binding: Binding) -> Vec<KeymapMessage> {
    let repeat = binding.repeat.filter(|count| *count > 0).unwrap_or(1);
    match binding.kind {
        BindingKind::Message(message) if message.is_countable() => vec![message; repeat],
        BindingKind::Message(message) => vec![message],
        BindingKind::None | BindingKind::Repeat => Vec::new(),
    }
}

fn get_passthrough_by_mode(mode: &Mode) -> bool {
    match mode {
        Mode::Search => true,
        Mode::Detail | Mode::List => false,
    }
}
