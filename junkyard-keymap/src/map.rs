use std::collections::HashMap;

use crate::{
    key::Key,
    message::{Binding, BindingKind, KeymapMessage, Mode},
    tree::KeyTree,
};

#[derive(Debug)]
pub struct KeyMap {
    mappings: HashMap<Mode, Vec<(Vec<Key>, Binding)>>,
}

impl KeyMap {
    pub fn into_tree(self) -> KeyTree {
        let mut tree = KeyTree::default();
        for (mode, mappings) in self.mappings {
            for (keys, binding) in mappings {
                if let Err(error) = tree.add_mapping(&mode, &keys, binding) {
                    tracing::error!("adding mapping {:?} for {} failed: {:?}", keys, mode, error);
                }
            }
        }
        tree
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut mappings = HashMap::new();

        add_mapping(
            &mut mappings,
            vec![Mode::Detail, Mode::List, Mode::Search],
            vec![("<C-c>", message(KeymapMessage::Quit))],
        );

        add_mapping(
            &mut mappings,
            vec![Mode::Detail, Mode::List],
            vec![
                ("<tab>", message(KeymapMessage::ToggleSelection)),
                ("<S-tab>", message(KeymapMessage::Deselect)),
                ("0", repeat(0)),
                ("1", repeat(1)),
                ("2", repeat(2)),
                ("3", repeat(3)),
                ("4", repeat(4)),
                ("5", repeat(5)),
                ("6", repeat(6)),
                ("7", repeat(7)),
                ("8", repeat(8)),
                ("9", repeat(9)),
            ],
        );

        add_mapping(
            &mut mappings,
            vec![Mode::List],
            vec![
                ("q", message(KeymapMessage::Quit)),
                ("j", message(KeymapMessage::CursorDown)),
                ("<down>", message(KeymapMessage::CursorDown)),
                ("k", message(KeymapMessage::CursorUp)),
                ("<up>", message(KeymapMessage::CursorUp)),
                ("g", message(KeymapMessage::CursorTop)),
                ("<home>", message(KeymapMessage::CursorTop)),
                ("G", message(KeymapMessage::CursorBottom)),
                ("<end>", message(KeymapMessage::CursorBottom)),
                ("<space>", message(KeymapMessage::ShowDetails)),
                ("<cr>", message(KeymapMessage::Confirm)),
                ("/", message(KeymapMessage::StartSearch)),
                ("<esc>", message(KeymapMessage::ClearSearch)),
            ],
        );

        add_mapping(
            &mut mappings,
            vec![Mode::Detail],
            vec![
                ("n", message(KeymapMessage::NextEntry)),
                ("p", message(KeymapMessage::PreviousEntry)),
                ("j", message(KeymapMessage::PreviewDown)),
                ("<down>", message(KeymapMessage::PreviewDown)),
                ("k", message(KeymapMessage::PreviewUp)),
                ("<up>", message(KeymapMessage::PreviewUp)),
                ("d", message(KeymapMessage::PreviewHalfPageDown)),
                ("<pagedown>", message(KeymapMessage::PreviewHalfPageDown)),
                ("u", message(KeymapMessage::PreviewHalfPageUp)),
                ("<pageup>", message(KeymapMessage::PreviewHalfPageUp)),
                ("g", message(KeymapMessage::PreviewTop)),
                ("G", message(KeymapMessage::PreviewBottom)),
                ("@", message(KeymapMessage::ToggleDateFormat)),
                ("<esc>", message(KeymapMessage::HideDetails)),
                ("<space>", message(KeymapMessage::HideDetails)),
            ],
        );

        add_mapping(
            &mut mappings,
            vec![Mode::Search],
            vec![
                ("<bs>", message(KeymapMessage::DeleteSearchChar)),
                ("<cr>", message(KeymapMessage::ApplySearch)),
                ("<esc>", message(KeymapMessage::ClearSearch)),
            ],
        );

        Self { mappings }
    }
}

fn message(message: KeymapMessage) -> Binding {
    Binding::from_message(message)
}

fn repeat(count: usize) -> Binding {
    Binding {
        kind: BindingKind::Repeat,
        repeat: Some(count),
        ..Default::default()
    }
}

fn add_mapping(
    mappings: &mut HashMap<Mode, Vec<(Vec<Key>, Binding)>>,
    modes: Vec<Mode>,
    bindings: Vec<(&str, Binding)>,
) {
    let bindings: Vec<_> = bindings
        .into_iter()
        .filter_map(|(keycode, binding)| match Key::from_keycode_string(keycode) {
            Some(key) => Some((vec![key], binding)),
            None => {
                tracing::error!("invalid keycode in default mappings: {}", keycode);
                None
            }
        })
        .collect();

    for mode in modes {
        mappings
            .entry(mode)
            .or_insert_with(Vec::new)
            .extend(bindings.clone());
    }
}
