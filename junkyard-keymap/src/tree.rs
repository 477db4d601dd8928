use std::{collections::HashMap, slice::Iter};

use crate::{
    key::Key,
    message::{Binding, Mode},
    KeyMapError,
};

#[derive(Debug, Default)]
pub struct KeyTree {
    modes: HashMap<Mode, Node>,
}

#[derive(Clone, Debug)]
pub enum Node {
    Binding(Binding),
    Key(HashMap<Key, Node>),
}

impl KeyTree {
    pub fn add_mapping(
        &mut self,
        mode: &Mode,
        keys: &[Key],
        binding: Binding,
    ) -> Result<(), KeyMapError> {
        if keys.is_empty() {
            return Err(KeyMapError::NoKeysRemaining);
        }

        let node = self
            .modes
            .entry(mode.clone())
            .or_insert_with(|| Node::Key(HashMap::new()));

        add_mapping_node(node, keys, binding)
    }

    pub fn get_binding(
        &self,
        mode: &Mode,
        keys: &[Key],
    ) -> Result<(Binding, Vec<Key>), KeyMapError> {
        let node = match self.modes.get(mode) {
            Some(it) => it,
            None => return Err(KeyMapError::ModeUnresolvable(mode.to_string())),
        };

        let mut iter = keys.iter();
        match get_node(node, &mut iter)? {
            Node::Binding(binding) => Ok((binding.clone(), iter.cloned().collect())),
            Node::Key(_) => Err(KeyMapError::KeySequenceIncomplete),
        }
    }
}

fn add_mapping_node(node: &mut Node, keys: &[Key], binding: Binding) -> Result<(), KeyMapError> {
    let map = match node {
        Node::Binding(_) => return Err(KeyMapError::MappingConflict),
        Node::Key(map) => map,
    };

    match keys {
        [] => Err(KeyMapError::NoKeysRemaining),
        [key] => {
            if map.contains_key(key) {
                return Err(KeyMapError::MappingConflict);
            }

            map.insert(key.clone(), Node::Binding(binding));
            Ok(())
        }
        [key, rest @ ..] => {
            let next = map
                .entry(key.clone())
                .or_insert_with(|| Node::Key(HashMap::new()));

            add_mapping_node(next, rest, binding)
        }
    }
}

fn get_node<'a>(node: &'a Node, iter: &mut Iter<'_, Key>) -> Result<&'a Node, KeyMapError> {
    match node {
        Node::Binding(_) => Ok(node),
        Node::Key(map) => {
            let key = match iter.next() {
                Some(it) => it,
                None => return Ok(node),
            };

            match map.get(key) {
                Some(next) => get_node(next, iter),
                None => Err(KeyMapError::NoValidBindingFound),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        key::{Key, KeyCode},
        message::{Binding, BindingKind, KeymapMessage, Mode},
        KeyMapError,
    };

    use super::KeyTree;

    fn key(c: char) -> Key {
        Key::new(KeyCode::from_char(c), vec![])
    }

    #[test]
    fn get_binding_returns_unused_keys() {
        let mut tree = KeyTree::default();
        tree.add_mapping(
            &Mode::List,
            &[key('j')],
            Binding::from_message(KeymapMessage::CursorDown),
        )
        .unwrap();

        let (binding, rest) = tree.get_binding(&Mode::List, &[key('j'), key('k')]).unwrap();

        assert_eq!(BindingKind::Message(KeymapMessage::CursorDown), binding.kind);
        assert_eq!(vec![key('k')], rest);
    }

    #[test]
    fn get_binding_incomplete_sequence() {
        let mut tree = KeyTree::default();
        tree.add_mapping(
            &Mode::List,
            &[key('g'), key('g')],
            Binding::from_message(KeymapMessage::CursorTop),
        )
        .unwrap();

        let result = tree.get_binding(&Mode::List, &[key('g')]);

        assert_eq!(Err(KeyMapError::KeySequenceIncomplete), result.map(|_| ()));
    }

    #[test]
    fn get_binding_unknown_mode_and_key() {
        let mut tree = KeyTree::default();
        tree.add_mapping(
            &Mode::List,
            &[key('j')],
            Binding::from_message(KeymapMessage::CursorDown),
        )
        .unwrap();

        assert!(matches!(
            tree.get_binding(&Mode::Detail, &[key('j')]),
            Err(KeyMapError::ModeUnresolvable(_))
        ));
        assert!(matches!(
            tree.get_binding(&Mode::List, &[key('x')]),
            Err(KeyMapError::NoValidBindingFound)
        ));
    }

    #[test]
    fn add_mapping_conflict() {
        let mut tree = KeyTree::default();
        let binding = Binding::from_message(KeymapMessage::CursorDown);
        tree.add_mapping(&Mode::List, &[key('j')], binding.clone())
            .unwrap();

        let result = tree.add_mapping(&Mode::List, &[key('j')], binding);

        assert_eq!(Err(KeyMapError::MappingConflict), result);
    }
}
