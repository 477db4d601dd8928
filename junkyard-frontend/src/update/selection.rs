use crate::{
    action::Action,
    model::{Model, NavigationState},
};

use super::{
    navigation::{self, CursorMove},
    terminate,
};

pub fn toggle(model: &mut Model) -> Vec<Action> {
    let file = match model.focused() {
        Some(it) => it.clone(),
        None => return Vec::new(),
    };

    let selected = model.selection.toggle(&file);
    tracing::debug!("entry {} selected: {}", file.id, selected);

    navigation::move_cursor(model, CursorMove::Down)
}

pub fn deselect(model: &mut Model) -> Vec<Action> {
    if let Some(id) = model.focused().map(|file| file.id.clone()) {
        model.selection.remove(&id);
    }

    navigation::move_cursor(model, CursorMove::Up)
}

/// Chooses the selection, or the focused entry when nothing is selected.
pub fn confirm(model: &mut Model) -> Vec<Action> {
    if model.state != NavigationState::Listing {
        return Vec::new();
    }

    let chosen = if model.selection.is_empty() {
        match model.focused() {
            Some(file) => vec![file.clone()],
            None => return Vec::new(),
        }
    } else {
        model.selection.files()
    };

    terminate(model, Ok(chosen))
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use junkyard_keymap::message::KeymapMessage;

    use crate::{
        action::Action,
        model::NavigationState,
        task::Task,
        update::{
            test::{loaded_model, user},
            update,
        },
    };

    fn chosen_names(model: &mut crate::model::Model) -> Vec<String> {
        match model.outcome.take() {
            Some(Ok(files)) => files.into_iter().map(|file| file.name).collect(),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn toggle_selects_and_moves_down() {
        let mut model = loaded_model(&["a", "b", "c"]);

        update(&mut model, user(vec![KeymapMessage::ToggleSelection]));

        assert!(model.selection.contains("id-a"));
        assert_eq!(1, model.cursor);
        assert_eq!(NavigationState::Listing, model.state);
    }

    #[test]
    fn toggle_twice_deselects() {
        let mut model = loaded_model(&["a", "b"]);

        update(&mut model, user(vec![KeymapMessage::ToggleSelection]));
        update(&mut model, user(vec![KeymapMessage::CursorUp]));
        update(&mut model, user(vec![KeymapMessage::ToggleSelection]));

        assert!(model.selection.is_empty());
    }

    #[test]
    fn deselect_removes_and_moves_up() {
        let mut model = loaded_model(&["a", "b"]);
        update(&mut model, user(vec![KeymapMessage::CursorDown]));
        update(&mut model, user(vec![KeymapMessage::ToggleSelection]));
        assert!(model.selection.contains("id-b"));

        update(&mut model, user(vec![KeymapMessage::Deselect]));

        assert!(model.selection.is_empty());
        assert_eq!(0, model.cursor);
    }

    #[test]
    fn confirm_without_selection_chooses_focused() {
        let mut model = loaded_model(&["a", "b"]);
        update(&mut model, user(vec![KeymapMessage::CursorDown]));

        let actions = update(&mut model, user(vec![KeymapMessage::Confirm]));

        assert_eq!(vec![Action::Quit], actions);
        assert_eq!(NavigationState::Terminated, model.state);
        assert_eq!(vec!["b".to_string()], chosen_names(&mut model));
    }

    #[test]
    fn confirm_with_selection_chooses_selection() {
        let mut model = loaded_model(&["a", "b", "c"]);
        update(
            &mut model,
            user(vec![
                KeymapMessage::ToggleSelection,
                KeymapMessage::CursorDown,
                KeymapMessage::ToggleSelection,
            ]),
        );

        update(&mut model, user(vec![KeymapMessage::Confirm]));

        assert_eq!(vec!["a".to_string(), "c".to_string()], chosen_names(&mut model));
        assert!(model.selection.is_empty());
    }

    #[test]
    fn confirm_is_ignored_in_detail() {
        let mut model = loaded_model(&["a"]);
        update(&mut model, user(vec![KeymapMessage::ShowDetails]));
        model.pending = 0;

        let actions = update(&mut model, user(vec![KeymapMessage::Confirm]));

        assert!(actions.is_empty());
        assert_eq!(NavigationState::Detail, model.state);
    }

    #[test]
    fn toggle_in_detail_refetches_preview() {
        let mut model = loaded_model(&["a", "b"]);
        update(&mut model, user(vec![KeymapMessage::ShowDetails]));
        model.pending = 0;

        let actions = update(&mut model, user(vec![KeymapMessage::ToggleSelection]));

        assert!(model.selection.contains("id-a"));
        assert_eq!(NavigationState::Detail, model.state);
        assert_eq!(
            vec![Action::Task(Task::LoadPreview(PathBuf::from("/junkyard/b")))],
            actions
        );
    }
}
