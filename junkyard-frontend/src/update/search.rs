use junkyard_keymap::message::Mode;

use crate::{
    action::Action,
    model::{Model, NavigationState},
};

use super::set_mode;

pub fn start(model: &mut Model) -> Vec<Action> {
    if model.state != NavigationState::Listing {
        return Vec::new();
    }

    model.search.editing = true;
    model.search.query.clear();
    reset_cursor(model);
    set_mode(model, Mode::Search);

    Vec::new()
}

pub fn insert(model: &mut Model, input: &str) -> Vec<Action> {
    if !model.search.editing {
        return Vec::new();
    }

    model.search.query.push_str(input);
    reset_cursor(model);

    Vec::new()
}

pub fn delete_char(model: &mut Model) -> Vec<Action> {
    if !model.search.editing {
        return Vec::new();
    }

    model.search.query.pop();
    reset_cursor(model);

    Vec::new()
}

pub fn apply(model: &mut Model) -> Vec<Action> {
    if !model.search.editing {
        return Vec::new();
    }

    model.search.editing = false;
    set_mode(model, Mode::List);

    Vec::new()
}

pub fn clear(model: &mut Model) -> Vec<Action> {
    let was_editing = model.search.editing;

    model.search.editing = false;
    model.search.query.clear();
    reset_cursor(model);

    if was_editing {
        set_mode(model, Mode::List);
    }

    Vec::new()
}

fn reset_cursor(model: &mut Model) {
    model.cursor = 0;
    model.list.offset = 0;
}

#[cfg(test)]
mod test {
    use junkyard_keymap::message::{KeymapMessage, Mode};

    use crate::{
        update::{
            test::{loaded_model, user},
            update,
        },
    };

    fn visible_names(model: &crate::model::Model) -> Vec<String> {
        model
            .visible_entries()
            .into_iter()
            .map(|file| file.name.clone())
            .collect()
    }

    #[test]
    fn search_narrows_case_insensitive() {
        let mut model = loaded_model(&["Report.txt", "notes.md", "report.pdf"]);

        update(&mut model, user(vec![KeymapMessage::StartSearch]));
        assert_eq!(Mode::Search, model.resolver.mode);

        update(
            &mut model,
            user(vec![KeymapMessage::InsertSearch("REP".to_string())]),
        );

        assert_eq!(
            vec!["Report.txt".to_string(), "report.pdf".to_string()],
            visible_names(&model)
        );
    }

    #[test]
    fn apply_keeps_query_and_confirm_uses_visible_entry() {
        let mut model = loaded_model(&["a.txt", "b.log", "c.txt"]);

        update(
            &mut model,
            user(vec![
                KeymapMessage::StartSearch,
                KeymapMessage::InsertSearch("log".to_string()),
            ]),
        );
        update(&mut model, user(vec![KeymapMessage::ApplySearch]));
        assert_eq!(Mode::List, model.resolver.mode);
        assert!(!model.search.editing);

        update(&mut model, user(vec![KeymapMessage::Confirm]));

        let chosen = match model.outcome.take() {
            Some(Ok(files)) => files,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(1, chosen.len());
        assert_eq!("b.log", chosen[0].name);
    }

    #[test]
    fn delete_char_and_clear() {
        let mut model = loaded_model(&["alpha", "beta"]);

        update(
            &mut model,
            user(vec![
                KeymapMessage::StartSearch,
                KeymapMessage::InsertSearch("bx".to_string()),
            ]),
        );
        assert!(visible_names(&model).is_empty());

        update(&mut model, user(vec![KeymapMessage::DeleteSearchChar]));
        assert_eq!(vec!["beta".to_string()], visible_names(&model));

        update(&mut model, user(vec![KeymapMessage::ClearSearch]));
        assert_eq!(Mode::List, model.resolver.mode);
        assert_eq!(2, visible_names(&model).len());
    }

    #[test]
    fn search_keeps_selection() {
        let mut model = loaded_model(&["alpha", "beta"]);
        update(&mut model, user(vec![KeymapMessage::ToggleSelection]));

        update(
            &mut model,
            user(vec![
                KeymapMessage::StartSearch,
                KeymapMessage::InsertSearch("beta".to_string()),
                KeymapMessage::ApplySearch,
            ]),
        );

        assert!(model.selection.contains("id-alpha"));
    }
}
