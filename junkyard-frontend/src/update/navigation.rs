use junkyard_keymap::message::Mode;

use crate::{
    action::Action,
    model::{Model, NavigationState},
};

use super::{preview, set_mode};

#[derive(Debug)]
pub enum CursorMove {
    Bottom,
    Down,
    Top,
    Up,
}

/// Moving the cursor while details are shown refetches the preview.
pub fn move_cursor(model: &mut Model, direction: CursorMove) -> Vec<Action> {
    let count = model.visible_entries().len();
    if count == 0 {
        return Vec::new();
    }

    let before = model.cursor;
    model.cursor = match direction {
        CursorMove::Bottom => count - 1,
        CursorMove::Down => (model.cursor + 1).min(count - 1),
        CursorMove::Top => 0,
        CursorMove::Up => model.cursor.saturating_sub(1),
    };
    model.list.follow(model.cursor);

    if model.state == NavigationState::Detail && before != model.cursor {
        preview::request(model)
    } else {
        Vec::new()
    }
}

pub fn show_details(model: &mut Model) -> Vec<Action> {
    if model.state != NavigationState::Listing || model.focused().is_none() {
        return Vec::new();
    }

    model.state = NavigationState::Detail;

    set_mode(model, Mode::Detail);
    preview::request(model)
}

pub fn hide_details(model: &mut Model) -> Vec<Action> {
    if model.state != NavigationState::Detail {
        return Vec::new();
    }

    model.state = NavigationState::Listing;
    model.detail.reset();
    set_mode(model, Mode::List);

    Vec::new()
}

#[cfg(test)]
mod test {
    use junkyard_keymap::message::{KeymapMessage, Mode};

    use crate::{
        model::NavigationState,
        update::{
            test::{loaded_model, user},
            update,
        },
    };

    #[test]
    fn cursor_is_clamped() {
        let mut model = loaded_model(&["a", "b", "c"]);

        update(&mut model, user(vec![KeymapMessage::CursorUp]));
        assert_eq!(0, model.cursor);

        update(
            &mut model,
            user(vec![
                KeymapMessage::CursorDown,
                KeymapMessage::CursorDown,
                KeymapMessage::CursorDown,
            ]),
        );
        assert_eq!(2, model.cursor);

        update(&mut model, user(vec![KeymapMessage::CursorTop]));
        assert_eq!(0, model.cursor);

        update(&mut model, user(vec![KeymapMessage::CursorBottom]));
        assert_eq!(2, model.cursor);
    }

    #[test]
    fn cursor_moves_list_viewport() {
        let mut model = loaded_model(&["a", "b", "c", "d", "e"]);
        model.list.height = 2;

        update(&mut model, user(vec![KeymapMessage::CursorBottom]));

        assert_eq!(4, model.cursor);
        assert_eq!(3, model.list.offset);
    }

    #[test]
    fn cursor_move_in_listing_issues_no_task() {
        let mut model = loaded_model(&["a", "b"]);

        let actions = update(&mut model, user(vec![KeymapMessage::CursorDown]));

        assert!(actions.is_empty());
        assert_eq!(0, model.pending);
    }

    #[test]
    fn show_and_hide_details() {
        let mut model = loaded_model(&["a", "b"]);

        update(&mut model, user(vec![KeymapMessage::ShowDetails]));
        assert_eq!(NavigationState::Detail, model.state);
        assert_eq!(Mode::Detail, model.resolver.mode);

        model.pending = 0;
        let actions = update(&mut model, user(vec![KeymapMessage::HideDetails]));

        assert!(actions.is_empty());
        assert_eq!(Mode::List, model.resolver.mode);
        assert_eq!(NavigationState::Listing, model.state);
        assert!(model.detail.preview.is_none());
    }

    #[test]
    fn show_details_without_entries() {
        let mut model = loaded_model(&[]);

        let actions = update(&mut model, user(vec![KeymapMessage::ShowDetails]));

        assert!(actions.is_empty());
        assert_eq!(NavigationState::Listing, model.state);
    }

    #[test]
    fn last_entry_in_detail_does_not_refetch() {
        let mut model = loaded_model(&["a"]);
        update(&mut model, user(vec![KeymapMessage::ShowDetails]));
        model.pending = 0;

        let actions = update(&mut model, user(vec![KeymapMessage::NextEntry]));

        assert!(actions.is_empty());
        assert_eq!(NavigationState::Detail, model.state);
    }
}
