use junkyard_inventory::{File, Filter};

use crate::{action::Action, error::AppError, model::Model, task::Task};

use super::{finish_task, run_task, terminate};

pub fn load(model: &mut Model, files: Vec<File>, filter: Filter) -> Vec<Action> {
    vec![run_task(model, Task::LoadInventory(files, filter))]
}

pub fn loaded(model: &mut Model, files: Vec<File>) -> Vec<Action> {
    finish_task(model);

    tracing::debug!("inventory loaded with {} visible entries", files.len());

    model.entries = files;
    model.loaded = true;
    model.cursor = 0;
    model.list.offset = 0;

    Vec::new()
}

pub fn failed(model: &mut Model, error: String) -> Vec<Action> {
    finish_task(model);

    tracing::error!("loading inventory failed: {}", error);

    terminate(model, Err(AppError::Load(error)))
}

#[cfg(test)]
mod test {
    use junkyard_inventory::{Filter, FilterSettings};
    use junkyard_keymap::message::KeymapMessage;

    use crate::{
        action::Action,
        event::Message,
        model::{Model, NavigationState},
        task::Task,
        update::{
            test::{file, task, user},
            update,
        },
    };

    use super::load;

    #[test]
    fn load_issues_task() {
        let mut model = Model::default();
        let files = vec![file("a", 0)];
        let filter = Filter::new(&FilterSettings::default()).unwrap();

        let actions = load(&mut model, files.clone(), filter.clone());

        assert_eq!(vec![Action::Task(Task::LoadInventory(files, filter))], actions);
        assert_eq!(1, model.pending);
    }

    #[test]
    fn input_before_load_is_replayed() {
        let mut model = Model::default();
        model.list.height = 10;
        let filter = Filter::new(&FilterSettings::default()).unwrap();
        load(&mut model, Vec::new(), filter);

        update(&mut model, user(vec![KeymapMessage::CursorDown]));
        assert_eq!(0, model.cursor);

        update(
            &mut model,
            task(Message::InventoryLoaded(vec![file("a", 0), file("b", 1)])),
        );

        assert!(model.loaded);
        assert_eq!(1, model.cursor);
        assert_eq!(NavigationState::Listing, model.state);
    }
}
