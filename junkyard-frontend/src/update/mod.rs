use junkyard_inventory::File;
use junkyard_keymap::{
    key::Key,
    message::{KeySequence, KeymapMessage, Mode},
};

use crate::{
    action::Action,
    error::AppError,
    event::{Envelope, Message, MessageSource},
    model::{Model, NavigationState},
    task::Task,
};

use self::{navigation::CursorMove, preview::PreviewScroll};

pub mod inventory;
mod navigation;
mod preview;
mod search;
mod selection;

/// Applies one envelope to the model.
///
/// User input arriving while a task is outstanding is parked and replayed in
/// order once every task reported back. Keys are resolved on replay, so a
/// mode switch caused by an earlier parked key applies to the later ones.
/// Quit and terminal events are never parked.
#[tracing::instrument(skip(model))]
pub fn update(model: &mut Model, envelope: Envelope) -> Vec<Action> {
    if model.state == NavigationState::Terminated {
        return Vec::new();
    }

    if should_defer(model, &envelope) {
        tracing::debug!("deferring user input, pending tasks: {}", model.pending);
        model.deferred.push_back(envelope);
        return Vec::new();
    }

    set_key_sequence(model, &envelope.sequence);

    let mut actions: Vec<_> = envelope
        .messages
        .into_iter()
        .flat_map(|message| update_with_message(model, message))
        .collect();

    while model.pending == 0 && model.state != NavigationState::Terminated {
        match model.deferred.pop_front() {
            Some(deferred) => actions.extend(update(model, deferred)),
            None => break,
        }
    }

    actions
}

fn should_defer(model: &Model, envelope: &Envelope) -> bool {
    if model.pending == 0 || envelope.source != MessageSource::User {
        return false;
    }

    !envelope.messages.iter().any(|message| match message {
        Message::Key(key) => model.deferred.is_empty() && model.resolver.is_quit(key),
        Message::Keymap(message) => message == &KeymapMessage::Quit,
        _ => false,
    })
}

fn set_key_sequence(model: &mut Model, sequence: &KeySequence) {
    match sequence {
        KeySequence::Completed(_) => model.key_sequence.clear(),
        KeySequence::Changed(sequence) => model.key_sequence = sequence.to_owned(),
        KeySequence::None => {}
    };
}

fn update_with_message(model: &mut Model, message: Message) -> Vec<Action> {
    if model.state == NavigationState::Terminated {
        return Vec::new();
    }

    match message {
        Message::Key(key) => update_with_key(model, key),
        Message::Keymap(message) => update_with_keymap_message(model, message),
        Message::InventoryLoaded(files) => inventory::loaded(model, files),
        Message::LoadFailed(error) => inventory::failed(model, error),
        Message::PreviewLoaded(content, size) => preview::loaded(model, content, size),
        Message::Resize(_, _) => Vec::new(),
    }
}

fn update_with_key(model: &mut Model, key: Key) -> Vec<Action> {
    let (messages, sequence) = model.resolver.add_key(key);
    set_key_sequence(model, &sequence);

    messages
        .into_iter()
        .flat_map(|message| update_with_message(model, Message::Keymap(message)))
        .collect()
}

#[tracing::instrument(skip(model))]
fn update_with_keymap_message(model: &mut Model, message: KeymapMessage) -> Vec<Action> {
    match message {
        KeymapMessage::ApplySearch => search::apply(model),
        KeymapMessage::ClearSearch => search::clear(model),
        KeymapMessage::Confirm => selection::confirm(model),
        KeymapMessage::CursorBottom => navigation::move_cursor(model, CursorMove::Bottom),
        KeymapMessage::CursorDown | KeymapMessage::NextEntry => {
            navigation::move_cursor(model, CursorMove::Down)
        }
        KeymapMessage::CursorTop => navigation::move_cursor(model, CursorMove::Top),
        KeymapMessage::CursorUp | KeymapMessage::PreviousEntry => {
            navigation::move_cursor(model, CursorMove::Up)
        }
        KeymapMessage::DeleteSearchChar => search::delete_char(model),
        KeymapMessage::Deselect => selection::deselect(model),
        KeymapMessage::HideDetails => navigation::hide_details(model),
        KeymapMessage::InsertSearch(input) => search::insert(model, &input),
        KeymapMessage::PreviewBottom => preview::scroll(model, PreviewScroll::Bottom),
        KeymapMessage::PreviewDown => preview::scroll(model, PreviewScroll::Down),
        KeymapMessage::PreviewHalfPageDown => preview::scroll(model, PreviewScroll::HalfPageDown),
        KeymapMessage::PreviewHalfPageUp => preview::scroll(model, PreviewScroll::HalfPageUp),
        KeymapMessage::PreviewTop => preview::scroll(model, PreviewScroll::Top),
        KeymapMessage::PreviewUp => preview::scroll(model, PreviewScroll::Up),
        KeymapMessage::Quit => terminate(model, Ok(Vec::new())),
        KeymapMessage::ShowDetails => navigation::show_details(model),
        KeymapMessage::StartSearch => search::start(model),
        KeymapMessage::ToggleDateFormat => {
            model.date_format = model.date_format.toggle();
            Vec::new()
        }
        KeymapMessage::ToggleSelection => selection::toggle(model),
    }
}

fn set_mode(model: &mut Model, mode: Mode) {
    tracing::debug!("keymap mode changed: {} -> {}", model.resolver.mode, mode);
    model.resolver.mode = mode;
}

fn run_task(model: &mut Model, task: Task) -> Action {
    model.pending += 1;
    Action::Task(task)
}

fn finish_task(model: &mut Model) {
    model.pending = model.pending.saturating_sub(1);
}

fn terminate(model: &mut Model, outcome: Result<Vec<File>, AppError>) -> Vec<Action> {
    tracing::debug!("terminating session: {:?}", outcome);

    model.state = NavigationState::Terminated;
    model.selection.clear();
    model.outcome = Some(outcome);

    vec![Action::Quit]
}
