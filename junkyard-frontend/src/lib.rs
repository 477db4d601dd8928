use junkyard_inventory::{File, Filter, Inventory};

use crate::{
    action::Action,
    error::AppError,
    event::{Emitter, Message},
    layout::AppLayout,
    model::Model,
    settings::Settings,
    task::NO_ENTRIES_FOUND,
    terminal::TerminalWrapper,
};

mod action;
pub mod error;
mod event;
mod layout;
mod model;
pub mod pipeline;
mod preview;
pub mod settings;
mod task;
mod terminal;
mod update;
mod view;

/// Lets the user pick entries from the junkyard in a tui and moves the chosen
/// ones back to their origin.
pub async fn restore(settings: &Settings) -> Result<(), AppError> {
    let mut inventory = Inventory::open(&settings.inventory_path())?;
    let filter = Filter::new(&settings.filter)?;

    if inventory.files.is_empty() {
        return Err(AppError::Load(NO_ENTRIES_FOUND.to_string()));
    }

    let chosen = choose(settings, inventory.files.clone(), filter).await?;
    if chosen.is_empty() {
        tracing::info!("nothing chosen to restore");
        return Ok(());
    }

    pipeline::restore(&mut inventory, chosen, settings.restore_verbose).await
}

async fn choose(settings: &Settings, files: Vec<File>, filter: Filter) -> Result<Vec<File>, AppError> {
    let mut terminal = TerminalWrapper::start()?;
    let mut emitter = Emitter::start();
    let mut model = Model::new(settings.date_format);

    let result = run_app_loop(&mut terminal, &mut emitter, &mut model, files, filter).await;

    let mut errors = Vec::new();
    if let Err(error) = result {
        errors.push(error);
    }

    if let Err(error) = emitter.shutdown().await {
        errors.push(error);
    }

    if let Err(error) = terminal.shutdown() {
        errors.push(error);
    }

    if !errors.is_empty() {
        return Err(AppError::Aggregate(errors));
    }

    match model.outcome.take() {
        Some(outcome) => outcome,
        None => Ok(Vec::new()),
    }
}

async fn run_app_loop(
    terminal: &mut TerminalWrapper,
    emitter: &mut Emitter,
    model: &mut Model,
    files: Vec<File>,
    filter: Filter,
) -> Result<(), AppError> {
    model.set_layout(AppLayout::new(terminal.size()?));

    let actions = update::inventory::load(model, files, filter);
    if execute(emitter, actions) {
        return Ok(());
    }

    view::render_model(terminal, model)?;

    while let Some(envelope) = emitter.receiver.recv().await {
        for message in envelope.messages.iter() {
            if let Message::Resize(x, y) = message {
                terminal.resize(*x, *y)?;
            }
        }

        model.set_layout(AppLayout::new(terminal.size()?));

        let actions = update::update(model, envelope);
        if execute(emitter, actions) {
            break;
        }

        view::render_model(terminal, model)?;
    }

    Ok(())
}

/// Returns true once the loop should stop.
fn execute(emitter: &mut Emitter, actions: Vec<Action>) -> bool {
    let mut quit = false;
    for action in actions {
        tracing::trace!("executing action: {:?}", action);

        match action {
            Action::Quit => quit = true,
            Action::Task(task) => emitter.run(task),
        }
    }

    quit
}
