use std::path::PathBuf;

use junkyard_inventory::InventoryError;
use thiserror::Error;

use crate::event::Envelope;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("sending message failed")]
    ActionSendFailed(#[from] tokio::sync::mpsc::error::SendError<Envelope>),
    #[error("{}", format_aggregate(.0))]
    Aggregate(Vec<AppError>),
    #[error("file operation failed: {0}")]
    FileOperationFailed(#[from] std::io::Error),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("{0}")]
    Load(String),
    #[error("moving {} to {} failed: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("too few arguments")]
    NoPathsGiven,
    #[error("{}: no such file or directory", .0.display())]
    NotFound(PathBuf),
    #[error("task failed: {0}")]
    TaskJoinFailed(#[from] tokio::task::JoinError),
    #[error("terminal not initialized")]
    TerminalNotInitialized,
}

fn format_aggregate(errors: &[AppError]) -> String {
    let mut content = if errors.len() == 1 {
        String::from("1 error occurred:")
    } else {
        format!("{} errors occurred:", errors.len())
    };

    for error in errors {
        content.push_str(&format!("\n\t* {}", error));
    }

    content
}
