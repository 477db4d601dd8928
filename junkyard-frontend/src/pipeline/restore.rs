use std::path::{Path, PathBuf};

use junkyard_inventory::{File, Inventory};
use tokio::fs;

use crate::error::AppError;

/// Moves the chosen entries back to where they came from. A live file at the
/// origin is never replaced, the entry lands next to it suffixed with its id.
///
/// Entries are only dropped from the inventory once their rename succeeded.
/// Every removal is attempted on its own, failures are reported together
/// with the failed renames.
#[tracing::instrument(skip(inventory, files), fields(count = files.len()))]
pub async fn restore(
    inventory: &mut Inventory,
    files: Vec<File>,
    verbose: bool,
) -> Result<(), AppError> {
    let mut restored = Vec::new();
    let mut errors = Vec::new();

    for file in files {
        match relocate(&file).await {
            Ok(target) => {
                if verbose {
                    println!("restored {} to {}", file.name, target.display());
                }
                restored.push(file);
            }
            Err(error) => {
                tracing::error!("restoring {} failed: {}", file.id, error);
                errors.push(error);
            }
        }
    }

    if !restored.is_empty() {
        if let Err(error) = inventory.backup() {
            tracing::error!("inventory backup failed: {}", error);
            errors.push(AppError::Inventory(error));
        }

        for file in restored {
            if let Err(error) = inventory.remove_one(&file.id) {
                tracing::error!("removing {} from inventory failed: {}", file.id, error);
                errors.push(AppError::Inventory(error));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Aggregate(errors))
    }
}

async fn relocate(file: &File) -> Result<PathBuf, AppError> {
    if !exists(&file.to).await {
        return Err(AppError::NotFound(file.to.clone()));
    }

    let target = if exists(&file.from).await {
        tracing::warn!("{:?} exists, restoring next to it", file.from);
        file.suffixed_origin()
    } else {
        file.from.clone()
    };

    if let Some(parent) = target.parent() {
        if !exists(parent).await {
            if let Err(source) = fs::create_dir_all(parent).await {
                return Err(AppError::Move {
                    from: file.to.clone(),
                    to: target,
                    source,
                });
            }
        }
    }

    tracing::debug!("moving {:?} to {:?}", file.to, target);

    match fs::rename(&file.to, &target).await {
        Ok(()) => Ok(target),
        Err(source) => Err(AppError::Move {
            from: file.to.clone(),
            to: target,
            source,
        }),
    }
}

async fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).await.is_ok()
}
