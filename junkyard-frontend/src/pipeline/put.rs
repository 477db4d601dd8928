use std::path::{Path, PathBuf};

use junkyard_inventory::{File, Inventory, RunId};
use tokio::{fs, task::JoinSet};

use crate::{error::AppError, settings::Settings};

/// Moves every path into the junkyard and records the moved ones as one batch.
///
/// Relocations run concurrently, one task per path and without an upper
/// bound. The inventory is written once after all of them finished, so a
/// failing path never prevents the bookkeeping of the successful ones. A
/// failing backup only costs crash recovery and is logged.
#[tracing::instrument(skip(settings, paths), fields(count = paths.len()))]
pub async fn put(settings: &Settings, run_id: &RunId, paths: &[PathBuf]) -> Result<(), AppError> {
    if paths.is_empty() {
        return Err(AppError::NoPathsGiven);
    }

    let mut inventory = Inventory::open(&settings.inventory_path())?;

    let mut tasks = JoinSet::new();
    for (index, path) in paths.iter().enumerate() {
        let root = settings.trash_dir.clone();
        let run_id = run_id.clone();
        let path = path.clone();

        tasks.spawn(async move { (index, relocate(&root, &run_id, &path).await) });
    }

    let mut results: Vec<Option<Result<File, AppError>>> = (0..paths.len()).map(|_| None).collect();
    let mut errors = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(error) => {
                tracing::error!("relocation task failed: {:?}", error);
                errors.push(AppError::TaskJoinFailed(error));
            }
        }
    }

    let mut files = Vec::new();
    for result in results.into_iter().flatten() {
        match result {
            Ok(file) => files.push(file),
            Err(error) => {
                tracing::error!("relocation failed: {}", error);
                errors.push(error);
            }
        }
    }

    if !files.is_empty() {
        if let Err(error) = inventory.backup() {
            tracing::warn!("inventory backup failed: {}", error);
        }

        if let Err(error) = inventory.append_batch(files) {
            tracing::error!("recording moved entries failed: {}", error);
            errors.push(AppError::Inventory(error));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Aggregate(errors))
    }
}

async fn relocate(root: &Path, run_id: &RunId, path: &Path) -> Result<File, AppError> {
    if fs::symlink_metadata(path).await.is_err() {
        return Err(AppError::NotFound(path.to_path_buf()));
    }

    let file = File::derive(root, run_id, path)?;

    if let Some(parent) = file.to.parent() {
        if let Err(source) = fs::create_dir_all(parent).await {
            return Err(AppError::Move {
                from: file.from.clone(),
                to: file.to.clone(),
                source,
            });
        }
    }

    tracing::debug!("moving {:?} to {:?}", file.from, file.to);

    match fs::rename(&file.from, &file.to).await {
        Ok(()) => Ok(file),
        Err(source) => Err(AppError::Move {
            from: file.from.clone(),
            to: file.to.clone(),
            source,
        }),
    }
}
