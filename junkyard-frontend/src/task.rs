use std::path::PathBuf;

use chrono::{DateTime, Local};
use junkyard_inventory::{size::disk_usage, File, Filter};
use tokio::{sync::mpsc::Sender, task::JoinSet};

use crate::{
    error::AppError,
    event::{Envelope, Message},
    preview,
};

pub const NO_ENTRIES_FOUND: &str = "no deleted files found";

pub enum Task {
    LoadInventory(Vec<File>, Filter),
    LoadPreview(PathBuf),
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Task::LoadInventory(files, _) => write!(f, "LoadInventory({} files, _)", files.len()),
            Task::LoadPreview(path) => write!(f, "LoadPreview({:?})", path),
        }
    }
}

impl Eq for Task {}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Task::LoadInventory(f1, _), Task::LoadInventory(f2, _)) => f1 == f2,
            (Task::LoadPreview(p1), Task::LoadPreview(p2)) => p1 == p2,
            _ => false,
        }
    }
}

pub struct TaskManager {
    sender: Sender<Envelope>,
    tasks: JoinSet<Result<(), AppError>>,
}

impl TaskManager {
    pub fn new(sender: Sender<Envelope>) -> Self {
        Self {
            sender,
            tasks: JoinSet::new(),
        }
    }

    /// Both task kinds only read, so outstanding ones are aborted.
    pub async fn finishing(&mut self) -> Result<(), AppError> {
        self.tasks.abort_all();

        let mut errors = Vec::new();
        while let Some(task) = self.tasks.join_next().await {
            match task {
                Ok(Ok(())) => (),
                Ok(Err(error)) => {
                    tracing::error!("task result returned error: {:?}", error);
                    errors.push(error)
                }
                Err(error) if error.is_cancelled() => (),
                Err(error) => {
                    tracing::error!("task failed: {:?}", error);
                }
            };
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Aggregate(errors))
        }
    }

    pub fn run(&mut self, task: Task) {
        tracing::debug!("running task: {:?}", task);

        let sender = self.sender.clone();
        match task {
            Task::LoadInventory(files, filter) => self.tasks.spawn(async move {
                let files = tokio::task::spawn_blocking(move || {
                    prepare_entries(&files, &filter, Local::now())
                })
                .await?;

                let message = if files.is_empty() {
                    Message::LoadFailed(NO_ENTRIES_FOUND.to_string())
                } else {
                    Message::InventoryLoaded(files)
                };

                sender.send(Envelope::from_task(vec![message])).await?;

                Ok(())
            }),
            Task::LoadPreview(path) => self.tasks.spawn(async move {
                let content = preview::load(&path).await;

                let size_path = path.clone();
                let size = tokio::task::spawn_blocking(move || disk_usage(&size_path).ok()).await?;

                sender
                    .send(Envelope::from_task(vec![Message::PreviewLoaded(content, size)]))
                    .await?;

                Ok(())
            }),
        };
    }
}

/// Visible entries, newest first. Entries whose quarantine path is gone are
/// dropped.
pub fn prepare_entries(files: &[File], filter: &Filter, now: DateTime<Local>) -> Vec<File> {
    let mut files = filter.apply(files, now);
    files.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    files.retain(|file| {
        let exists = file.to.symlink_metadata().is_ok();
        if !exists {
            tracing::debug!("dropping entry {}, {:?} is gone", file.id, file.to);
        }
        exists
    });

    files
}

#[cfg(test)]
mod test {
    use std::fs;

    use chrono::{Duration, Local};
    use junkyard_inventory::{File, Filter, FilterSettings};

    use super::prepare_entries;

    fn file(dir: &std::path::Path, name: &str, days_ago: i64, create: bool) -> File {
        let to = dir.join(name);
        if create {
            fs::write(&to, name).unwrap();
        }

        File {
            name: name.to_string(),
            id: format!("id-{}", name),
            run_id: "run".to_string(),
            from: dir.join("origin").join(name),
            to,
            timestamp: Local::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn prepare_entries_sorts_newest_first_and_drops_gone() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            file(dir.path(), "old", 3, true),
            file(dir.path(), "gone", 1, false),
            file(dir.path(), "new", 0, true),
        ];

        let filter = Filter::new(&FilterSettings::default()).unwrap();
        let names: Vec<_> = prepare_entries(&files, &filter, Local::now())
            .into_iter()
            .map(|file| file.name)
            .collect();

        assert_eq!(vec!["new".to_string(), "old".to_string()], names);
    }

    #[test]
    fn prepare_entries_applies_filter() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            file(dir.path(), "a.txt", 0, true),
            file(dir.path(), "b.log", 0, true),
        ];

        let filter = Filter::new(&FilterSettings {
            exclude_globs: vec!["*.txt".to_string()],
            ..Default::default()
        })
        .unwrap();

        let result = prepare_entries(&files, &filter, Local::now());

        assert_eq!(1, result.len());
        assert_eq!("b.log", result[0].name);
    }
}
