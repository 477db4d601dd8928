use std::{
    env,
    ffi::OsString,
    fmt::Display,
    path::{Component, Path, PathBuf},
};

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InventoryError;

/// Identifier shared by every entry created within one deletion invocation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RunId(String);

impl RunId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RunId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct File {
    pub name: String,
    pub id: String,
    #[serde(rename = "group_id")]
    pub run_id: String,
    pub from: PathBuf,
    pub to: PathBuf,
    pub timestamp: DateTime<Local>,
}

impl File {
    /// Builds the entry for `path` with a fresh id. Nothing is touched on disk.
    pub fn derive(root: &Path, run_id: &RunId, path: &Path) -> Result<Self, InventoryError> {
        let from = absolute(path)?;
        let name = match from.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => return Err(InventoryError::InvalidPath(path.to_path_buf())),
        };

        let id = Uuid::now_v7().to_string();
        let timestamp = Local::now();
        let to = quarantine_path(root, &timestamp, run_id.as_str(), &name, &id);

        Ok(Self {
            name,
            id,
            run_id: run_id.to_string(),
            from,
            to,
            timestamp,
        })
    }

    /// Original path with `.<id>` appended, used when the original is occupied.
    pub fn suffixed_origin(&self) -> PathBuf {
        let mut path = OsString::from(self.from.as_os_str());
        path.push(".");
        path.push(&self.id);

        PathBuf::from(path)
    }
}

pub fn quarantine_path(
    root: &Path,
    timestamp: &DateTime<Local>,
    run_id: &str,
    name: &str,
    id: &str,
) -> PathBuf {
    root.join(format!("{:04}", timestamp.year()))
        .join(format!("{:02}", timestamp.month()))
        .join(format!("{:02}", timestamp.day()))
        .join(run_id)
        .join(format!("{}.{}", name, id))
}

fn absolute(path: &Path) -> Result<PathBuf, InventoryError> {
    if path.is_absolute() {
        Ok(clean(path))
    } else {
        Ok(clean(&env::current_dir()?.join(path)))
    }
}

fn clean(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                result.push(component.as_os_str())
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(result.components().next_back(), Some(Component::Normal(_))) {
                    result.pop();
                }
            }
        }
    }
    result
}
