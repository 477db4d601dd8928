use std::{
    ffi::OsString,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{
    error::InventoryError,
    filter::{Filter, FilterSettings},
    model::File,
};

pub const INVENTORY_VERSION: u32 = 1;

/// Persistent log of every file moved into the junkyard.
///
/// Every mutation rewrites the whole file. There is no lock on the file, so
/// two processes mutating the same inventory concurrently lose the changes of
/// the one writing first.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Inventory {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub files: Vec<File>,
    #[serde(skip)]
    path: PathBuf,
}

impl Inventory {
    pub fn new(path: &Path) -> Self {
        Self {
            version: 0,
            files: Vec::new(),
            path: path.to_path_buf(),
        }
    }

    /// Loads the inventory at `path`. A missing file is recovered from its
    /// `.backup` sibling if one exists, an empty file yields an empty inventory.
    pub fn open(path: &Path) -> Result<Self, InventoryError> {
        tracing::debug!("opening inventory file: {:?}", path);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                tracing::warn!("creating inventory directory: {:?}", parent);
                fs::create_dir_all(parent)?;
            }
        }

        if !path.exists() {
            tracing::warn!("inventory file not found: {:?}", path);

            let backup = get_backup_path(path);
            if backup.exists() {
                tracing::warn!("restoring inventory from backup: {:?}", backup);
                fs::rename(&backup, path)?;
            } else {
                return Ok(Self::new(path));
            }
        }

        let content = fs::read(path)?;
        if content.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("inventory file is empty: {:?}", path);
            return Ok(Self::new(path));
        }

        let mut inventory: Inventory =
            serde_json::from_slice(&content).map_err(|source| InventoryError::CorruptStore {
                path: path.to_path_buf(),
                source,
            })?;

        inventory.path = path.to_path_buf();

        tracing::debug!("inventory version: {}", inventory.version);

        Ok(inventory)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        get_backup_path(&self.path)
    }

    pub fn backup(&mut self) -> Result<(), InventoryError> {
        let backup = self.backup_path();
        tracing::debug!("backing up inventory: {:?}", backup);

        self.set_version();
        write_to_file(self, &backup)
    }

    pub fn append_batch(&mut self, files: Vec<File>) -> Result<(), InventoryError> {
        tracing::debug!("appending {} entries to inventory: {:?}", files.len(), self.path);

        self.files.extend(files);
        self.persist()
    }

    pub fn remove_one(&mut self, id: &str) -> Result<(), InventoryError> {
        tracing::debug!("removing entry {} from inventory: {:?}", id, self.path);

        self.files.retain(|file| file.id != id);
        self.persist()
    }

    /// Visible subset of the entries. The stored entries stay untouched.
    pub fn filter(&self, settings: &FilterSettings) -> Result<Vec<File>, InventoryError> {
        let filter = Filter::new(settings)?;
        Ok(filter.apply(&self.files, Local::now()))
    }

    fn persist(&mut self) -> Result<(), InventoryError> {
        self.set_version();
        write_to_file(self, &self.path)
    }

    fn set_version(&mut self) {
        if self.version == 0 {
            self.version = INVENTORY_VERSION;
        }
    }
}

fn get_backup_path(path: &Path) -> PathBuf {
    let mut backup = OsString::from(path.as_os_str());
    backup.push(".backup");

    PathBuf::from(backup)
}

fn write_to_file(inventory: &Inventory, path: &Path) -> Result<(), InventoryError> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, inventory).map_err(InventoryError::SerializationFailed)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(())
}
