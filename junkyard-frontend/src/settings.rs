use std::path::PathBuf;

use junkyard_inventory::FilterSettings;

pub const INVENTORY_FILE_NAME: &str = "history.json";

#[derive(Clone, Debug)]
pub struct Settings {
    pub date_format: DateFormat,
    pub filter: FilterSettings,
    pub restore_verbose: bool,
    pub trash_dir: PathBuf,
}

impl Settings {
    pub fn new(trash_dir: PathBuf) -> Self {
        Self {
            date_format: DateFormat::default(),
            filter: FilterSettings::default(),
            restore_verbose: false,
            trash_dir,
        }
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.trash_dir.join(INVENTORY_FILE_NAME)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DateFormat {
    Absolute,
    #[default]
    Relative,
}

impl DateFormat {
    pub fn toggle(self) -> Self {
        match self {
            DateFormat::Absolute => DateFormat::Relative,
            DateFormat::Relative => DateFormat::Absolute,
        }
    }
}
