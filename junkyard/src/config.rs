use std::{
    fs,
    path::{Path, PathBuf},
};

use junkyard_frontend::settings::{DateFormat, Settings};
use junkyard_inventory::{Filter, FilterSettings};
use serde::Deserialize;

use crate::Error;

pub const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TRASH_DIR: &str = "~/.junkyard";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub core: CoreConfig,
    pub ui: UiConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub trash_dir: String,
    pub restore: RestoreConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            trash_dir: DEFAULT_TRASH_DIR.to_string(),
            restore: RestoreConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RestoreConfig {
    pub verbose: bool,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub date_format: DateFormatConfig,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DateFormatConfig {
    Absolute,
    #[default]
    Relative,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub include: IncludeConfig,
    pub exclude: ExcludeConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IncludeConfig {
    /// Days, zero disables the age filter.
    pub period: Option<u32>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExcludeConfig {
    pub files: Vec<String>,
    pub patterns: Vec<String>,
    pub globs: Vec<String>,
    pub size: SizeConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SizeConfig {
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Resolves paths and compiles the filter once, so invalid patterns fail
    /// before anything is moved or drawn.
    pub fn into_settings(self) -> Result<Settings, Error> {
        let filter = FilterSettings {
            exclude_names: self.history.exclude.files,
            exclude_patterns: self.history.exclude.patterns,
            exclude_globs: self.history.exclude.globs,
            exclude_size_min: self.history.exclude.size.min,
            exclude_size_max: self.history.exclude.size.max,
            include_period: self.history.include.period,
        };

        Filter::new(&filter)?;

        let date_format = match self.ui.date_format {
            DateFormatConfig::Absolute => DateFormat::Absolute,
            DateFormatConfig::Relative => DateFormat::Relative,
        };

        let mut settings = Settings::new(expand_home(&self.core.trash_dir));
        settings.date_format = date_format;
        settings.filter = filter;
        settings.restore_verbose = self.core.restore.verbose;

        Ok(settings)
    }
}

pub fn get_default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("junkyard").join("config.toml"))
}

/// Reads the config at `path`. A missing file yields the defaults.
pub fn load(path: Option<&Path>) -> Result<Config, Error> {
    let path = match path {
        Some(it) if it.exists() => it,
        _ => return Ok(Config::default()),
    };

    let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&content, path)
}

fn parse(content: &str, path: &Path) -> Result<Config, Error> {
    toml::from_str(content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn expand_home(path: &str) -> PathBuf {
    let home = match dirs::home_dir() {
        Some(it) => it,
        None => return PathBuf::from(path),
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
