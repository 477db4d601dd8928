use chrono::{DateTime, Duration, Local};
use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::{
    error::InventoryError,
    model::File,
    size::{disk_usage, parse_human_size},
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSettings {
    pub exclude_names: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub exclude_globs: Vec<String>,
    pub exclude_size_min: Option<String>,
    pub exclude_size_max: Option<String>,
    pub include_period: Option<u32>,
}

/// Compiled form of [`FilterSettings`]. Applying it never touches the given entries.
#[derive(Clone, Debug)]
pub struct Filter {
    names: Vec<String>,
    patterns: Vec<Regex>,
    globs: Vec<GlobMatcher>,
    size_min: Option<u64>,
    size_max: Option<u64>,
    period: Option<Duration>,
}

impl Filter {
    pub fn new(settings: &FilterSettings) -> Result<Self, InventoryError> {
        let mut patterns = Vec::new();
        for pattern in &settings.exclude_patterns {
            match Regex::new(pattern) {
                Ok(regex) => patterns.push(regex),
                Err(error) => return Err(InventoryError::InvalidPattern(pattern.clone(), error)),
            }
        }

        let mut globs = Vec::new();
        for glob in &settings.exclude_globs {
            match Glob::new(glob) {
                Ok(it) => globs.push(it.compile_matcher()),
                Err(error) => return Err(InventoryError::InvalidGlob(glob.clone(), error)),
            }
        }

        Ok(Self {
            names: settings.exclude_names.clone(),
            patterns,
            globs,
            size_min: resolve_size_bound(&settings.exclude_size_min),
            size_max: resolve_size_bound(&settings.exclude_size_max),
            period: settings
                .include_period
                .filter(|days| *days > 0)
                .map(|days| Duration::days(i64::from(days))),
        })
    }

    #[tracing::instrument(skip(self, files))]
    pub fn apply(&self, files: &[File], now: DateTime<Local>) -> Vec<File> {
        let files: Vec<_> = files
            .iter()
            .filter(|file| !self.names.contains(&file.name))
            .collect();

        let files: Vec<_> = files
            .into_iter()
            .filter(|file| !self.is_pattern_excluded(&file.name))
            .collect();

        let files: Vec<_> = files
            .into_iter()
            .filter(|file| !self.is_size_excluded(file))
            .collect();

        let files: Vec<_> = files
            .into_iter()
            .filter(|file| self.is_in_period(file, &now))
            .cloned()
            .collect();

        tracing::debug!("filtered entries: {}", files.len());

        files
    }

    fn is_pattern_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(name))
            || self.globs.iter().any(|glob| glob.is_match(name))
    }

    fn is_size_excluded(&self, file: &File) -> bool {
        if self.size_min.is_none() && self.size_max.is_none() {
            return false;
        }

        let size = match disk_usage(&file.to) {
            Ok(it) => it,
            Err(error) => {
                tracing::debug!("size of {:?} unresolvable: {:?}", file.to, error);
                return false;
            }
        };

        if self.size_min.is_some_and(|min| size <= min) {
            return true;
        }

        self.size_max.is_some_and(|max| max <= size)
    }

    fn is_in_period(&self, file: &File, now: &DateTime<Local>) -> bool {
        match self.period {
            Some(period) => now.signed_duration_since(file.timestamp) < period,
            None => true,
        }
    }
}

fn resolve_size_bound(bound: &Option<String>) -> Option<u64> {
    let bound = bound.as_deref()?;
    let size = parse_human_size(bound);
    if size.is_none() {
        tracing::warn!("ignoring invalid size bound: {:?}", bound);
    }
    size
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use chrono::{Duration, Local};

    use crate::model::File;

    use super::{Filter, FilterSettings};

    fn file(name: &str, days_ago: i64) -> File {
        File {
            name: name.to_string(),
            id: format!("id-{}", name),
            run_id: "run".to_string(),
            from: PathBuf::from("/origin").join(name),
            to: PathBuf::from("/does/not/exist").join(name),
            timestamp: Local::now() - Duration::days(days_ago),
        }
    }

    fn names(files: &[File]) -> Vec<&str> {
        files.iter().map(|file| file.name.as_str()).collect()
    }

    #[test]
    fn default_keeps_everything() {
        let files = vec![file("a.txt", 0), file("b.log", 400)];
        let filter = Filter::new(&FilterSettings::default()).unwrap();

        assert_eq!(vec!["a.txt", "b.log"], names(&filter.apply(&files, Local::now())));
    }

    #[test]
    fn exclude_names_and_patterns() {
        let files = vec![file(".DS_Store", 0), file("go.sum", 0), file("main.go", 0)];
        let filter = Filter::new(&FilterSettings {
            exclude_names: vec![".DS_Store".to_string()],
            exclude_patterns: vec![r"\.sum$".to_string()],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(vec!["main.go"], names(&filter.apply(&files, Local::now())));
    }

    #[test]
    fn include_period_drops_old_entries() {
        let files = vec![file("new", 1), file("old", 10)];
        let filter = Filter::new(&FilterSettings {
            include_period: Some(7),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(vec!["new"], names(&filter.apply(&files, Local::now())));
    }

    #[test]
    fn zero_period_is_no_filter() {
        let files = vec![file("old", 1000)];
        let filter = Filter::new(&FilterSettings {
            include_period: Some(0),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(1, filter.apply(&files, Local::now()).len());
    }

    #[test]
    fn unmeasurable_size_is_kept() {
        let files = vec![file("gone", 0)];
        let filter = Filter::new(&FilterSettings {
            exclude_size_min: Some("1GB".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(1, filter.apply(&files, Local::now()).len());
    }

    #[test]
    fn invalid_pattern_fails() {
        let result = Filter::new(&FilterSettings {
            exclude_patterns: vec!["(".to_string()],
            ..Default::default()
        });

        assert!(result.is_err());
    }
}
