use std::collections::BTreeMap;

use junkyard_inventory::File;

/// Entries marked for restoration during one session, keyed by id. Ids are
/// time sortable, so iteration yields the entries in deletion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    entries: BTreeMap<String, File>,
}

impl SelectionSet {
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn files(&self) -> Vec<File> {
        self.entries.values().cloned().collect()
    }

    /// Returns true if the file is selected afterwards.
    pub fn toggle(&mut self, file: &File) -> bool {
        if self.entries.remove(&file.id).is_some() {
            false
        } else {
            self.entries.insert(file.id.clone(), file.clone());
            true
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use chrono::Local;
    use junkyard_inventory::File;

    use super::SelectionSet;

    fn file(id: &str) -> File {
        File {
            name: format!("name-{}", id),
            id: id.to_string(),
            run_id: "run".to_string(),
            from: PathBuf::from("/origin"),
            to: PathBuf::from("/junkyard"),
            timestamp: Local::now(),
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SelectionSet::default();

        assert!(selection.toggle(&file("1")));
        assert!(selection.contains("1"));

        assert!(!selection.toggle(&file("1")));
        assert!(selection.is_empty());
    }

    #[test]
    fn files_are_ordered_by_id() {
        let mut selection = SelectionSet::default();
        selection.toggle(&file("b"));
        selection.toggle(&file("a"));

        let ids: Vec<_> = selection.files().into_iter().map(|f| f.id).collect();

        assert_eq!(vec!["a".to_string(), "b".to_string()], ids);
    }
}
