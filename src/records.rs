//! Record store.
//!
//! An ordered list of `(name, source, destination)` entries mirroring every
//! active link. The store only keeps the list; checking that a record still
//! matches the filesystem is the caller's job.

use std::path::{Path, PathBuf};

/// One active link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// `parent/basename` of the destination; see [`record_name`].
    pub name: String,
    /// The symlink.
    pub source_path: PathBuf,
    /// The real content.
    pub destination_path: PathBuf,
}

impl LinkRecord {
    pub fn new(source_path: impl Into<PathBuf>, destination_path: impl Into<PathBuf>) -> Self {
        let destination_path = destination_path.into();
        Self {
            name: record_name(&destination_path),
            source_path: source_path.into(),
            destination_path,
        }
    }
}

/// Two-segment key for a path: `basename(dirname(path))/basename(path)`.
///
/// Independent of the absolute prefix, so the same key comes out wherever
/// the managed directory is mounted.
pub fn record_name(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.parent().and_then(Path::file_name) {
        Some(dir) => Path::new(dir).join(file).to_string_lossy().into_owned(),
        None => file,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<LinkRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a freshly created link.
    pub fn add_record(
        &mut self,
        source_path: impl Into<PathBuf>,
        destination_path: impl Into<PathBuf>,
    ) -> &LinkRecord {
        self.records
            .push(LinkRecord::new(source_path, destination_path));
        &self.records[self.records.len() - 1]
    }

    /// Index of the first record called `name`.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    /// Remove the record at `index`, keeping the order of the rest.
    pub fn remove_record(&mut self, index: usize) -> Option<LinkRecord> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&LinkRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Restore a record read back from the manifest, name included.
    pub(crate) fn push_loaded(&mut self, record: LinkRecord) {
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_parent_and_file() {
        assert_eq!(record_name(Path::new("/home/u/dotfiles/.bashrc")), "dotfiles/.bashrc");
        assert_eq!(record_name(Path::new("/top")), "top");
    }

    #[test]
    fn add_then_find_by_equivalent_key() {
        let mut store = RecordStore::new();
        store.add_record("/home/u/.vimrc", "/home/u/dotfiles/.vimrc");
        store.add_record("/home/u/.bashrc", "/home/u/dotfiles/.bashrc");

        // same two trailing segments under a different prefix
        let key = record_name(Path::new("/mnt/backup/dotfiles/.bashrc"));
        assert_eq!(store.find_by_name(&key), Some(1));
        assert_eq!(store.find_by_name("dotfiles/.zshrc"), None);
    }

    #[test]
    fn remove_preserves_order() {
        let mut store = RecordStore::new();
        for name in ["a", "b", "c", "d"] {
            store.add_record(format!("/src/{name}"), format!("/dst/store/{name}"));
        }

        let removed = store.remove_record(1).unwrap();
        assert_eq!(removed.name, "store/b");

        let names: Vec<_> = store.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["store/a", "store/c", "store/d"]);
        assert!(store.remove_record(10).is_none());
        assert_eq!(store.len(), 3);
    }
}
