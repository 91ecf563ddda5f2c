//! The user's set of named collections and their files on disk.
//!
//! Each collection lives in its own `<name>.json` file. Collections are
//! loaded once, edited in memory and written back together by
//! [`CollectionSet::save_all`]. Only files the set loaded or wrote itself are
//! ever removed; anything else in the directory is left alone.

use crate::error::{CollectionsError, Result};
use crate::models::Collection;
use crate::store;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct CollectionSet {
    collections: Vec<Collection>,
    /// File names loaded by `load_dir` or written by `save_all`.
    owned_files: HashSet<String>,
}

impl PartialEq for CollectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.collections == other.collections
    }
}

impl CollectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file in `dir`, ordered by file name.
    ///
    /// A missing directory yields an empty set. A file that fails to parse
    /// is skipped with a warning and never touched by a later save; two
    /// files carrying the same collection name keep the first.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut set = Self::new();
        if !dir.exists() {
            return Ok(set);
        }

        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        files.sort();

        for file in files {
            match store::read_json::<Collection>(&file) {
                Ok(collection) => {
                    if set.get(&collection.name).is_some() {
                        log::warn!(
                            "Collection '{}' in {} duplicates an earlier file, skipping",
                            collection.name,
                            file.display()
                        );
                        continue;
                    }
                    if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
                        set.owned_files.insert(name.to_string());
                    }
                    set.collections.push(collection);
                }
                Err(e) => log::warn!("Skipping unreadable collection {}: {}", file.display(), e),
            }
        }
        log::info!("Loaded {} collections from {}", set.len(), dir.display());
        Ok(set)
    }

    /// Write every collection to `dir`, replacing existing files.
    ///
    /// Files this set loaded or wrote earlier that no longer belong to any
    /// collection (removed or renamed) are deleted.
    pub fn save_all(&mut self, dir: &Path) -> Result<()> {
        let mut written = HashSet::new();
        for collection in &self.collections {
            if !written.insert(file_name(&collection.name)) {
                return Err(CollectionsError::InvalidArgument(format!(
                    "Collection '{}' maps to the same file as another collection",
                    collection.name
                )));
            }
        }

        fs::create_dir_all(dir)?;
        for collection in &self.collections {
            store::write_json_atomic(&dir.join(file_name(&collection.name)), collection)?;
        }

        let written_folded: HashSet<String> = written.iter().map(|n| n.to_lowercase()).collect();
        for stale in self.owned_files.difference(&written) {
            // Same file as a fresh write on case-insensitive filesystems.
            if written_folded.contains(&stale.to_lowercase()) {
                continue;
            }
            let path = dir.join(stale);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        self.owned_files = written;
        log::info!("Saved {} collections to {}", self.len(), dir.display());
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.name == name)
    }

    /// Create an empty collection.
    pub fn create(&mut self, name: &str) -> Result<&mut Collection> {
        self.insert(Collection::new(name))
    }

    /// Add a collection whose name is not yet taken.
    pub fn insert(&mut self, collection: Collection) -> Result<&mut Collection> {
        validate_name(&collection.name)?;
        if self.get(&collection.name).is_some() {
            return Err(CollectionsError::NameTaken(collection.name));
        }
        self.collections.push(collection);
        let last = self.collections.len() - 1;
        Ok(&mut self.collections[last])
    }

    /// Rename a collection. Renaming to its current name is a no-op.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        validate_name(new)?;
        if self.get(old).is_none() {
            return Err(CollectionsError::NotFound(format!("Collection '{}'", old)));
        }
        if !self.is_name_available(new, old) {
            return Err(CollectionsError::NameTaken(new.to_string()));
        }
        if let Some(collection) = self.get_mut(old) {
            collection.name = new.to_string();
        }
        Ok(())
    }

    /// Whether `new_name` may be given to the collection currently called
    /// `current`.
    pub fn is_name_available(&self, new_name: &str, current: &str) -> bool {
        new_name == current || self.get(new_name).is_none()
    }

    pub fn remove(&mut self, name: &str) -> Option<Collection> {
        let pos = self.collections.iter().position(|c| c.name == name)?;
        Some(self.collections.remove(pos))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CollectionsError::InvalidArgument(
            "Collection name must not be empty".into(),
        ));
    }
    Ok(())
}

/// File name of a collection: its name with path separators replaced.
pub fn file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    format!("{}.json", safe)
}
