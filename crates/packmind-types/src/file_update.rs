//! File operations flowing from the render pipeline into a git commit.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A file to create or overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModification {
    /// Repository-relative path.
    pub path: String,
    /// Full file content.
    pub content: String,
}

impl FileModification {
    /// Create a modification.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Whether a delete entry names a file or a whole directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteItemKind {
    /// A single file.
    File,
    /// A directory and everything under it.
    Directory,
}

/// A path to remove from the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItem {
    /// Repository-relative path.
    pub path: String,
    /// File or directory.
    pub kind: DeleteItemKind,
}

impl DeleteItem {
    /// Delete a single file.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: DeleteItemKind::File,
        }
    }

    /// Delete a directory recursively.
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: DeleteItemKind::Directory,
        }
    }
}

/// The full set of file operations for one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpdates {
    /// Files to create or overwrite.
    pub create_or_update: Vec<FileModification>,
    /// Paths to delete.
    pub delete: Vec<DeleteItem>,
}

impl FileUpdates {
    /// Whether there is nothing to commit.
    pub fn is_empty(&self) -> bool {
        self.create_or_update.is_empty() && self.delete.is_empty()
    }

    /// Merge `other` into `self`, skipping paths already present. The first
    /// entry for a path wins in both lists.
    pub fn merge(&mut self, other: FileUpdates) {
        let mut existing: HashSet<String> =
            self.create_or_update.iter().map(|f| f.path.clone()).collect();
        for file in other.create_or_update {
            if existing.insert(file.path.clone()) {
                self.create_or_update.push(file);
            }
        }

        let mut existing_deletes: HashSet<String> =
            self.delete.iter().map(|d| d.path.clone()).collect();
        for item in other.delete {
            if existing_deletes.insert(item.path.clone()) {
                self.delete.push(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_skips_duplicate_paths() {
        let mut base = FileUpdates {
            create_or_update: vec![FileModification::new("a.md", "one")],
            delete: vec![DeleteItem::file("gone.md")],
        };
        let other = FileUpdates {
            create_or_update: vec![
                FileModification::new("a.md", "two"),
                FileModification::new("b.md", "three"),
            ],
            delete: vec![DeleteItem::file("gone.md"), DeleteItem::directory("dir/")],
        };

        base.merge(other);

        assert_eq!(base.create_or_update.len(), 2);
        assert_eq!(base.create_or_update[0].content, "one");
        assert_eq!(base.create_or_update[1].path, "b.md");
        assert_eq!(base.delete.len(), 2);
        assert_eq!(base.delete[1].kind, DeleteItemKind::Directory);
    }

    #[test]
    fn empty_detection() {
        assert!(FileUpdates::default().is_empty());
        let updates = FileUpdates {
            create_or_update: Vec::new(),
            delete: vec![DeleteItem::file("x")],
        };
        assert!(!updates.is_empty());
    }
}
