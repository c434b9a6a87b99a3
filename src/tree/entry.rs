//! Entries produced by the walker

use std::ffi::OsStr;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Classification of a visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    /// Directory reported before its contents.
    Directory,
    /// Directory reported after its contents.
    DirectoryPost,
    Symlink,
    /// Symlink whose target cannot be resolved.
    DanglingSymlink,
    /// Directory that could not be opened; its contents are not visited.
    UnreadableDirectory,
    Other,
}

impl EntryKind {
    pub fn is_symlink(self) -> bool {
        matches!(self, EntryKind::Symlink | EntryKind::DanglingSymlink)
    }

    pub fn is_dir(self) -> bool {
        matches!(
            self,
            EntryKind::Directory | EntryKind::DirectoryPost | EntryKind::UnreadableDirectory
        )
    }
}

/// One filesystem node visited during traversal.
///
/// `metadata` is taken without following symlinks, so a link reports its own
/// size and modification time.
#[derive(Debug, Clone)]
pub struct Entry {
    path: PathBuf,
    metadata: Metadata,
    kind: EntryKind,
    depth: usize,
}

impl Entry {
    pub(crate) fn new(path: PathBuf, metadata: Metadata, kind: EntryKind, depth: usize) -> Self {
        Self {
            path,
            metadata,
            kind,
            depth,
        }
    }

    /// Path as constructed from the traversal root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component. Paths without one (`.`, `/`) are their own name.
    pub fn file_name(&self) -> &OsStr {
        basename(&self.path)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// 0 for the root, incremented per level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }
}

pub(crate) fn basename(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}
