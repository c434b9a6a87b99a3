//! TreeWalker - physical depth-first traversal under a directory-handle budget
//!
//! Symlinks are reported but never followed, so cyclic links cannot trap the
//! walk. Each directory being descended keeps a frame on an explicit stack;
//! a frame either streams names from an open handle or replays names already
//! read into memory. When opening another directory would exceed the handle
//! budget, the oldest open frame is read to completion and its handle closed.

use std::ffi::OsString;
use std::fs::{self, DirEntry, Metadata, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, SearchError};

use super::config::WalkOptions;
use super::entry::{Entry, EntryKind};

/// Receives each entry in traversal order. Returning an error aborts the walk
/// and that error becomes the walk's result.
pub trait EntryVisitor {
    fn visit(&mut self, entry: &Entry) -> Result<()>;
}

impl<F> EntryVisitor for F
where
    F: FnMut(&Entry) -> Result<()>,
{
    fn visit(&mut self, entry: &Entry) -> Result<()> {
        self(entry)
    }
}

/// Walks a directory tree rooted at a single path.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    options: WalkOptions,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>, options: WalkOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Lazily enumerate entries. Each call starts a fresh traversal.
    pub fn iter(&self) -> Walk {
        Walk::new(self.root.clone(), self.options.clone())
    }

    /// Feed every entry to `visitor`, stopping at the first error.
    /// Returns the number of entries visited.
    pub fn walk<V: EntryVisitor + ?Sized>(&self, visitor: &mut V) -> Result<usize> {
        debug!(
            root = %self.root.display(),
            budget = self.options.effective_budget(),
            sorted = self.options.sort_by_name,
            "starting walk"
        );
        let mut visited = 0usize;
        for entry in self.iter() {
            let entry = entry?;
            visitor.visit(&entry)?;
            visited += 1;
        }
        debug!(visited, "walk finished");
        Ok(visited)
    }
}

impl IntoIterator for &TreeWalker {
    type Item = Result<Entry>;
    type IntoIter = Walk;

    fn into_iter(self) -> Walk {
        self.iter()
    }
}

enum DirSource {
    Open(ReadDir),
    Buffered(std::vec::IntoIter<OsString>),
}

/// A directory whose contents are being visited.
struct DirFrame {
    path: PathBuf,
    depth: usize,
    source: DirSource,
    /// Entry for this directory, held back until its contents are done.
    deferred: Option<Entry>,
}

impl DirFrame {
    fn is_open(&self) -> bool {
        matches!(self.source, DirSource::Open(_))
    }

    fn next_name(&mut self) -> io::Result<Option<OsString>> {
        match &mut self.source {
            DirSource::Open(read_dir) => read_dir
                .next()
                .transpose()
                .map(|e| e.map(|e| e.file_name())),
            DirSource::Buffered(names) => Ok(names.next()),
        }
    }

    /// Read the remaining names into memory, releasing the handle.
    fn spill(&mut self) -> io::Result<()> {
        let names = match &mut self.source {
            DirSource::Open(read_dir) => collect_names(read_dir)?,
            DirSource::Buffered(_) => return Ok(()),
        };
        self.source = DirSource::Buffered(names.into_iter());
        Ok(())
    }
}

fn collect_names(
    entries: impl Iterator<Item = io::Result<DirEntry>>,
) -> io::Result<Vec<OsString>> {
    entries.map(|e| e.map(|e| e.file_name())).collect()
}

fn classify(path: &Path, metadata: &Metadata) -> EntryKind {
    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        if fs::metadata(path).is_ok() {
            EntryKind::Symlink
        } else {
            EntryKind::DanglingSymlink
        }
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

/// Iterator over the entries of one traversal.
///
/// Yields `Err` at most once; the walk is over after that.
pub struct Walk {
    options: WalkOptions,
    root: Option<PathBuf>,
    stack: Vec<DirFrame>,
    open_handles: usize,
    finished: bool,
}

impl Walk {
    fn new(root: PathBuf, options: WalkOptions) -> Self {
        Self {
            options,
            root: Some(root),
            stack: Vec::new(),
            open_handles: 0,
            finished: false,
        }
    }

    /// Directory handles currently held by this walk.
    pub fn open_handles(&self) -> usize {
        self.open_handles
    }

    fn advance(&mut self) -> Result<Option<Entry>> {
        if let Some(root) = self.root.take() {
            if let Some(entry) = self.start(root)? {
                return Ok(Some(entry));
            }
        }

        loop {
            let next = match self.stack.last_mut() {
                None => return Ok(None),
                Some(frame) => match frame.next_name() {
                    Ok(name) => name.map(|name| (frame.path.join(name), frame.depth + 1)),
                    Err(e) => return Err(SearchError::traversal(&frame.path, e)),
                },
            };

            match next {
                Some((path, depth)) => {
                    if let Some(entry) = self.visit_child(path, depth)? {
                        return Ok(Some(entry));
                    }
                }
                None => {
                    if let Some(frame) = self.stack.pop() {
                        if frame.is_open() {
                            self.open_handles -= 1;
                        }
                        if let Some(entry) = frame.deferred {
                            return Ok(Some(entry));
                        }
                    }
                }
            }
        }
    }

    fn start(&mut self, root: PathBuf) -> Result<Option<Entry>> {
        if root.as_os_str().is_empty() {
            return Err(SearchError::InvalidArgument(
                "root path must not be empty".to_string(),
            ));
        }

        let metadata =
            fs::symlink_metadata(&root).map_err(|e| SearchError::traversal(&root, e))?;
        let kind = classify(&root, &metadata);
        if kind != EntryKind::Directory {
            return Ok(Some(Entry::new(root, metadata, kind, 0)));
        }

        // An unreadable root is a failure, not an entry.
        let read_dir = self
            .open_dir(&root)?
            .map_err(|e| SearchError::traversal(&root, e))?;
        let source = self.adopt(read_dir, &root)?;
        Ok(self.enter(root, metadata, 0, source))
    }

    fn visit_child(&mut self, path: PathBuf, depth: usize) -> Result<Option<Entry>> {
        let metadata =
            fs::symlink_metadata(&path).map_err(|e| SearchError::traversal(&path, e))?;
        let kind = classify(&path, &metadata);
        trace!(path = %path.display(), ?kind, "visit");

        if kind != EntryKind::Directory {
            return Ok(Some(Entry::new(path, metadata, kind, depth)));
        }

        let read_dir = match self.open_dir(&path)? {
            Ok(read_dir) => read_dir,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "directory is unreadable");
                return Ok(Some(Entry::new(
                    path,
                    metadata,
                    EntryKind::UnreadableDirectory,
                    depth,
                )));
            }
        };
        let source = self.adopt(read_dir, &path)?;
        Ok(self.enter(path, metadata, depth, source))
    }

    /// Open a directory, first making room under the budget when the handle
    /// will be kept. The inner error is the open failure itself.
    fn open_dir(&mut self, path: &Path) -> Result<io::Result<ReadDir>> {
        if !self.options.sort_by_name {
            self.reserve_handle()?;
        }
        Ok(fs::read_dir(path))
    }

    /// Turn a freshly opened directory into a frame source.
    fn adopt(&mut self, read_dir: ReadDir, path: &Path) -> Result<DirSource> {
        if self.options.sort_by_name {
            let mut names =
                collect_names(read_dir).map_err(|e| SearchError::traversal(path, e))?;
            names.sort();
            return Ok(DirSource::Buffered(names.into_iter()));
        }
        self.open_handles += 1;
        Ok(DirSource::Open(read_dir))
    }

    /// Make room for one more open handle by spilling the oldest open frame.
    fn reserve_handle(&mut self) -> Result<()> {
        if self.open_handles < self.options.effective_budget() {
            return Ok(());
        }
        if let Some(frame) = self.stack.iter_mut().find(|f| f.is_open()) {
            frame
                .spill()
                .map_err(|e| SearchError::traversal(&frame.path, e))?;
            debug!(
                path = %frame.path.display(),
                "closed directory handle to stay within budget"
            );
            self.open_handles -= 1;
        }
        Ok(())
    }

    fn enter(
        &mut self,
        path: PathBuf,
        metadata: Metadata,
        depth: usize,
        source: DirSource,
    ) -> Option<Entry> {
        let entry = Entry::new(path.clone(), metadata, EntryKind::Directory, depth);
        let (now, deferred) = if self.options.contents_first {
            (None, Some(entry.with_kind(EntryKind::DirectoryPost)))
        } else {
            (Some(entry), None)
        };
        self.stack.push(DirFrame {
            path,
            depth,
            source,
            deferred,
        });
        now
    }
}

impl Iterator for Walk {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                self.stack.clear();
                self.open_handles = 0;
                Some(Err(e))
            }
        }
    }
}
