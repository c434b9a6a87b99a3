//! Search configuration built once before traversal

use std::path::{Path, PathBuf};

use regex::bytes::{Regex, RegexBuilder};

use crate::error::{Result, SearchError};
use crate::output::DEFAULT_BUFFER_CAPACITY;
use crate::tree::{EntryFilter, WalkOptions};

/// Independent switches controlling what is matched and printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayFlags {
    /// Prefix each entry with its modification time and size.
    pub show_metadata: bool,
    /// Append ` -> target` to symlinks.
    pub resolve_links: bool,
    /// Match and print the basename instead of the full path.
    pub match_basename: bool,
}

/// How reported entries are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    /// One JSON object per line.
    JsonLines,
}

/// Immutable description of one search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    root: PathBuf,
    pattern: Option<Regex>,
    flags: DisplayFlags,
    walk: WalkOptions,
    buffer_capacity: usize,
    format: OutputFormat,
}

impl SearchConfig {
    /// Validate the root and compile the pattern.
    /// `None` for the pattern matches every entry.
    ///
    /// The pattern is compiled in byte mode: `.` and negated classes match
    /// any byte, so names that are not UTF-8 can still match. Literal
    /// non-ASCII characters match their UTF-8 encoding; classes such as `\w`
    /// are ASCII-only.
    pub fn new(root: impl Into<PathBuf>, pattern: Option<&str>) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(SearchError::InvalidArgument(
                "root path must not be empty".to_string(),
            ));
        }
        let pattern = pattern
            .map(|p| RegexBuilder::new(p).unicode(false).build())
            .transpose()?;

        Ok(Self {
            root,
            pattern,
            flags: DisplayFlags::default(),
            walk: WalkOptions::default(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            format: OutputFormat::default(),
        })
    }

    pub fn with_flags(mut self, flags: DisplayFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_walk_options(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn walk_options(&self) -> &WalkOptions {
        &self.walk
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn filter(&self) -> EntryFilter {
        EntryFilter::new(self.pattern.clone(), self.flags.match_basename)
    }
}
