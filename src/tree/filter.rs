//! Entry filtering by pattern

use std::ffi::OsStr;

use regex::bytes::Regex;

use super::entry::Entry;

/// Decides which visited entries are reported.
///
/// The pattern is searched for anywhere in the candidate string (the full
/// path, or the basename when `match_basename` is set) unless it anchors
/// itself. Matching runs on the raw path bytes; with a byte-mode pattern
/// (as built by `SearchConfig`) names that are not UTF-8 match too.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pattern: Option<Regex>,
    match_basename: bool,
}

impl EntryFilter {
    pub fn new(pattern: Option<Regex>, match_basename: bool) -> Self {
        Self {
            pattern,
            match_basename,
        }
    }

    /// The string the pattern is tested against.
    pub fn candidate<'e>(&self, entry: &'e Entry) -> &'e OsStr {
        if self.match_basename {
            entry.file_name()
        } else {
            entry.path().as_os_str()
        }
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(self.candidate(entry).as_encoded_bytes()),
            None => true,
        }
    }

    /// The root directory itself is never reported; a root that is not a
    /// directory is treated like any other entry.
    pub fn is_reportable(&self, entry: &Entry) -> bool {
        if entry.depth() == 0 && entry.kind().is_dir() {
            return false;
        }
        self.matches(entry)
    }
}
