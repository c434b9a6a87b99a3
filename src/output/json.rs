//! JSON lines output

use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{Result, SearchError};
use crate::tree::{Entry, EntryKind};

/// Serializable view of a reported entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryRecord {
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl EntryRecord {
    pub fn new(entry: &Entry) -> Self {
        Self {
            path: entry.path().to_string_lossy().to_string(),
            name: entry.file_name().to_string_lossy().to_string(),
            kind: entry.kind(),
            size: None,
            modified: None,
            target: None,
        }
    }

    pub fn with_metadata(mut self, entry: &Entry) -> Result<Self> {
        let metadata = entry.metadata();
        let modified = metadata
            .modified()
            .map_err(|e| SearchError::traversal(entry.path(), e))?;
        self.size = Some(metadata.len());
        self.modified = Some(DateTime::<Local>::from(modified));
        Ok(self)
    }

    pub fn with_target(mut self, target: &Path) -> Self {
        self.target = Some(target.to_string_lossy().to_string());
        self
    }

    /// Single-line JSON terminated by a newline.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
