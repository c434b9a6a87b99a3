//! Reporter - filters visited entries and formats the survivors into the buffer

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::trace;

use crate::config::{DisplayFlags, OutputFormat, SearchConfig};
use crate::error::{Result, SearchError};
use crate::tree::{Entry, EntryFilter, EntryVisitor};

use super::buffer::OutputBuffer;
use super::format::metadata_columns;
use super::json::EntryRecord;

/// Entry visitor that writes matching entries through an [`OutputBuffer`].
///
/// Output is only guaranteed to reach the stream after [`Reporter::finish`];
/// a reporter dropped after a failed walk discards what it still holds.
pub struct Reporter<W: Write> {
    filter: EntryFilter,
    flags: DisplayFlags,
    format: OutputFormat,
    buffer: OutputBuffer<W>,
    reported: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(config: &SearchConfig, out: W) -> Self {
        Self {
            filter: config.filter(),
            flags: config.flags(),
            format: config.format(),
            buffer: OutputBuffer::new(out, config.buffer_capacity()),
            reported: 0,
        }
    }

    /// Entries that passed the filter so far.
    pub fn reported(&self) -> usize {
        self.reported
    }

    /// Drain the buffer and hand back the stream.
    pub fn finish(mut self) -> Result<W> {
        self.buffer.drain()?;
        Ok(self.buffer.into_inner())
    }

    fn link_target(&self, entry: &Entry) -> Result<Option<PathBuf>> {
        if !(self.flags.resolve_links && entry.kind().is_symlink()) {
            return Ok(None);
        }
        fs::read_link(entry.path())
            .map(Some)
            .map_err(|source| SearchError::LinkResolution {
                path: entry.path().to_path_buf(),
                source,
            })
    }

    /// Names and link targets are copied as raw bytes, never re-encoded.
    fn plain_line(&self, entry: &Entry) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        if self.flags.show_metadata {
            line.extend_from_slice(metadata_columns(entry.path(), entry.metadata())?.as_bytes());
        }

        let name = if self.flags.match_basename {
            entry.file_name()
        } else {
            entry.path().as_os_str()
        };
        line.extend_from_slice(name.as_encoded_bytes());

        if let Some(target) = self.link_target(entry)? {
            line.extend_from_slice(b" -> ");
            line.extend_from_slice(target.as_os_str().as_encoded_bytes());
        }
        line.push(b'\n');
        Ok(line)
    }

    fn json_line(&self, entry: &Entry) -> Result<Vec<u8>> {
        let mut record = EntryRecord::new(entry);
        if self.flags.show_metadata {
            record = record.with_metadata(entry)?;
        }
        if let Some(target) = self.link_target(entry)? {
            record = record.with_target(&target);
        }
        Ok(record.to_line()?.into_bytes())
    }
}

impl<W: Write> EntryVisitor for Reporter<W> {
    fn visit(&mut self, entry: &Entry) -> Result<()> {
        if !self.filter.is_reportable(entry) {
            return Ok(());
        }
        trace!(path = %entry.path().display(), "report");

        // The whole line is built before anything is buffered so a failed
        // link lookup leaves no partial output behind.
        let line = match self.format {
            OutputFormat::Plain => self.plain_line(entry)?,
            OutputFormat::JsonLines => self.json_line(entry)?,
        };
        self.buffer.append(&line)?;
        self.reported += 1;
        Ok(())
    }
}
