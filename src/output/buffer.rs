//! Fragment buffer that batches writes to the output stream

use std::io::Write;

use tracing::trace;

use crate::error::{Result, SearchError};

/// Fragments held before a flush unless configured otherwise.
pub const DEFAULT_BUFFER_CAPACITY: usize = 500;

/// Ordered, bounded queue of byte fragments.
///
/// Fragments are written strictly in the order they were appended. When the
/// number of pending fragments reaches `capacity`, all of them are written
/// to the stream as one batch and released. Dropping the buffer without
/// calling [`OutputBuffer::drain`] discards whatever is still pending.
pub struct OutputBuffer<W: Write> {
    out: W,
    pending: Vec<Vec<u8>>,
    capacity: usize,
    flushes: usize,
}

impl<W: Write> OutputBuffer<W> {
    /// A capacity of 0 is treated as 1.
    pub fn new(out: W, capacity: usize) -> Self {
        Self {
            out,
            pending: Vec::new(),
            capacity: capacity.max(1),
            flushes: 0,
        }
    }

    /// Fragments are raw bytes so file names that are not UTF-8 pass through
    /// unchanged.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let mut fragment = Vec::new();
        fragment.try_reserve_exact(bytes.len())?;
        fragment.extend_from_slice(bytes);

        self.pending.try_reserve(1)?;
        self.pending.push(fragment);

        if self.pending.len() >= self.capacity {
            self.write_pending()?;
            self.flushes += 1;
            trace!(flushes = self.flushes, "output buffer flushed at capacity");
        }
        Ok(())
    }

    /// Write everything pending and flush the underlying stream.
    pub fn drain(&mut self) -> Result<()> {
        self.write_pending()?;
        self.out.flush().map_err(SearchError::Output)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of flushes triggered by reaching capacity.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Give back the stream. Pending fragments are discarded.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_pending(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let total = self.pending.iter().map(Vec::len).sum();
        let mut batch = Vec::new();
        batch.try_reserve_exact(total)?;
        for fragment in self.pending.drain(..) {
            batch.extend_from_slice(&fragment);
        }

        self.out
            .write_all(&batch)
            .and_then(|()| self.out.flush())
            .map_err(SearchError::Output)
    }
}
