//! Entry formatting and buffered output
//!
//! # Module Structure
//!
//! - `buffer` - Bounded fragment buffer that batches writes
//! - `format` - Size and timestamp columns
//! - `json` - JSON lines records
//! - `reporter` - Entry visitor tying filter, formatter and buffer together

mod buffer;
mod format;
mod json;
mod reporter;

pub use buffer::{DEFAULT_BUFFER_CAPACITY, OutputBuffer};
pub use format::{format_size, format_timestamp, metadata_columns};
pub use json::EntryRecord;
pub use reporter::Reporter;
