//! walkfind - physical directory-tree search with regex filtering and buffered output

pub mod config;
pub mod error;
pub mod output;
pub mod search;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{DisplayFlags, OutputFormat, SearchConfig};
pub use error::{Result, SearchError};
pub use output::{OutputBuffer, Reporter, format_size};
pub use search::{SearchSummary, run_search};
pub use tree::{Entry, EntryFilter, EntryKind, EntryVisitor, TreeWalker, WalkOptions};
