//! Directory tree walking logic
//!
//! The walk is physical: symlinks are reported as entries and never followed.
//! It can be consumed two ways:
//!
//! - `TreeWalker::iter`: a lazy iterator of `Result<Entry>`
//! - `TreeWalker::walk`: drives an `EntryVisitor`, aborting on its first error

mod config;
mod entry;
mod filter;
mod walker;

pub use config::{DEFAULT_HANDLE_BUDGET, WalkOptions};
pub use entry::{Entry, EntryKind};
pub use filter::EntryFilter;
pub use walker::{EntryVisitor, TreeWalker, Walk};
