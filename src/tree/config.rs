//! Configuration types for the tree walker

/// Directory handles the walker may hold open at once unless told otherwise.
pub const DEFAULT_HANDLE_BUDGET: usize = 15;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Maximum number of simultaneously open directory handles.
    /// Values below 1 are treated as 1.
    pub handle_budget: usize,
    /// Yield siblings in byte order of their names instead of directory order.
    pub sort_by_name: bool,
    /// Report directories after their contents (as `DirectoryPost`).
    pub contents_first: bool,
}

impl WalkOptions {
    pub(crate) fn effective_budget(&self) -> usize {
        self.handle_budget.max(1)
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            handle_budget: DEFAULT_HANDLE_BUDGET,
            sort_by_name: false,
            contents_first: false,
        }
    }
}
