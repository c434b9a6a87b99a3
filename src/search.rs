//! Single entry point running one search to completion

use std::io::Write;

use tracing::info;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::output::Reporter;
use crate::tree::TreeWalker;

/// Counts from a completed search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub visited: usize,
    pub reported: usize,
}

/// Walk `config.root()` and write every reported entry to `out`.
///
/// Output is drained only when the whole walk succeeds; on error nothing
/// still buffered is written.
pub fn run_search<W: Write>(config: &SearchConfig, out: W) -> Result<SearchSummary> {
    let walker = TreeWalker::new(config.root(), config.walk_options().clone());
    let mut reporter = Reporter::new(config, out);

    let visited = walker.walk(&mut reporter)?;
    let reported = reporter.reported();
    reporter.finish()?;

    info!(visited, reported, "search complete");
    Ok(SearchSummary { visited, reported })
}
