//! CLI entry point for walkfind

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, builder::TypedValueParser};
use tracing_subscriber::{EnvFilter, fmt};
use walkfind::{
    DisplayFlags, OutputFormat, SearchConfig, WalkOptions, run_search, tree::DEFAULT_HANDLE_BUDGET,
};

#[derive(Parser, Debug)]
#[command(name = "walkfind")]
#[command(about = "Search a directory tree without following symlinks")]
#[command(version)]
struct Args {
    /// Directory (or file) to search
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Regular expression an entry must contain to be printed
    pattern: Option<String>,

    /// Show modification time and size before each entry
    #[arg(short = 'e', long = "extra")]
    extra: bool,

    /// Show the target of symbolic links
    #[arg(short = 'l', long = "links")]
    links: bool,

    /// Match and print file names only instead of full paths
    #[arg(short = 'n', long = "name")]
    name: bool,

    /// Visit siblings in name order instead of directory order
    #[arg(short = 's', long = "sort")]
    sort: bool,

    /// Report directories after their contents
    #[arg(short = 'd', long = "depth")]
    depth: bool,

    /// Output one JSON object per entry
    #[arg(long = "json")]
    json: bool,

    /// Maximum number of directory handles held open at once
    #[arg(
        long = "max-open",
        value_name = "N",
        default_value_t = DEFAULT_HANDLE_BUDGET,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    max_open: usize,

    /// Number of output lines buffered before writing
    #[arg(
        long = "buffer",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..).map(|n| n as usize)
    )]
    buffer: Option<usize>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> walkfind::Result<SearchConfig> {
    let flags = DisplayFlags {
        show_metadata: args.extra,
        resolve_links: args.links,
        match_basename: args.name,
    };
    let walk = WalkOptions {
        handle_budget: args.max_open,
        sort_by_name: args.sort,
        contents_first: args.depth,
    };
    let format = if args.json {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Plain
    };

    let mut config = SearchConfig::new(&args.path, args.pattern.as_deref())?
        .with_flags(flags)
        .with_walk_options(walk)
        .with_format(format);
    if let Some(capacity) = args.buffer {
        config = config.with_buffer_capacity(capacity);
    }
    Ok(config)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args).unwrap_or_else(|e| {
        eprintln!("walkfind: {}", e);
        process::exit(1);
    });

    let stdout = io::stdout();
    if let Err(e) = run_search(&config, stdout.lock()) {
        eprintln!("walkfind: {}", e);
        process::exit(1);
    }
}
