//! CLI entrypoint for the line sorter.
//!
//! Reads lines from stdin, sorts them with the selected comparator, and
//! writes them to stdout. Diagnostics go to stderr; the exit status is
//! nonzero when any bound is exceeded.

use std::io::{self, Write};

use clap::Parser;
use linesort_core::{
    ARENA_CAPACITY, LineStore, LongLinePolicy, MAX_LINE_LEN, MAX_LINES, SortMode, StoreConfig,
};

/// Sort lines of text from stdin to stdout.
#[derive(Debug, Parser)]
#[command(name = "linesort")]
#[command(about = "Sort input lines lexicographically or numerically")]
struct Cli {
    /// Compare lines as floating-point numbers instead of byte strings.
    #[arg(short = 'n', long)]
    numeric: bool,
    /// Delete these characters from every line before it is stored.
    #[arg(short = 'd', long, value_name = "SET")]
    delete_chars: Option<String>,
    /// Maximum number of lines to sort.
    #[arg(long, default_value_t = MAX_LINES)]
    max_lines: usize,
    /// Maximum length of a single line in bytes.
    #[arg(long, default_value_t = MAX_LINE_LEN)]
    max_line_len: usize,
    /// Arena capacity in bytes for line storage.
    #[arg(long, default_value_t = ARENA_CAPACITY)]
    arena_bytes: usize,
    /// Truncate lines longer than the limit instead of failing.
    #[arg(long)]
    truncate_long_lines: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = StoreConfig {
        max_lines: cli.max_lines,
        max_line_len: cli.max_line_len,
        arena_capacity: cli.arena_bytes,
        long_line_policy: if cli.truncate_long_lines {
            LongLinePolicy::Truncate
        } else {
            LongLinePolicy::Reject
        },
        delete_set: cli.delete_chars.map(String::into_bytes),
    };
    let mode = if cli.numeric {
        SortMode::Numeric
    } else {
        SortMode::Lexicographic
    };

    let mut store = LineStore::new(config);
    store.read_from(&mut io::stdin().lock())?;
    store.sort_by(|a, b| mode.compare(a, b));

    let mut out = io::BufWriter::new(io::stdout().lock());
    store.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
