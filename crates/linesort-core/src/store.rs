//! Line storage: bounded reading, arena ownership, ordered handles.
//!
//! The store owns the arena and the handle array for one read -> sort ->
//! write pass. Reading consumes the input stream exactly once, left to
//! right; stored lines are immutable afterwards, and sorting rearranges
//! only the handles.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::arena::{Arena, ArenaStats, Span};
use crate::sort::quicksort;
use crate::text::squeeze;

/// Default ceiling on stored lines, from the original exercise.
pub const MAX_LINES: usize = 5000;
/// Default ceiling on a single line's length in bytes.
pub const MAX_LINE_LEN: usize = 1000;
/// Default arena capacity in bytes.
pub const ARENA_CAPACITY: usize = 1000;

/// What to do with a line longer than the configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongLinePolicy {
    /// Report [`ReadError::LineTooLong`].
    #[default]
    Reject,
    /// Keep the first `max_line_len` bytes and discard the rest of the
    /// physical line (the original exercise quirk).
    Truncate,
}

/// Bounds and filters for one read pass.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Hard limit on the number of stored lines.
    pub max_lines: usize,
    /// Hard limit on a single line's length in bytes.
    pub max_line_len: usize,
    /// Arena capacity in bytes.
    pub arena_capacity: usize,
    /// Overlong-line handling.
    pub long_line_policy: LongLinePolicy,
    /// Bytes deleted from every line before it is stored.
    pub delete_set: Option<Vec<u8>>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_lines: MAX_LINES,
            max_line_len: MAX_LINE_LEN,
            arena_capacity: ARENA_CAPACITY,
            long_line_policy: LongLinePolicy::Reject,
            delete_set: None,
        }
    }
}

/// Failure taxonomy for the read phase.
///
/// Reading is the only fallible stage; the sort and the comparators are
/// total. Every variant aborts the pipeline before any sorting or
/// writing, so partial input is discarded rather than partially
/// processed.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The input holds more lines than `max_lines`.
    #[error("too many input lines: limit is {limit}")]
    TooManyLines { limit: usize },
    /// The arena cannot serve the next allocation.
    #[error("line storage exhausted: {requested} bytes requested, {remaining} remaining")]
    ArenaExhausted { requested: usize, remaining: usize },
    /// A line exceeds `max_line_len` under [`LongLinePolicy::Reject`].
    #[error("line {line} exceeds the {limit}-byte limit")]
    LineTooLong { line: usize, limit: usize },
    /// The reader failed.
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of pulling one physical line into the scratch buffer.
enum RawLine {
    /// Nothing left in the stream.
    Eof,
    /// A whole line fit within the limit.
    Complete,
    /// The line was longer than the limit; the excess was consumed and
    /// dropped.
    Truncated,
}

/// Owned storage for the read -> sort -> write pipeline.
pub struct LineStore {
    config: StoreConfig,
    arena: Arena,
    handles: Vec<Span>,
}

impl LineStore {
    /// Creates an empty store; the arena is sized from the config.
    pub fn new(config: StoreConfig) -> Self {
        let arena = Arena::with_capacity(config.arena_capacity);
        Self {
            config,
            arena,
            handles: Vec::new(),
        }
    }

    /// Reads every line from `reader` into the store.
    ///
    /// Each line is pulled into a bounded scratch buffer, stripped of its
    /// trailing `\n` (the final line may omit it), passed through the
    /// configured delete-set filter, and copied into the arena. Returns
    /// the number of stored lines on success.
    pub fn read_from<R: BufRead>(&mut self, reader: &mut R) -> Result<usize, ReadError> {
        let mut scratch = Vec::with_capacity(self.config.max_line_len.min(4096));
        loop {
            let outcome = fill_line(reader, &mut scratch, self.config.max_line_len)?;
            match outcome {
                RawLine::Eof => break,
                RawLine::Truncated => {
                    if self.config.long_line_policy == LongLinePolicy::Reject {
                        return Err(ReadError::LineTooLong {
                            line: self.handles.len() + 1,
                            limit: self.config.max_line_len,
                        });
                    }
                }
                RawLine::Complete => {}
            }
            if let Some(reject) = &self.config.delete_set {
                squeeze(&mut scratch, reject);
            }
            if self.handles.len() >= self.config.max_lines {
                return Err(ReadError::TooManyLines {
                    limit: self.config.max_lines,
                });
            }
            let span =
                self.arena
                    .alloc_copy(&scratch)
                    .ok_or_else(|| ReadError::ArenaExhausted {
                        requested: scratch.len(),
                        remaining: self.arena.remaining(),
                    })?;
            self.handles.push(span);
        }
        Ok(self.handles.len())
    }

    /// Sorts the handle array in place with a three-way comparator over
    /// the stored bytes. The bytes themselves never move.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: Fn(&[u8], &[u8]) -> core::cmp::Ordering,
    {
        let Self { arena, handles, .. } = self;
        quicksort(handles.as_mut_slice(), |a: &Span, b: &Span| {
            compare(arena.bytes(*a), arena.bytes(*b))
        });
    }

    /// Iterates stored lines in current handle order.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.handles.iter().map(|&span| self.arena.bytes(span))
    }

    /// Writes each line plus a trailing newline.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            out.write_all(line)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the store holds no lines.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Arena counters for this store's lifetime.
    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

/// Pulls one physical line into `scratch`, keeping at most `limit` bytes.
///
/// The newline terminator is consumed but never stored. Bytes past the
/// limit are consumed and dropped so the next call starts at the next
/// physical line.
fn fill_line<R: BufRead>(
    reader: &mut R,
    scratch: &mut Vec<u8>,
    limit: usize,
) -> io::Result<RawLine> {
    scratch.clear();
    let mut seen = 0_usize;
    let mut saw_any = false;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            if !saw_any {
                return Ok(RawLine::Eof);
            }
            return Ok(if seen > limit {
                RawLine::Truncated
            } else {
                RawLine::Complete
            });
        }
        saw_any = true;
        if let Some(pos) = buf.iter().position(|&b| b == b'\n') {
            let room = limit - scratch.len();
            scratch.extend_from_slice(&buf[..pos.min(room)]);
            seen = seen.saturating_add(pos);
            reader.consume(pos + 1);
            return Ok(if seen > limit {
                RawLine::Truncated
            } else {
                RawLine::Complete
            });
        }
        let n = buf.len();
        let room = limit - scratch.len();
        scratch.extend_from_slice(&buf[..n.min(room)]);
        seen = seen.saturating_add(n);
        reader.consume(n);
    }
}
