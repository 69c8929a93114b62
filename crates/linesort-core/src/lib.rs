//! # linesort-core
//!
//! Safe Rust rework of the classic "sort input lines" exercise: a fixed
//! bump arena, an arena-backed line store, and an in-place indirect
//! quicksort with pluggable three-way comparators.
//!
//! The pipeline is read -> sort -> write: lines are copied into the arena
//! once, sorting rearranges only the opaque handles, and writing resolves
//! each handle back to its bytes. No `unsafe` code is permitted at the
//! crate level.

#![deny(unsafe_code)]

pub mod arena;
pub mod cmp;
pub mod sort;
pub mod store;
pub mod text;

// Re-export the pipeline surface.
pub use arena::{Arena, ArenaStats, Span};
pub use cmp::{SortMode, atof, compare_lexicographic, compare_numeric};
pub use sort::quicksort;
pub use store::{
    ARENA_CAPACITY, LineStore, LongLinePolicy, MAX_LINE_LEN, MAX_LINES, ReadError, StoreConfig,
};
pub use text::squeeze;
