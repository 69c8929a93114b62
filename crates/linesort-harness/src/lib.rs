//! Conformance testing harness for the linesort pipeline.
//!
//! This crate provides:
//! - Fixture corpus: JSON case sets for the read -> sort -> write pipeline
//! - Runner: executes cases through `linesort-core` and cross-checks them
//!   against a reference sort oracle
//! - Verification summaries plus markdown/JSON conformance reports with a
//!   SHA-256 evidence digest
//! - A structured JSONL log contract shared by the test workflows

#![forbid(unsafe_code)]

pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::PipelineRunner;
pub use verify::{VerificationResult, VerificationSummary};
