//! Pipeline execution engine.
//!
//! Runs fixture cases through the real store -> sort -> write pipeline
//! and cross-checks successful outputs against a reference sort oracle
//! (`sort_unstable_by` over the same comparator).

use std::io::Cursor;

use linesort_core::{
    ARENA_CAPACITY, LineStore, MAX_LINES, ReadError, SortMode, StoreConfig, squeeze,
};

use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// Runs fixture sets and collects verification results.
pub struct PipelineRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl PipelineRunner {
    /// Create a new runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all cases in a set and return results.
    pub fn run(&self, set: &FixtureSet) -> Vec<VerificationResult> {
        set.cases.iter().map(run_case).collect()
    }
}

/// Executes one case through the core pipeline.
pub fn execute_case(case: &FixtureCase) -> Result<Vec<String>, ReadError> {
    let config = StoreConfig {
        max_lines: case.max_lines.unwrap_or(MAX_LINES),
        arena_capacity: case.arena_bytes.unwrap_or(ARENA_CAPACITY),
        delete_set: case.delete_set.as_ref().map(|s| s.clone().into_bytes()),
        ..StoreConfig::default()
    };
    let mut store = LineStore::new(config);

    let mut input = Vec::new();
    for line in &case.input {
        input.extend_from_slice(line.as_bytes());
        input.push(b'\n');
    }
    store.read_from(&mut Cursor::new(input))?;

    let mode = mode_of(case);
    store.sort_by(|a, b| mode.compare(a, b));
    Ok(store
        .lines()
        .map(|l| String::from_utf8_lossy(l).into_owned())
        .collect())
}

/// The oracle: the same inputs, filters, and comparator, but sorted with
/// the standard library.
pub fn reference_sorted(case: &FixtureCase) -> Vec<String> {
    let mode = mode_of(case);
    let mut lines: Vec<Vec<u8>> = case
        .input
        .iter()
        .map(|l| {
            let mut bytes = l.clone().into_bytes();
            if let Some(set) = &case.delete_set {
                squeeze(&mut bytes, set.as_bytes());
            }
            bytes
        })
        .collect();
    lines.sort_unstable_by(|a, b| mode.compare(a, b));
    lines
        .into_iter()
        .map(|l| String::from_utf8_lossy(&l).into_owned())
        .collect()
}

/// Stable tag for a read failure, used in fixture expectations.
pub fn error_kind(err: &ReadError) -> &'static str {
    match err {
        ReadError::TooManyLines { .. } => "too_many_lines",
        ReadError::ArenaExhausted { .. } => "arena_exhausted",
        ReadError::LineTooLong { .. } => "line_too_long",
        ReadError::Io(_) => "io",
    }
}

fn mode_of(case: &FixtureCase) -> SortMode {
    if case.mode.eq_ignore_ascii_case("numeric") {
        SortMode::Numeric
    } else {
        SortMode::Lexicographic
    }
}

/// Output agrees with the oracle when it is a permutation of the oracle's
/// output and every adjacent pair is ordered under the case's comparator.
/// Exact equality is not required: both sorts are unstable, so tied lines
/// may legally land in either order.
fn agrees_with_reference(case: &FixtureCase, actual: &[String]) -> bool {
    let mode = mode_of(case);
    let reference = reference_sorted(case);

    let mut actual_canon: Vec<&String> = actual.iter().collect();
    let mut reference_canon: Vec<&String> = reference.iter().collect();
    actual_canon.sort_unstable();
    reference_canon.sort_unstable();
    if actual_canon != reference_canon {
        return false;
    }

    actual
        .windows(2)
        .all(|w| mode.compare(w[0].as_bytes(), w[1].as_bytes()) != std::cmp::Ordering::Greater)
}

fn run_case(case: &FixtureCase) -> VerificationResult {
    let expected = match &case.expected_error {
        Some(kind) => format!("error:{kind}"),
        None => case.expected.join("\n"),
    };

    let (actual, passed, mut notes) = match execute_case(case) {
        Ok(lines) => {
            let actual = lines.join("\n");
            let mut notes = Vec::new();
            let mut passed = case.expected_error.is_none() && actual == expected;
            if case.expected_error.is_none() && !agrees_with_reference(case, &lines) {
                passed = false;
                notes.push("reference oracle disagreement".to_string());
            }
            (actual, passed, notes)
        }
        Err(err) => {
            let actual = format!("error:{}", error_kind(&err));
            let passed = actual == expected;
            (actual, passed, Vec::new())
        }
    };

    let diff = if passed {
        None
    } else {
        notes.insert(0, format!("expected: {expected}\nactual:   {actual}"));
        Some(notes.join("\n"))
    };

    VerificationResult {
        case_name: case.name.clone(),
        mode: case.mode.clone(),
        passed,
        expected,
        actual,
        diff,
    }
}
