//! Fixture loading and the built-in conformance corpus.

use serde::{Deserialize, Serialize};

/// A single pipeline fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Comparator mode: `lexicographic` or `numeric`.
    pub mode: String,
    /// Input lines, fed to the store in order.
    pub input: Vec<String>,
    /// Characters deleted from every line before storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_set: Option<String>,
    /// Expected output lines after sorting (ignored when an error is
    /// expected).
    #[serde(default)]
    pub expected: Vec<String>,
    /// Expected failure kind (`too_many_lines`, `arena_exhausted`,
    /// `line_too_long`) when the pipeline should abort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
    /// Override for the store's line-count limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<usize>,
    /// Override for the store's arena capacity in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena_bytes: Option<usize>,
}

/// A collection of fixture cases for one pipeline concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Concern name, e.g. `pipeline/ordering`.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json(&content)?;
        Ok(set)
    }
}

fn case(name: &str, mode: &str, input: &[&str], expected: &[&str]) -> FixtureCase {
    FixtureCase {
        name: name.to_string(),
        mode: mode.to_string(),
        input: input.iter().map(ToString::to_string).collect(),
        delete_set: None,
        expected: expected.iter().map(ToString::to_string).collect(),
        expected_error: None,
        max_lines: None,
        arena_bytes: None,
    }
}

/// The built-in conformance corpus.
///
/// Expected outputs were derived from the reference sort oracle; cases
/// are authored so that ties only occur between byte-identical lines,
/// keeping the expected order unambiguous under an unstable sort.
pub fn builtin_sets(captured_at: &str) -> Vec<FixtureSet> {
    let ordering = FixtureSet {
        version: "v1".to_string(),
        family: "pipeline/ordering".to_string(),
        captured_at: captured_at.to_string(),
        cases: vec![
            case(
                "numeric_magnitude_order",
                "numeric",
                &["10", "2", "1"],
                &["1", "2", "10"],
            ),
            case(
                "lexicographic_byte_order",
                "lexicographic",
                &["10", "2", "1"],
                &["1", "10", "2"],
            ),
            case(
                "fixed_integer_fixture",
                "numeric",
                &["5", "3", "8", "1", "9", "2"],
                &["1", "2", "3", "5", "8", "9"],
            ),
            case(
                "already_sorted_identity",
                "lexicographic",
                &["apple", "fig", "pear"],
                &["apple", "fig", "pear"],
            ),
            case(
                "duplicates_preserved",
                "lexicographic",
                &["b", "a", "b", "a"],
                &["a", "a", "b", "b"],
            ),
            case("empty_input", "lexicographic", &[], &[]),
            case(
                "blank_lines_sort_first",
                "lexicographic",
                &["b", "", "a"],
                &["", "a", "b"],
            ),
            case(
                "negative_and_fractional",
                "numeric",
                &["1.5", "-2", "0.25", "-10"],
                &["-10", "-2", "0.25", "1.5"],
            ),
        ],
    };

    let filters = FixtureSet {
        version: "v1".to_string(),
        family: "pipeline/filters".to_string(),
        captured_at: captured_at.to_string(),
        cases: vec![
            FixtureCase {
                delete_set: Some("aeiou".to_string()),
                ..case(
                    "vowels_deleted_before_sort",
                    "lexicographic",
                    &["banana", "fig", "kiwi"],
                    &["bnn", "fg", "kw"],
                )
            },
            FixtureCase {
                delete_set: Some("a".to_string()),
                ..case(
                    "filter_can_empty_a_line",
                    "lexicographic",
                    &["aaa", "b"],
                    &["", "b"],
                )
            },
        ],
    };

    let capacity = FixtureSet {
        version: "v1".to_string(),
        family: "pipeline/capacity".to_string(),
        captured_at: captured_at.to_string(),
        cases: vec![
            FixtureCase {
                max_lines: Some(3),
                ..case(
                    "exactly_at_line_limit",
                    "lexicographic",
                    &["c", "a", "b"],
                    &["a", "b", "c"],
                )
            },
            FixtureCase {
                max_lines: Some(2),
                expected_error: Some("too_many_lines".to_string()),
                ..case("one_past_line_limit", "lexicographic", &["a", "b", "c"], &[])
            },
            FixtureCase {
                arena_bytes: Some(4),
                expected_error: Some("arena_exhausted".to_string()),
                ..case("arena_exhausted", "lexicographic", &["ab", "cdef"], &[])
            },
        ],
    };

    vec![ordering, filters, capacity]
}
