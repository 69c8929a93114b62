//! Report generation for conformance results.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::verify::VerificationSummary;

/// A conformance report with an evidence integrity digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Campaign the results belong to.
    pub campaign: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// SHA-256 of the canonical JSON summary.
    pub evidence_digest: String,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Builds a report, computing the evidence digest from the summary.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        campaign: impl Into<String>,
        timestamp: impl Into<String>,
        summary: VerificationSummary,
    ) -> Self {
        let evidence_digest = digest_summary(&summary);
        Self {
            title: title.into(),
            campaign: campaign.into(),
            timestamp: timestamp.into(),
            evidence_digest,
            summary,
        }
    }

    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Campaign: {}\n", self.campaign));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Evidence digest: {}\n", self.evidence_digest));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        out.push_str("| Case | Mode | Status |\n");
        out.push_str("|------|------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!("| {} | {} | {} |\n", r.case_name, r.mode, status));
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

fn digest_summary(summary: &VerificationSummary) -> String {
    let canonical = serde_json::to_string(summary).unwrap_or_default();
    let digest = Sha256::digest(canonical.as_bytes());
    let mut out = String::with_capacity(64);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
