//! CLI entrypoint for the linesort conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use linesort_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, now_utc};
use linesort_harness::{ConformanceReport, FixtureSet, PipelineRunner, VerificationSummary};

/// Conformance tooling for the linesort pipeline.
#[derive(Debug, Parser)]
#[command(name = "linesort-harness")]
#[command(about = "Conformance testing harness for the linesort pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the built-in fixture corpus as JSON files.
    Capture {
        /// Output directory for fixture JSON files.
        #[arg(long)]
        output: PathBuf,
        /// Optional fixed timestamp string for deterministic capture.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Verify the pipeline against captured fixtures.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic reports.
        #[arg(long)]
        timestamp: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Capture { output, timestamp } => {
            let captured_at = timestamp.unwrap_or_else(now_utc);
            std::fs::create_dir_all(&output)?;
            for set in linesort_harness::fixtures::builtin_sets(&captured_at) {
                let file_name = format!("{}.json", set.family.replace('/', "_"));
                let path = output.join(file_name);
                std::fs::write(&path, set.to_json()?)?;
                eprintln!("Captured {} case(s) to {}", set.cases.len(), path.display());
            }
        }
        Command::Verify {
            fixture,
            report,
            log,
            timestamp,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let mut fixture_paths: Vec<PathBuf> = std::fs::read_dir(&fixture)?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
                .collect();
            fixture_paths.sort();

            let mut fixture_sets = Vec::new();
            for path in fixture_paths {
                match FixtureSet::from_file(&path) {
                    Ok(set) => fixture_sets.push(set),
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if fixture_sets.is_empty() {
                return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
            }

            let runner = PipelineRunner::new("fixture-verify");
            let mut results = Vec::new();
            for set in &fixture_sets {
                results.extend(runner.run(set));
            }
            let summary = VerificationSummary::from_results(results);

            if let Some(log_path) = log {
                let mut emitter = LogEmitter::to_file(&log_path)?;
                for (idx, result) in summary.results.iter().enumerate() {
                    let outcome = if result.passed {
                        Outcome::Pass
                    } else {
                        Outcome::Fail
                    };
                    let level = if result.passed {
                        LogLevel::Info
                    } else {
                        LogLevel::Error
                    };
                    let entry = LogEntry::new(format!("harness::verify::{idx:04}"), level, "fixture_case")
                        .with_case(result.case_name.clone())
                        .with_mode(result.mode.clone())
                        .with_outcome(outcome);
                    emitter.emit(&entry)?;
                }
                let entry = LogEntry::new("harness::verify::summary", LogLevel::Info, "verify_summary")
                    .with_details(serde_json::json!({
                        "total": summary.total,
                        "passed": summary.passed,
                        "failed": summary.failed,
                    }));
                emitter.emit(&entry)?;
                eprintln!("Structured log written to {}", log_path.display());
            }

            let stamp = timestamp.unwrap_or_else(now_utc);
            let conformance =
                ConformanceReport::new("Linesort Conformance", "fixture-verify", stamp, summary);
            match report {
                Some(path) => {
                    std::fs::write(&path, conformance.to_markdown())?;
                    eprintln!("Report written to {}", path.display());
                }
                None => println!("{}", conformance.to_markdown()),
            }

            if !conformance.summary.all_passed() {
                return Err(format!(
                    "{} fixture case(s) failed",
                    conformance.summary.failed
                )
                .into());
            }
        }
    }

    Ok(())
}
