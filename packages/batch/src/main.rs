#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the certificate processing tool.

use std::fs;
use std::path::{Path, PathBuf};

use certikeeper_batch::{FailureReason, PageFailure, PageInput, process_batch};
use certikeeper_extract::{ExtractOptions, NameSplitPolicy};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "certikeeper", about = "Certificate renaming and grouping tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split, extract, and regroup certificate PDFs into an output tree
    Process {
        /// Input PDF files (single- or multi-page)
        inputs: Vec<PathBuf>,
        /// Output directory for the grouped tree
        #[arg(long, default_value = "salida")]
        out: PathBuf,
        /// Name-splitting rule: `skip-middle` (canonical) or `first-two`
        #[arg(long, default_value_t = NameSplitPolicy::SkipMiddle)]
        name_split: NameSplitPolicy,
    },
    /// Print the detection record of every page as JSON, without writing
    /// any output
    Inspect {
        /// Input PDF file
        input: PathBuf,
        /// Name-splitting rule: `skip-middle` (canonical) or `first-two`
        #[arg(long, default_value_t = NameSplitPolicy::SkipMiddle)]
        name_split: NameSplitPolicy,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            inputs,
            out,
            name_split,
        } => process(&inputs, &out, name_split),
        Commands::Inspect { input, name_split } => inspect(&input, name_split),
    }
}

fn process(
    inputs: &[PathBuf],
    out: &Path,
    name_split: NameSplitPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions { name_split };
    let (pages, mut load_failures) = collect_pages(inputs);

    let mut report = process_batch(pages, &options);
    report.failures.append(&mut load_failures);

    for entry in &report.entries {
        let destination = out.join(&entry.destination);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&destination, &entry.bytes)?;
    }

    for failure in &report.failures {
        log::warn!(
            "{} page {}: {}",
            failure.source_name,
            failure.page_number,
            failure.reason
        );
    }

    log::info!(
        "batch started {}: {} pages, {} renamed, {} duplicates, {} failed",
        report.started_at.format("%Y-%m-%d %H:%M:%S"),
        report.pages_processed,
        report.renamed_count(),
        report.duplicate_count(),
        report.failures.len()
    );

    Ok(())
}

fn inspect(input: &Path, name_split: NameSplitPolicy) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions { name_split };
    let bytes = fs::read(input)?;

    for (i, page) in certikeeper_pdf::split_pages(&bytes)?.iter().enumerate() {
        match certikeeper_extract::extract(page, &options) {
            Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            Err(e) => log::error!("page {}: {e}", i + 1),
        }
    }

    Ok(())
}

/// Reads and splits every input file into single-page buffers. A file
/// that cannot be read or split is recorded as a whole-file failure
/// (page number 0) and the rest of the batch continues.
fn collect_pages(inputs: &[PathBuf]) -> (Vec<PageInput>, Vec<PageFailure>) {
    let mut pages = Vec::new();
    let mut failures = Vec::new();

    for path in inputs {
        let source_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let split = fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                certikeeper_pdf::split_pages(&bytes).map_err(|e| e.to_string())
            });

        match split {
            Err(detail) => {
                log::error!("{source_name}: {detail}, skipping file");
                failures.push(PageFailure {
                    source_name,
                    page_number: 0,
                    reason: FailureReason::UnparseablePdf(detail),
                });
            }
            Ok(buffers) => {
                log::debug!("{source_name}: {} pages", buffers.len());
                for (i, bytes) in buffers.into_iter().enumerate() {
                    pages.push(PageInput {
                        source_name: source_name.clone(),
                        page_number: u32::try_from(i).unwrap_or(u32::MAX).saturating_add(1),
                        bytes,
                    });
                }
            }
        }
    }

    (pages, failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_file_becomes_a_whole_file_failure() {
        let missing = PathBuf::from("/definitely/not/here.pdf");
        let (pages, failures) = collect_pages(&[missing]);

        assert!(pages.is_empty());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].source_name, "here.pdf");
        // 0 marks a failure of the whole file, before any page existed.
        assert_eq!(failures[0].page_number, 0);
        assert!(matches!(
            failures[0].reason,
            FailureReason::UnparseablePdf(_)
        ));
    }
}
