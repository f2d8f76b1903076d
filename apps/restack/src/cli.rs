//! Command-line surface.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use restack_foundation::{ExecutionMode, RestackResult};
use tracing::{info, warn};

use crate::executor::Executor;
use crate::history::HistoryEntry;
use crate::render;

/// Advisory repository-structure tool. Proposes moves, never applies them
/// without `--execute`.
#[derive(Parser)]
#[command(name = "restack")]
#[command(about = "Analyze a repository's layout and propose structural cleanups")]
#[command(version)]
pub struct Cli {
    /// Lower the log filter to debug
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the tree and print summary statistics
    Analyze {
        /// Repository root (defaults to the current directory)
        path: Option<PathBuf>,
    },
    /// Run the full pipeline and render proposals, warnings and confidence
    Propose {
        path: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Write the rendered report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Apply MOVE proposals (dry-run unless --execute)
    Apply {
        path: Option<PathBuf>,

        /// Perform real filesystem moves
        #[arg(long)]
        execute: bool,
    },
    /// Undo the last N successful moves from the history log
    Rollback {
        path: Option<PathBuf>,

        /// Number of moves to undo, most recent first
        #[arg(long)]
        count: usize,

        /// Perform real filesystem moves
        #[arg(long)]
        execute: bool,
    },
}

fn repo_root(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from("."))
}

pub fn run(cli: Cli) -> RestackResult<()> {
    match cli.command {
        Commands::Analyze { path } => analyze(&repo_root(path)),
        Commands::Propose {
            path,
            format,
            output,
        } => propose(&repo_root(path), &format, output.as_deref()),
        Commands::Apply { path, execute } => apply(&repo_root(path), execute),
        Commands::Rollback {
            path,
            count,
            execute,
        } => rollback(&repo_root(path), count, execute),
    }
}

fn analyze(root: &Path) -> RestackResult<()> {
    let records = restack_scan::scan(root)?;
    let repo_type = restack_analysis::repo_type::detect(&records);

    let mut extensions: BTreeMap<String, usize> = BTreeMap::new();
    for record in &records {
        let ext = record.extension();
        let key = if ext.is_empty() { "none" } else { ext };
        *extensions.entry(key.to_string()).or_default() += 1;
    }

    println!("Repository: {}", root.display());
    println!("Repository type: {repo_type}");
    println!("Total files:     {}", records.len());
    println!(
        "Python files:    {}",
        records.iter().filter(|r| r.is_python).count()
    );
    println!(
        "Test files:      {}",
        records.iter().filter(|r| r.is_test).count()
    );
    println!(
        "Executables:     {}",
        records.iter().filter(|r| r.looks_executable).count()
    );
    println!("By extension:");
    for (ext, count) in &extensions {
        println!("  {ext:12} {count}");
    }
    Ok(())
}

fn propose(root: &Path, format: &str, output: Option<&Path>) -> RestackResult<()> {
    let records = restack_scan::scan(root)?;
    let report = restack_analysis::run(&records, ExecutionMode::DryRun);
    warn_dirty_proposals(root, &report);

    let rendered = match format {
        "json" => render::render_json(&report)?,
        _ => render::render_text(&report),
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn apply(root: &Path, execute: bool) -> RestackResult<()> {
    let records = restack_scan::scan(root)?;
    let mode = if execute {
        ExecutionMode::Execute
    } else {
        ExecutionMode::DryRun
    };
    let report = restack_analysis::run(&records, mode);
    warn_dirty_proposals(root, &report);

    let executor = Executor::new(root, !execute);
    let entries = executor.apply(&report.proposals)?;
    print_entries(&entries);
    println!("Confidence: {}", report.confidence.verdict);
    Ok(())
}

fn rollback(root: &Path, count: usize, execute: bool) -> RestackResult<()> {
    let executor = Executor::new(root, !execute);
    let entries = executor.rollback(count)?;
    if entries.is_empty() {
        println!("Nothing to roll back.");
        return Ok(());
    }
    print_entries(&entries);
    Ok(())
}

fn print_entries(entries: &[HistoryEntry]) {
    let mut success = 0;
    let mut failed = 0;
    let mut skipped = 0;
    for entry in entries {
        println!("{}", entry.message);
        if entry.skipped {
            skipped += 1;
        } else if entry.success {
            success += 1;
        } else {
            failed += 1;
        }
    }
    println!("{success} succeeded, {failed} failed, {skipped} skipped");
}

/// Advisory only: point out proposals touching files with uncommitted
/// changes.
fn warn_dirty_proposals(root: &Path, report: &restack_analysis::AnalysisReport) {
    let git = restack_scan::git::probe(root);
    if !git.is_repo {
        return;
    }
    for proposal in &report.proposals {
        if git.is_dirty(&proposal.source) {
            warn!(
                file = %proposal.source,
                "proposal touches a file with uncommitted changes"
            );
        }
    }
}
