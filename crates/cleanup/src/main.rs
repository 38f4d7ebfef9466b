//! Cleanup utility entry point.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cleanup::CleanupPlan;

#[derive(Parser)]
#[command(name = "cleanup")]
#[command(
    about = "Deletes duplicate directories, stale caches, and suffixed image copies from a storefront project tree"
)]
struct Cli {
    /// Project tree to scan.
    #[arg(default_value = ".")]
    base: PathBuf,

    /// Skip the confirmation prompt.
    #[arg(long, default_value_t = false)]
    yes: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    println!("{:=<60}", "");
    println!("PROJECT CLEANUP");
    println!("{:=<60}", "");

    let plan = CleanupPlan::build(&cli.base)
        .with_context(|| format!("scanning {}", cli.base.display()))?;
    print_plan(&plan);

    if plan.is_empty() {
        println!("\nNothing to clean up.");
        return Ok(());
    }

    println!("\nTotal items to delete: {}", plan.len());
    println!("Estimated space to be freed: {}", megabytes(plan.bytes));

    if !cli.yes && !confirm()? {
        println!("\nCleanup cancelled. No files were deleted.");
        return Ok(());
    }

    println!("\nStarting cleanup...");
    let report = plan.execute();

    println!("\nCleanup complete!");
    println!("   - Deleted: {} items", report.deleted);
    println!("   - Errors: {} items", report.errors);
    println!("   - Space freed: {}", megabytes(report.bytes));
    Ok(())
}

fn print_plan(plan: &CleanupPlan) {
    println!("\n1. Duplicate root-level directories");
    for path in &plan.duplicate_dirs {
        println!("   will delete: {}", path.display());
    }

    println!("\n2. Database files");
    if let Some(path) = &plan.duplicate_database {
        println!("   will delete: {}", path.display());
    }
    if let Some(path) = &plan.kept_database {
        println!("   keeping: {}", path.display());
    }

    println!("\n3. Python cache directories");
    println!("   found {} __pycache__ directories", plan.python_caches.len());

    println!("\n4. Editor config copies");
    if let Some(path) = &plan.duplicate_hintrc {
        println!("   will delete: {}", path.display());
    }

    println!("\n5. Duplicate product images");
    println!("   found {} suffixed copies", plan.duplicate_images.len());

    println!("\n6. Empty directories");
    for path in &plan.empty_dirs {
        println!("   will delete: {}", path.display());
    }
}

fn confirm() -> anyhow::Result<bool> {
    print!("\nProceed with deletion? (yes/no): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

fn megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
