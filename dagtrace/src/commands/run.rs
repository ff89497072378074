// dagtrace/src/commands/run.rs
//
// USE CASE: full trace (catalog -> SQL -> DAG -> YAML -> owners -> report).

use std::path::PathBuf;

use anyhow::Context;
use dagtrace_core::application::run_trace;
use dagtrace_core::infrastructure::config::{ConfigOverrides, load_trace_config};
use tracing::info;

pub struct PathArgs {
    pub catalog: Option<PathBuf>,
    pub pipeline_root: Option<PathBuf>,
    pub execution_times: Option<PathBuf>,
    pub mapping_output: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

pub fn execute(config_path: Option<PathBuf>, args: PathArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (file < env < flags)
    println!("⚙️  Loading configuration...");
    let cwd = std::env::current_dir().context("Cannot determine the working directory")?;
    let overrides = ConfigOverrides {
        catalog: args.catalog,
        pipeline_root: args.pipeline_root,
        execution_times: args.execution_times,
        mapping_output: args.mapping_output,
        report_output: args.output,
        summary_output: args.summary,
    };
    let config = load_trace_config(&cwd, config_path.as_deref(), overrides)
        .context("Failed to resolve the dagtrace configuration")?;
    println!("   Pipeline root: {}", config.pipeline_root.display());
    info!(
        catalog = %config.catalog.display(),
        execution_times = %config.execution_times.display(),
        "Configuration resolved"
    );

    // B. Run
    println!("🔗 Tracing external tables...");
    let summary = run_trace(&config).with_context(|| {
        format!(
            "Trace failed for pipeline root {:?}",
            config.pipeline_root
        )
    })?;

    // C. Summary
    println!("📊 Trace Summary:");
    println!("   Tables: {}", summary.tables);
    println!("   Mapping rows: {}", summary.mapping_rows);
    println!("   Report rows: {}", summary.report_rows);
    if !summary.unmatched_tables.is_empty() {
        println!(
            "   ⚠️  {} table(s) not referenced anywhere",
            summary.unmatched_tables.len()
        );
    }
    if !summary.unresolved_dag_ids.is_empty() {
        println!(
            "   ⚠️  {} DAG(s) without execution time: {}",
            summary.unresolved_dag_ids.len(),
            summary.unresolved_dag_ids.join(", ")
        );
    }
    if !summary.unreadable_files.is_empty() {
        println!(
            "   ⚠️  {} file(s) could not be read",
            summary.unreadable_files.len()
        );
    }

    println!(
        "\n✨ Report written to {} in {:.2?}",
        summary.report_output,
        start.elapsed()
    );
    Ok(())
}
