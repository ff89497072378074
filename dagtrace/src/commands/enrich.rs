// dagtrace/src/commands/enrich.rs
//
// USE CASE: stage 2 only, on a mapping produced earlier (or by hand).

use std::path::PathBuf;

use anyhow::Context;
use dagtrace_core::application::{EnrichRequest, enrich_mapping};

pub fn execute(
    mapping: PathBuf,
    pipeline_root: PathBuf,
    execution_times: PathBuf,
    output: PathBuf,
    follow_links: bool,
) -> anyhow::Result<()> {
    println!("🧩 Enriching {}...", mapping.display());

    let request = EnrichRequest {
        mapping,
        pipeline_root,
        execution_times,
        report_output: output,
        follow_links,
    };
    let summary = enrich_mapping(&request)
        .with_context(|| format!("Failed to enrich mapping {:?}", request.mapping))?;

    println!("   Rows: {}", summary.report_rows);
    if !summary.unresolved_dag_ids.is_empty() {
        println!(
            "   ⚠️  {} DAG(s) without execution time",
            summary.unresolved_dag_ids.len()
        );
    }
    println!("✨ Report written to {}", summary.report_output);
    Ok(())
}
