// dagtrace-core/src/application/trace.rs
//
// USE CASE: full trace run (load -> scan -> extract -> assemble -> write).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::application::enrich::enrich_rows;
use crate::application::mapping::build_mapping;
use crate::domain::paths::relative_to_root;
use crate::error::DagtraceError;
use crate::infrastructure::WalkDirSourceTree;
use crate::infrastructure::config::TraceConfig;
use crate::infrastructure::csv_io::{
    ExecutionTimeLoader, TableCatalogLoader, read_mapping, write_mapping, write_report,
};
use crate::infrastructure::fs::{atomic_write, ensure_input_dir, ensure_input_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    pub generated_at: String,
    pub pipeline_root: String,
    pub tables: usize,
    pub mapping_rows: usize,
    pub report_rows: usize,
    pub unmatched_tables: Vec<String>,
    pub unresolved_dag_ids: Vec<String>,
    pub unreadable_files: Vec<String>,
    pub mapping_output: Option<String>,
    pub report_output: String,
}

impl TraceSummary {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Inputs of a stage-2-only run over an existing stage-1 file.
#[derive(Debug, Clone)]
pub struct EnrichRequest {
    pub mapping: PathBuf,
    pub pipeline_root: PathBuf,
    pub execution_times: PathBuf,
    pub report_output: PathBuf,
    pub follow_links: bool,
}

#[instrument(skip(config), fields(root = %config.pipeline_root.display()))]
pub fn run_trace(config: &TraceConfig) -> Result<TraceSummary, DagtraceError> {
    // 1. Pre-flight: nothing is written unless the three inputs exist
    ensure_input_file("table catalog", &config.catalog)?;
    ensure_input_dir("pipeline root", &config.pipeline_root)?;
    ensure_input_file("execution-time CSV", &config.execution_times)?;

    // Unusable inputs (wrong header...) are terminal too
    let catalog = TableCatalogLoader::try_load(&config.catalog)?;
    let index = ExecutionTimeLoader::try_load(&config.execution_times)?;
    let tree = WalkDirSourceTree::open(&config.pipeline_root, config.scan.follow_links)?;

    // 2. Stage 1 (scan + assemble)
    let mapping = build_mapping(&tree, &catalog, &config.scan);
    write_mapping(&config.mapping_output, &mapping.rows)?;

    // 3. Stage 2 works from the stage-1 file, as downstream consumers do
    let stage1 = read_mapping(&config.mapping_output)?;
    let report = enrich_rows(&tree, &index, &stage1);
    write_report(&config.report_output, &report.rows)?;

    let unreadable_files: BTreeSet<String> = mapping
        .unreadable_files
        .iter()
        .map(|p| relative_to_root(&config.pipeline_root, p))
        .chain(report.unreadable_dags.iter().cloned())
        .collect();

    let summary = TraceSummary {
        generated_at: Utc::now().to_rfc3339(),
        pipeline_root: config.pipeline_root.display().to_string(),
        tables: catalog.len(),
        mapping_rows: mapping.rows.len(),
        report_rows: report.rows.len(),
        unmatched_tables: mapping
            .unmatched_tables
            .iter()
            .map(|t| t.to_string())
            .collect(),
        unresolved_dag_ids: report.unresolved_dag_ids,
        unreadable_files: unreadable_files.into_iter().collect(),
        mapping_output: Some(config.mapping_output.display().to_string()),
        report_output: config.report_output.display().to_string(),
    };

    if let Some(path) = &config.summary_output {
        write_summary(path, &summary)?;
    }

    info!(
        tables = summary.tables,
        rows = summary.report_rows,
        unmatched = summary.unmatched_tables.len(),
        "Trace finished"
    );
    Ok(summary)
}

/// Stage 2 only: enriches an existing stage-1 mapping file.
#[instrument(skip(request), fields(mapping = %request.mapping.display()))]
pub fn enrich_mapping(request: &EnrichRequest) -> Result<TraceSummary, DagtraceError> {
    ensure_input_file("stage-1 mapping", &request.mapping)?;
    ensure_input_dir("pipeline root", &request.pipeline_root)?;
    ensure_input_file("execution-time CSV", &request.execution_times)?;

    let index = ExecutionTimeLoader::try_load(&request.execution_times)?;
    let tree = WalkDirSourceTree::open(&request.pipeline_root, request.follow_links)?;

    let stage1 = read_mapping(&request.mapping)?;
    let report = enrich_rows(&tree, &index, &stage1);
    write_report(&request.report_output, &report.rows)?;

    let tables: BTreeSet<&str> = stage1
        .iter()
        .map(|r| r.external_table_name.as_str())
        .collect();

    Ok(TraceSummary {
        generated_at: Utc::now().to_rfc3339(),
        pipeline_root: request.pipeline_root.display().to_string(),
        tables: tables.len(),
        mapping_rows: stage1.len(),
        report_rows: report.rows.len(),
        unmatched_tables: Vec::new(),
        unresolved_dag_ids: report.unresolved_dag_ids,
        unreadable_files: report.unreadable_dags,
        mapping_output: None,
        report_output: request.report_output.display().to_string(),
    })
}

pub fn write_summary(path: &Path, summary: &TraceSummary) -> Result<(), DagtraceError> {
    let json = summary
        .to_json()
        .map_err(crate::infrastructure::error::InfrastructureError::Json)?;
    atomic_write(path, json)?;
    Ok(())
}
