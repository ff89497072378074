// dagtrace/src/commands/inspect.rs
//
// USE CASE: Show the lineage rows of one external table.

use std::path::PathBuf;

use comfy_table::{ContentArrangement, Table};
use dagtrace_core::domain::report::REPORT_HEADER;
use dagtrace_core::infrastructure::csv_io::read_report;
use miette::{IntoDiagnostic, Result};

pub fn execute(report: PathBuf, table: String) -> Result<()> {
    if !report.exists() {
        return Err(miette::miette!(
            "❌ Report not found at: {}\n👉 Have you run 'dagtrace run'?",
            report.display()
        ));
    }

    let rows = read_report(&report).into_diagnostic()?;
    let matching: Vec<_> = rows
        .into_iter()
        .filter(|r| r.external_table_name == table)
        .collect();

    if matching.is_empty() {
        return Err(miette::miette!(
            "❌ Table '{}' is not in {}",
            table,
            report.display()
        ));
    }

    println!("\n🔍 Inspecting Table: '{}'", table);

    let mut view = Table::new();
    view.set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(REPORT_HEADER.iter().skip(1).copied());

    for row in &matching {
        view.add_row(vec![
            row.sql_file_path.as_str(),
            row.dag.as_str(),
            row.pod.as_str(),
            row.dag_time.as_str(),
            row.yaml_airflow_files.as_str(),
            row.owners.as_str(),
        ]);
    }

    println!("{}", view);
    println!("   {} row(s)", matching.len());
    Ok(())
}
