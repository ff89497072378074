// dagtrace/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dagtrace")]
#[command(about = "Traces external tables through SQL scripts, DAGs, configs and owners", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔗 Builds the table mapping and the enriched dependency report
    Run {
        /// Configuration file (default: ./dagtrace.yaml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// External table catalog CSV (schema,table)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Root of the pipeline source tree
        #[arg(long)]
        pipeline_root: Option<PathBuf>,

        /// DAG execution-time CSV (dag_id,execution_datetime)
        #[arg(long)]
        execution_times: Option<PathBuf>,

        /// Stage-1 mapping CSV to write
        #[arg(long)]
        mapping_output: Option<PathBuf>,

        /// Final dependency report CSV to write
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Optional JSON run summary
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// 🧩 Enriches an existing stage-1 mapping (pod, dag_time, owners)
    Enrich {
        /// Stage-1 mapping CSV to read
        #[arg(long, default_value = "target/table_mapping.csv")]
        mapping: PathBuf,

        /// Root of the pipeline source tree
        #[arg(long, env = "DAGTRACE_PIPELINE_ROOT")]
        pipeline_root: PathBuf,

        /// DAG execution-time CSV (dag_id,execution_datetime)
        #[arg(long, env = "DAGTRACE_EXECUTION_TIMES")]
        execution_times: PathBuf,

        /// Final dependency report CSV to write
        #[arg(long, short, env = "DAGTRACE_REPORT_OUTPUT", default_value = "target/dependency_report.csv")]
        output: PathBuf,

        /// Do not follow symbolic links while reading DAGs
        #[arg(long, default_value = "false")]
        no_follow_links: bool,
    },

    /// 🔍 Shows the report rows of one external table
    Inspect {
        /// Dependency report CSV to read
        #[arg(long, default_value = "target/dependency_report.csv")]
        report: PathBuf,

        /// External table name (SCHEMA.TABLE_NAME)
        #[arg(long, short)]
        table: String,
    },
}
