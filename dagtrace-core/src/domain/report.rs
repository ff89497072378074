// dagtrace-core/src/domain/report.rs
//
// Row shapes of the two CSV artifacts. Unresolved fields are empty strings.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

pub const MAPPING_HEADER: [&str; 4] = ["external_table_name", "sql_path", "py_path", "yaml_path"];

pub const REPORT_HEADER: [&str; 7] = [
    "external_table_name",
    "sql_file_path",
    "dag",
    "pod",
    "dag_time",
    "yaml_airflow_files",
    "owners",
];

/// Stage 1: one (table, sql, dag, yaml) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRow {
    pub external_table_name: String,
    pub sql_path: String,
    pub py_path: String,
    pub yaml_path: String,
}

impl MappingRow {
    pub fn table_only(table: &str) -> Self {
        Self {
            external_table_name: table.to_string(),
            sql_path: String::new(),
            py_path: String::new(),
            yaml_path: String::new(),
        }
    }

    pub fn has_dag(&self) -> bool {
        !self.py_path.is_empty()
    }

    /// Rebuilds a row read back from a stage-1 file. `line` is only used for the error.
    pub fn from_fields(fields: &[&str], line: u64) -> Result<Self, DomainError> {
        match fields {
            [table, sql, py, yaml] => Ok(Self {
                external_table_name: table.to_string(),
                sql_path: sql.to_string(),
                py_path: py.to_string(),
                yaml_path: yaml.to_string(),
            }),
            _ => Err(DomainError::MalformedMappingRow {
                line,
                expected: MAPPING_HEADER.len(),
                found: fields.len(),
            }),
        }
    }
}

/// Stage 2: the enriched, final report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub external_table_name: String,
    pub sql_file_path: String,
    pub dag: String,
    pub pod: String,
    pub dag_time: String,
    pub yaml_airflow_files: String,
    pub owners: String,
}

/// Renders owners as a list literal: `['a@x.com', 'b@x.com']`, `[]` when empty.
pub fn render_owner_list(owners: &[String]) -> String {
    let quoted: Vec<String> = owners.iter().map(|o| format!("'{}'", o)).collect();
    format!("[{}]", quoted.join(", "))
}
