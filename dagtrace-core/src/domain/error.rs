// dagtrace-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid table identifier: schema='{schema}', table='{table}'")]
    #[diagnostic(
        code(dagtrace::domain::table_identifier),
        help("Both the 'schema' and 'table' columns must be non-empty.")
    )]
    InvalidTableIdentifier { schema: String, table: String },

    #[error("Malformed mapping row at line {line}: expected {expected} columns, found {found}")]
    #[diagnostic(code(dagtrace::domain::mapping_row))]
    MalformedMappingRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}
