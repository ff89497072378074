// dagtrace-core/src/infrastructure/csv_io/mod.rs

pub mod catalog;
pub mod execution;
pub mod report;

pub use catalog::TableCatalogLoader;
pub use execution::ExecutionTimeLoader;
pub use report::{read_mapping, read_report, write_mapping, write_report};

use crate::infrastructure::error::InfrastructureError;
use std::path::Path;

/// Position of a named column in a header row (trimmed, case-insensitive).
pub(crate) fn column_index(
    headers: &csv::StringRecord,
    path: &Path,
    column: &'static str,
) -> Result<usize, InfrastructureError> {
    headers
        .iter()
        .position(|h| {
            h.trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case(column)
        })
        .ok_or_else(|| InfrastructureError::MissingColumn {
            path: path.to_path_buf(),
            column,
        })
}

pub(crate) fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}
