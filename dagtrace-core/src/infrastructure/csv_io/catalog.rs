// dagtrace-core/src/infrastructure/csv_io/catalog.rs

use crate::domain::TableIdentifier;
use crate::infrastructure::csv_io::{column_index, record_line};
use crate::infrastructure::error::InfrastructureError;

use std::path::Path;
use tracing::{error, info, instrument, warn};

/// Reads the external-table CSV (`schema`, `table` columns, any others ignored).
pub struct TableCatalogLoader;

impl TableCatalogLoader {
    /// Degraded variant: a missing or unreadable catalog is reported and
    /// yields an empty catalog instead of an error.
    #[instrument]
    pub fn load(path: &Path) -> Vec<TableIdentifier> {
        match Self::try_load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Could not read the table catalog");
                Vec::new()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Vec<TableIdentifier>, InfrastructureError> {
        if !path.is_file() {
            return Err(InfrastructureError::missing_input("table catalog", path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let schema_idx = column_index(&headers, path, "schema")?;
        let table_idx = column_index(&headers, path, "table")?;

        let mut catalog = Vec::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable catalog row");
                    continue;
                }
            };

            let (Some(schema), Some(table)) = (record.get(schema_idx), record.get(table_idx))
            else {
                warn!(
                    path = %path.display(),
                    line = record_line(&record),
                    "Skipping catalog row with missing columns"
                );
                continue;
            };

            match TableIdentifier::new(schema, table) {
                Ok(id) => catalog.push(id),
                Err(e) => warn!(
                    path = %path.display(),
                    line = record_line(&record),
                    error = %e,
                    "Skipping malformed catalog row"
                ),
            }
        }

        info!(tables = catalog.len(), "Table catalog loaded");
        Ok(catalog)
    }
}
