// dagtrace-core/src/infrastructure/csv_io/execution.rs

use crate::domain::ExecutionTimeIndex;
use crate::infrastructure::csv_io::{column_index, record_line};
use crate::infrastructure::error::InfrastructureError;

use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

/// Reads `dag_id,execution_datetime` into an [`ExecutionTimeIndex`].
pub struct ExecutionTimeLoader;

impl ExecutionTimeLoader {
    #[instrument]
    pub fn load(path: &Path) -> ExecutionTimeIndex {
        match Self::try_load(path) {
            Ok(index) => index,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Could not read the DAG execution times");
                ExecutionTimeIndex::new()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<ExecutionTimeIndex, InfrastructureError> {
        if !path.is_file() {
            return Err(InfrastructureError::missing_input("execution-time CSV", path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let dag_idx = column_index(&headers, path, "dag_id")?;
        let time_idx = column_index(&headers, path, "execution_datetime")?;

        let mut index = ExecutionTimeIndex::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable execution row");
                    continue;
                }
            };

            let dag_id = record.get(dag_idx).unwrap_or_default();
            if dag_id.is_empty() {
                warn!(
                    path = %path.display(),
                    line = record_line(&record),
                    "Skipping execution row without dag_id"
                );
                continue;
            }
            let executed_at = record.get(time_idx).unwrap_or_default();

            if let Some(previous) = index.insert(dag_id, executed_at) {
                debug!(dag_id, previous = %previous, "Later execution row overrides earlier one");
            }
        }

        info!(dags = index.len(), "DAG execution times loaded");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_duplicate_dag_id_last_row_wins() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("dag_times.csv");
        fs::write(
            &path,
            "dag_id,execution_datetime\n\
             monitor_fct_sales,2025-07-30 01:00:00.000000 UTC\n\
             ,2025-07-30 02:00:00.000000 UTC\n\
             spend_self_service_report,2025-08-01 08:02:20.000000 UTC\n\
             monitor_fct_sales,2025-08-01 05:35:23.000000 UTC\n",
        )?;

        let index = ExecutionTimeLoader::try_load(&path)?;
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.lookup("monitor_fct_sales"),
            Some("2025-08-01 05:35:23.000000 UTC")
        );
        Ok(())
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let index = ExecutionTimeLoader::load(Path::new("/no/such/dag_times.csv"));
        assert!(index.is_empty());
    }
}
