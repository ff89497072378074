// dagtrace-core/src/infrastructure/csv_io/report.rs
//
// Reading and writing of the stage-1 mapping and the stage-2 report.
// Headers are always written, even when there is no row.

use crate::domain::report::{MAPPING_HEADER, REPORT_HEADER};
use crate::domain::{MappingRow, ReportRow};
use crate::infrastructure::csv_io::record_line;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

fn to_csv_bytes<R: Serialize>(header: &[&str], rows: &[R]) -> Result<Vec<u8>, InfrastructureError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| InfrastructureError::Io(e.into_error()))
}

pub fn write_mapping(path: &Path, rows: &[MappingRow]) -> Result<(), InfrastructureError> {
    let bytes = to_csv_bytes(&MAPPING_HEADER, rows)?;
    atomic_write(path, bytes)?;
    info!(path = %path.display(), rows = rows.len(), "Stage-1 mapping written");
    Ok(())
}

pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), InfrastructureError> {
    let bytes = to_csv_bytes(&REPORT_HEADER, rows)?;
    atomic_write(path, bytes)?;
    info!(path = %path.display(), rows = rows.len(), "Dependency report written");
    Ok(())
}

/// Re-reads a stage-1 file. Rows without exactly four columns are skipped.
pub fn read_mapping(path: &Path) -> Result<Vec<MappingRow>, InfrastructureError> {
    if !path.is_file() {
        return Err(InfrastructureError::missing_input("stage-1 mapping", path));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable mapping row");
                continue;
            }
        };

        let fields: Vec<&str> = record.iter().collect();
        match MappingRow::from_fields(&fields, record_line(&record)) {
            Ok(row) => rows.push(row),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping malformed mapping row"),
        }
    }

    Ok(rows)
}

pub fn read_report(path: &Path) -> Result<Vec<ReportRow>, InfrastructureError> {
    if !path.is_file() {
        return Err(InfrastructureError::missing_input("dependency report", path));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<ReportRow>, csv::Error>>()?;
    Ok(rows)
}
