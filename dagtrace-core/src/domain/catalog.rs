// dagtrace-core/src/domain/catalog.rs

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified external table name, `SCHEMA.TABLE_NAME`.
///
/// Matching against source files is a plain, case-sensitive substring test,
/// so the identifier is kept exactly as authored in the catalog (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableIdentifier(String);

impl TableIdentifier {
    pub const SEPARATOR: char = '.';

    pub fn new(schema: &str, table: &str) -> Result<Self, DomainError> {
        let schema = schema.trim();
        let table = table.trim();
        if schema.is_empty() || table.is_empty() {
            return Err(DomainError::InvalidTableIdentifier {
                schema: schema.to_string(),
                table: table.to_string(),
            });
        }
        Ok(Self(format!("{}{}{}", schema, Self::SEPARATOR, table)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_identifier_joins_trimmed_parts() -> Result<()> {
        let id = TableIdentifier::new(" ODS_EXTERNAL ", "CCSTORE_ORDERSTATUS\t")?;
        assert_eq!(id.as_str(), "ODS_EXTERNAL.CCSTORE_ORDERSTATUS");
        assert_eq!(id.to_string(), "ODS_EXTERNAL.CCSTORE_ORDERSTATUS");
        Ok(())
    }

    #[test]
    fn test_blank_part_is_rejected() {
        assert!(TableIdentifier::new("FINANCE", "  ").is_err());
        assert!(TableIdentifier::new("", "dim_country").is_err());
    }
}
