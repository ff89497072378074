pub mod catalog;
pub mod error;
pub mod execution;
pub mod extract;
pub mod paths;
pub mod patterns;
pub mod report;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use catalog::TableIdentifier;
pub use error::DomainError;
pub use execution::ExecutionTimeIndex;
pub use extract::{OwnerExtractor, YamlReferenceExtractor};
pub use report::{MappingRow, ReportRow};
