// dagtrace-core/src/application/mod.rs

pub mod enrich;
pub mod mapping;
pub mod scan;
pub mod trace;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use dagtrace_core::application::{run_trace, enrich_mapping};`
// sans avoir à connaître la structure interne des fichiers.

pub use enrich::{EnrichedReport, ReportEnricher, enrich_rows};
pub use mapping::{MappingAssembler, MappingOutcome, build_mapping};
pub use scan::{ContainmentScan, ScanOutcome};
pub use trace::{EnrichRequest, TraceSummary, enrich_mapping, run_trace};
