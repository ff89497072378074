pub mod trace;

pub use trace::{ConfigOverrides, ScanOptions, TraceConfig, load_trace_config};
