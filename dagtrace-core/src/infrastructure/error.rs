// dagtrace-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- TOP-LEVEL INPUTS ---
    #[error("Missing input: {kind} not found at '{}'", path.display())]
    #[diagnostic(
        code(dagtrace::infra::missing_input),
        help("The table catalog, the pipeline root and the execution-time CSV are all required.")
    )]
    MissingInput { kind: &'static str, path: PathBuf },

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(dagtrace::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CSV ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(dagtrace::infra::csv),
        help("Check the header row and the delimiter of the CSV file.")
    )]
    Csv(#[from] csv::Error),

    #[error("CSV file '{}' has no '{column}' column", path.display())]
    #[diagnostic(code(dagtrace::infra::csv_header))]
    MissingColumn { path: PathBuf, column: &'static str },

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(dagtrace::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(dagtrace::infra::config))]
    ConfigError(String),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(code(dagtrace::infra::config_missing))]
    ConfigNotFound(String),

    // --- SUMMARY (JSON) ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(dagtrace::infra::json))]
    Json(#[from] serde_json::Error),
}

impl InfrastructureError {
    pub fn missing_input(kind: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::MissingInput {
            kind,
            path: path.into(),
        }
    }
}
