// dagtrace-core/src/infrastructure/config/trace.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::{Validate, ValidationError};

use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["dagtrace.yaml", "dagtrace.yml"];

// --- 1. STRUCTS ---

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ScanOptions {
    /// File names skipped by the SQL scan (the table list dump, typically).
    #[validate(custom(function = "validate_file_names"))]
    #[serde(default = "default_excluded_files")]
    pub excluded_files: Vec<String>,

    #[serde(default = "default_follow_links")]
    pub follow_links: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            excluded_files: default_excluded_files(),
            follow_links: default_follow_links(),
        }
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Serialize, Validate, Clone, PartialEq)]
pub struct TraceConfig {
    pub catalog: PathBuf,
    pub pipeline_root: PathBuf,
    pub execution_times: PathBuf,
    pub mapping_output: PathBuf,
    pub report_output: PathBuf,
    pub summary_output: Option<PathBuf>,
    #[validate(nested)]
    pub scan: ScanOptions,
}

/// On-disk shape of `dagtrace.yaml`. Everything is optional so flags and
/// environment variables can fill the gaps.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TraceConfigFile {
    catalog: Option<PathBuf>,
    pipeline_root: Option<PathBuf>,
    execution_times: Option<PathBuf>,
    mapping_output: Option<PathBuf>,
    report_output: Option<PathBuf>,
    summary_output: Option<PathBuf>,
    #[serde(default)]
    scan: ScanOptions,
}

/// Values coming from the command line. They win over file and environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub catalog: Option<PathBuf>,
    pub pipeline_root: Option<PathBuf>,
    pub execution_times: Option<PathBuf>,
    pub mapping_output: Option<PathBuf>,
    pub report_output: Option<PathBuf>,
    pub summary_output: Option<PathBuf>,
}

fn default_excluded_files() -> Vec<String> {
    vec!["table_list.sql".to_string()]
}
fn default_follow_links() -> bool {
    true
}
fn default_mapping_output() -> PathBuf {
    PathBuf::from("target").join("table_mapping.csv")
}
fn default_report_output() -> PathBuf {
    PathBuf::from("target").join("dependency_report.csv")
}

fn validate_file_names(names: &[String]) -> Result<(), ValidationError> {
    for name in names {
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            let mut err = ValidationError::new("file_name");
            err.message = Some(format!("'{}' is not a bare file name", name).into());
            return Err(err);
        }
    }
    Ok(())
}

// --- 2. LOADER ---

/// Layering: `dagtrace.yaml` < environment (`DAGTRACE_*`) < command line.
///
/// `explicit` must exist when given; otherwise `search_dir` is probed for
/// `dagtrace.yaml` / `dagtrace.yml` and a missing file is not an error.
#[instrument(skip(overrides))]
pub fn load_trace_config(
    search_dir: &Path,
    explicit: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<TraceConfig, InfrastructureError> {
    let mut file = match find_config(search_dir, explicit)? {
        Some(path) => {
            info!(path = ?path, "Loading dagtrace configuration");
            let content = fs::read_to_string(&path)?;
            let parsed: TraceConfigFile = serde_yaml::from_str(&content)?;
            let base = path.parent().unwrap_or(search_dir);
            parsed.resolved_against(base)
        }
        None => TraceConfigFile::default(),
    };

    apply_env_overrides(&mut file, |key| std::env::var(key).ok());
    file.apply(overrides);
    file.finish()
}

fn find_config(
    search_dir: &Path,
    explicit: Option<&Path>,
) -> Result<Option<PathBuf>, InfrastructureError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }

    Ok(CONFIG_CANDIDATES
        .iter()
        .map(|name| search_dir.join(name))
        .find(|p| p.is_file()))
}

fn apply_env_overrides<F>(file: &mut TraceConfigFile, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    // Permet de faire: DAGTRACE_PIPELINE_ROOT=/tmp/pipeline dagtrace run
    if let Some(val) = lookup("DAGTRACE_PIPELINE_ROOT") {
        info!(old = ?file.pipeline_root, new = ?val, "Overriding pipeline root via ENV");
        file.pipeline_root = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup("DAGTRACE_EXECUTION_TIMES") {
        info!(old = ?file.execution_times, new = ?val, "Overriding execution-time CSV via ENV");
        file.execution_times = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup("DAGTRACE_REPORT_OUTPUT") {
        info!(old = ?file.report_output, new = ?val, "Overriding report output via ENV");
        file.report_output = Some(PathBuf::from(val));
    }
}

impl TraceConfigFile {
    fn resolved_against(self, base: &Path) -> Self {
        let resolve = |p: Option<PathBuf>| {
            p.map(|p| if p.is_relative() { base.join(p) } else { p })
        };
        Self {
            catalog: resolve(self.catalog),
            pipeline_root: resolve(self.pipeline_root),
            execution_times: resolve(self.execution_times),
            mapping_output: resolve(self.mapping_output),
            report_output: resolve(self.report_output),
            summary_output: resolve(self.summary_output),
            scan: self.scan,
        }
    }

    fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            catalog,
            pipeline_root,
            execution_times,
            mapping_output,
            report_output,
            summary_output,
        } = overrides;

        self.catalog = catalog.or(self.catalog.take());
        self.pipeline_root = pipeline_root.or(self.pipeline_root.take());
        self.execution_times = execution_times.or(self.execution_times.take());
        self.mapping_output = mapping_output.or(self.mapping_output.take());
        self.report_output = report_output.or(self.report_output.take());
        self.summary_output = summary_output.or(self.summary_output.take());
    }

    fn finish(self) -> Result<TraceConfig, InfrastructureError> {
        let required = |value: Option<PathBuf>, key: &str| {
            value.ok_or_else(|| {
                InfrastructureError::ConfigError(format!(
                    "'{}' is not set (config file, environment or command line)",
                    key
                ))
            })
        };

        let config = TraceConfig {
            catalog: required(self.catalog, "catalog")?,
            pipeline_root: required(self.pipeline_root, "pipeline-root")?,
            execution_times: required(self.execution_times, "execution-times")?,
            mapping_output: self.mapping_output.unwrap_or_else(default_mapping_output),
            report_output: self.report_output.unwrap_or_else(default_report_output),
            summary_output: self.summary_output,
            scan: self.scan,
        };

        config
            .validate()
            .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

        if config.mapping_output == config.report_output {
            return Err(InfrastructureError::ConfigError(
                "mapping-output and report-output must be different files".to_string(),
            ));
        }

        Ok(config)
    }
}
