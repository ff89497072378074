use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const FX_DAG: &str = r#"from airflow import DAG
import yaml

config = yaml.safe_load(open('config/fx.yaml'))

"""
Owner:
  data@corp.com
  ops@corp.com
Schedule:
  daily
"""

load = SqlTask(task_id="load", sql="sql/load_fx.sql")
"#;

const HR_DAG: &str = r#"from airflow import DAG

default_args = {'owner': 'hr@corp.com', 'retries': 1}

query = "SELECT * FROM HR.employees"
"#;

/// Abstraction for a throwaway pipeline tree plus its input CSVs.
struct TraceTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl TraceTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();

        let pipeline = root.join("pipeline");
        write(&pipeline.join("finance/sql/load_fx.sql"), "INSERT INTO FINANCE.fx_rates SELECT * FROM staging;\n")?;
        write(&pipeline.join("finance/dags/fx_daily.py"), FX_DAG)?;
        write(&pipeline.join("hr/dags/hr_sync.py"), HR_DAG)?;
        // Every table is listed here; must never count as a reference.
        write(
            &pipeline.join("table_list.sql"),
            "FINANCE.fx_rates\nHR.employees\nSALES.orders\n",
        )?;

        write(
            &root.join("inputs/external_tables.csv"),
            "schema,table\nFINANCE,fx_rates\nHR,employees\nSALES,orders\n",
        )?;
        write(
            &root.join("inputs/dag_times.csv"),
            "dag_id,execution_datetime\nfx_daily,2024-01-01 02:00:00\n",
        )?;

        Ok(Self { _tmp: tmp, root })
    }

    fn write_config(&self) -> Result<()> {
        write(
            &self.root.join("dagtrace.yaml"),
            "catalog: inputs/external_tables.csv\n\
             pipeline-root: pipeline\n\
             execution-times: inputs/dag_times.csv\n\
             summary-output: target/summary.json\n",
        )
    }

    fn dagtrace(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dagtrace"));
        cmd.current_dir(&self.root)
            .env_remove("DAGTRACE_PIPELINE_ROOT")
            .env_remove("DAGTRACE_REPORT_OUTPUT")
            .env_remove("DAGTRACE_EXECUTION_TIMES")
            .env_remove("RUST_LOG");
        cmd
    }

    fn report(&self) -> Result<String> {
        let raw = fs::read_to_string(self.root.join("target/dependency_report.csv"))?;
        Ok(raw.replace("\r\n", "\n"))
    }
}

fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[test]
fn test_run_with_config_file() -> Result<()> {
    let env = TraceTestEnv::new()?;
    env.write_config()?;

    env.dagtrace()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report rows: 3"))
        .stdout(predicate::str::contains("DAG(s) without execution time: hr_sync"));

    assert!(env.root.join("target/table_mapping.csv").exists());
    assert!(env.root.join("target/summary.json").exists());

    insta::assert_snapshot!("dependency_report", env.report()?);
    Ok(())
}

#[test]
fn test_run_with_flags_only() -> Result<()> {
    let env = TraceTestEnv::new()?;

    env.dagtrace()
        .arg("run")
        .arg("--catalog")
        .arg(env.root.join("inputs/external_tables.csv"))
        .arg("--pipeline-root")
        .arg(env.root.join("pipeline"))
        .arg("--execution-times")
        .arg(env.root.join("inputs/dag_times.csv"))
        .arg("-o")
        .arg(env.root.join("target/dependency_report.csv"))
        .assert()
        .success();

    let report = env.report()?;
    assert!(report.contains("HR.employees,,hr/dags/hr_sync.py,hr,,,['hr@corp.com']"));
    assert!(report.ends_with("SALES.orders,,,,,,\n"));
    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let env = TraceTestEnv::new()?;
    env.write_config()?;

    env.dagtrace().arg("run").assert().success();
    let first = fs::read(env.root.join("target/dependency_report.csv"))?;
    assert!(first.starts_with(b"external_table_name,sql_file_path,dag,pod,dag_time,yaml_airflow_files,owners\r\n"));
    assert!(first.ends_with(b"SALES.orders,,,,,,\r\n"));

    env.dagtrace().arg("run").assert().success();
    let second = fs::read(env.root.join("target/dependency_report.csv"))?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_missing_execution_times_fails_without_output() -> Result<()> {
    let env = TraceTestEnv::new()?;
    env.write_config()?;
    fs::remove_file(env.root.join("inputs/dag_times.csv"))?;

    env.dagtrace()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dag_times.csv"));

    assert!(!env.root.join("target/table_mapping.csv").exists());
    assert!(!env.root.join("target/dependency_report.csv").exists());
    Ok(())
}

#[test]
fn test_run_without_required_inputs_fails() -> Result<()> {
    let env = TraceTestEnv::new()?;

    env.dagtrace()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog"));
    Ok(())
}

#[test]
fn test_enrich_hand_written_mapping() -> Result<()> {
    let env = TraceTestEnv::new()?;
    write(
        &env.root.join("target/table_mapping.csv"),
        "external_table_name,sql_path,py_path,yaml_path\n\
         FINANCE.fx_rates,,finance/dags/fx_daily.py,config/fx.yaml\n",
    )?;

    env.dagtrace()
        .arg("enrich")
        .arg("--pipeline-root")
        .arg("pipeline")
        .arg("--execution-times")
        .arg("inputs/dag_times.csv")
        .assert()
        .success();

    assert_eq!(
        env.report()?,
        "external_table_name,sql_file_path,dag,pod,dag_time,yaml_airflow_files,owners\n\
         FINANCE.fx_rates,,finance/dags/fx_daily.py,finance,2024-01-01 02:00:00,config/fx.yaml,\"['data@corp.com', 'ops@corp.com']\"\n"
    );
    Ok(())
}

#[test]
fn test_inspect_shows_table_rows() -> Result<()> {
    let env = TraceTestEnv::new()?;
    env.write_config()?;
    env.dagtrace().arg("run").assert().success();

    env.dagtrace()
        .args(["inspect", "--table", "FINANCE.fx_rates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fx_daily.py"))
        .stdout(predicate::str::contains("1 row(s)"));

    env.dagtrace()
        .args(["inspect", "--table", "NOPE.missing"])
        .assert()
        .failure();
    Ok(())
}
