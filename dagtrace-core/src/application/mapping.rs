// dagtrace-core/src/application/mapping.rs
//
// Stage 1: table -> sql -> dag -> yaml combinations.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::application::scan::{
    ScanOutcome, resolve_dag_scripts, scan_direct_table_references, scan_sql_references,
};
use crate::domain::paths::relative_to_root;
use crate::domain::{MappingRow, TableIdentifier, YamlReferenceExtractor};
use crate::infrastructure::config::ScanOptions;
use crate::ports::SourceTree;

#[derive(Debug, Clone)]
pub struct MappingOutcome {
    pub rows: Vec<MappingRow>,
    /// Tables with neither a SQL nor a direct DAG match.
    pub unmatched_tables: Vec<TableIdentifier>,
    pub unreadable_files: Vec<PathBuf>,
}

/// Joins the scan results into rows. Paths are rendered relative to `root`.
pub struct MappingAssembler<'a> {
    pub root: &'a Path,
    pub sql_matches: &'a ScanOutcome<TableIdentifier>,
    pub dag_matches: &'a ScanOutcome<PathBuf>,
    pub direct_matches: &'a ScanOutcome<TableIdentifier>,
    pub yaml_refs: &'a HashMap<PathBuf, Vec<String>>,
}

impl MappingAssembler<'_> {
    /// Rows per table, in catalog order:
    /// 1. SQL-mediated: each matching SQL file, then each DAG naming it;
    /// 2. direct: each DAG naming the table itself (blank `sql_path`);
    /// 3. a table-only row when neither applies.
    ///
    /// The same DAG may show up through both paths; both rows are kept.
    pub fn assemble(&self, catalog: &[TableIdentifier]) -> Vec<MappingRow> {
        let mut rows = Vec::new();

        for table in catalog {
            let sql_files = self.sql_matches.files_for(table);
            let direct_dags = self.direct_matches.files_for(table);

            if sql_files.is_empty() && direct_dags.is_empty() {
                rows.push(MappingRow::table_only(table.as_str()));
                continue;
            }

            for sql in sql_files {
                let sql_rel = relative_to_root(self.root, sql);
                let dags = self.dag_matches.files_for(sql);

                if dags.is_empty() {
                    rows.push(MappingRow {
                        sql_path: sql_rel,
                        ..MappingRow::table_only(table.as_str())
                    });
                    continue;
                }

                for dag in dags {
                    self.push_dag_rows(&mut rows, table, &sql_rel, dag);
                }
            }

            for dag in direct_dags {
                self.push_dag_rows(&mut rows, table, "", dag);
            }
        }

        rows
    }

    fn push_dag_rows(
        &self,
        rows: &mut Vec<MappingRow>,
        table: &TableIdentifier,
        sql_rel: &str,
        dag: &Path,
    ) {
        let base = MappingRow {
            external_table_name: table.as_str().to_string(),
            sql_path: sql_rel.to_string(),
            py_path: relative_to_root(self.root, dag),
            yaml_path: String::new(),
        };

        match self.yaml_refs.get(dag) {
            Some(yamls) if !yamls.is_empty() => {
                for yaml in yamls {
                    rows.push(MappingRow {
                        yaml_path: yaml.clone(),
                        ..base.clone()
                    });
                }
            }
            _ => rows.push(base),
        }
    }
}

/// Reads every DAG once and extracts its YAML configuration paths.
pub fn collect_yaml_references<T: SourceTree + ?Sized>(
    tree: &T,
    dags: &BTreeSet<PathBuf>,
) -> (HashMap<PathBuf, Vec<String>>, Vec<PathBuf>) {
    let mut refs = HashMap::new();
    let mut unreadable = Vec::new();

    for dag in dags {
        match tree.read_text(dag) {
            Ok(source) => {
                refs.insert(dag.clone(), YamlReferenceExtractor::extract(&source));
            }
            Err(e) => {
                warn!(path = %dag.display(), error = %e, "Skipping unreadable DAG");
                unreadable.push(dag.clone());
            }
        }
    }

    (refs, unreadable)
}

/// Runs the scans and assembles the stage-1 rows.
pub fn build_mapping<T: SourceTree + ?Sized>(
    tree: &T,
    catalog: &[TableIdentifier],
    options: &ScanOptions,
) -> MappingOutcome {
    let sql_matches = scan_sql_references(tree, catalog, &options.excluded_files);

    let sql_files: Vec<PathBuf> = sql_matches
        .matches
        .values()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    info!(sql_files = sql_files.len(), "SQL files referencing catalog tables");

    let dag_matches = resolve_dag_scripts(tree, &sql_files);
    let direct_matches = scan_direct_table_references(tree, catalog);

    let dags: BTreeSet<PathBuf> = dag_matches
        .matches
        .values()
        .chain(direct_matches.matches.values())
        .flatten()
        .cloned()
        .collect();
    info!(dags = dags.len(), "DAG files linked to catalog tables");

    let (yaml_refs, unreadable_dags) = collect_yaml_references(tree, &dags);

    let rows = MappingAssembler {
        root: tree.root(),
        sql_matches: &sql_matches,
        dag_matches: &dag_matches,
        direct_matches: &direct_matches,
        yaml_refs: &yaml_refs,
    }
    .assemble(catalog);

    let unmatched_tables = catalog
        .iter()
        .filter(|t| {
            sql_matches.files_for(t).is_empty() && direct_matches.files_for(t).is_empty()
        })
        .cloned()
        .collect();

    let unreadable_files = sql_matches
        .unreadable
        .into_iter()
        .chain(dag_matches.unreadable)
        .chain(direct_matches.unreadable)
        .chain(unreadable_dags)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    MappingOutcome {
        rows,
        unmatched_tables,
        unreadable_files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::WalkDirSourceTree;
    use anyhow::Result;
    use std::fs;
    use std::path::MAIN_SEPARATOR_STR;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) -> Result<()> {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn rel(parts: &[&str]) -> String {
        parts.join(MAIN_SEPARATOR_STR)
    }

    fn row(table: &str, sql: &str, py: &str, yaml: &str) -> MappingRow {
        MappingRow {
            external_table_name: table.into(),
            sql_path: sql.into(),
            py_path: py.into(),
            yaml_path: yaml.into(),
        }
    }

    #[test]
    fn test_unmatched_table_yields_blank_row() -> Result<()> {
        let dir = tempdir()?;
        let tree = WalkDirSourceTree::open(dir.path(), true)?;
        let catalog = vec![
            TableIdentifier::new("FINANCE", "dim_bofc_country")?,
            TableIdentifier::new("SALES", "fct_orders")?,
        ];

        let outcome = build_mapping(&tree, &catalog, &ScanOptions::default());

        assert_eq!(
            outcome.rows,
            vec![
                MappingRow::table_only("FINANCE.dim_bofc_country"),
                MappingRow::table_only("SALES.fct_orders"),
            ]
        );
        assert_eq!(outcome.unmatched_tables, catalog);
        Ok(())
    }

    #[test]
    fn test_sql_and_direct_paths_are_both_emitted() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        write(root, "sales/sqls/x.sql", "select * from ODS_EXTERNAL.CCSTORE_ORDERSTATUS")?;
        write(
            root,
            "sales/dags/x.py",
            "cfg = yaml.safe_load(open('/home/airflow/gcs/dags/sales/configs/x.yaml'))\n\
             run_sql('x.sql')\n\
             check('ODS_EXTERNAL.CCSTORE_ORDERSTATUS')\n",
        )?;
        write(root, "sales/sqls/orphan.sql", "select 1 from ODS_EXTERNAL.CCSTORE_ORDERSTATUS")?;

        let tree = WalkDirSourceTree::open(root, true)?;
        let catalog = vec![TableIdentifier::new("ODS_EXTERNAL", "CCSTORE_ORDERSTATUS")?];

        let outcome = build_mapping(&tree, &catalog, &ScanOptions::default());
        let table = "ODS_EXTERNAL.CCSTORE_ORDERSTATUS";
        let yaml = "/home/airflow/gcs/dags/sales/configs/x.yaml";

        assert_eq!(
            outcome.rows,
            vec![
                row(table, &rel(&["sales", "sqls", "orphan.sql"]), "", ""),
                row(
                    table,
                    &rel(&["sales", "sqls", "x.sql"]),
                    &rel(&["sales", "dags", "x.py"]),
                    yaml
                ),
                row(table, "", &rel(&["sales", "dags", "x.py"]), yaml),
            ]
        );
        assert!(outcome.unmatched_tables.is_empty());
        Ok(())
    }

    #[test]
    fn test_one_row_per_yaml_path() -> Result<()> {
        let root = PathBuf::from("/pipeline");
        let table = TableIdentifier::new("T", "A")?;
        let dag = root.join("voyage/dags/voyage_etl.py");

        let sql_matches = ScanOutcome {
            matches: HashMap::new(),
            unreadable: vec![],
        };
        let dag_matches = ScanOutcome {
            matches: HashMap::new(),
            unreadable: vec![],
        };
        let direct_matches = ScanOutcome {
            matches: HashMap::from([(table.clone(), vec![dag.clone()])]),
            unreadable: vec![],
        };
        let yaml_refs = HashMap::from([(
            dag.clone(),
            vec!["configs/dags.yaml".to_string(), "configs/tables.yaml".to_string()],
        )]);

        let rows = MappingAssembler {
            root: &root,
            sql_matches: &sql_matches,
            dag_matches: &dag_matches,
            direct_matches: &direct_matches,
            yaml_refs: &yaml_refs,
        }
        .assemble(std::slice::from_ref(&table));

        let py = rel(&["voyage", "dags", "voyage_etl.py"]);
        assert_eq!(
            rows,
            vec![
                row("T.A", "", &py, "configs/dags.yaml"),
                row("T.A", "", &py, "configs/tables.yaml"),
            ]
        );
        Ok(())
    }
}
