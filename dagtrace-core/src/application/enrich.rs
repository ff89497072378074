// dagtrace-core/src/application/enrich.rs
//
// Stage 2: pod, last execution time and owners for every stage-1 row.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::warn;

use crate::domain::paths::{pod, relative_to_root, stem};
use crate::domain::report::render_owner_list;
use crate::domain::{ExecutionTimeIndex, MappingRow, OwnerExtractor, ReportRow};
use crate::ports::SourceTree;

#[derive(Debug, Clone, Default)]
pub struct EnrichedReport {
    pub rows: Vec<ReportRow>,
    /// DAG identifiers that had no execution record (blank `dag_time`).
    pub unresolved_dag_ids: Vec<String>,
    pub unreadable_dags: Vec<String>,
}

pub struct ReportEnricher<'a, T: SourceTree + ?Sized> {
    tree: &'a T,
    index: &'a ExecutionTimeIndex,
    // Owners per DAG; a DAG is read once however many rows point at it
    owners: HashMap<String, String>,
    unresolved: BTreeSet<String>,
    unreadable: BTreeSet<String>,
}

impl<'a, T: SourceTree + ?Sized> ReportEnricher<'a, T> {
    pub fn new(tree: &'a T, index: &'a ExecutionTimeIndex) -> Self {
        Self {
            tree,
            index,
            owners: HashMap::new(),
            unresolved: BTreeSet::new(),
            unreadable: BTreeSet::new(),
        }
    }

    pub fn enrich(&mut self, row: &MappingRow) -> ReportRow {
        let root = self.tree.root();
        let sql_file_path = relative_to_root(root, Path::new(&row.sql_path));

        if !row.has_dag() {
            return ReportRow {
                external_table_name: row.external_table_name.clone(),
                sql_file_path,
                dag: String::new(),
                pod: String::new(),
                dag_time: String::new(),
                yaml_airflow_files: String::new(),
                owners: String::new(),
            };
        }

        let dag = relative_to_root(root, Path::new(&row.py_path));
        let dag_id = stem(Path::new(&dag));

        let dag_time = match self.index.lookup(&dag_id) {
            Some(time) => time.to_string(),
            None => {
                if self.unresolved.insert(dag_id.clone()) {
                    warn!(dag_id = %dag_id, dag = %dag, "No execution record for DAG");
                }
                String::new()
            }
        };

        let owners = self.owners_of(&row.py_path);

        ReportRow {
            external_table_name: row.external_table_name.clone(),
            sql_file_path,
            pod: pod(&dag),
            dag,
            dag_time,
            yaml_airflow_files: row.yaml_path.clone(),
            owners,
        }
    }

    fn owners_of(&mut self, py_path: &str) -> String {
        if let Some(rendered) = self.owners.get(py_path) {
            return rendered.clone();
        }

        let full_path = self.tree.root().join(py_path);
        let owners = match self.tree.read_text(&full_path) {
            Ok(source) => OwnerExtractor::extract(&source),
            Err(e) => {
                warn!(path = %full_path.display(), error = %e, "Could not read DAG for owners");
                self.unreadable.insert(py_path.to_string());
                Vec::new()
            }
        };

        let rendered = render_owner_list(&owners);
        self.owners.insert(py_path.to_string(), rendered.clone());
        rendered
    }

    pub fn finish(self, rows: Vec<ReportRow>) -> EnrichedReport {
        EnrichedReport {
            rows,
            unresolved_dag_ids: self.unresolved.into_iter().collect(),
            unreadable_dags: self.unreadable.into_iter().collect(),
        }
    }
}

pub fn enrich_rows<T: SourceTree + ?Sized>(
    tree: &T,
    index: &ExecutionTimeIndex,
    rows: &[MappingRow],
) -> EnrichedReport {
    let mut enricher = ReportEnricher::new(tree, index);
    let enriched = rows.iter().map(|row| enricher.enrich(row)).collect();
    enricher.finish(enriched)
}
