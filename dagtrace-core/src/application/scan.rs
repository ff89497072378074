// dagtrace-core/src/application/scan.rs
//
// "Which files of extension E contain needle N?": the one traversal shared
// by the SQL scan, the DAG resolver and the direct table scan.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::TableIdentifier;
use crate::domain::paths;
use crate::ports::SourceTree;

/// Matches per key, in traversal order, plus the files that could not be read.
#[derive(Debug, Clone)]
pub struct ScanOutcome<K: Eq + Hash> {
    pub matches: HashMap<K, Vec<PathBuf>>,
    pub unreadable: Vec<PathBuf>,
}

impl<K: Eq + Hash> ScanOutcome<K> {
    /// Empty slice when the key matched nothing (a valid outcome).
    pub fn files_for(&self, key: &K) -> &[PathBuf] {
        self.matches.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ContainmentScan<'a> {
    extension: &'a str,
    excluded_files: &'a [String],
}

impl<'a> ContainmentScan<'a> {
    pub fn new(extension: &'a str) -> Self {
        Self {
            extension,
            excluded_files: &[],
        }
    }

    pub fn excluding(mut self, file_names: &'a [String]) -> Self {
        self.excluded_files = file_names;
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.excluded_files.iter().any(|ex| name == ex.as_str()))
    }

    /// Each file is read once and tested against every needle (case-sensitive
    /// substring). A file is listed at most once per key.
    pub fn run<T, K, F>(&self, tree: &T, keys: &[K], needle: F) -> ScanOutcome<K>
    where
        T: SourceTree + ?Sized,
        K: Eq + Hash + Clone,
        F: Fn(&K) -> String,
    {
        let mut matches: HashMap<K, Vec<PathBuf>> =
            keys.iter().map(|k| (k.clone(), Vec::new())).collect();

        let needles: Vec<(&K, String)> = keys
            .iter()
            .map(|k| (k, needle(k)))
            .filter(|(_, n)| !n.is_empty())
            .collect();

        let mut unreadable = Vec::new();

        for path in tree.files_with_extension(self.extension) {
            if self.is_excluded(&path) {
                debug!(path = %path.display(), "Excluded from scan");
                continue;
            }

            let content = match tree.read_text(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                    unreadable.push(path);
                    continue;
                }
            };

            for (key, needle) in &needles {
                if content.contains(needle.as_str()) {
                    let hits = matches.entry((*key).clone()).or_default();
                    if !hits.contains(&path) {
                        hits.push(path.clone());
                    }
                }
            }
        }

        ScanOutcome {
            matches,
            unreadable,
        }
    }
}

/// `.sql` files containing each table identifier.
pub fn scan_sql_references<T: SourceTree + ?Sized>(
    tree: &T,
    catalog: &[TableIdentifier],
    excluded_files: &[String],
) -> ScanOutcome<TableIdentifier> {
    ContainmentScan::new("sql")
        .excluding(excluded_files)
        .run(tree, catalog, |id| id.as_str().to_string())
}

/// `.py` files mentioning each SQL file by stem (DAGs reference SQL by file
/// name, not by path).
pub fn resolve_dag_scripts<T: SourceTree + ?Sized>(
    tree: &T,
    sql_files: &[PathBuf],
) -> ScanOutcome<PathBuf> {
    ContainmentScan::new("py").run(tree, sql_files, |sql| paths::stem(sql))
}

/// `.py` files naming a table identifier directly, with no `.sql` in between.
pub fn scan_direct_table_references<T: SourceTree + ?Sized>(
    tree: &T,
    catalog: &[TableIdentifier],
) -> ScanOutcome<TableIdentifier> {
    ContainmentScan::new("py").run(tree, catalog, |id| id.as_str().to_string())
}
