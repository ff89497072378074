// dagtrace-core/src/domain/execution.rs

use std::collections::HashMap;

/// Last known execution timestamp per DAG identifier.
///
/// Loading is sequential: a later record for the same `dag_id` replaces the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionTimeIndex {
    entries: HashMap<String, String>,
}

impl ExecutionTimeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value that was replaced, if any.
    pub fn insert(
        &mut self,
        dag_id: impl Into<String>,
        executed_at: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(dag_id.into(), executed_at.into())
    }

    pub fn lookup(&self, dag_id: &str) -> Option<&str> {
        self.entries.get(dag_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExecutionTimeIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (dag_id, executed_at) in iter {
            index.insert(dag_id, executed_at);
        }
        index
    }
}
