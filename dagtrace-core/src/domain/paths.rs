// dagtrace-core/src/domain/paths.rs
//
// Path normalization for the report: everything is rendered relative to the
// pipeline root with the host separator.

use std::path::{Component, MAIN_SEPARATOR_STR, Path};

/// Renders `path` relative to `root`. Paths outside the root are rendered as-is.
pub fn relative_to_root(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => join_components(rel),
        Err(_) => path.to_string_lossy().to_string(),
    }
}

fn join_components(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(MAIN_SEPARATOR_STR)
}

/// Base name without extension (`sales/sqls/x.sql` -> `x`).
pub fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Grouping directory ("pod") of a root-relative path: its first directory.
/// A file sitting directly under the root has no pod.
pub fn pod(relative: &str) -> String {
    let mut parts = Path::new(relative).components().filter_map(|c| match c {
        Component::Normal(part) => Some(part),
        _ => None,
    });

    match (parts.next(), parts.next()) {
        (Some(first), Some(_)) => first.to_string_lossy().to_string(),
        _ => String::new(),
    }
}
