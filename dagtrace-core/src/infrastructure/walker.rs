// dagtrace-core/src/infrastructure/walker.rs

use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::ensure_input_dir;
use crate::ports::SourceTree;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// `SourceTree` over a local directory, backed by walkdir.
#[derive(Debug, Clone)]
pub struct WalkDirSourceTree {
    root: PathBuf,
    follow_links: bool,
}

impl WalkDirSourceTree {
    pub fn open(root: impl Into<PathBuf>, follow_links: bool) -> Result<Self, InfrastructureError> {
        let root = root.into();
        ensure_input_dir("pipeline root", &root)?;
        Ok(Self { root, follow_links })
    }
}

impl SourceTree for WalkDirSourceTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn files_with_extension(&self, extension: &str) -> Vec<PathBuf> {
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == extension)
            {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        // Undecodable bytes are replaced rather than dropping the file
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_lists_files_by_extension_sorted() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("sales/sqls"))?;
        fs::create_dir_all(dir.path().join("finance"))?;
        fs::write(dir.path().join("sales/sqls/b.sql"), "select 1")?;
        fs::write(dir.path().join("finance/a.sql"), "select 2")?;
        fs::write(dir.path().join("sales/readme.md"), "# sales")?;

        let tree = WalkDirSourceTree::open(dir.path(), true)?;
        let files = tree.files_with_extension("sql");

        assert_eq!(
            files,
            vec![
                dir.path().join("finance/a.sql"),
                dir.path().join("sales/sqls/b.sql"),
            ]
        );
        assert!(tree.files_with_extension("py").is_empty());
        Ok(())
    }

    #[test]
    fn test_read_text_is_lossy() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("legacy.sql");
        fs::write(&path, b"select '\xff' from ODS_EXTERNAL.CCSTORE")?;

        let tree = WalkDirSourceTree::open(dir.path(), false)?;
        let text = tree.read_text(&path)?;
        assert!(text.contains("ODS_EXTERNAL.CCSTORE"));
        Ok(())
    }

    #[test]
    fn test_missing_root_is_missing_input() {
        let result = WalkDirSourceTree::open("/definitely/not/a/pipeline", true);
        assert!(matches!(
            result,
            Err(InfrastructureError::MissingInput { kind: "pipeline root", .. })
        ));
    }
}
