// dagtrace-core/src/ports/source_tree.rs

// What the scanners need from a pipeline tree, without knowing where the
// bytes come from (local disk, fixture, archive...).

use std::io;
use std::path::{Path, PathBuf};

pub trait SourceTree {
    /// Directory every returned path lives under.
    fn root(&self) -> &Path;

    /// Every file under the root whose extension equals `extension`
    /// (without the dot), sorted by path so repeated runs see the same order.
    fn files_with_extension(&self, extension: &str) -> Vec<PathBuf>;

    /// Full text of one file. The handle is released before returning.
    fn read_text(&self, path: &Path) -> io::Result<String>;
}
