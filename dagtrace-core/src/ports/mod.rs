// dagtrace-core/src/ports/mod.rs

pub mod source_tree;

pub use source_tree::SourceTree;
