// dagtrace-core/src/infrastructure/mod.rs

pub mod config;
pub mod csv_io;
pub mod error;
pub mod fs;
pub mod walker;

pub use walker::WalkDirSourceTree;
