// dagtrace/src/commands/mod.rs

pub mod enrich;
pub mod inspect;
pub mod run;
