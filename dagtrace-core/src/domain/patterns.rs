// dagtrace-core/src/domain/patterns.rs
//
// Every textual heuristic used by the extractors lives here as a named
// pattern, so the exact matching rule can be read and versioned on its own.

use regex::Regex;
use std::sync::OnceLock;

/// Captures the literal path handed to `yaml.load(open('...'))` or
/// `yaml.safe_load(open("..."))`. Other loading idioms are not recognised.
pub const YAML_LOAD_PATTERN: &str = r#"yaml\.(?:safe_)?load\(open\(['"](.*?)['"]"#;

/// A DAG must mention this marker before the YAML pattern is even tried.
pub const YAML_MARKER: &str = ".yaml";

/// Loose email shape: word characters, dots and dashes around an `@`.
pub const EMAIL_PATTERN: &str = r"[\w.-]+@[\w.-]+";

/// `owner:`, `Owner:`, `'owner':` or `"owner" :`.
pub const OWNER_TAG_PATTERN: &str = r#"(?i)owner['"]?\s*:"#;

/// Start of another `Key:` entry (`State:`, `**Description:**`, `'retries':`).
/// Ends an owner section.
///
/// Only the start of the line is anchored: `Contact: x@y.com` or
/// `'retries': 1,` close the section as well, not just a bare `Key:` line.
/// Emails on such a line are therefore never collected as owners.
pub const SECTION_KEY_PATTERN: &str = r#"^\s*(?:\*\*|#)?\s*['"]?[A-Za-z_]+['"]?\s*:"#;

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|_| {
            // This should never happen as the patterns are hardcoded
            // and we avoid unsafe methods to satisfy Clippy.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

pub fn yaml_load() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, YAML_LOAD_PATTERN)
}

pub fn email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, EMAIL_PATTERN)
}

pub fn owner_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, OWNER_TAG_PATTERN)
}

pub fn section_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, SECTION_KEY_PATTERN)
}
