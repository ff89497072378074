// dagtrace-core/src/domain/extract/owner.rs

use crate::domain::patterns::{email, owner_tag, section_key};

/// Collects owner emails declared in a DAG file.
///
/// Two shapes are recognised:
/// - inline: `owner: a@x.com` or `'owner': 'a@x.com'`, the emails after the tag on the same line;
/// - section: an `Owner:` header with no email, followed by email lines up to
///   the next `Key:` line or the next owner tag.
///
/// Order of appearance is kept and duplicates are not removed.
pub struct OwnerExtractor;

impl OwnerExtractor {
    pub fn extract(source: &str) -> Vec<String> {
        let lines: Vec<&str> = source.lines().collect();
        let mut owners = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let Some(tag) = owner_tag().find(line) else {
                continue;
            };

            let before = owners.len();
            owners.extend(
                email()
                    .find_iter(&line[tag.end()..])
                    .map(|m| m.as_str().to_string()),
            );
            if owners.len() > before {
                continue;
            }

            for next in &lines[i + 1..] {
                if owner_tag().is_match(next) || section_key().is_match(next) {
                    break;
                }
                owners.extend(email().find_iter(next).map(|m| m.as_str().to_string()));
            }
        }

        owners
    }
}
