// dagtrace-core/src/domain/extract/yaml.rs

use crate::domain::patterns::{YAML_MARKER, yaml_load};

/// Pulls configuration paths out of DAG source text.
///
/// Only the `yaml.(safe_)load(open('<path>'))` calling convention is
/// recognised; `with open(...) as f: yaml.safe_load(f)` and friends are
/// missed on purpose.
pub struct YamlReferenceExtractor;

impl YamlReferenceExtractor {
    pub fn extract(source: &str) -> Vec<String> {
        if !source.contains(YAML_MARKER) {
            return Vec::new();
        }

        yaml_load()
            .captures_iter(source)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_both_load_variants_in_order() {
        let source = r#"
import yaml
dags = yaml.safe_load(open('/home/airflow/gcs/dags/voyage/configs/dags.yaml'))
tables = yaml.load(open("{voyage_etl_home}/configs/tables.yaml"), Loader=yaml.FullLoader)
"#;
        let paths = YamlReferenceExtractor::extract(source);
        assert_eq!(
            paths,
            vec![
                "/home/airflow/gcs/dags/voyage/configs/dags.yaml",
                "{voyage_etl_home}/configs/tables.yaml",
            ]
        );
    }

    #[test]
    fn test_other_idioms_are_not_recognised() {
        let source = r#"
with open('configs/settings.yaml') as f:
    settings = yaml.safe_load(f)
"#;
        assert!(YamlReferenceExtractor::extract(source).is_empty());
    }

    #[test]
    fn test_marker_gate() {
        // Matches the call shape but never mentions a .yaml file
        let source = "cfg = yaml.safe_load(open('configs/settings.yml'))";
        assert!(YamlReferenceExtractor::extract(source).is_empty());
    }
}
