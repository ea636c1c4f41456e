//! Dropdown options derived from the `component` column of an indicator CSV.

use crate::extract::distinct_components;
use crate::types::ComponentOption;

/// Lists the distinct non-empty components of `raw` as dropdown options,
/// sorted by label (ties broken by value).
///
/// Never fails: a parse error or a missing `component` column yields an
/// empty list, since the result only feeds widget metadata.
pub fn list_options(raw: &str) -> Vec<ComponentOption> {
    let components = match distinct_components(raw) {
        Ok(components) => components,
        Err(e) => {
            tracing::debug!("No options derived from CSV: {}", e);
            return Vec::new();
        }
    };

    let mut options: Vec<ComponentOption> = components
        .into_iter()
        .map(ComponentOption::from_value)
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.value.cmp(&b.value)));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_series, ExtractError, NotFoundCause};

    #[test]
    fn distinct_values_sorted_by_label() {
        let csv = "filing_date,count,component\n2024-01-01,1,b\n2024-01-01,1,a\n2024-01-02,1,b\n2024-01-02,1,A\n";
        let options = list_options(csv);
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(values, vec!["A", "a", "b"]);
        assert_eq!(labels, vec!["A", "A", "B"]);
    }

    #[test]
    fn labels_replace_underscores() {
        let csv = "component\ninternational_us\ndomestic_us\n";
        let options = list_options(csv);
        assert_eq!(
            options,
            vec![
                ComponentOption {
                    value: "domestic_us".to_string(),
                    label: "Domestic Us".to_string(),
                },
                ComponentOption {
                    value: "international_us".to_string(),
                    label: "International Us".to_string(),
                },
            ]
        );
    }

    #[test]
    fn sorting_uses_label_not_value() {
        // Byte order would put "Banana" first.
        let csv = "component\nBanana\napple\n";
        let values: Vec<_> = list_options(csv).into_iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["apple", "Banana"]);
    }

    #[test]
    fn empty_components_are_ignored() {
        let csv = "filing_date,count,component\n2024-01-01,1,\n2024-01-01,1,x\n";
        assert_eq!(list_options(csv).len(), 1);
    }

    #[test]
    fn missing_component_header_gives_no_options() {
        assert!(list_options("filing_date,count\n2024-01-01,1\n").is_empty());
    }

    #[test]
    fn empty_text_gives_no_options() {
        assert!(list_options("").is_empty());
    }

    #[test]
    fn unparseable_text_gives_no_options() {
        let csv = format!(
            "component\nok\n{}\n",
            "z".repeat(crate::extract::MAX_FIELD_SIZE + 1)
        );
        assert!(list_options(&csv).is_empty());
    }

    #[test]
    fn first_option_is_never_an_unknown_component() {
        let csv = "filing_date,count,component\n2024-01-01,,zeta\n2024-01-01,3,beta\n";
        let first = list_options(csv).remove(0);
        assert_eq!(first.value, "beta");
        assert!(extract_series(csv, &first.value).is_ok());

        let only_unusable = "filing_date,count,component\n2024-01-01,,zeta\n";
        let first = list_options(only_unusable).remove(0);
        match extract_series(only_unusable, &first.value) {
            Err(ExtractError::NotFound(NotFoundCause::NoUsableData { .. })) => {}
            other => panic!("expected no usable data, got {:?}", other),
        }
    }
}
