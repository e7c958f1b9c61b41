use std::collections::BTreeSet;

use serde::Serialize;

use super::filter::ALL;
use crate::core::{
    BaseSize,
    Card,
};

/// Choices offered by the filter controls, each led by the "All" wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionLists {
    pub factions: Vec<String>,
    pub subfactions: Vec<String>,
    pub stations: Vec<String>,
    pub tags: Vec<String>,
    pub base_sizes: Vec<String>,
}

impl OptionLists {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut base_sizes: Vec<String> =
            unique(cards.iter().filter_map(|c| c.base.as_ref()).map(BaseSize::label))
                .into_iter()
                .collect();
        base_sizes.sort_by(|a, b| base_label_key(a).cmp(&base_label_key(b)));

        Self {
            factions: with_all(unique(cards.iter().filter_map(|c| c.faction.as_deref()))),
            subfactions: with_all(unique(cards.iter().filter_map(|c| c.subfaction.as_deref()))),
            stations: with_all(unique(cards.iter().filter_map(|c| c.station.as_deref()))),
            tags: with_all(unique(cards.iter().flat_map(|c| c.tags.iter().map(String::as_str)))),
            base_sizes: with_all(base_sizes),
        }
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    values.filter(|v| !v.is_empty()).map(str::to_string).collect()
}

fn with_all(values: impl IntoIterator<Item = String>) -> Vec<String> {
    std::iter::once(ALL.to_string()).chain(values).collect()
}

/// Integer labels first in numeric order, then everything else as text.
fn base_label_key(label: &str) -> (bool, i64, &str) {
    match label.parse::<i64>() {
        Ok(mm) => (false, mm, label),
        Err(_) => (true, 0, label),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::models::cards_from_value;

    #[test]
    fn test_option_lists() {
        let cards = cards_from_value(&json!([
            {"faction": "Guild", "station": "Master", "tags": ["Fast", "Cheap"], "base": 30},
            {"faction": "Bayou", "subfaction": "Big Hat", "tags": ["Fast"], "base": "50"},
            {"faction": "Guild", "base": 40, "station": ""},
            {"base": 30},
        ]));
        let options = OptionLists::from_cards(&cards);

        assert_eq!(options.factions, vec!["All", "Bayou", "Guild"]);
        assert_eq!(options.subfactions, vec!["All", "Big Hat"]);
        assert_eq!(options.stations, vec!["All", "Master"]);
        assert_eq!(options.tags, vec!["All", "Cheap", "Fast"]);
        assert_eq!(options.base_sizes, vec!["All", "30", "40", "50"]);
    }

    #[test]
    fn test_mixed_base_labels_sort_numbers_first() {
        let records: Vec<_> = (0..200)
            .map(|i| {
                if i % 2 == 0 {
                    json!({"base": format!("{i}mm")})
                } else {
                    json!({"base": i})
                }
            })
            .collect();
        let cards = cards_from_value(&serde_json::Value::Array(records));
        let options = OptionLists::from_cards(&cards);

        let labels = &options.base_sizes[1..];
        assert_eq!(labels.len(), 200);

        let numeric: Vec<i64> = labels.iter().map_while(|l| l.parse().ok()).collect();
        assert_eq!(numeric, (0..200).filter(|i| i % 2 == 1).collect::<Vec<i64>>());

        let text = &labels[numeric.len()..];
        assert!(text.iter().all(|l| l.ends_with("mm")));
        assert!(text.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(text[0], "0mm");
        assert_eq!(text[1], "100mm");
    }

    #[test]
    fn test_empty_catalog() {
        let options = OptionLists::from_cards(&[]);
        assert_eq!(options.factions, vec!["All"]);
        assert_eq!(options.base_sizes, vec!["All"]);
    }
}
