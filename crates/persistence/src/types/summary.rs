//! Aggregate views over the whole record table.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Distinct values available for the filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub states: Vec<String>,
    pub statuses: Vec<String>,
    #[serde(rename = "entityTypes")]
    pub entity_types: Vec<String>,
}

impl FilterOptions {
    /// Reduces `(state, status, entity_type)` rows to sorted distinct sets.
    ///
    /// Values are trimmed; blank ones are dropped.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String, String)>,
    {
        let mut states = BTreeSet::new();
        let mut statuses = BTreeSet::new();
        let mut entity_types = BTreeSet::new();

        for (state, status, entity_type) in rows {
            insert_non_blank(&mut states, state);
            insert_non_blank(&mut statuses, status);
            insert_non_blank(&mut entity_types, entity_type);
        }

        Self {
            states: states.into_iter().collect(),
            statuses: statuses.into_iter().collect(),
            entity_types: entity_types.into_iter().collect(),
        }
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStats {
    pub total: u64,
    /// Records whose status is the active code.
    pub active: u64,
    /// Records whose status is the cancelled code.
    pub inactive: u64,
    pub unique_states: u64,
    pub unique_entity_types: u64,
}

/// Status codes that the stats aggregator counts as active and cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCodes {
    #[serde(default = "default_active_status")]
    pub active: String,
    #[serde(default = "default_cancelled_status")]
    pub cancelled: String,
}

fn default_active_status() -> String {
    "ACT".to_string()
}

fn default_cancelled_status() -> String {
    "CAN".to_string()
}

impl Default for StatusCodes {
    fn default() -> Self {
        Self {
            active: default_active_status(),
            cancelled: default_cancelled_status(),
        }
    }
}

impl StatusCodes {
    pub fn new(active: impl Into<String>, cancelled: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            cancelled: cancelled.into(),
        }
    }
}

/// Counts distinct non-blank values.
pub fn distinct_count<I>(values: I) -> u64
where
    I: IntoIterator<Item = String>,
{
    let mut seen = BTreeSet::new();
    for value in values {
        insert_non_blank(&mut seen, value);
    }
    seen.len() as u64
}

fn insert_non_blank(set: &mut BTreeSet<String>, value: String) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        set.insert(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(state: &str, status: &str, entity_type: &str) -> (String, String, String) {
        (state.into(), status.into(), entity_type.into())
    }

    #[test]
    fn test_filter_options_distinct_sorted() {
        let options = FilterOptions::from_rows(vec![
            row("VIC", "ACT", "Trust"),
            row("NSW", "CAN", "Company"),
            row("NSW", "ACT", "Company"),
        ]);

        assert_eq!(options.states, vec!["NSW", "VIC"]);
        assert_eq!(options.statuses, vec!["ACT", "CAN"]);
        assert_eq!(options.entity_types, vec!["Company", "Trust"]);
    }

    #[test]
    fn test_filter_options_drop_blank() {
        let options = FilterOptions::from_rows(vec![row("", "  ", "Trust"), row("QLD", "ACT", "")]);
        assert_eq!(options.states, vec!["QLD"]);
        assert_eq!(options.statuses, vec!["ACT"]);
        assert_eq!(options.entity_types, vec!["Trust"]);
    }

    #[test]
    fn test_filter_options_trim_before_dedup() {
        let options = FilterOptions::from_rows(vec![
            row("NSW", "ACT", "Trust"),
            row(" NSW ", "ACT ", " Trust"),
        ]);
        assert_eq!(options.states, vec!["NSW"]);
        assert_eq!(options.statuses, vec!["ACT"]);
        assert_eq!(options.entity_types, vec!["Trust"]);
    }

    #[test]
    fn test_filter_options_empty() {
        let options = FilterOptions::from_rows(Vec::new());
        assert_eq!(options, FilterOptions::default());

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"states": [], "statuses": [], "entityTypes": []})
        );
    }

    #[test]
    fn test_stats_json_keys() {
        let stats = RecordStats {
            total: 3,
            active: 2,
            inactive: 1,
            unique_states: 2,
            unique_entity_types: 1,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["uniqueStates"], 2);
        assert_eq!(json["uniqueEntityTypes"], 1);
    }

    #[test]
    fn test_distinct_count() {
        let values = vec!["NSW", "VIC", "NSW ", "", " "]
            .into_iter()
            .map(String::from);
        assert_eq!(distinct_count(values), 2);
    }

    #[test]
    fn test_status_codes_default() {
        let codes = StatusCodes::default();
        assert_eq!(codes.active, "ACT");
        assert_eq!(codes.cancelled, "CAN");
    }
}
