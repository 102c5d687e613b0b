//! Filter types for record search.
//!
//! A [`RecordFilter`] is the structured form of the filter half of a search
//! request. It is lowered into a list of [`Predicate`]s which every backend
//! must AND together. Predicates can also be evaluated in memory against a
//! [`BusinessRecord`], which is how tests check that returned rows really
//! satisfy the filter.

use serde::{Deserialize, Serialize};

use super::record::{BusinessRecord, RecordField};

/// An inclusive range over `YYYYMMDD` date strings.
///
/// Either bound may be absent. `start <= end` is not checked; an inverted
/// range simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self {
            start: non_empty(start),
            end: non_empty(end),
        }
    }

    /// Returns true if neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// The filter half of a search request.
///
/// All present criteria must hold for a record to match. Empty strings and
/// empty sets are treated as absent; use [`RecordFilter::normalized`] to
/// enforce that on a value built by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Case-insensitive substring over entity name or entity type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Accepted jurisdiction codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    /// Case-insensitive postcode substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Exact status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Accepted entity types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<String>,
    #[serde(default, skip_serializing_if = "DateRange::is_empty")]
    pub effective_from: DateRange,
    #[serde(default, skip_serializing_if = "DateRange::is_empty")]
    pub record_updated: DateRange,
}

impl RecordFilter {
    /// Creates an empty filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_entity_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_effective_from(mut self, range: DateRange) -> Self {
        self.effective_from = range;
        self
    }

    pub fn with_record_updated(mut self, range: DateRange) -> Self {
        self.record_updated = range;
        self
    }

    /// Drops empty strings and empty set members so they read as absent.
    pub fn normalized(self) -> Self {
        Self {
            search: non_empty(self.search),
            states: self.states.into_iter().filter(|s| !s.is_empty()).collect(),
            postcode: non_empty(self.postcode),
            status: non_empty(self.status),
            entity_types: self
                .entity_types
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect(),
            effective_from: DateRange::new(self.effective_from.start, self.effective_from.end),
            record_updated: DateRange::new(self.record_updated.start, self.record_updated.end),
        }
    }

    /// Returns true if no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Lowers the filter into the predicates that must all hold.
    ///
    /// The order is fixed, which keeps generated SQL and its parameter
    /// numbering deterministic.
    pub fn predicates(&self) -> Vec<Predicate> {
        let filter = self.clone().normalized();
        let mut predicates = Vec::new();

        if let Some(term) = filter.search {
            predicates.push(Predicate::AnyContains {
                fields: vec![RecordField::EntityName, RecordField::EntityType],
                term,
            });
        }
        if !filter.states.is_empty() {
            predicates.push(Predicate::OneOf {
                field: RecordField::State,
                values: filter.states,
            });
        }
        if let Some(term) = filter.postcode {
            predicates.push(Predicate::Contains {
                field: RecordField::Postcode,
                term,
            });
        }
        if let Some(value) = filter.status {
            predicates.push(Predicate::Equals {
                field: RecordField::Status,
                value,
            });
        }
        if !filter.entity_types.is_empty() {
            predicates.push(Predicate::OneOf {
                field: RecordField::EntityType,
                values: filter.entity_types,
            });
        }
        if !filter.effective_from.is_empty() {
            predicates.push(Predicate::Range {
                field: RecordField::EffectiveFrom,
                start: filter.effective_from.start,
                end: filter.effective_from.end,
            });
        }
        if !filter.record_updated.is_empty() {
            predicates.push(Predicate::Range {
                field: RecordField::RecordUpdated,
                start: filter.record_updated.start,
                end: filter.record_updated.end,
            });
        }

        predicates
    }

    /// Returns true if the record satisfies every predicate.
    pub fn matches(&self, record: &BusinessRecord) -> bool {
        self.predicates().iter().all(|p| p.matches(record))
    }
}

/// A single search criterion over record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// At least one of the fields contains the term, ignoring case.
    AnyContains {
        fields: Vec<RecordField>,
        term: String,
    },
    /// The field equals one of the values.
    OneOf {
        field: RecordField,
        values: Vec<String>,
    },
    /// The field contains the term, ignoring case.
    Contains { field: RecordField, term: String },
    /// The field equals the value exactly.
    Equals { field: RecordField, value: String },
    /// The field lies within the inclusive bounds, compared as text.
    Range {
        field: RecordField,
        start: Option<String>,
        end: Option<String>,
    },
}

impl Predicate {
    /// Evaluates the predicate against a record.
    ///
    /// Substring predicates compare through [`fold_case`], as the SQL
    /// backend does.
    pub fn matches(&self, record: &BusinessRecord) -> bool {
        match self {
            Predicate::AnyContains { fields, term } => fields
                .iter()
                .any(|field| contains_ignore_case(record.text(*field), term)),
            Predicate::OneOf { field, values } => record
                .text(*field)
                .is_some_and(|v| values.iter().any(|candidate| candidate == v)),
            Predicate::Contains { field, term } => contains_ignore_case(record.text(*field), term),
            Predicate::Equals { field, value } => record.text(*field) == Some(value.as_str()),
            Predicate::Range { field, start, end } => {
                let Some(v) = record.text(*field) else {
                    return false;
                };
                start.as_deref().is_none_or(|s| v >= s) && end.as_deref().is_none_or(|e| v <= e)
            }
        }
    }
}

/// Unicode lowercase used for every case-insensitive comparison.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| fold_case(h).contains(&fold_case(needle)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(name: &str, state: &str, status: &str, effective_from: &str) -> BusinessRecord {
        BusinessRecord {
            id: 1,
            abn: "11111111111".to_string(),
            entity_name: name.to_string(),
            state: state.to_string(),
            postcode: "2000".to_string(),
            status: status.to_string(),
            effective_from: effective_from.to_string(),
            entity_type: "Australian Private Company".to_string(),
            record_updated: "20240101".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_filter_has_no_predicates() {
        assert!(RecordFilter::new().is_empty());
        assert!(RecordFilter::new().matches(&record("ACME", "NSW", "ACT", "20200101")));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let filter = RecordFilter::new()
            .with_search("")
            .with_states(Vec::<String>::new())
            .with_status("")
            .with_entity_types(vec![""])
            .with_effective_from(DateRange::new(Some(String::new()), None));

        assert!(filter.is_empty());
        assert_eq!(filter.normalized(), RecordFilter::default());
    }

    #[test]
    fn test_predicates_lowering_order() {
        let filter = RecordFilter::new()
            .with_record_updated(DateRange::new(None, Some("20241231".into())))
            .with_status("ACT")
            .with_search("acme")
            .with_states(["NSW", "VIC"]);

        let predicates = filter.predicates();
        assert_eq!(predicates.len(), 4);
        assert!(matches!(predicates[0], Predicate::AnyContains { .. }));
        assert!(matches!(
            predicates[1],
            Predicate::OneOf {
                field: RecordField::State,
                ..
            }
        ));
        assert!(matches!(predicates[2], Predicate::Equals { .. }));
        assert!(matches!(
            predicates[3],
            Predicate::Range {
                field: RecordField::RecordUpdated,
                ..
            }
        ));
    }

    #[test]
    fn test_search_matches_name_or_type_ignoring_case() {
        let filter = RecordFilter::new().with_search("acme");
        assert!(filter.matches(&record("Acme Holdings", "NSW", "ACT", "20200101")));

        let filter = RecordFilter::new().with_search("PRIVATE");
        assert!(filter.matches(&record("Zenith", "NSW", "ACT", "20200101")));

        let filter = RecordFilter::new().with_search("widgets");
        assert!(!filter.matches(&record("Acme Holdings", "NSW", "ACT", "20200101")));
    }

    #[test]
    fn test_states_and_status_combine_with_and() {
        let filter = RecordFilter::new()
            .with_states(["NSW", "VIC"])
            .with_status("ACT");

        assert!(filter.matches(&record("A", "NSW", "ACT", "20200101")));
        assert!(filter.matches(&record("A", "VIC", "ACT", "20200101")));
        assert!(!filter.matches(&record("A", "QLD", "ACT", "20200101")));
        assert!(!filter.matches(&record("A", "NSW", "CAN", "20200101")));
    }

    #[test]
    fn test_status_is_exact() {
        let filter = RecordFilter::new().with_status("act");
        assert!(!filter.matches(&record("A", "NSW", "ACT", "20200101")));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = RecordFilter::new().with_effective_from(DateRange::new(
            Some("20200101".into()),
            Some("20201231".into()),
        ));

        assert!(filter.matches(&record("A", "NSW", "ACT", "20200101")));
        assert!(filter.matches(&record("A", "NSW", "ACT", "20201231")));
        assert!(!filter.matches(&record("A", "NSW", "ACT", "20191231")));
        assert!(!filter.matches(&record("A", "NSW", "ACT", "20210101")));
    }

    #[test]
    fn test_open_ended_range() {
        let filter = RecordFilter::new()
            .with_effective_from(DateRange::new(Some("20200101".into()), None));
        assert!(filter.matches(&record("A", "NSW", "ACT", "29991231")));
        assert!(!filter.matches(&record("A", "NSW", "ACT", "19991231")));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let filter = RecordFilter::new().with_effective_from(DateRange::new(
            Some("20201231".into()),
            Some("20200101".into()),
        ));
        assert!(!filter.matches(&record("A", "NSW", "ACT", "20200601")));
    }

    #[test]
    fn test_postcode_substring() {
        let filter = RecordFilter::new().with_postcode("00");
        assert!(filter.matches(&record("A", "NSW", "ACT", "20200101")));

        let filter = RecordFilter::new().with_postcode("3000");
        assert!(!filter.matches(&record("A", "NSW", "ACT", "20200101")));
    }
}
