//! Query string serialization for `GET /companies`.
//!
//! Parameters are written in a fixed order: `page`, `limit`, `sortField`,
//! `sortDirection`, then each present filter. `states` and `entityTypes`
//! are written as repeated keys.

use bizdir_persistence::types::{PageRequest, RecordFilter};
use url::form_urlencoded::Serializer;

/// Serializes a search request into a URL-encoded query string.
pub fn encode_query(filter: &RecordFilter, page: &PageRequest) -> String {
    let mut query = Serializer::new(String::new());

    query.append_pair("page", &page.page.to_string());
    query.append_pair("limit", &page.limit.to_string());
    if let Some(field) = page.sort_field {
        query.append_pair("sortField", field.as_str());
    }
    query.append_pair("sortDirection", page.sort_direction.as_str());

    append_present(&mut query, "search", &filter.search);
    for state in filter.states.iter().filter(|s| !s.is_empty()) {
        query.append_pair("states", state);
    }
    append_present(&mut query, "postcode", &filter.postcode);
    append_present(&mut query, "status", &filter.status);
    for entity_type in filter.entity_types.iter().filter(|s| !s.is_empty()) {
        query.append_pair("entityTypes", entity_type);
    }
    append_present(&mut query, "effectiveFromStart", &filter.effective_from.start);
    append_present(&mut query, "effectiveFromEnd", &filter.effective_from.end);
    append_present(&mut query, "recordUpdatedStart", &filter.record_updated.start);
    append_present(&mut query, "recordUpdatedEnd", &filter.record_updated.end);

    query.finish()
}

fn append_present(query: &mut Serializer<'_, String>, name: &str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
        query.append_pair(name, v);
    }
}
