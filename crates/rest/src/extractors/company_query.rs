//! Company search query extractor.
//!
//! Parses the flat query string of `GET /companies` into tagged
//! [`ParamValue`]s, then lowers them into a [`RecordFilter`] and a
//! [`PageRequest`].
//!
//! `states` and `entityTypes` are multi-valued: they may repeat, and each
//! occurrence is also split on commas. For every other parameter the first
//! occurrence wins. Empty values are treated as absent throughout.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use bizdir_persistence::types::{
    DateRange, PageRequest, RecordField, RecordFilter, SortDirection,
};
use tracing::debug;

use crate::error::RestError;

/// Query parameters that accept several values.
pub const MULTI_VALUED_PARAMS: [&str; 2] = ["states", "entityTypes"];

static ABSENT: ParamValue = ParamValue::Absent;

/// The value of one query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParamValue {
    /// Not supplied, or supplied empty.
    #[default]
    Absent,
    /// A single value.
    Scalar(String),
    /// A multi-valued parameter with at least one value.
    Set(Vec<String>),
}

impl ParamValue {
    /// Returns the value of a scalar parameter.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Returns every value as a list; empty when absent.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            ParamValue::Absent => Vec::new(),
            ParamValue::Scalar(v) => vec![v.clone()],
            ParamValue::Set(values) => values.clone(),
        }
    }

    /// Returns true if the parameter was not supplied.
    pub fn is_absent(&self) -> bool {
        matches!(self, ParamValue::Absent)
    }
}

/// Parsed query parameters of a company search.
///
/// # Example
///
/// ```rust,ignore
/// use bizdir_rest::extractors::CompanyQuery;
///
/// async fn handler(query: CompanyQuery) {
///     let filter = query.filter();
///     let page = query.page_request(10, 100)?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompanyQuery {
    params: HashMap<String, ParamValue>,
}

impl CompanyQuery {
    /// Builds the query from decoded `(name, value)` pairs in request order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params: HashMap<String, ParamValue> = HashMap::new();

        for (name, value) in pairs {
            if MULTI_VALUED_PARAMS.contains(&name.as_str()) {
                let parts: Vec<String> = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if parts.is_empty() {
                    continue;
                }
                match params.entry(name).or_default() {
                    ParamValue::Set(values) => values.extend(parts),
                    slot => *slot = ParamValue::Set(parts),
                }
            } else if !value.is_empty() {
                params.entry(name).or_insert(ParamValue::Scalar(value));
            }
        }

        Self { params }
    }

    /// Returns the value of a parameter.
    pub fn get(&self, name: &str) -> &ParamValue {
        self.params.get(name).unwrap_or(&ABSENT)
    }

    fn scalar(&self, name: &str) -> Option<String> {
        self.get(name).as_scalar().map(str::to_string)
    }

    /// Builds the record filter from the filter parameters.
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            search: self.scalar("search"),
            states: self.get("states").to_vec(),
            postcode: self.scalar("postcode"),
            status: self.scalar("status"),
            entity_types: self.get("entityTypes").to_vec(),
            effective_from: DateRange::new(
                self.scalar("effectiveFromStart"),
                self.scalar("effectiveFromEnd"),
            ),
            record_updated: DateRange::new(
                self.scalar("recordUpdatedStart"),
                self.scalar("recordUpdatedEnd"),
            ),
        }
    }

    /// Builds the page request.
    ///
    /// `page` defaults to 1, `limit` to `default_limit`, `sortDirection` to
    /// `desc`. A `limit` above `max_limit` is clamped.
    ///
    /// # Errors
    ///
    /// Returns `RestError::BadRequest` for a `page` or `limit` that is not a
    /// positive integer, an unknown `sortField`, or a `sortDirection` other
    /// than `asc`/`desc`.
    pub fn page_request(&self, default_limit: u32, max_limit: u32) -> Result<PageRequest, RestError> {
        let page = match self.get("page").as_scalar() {
            Some(raw) => parse_positive("page", raw)?,
            None => 1,
        };

        let limit = match self.get("limit").as_scalar() {
            Some(raw) => parse_positive("limit", raw)?,
            None => default_limit,
        };
        let clamped = limit.min(max_limit);
        if clamped != limit {
            debug!(requested = limit, max = max_limit, "Clamping page size");
        }

        let direction = match self.get("sortDirection").as_scalar() {
            Some(raw) => raw.parse::<SortDirection>()?,
            None => SortDirection::Desc,
        };

        let mut request = PageRequest::new(page, clamped)?.with_direction(direction);
        if let Some(raw) = self.get("sortField").as_scalar() {
            let field = raw.parse::<RecordField>()?;
            request = request.with_sort(field, direction);
        }

        Ok(request)
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<u32, RestError> {
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(RestError::bad_request(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}

impl<S> FromRequestParts<S> for CompanyQuery
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::bad_request(format!("Invalid query string: {}", e)))?;

        Ok(Self::from_pairs(pairs))
    }
}
