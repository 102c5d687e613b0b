//! Client-side search state.

use bizdir_persistence::types::{
    BusinessRecord, DateRange, PageRequest, RecordFilter, SearchEnvelope,
};

/// Progress of the most recent search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Fetching,
    /// The latest request succeeded.
    Ready,
    /// The latest request failed with the given message.
    Failed(String),
}

impl FetchStatus {
    pub fn is_fetching(&self) -> bool {
        matches!(self, FetchStatus::Fetching)
    }

    /// The failure message, if the latest request failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything a search view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Active filter criteria.
    pub filter: RecordFilter,
    /// Current page, page size and sort.
    pub page: PageRequest,
    /// Rows of the last successful response.
    pub data: Vec<BusinessRecord>,
    /// Total matches reported by the last successful response.
    pub total: u64,
    /// Page count reported by the last successful response.
    pub total_pages: u64,
    pub status: FetchStatus,
    /// Generation of the newest request issued for this state.
    pub generation: u64,
}

impl SearchState {
    /// Creates an empty state at the given pagination.
    pub fn new(page: PageRequest) -> Self {
        Self {
            filter: RecordFilter::default(),
            page,
            data: Vec::new(),
            total: 0,
            total_pages: 0,
            status: FetchStatus::Idle,
            generation: 0,
        }
    }

    /// Stores a successful response.
    pub(crate) fn apply(&mut self, envelope: SearchEnvelope) {
        self.data = envelope.data;
        self.total = envelope.total;
        self.total_pages = envelope.total_pages;
        self.status = FetchStatus::Ready;
    }

    /// Returns true if any criterion other than the free-text search is set.
    pub fn has_active_filters(&self) -> bool {
        !RecordFilter {
            search: None,
            ..self.filter.clone()
        }
        .normalized()
        .is_empty()
    }
}

/// A partial filter update.
///
/// Fields left as `None` are untouched. `Some` replaces the field; an empty
/// string or an empty list clears it.
///
/// # Example
///
/// ```
/// use bizdir_client::FilterPatch;
/// use bizdir_persistence::types::RecordFilter;
///
/// let mut filter = RecordFilter::new().with_status("ACT");
/// FilterPatch::new().states(["NSW"]).status("").apply_to(&mut filter);
///
/// assert_eq!(filter.states, vec!["NSW"]);
/// assert_eq!(filter.status, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub states: Option<Vec<String>>,
    pub postcode: Option<String>,
    pub status: Option<String>,
    pub entity_types: Option<Vec<String>>,
    pub effective_from_start: Option<String>,
    pub effective_from_end: Option<String>,
    pub record_updated_start: Option<String>,
    pub record_updated_end: Option<String>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = Some(states.into_iter().map(Into::into).collect());
        self
    }

    pub fn postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn entity_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn effective_from(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.effective_from_start = Some(start.into());
        self.effective_from_end = Some(end.into());
        self
    }

    pub fn record_updated(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.record_updated_start = Some(start.into());
        self.record_updated_end = Some(end.into());
        self
    }

    /// A patch removing one state from the current selection.
    pub fn without_state(filter: &RecordFilter, state: &str) -> Self {
        Self::new().states(filter.states.iter().filter(|s| *s != state).cloned())
    }

    /// A patch removing one entity type from the current selection.
    pub fn without_entity_type(filter: &RecordFilter, entity_type: &str) -> Self {
        Self::new().entity_types(
            filter
                .entity_types
                .iter()
                .filter(|t| *t != entity_type)
                .cloned(),
        )
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the patch into `filter`, normalizing empties to absent.
    pub fn apply_to(self, filter: &mut RecordFilter) {
        let mut merged = std::mem::take(filter);

        if let Some(search) = self.search {
            merged.search = Some(search);
        }
        if let Some(states) = self.states {
            merged.states = states;
        }
        if let Some(postcode) = self.postcode {
            merged.postcode = Some(postcode);
        }
        if let Some(status) = self.status {
            merged.status = Some(status);
        }
        if let Some(types) = self.entity_types {
            merged.entity_types = types;
        }
        merged.effective_from = DateRange::new(
            self.effective_from_start.or(merged.effective_from.start),
            self.effective_from_end.or(merged.effective_from.end),
        );
        merged.record_updated = DateRange::new(
            self.record_updated_start.or(merged.record_updated.start),
            self.record_updated_end.or(merged.record_updated.end),
        );

        *filter = merged.normalized();
    }
}
