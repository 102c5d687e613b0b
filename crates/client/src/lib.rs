//! # bizdir-client - Business Directory Search Client
//!
//! Client-side state for the directory search view, and an HTTP client for
//! the directory API.
//!
//! - [`SearchSession`] owns a [`SearchState`] and re-issues the search on
//!   every filter, paging or sort change. Only the newest request may update
//!   the state; superseded requests are cancelled and dropped silently.
//! - [`HttpSearchClient`] implements [`SearchFetcher`] over `reqwest` and also
//!   fetches the filter options and dashboard statistics.
//! - [`encode_query`] serializes a search into the API's query string.
//! - [`dates`] converts `YYYYMMDD` dates for display and date pickers.
//! - [`Debouncer`] delays free-text inputs until typing pauses.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bizdir_client::{ClientConfig, FilterPatch, HttpSearchClient, SearchSession};
//! use bizdir_persistence::types::RecordField;
//!
//! let config = ClientConfig::new("http://127.0.0.1:8080");
//! let client = HttpSearchClient::new(config.clone())?;
//! let options = client.filter_options().await?;
//!
//! let session = SearchSession::new(client, &config);
//! session.refetch().await;
//! session.update_filters(FilterPatch::new().states(options.states)).await;
//! session.sort_by(RecordField::Postcode).await;
//!
//! let state = session.state();
//! println!("page {} of {}", state.page.page, state.total_pages);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dates;
pub mod debounce;
pub mod error;
pub mod fetcher;
pub mod query_string;
pub mod session;
pub mod state;

pub use config::ClientConfig;
pub use debounce::Debouncer;
pub use error::{ClientError, ClientResult};
pub use fetcher::{HttpSearchClient, SearchFetcher};
pub use query_string::encode_query;
pub use session::SearchSession;
pub use state::{FetchStatus, FilterPatch, SearchState};
