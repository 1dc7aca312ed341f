//! Scholar Core - search session and pagination
//!
//! Wire types for the academic search/classification service, the search
//! session state machine and the pagination token generator. Nothing in this
//! crate performs I/O; network access goes through the traits in [`backend`].

pub mod backend;
pub mod error;
pub mod pagination;
pub mod robustness;
pub mod session;
pub mod types;

pub use backend::{ClassifierBackend, SearchBackend};
pub use error::{SessionError, EMPTY_QUERY_MESSAGE, SEARCH_FAILED_MESSAGE};
pub use pagination::{page_tokens, total_pages, PageToken};
pub use session::{Commit, LoadingState, PageSize, SearchRequest, SearchSession};
pub use types::*;
