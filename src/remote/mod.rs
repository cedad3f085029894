//! The seam between us and the remote catalog service.

pub mod http;

use async_trait::async_trait;

use crate::{
    error::RemoteError,
    models::{Entry, EntryDraft, EntryId},
};

pub use http::HttpCatalog;

/// One filtered query: a free-text term plus a conjunctive tag filter.
///
/// Matching semantics (substring vs. relevance, etc.) belong to the service.
/// We only promise to carry the term and tags faithfully.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchQuery {
    /// Free-text term. Empty means "don't filter on text".
    pub term: String,

    /// Entries must match *all* of these tags. Empty means "don't filter on
    /// tags".
    pub tags: Vec<String>,

    /// Result cap, if the caller wants one.
    pub limit: Option<u32>,
}

impl SearchQuery {
    /// True when this query filters on nothing, i.e. the service should
    /// answer with the full collection.
    pub fn is_unfiltered(&self) -> bool {
        self.term.is_empty() && self.tags.is_empty()
    }
}

/// The remote catalog service, as the store and search controller see it.
///
/// Persistence and search ranking live behind this trait; we just consume
/// the results.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches the full entry collection.
    async fn list_entries(&self) -> Result<Vec<Entry>, RemoteError>;

    /// Persists a new entry. The service assigns the id.
    async fn create_entry(&self, draft: &EntryDraft) -> Result<Entry, RemoteError>;

    /// Full-field replace of an existing entry.
    async fn update_entry(&self, id: &EntryId, draft: &EntryDraft) -> Result<Entry, RemoteError>;

    /// Deletes an entry by id.
    async fn delete_entry(&self, id: &EntryId) -> Result<(), RemoteError>;

    /// Runs a filtered query. An unfiltered query returns the full
    /// collection.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>, RemoteError>;

    /// All distinct tags, as the *service* sees them.
    ///
    /// Available for completeness; the store derives its own tag universe
    /// client-side instead of calling this.
    async fn list_tags(&self) -> Result<Vec<String>, RemoteError>;
}
