//! The search controller: keeps the filtered collection in sync with the
//! current term and tag selection.

use std::sync::Arc;

use crate::{
    error::CatalogError,
    models::Entry,
    remote::{CatalogService, SearchQuery},
    store::EntryStore,
};

/// One issued search: a snapshot of the query plus its place in line.
///
/// Tickets carry a monotonically increasing sequence number, so a response
/// belonging to an old query can be recognized and discarded no matter when
/// it arrives.
#[derive(Clone, Debug)]
pub struct SearchTicket {
    seq: u64,
    query: SearchQuery,
}

impl SearchTicket {
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Reacts to term/tag-selection changes by querying the service and
/// replacing the store's filtered collection with the answer.
///
/// Every change to the term or the tag selection issues a [`SearchTicket`]
/// for the new query. Responses apply in *issue* order, not arrival order:
/// [`SearchController::apply`] drops any response whose ticket is older than
/// the last one applied. Without that, two overlapping requests from a fast
/// typist could land out of order and leave stale results on display.
pub struct SearchController<S> {
    service: Arc<S>,

    /// Current free-text term.
    term: String,

    /// Currently selected tag filters (conjunctive).
    selected_tags: Vec<String>,

    /// Result cap passed along on each query, if any.
    limit: Option<u32>,

    /// Sequence number of the most recently issued ticket.
    issued: u64,

    /// Sequence number of the most recently applied response.
    applied: u64,
}

impl<S: CatalogService> SearchController<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            term: String::new(),
            selected_tags: Vec::new(),
            limit: None,
            issued: 0,
            applied: 0,
        }
    }

    /// Caps every query at `limit` results.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    /// A snapshot of the current term + tag selection.
    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            term: self.term.clone(),
            tags: self.selected_tags.clone(),
            limit: self.limit,
        }
    }

    /// Updates the term and issues a ticket for the changed query.
    ///
    /// Run the ticket with [`SearchController::run`] (or fetch the results
    /// yourself and hand them to [`SearchController::apply`]).
    pub fn set_term(&mut self, term: impl Into<String>) -> SearchTicket {
        self.term = term.into();
        self.issue()
    }

    /// Selects the tag if it isn't selected, deselects it if it is, and
    /// issues a ticket for the changed query.
    pub fn toggle_tag(&mut self, tag: &str) -> SearchTicket {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }

        self.issue()
    }

    /// Issues a ticket for the current query without changing anything.
    pub fn issue(&mut self) -> SearchTicket {
        self.issued += 1;

        tracing::debug!(
            "issuing search #{}: term `{}`, tags {:?}",
            self.issued,
            self.term,
            self.selected_tags
        );

        SearchTicket {
            seq: self.issued,
            query: self.query(),
        }
    }

    /// Hands a response to the store, unless it's stale.
    ///
    /// Returns whether the results were applied. A response is stale when a
    /// newer ticket has already been applied; stale results are discarded
    /// and the filtered collection keeps reflecting the newest query.
    pub fn apply(
        &mut self,
        store: &mut EntryStore<S>,
        ticket: &SearchTicket,
        results: Vec<Entry>,
    ) -> bool {
        if ticket.seq <= self.applied {
            tracing::warn!(
                "discarding stale search response #{} (already applied #{})",
                ticket.seq,
                self.applied
            );
            return false;
        }

        self.applied = ticket.seq;
        store.set_filtered(results);
        true
    }

    /// Runs a ticket to completion: awaits the service and applies the
    /// results.
    ///
    /// Returns whether the response was applied (it loses to any newer
    /// ticket applied while this one was in flight). A failed search sets
    /// the store's error slot and leaves the filtered collection untouched.
    pub async fn run(
        &mut self,
        store: &mut EntryStore<S>,
        ticket: SearchTicket,
    ) -> Result<bool, CatalogError> {
        match self.service.search(ticket.query()).await {
            Ok(results) => Ok(self.apply(store, &ticket, results)),
            Err(err) => {
                store.flag_error(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Re-runs the current query and applies the results.
    ///
    /// An empty term with no selected tags is still a real search call; the
    /// service answers it with the full collection.
    pub async fn refresh(&mut self, store: &mut EntryStore<S>) -> Result<bool, CatalogError> {
        let ticket = self.issue();
        self.run(store, ticket).await
    }
}
