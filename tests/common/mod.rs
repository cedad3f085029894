//! The parent of the other tests.
//!
//! Holds shared setup plus an in-memory catalog service to run the store and
//! search controller against.

use std::sync::Mutex;

use async_trait::async_trait;

use satchel::{
    error::RemoteError,
    models::{Entry, EntryDraft, EntryId},
    remote::{CatalogService, SearchQuery},
};

/// call this at the top of any new test func! :)
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn setup() {
    // multiple tests share one process, so a second init is fine to ignore
    _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// An in-memory stand-in for the remote catalog service.
///
/// Matching mirrors the real backend: case-insensitive substring search over
/// name and text, conjunctive tag filtering, and an unfiltered query answers
/// with the full collection. `set_failing(true)` makes every call come back
/// rejected, for error-path tests.
pub struct MockCatalog {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: Vec<Entry>,
    next_id: u64,
    failing: bool,
    create_calls: u64,
    search_calls: u64,
}

impl MockCatalog {
    #[allow(dead_code, reason = "it's used in the other tests")]
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Builds a catalog already holding the given drafts, ids assigned in
    /// order starting at 1.
    #[allow(dead_code, reason = "it's used in the other tests")]
    pub fn seeded(drafts: Vec<EntryDraft>) -> Self {
        let entries = drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| Entry {
                id: (i as u64 + 1).to_string(),
                name: draft.name.clone(),
                text: draft.text.clone(),
                tags: draft.tags().to_vec(),
            })
            .collect::<Vec<_>>();

        let next_id = entries.len() as u64 + 1;

        Self {
            inner: Mutex::new(Inner {
                entries,
                next_id,
                failing: false,
                create_calls: 0,
                search_calls: 0,
            }),
        }
    }

    /// When `true`, every service call is rejected.
    #[allow(dead_code, reason = "it's used in the other tests")]
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().unwrap().failing = failing;
    }

    /// How many create calls actually reached the service.
    #[allow(dead_code, reason = "it's used in the other tests")]
    pub fn create_calls(&self) -> u64 {
        self.inner.lock().unwrap().create_calls
    }

    #[allow(dead_code, reason = "it's used in the other tests")]
    pub fn search_calls(&self) -> u64 {
        self.inner.lock().unwrap().search_calls
    }

    fn injected_failure() -> RemoteError {
        RemoteError::Rejected {
            status: 500,
            message: "injected failure".into(),
        }
    }
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn list_entries(&self) -> Result<Vec<Entry>, RemoteError> {
        let inner = self.inner.lock().unwrap();
        if inner.failing {
            return Err(Self::injected_failure());
        }

        Ok(inner.entries.clone())
    }

    async fn create_entry(&self, draft: &EntryDraft) -> Result<Entry, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.create_calls += 1;

        if inner.failing {
            return Err(Self::injected_failure());
        }

        // the real backend 400s on incomplete drafts too
        if draft.name.is_empty() || draft.text.is_empty() || draft.tags().is_empty() {
            return Err(RemoteError::Rejected {
                status: 400,
                message: "Name, text, and at least one tag are required".into(),
            });
        }

        let entry = Entry {
            id: inner.next_id.to_string(),
            name: draft.name.clone(),
            text: draft.text.clone(),
            tags: draft.tags().to_vec(),
        };
        inner.next_id += 1;
        inner.entries.push(entry.clone());

        Ok(entry)
    }

    async fn update_entry(&self, id: &EntryId, draft: &EntryDraft) -> Result<Entry, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing {
            return Err(Self::injected_failure());
        }

        let Some(existing) = inner.entries.iter_mut().find(|e| &e.id == id) else {
            return Err(RemoteError::Rejected {
                status: 404,
                message: format!("no entry with id {id}"),
            });
        };

        existing.name = draft.name.clone();
        existing.text = draft.text.clone();
        existing.tags = draft.tags().to_vec();

        Ok(existing.clone())
    }

    async fn delete_entry(&self, id: &EntryId) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing {
            return Err(Self::injected_failure());
        }

        // idempotent, like the real backend
        inner.entries.retain(|e| &e.id != id);
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.search_calls += 1;

        if inner.failing {
            return Err(Self::injected_failure());
        }

        // unfiltered search answers with the full collection
        if query.is_unfiltered() {
            return Ok(inner.entries.clone());
        }

        let term = query.term.to_lowercase();
        let mut hits = inner
            .entries
            .iter()
            .filter(|e| {
                let text_hit = term.is_empty()
                    || e.name.to_lowercase().contains(&term)
                    || e.text.to_lowercase().contains(&term);

                let tags_hit = query.tags.iter().all(|t| e.tags.contains(t));

                text_hit && tags_hit
            })
            .cloned()
            .collect::<Vec<_>>();

        if let Some(limit) = query.limit {
            hits.truncate(limit as usize);
        }

        Ok(hits)
    }

    async fn list_tags(&self) -> Result<Vec<String>, RemoteError> {
        let inner = self.inner.lock().unwrap();
        if inner.failing {
            return Err(Self::injected_failure());
        }

        let mut tags = inner
            .entries
            .iter()
            .flat_map(|e| e.tags.iter().cloned())
            .collect::<Vec<_>>();
        tags.sort();
        tags.dedup();

        Ok(tags)
    }
}
