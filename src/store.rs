//! The entry store: the authoritative local view of the catalog.

use std::sync::Arc;

use crate::{
    error::CatalogError,
    models::{Entry, EntryDraft, EntryId, TagUniverse},
    remote::CatalogService,
    validate::validate,
};

/// Owns the full entry collection, the filtered (display) collection, the
/// tag universe, and the current-error slot. Every mutation goes through the
/// remote catalog service; local state only changes once the service has
/// answered.
///
/// Single writer: nothing else mutates these collections directly. The
/// search controller writes the filtered collection, and only through
/// [`EntryStore::set_filtered`].
///
/// Concurrent mutations against the *same* id are undefined behavior: the
/// store doesn't serialize them, and whichever response lands last wins.
pub struct EntryStore<S> {
    service: Arc<S>,

    /// The complete, unfiltered collection as last fetched or mutated.
    entries: Vec<Entry>,

    /// The subset currently on display, produced by the search controller.
    filtered: Vec<Entry>,

    /// Every distinct tag across `entries` (modulo the incremental-update
    /// staleness described on the mutation ops).
    tags: TagUniverse,

    /// The single current-error slot. One human-readable message from the
    /// most recent failed operation.
    last_error: Option<String>,
}

impl<S: CatalogService> EntryStore<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            entries: Vec::new(),
            filtered: Vec::new(),
            tags: TagUniverse::default(),
            last_error: None,
        }
    }

    /// Fetches the full collection from the service.
    ///
    /// On success this replaces both collections and rebuilds the tag
    /// universe from scratch. On failure, prior state stays exactly as it
    /// was (stale but intact) and only the error slot changes.
    ///
    /// This is also the retry path: recovery from any earlier failure is a
    /// fresh, caller-triggered `load()`.
    pub async fn load(&mut self) -> Result<(), CatalogError> {
        let fetched = match self.service.list_entries().await {
            Ok(fetched) => fetched,
            Err(err) => {
                self.flag_error(err.to_string());
                return Err(err.into());
            }
        };

        tracing::debug!("loaded {} entries", fetched.len());

        self.tags = TagUniverse::from_entries(&fetched);
        self.filtered = fetched.clone();
        self.entries = fetched;
        self.last_error = None;

        Ok(())
    }

    /// Persists a new entry and appends it to the full collection.
    ///
    /// The draft is validated first; an invalid draft never reaches the
    /// service. The new entry's tags are unioned into the universe
    /// incrementally.
    pub async fn create(&mut self, draft: &EntryDraft) -> Result<Entry, CatalogError> {
        self.validate_draft(draft)?;

        let created = match self.service.create_entry(draft).await {
            Ok(created) => created,
            Err(err) => {
                self.flag_error(err.to_string());
                return Err(err.into());
            }
        };

        tracing::debug!("created entry `{}` (`{}`)", created.id, created.name);

        self.tags.absorb(&created.tags);
        self.entries.push(created.clone());
        self.last_error = None;

        Ok(created)
    }

    /// Full-field replace of the entry with the given id.
    ///
    /// On success the matching entry in the full collection is swapped for
    /// the service's answer. The filtered collection is left alone; it
    /// refreshes on the next search.
    ///
    /// Tag handling is incremental: the updated entry's tags are unioned in,
    /// but tags the edit dropped are NOT removed from the universe, even
    /// when no other entry still carries them. They linger until the next
    /// full scan (a `load()` or `delete()`).
    pub async fn update(&mut self, id: &EntryId, draft: &EntryDraft) -> Result<Entry, CatalogError> {
        self.validate_draft(draft)?;

        let updated = match self.service.update_entry(id, draft).await {
            Ok(updated) => updated,
            Err(err) => {
                self.flag_error(err.to_string());
                return Err(err.into());
            }
        };

        tracing::debug!("updated entry `{}`", updated.id);

        self.tags.absorb(&updated.tags);
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == updated.id) {
            *existing = updated.clone();
        }
        self.last_error = None;

        Ok(updated)
    }

    /// Deletes the entry with the given id.
    ///
    /// On success the entry disappears from both collections, and the tag
    /// universe is rebuilt from scratch over what's left. This is the path
    /// that sheds now-unused tags.
    pub async fn delete(&mut self, id: &EntryId) -> Result<(), CatalogError> {
        if let Err(err) = self.service.delete_entry(id).await {
            self.flag_error(err.to_string());
            return Err(err.into());
        }

        tracing::debug!("deleted entry `{id}`");

        self.entries.retain(|e| &e.id != id);
        self.filtered.retain(|e| &e.id != id);
        self.tags = TagUniverse::from_entries(&self.entries);
        self.last_error = None;

        Ok(())
    }

    /// The full, unfiltered collection.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The currently displayed subset.
    pub fn filtered(&self) -> &[Entry] {
        &self.filtered
    }

    /// The tag universe.
    pub fn tags(&self) -> &TagUniverse {
        &self.tags
    }

    /// The message from the most recent failed operation, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// A handle to the service this store talks to.
    pub fn service(&self) -> Arc<S> {
        Arc::clone(&self.service)
    }

    /// Replaces the filtered collection wholesale.
    ///
    /// This is the search controller's write path; results never merge with
    /// whatever was displayed before.
    pub fn set_filtered(&mut self, entries: Vec<Entry>) {
        self.filtered = entries;
    }

    pub(crate) fn flag_error(&mut self, message: String) {
        tracing::error!("catalog operation failed: {message}");
        self.last_error = Some(message);
    }

    fn validate_draft(&mut self, draft: &EntryDraft) -> Result<(), CatalogError> {
        if let Err(violations) = validate(draft) {
            self.flag_error(violations.to_string());
            return Err(CatalogError::Validation(violations));
        }

        Ok(())
    }
}
