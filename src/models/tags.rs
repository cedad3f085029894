//! The tag universe: every distinct tag across the full collection.

use super::entry::Entry;

/// A derived, order-stable view of all known tags.
///
/// This is not independently persisted anywhere. It's rebuilt from the full
/// entry collection on load and delete, and grown incrementally on create
/// and update. Order is first-seen, so a fixed input always produces the
/// same sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagUniverse {
    tags: Vec<String>,
}

impl TagUniverse {
    /// Full scan: the union of `tags` over every given entry, first-seen
    /// order.
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut universe = Self::default();

        for entry in entries {
            universe.absorb(&entry.tags);
        }

        universe
    }

    /// Incremental union: appends any tags we haven't seen before.
    ///
    /// This never removes anything. A tag that no entry references anymore
    /// stays around until the next full scan.
    pub fn absorb(&mut self, tags: &[String]) {
        for tag in tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
