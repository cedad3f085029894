//! Types that are really the bedrock of the crate.

pub mod entry;
pub mod tags;

pub use entry::{Entry, EntryDraft, EntryId};
pub use tags::TagUniverse;
