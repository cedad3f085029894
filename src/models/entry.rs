//! The unit of content: a named, tagged blob of text.

/// An entry's identifier.
///
/// Opaque to us. The catalog service assigns it on creation; an empty string
/// means the entry hasn't been persisted remotely yet.
pub type EntryId = String;

/// A persisted catalog entry, exactly as it travels on the wire.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Entry {
    /// Some catalog backends hand out numeric ids. We treat all ids as
    /// opaque strings, so accept either on the way in.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: EntryId,

    /// Display label. Non-empty for anything that made it past validation.
    pub name: String,

    /// Free-form content body.
    pub text: String,

    /// Insertion-order-preserving tag set. Every persisted entry has at
    /// least one.
    pub tags: Vec<String>,
}

impl Entry {
    /// Makes a draft carrying this entry's current fields, for edit flows.
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft::new(self.name.clone(), self.text.clone(), self.tags.clone())
    }
}

/// An entry that hasn't been persisted yet (no id). Used for both create and
/// full-replace update calls.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EntryDraft {
    pub name: String,
    pub text: String,

    // kept private so the "no duplicate tags" rule can't be sidestepped
    tags: Vec<String>,
}

impl EntryDraft {
    /// Builds a draft, deduplicating tags while keeping first-seen order.
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut draft = Self {
            name: name.into(),
            text: text.into(),
            tags: Vec::new(),
        };

        for tag in tags {
            draft.push_tag(tag);
        }

        draft
    }

    /// Adds a tag to the end of the set. Duplicates are silently dropped.
    pub fn push_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Removes a tag, if present.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Accepts `"7"` and `7` alike, normalizing to the string form.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<EntryId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
