//! Draft validation, consolidated in one place.
//!
//! The store runs this before every create/update, so an invalid draft never
//! reaches the catalog service.

use core::fmt;

use crate::models::EntryDraft;

/// A single validation rule an [`EntryDraft`] can break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// `name` is empty (or whitespace only).
    EmptyName,
    /// `text` is empty (or whitespace only).
    EmptyText,
    /// The draft carries no tags. Every persisted entry needs at least one.
    NoTags,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyName => write!(f, "name is required"),
            Violation::EmptyText => write!(f, "text is required"),
            Violation::NoTags => write!(f, "at least one tag is required"),
        }
    }
}

/// Every rule a draft broke, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn contains(&self, violation: Violation) -> bool {
        self.0.contains(&violation)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
            first = false;
        }
        Ok(())
    }
}

/// Checks a draft against every rule, reporting all violations at once
/// rather than bailing on the first.
pub fn validate(draft: &EntryDraft) -> Result<(), Violations> {
    let mut violations = Vec::new();

    if draft.name.trim().is_empty() {
        violations.push(Violation::EmptyName);
    }

    if draft.text.trim().is_empty() {
        violations.push(Violation::EmptyText);
    }

    if draft.tags().is_empty() {
        violations.push(Violation::NoTags);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Violations(violations))
    }
}
