//! Audit event kinds.

use serde::{Deserialize, Serialize};

/// The kind of change a [`ChangeRecord`] describes.
///
/// Exactly one of `Add`, `Remove`, or `Change` is selected per top-level
/// comparison, from the nullability of the two instances: no old instance
/// means `Add`, no new instance means `Remove`, both present means `Change`.
///
/// `Associate` and `Disassociate` never appear as top-level events. They
/// arise from field- or relationship-level overrides applied while the
/// top-level event is `Add`/`Remove`, or while reconciling collection
/// membership during a `Change`.
///
/// The enum is `#[non_exhaustive]`: consumers that map event kinds to text
/// (the renderer's template table) must keep a fallback arm rather than
/// assuming the set is final.
///
/// [`ChangeRecord`]: crate::ChangeRecord
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A new entity or field value appeared.
    Add,
    /// An entity or field value was removed.
    Remove,
    /// A field value changed between two present instances.
    Change,
    /// An entity was linked to another entity (ownership or many-to-many edge).
    Associate,
    /// An entity was unlinked from another entity.
    Disassociate,
}

impl EventKind {
    /// Returns `true` for the kinds that only describe relationship edges.
    pub fn is_association(self) -> bool {
        matches!(self, EventKind::Associate | EventKind::Disassociate)
    }

    /// Returns `true` for the kinds valid as an addition-side event.
    pub fn is_additive(self) -> bool {
        matches!(self, EventKind::Add | EventKind::Associate)
    }

    /// Returns `true` for the kinds valid as a removal-side event.
    pub fn is_subtractive(self) -> bool {
        matches!(self, EventKind::Remove | EventKind::Disassociate)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventKind::Add => "add",
            EventKind::Remove => "remove",
            EventKind::Change => "change",
            EventKind::Associate => "associate",
            EventKind::Disassociate => "disassociate",
        };
        f.write_str(s)
    }
}
