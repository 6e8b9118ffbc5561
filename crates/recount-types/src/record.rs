//! The flat change record emitted by the diff engine.

use serde::{Deserialize, Serialize};

use crate::event::EventKind;

/// One field-level (or whole-entity) audit change.
///
/// Records are value objects: created, fully populated, and emitted. The
/// engine never mutates a record after appending it to a result list.
///
/// `old_value` and `new_value` always hold the *stringified* form of the
/// underlying value, never the typed value — the output of the engine is
/// narration, not a structural patch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Display name of the entity this record is attributed to.
    pub entity: String,
    /// Short human-readable label for the entity instance (may be empty).
    pub entity_descriptive: String,
    /// Display name of the entity on the other side of an association-style
    /// change, when there is one.
    pub related_entity: Option<String>,
    /// Identifying value of the attributed entity, for external correlation.
    /// Independent of the descriptive value.
    pub affected_id: Option<String>,
    /// What happened.
    pub event: EventKind,
    /// Field name, or `None` for a whole-entity marker record.
    pub field: Option<String>,
    /// Field display name, when a field is involved.
    pub field_display: Option<String>,
    /// Whether the field is the descriptive field of its owning type.
    pub descriptive: bool,
    /// Stringified old value, if any.
    pub old_value: Option<String>,
    /// Stringified new value, if any.
    pub new_value: Option<String>,
    /// Rendered narration. `None` only until rendering completes.
    pub message: Option<String>,
}

impl ChangeRecord {
    /// Create a record attributed to an entity, with no field or values yet.
    pub fn new(
        entity: impl Into<String>,
        entity_descriptive: impl Into<String>,
        event: EventKind,
    ) -> Self {
        Self {
            entity: entity.into(),
            entity_descriptive: entity_descriptive.into(),
            related_entity: None,
            affected_id: None,
            event,
            field: None,
            field_display: None,
            descriptive: false,
            old_value: None,
            new_value: None,
            message: None,
        }
    }

    /// Returns `true` for whole-entity marker records (no field attached).
    pub fn is_entity_marker(&self) -> bool {
        self.field.is_none()
    }
}
