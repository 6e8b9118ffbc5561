//! The rendering strategy and its default implementation.

use recount_types::{ChangeRecord, EventKind};

use crate::template::substitute;

/// Named values a template can draw on. All optional: templates tolerate
/// absent values by rendering them as empty strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderContext<'a> {
    /// Display name of the attributed entity.
    pub entity: Option<&'a str>,
    /// Descriptive value of the attributed entity.
    pub descriptive: Option<&'a str>,
    /// Display name of the related entity, for association-style changes.
    pub related: Option<&'a str>,
    /// Field display name.
    pub field: Option<&'a str>,
    /// Stringified old value.
    pub old_value: Option<&'a str>,
    /// Stringified new value.
    pub new_value: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    /// Build a context from an already-populated change record.
    pub fn from_record(record: &'a ChangeRecord) -> Self {
        Self {
            entity: Some(record.entity.as_str()),
            descriptive: Some(record.entity_descriptive.as_str()),
            related: record.related_entity.as_deref(),
            field: record.field_display.as_deref(),
            old_value: record.old_value.as_deref(),
            new_value: record.new_value.as_deref(),
        }
    }

    fn value(&self, name: &str) -> Option<String> {
        let v = match name {
            "entity" => self.entity,
            "descriptive" => self.descriptive,
            "related" => self.related,
            "field" => self.field,
            "old" => self.old_value,
            "new" => self.new_value,
            _ => None,
        };
        v.map(str::to_string)
    }
}

/// Strategy that turns a change record into a sentence.
///
/// Injected into the diff engine as a replaceable collaborator; supply a
/// custom implementation to change wording without touching diff logic.
/// Rendering never fails.
pub trait MessageRenderer: Send + Sync {
    /// Render the narration for one change record.
    fn render(&self, event: EventKind, context: &RenderContext<'_>) -> String;

    /// Narration for a whole entity coming into existence.
    fn created(&self, display_name: &str) -> String;

    /// Narration for a whole entity being deleted.
    fn deleted(&self, display_name: &str) -> String;

    /// One-sentence summary of a change comparison.
    fn changed_summary(&self, display_name: &str) -> String;
}

const ADD_TEMPLATE: &str = "{new} was added to {field:lower} of {entity:lower} {descriptive}";
const REMOVE_TEMPLATE: &str =
    "{old} was removed from {field:lower} of {entity:lower} {descriptive}";
const CHANGE_TEMPLATE: &str =
    "{entity:cap} {descriptive} {field:lower} changed from {old} to {new}";
const ASSOCIATE_TEMPLATE: &str =
    "{related:cap} {new} has been associated with {entity:lower} {descriptive}";
const DISASSOCIATE_TEMPLATE: &str =
    "{related:cap} {old} has been disassociated from {entity:lower} {descriptive}";
const UNKNOWN_TEMPLATE: &str = "Unknown change type";

/// The built-in English renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderer;

impl DefaultRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MessageRenderer for DefaultRenderer {
    fn render(&self, event: EventKind, context: &RenderContext<'_>) -> String {
        let template = match event {
            EventKind::Add => ADD_TEMPLATE,
            EventKind::Remove => REMOVE_TEMPLATE,
            EventKind::Change => CHANGE_TEMPLATE,
            EventKind::Associate => ASSOCIATE_TEMPLATE,
            EventKind::Disassociate => DISASSOCIATE_TEMPLATE,
            // EventKind is non_exhaustive: an event this renderer does not
            // recognize still renders, never fails.
            _ => UNKNOWN_TEMPLATE,
        };
        substitute(template, |name| context.value(name))
    }

    fn created(&self, display_name: &str) -> String {
        substitute("New {name}", |name| {
            (name == "name").then(|| display_name.to_string())
        })
    }

    fn deleted(&self, display_name: &str) -> String {
        substitute("Deleted {name}", |name| {
            (name == "name").then(|| display_name.to_string())
        })
    }

    fn changed_summary(&self, display_name: &str) -> String {
        substitute("{name:cap} has changed", |name| {
            (name == "name").then(|| display_name.to_string())
        })
    }
}
