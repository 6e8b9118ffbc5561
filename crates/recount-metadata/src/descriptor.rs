//! Per-type and per-field audit metadata.
//!
//! Descriptors are built once with the fluent constructors below and
//! registered into a [`MetadataRegistry`]. They are pure data: the diff
//! engine depends only on these descriptors, never on a live field list.
//!
//! [`MetadataRegistry`]: crate::MetadataRegistry

use recount_types::EventKind;

/// A parent/foreign-key relationship declared on a child type.
///
/// `property` names the property on the child instance holding the owning
/// parent; `mapped_by` names the inverse property on the parent that holds
/// this child (a collection or a single reference).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentLink {
    pub property: String,
    pub mapped_by: String,
}

/// A join relationship marking a type as a pure association (link) entity
/// between the entities reached via its `left` and `right` properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinLink {
    pub left: String,
    pub right: String,
}

/// Audit metadata for one registered type.
///
/// Field declaration order is emission order: the engine iterates
/// [`fields`](TypeDescriptor::fields) exactly as they were added.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    type_name: String,
    display_name: Option<String>,
    descriptive_properties: Vec<String>,
    descriptive_separator: String,
    id_property: Option<String>,
    only_annotated: bool,
    ignore: bool,
    parents: Vec<ParentLink>,
    join: Option<JoinLink>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Create a descriptor for `type_name`, tracking all declared fields by
    /// default.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            display_name: None,
            descriptive_properties: Vec::new(),
            descriptive_separator: " ".to_string(),
            id_property: None,
            only_annotated: false,
            ignore: false,
            parents: Vec::new(),
            join: None,
            fields: Vec::new(),
        }
    }

    /// Set the entity display name (defaults to the type name).
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Append a property to the descriptive-value expression.
    pub fn descriptive_property(mut self, property: impl Into<String>) -> Self {
        self.descriptive_properties.push(property.into());
        self
    }

    /// Separator used when the descriptive-value expression names several
    /// properties (defaults to a single space).
    pub fn descriptive_separator(mut self, separator: impl Into<String>) -> Self {
        self.descriptive_separator = separator.into();
        self
    }

    /// Name the identifying property explicitly. Without this, an `id`
    /// property is probed by convention.
    pub fn id_property(mut self, property: impl Into<String>) -> Self {
        self.id_property = Some(property.into());
        self
    }

    /// Track only explicitly audited fields.
    pub fn only_annotated(mut self) -> Self {
        self.only_annotated = true;
        self
    }

    /// Skip this type entirely during comparison.
    pub fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Declare a parent relationship. Repeatable.
    pub fn parent(mut self, property: impl Into<String>, mapped_by: impl Into<String>) -> Self {
        self.parents.push(ParentLink {
            property: property.into(),
            mapped_by: mapped_by.into(),
        });
        self
    }

    /// Declare this type as a pure association entity between the entities
    /// reached via `left` and `right`.
    pub fn join(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.join = Some(JoinLink {
            left: left.into(),
            right: right.into(),
        });
        self
    }

    /// Declare a field. Declaration order is emission order.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The entity display name, falling back to the type name.
    pub fn effective_display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.type_name)
    }

    pub fn descriptive_properties(&self) -> &[String] {
        &self.descriptive_properties
    }

    pub fn separator(&self) -> &str {
        &self.descriptive_separator
    }

    pub fn id_property_name(&self) -> Option<&str> {
        self.id_property.as_deref()
    }

    pub fn is_only_annotated(&self) -> bool {
        self.only_annotated
    }

    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    pub fn parents(&self) -> &[ParentLink] {
        &self.parents
    }

    pub fn join_link(&self) -> Option<&JoinLink> {
        self.join.as_ref()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a declared field by name.
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Whether `field` participates in the type's descriptive-value
    /// expression.
    pub fn is_descriptive_field(&self, field: &str) -> bool {
        self.descriptive_properties.iter().any(|p| p == field)
    }

    /// Whether `field` is tracked, combining the type-level default with
    /// the field's own flags.
    pub fn is_tracked(&self, field: &FieldDescriptor) -> bool {
        !field.is_ignored() && (!self.only_annotated || field.is_audited())
    }
}

/// Audit metadata for one declared field.
///
/// Any field-level customization (display name, traversal, descriptive
/// property, event overrides) marks the field as explicitly audited, which
/// is what an `only_annotated` type tracks.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    name: String,
    display_name: Option<String>,
    audited: bool,
    ignored: bool,
    traverse: bool,
    descriptive_property: Option<String>,
    add_event: EventKind,
    remove_event: EventKind,
}

impl FieldDescriptor {
    /// Declare a plain field with default behavior.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            audited: false,
            ignored: false,
            traverse: false,
            descriptive_property: None,
            add_event: EventKind::Add,
            remove_event: EventKind::Remove,
        }
    }

    /// Mark the field as explicitly audited with no further customization.
    pub fn audited(mut self) -> Self {
        self.audited = true;
        self
    }

    /// Exclude the field from tracking.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Set the field display name (defaults to the field name).
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self.audited = true;
        self
    }

    /// Recurse into the field's value instead of stringifying it.
    pub fn traverse(mut self) -> Self {
        self.traverse = true;
        self.audited = true;
        self
    }

    /// Property used to label nested objects or collection elements read
    /// through this field.
    pub fn descriptive_property(mut self, property: impl Into<String>) -> Self {
        self.descriptive_property = Some(property.into());
        self.audited = true;
        self
    }

    /// Event kind to report for additions through this field.
    pub fn add_event(mut self, event: EventKind) -> Self {
        self.add_event = event;
        self.audited = true;
        self
    }

    /// Event kind to report for removals through this field.
    pub fn remove_event(mut self, event: EventKind) -> Self {
        self.remove_event = event;
        self.audited = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field display name, falling back to the field name.
    pub fn effective_display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_audited(&self) -> bool {
        self.audited
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn is_traversable(&self) -> bool {
        self.traverse
    }

    pub fn descriptive_property_name(&self) -> Option<&str> {
        self.descriptive_property.as_deref()
    }

    /// Map a top-level event through this field's add/remove overrides.
    /// `Change` always passes through unchanged.
    pub fn event_for(&self, event: EventKind) -> EventKind {
        match event {
            EventKind::Add => self.add_event,
            EventKind::Remove => self.remove_event,
            other => other,
        }
    }
}
