//! The comparison algorithm.
//!
//! [`AuditEngine::compare`] resolves the reference instance's metadata,
//! picks the top-level event from nullability, and emits records in a
//! fixed order: join edge records, parent relationship records, the
//! whole-entity marker, then per-field records in declaration order with
//! traversal results spliced in at the originating field's position.

use std::sync::Arc;

use tracing::warn;

use recount_metadata::access;
use recount_metadata::{
    AuditHandle, Auditable, FieldDescriptor, JoinLink, MetadataError, MetadataRegistry, ParentLink,
    Property, TypeDescriptor,
};
use recount_narrate::{capitalize, uncapitalize, DefaultRenderer, MessageRenderer, RenderContext};
use recount_types::{ChangeRecord, EventKind};

use crate::error::{EngineError, EngineResult};
use crate::reconcile;

/// The metadata-driven diff engine.
///
/// Holds the shared read-only registry and a replaceable renderer. One
/// `compare` call touches only the two instances passed to it, so an
/// engine may be shared freely across threads.
pub struct AuditEngine {
    registry: Arc<MetadataRegistry>,
    renderer: Box<dyn MessageRenderer>,
}

impl AuditEngine {
    /// Create an engine with the built-in renderer.
    pub fn new(registry: Arc<MetadataRegistry>) -> Self {
        Self::with_renderer(registry, Box::new(DefaultRenderer::new()))
    }

    /// Create an engine with a custom rendering strategy.
    pub fn with_renderer(
        registry: Arc<MetadataRegistry>,
        renderer: Box<dyn MessageRenderer>,
    ) -> Self {
        Self { registry, renderer }
    }

    /// The registry this engine resolves metadata from.
    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// Compare two instances of the same declared type.
    ///
    /// Exactly one of `old`/`new` may be absent: no old instance means the
    /// entity is new, no new instance means it was deleted. Both absent is
    /// an error. Unregistered and ignore-flagged types yield an empty list
    /// with a diagnostic.
    pub fn compare(
        &self,
        old: Option<&dyn Auditable>,
        new: Option<&dyn Auditable>,
    ) -> EngineResult<Vec<ChangeRecord>> {
        let reference = old.or(new).ok_or(EngineError::MissingInstances)?;

        let Some(descriptor) = self.registry.descriptor(reference.type_name()) else {
            warn!(
                type_name = reference.type_name(),
                "type has no registered audit metadata; nothing to compare"
            );
            return Ok(Vec::new());
        };
        if descriptor.is_ignored() {
            warn!(
                type_name = reference.type_name(),
                "type is marked ignore; nothing to compare"
            );
            return Ok(Vec::new());
        }

        let event = match (old.is_some(), new.is_some()) {
            (false, true) => EventKind::Add,
            (true, false) => EventKind::Remove,
            _ => EventKind::Change,
        };

        let mut records = Vec::new();

        // A join type is a pure link entity: two edge records, no fields.
        if let Some(join) = descriptor.join_link() {
            self.join_records(descriptor, reference, join, event, &mut records)?;
            return Ok(records);
        }

        for link in descriptor.parents() {
            self.parent_records(link, event, old, new, &mut records)?;
        }

        match event {
            EventKind::Add | EventKind::Remove => {
                self.entity_marker(descriptor, reference, event, &mut records)?;
            }
            _ => {}
        }

        for field in descriptor.fields() {
            if !descriptor.is_tracked(field) {
                continue;
            }
            if field.is_traversable() {
                self.traverse_field(descriptor, field, old, new, &mut records)?;
            } else {
                self.scalar_field(descriptor, field, old, new, event, reference, &mut records)?;
            }
        }

        Ok(records)
    }

    /// Compare and reduce to a single summary sentence.
    pub fn compare_and_narrate(
        &self,
        old: Option<&dyn Auditable>,
        new: Option<&dyn Auditable>,
    ) -> EngineResult<String> {
        match (old, new) {
            (None, None) => Err(EngineError::MissingInstances),
            (None, Some(new)) => Ok(self.new_entity_narration(new)),
            (Some(old), None) => Ok(self.deleted_entity_narration(old)),
            (Some(_), Some(new)) => {
                let label = access::entity_label(new, &self.registry, true);
                Ok(self.renderer.changed_summary(&label))
            }
        }
    }

    /// Narrate an entity coming into existence.
    pub fn new_entity_narration(&self, instance: &dyn Auditable) -> String {
        self.renderer
            .created(&access::entity_label(instance, &self.registry, true))
    }

    /// Narrate an entity being deleted.
    pub fn deleted_entity_narration(&self, instance: &dyn Auditable) -> String {
        self.renderer
            .deleted(&access::entity_label(instance, &self.registry, true))
    }

    /// The entity display name, optionally with its descriptive value,
    /// with the first letter forced upper- or lower-case.
    pub fn entity_display_name(
        &self,
        instance: &dyn Auditable,
        include_descriptive: bool,
        capitalized: bool,
    ) -> String {
        let label = access::entity_label(instance, &self.registry, include_descriptive);
        if capitalized {
            capitalize(&label)
        } else {
            uncapitalize(&label)
        }
    }

    // ---------------------------------------------------------------
    // Record synthesis
    // ---------------------------------------------------------------

    /// A record attributed to `entity`, with its descriptive value and
    /// identifying value resolved.
    fn attributed_record(
        &self,
        entity_display: &str,
        entity: &dyn Auditable,
        event: EventKind,
    ) -> EngineResult<ChangeRecord> {
        let mut record = ChangeRecord::new(
            entity_display,
            access::descriptive_value(entity, &self.registry)?,
            event,
        );
        record.affected_id = access::affected_id(entity, &self.registry)?;
        Ok(record)
    }

    /// Render the record's message and append it. Records are never
    /// touched again once pushed.
    pub(crate) fn push_rendered(&self, mut record: ChangeRecord, records: &mut Vec<ChangeRecord>) {
        let message = self
            .renderer
            .render(record.event, &RenderContext::from_record(&record));
        record.message = Some(message);
        records.push(record);
    }

    fn entity_marker(
        &self,
        descriptor: &TypeDescriptor,
        reference: &dyn Auditable,
        event: EventKind,
        records: &mut Vec<ChangeRecord>,
    ) -> EngineResult<()> {
        let mut record =
            self.attributed_record(descriptor.effective_display_name(), reference, event)?;
        let label = access::entity_label(reference, &self.registry, true);
        record.message = Some(match event {
            EventKind::Remove => self.renderer.deleted(&label),
            _ => self.renderer.created(&label),
        });
        records.push(record);
        Ok(())
    }

    fn scalar_field(
        &self,
        descriptor: &TypeDescriptor,
        field: &FieldDescriptor,
        old: Option<&dyn Auditable>,
        new: Option<&dyn Auditable>,
        event: EventKind,
        reference: &dyn Auditable,
        records: &mut Vec<ChangeRecord>,
    ) -> EngineResult<()> {
        let old_value = match old {
            Some(instance) => access::field_value(instance, field, &self.registry)?,
            None => None,
        };
        let new_value = match new {
            Some(instance) => access::field_value(instance, field, &self.registry)?,
            None => None,
        };

        // Add emits only a present new value, Remove only a present old
        // value; Change only when the stringified values differ.
        match event {
            EventKind::Add if new_value.is_none() => return Ok(()),
            EventKind::Remove if old_value.is_none() => return Ok(()),
            EventKind::Change if old_value == new_value => return Ok(()),
            _ => {}
        }

        let mut record = self.attributed_record(
            descriptor.effective_display_name(),
            reference,
            field.event_for(event),
        )?;
        record.field = Some(field.name().to_string());
        record.field_display = Some(field.effective_display_name().to_string());
        record.descriptive = descriptor.is_descriptive_field(field.name());
        match event {
            EventKind::Add => record.new_value = new_value,
            EventKind::Remove => record.old_value = old_value,
            _ => {
                record.old_value = old_value;
                record.new_value = new_value;
            }
        }
        self.push_rendered(record, records);
        Ok(())
    }

    fn traverse_field(
        &self,
        descriptor: &TypeDescriptor,
        field: &FieldDescriptor,
        old: Option<&dyn Auditable>,
        new: Option<&dyn Auditable>,
        records: &mut Vec<ChangeRecord>,
    ) -> EngineResult<()> {
        let old_prop = match old {
            Some(instance) => Some(access::read_property(instance, field.name())?),
            None => None,
        };
        let new_prop = match new {
            Some(instance) => Some(access::read_property(instance, field.name())?),
            None => None,
        };

        let collection_side = matches!(old_prop, Some(Property::Collection(_)))
            || matches!(new_prop, Some(Property::Collection(_)));

        if collection_side {
            let old_items = collection_items(field, old, old_prop)?;
            let new_items = collection_items(field, new, new_prop)?;
            // The new instance is preferred for attributing membership
            // records; compare() guarantees one side is present.
            let owner = new.or(old).ok_or(EngineError::MissingInstances)?;
            match (old_items, new_items) {
                (Some(old_items), Some(new_items)) => {
                    reconcile::collections(
                        self, descriptor, field, owner, &old_items, &new_items, records,
                    )?;
                }
                // One whole side is absent: cascade into full per-element
                // removals or additions.
                (Some(old_items), None) => {
                    for element in &old_items {
                        records.extend(self.compare(Some(element.as_ref()), None)?);
                    }
                }
                (None, Some(new_items)) => {
                    for element in &new_items {
                        records.extend(self.compare(None, Some(element.as_ref()))?);
                    }
                }
                (None, None) => {}
            }
        } else {
            let old_nested = nested_entity(field, old, old_prop)?;
            let new_nested = nested_entity(field, new, new_prop)?;
            if old_nested.is_some() || new_nested.is_some() {
                records.extend(self.compare(old_nested.as_deref(), new_nested.as_deref())?);
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Relationships
    // ---------------------------------------------------------------

    /// Two inverse edge records for a pure link entity.
    fn join_records(
        &self,
        descriptor: &TypeDescriptor,
        reference: &dyn Auditable,
        join: &JoinLink,
        event: EventKind,
        records: &mut Vec<ChangeRecord>,
    ) -> EngineResult<()> {
        // A link either appears or disappears; a Change on the link entity
        // itself narrates nothing.
        let additive = match event {
            EventKind::Add => true,
            EventKind::Remove => false,
            _ => return Ok(()),
        };

        let left = match access::read_property(reference, &join.left)? {
            Property::Entity(entity) => entity,
            Property::Null => {
                warn!(
                    type_name = reference.type_name(),
                    property = join.left.as_str(),
                    "join side is absent; no edge records"
                );
                return Ok(());
            }
            other => {
                return Err(unreadable_relationship(reference, &join.left, &other).into());
            }
        };
        let right = match access::read_property(reference, &join.right)? {
            Property::Entity(entity) => entity,
            Property::Null => {
                warn!(
                    type_name = reference.type_name(),
                    property = join.right.as_str(),
                    "join side is absent; no edge records"
                );
                return Ok(());
            }
            other => {
                return Err(unreadable_relationship(reference, &join.right, &other).into());
            }
        };

        let (left, right) = (left.as_ref(), right.as_ref());
        self.edge_record(descriptor, left, right, &join.right, additive, records)?;
        self.edge_record(descriptor, right, left, &join.left, additive, records)?;
        Ok(())
    }

    /// One direction of a link edge: attributed to `to`, naming `other` as
    /// the related entity, valued with `other`'s descriptive value.
    fn edge_record(
        &self,
        descriptor: &TypeDescriptor,
        to: &dyn Auditable,
        other: &dyn Auditable,
        other_property: &str,
        additive: bool,
        records: &mut Vec<ChangeRecord>,
    ) -> EngineResult<()> {
        let event = if additive {
            EventKind::Associate
        } else {
            EventKind::Disassociate
        };
        let mut record =
            self.attributed_record(access::display_name(to, &self.registry), to, event)?;
        record.related_entity = Some(access::display_name(other, &self.registry).to_string());
        record.field = Some(other_property.to_string());
        record.field_display = Some(
            descriptor
                .field_named(other_property)
                .map(|f| f.effective_display_name())
                .unwrap_or(other_property)
                .to_string(),
        );
        let value = access::descriptive_value(other, &self.registry)?;
        if additive {
            record.new_value = Some(value);
        } else {
            record.old_value = Some(value);
        }
        self.push_rendered(record, records);
        Ok(())
    }

    fn parent_records(
        &self,
        link: &ParentLink,
        event: EventKind,
        old: Option<&dyn Auditable>,
        new: Option<&dyn Auditable>,
        records: &mut Vec<ChangeRecord>,
    ) -> EngineResult<()> {
        match event {
            EventKind::Add => {
                if let Some(child) = new {
                    self.parent_attach_record(child, link, true, records)?;
                }
            }
            EventKind::Remove => {
                if let Some(child) = old {
                    self.parent_attach_record(child, link, false, records)?;
                }
            }
            _ => {
                if let Some(old_child) = old {
                    self.parent_change_record(old_child, link, records)?;
                }
            }
        }
        Ok(())
    }

    /// Record on the parent describing the association (or disassociation)
    /// of `child`, using the parent's mapped-by field for naming and event
    /// overrides.
    fn parent_attach_record(
        &self,
        child: &dyn Auditable,
        link: &ParentLink,
        additive: bool,
        records: &mut Vec<ChangeRecord>,
    ) -> EngineResult<()> {
        let parent = match access::read_property(child, &link.property)? {
            Property::Entity(parent) => parent,
            Property::Null => return Ok(()),
            other => {
                return Err(unreadable_relationship(child, &link.property, &other).into());
            }
        };
        // The mapped-by property must exist on the parent, even though
        // this direction does not read its value.
        if parent.property(&link.mapped_by).is_none() {
            return Err(
                MetadataError::configuration(parent.type_name(), link.mapped_by.clone()).into(),
            );
        }

        let mapped_field = self.registry.field(parent.type_name(), &link.mapped_by);
        let event = match mapped_field {
            Some(field) => field.event_for(if additive {
                EventKind::Add
            } else {
                EventKind::Remove
            }),
            None if additive => EventKind::Add,
            None => EventKind::Remove,
        };

        let mut record = self.attributed_record(
            access::display_name(parent.as_ref(), &self.registry),
            parent.as_ref(),
            event,
        )?;
        record.related_entity =
            Some(access::display_name(child, &self.registry).to_string());
        record.field = Some(link.mapped_by.clone());
        record.field_display = Some(
            mapped_field
                .map(|f| f.effective_display_name())
                .unwrap_or(link.mapped_by.as_str())
                .to_string(),
        );
        let value = access::descriptive_value(child, &self.registry)?;
        if additive {
            record.new_value = Some(value);
        } else {
            record.old_value = Some(value);
        }
        self.push_rendered(record, records);
        Ok(())
    }

    /// For a Change comparison, emit a disassociation-style parent record
    /// only when the relationship was actually severed: the *old* parent's
    /// mapped-by value no longer contains/equals the old instance. Only
    /// the old parent's state is inspected.
    fn parent_change_record(
        &self,
        old_child: &dyn Auditable,
        link: &ParentLink,
        records: &mut Vec<ChangeRecord>,
    ) -> EngineResult<()> {
        let parent = match access::read_property(old_child, &link.property)? {
            Property::Entity(parent) => parent,
            Property::Null => return Ok(()),
            other => {
                return Err(unreadable_relationship(old_child, &link.property, &other).into());
            }
        };

        // A child with no identity cannot be looked for in the parent;
        // suppress rather than report a spurious disassociation.
        let Some(child_key) = access::identity_key(old_child, &self.registry)? else {
            return Ok(());
        };

        let mapped = parent.property(&link.mapped_by).ok_or_else(|| {
            MetadataError::configuration(parent.type_name(), link.mapped_by.clone())
        })?;

        let contained = match mapped {
            Property::Collection(items) => {
                let mut found = false;
                for item in &items {
                    if access::identity_key(item.as_ref(), &self.registry)?.as_deref()
                        == Some(child_key.as_str())
                    {
                        found = true;
                        break;
                    }
                }
                found
            }
            Property::Entity(entity) => {
                access::identity_key(entity.as_ref(), &self.registry)?.as_deref()
                    == Some(child_key.as_str())
            }
            Property::Scalar(value) => value == child_key,
            Property::Null => false,
        };

        if !contained {
            self.parent_attach_record(old_child, link, false, records)?;
        }
        Ok(())
    }
}

/// Materialize a traversable field's collection side. `None` means the
/// whole side is absent (instance absent or property null).
fn collection_items(
    field: &FieldDescriptor,
    instance: Option<&dyn Auditable>,
    prop: Option<Property>,
) -> EngineResult<Option<Vec<AuditHandle>>> {
    match prop {
        Some(Property::Collection(items)) => Ok(Some(items)),
        Some(Property::Null) | None => Ok(None),
        Some(other) => Err(MetadataError::unreadable(
            instance.map(Auditable::type_name).unwrap_or("<absent>"),
            field.name(),
            format!(
                "traversable collection field held a {} value on one side",
                other.kind()
            ),
        )
        .into()),
    }
}

/// Materialize a traversable field's single-entity side.
fn nested_entity(
    field: &FieldDescriptor,
    instance: Option<&dyn Auditable>,
    prop: Option<Property>,
) -> EngineResult<Option<AuditHandle>> {
    match prop {
        Some(Property::Entity(entity)) => Ok(Some(entity)),
        Some(Property::Null) | None => Ok(None),
        Some(other) => Err(MetadataError::unreadable(
            instance.map(Auditable::type_name).unwrap_or("<absent>"),
            field.name(),
            format!("traversable field held a {} value", other.kind()),
        )
        .into()),
    }
}

fn unreadable_relationship(
    instance: &dyn Auditable,
    property: &str,
    found: &Property,
) -> MetadataError {
    MetadataError::unreadable(
        instance.type_name(),
        property,
        format!("expected an entity value, found a {} value", found.kind()),
    )
}
