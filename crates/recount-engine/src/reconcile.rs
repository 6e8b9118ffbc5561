//! Collection reconciliation: classifying old/new elements into matched,
//! removed, and added.
//!
//! Elements are matched by identity key (explicit id property, probed
//! `id`, falling back to the descriptive value), never by position.
//! Matching is a partition: every old element is matched or removed
//! exactly once, every new element matched or added exactly once. An
//! element whose identity key is derived from a value that itself changed
//! will fail to match and be reported as a removal plus an addition;
//! identity should therefore be based on a stable identifier.

use recount_metadata::access;
use recount_metadata::{AuditHandle, Auditable, FieldDescriptor, TypeDescriptor};
use recount_types::{ChangeRecord, EventKind};

use crate::engine::AuditEngine;
use crate::error::EngineResult;

/// Reconcile the old and new elements of one traversable collection field.
///
/// Matched pairs recurse through `compare` to surface nested field
/// changes; unmatched elements become membership records on the owning
/// entity, mapped through the field's add/remove event overrides. Matched
/// recursions are emitted first, then removals in old order, then
/// additions in new order.
pub(crate) fn collections(
    engine: &AuditEngine,
    descriptor: &TypeDescriptor,
    field: &FieldDescriptor,
    owner: &dyn Auditable,
    old_items: &[AuditHandle],
    new_items: &[AuditHandle],
    records: &mut Vec<ChangeRecord>,
) -> EngineResult<()> {
    let registry = engine.registry();

    let old_keys: Vec<Option<String>> = old_items
        .iter()
        .map(|item| access::identity_key(item.as_ref(), registry))
        .collect::<Result<_, _>>()?;
    let new_keys: Vec<Option<String>> = new_items
        .iter()
        .map(|item| access::identity_key(item.as_ref(), registry))
        .collect::<Result<_, _>>()?;

    let mut paired_new = vec![false; new_items.len()];
    let mut removed: Vec<&AuditHandle> = Vec::new();

    for (element, key) in old_items.iter().zip(&old_keys) {
        // Key-less elements never match.
        let matched = key.as_ref().and_then(|key| {
            (0..new_items.len())
                .find(|&i| !paired_new[i] && new_keys[i].as_deref() == Some(key.as_str()))
        });
        match matched {
            Some(i) => {
                paired_new[i] = true;
                records.extend(
                    engine.compare(Some(element.as_ref()), Some(new_items[i].as_ref()))?,
                );
            }
            None => removed.push(element),
        }
    }

    for element in removed {
        membership_record(engine, descriptor, field, owner, element.as_ref(), false, records)?;
    }
    for (i, element) in new_items.iter().enumerate() {
        if !paired_new[i] {
            membership_record(engine, descriptor, field, owner, element.as_ref(), true, records)?;
        }
    }
    Ok(())
}

/// One membership record: an element entering or leaving the owning
/// entity's collection.
fn membership_record(
    engine: &AuditEngine,
    descriptor: &TypeDescriptor,
    field: &FieldDescriptor,
    owner: &dyn Auditable,
    element: &dyn Auditable,
    additive: bool,
    records: &mut Vec<ChangeRecord>,
) -> EngineResult<()> {
    let registry = engine.registry();
    let event = field.event_for(if additive {
        EventKind::Add
    } else {
        EventKind::Remove
    });

    let mut record = ChangeRecord::new(
        descriptor.effective_display_name(),
        access::descriptive_value(owner, registry)?,
        event,
    );
    record.affected_id = access::affected_id(owner, registry)?;
    record.related_entity = Some(access::display_name(element, registry).to_string());
    record.field = Some(field.name().to_string());
    record.field_display = Some(field.effective_display_name().to_string());
    record.descriptive = descriptor.is_descriptive_field(field.name());

    // Label the element through the field's descriptive property when one
    // is declared, otherwise through the element's own descriptive value.
    let label = match field.descriptive_property_name() {
        Some(property) => access::scalar_property(element, property)?.unwrap_or_default(),
        None => access::descriptive_value(element, registry)?,
    };
    if additive {
        record.new_value = Some(label);
    } else {
        record.old_value = Some(label);
    }

    engine.push_rendered(record, records);
    Ok(())
}
