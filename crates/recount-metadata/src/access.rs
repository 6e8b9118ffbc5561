//! Accessor paths: reading values off instances per their metadata.
//!
//! These helpers implement the distinction the engine relies on:
//! a property that is *absent or null* is skipped silently, while a
//! property that is *declared but does not resolve* is a
//! [`MetadataError::Configuration`], and one that resolves to something
//! that cannot be stringified is a [`MetadataError::UnreadableProperty`].

use tracing::warn;

use crate::descriptor::FieldDescriptor;
use crate::error::{MetadataError, MetadataResult};
use crate::instance::{Auditable, Property};
use crate::registry::MetadataRegistry;

/// Read a declared property, failing if it does not exist on the type.
pub fn read_property(instance: &dyn Auditable, property: &str) -> MetadataResult<Property> {
    instance
        .property(property)
        .ok_or_else(|| MetadataError::configuration(instance.type_name(), property))
}

/// Read a declared property as a stringified scalar.
///
/// `Null` maps to `Ok(None)`; entity or collection values are unreadable
/// in scalar position.
pub fn scalar_property(instance: &dyn Auditable, property: &str) -> MetadataResult<Option<String>> {
    match read_property(instance, property)? {
        Property::Null => Ok(None),
        Property::Scalar(s) => Ok(Some(s)),
        other => Err(MetadataError::unreadable(
            instance.type_name(),
            property,
            format!("expected a scalar, found a {} value", other.kind()),
        )),
    }
}

/// Probe for a scalar property by convention. Missing or non-scalar
/// properties yield `None` rather than an error.
pub fn probe_scalar(instance: &dyn Auditable, property: &str) -> Option<String> {
    match instance.property(property) {
        Some(Property::Scalar(s)) => Some(s),
        _ => None,
    }
}

/// Stringify a non-traversable field value.
///
/// Scalars are returned as-is. A nested entity is labeled through the
/// field's descriptive property when one is declared, falling back to the
/// entity's own descriptive value. A collection cannot be stringified.
pub fn field_value(
    instance: &dyn Auditable,
    field: &FieldDescriptor,
    registry: &MetadataRegistry,
) -> MetadataResult<Option<String>> {
    match read_property(instance, field.name())? {
        Property::Null => Ok(None),
        Property::Scalar(s) => Ok(Some(s)),
        Property::Entity(nested) => match field.descriptive_property_name() {
            Some(property) => scalar_property(nested.as_ref(), property),
            None => Ok(Some(descriptive_value(nested.as_ref(), registry)?)),
        },
        Property::Collection(_) => Err(MetadataError::unreadable(
            instance.type_name(),
            field.name(),
            "collection value cannot be stringified; declare the field as traversable",
        )),
    }
}

/// Resolve the descriptive value of an instance.
///
/// Joins the type's descriptive-property expression with its separator.
/// A type with no expression has an `id` property probed by convention;
/// a type with no readable identifying value yields the empty string
/// (degraded but valid, never an error).
pub fn descriptive_value(
    instance: &dyn Auditable,
    registry: &MetadataRegistry,
) -> MetadataResult<String> {
    let descriptor = registry.descriptor(instance.type_name());

    let Some(descriptor) = descriptor else {
        return Ok(probe_scalar(instance, "id").unwrap_or_default());
    };

    if descriptor.descriptive_properties().is_empty() {
        return Ok(probe_scalar(instance, "id").unwrap_or_default());
    }

    let mut parts = Vec::new();
    for property in descriptor.descriptive_properties() {
        if let Some(value) = scalar_property(instance, property)? {
            if !value.is_empty() {
                parts.push(value);
            }
        }
    }
    Ok(parts.join(descriptor.separator()))
}

/// Resolve the identifying value of an instance: the declared id property
/// if any, otherwise a conventionally probed `id` property.
pub fn affected_id(
    instance: &dyn Auditable,
    registry: &MetadataRegistry,
) -> MetadataResult<Option<String>> {
    match registry
        .descriptor(instance.type_name())
        .and_then(|td| td.id_property_name())
    {
        Some(property) => scalar_property(instance, property),
        None => Ok(probe_scalar(instance, "id")),
    }
}

/// Identity key used for collection reconciliation and parent-link
/// containment checks: the affected id, falling back to a non-empty
/// descriptive value. Instances with neither have no key and never match.
pub fn identity_key(
    instance: &dyn Auditable,
    registry: &MetadataRegistry,
) -> MetadataResult<Option<String>> {
    if let Some(id) = affected_id(instance, registry)? {
        return Ok(Some(id));
    }
    let descriptive = descriptive_value(instance, registry)?;
    if descriptive.is_empty() {
        Ok(None)
    } else {
        Ok(Some(descriptive))
    }
}

/// The entity display name: the descriptor's display name, falling back to
/// the runtime type name.
pub fn display_name<'a>(instance: &'a dyn Auditable, registry: &'a MetadataRegistry) -> &'a str {
    registry
        .descriptor(instance.type_name())
        .map(|td| td.effective_display_name())
        .unwrap_or_else(|| instance.type_name())
}

/// Display name plus, optionally, the descriptive value.
///
/// Resolution failures of the descriptive value degrade to the bare name
/// with a diagnostic, since callers of display labels want text, not
/// errors.
pub fn entity_label(
    instance: &dyn Auditable,
    registry: &MetadataRegistry,
    include_descriptive: bool,
) -> String {
    let name = display_name(instance, registry);
    if !include_descriptive {
        return name.to_string();
    }
    match descriptive_value(instance, registry) {
        Ok(descriptive) if !descriptive.is_empty() => format!("{name} {descriptive}"),
        Ok(_) => name.to_string(),
        Err(e) => {
            warn!(
                type_name = instance.type_name(),
                error = %e,
                "unable to resolve descriptive value"
            );
            name.to_string()
        }
    }
}
