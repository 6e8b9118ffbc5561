//! Build-once, read-many descriptor lookup.

use std::collections::HashMap;

use crate::descriptor::{FieldDescriptor, TypeDescriptor};

/// The registry of all audited types.
///
/// Populated once at startup and then shared read-only (typically behind an
/// `Arc`), so concurrent comparisons need no coordination. Resolution is
/// deterministic and side-effect free.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    types: HashMap<String, TypeDescriptor>,
}

impl MetadataRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type descriptor, replacing any previous descriptor for
    /// the same type name.
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        self.types
            .insert(descriptor.type_name().to_string(), descriptor);
    }

    /// Resolve the descriptor for a type name.
    pub fn descriptor(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.types.get(type_name)
    }

    /// Resolve a field descriptor for a type and field name.
    pub fn field(&self, type_name: &str, field: &str) -> Option<&FieldDescriptor> {
        self.descriptor(type_name)
            .and_then(|td| td.field_named(field))
    }

    /// Whether the type has been registered.
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types have been registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
