//! The instance access boundary.
//!
//! The diff engine never inspects concrete types. It reads every instance
//! through [`Auditable`], which exposes the runtime type name and named
//! property access. Each property value is classified into a [`Property`]
//! variant — scalar, single nested entity, or collection of entities — and
//! the engine dispatches on that classification.

use std::sync::Arc;

/// Shared handle to an audited instance.
///
/// Nested entities and collection elements are handed out as `Arc`s so
/// cyclic parent/child object graphs (a child holding its parent while the
/// parent's collection holds the child) remain expressible.
pub type AuditHandle = Arc<dyn Auditable>;

/// Read access to one audited instance.
///
/// Implementations must satisfy:
/// - `property` returns `None` only when the named property does not exist
///   on the type; a present-but-absent value is `Some(Property::Null)`.
/// - Scalars are stringified at the access site; two values whose string
///   forms are equal are equal for audit purposes.
/// - Reads are side-effect free. A comparison may read the same property
///   more than once.
pub trait Auditable: Send + Sync {
    /// The runtime type name, used as the metadata registry key.
    fn type_name(&self) -> &str;

    /// Read a property by name.
    fn property(&self, name: &str) -> Option<Property>;
}

/// A classified property value.
#[derive(Clone)]
pub enum Property {
    /// The property exists but holds no value.
    Null,
    /// A stringified scalar value.
    Scalar(String),
    /// A single nested entity.
    Entity(AuditHandle),
    /// A collection of nested entities.
    Collection(Vec<AuditHandle>),
}

impl Property {
    /// Stringify a scalar value.
    pub fn scalar(value: impl ToString) -> Self {
        Property::Scalar(value.to_string())
    }

    /// Stringify an optional scalar, mapping `None` to [`Property::Null`].
    pub fn scalar_opt<T: ToString>(value: Option<&T>) -> Self {
        match value {
            Some(v) => Property::Scalar(v.to_string()),
            None => Property::Null,
        }
    }

    /// Wrap a single nested entity.
    pub fn entity(value: AuditHandle) -> Self {
        Property::Entity(value)
    }

    /// Wrap an optional nested entity, mapping `None` to [`Property::Null`].
    pub fn entity_opt(value: Option<AuditHandle>) -> Self {
        match value {
            Some(v) => Property::Entity(v),
            None => Property::Null,
        }
    }

    /// Wrap a collection of nested entities.
    pub fn collection(values: Vec<AuditHandle>) -> Self {
        Property::Collection(values)
    }

    /// Human-readable variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Property::Null => "null",
            Property::Scalar(_) => "scalar",
            Property::Entity(_) => "entity",
            Property::Collection(_) => "collection",
        }
    }
}

impl std::fmt::Debug for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Property::Null => write!(f, "Null"),
            Property::Scalar(s) => write!(f, "Scalar({s:?})"),
            Property::Entity(e) => write!(f, "Entity({})", e.type_name()),
            Property::Collection(c) => write!(f, "Collection(len={})", c.len()),
        }
    }
}
