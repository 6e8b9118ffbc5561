//! Metadata resolver for Recount.
//!
//! Domain types participate in auditing through declarative metadata: a
//! [`TypeDescriptor`] per type (display name, descriptive properties,
//! tracking defaults, parent and join relationships) and a
//! [`FieldDescriptor`] per declared field (tracking, traversal, display
//! name, event-kind overrides). Descriptors are registered once into a
//! [`MetadataRegistry`] and shared read-only for the life of the process.
//!
//! Instances are read through the [`Auditable`] trait, which classifies
//! every property value as a scalar, a single nested entity, or a
//! collection of entities ([`Property`]). The [`access`] module implements
//! the accessor paths the diff engine reads values through.
//!
//! # Key Types
//!
//! - [`TypeDescriptor`] / [`FieldDescriptor`] — Per-type and per-field audit metadata
//! - [`MetadataRegistry`] — Build-once, read-many descriptor lookup
//! - [`Auditable`] / [`Property`] — Instance access boundary
//! - [`MetadataError`] — Configuration and unreadable-property failures

pub mod access;
pub mod descriptor;
pub mod error;
pub mod instance;
pub mod registry;

pub use descriptor::{FieldDescriptor, JoinLink, ParentLink, TypeDescriptor};
pub use error::{MetadataError, MetadataResult};
pub use instance::{AuditHandle, Auditable, Property};
pub use registry::MetadataRegistry;
