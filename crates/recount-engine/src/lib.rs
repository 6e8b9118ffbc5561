//! The Recount diff engine.
//!
//! Compares two snapshots of the same declared type and produces an
//! ordered list of narrated [`ChangeRecord`]s: field-level changes,
//! collection membership changes, parent association/disassociation
//! events, and whole-entity markers, all driven by registered metadata.
//!
//! One comparison is an independent, synchronous computation. The engine
//! holds only the shared read-only [`MetadataRegistry`] and a renderer, so
//! comparisons of independent instance pairs may run fully in parallel.
//!
//! # Key Types
//!
//! - [`AuditEngine`] — `compare`, `compare_and_narrate`, and narration entry points
//! - [`EngineError`] — Comparison failures
//!
//! [`MetadataRegistry`]: recount_metadata::MetadataRegistry

pub mod engine;
pub mod error;
mod reconcile;

#[cfg(test)]
pub(crate) mod fixtures;

pub use engine::AuditEngine;
pub use error::{EngineError, EngineResult};

pub use recount_metadata::{
    AuditHandle, Auditable, FieldDescriptor, JoinLink, MetadataError, MetadataRegistry, ParentLink,
    Property, TypeDescriptor,
};
pub use recount_narrate::{DefaultRenderer, MessageRenderer, RenderContext};
pub use recount_types::{ChangeRecord, EventKind};
