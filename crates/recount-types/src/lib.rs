//! Foundation types for Recount.
//!
//! This crate provides the output value types shared by every other Recount
//! crate: the audit event kinds and the flat change record
//! the diff engine emits.
//!
//! # Key Types
//!
//! - [`EventKind`] — What happened to an entity or field (add, remove, change, association edges)
//! - [`ChangeRecord`] — One narrated, field-level audit change

pub mod event;
pub mod record;

pub use event::EventKind;
pub use record::ChangeRecord;
