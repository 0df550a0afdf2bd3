//! Core types shared by the loadfeed workspace.
//!
//! This crate defines the field schema that drives synthetic record
//! generation, the geographic types used by location sampling, and the
//! record representation handed to the emitter.

pub mod geo;
pub mod schema;

pub use geo::GeoPoint;
pub use schema::{FieldSpec, Schema, SchemaError, TypeTag};

/// A single generated or replayed record, keyed by field name.
///
/// Records are transient: one is built per emission and discarded after
/// delivery.
pub type Record = serde_json::Map<String, serde_json::Value>;
