//! Record synthesis: one record per call, driven by the field schema.

use crate::corpus::Corpus;
use crate::generators::generate_value;
use feed_core::{GeoPoint, Record, Schema};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

/// Builds synthetic records by walking the schema in field order.
///
/// A field named `"id"` receives the current wall-clock timestamp in
/// milliseconds instead of a randomly synthesized value; every other
/// field is dispatched on its type tag.
pub struct RecordGenerator {
    schema: Schema,
    corpus: Corpus,
    origin: GeoPoint,
    radius_meters: f64,
    rng: StdRng,
}

impl RecordGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new(schema: Schema, corpus: Corpus, origin: GeoPoint, radius_meters: f64) -> Self {
        Self {
            schema,
            corpus,
            origin,
            radius_meters,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed for reproducible output.
    ///
    /// Timestamp-derived values (`"id"`, DateTime fields) still depend
    /// on the wall clock.
    pub fn with_seed(
        schema: Schema,
        corpus: Corpus,
        origin: GeoPoint,
        radius_meters: f64,
        seed: u64,
    ) -> Self {
        Self {
            schema,
            corpus,
            origin,
            radius_meters,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Synthesize the next record.
    pub fn next_record(&mut self) -> Record {
        let mut record = Record::new();

        for field in &self.schema.fields {
            let value = if field.name == "id" {
                Value::from(chrono::Utc::now().timestamp_millis())
            } else {
                generate_value(
                    field.field_type,
                    &mut self.rng,
                    &self.corpus,
                    &self.origin,
                    self.radius_meters,
                )
            };
            record.insert(field.name.clone(), value);
        }

        record
    }

    /// The schema driving generation.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
