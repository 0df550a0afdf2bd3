//! Individual value generators for the schema field types.
//!
//! Each submodule covers one family of values; [`generate_value`]
//! dispatches on the field's [`TypeTag`] with an exhaustive match so a
//! new tag cannot be added without a generation rule.

pub mod geo;
pub mod numeric;
pub mod text;
pub mod timestamp;

use crate::corpus::Corpus;
use feed_core::{GeoPoint, TypeTag};
use rand::Rng;
use serde_json::Value;

/// Generate one JSON-compatible value for the given type tag.
///
/// Values are independent of prior calls except through the shared
/// random source and the read-only corpus.
pub fn generate_value<R: Rng>(
    tag: TypeTag,
    rng: &mut R,
    corpus: &Corpus,
    origin: &GeoPoint,
    radius_meters: f64,
) -> Value {
    match tag {
        TypeTag::String => Value::String(text::extract_fragment(corpus, rng)),
        TypeTag::Integer => Value::from(numeric::random_integer(rng)),
        TypeTag::Long => Value::from(numeric::random_long(rng)),
        TypeTag::Double => Value::from(numeric::random_double(rng)),
        TypeTag::Boolean => Value::Bool(rng.gen_bool(0.5)),
        TypeTag::DateTime => Value::String(timestamp::random_past_datetime(rng)),
        TypeTag::Location => {
            let point = geo::sample_in_disk(rng, origin, radius_meters);
            Value::String(geo::format_location(&point))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dispatch_produces_expected_json_types() {
        let mut rng = StdRng::seed_from_u64(42);
        let corpus = Corpus::new("The quick fox. Runs fast over the hill today.").unwrap();
        let origin = GeoPoint::new(41.41187, -2.22589);

        let v = generate_value(TypeTag::Integer, &mut rng, &corpus, &origin, 1000.0);
        assert!(v.is_i64());

        let v = generate_value(TypeTag::Double, &mut rng, &corpus, &origin, 1000.0);
        assert!(v.is_f64());

        let v = generate_value(TypeTag::Boolean, &mut rng, &corpus, &origin, 1000.0);
        assert!(v.is_boolean());

        let v = generate_value(TypeTag::String, &mut rng, &corpus, &origin, 1000.0);
        assert!(v.is_string());

        let v = generate_value(TypeTag::DateTime, &mut rng, &corpus, &origin, 1000.0);
        assert!(v.is_string());

        let v = generate_value(TypeTag::Location, &mut rng, &corpus, &origin, 1000.0);
        let s = v.as_str().unwrap();
        assert!(s.contains(','), "location should be 'lat,lon', got {s}");
    }
}
