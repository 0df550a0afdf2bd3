//! Timestamp value generators.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// How far into the past a generated timestamp may fall, in
/// milliseconds (14 x 100000 seconds, a little over two weeks).
const LOOKBACK_MS: i64 = 1000 * 100_000 * 14;

/// Generate a timestamp uniformly distributed between now and
/// [`LOOKBACK_MS`] in the past, formatted as a zero-padded UTC string
/// with millisecond precision, e.g. `2024-05-03T07:09:41.273Z`.
///
/// Never produces a future timestamp.
pub fn random_past_datetime<R: Rng>(rng: &mut R) -> String {
    random_past_datetime_from(rng, Utc::now())
}

/// Generate a past timestamp relative to an explicit reference instant.
pub fn random_past_datetime_from<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> String {
    let offset_ms = rng.gen_range(0..LOOKBACK_MS);
    let instant = now - Duration::milliseconds(offset_ms);
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
