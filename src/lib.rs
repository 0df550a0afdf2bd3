//! loadfeed: a configurable load/traffic generator.
//!
//! Produces a stream of structured records — synthesized from a typed
//! field schema, or replayed from an ingested data file — and delivers
//! each record to a downstream HTTP listener at a controlled rate.

pub mod config;
pub mod engine;

pub use config::{AppDef, EngineConfig, Mode};
pub use engine::{tick_interval, EngineState, LoadEngine};
