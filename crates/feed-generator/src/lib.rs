//! Typed random value synthesis for the loadfeed engine.
//!
//! Given a field schema, this crate produces one record per call, with
//! each value drawn according to the field's [`TypeTag`]: bounded
//! numerics, coin-flip booleans, recent-past timestamps, uniform-area
//! geographic points, and natural-language-like fragments extracted
//! from a loaded text corpus.
//!
//! [`TypeTag`]: feed_core::TypeTag

pub mod corpus;
pub mod generator;
pub mod generators;

pub use corpus::{Corpus, CorpusError};
pub use generator::RecordGenerator;
