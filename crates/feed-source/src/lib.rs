//! Data file ingestion for replay mode.
//!
//! A data file is read line by line into an in-memory table, with the
//! file's format (JSON-lines vs `;`-delimited) decided once from the
//! first non-blank line. In bring-your-own-data configurations the
//! file is first fetched from a remote data service and fully
//! persisted locally before ingestion begins.

mod fetch;
mod ingest;

pub use fetch::fetch_to_file;
pub use ingest::{ingest, ingest_file, LineFormat, LineTable, ReplayCursor};
