//! Error types and result handling for tailstream.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! Only configuration-level problems surface as errors. Content-derived
//! anomalies (malformed JSON, a missing key field) degrade to an absent
//! partition key instead of failing the record, so a single bad line never
//! stalls ingestion of the rest of the file.

use thiserror::Error;

/// The main error type for tailstream operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Flow configuration error, typically from an invalid or incomplete
    /// flow definition.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record was constructed against a tracked source that has already
    /// been dropped by the tailing subsystem.
    #[error("tracked source is no longer available")]
    SourceDetached,
}

/// A convenient Result type alias for tailstream operations.
///
/// This is equivalent to `std::result::Result<T, tailstream::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
