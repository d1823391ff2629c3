//! # enrich-filter: provenance enrichment for JSON log records
//!
//! A record filter meant to be loaded by a host log pipeline (for example as
//! a WASM filter plugin). Each call receives one record, parses its payload
//! as a JSON object and adds three fields before handing the result back:
//!
//! - `time`: the record timestamp, formatted as RFC 3339 in UTC
//! - `tag`: the record tag
//! - `original`: the payload text exactly as received
//!
//! Payloads that are not JSON, or whose root is not an object, produce no
//! result and the host keeps the record unchanged.
//!
//! ## Example
//!
//! ```
//! use enrich_filter::{Record, RecordTransformer, Timestamp};
//!
//! let transformer = RecordTransformer::default();
//! let record = Record::new(b"app.log", Timestamp::new(1_700_000_000, 0), br#"{"msg":"hello"}"#);
//!
//! let output = transformer.transform(&record).unwrap();
//! assert_eq!(
//!     output.to_str().unwrap(),
//!     r#"{"msg":"hello","time":"2023-11-14T22:13:20.000000000Z","tag":"app.log","original":"{\"msg\":\"hello\"}"}"#
//! );
//! ```
//!
//! ## Foreign boundary
//!
//! The host calls [`ffi::enrich_record`] with pointer/length pairs and gets
//! back a NUL-terminated buffer it owns, or null.

pub mod buffer;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ffi;
pub mod record;
pub mod time_format;
pub mod transform;

// Re-export key types
pub use buffer::OutputBuffer;
pub use config::FilterConfig;
pub use error::FilterError;
pub use ffi::enrich_record;
pub use record::{Record, Timestamp};
pub use time_format::{format_timestamp, TimeFormat};
pub use transform::{RecordTransformer, MAX_NESTING_DEPTH};
