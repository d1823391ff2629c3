//! Record transformer: parse, enrich, re-serialize.
//!
//! Each call owns its parsed document for the duration of the call only; the
//! returned [`OutputBuffer`] is the single allocation that outlives it.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::buffer::OutputBuffer;
use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::record::Record;
use crate::time_format::format_timestamp;

/// Deepest container nesting accepted in a payload. Objects and arrays
/// count; the root object is depth 1.
pub const MAX_NESTING_DEPTH: usize = 300;

/// Stateless enrichment of JSON log records.
///
/// # Example
///
/// ```
/// use enrich_filter::{Record, RecordTransformer, Timestamp};
///
/// let transformer = RecordTransformer::default();
/// let record = Record::new(b"app.log", Timestamp::new(1_700_000_000, 0), br#"{"msg":"hello"}"#);
///
/// let output = transformer.transform(&record).unwrap();
/// assert!(output.to_str().unwrap().contains(r#""tag":"app.log""#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordTransformer {
    config: FilterConfig,
}

impl RecordTransformer {
    /// Create a transformer from an already validated config.
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Transform one record.
    ///
    /// # Errors
    /// * `InvalidUtf8` / `Parse` - payload is not well-formed JSON text
    /// * `TooDeep` - payload nests more than [`MAX_NESTING_DEPTH`] containers
    /// * `NotAnObject` - payload root is an array, scalar or null
    /// * `Serialize` / `EmbeddedNul` - output could not be produced
    pub fn transform(&self, record: &Record<'_>) -> Result<OutputBuffer, FilterError> {
        let original = record.payload_text()?;

        let value = parse_payload(original)?;
        let object = match value {
            Value::Object(map) => map,
            other => {
                return Err(FilterError::NotAnObject {
                    found: json_kind(&other),
                })
            }
        };

        let enriched = self.enrich(object, record, original);

        let bytes = serde_json::to_vec(&enriched).map_err(FilterError::Serialize)?;
        let output = OutputBuffer::new(bytes)?;

        tracing::trace!(
            tag = %record.tag_text(),
            input_len = record.payload.len(),
            output_len = output.len(),
            "record enriched"
        );

        Ok(output)
    }

    /// Set the time, tag and original fields on a parsed object.
    ///
    /// Existing keys keep their position and get their value replaced; new
    /// keys are appended in time, tag, original order. Nothing else changes.
    pub fn enrich(
        &self,
        mut object: Map<String, Value>,
        record: &Record<'_>,
        original: &str,
    ) -> Map<String, Value> {
        let time = format_timestamp(record.timestamp, self.config.time_format);

        object.insert(self.config.time_key.clone(), Value::String(time));
        object.insert(
            self.config.tag_key.clone(),
            Value::String(record.tag_text().into_owned()),
        );
        object.insert(
            self.config.original_key.clone(),
            Value::String(original.to_string()),
        );

        object
    }
}

/// Parse payload text, bounded by [`MAX_NESTING_DEPTH`] instead of
/// serde_json's built-in recursion limit of 128.
fn parse_payload(text: &str) -> Result<Value, FilterError> {
    let depth = nesting_depth(text);
    if depth > MAX_NESTING_DEPTH {
        return Err(FilterError::TooDeep {
            depth,
            limit: MAX_NESTING_DEPTH,
        });
    }

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer).map_err(FilterError::Parse)?;
    deserializer.end().map_err(FilterError::Parse)?;
    Ok(value)
}

/// Maximum bracket nesting outside string literals. Malformed text is left
/// for the parser to reject.
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    max_depth
}

/// JSON type name used in diagnostics.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
