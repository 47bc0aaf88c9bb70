//! JSON type conversions for model-core types.
//!
//! This crate provides bidirectional conversions between model-core's
//! `FieldValue`/`Record` and JSON. Stores use it to write JSON lines and
//! the command line uses it to parse `field=value` overrides.
//!
//! # Modules
//!
//! - [`forward`] - FieldValue → JSON value conversion
//! - [`reverse`] - JSON value → FieldValue conversion
//!
//! # Example
//!
//! ```rust
//! use json_types::{JsonValue, JsonValueWithSchema};
//! use model_core::{FieldType, FieldValue};
//!
//! // Forward: FieldValue → JSON value
//! let json_val: JsonValue = FieldValue::from("hello").into();
//! assert_eq!(json_val.0, serde_json::json!("hello"));
//!
//! // Reverse: JSON value → FieldValue
//! let json = serde_json::json!(42);
//! let value = JsonValueWithSchema::new(&json, &FieldType::Int)
//!     .to_field_value()
//!     .unwrap();
//! assert_eq!(value, FieldValue::Int32(42));
//! ```

pub mod error;
pub mod forward;
pub mod reverse;

pub use error::JsonConversionError;
pub use forward::{record_to_json, record_to_jsonl, JsonValue};
pub use reverse::{parse_override, record_from_json, JsonValueWithSchema};
