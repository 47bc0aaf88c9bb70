//! Random value provider for model-builder.
//!
//! This crate produces one random value per call for each semantic field
//! type. Generators are plain functions over any [`rand::Rng`]; the
//! [`RandomValueProvider`] owns a seedable source so test runs can be made
//! reproducible.
//!
//! # Architecture
//!
//! ```text
//! FieldType
//!     │
//!     ▼
//! ┌──────────────────────┐
//! │ RandomValueProvider  │
//! │                      │
//! │  - rng (StdRng)      │
//! │  - value_for()       │──► generators::generate_value (dispatch)
//! └──────────┬───────────┘
//!            │
//!            ▼
//!        FieldValue
//! ```
//!
//! # Example
//!
//! ```rust
//! use model_core::{FieldType, FieldValue};
//! use model_generator::RandomValueProvider;
//!
//! let mut provider = RandomValueProvider::new(42);
//!
//! let name = provider.value_for(&FieldType::Str).unwrap();
//! assert!(matches!(name, FieldValue::String(ref s) if s.len() == 16));
//!
//! let day = provider.next_date();
//! println!("Generated date: {day}");
//! ```
//!
//! # Generators
//!
//! - `bool` - Uniform boolean
//! - `int` / `big_int` - Integers in `[0, 2^31-1]` / `[0, 2^63-1]`
//! - `float` - Float in `[0, 2^31-1]` with 5 decimals
//! - `text` - 16 ASCII letters
//! - `bytes` - 8 random bytes
//! - `date`, `date_time`, `timestamp_tz`, `time` - Years 2000 to 2050
//! - `duration` - 1-7 days, 1-23 hours, 0-59 minutes
//! - `uuid` - Version 4 UUID from the injected source
//! - `enum` - Uniform member value
//! - anything else - Same as `text`

pub mod error;
pub mod generators;
pub mod provider;

// Re-exports for convenience
pub use error::ProviderError;
pub use generators::generate_value;
pub use provider::RandomValueProvider;
