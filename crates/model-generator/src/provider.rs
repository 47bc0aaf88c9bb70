//! Random value provider with an owned, seedable source.

use crate::error::ProviderError;
use crate::generators::{self, choice, numeric, temporal, text};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use model_core::{FieldType, FieldValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Random value provider.
///
/// Every call draws fresh values from the owned random source; nothing is
/// memoized. A provider created with [`RandomValueProvider::new`] produces
/// the same sequence of values for the same seed.
#[derive(Debug, Clone)]
pub struct RandomValueProvider<R = StdRng> {
    rng: R,
}

impl RandomValueProvider<StdRng> {
    /// Create a provider with a deterministic seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a provider seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl<R: Rng> RandomValueProvider<R> {
    /// Create a provider over an existing random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Get mutable access to the random source.
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Generate a value for the declared field type.
    pub fn value_for(&mut self, field_type: &FieldType) -> Result<FieldValue, ProviderError> {
        generators::generate_value(field_type, &mut self.rng)
    }

    /// Uniform boolean.
    pub fn next_bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Integer in `[0, 2^31 - 1]`.
    pub fn next_int(&mut self) -> i32 {
        self.rng.random_range(0..=numeric::DEFAULT_INT_MAX)
    }

    /// Integer in `[min, max]`.
    pub fn next_int_between(&mut self, min: i32, max: i32) -> Result<i32, ProviderError> {
        numeric::generate_int_range(&mut self.rng, min, max)
    }

    /// 64-bit integer in `[0, 2^63 - 1]`.
    pub fn next_int64(&mut self) -> i64 {
        self.rng.random_range(0..=numeric::DEFAULT_INT64_MAX)
    }

    /// 64-bit integer in `[min, max]`.
    pub fn next_int64_between(&mut self, min: i64, max: i64) -> Result<i64, ProviderError> {
        numeric::generate_int64_range(&mut self.rng, min, max)
    }

    /// Float in `[0, 2^31 - 1]` with 5 decimal digits.
    pub fn next_float(&mut self) -> f64 {
        self.next_float_with(0.0, numeric::DEFAULT_FLOAT_MAX, numeric::DEFAULT_FLOAT_PRECISION)
            .unwrap_or_default()
    }

    /// Float in `[min, max]` rounded to `precision` decimal digits.
    pub fn next_float_with(
        &mut self,
        min: f64,
        max: f64,
        precision: u32,
    ) -> Result<f64, ProviderError> {
        numeric::generate_float_range(&mut self.rng, min, max, precision)
    }

    /// String of 16 ASCII letters.
    pub fn next_str(&mut self) -> String {
        self.next_str_of(text::DEFAULT_STR_LENGTH)
    }

    /// String of exactly `length` ASCII letters.
    pub fn next_str_of(&mut self, length: usize) -> String {
        text::generate_string(&mut self.rng, length)
    }

    /// Buffer of 8 random bytes.
    pub fn next_bytes(&mut self) -> Vec<u8> {
        self.next_bytes_of(text::DEFAULT_BYTES_LENGTH)
    }

    /// Buffer of exactly `length` random bytes.
    pub fn next_bytes_of(&mut self, length: usize) -> Vec<u8> {
        text::generate_bytes(&mut self.rng, length)
    }

    /// Calendar date with year in `[2000, 2050]`.
    pub fn next_date(&mut self) -> NaiveDate {
        temporal::generate_date(&mut self.rng)
    }

    /// Date/time without timezone.
    pub fn next_datetime(&mut self) -> NaiveDateTime {
        temporal::generate_datetime(&mut self.rng)
    }

    /// Date/time in UTC.
    pub fn next_datetime_utc(&mut self) -> DateTime<Utc> {
        temporal::generate_datetime_utc(&mut self.rng)
    }

    /// Time of day.
    pub fn next_time(&mut self) -> NaiveTime {
        temporal::generate_time(&mut self.rng)
    }

    /// Duration of roughly one to eight days.
    pub fn next_duration(&mut self) -> TimeDelta {
        temporal::generate_duration(&mut self.rng)
    }

    /// Version 4 UUID.
    pub fn next_uuid(&mut self) -> Uuid {
        generators::uuid::generate_uuid_v4(&mut self.rng)
    }

    /// Uniformly chosen element of a non-empty list.
    pub fn next_from_list<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, ProviderError> {
        choice::generate_from_list(&mut self.rng, items)
    }

    /// Uniformly chosen enum member value.
    pub fn next_enum<'a>(
        &mut self,
        members: &'a [FieldValue],
    ) -> Result<&'a FieldValue, ProviderError> {
        choice::generate_enum(&mut self.rng, members)
    }
}
