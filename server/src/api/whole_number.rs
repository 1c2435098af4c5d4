//! Integer request fields that also accept whole-number floats (`30.0`).

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Largest float that still converts to `i64` without losing precision.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

fn to_whole<E: Error>(number: Number) -> Result<i64, E> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT => Ok(value as i64),
        _ => Err(E::custom(format!("expected a whole number, got {}", number))),
    }
}

pub fn required<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    to_whole(Number::deserialize(deserializer)?)
}

pub fn optional<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(to_whole)
        .transpose()
}
