//! Lenient serde adapters for numeric backend fields
//!
//! The backend emits decimal columns as JSON strings (`"12.50"`) and integer
//! columns as numbers, and older records carry `null` or `""` for unset
//! values. These adapters accept all of them and serialize back as numbers.
//! A value that is not a number at all (`"N/A"`) reads as unset, so one bad
//! row never fails a whole list.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serializer};
use std::fmt;

struct LenientNumber;

enum Parsed {
    Missing,
    Number(f64),
}

impl<'de> Visitor<'de> for LenientNumber {
    type Value = Parsed;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Parsed, E> {
        Ok(Parsed::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Parsed, E> {
        Ok(Parsed::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Parsed, E> {
        Ok(Parsed::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Parsed, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(Parsed::Missing);
        }
        Ok(trimmed.parse::<f64>().map_or(Parsed::Missing, Parsed::Number))
    }

    fn visit_none<E: de::Error>(self) -> Result<Parsed, E> {
        Ok(Parsed::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Parsed, E> {
        Ok(Parsed::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Parsed, D::Error> {
        deserializer.deserialize_any(LenientNumber)
    }
}

/// `Option<f64>` from a number, numeric string, empty string or null.
pub mod lenient_f64 {
    use super::{LenientNumber, Parsed};
    use serde::{Deserializer, Serializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match deserializer.deserialize_option(LenientNumber)? {
            Parsed::Missing => Ok(None),
            Parsed::Number(n) => Ok(Some(n)),
        }
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        super::serialize_opt(value.as_ref().copied(), serializer, |s, n| s.serialize_f64(n))
    }
}

/// `Option<i64>` from an integral number, numeric string, empty string or
/// null. Fractional values are truncated toward zero.
pub mod lenient_i64 {
    use super::{LenientNumber, Parsed};
    use serde::{Deserializer, Serializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match deserializer.deserialize_option(LenientNumber)? {
            Parsed::Missing => Ok(None),
            Parsed::Number(n) if n.is_finite() => Ok(Some(n.trunc() as i64)),
            Parsed::Number(_) => Ok(None),
        }
    }

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        super::serialize_opt(value.as_ref().copied(), serializer, |s, n| s.serialize_i64(n))
    }
}

/// Reads `null` as `T::default()`; pair with `#[serde(default)]` to cover a
/// missing key too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn serialize_opt<S, T>(
    value: Option<T>,
    serializer: S,
    some: impl FnOnce(S, T) -> Result<S::Ok, S::Error>,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => some(serializer, v),
        None => serializer.serialize_none(),
    }
}
