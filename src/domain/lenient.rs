//! Field deserializers for provider data.
//!
//! A badly typed optional field becomes `None` (or loses its bad entries)
//! instead of failing the whole record.

use std::{fmt::Display, str::FromStr};

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::Value;

/// Strings pass through, numbers are rendered as text, anything else is dropped.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers, or strings holding a number, e.g. `"2010"`.
pub fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
    <T as FromStr>::Err: Display,
{
    let value = Value::deserialize(deserializer)?;
    Ok(deserialize_option_number_from_string::<T, Value>(value)
        .ok()
        .flatten())
}

/// Keeps the entries that parse and skips the rest.
pub fn optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
