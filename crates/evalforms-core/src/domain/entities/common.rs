//! Serde helpers shared by the draft and normalized models.
//!
//! Drafts come from places we do not control (hand-written JSON, records
//! written by older clients), so reading them never fails on a single bad
//! property. An unknown enumeration string or a `null` degrades to "unset";
//! a number where text was expected keeps its printed form.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serializer, de::DeserializeOwned};
use serde_json::Value;

use crate::domain::value_objects::Section;

/// Parse any scalar through `FromStr`; anything unparsable becomes `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) if !s.is_empty() => s.parse().ok(),
        Some(Value::Number(n)) => n.to_string().parse().ok(),
        Some(Value::Bool(b)) => b.to_string().parse().ok(),
        _ => None,
    })
}

/// Like [`lenient`], falling back to `T::default()`.
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s.parse().unwrap_or_default(),
        _ => T::default(),
    })
}

/// Text property: numbers and booleans keep their printed form, anything
/// else reads as empty.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Flag property: `"true"`/`"false"` strings and `0`/`1` are accepted,
/// anything else is `false`.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    })
}

/// Identifier property: kept as written when it is a string, unset otherwise.
pub(crate) fn lenient_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(value @ Value::String(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// List of records: entries that cannot be read are skipped, and anything
/// other than an array reads as empty.
pub(crate) fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Keep only the string entries of an option list.
pub(crate) fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// `Option<Section>` on the wire: `"3"` or `""`.
pub(crate) mod optional_section {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(
        section: &Option<Section>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match section {
            Some(s) => serializer.collect_str(s),
            None => serializer.serialize_str(""),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Section>, D::Error> {
        lenient(deserializer)
    }
}
