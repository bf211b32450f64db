//! Serde support for override literals.
//!
//! Literals are kept as text, but plan documents and requests may carry them
//! as JSON numbers or booleans. Those are accepted and stored in their
//! textual form.

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value as Json;

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Json>::deserialize(deserializer)? {
        None | Some(Json::Null) => Ok(None),
        Some(Json::String(s)) => Ok(Some(s)),
        Some(Json::Bool(b)) => Ok(Some(b.to_string())),
        Some(Json::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar literal, found {other}"
        ))),
    }
}
