//! Result Coercer: best-effort extraction of a JSON object from model output.
//!
//! Takes the substring from the first `{` to the last `}` and parses it. Any
//! failure (no braces, malformed JSON, wrong shape) silently yields the
//! caller's default. The fallback is part of the contract: callers get a
//! `Coerced` value telling them which branch was taken, never an error.
//!
//! Known limitation: a completion holding two separate objects, or stray
//! braces in surrounding prose, widens the slice and usually ends in the
//! default. No bracket balancing is attempted.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome of coercion. Both arms carry a complete record.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    /// Deserialized from the model's output.
    Parsed(T),
    /// The hand-authored default, substituted in full.
    Fallback(T),
}

impl<T> Coerced<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Coerced::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Coerced::Parsed(value) | Coerced::Fallback(value) => value,
        }
    }
}

/// The outermost-brace slice of `raw`, parsed as an untyped JSON object.
pub fn extract_json_object(raw: &str) -> Option<Value> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str::<Value>(&raw[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

/// Typed coercion: the extracted object must deserialize into `T` in full.
/// Unknown keys are ignored; missing or mistyped keys select the default.
pub fn coerce<T: DeserializeOwned>(raw: &str, default: T) -> Coerced<T> {
    extract_json_object(raw)
        .and_then(|value| serde_json::from_value::<T>(value).ok())
        .map_or(Coerced::Fallback(default), Coerced::Parsed)
}
