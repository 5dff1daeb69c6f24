//! Strict inspection of JSON request bodies.
//!
//! Presence and type are checked separately so a missing field and a field of
//! the wrong JSON type produce distinct errors. Numbers accept both integer and
//! floating-point JSON values; identifiers must be JSON integers.

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Parse a raw body. Anything other than a JSON object is rejected as
    /// invalid fields, regardless of the request's content type.
    pub fn parse(body: &[u8]) -> AppResult<Self> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            _ => Err(AppError::InvalidFields(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    /// Fail on the first key in `keys` that is absent.
    pub fn require(&self, keys: &[&str]) -> AppResult<()> {
        match keys.iter().find(|key| !self.0.contains_key(**key)) {
            Some(key) => Err(AppError::InvalidFields(format!("Missing field '{key}'"))),
            None => Ok(()),
        }
    }

    pub fn number(&self, key: &str) -> AppResult<f64> {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| invalid_format(key, "a number"))
    }

    pub fn string(&self, key: &str) -> AppResult<String> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| invalid_format(key, "a string"))
    }

    /// Integer-typed field. `3.0` is a float and is rejected. Whether the
    /// value fits a store id is left to the caller; integers past `i64`
    /// saturate.
    pub fn integer(&self, key: &str) -> AppResult<i64> {
        match self.0.get(key) {
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => {
                Ok(n.as_i64().unwrap_or(i64::MAX))
            }
            _ => Err(invalid_format(key, "an integer")),
        }
    }
}

fn invalid_format(key: &str, expected: &str) -> AppError {
    AppError::InvalidFormat(format!("Field '{key}' must be {expected}"))
}
