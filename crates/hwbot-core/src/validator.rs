//! Structural validation of decoded API responses.

use serde_json::Value;

use crate::{catalog::StatusCode, Error, Result};

/// One homework entry from the API with a recognised status.
///
/// `homework_name` stays optional here; the formatter rejects nameless records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: Option<String>,
    pub status: StatusCode,
}

impl HomeworkRecord {
    /// Read one raw `homeworks` element.
    ///
    /// Non-objects are `MalformedHomeworks`; a missing, non-string or
    /// unrecognised `status` is `UnknownStatus`. A non-string name counts as absent.
    pub fn from_value(item: &Value) -> Result<Self> {
        let Some(obj) = item.as_object() else {
            return Err(Error::MalformedHomeworks);
        };

        let status = match obj.get("status") {
            Some(Value::String(s)) => StatusCode::parse(s)?,
            Some(other) => return Err(Error::UnknownStatus(other.to_string())),
            None => return Err(Error::UnknownStatus("<missing>".to_string())),
        };

        let homework_name = obj
            .get("homework_name")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            homework_name,
            status,
        })
    }
}

/// Validate a decoded response and return its homeworks in API order
/// (index 0 is the most recent).
///
/// A present-but-empty `homeworks` list is not an error.
pub fn validate(response: &Value) -> Result<Vec<HomeworkRecord>> {
    let Some(homeworks) = response.get("homeworks") else {
        return Err(Error::MissingHomeworks);
    };
    let Some(items) = homeworks.as_array() else {
        return Err(Error::MalformedHomeworks);
    };

    items.iter().map(HomeworkRecord::from_value).collect()
}

/// Server-side "checked at" timestamp, when the API provides one.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}
