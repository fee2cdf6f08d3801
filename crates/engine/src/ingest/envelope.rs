//! Messaging webhook envelope: `entry[] -> changes[] -> value -> messages[]`.
//!
//! Only the first element of each level is ever read; siblings stay raw
//! [`Value`]s and are never inspected. A missing key reads as "no messages".
//! A key holding the wrong JSON type on the path that is read is an error.
//!
//! The message body is only decoded after the caller has checked the type,
//! so a non-text event can carry any `text` shape without failing.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    entry: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Entry {
    #[serde(default)]
    changes: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Change {
    #[serde(default)]
    value: ChangeValue,
}

#[derive(Debug, Default, Deserialize)]
struct ChangeValue {
    #[serde(default)]
    messages: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Message {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    text: Value,
}

#[derive(Debug, Default, Deserialize)]
struct TextBody {
    #[serde(default)]
    body: Option<String>,
}

/// Decodes the first element of `items`, if any.
fn first<T: DeserializeOwned>(items: Vec<Value>) -> Result<Option<T>, String> {
    items
        .into_iter()
        .next()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|err| err.to_string())
}

impl Envelope {
    /// Reads an envelope out of a webhook body.
    ///
    /// A body that is itself a JSON string holding JSON is decoded once more.
    pub(crate) fn from_value(payload: &Value) -> Result<Self, String> {
        let decoded;
        let payload = match payload {
            Value::String(inner) => match serde_json::from_str::<Value>(inner) {
                Ok(value) => {
                    decoded = value;
                    &decoded
                }
                Err(_) => payload,
            },
            other => other,
        };

        if !payload.is_object() {
            return Err("expected a JSON object".to_string());
        }
        Envelope::deserialize(payload).map_err(|err| err.to_string())
    }

    /// First message of the first change of the first entry.
    pub(crate) fn into_first_message(self) -> Result<Option<Message>, String> {
        let Some(entry) = first::<Entry>(self.entry)? else {
            return Ok(None);
        };
        let Some(change) = first::<Change>(entry.changes)? else {
            return Ok(None);
        };
        first(change.value.messages)
    }
}

impl Message {
    pub(crate) fn is_text(&self) -> bool {
        self.kind.as_deref() == Some("text")
    }

    /// Decodes `text.body`. A missing or `null` body is `Ok(None)`.
    pub(crate) fn into_body(self) -> Result<Option<String>, String> {
        if self.text.is_null() {
            return Ok(None);
        }
        let text: TextBody = serde_json::from_value(self.text).map_err(|err| err.to_string())?;
        Ok(text.body)
    }
}
