use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

const COMMAND_KEY: &str = "Command";
const SUCCESSFUL_KEY: &str = "Successful";

/// Outcome of one command exchange.
///
/// Serializes back to the server's flat shape: `Command`, `Successful`, then
/// every other field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResponse {
    #[serde(rename = "Command")]
    pub command: String,
    #[serde(rename = "Successful")]
    pub successful: bool,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a json object")]
    NotAnObject,

    #[error("missing or mistyped field `{0}`")]
    MissingField(&'static str),
}

impl CommandResponse {
    /// Decodes a response frame. Field names match case-insensitively, an exact
    /// match winning over other casings, and every casing of `Command` and
    /// `Successful` is kept out of `data`.
    pub fn decode(frame: &[u8]) -> Result<Self, DecodeError> {
        let Value::Object(mut fields) = serde_json::from_slice::<Value>(frame)? else {
            return Err(DecodeError::NotAnObject);
        };

        let command = match take_field(&mut fields, COMMAND_KEY) {
            Some(Value::String(command)) => command,
            _ => return Err(DecodeError::MissingField(COMMAND_KEY)),
        };
        let successful = match take_field(&mut fields, SUCCESSFUL_KEY) {
            Some(Value::Bool(successful)) => successful,
            _ => return Err(DecodeError::MissingField(SUCCESSFUL_KEY)),
        };

        Ok(CommandResponse { command, successful, data: fields })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

fn take_field(fields: &mut Map<String, Value>, name: &str) -> Option<Value> {
    let exact = fields.remove(name);
    let mut folded = None;
    fields.retain(|key, value| {
        if !key.eq_ignore_ascii_case(name) {
            return true;
        }
        if folded.is_none() {
            folded = Some(value.take());
        }
        false
    });
    exact.or(folded)
}
