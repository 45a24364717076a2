//! JSON-RPC 2.0 messages, one per line.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

const VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Request or notification, the latter has no `id`.
#[derive(Debug, Deserialize)]
pub struct Request {
    jsonrpc: String,
    /// `None` if absent, an explicit `null` is kept.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl Request {
    /// Interpret a parsed message as request or notification.
    pub fn from_message(message: Value) -> Result<Self> {
        let request: Self = serde_json::from_value(message)
            .map_err(|why| Error::InvalidRequest(why.to_string()))?;
        if request.jsonrpc != VERSION {
            let why = format!("unsupported jsonrpc version {:?}", request.jsonrpc);
            return Err(Error::InvalidRequest(why));
        }
        let valid_id = matches!(
            request.id,
            None | Some(Value::String(_)) | Some(Value::Number(_))
        );
        if !valid_id {
            let why = String::from("id must be a string or a number");
            return Err(Error::InvalidRequest(why));
        }
        Ok(request)
    }
}

/// The id to answer an invalid `message` with.
pub fn reply_id(message: &Value) -> Value {
    match message.get("id") {
        Some(id @ (Value::String(_) | Value::Number(_))) => id.clone(),
        _ => Value::Null,
    }
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error<S: Into<String>>(id: Value, code: i32, message: S) -> Self {
        Self {
            jsonrpc: VERSION,
            id,
            result: None,
            error: Some(ErrorObject {
                code,
                message: message.into(),
            }),
        }
    }
}
