//! Shapes of a successful signup response body.

use serde_json::Value;

/// Body of a signup response, classified once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupReply {
    /// The body is a plain string: either a JSON string or text that is not JSON.
    Message(String),
    /// Any other JSON value, usually `{ "code": .., "msg": .. }`.
    Result(ApiResult),
}

/// Structured result with an optional message and code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    pub code: Option<i64>,
    pub msg: Option<String>,
    raw: Value,
}

impl SignupReply {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::String(message)) => SignupReply::Message(message),
            Ok(value) => SignupReply::Result(ApiResult::from_value(value)),
            Err(_) => SignupReply::Message(body.to_string()),
        }
    }
}

impl ApiResult {
    pub fn from_value(raw: Value) -> Self {
        let code = raw.get("code").and_then(integral);
        let msg = raw.get("msg").and_then(message_text);
        Self { code, msg, raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Compact JSON text of the whole body.
    pub fn dump(&self) -> String {
        self.raw.to_string()
    }

    /// The message to show: `msg` when present, otherwise the dump.
    pub fn display_text(&self) -> String {
        match &self.msg {
            Some(msg) => msg.clone(),
            None => self.dump(),
        }
    }
}

/// Scalar `msg` values are shown as text. Empty, zero, `false`, `null` and
/// containers count as no message.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn integral(value: &Value) -> Option<i64> {
    if let Some(code) = value.as_i64() {
        return Some(code);
    }
    let float = value.as_f64()?;
    (float.fract() == 0.0).then_some(float as i64)
}
