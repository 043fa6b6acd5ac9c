use serde_json::{Map, Value};

use crate::{FailureKind, ServerReply, SubmitError};

/// Classify a reply body as one of the two known shapes.
///
/// A truthy `error` wins over everything else. Otherwise the reply must carry
/// a non-null `rss_url`; anything else is a malformed reply.
pub fn parse_reply(body: &[u8]) -> Result<ServerReply, SubmitError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| SubmitError::new(FailureKind::MalformedReply, err.to_string()))?;

    let Value::Object(fields) = value else {
        return Err(SubmitError::new(
            FailureKind::MalformedReply,
            "reply is not a JSON object",
        ));
    };

    classify(&fields)
}

fn classify(fields: &Map<String, Value>) -> Result<ServerReply, SubmitError> {
    if let Some(error) = fields.get("error").filter(|value| is_truthy(value)) {
        return Ok(ServerReply::Rejected {
            error: display_text(error),
        });
    }

    match fields.get("rss_url") {
        Some(Value::Null) | None => Err(SubmitError::new(
            FailureKind::MalformedReply,
            "reply has neither a truthy error nor rss_url",
        )),
        Some(rss_url) => Ok(ServerReply::Accepted {
            rss_url: display_text(rss_url),
        }),
    }
}

/// Browser truthiness of a decoded JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text shown in a status region: strings as-is, anything else as JSON.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
