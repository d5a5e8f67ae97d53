//! Error message extraction from failed responses.
//!
//! Every endpoint reports failures with the same precedence:
//! `errors[0].msg`, then `error`, then `message`, then a fallback naming
//! the status code.

use serde_json::Value;

/// Pick the user-facing message out of an error response body.
pub fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| message_from_value(&value))
        .unwrap_or_else(|| fallback_message(status))
}

/// Message from an already-parsed body, if any field carries one.
pub fn message_from_value(value: &Value) -> Option<String> {
    let first_validation = value
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|error| error.get("msg"));

    [first_validation, value.get("error"), value.get("message")]
        .into_iter()
        .flatten()
        .find_map(non_empty_text)
}

/// Message used when the body carries nothing usable.
pub fn fallback_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}

fn non_empty_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_array_wins() {
        let body = br#"{"errors":[{"msg":"El nombre es obligatorio"}],"error":"x","message":"y"}"#;
        assert_eq!(error_message(400, body), "El nombre es obligatorio");
    }

    #[test]
    fn test_error_field_before_message() {
        let body = br#"{"error":"Stock insuficiente","message":"y"}"#;
        assert_eq!(error_message(409, body), "Stock insuficiente");
    }

    #[test]
    fn test_message_field() {
        assert_eq!(error_message(404, br#"{"message":"No encontrado"}"#), "No encontrado");
    }

    #[test]
    fn test_empty_validation_array_falls_through() {
        let body = br#"{"errors":[],"error":"Sin stock"}"#;
        assert_eq!(error_message(400, body), "Sin stock");
    }

    #[test]
    fn test_blank_and_non_string_fields_skipped() {
        let body = br#"{"errors":[{"msg":""}],"error":{"code":1},"message":"Fallo"}"#;
        assert_eq!(error_message(400, body), "Fallo");
    }

    #[test]
    fn test_fallback_on_unusable_body() {
        assert_eq!(error_message(500, b"<html>"), "Request failed with status code 500");
        assert_eq!(error_message(502, b"{}"), "Request failed with status code 502");
        assert_eq!(error_message(503, b""), "Request failed with status code 503");
    }
}
