/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Use these helpers to ensure all error messages are consistent, explicit, and include a code and context.
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::Value;

use crate::server::game_session::messages::ServerMessage;

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_MESSAGE").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. session_id).
pub fn ws_error_message(code: &str, message: &str, context: Option<Value>) -> String {
    serde_json::to_string(&ServerMessage::error(code, message, context))
        .unwrap_or_else(|_| format!(r#"{{"action":"Error","data":{{"code":"{}"}}}}"#, code))
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<Value>,
    status: StatusCode,
) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "context": context,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_error_message_escapes_text() {
        let text = ws_error_message("INVALID_NAME", "name \"x\" too long", Some(serde_json::json!({ "max": 20 })));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["action"], "Error");
        assert_eq!(value["data"]["message"], "name \"x\" too long");
        assert_eq!(value["data"]["context"]["max"], 20);
    }

    #[test]
    fn test_http_error_status() {
        let resp = http_error_response("SESSION_NOT_FOUND", "missing", None, StatusCode::NOT_FOUND);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
