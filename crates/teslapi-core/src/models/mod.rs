//! Wire models shared by the client and the CLI

pub mod auth;
pub mod telemetry;
pub mod vehicle;

pub use auth::{RevokeRequest, TokenGrant, TokenRequest, TokenResponse};
pub use telemetry::{columns_query, DEFAULT_COLUMNS};
pub use vehicle::*;

/// The owner API wraps payloads as `{"response": ...}`; return the inner
/// value, or the body itself when it is not wrapped.
pub fn response_of(body: &serde_json::Value) -> &serde_json::Value {
    body.get("response").unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_of() {
        let wrapped = json!({"response": {"result": true, "reason": ""}});
        assert_eq!(response_of(&wrapped)["result"], json!(true));

        let bare = json!([1, 2]);
        assert_eq!(response_of(&bare), &bare);
    }
}
