//! OAuth request and response models

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Grant carried by a token request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "grant_type", rename_all = "snake_case")]
pub enum TokenGrant {
    /// Account credentials
    Password { email: String, password: String },
    /// Exchange a refresh token for a new access token
    RefreshToken { refresh_token: String },
}

/// Body of a `POST oauth/token` request
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    #[serde(flatten)]
    pub grant: TokenGrant,
    pub client_id: String,
    pub client_secret: String,
}

/// Body of a `POST oauth/revoke` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeRequest {
    pub token: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Token issued by `oauth/token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl TokenResponse {
    /// Absolute expiry, when both `created_at` and `expires_in` are known
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let created = self.created_at?;
        let lifetime = self.expires_in?;
        Utc.timestamp_opt(created.checked_add(lifetime)?, 0).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_refresh_request_shape() {
        let request = TokenRequest {
            grant: TokenGrant::RefreshToken {
                refresh_token: "rt-1".into(),
            },
            client_id: "id".into(),
            client_secret: "secret".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "grant_type": "refresh_token",
                "refresh_token": "rt-1",
                "client_id": "id",
                "client_secret": "secret"
            })
        );
    }

    #[test]
    fn test_password_request_shape() {
        let request = TokenRequest {
            grant: TokenGrant::Password {
                email: "a@b.c".into(),
                password: "pw".into(),
            },
            client_id: "id".into(),
            client_secret: "secret".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["grant_type"], "password");
        assert_eq!(value["email"], "a@b.c");
    }

    #[test]
    fn test_expiry() {
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "at",
            "token_type": "bearer",
            "expires_in": 3_888_000,
            "refresh_token": "rt",
            "created_at": 1_600_000_000
        }))
        .unwrap();
        assert_eq!(token.expires_at().unwrap().timestamp(), 1_603_888_000);

        let partial: TokenResponse =
            serde_json::from_value(json!({"access_token": "at"})).unwrap();
        assert!(partial.expires_at().is_none());
    }
}
