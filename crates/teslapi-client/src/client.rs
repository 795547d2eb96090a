//! Owner API client implementation

use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use teslapi_core::{response_of, RevokeRequest, TokenGrant, TokenRequest, TokenResponse};

use crate::config::{ClientConfig, ClientIdentity};
use crate::error::{Result, TeslaClientError};
use crate::gateway::Gateway;
use crate::vehicle::Vehicle;

/// Owner API client
///
/// Holds the configuration, the HTTP connection pool and the access token.
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TeslaClient {
    gateway: Gateway,
    config: ClientConfig,
    token: Option<String>,
}

impl TeslaClient {
    /// Create a client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let gateway = Gateway::new(&config)?;
        config.streaming_base()?;
        Ok(Self {
            gateway,
            config,
            token: None,
        })
    }

    /// Create a client with defaults overridden from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Attach an access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the access token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// The configured access token
    pub fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(TeslaClientError::MissingToken)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Get the portal base URL
    pub fn base_url(&self) -> &Url {
        self.gateway.portal()
    }

    /// Get the streaming base URL
    pub fn streaming_url(&self) -> Result<Url> {
        Ok(self.config.streaming_base()?)
    }

    fn identity(&self) -> Result<&ClientIdentity> {
        self.config
            .identity
            .as_ref()
            .ok_or(TeslaClientError::MissingIdentity)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Exchange account credentials for a token (`oauth/token`, password grant)
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let identity = self.identity()?;
        let request = TokenRequest {
            grant: TokenGrant::Password {
                email: email.to_string(),
                password: password.to_string(),
            },
            client_id: identity.client_id.clone(),
            client_secret: identity.client_secret.clone(),
        };
        self.gateway.post_json("oauth/token", None, &request).await
    }

    /// Exchange a refresh token for a new token (`oauth/token`, refresh grant)
    #[instrument(skip_all)]
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let identity = self.identity()?;
        let request = TokenRequest {
            grant: TokenGrant::RefreshToken {
                refresh_token: refresh_token.to_string(),
            },
            client_id: identity.client_id.clone(),
            client_secret: identity.client_secret.clone(),
        };
        self.gateway.post_json("oauth/token", None, &request).await
    }

    /// Revoke an access token (`oauth/revoke`)
    #[instrument(skip_all)]
    pub async fn revoke_token(&self, token: &str) -> Result<Value> {
        let identity = self.identity()?;
        let request = RevokeRequest {
            token: token.to_string(),
            client_id: identity.client_id.clone(),
            client_secret: identity.client_secret.clone(),
        };
        self.gateway.post_json("oauth/revoke", Some(token), &request).await
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    /// List all vehicles on the account
    #[instrument(skip(self))]
    pub async fn vehicles(&self) -> Result<Value> {
        self.gateway.get_resource(self.token()?, "api/1/vehicles").await
    }

    /// Get a single vehicle summary by id
    #[instrument(skip(self))]
    pub async fn vehicle_by_id(&self, vehicle_id: &str) -> Result<Value> {
        let path = format!("api/1/vehicles/{}", vehicle_id);
        self.gateway.get_resource(self.token()?, &path).await
    }

    /// Get the vehicle at `index` in the account's vehicle list.
    ///
    /// The element is returned unwrapped, with `id` replaced by the string
    /// form `id_s` when present (numeric ids overflow JSON doubles). A list
    /// without such an element is a [`TeslaClientError::Parse`] error.
    #[instrument(skip(self))]
    pub async fn vehicle_at(&self, index: usize) -> Result<Value> {
        let body = self.vehicles().await?;
        select_vehicle(&body, index)
    }

    /// Handle for commands and reads against one vehicle
    pub fn vehicle(&self, vehicle_id: impl Into<String>) -> Vehicle {
        Vehicle::new(self.clone(), vehicle_id.into())
    }
}

fn select_vehicle(body: &Value, index: usize) -> Result<Value> {
    let list = response_of(body)
        .as_array()
        .ok_or_else(|| TeslaClientError::Parse("vehicle list is not an array".to_string()))?;

    let mut vehicle = list
        .get(index)
        .filter(|v| v.is_object())
        .cloned()
        .ok_or_else(|| {
            TeslaClientError::Parse(format!(
                "no vehicle at index {} ({} on account)",
                index,
                list.len()
            ))
        })?;

    if let Some(id_s) = vehicle.get("id_s").cloned() {
        debug!("using id_s {} as vehicle id", id_s);
        vehicle["id"] = id_s;
    }
    Ok(vehicle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::builder("http://localhost:9080").build()
    }

    #[test]
    fn test_client_creation() {
        let client = TeslaClient::new(config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = TeslaClient::new(ClientConfig::builder("not a url").build());
        assert!(client.is_err());

        let bad_stream = ClientConfig::builder("http://localhost:9080")
            .streaming_url("::")
            .build();
        assert!(TeslaClient::new(bad_stream).is_err());
    }

    #[test]
    fn test_token_required() {
        let client = TeslaClient::new(config()).unwrap();
        assert!(matches!(client.token(), Err(TeslaClientError::MissingToken)));
        assert_eq!(client.with_token("abc").token().unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_oauth_requires_identity() {
        let client = TeslaClient::new(config()).unwrap();
        assert!(matches!(
            client.refresh_token("rt").await,
            Err(TeslaClientError::MissingIdentity)
        ));
        assert!(matches!(
            client.login("a@b.c", "pw").await,
            Err(TeslaClientError::MissingIdentity)
        ));
    }

    #[test]
    fn test_select_vehicle() {
        let body = json!({"response": [
            {"id": 12345678901234567u64, "id_s": "12345678901234567", "vin": "5YJ3E7EB2LF123456"},
            {"id": 2, "vin": "5YJSA1E2XJF000002"}
        ], "count": 2});

        let first = select_vehicle(&body, 0).unwrap();
        assert_eq!(first["id"], "12345678901234567");

        let second = select_vehicle(&body, 1).unwrap();
        assert_eq!(second["id"], 2);

        assert!(matches!(
            select_vehicle(&body, 2),
            Err(TeslaClientError::Parse(_))
        ));
        assert!(matches!(
            select_vehicle(&json!({"response": {"oops": true}}), 0),
            Err(TeslaClientError::Parse(_))
        ));
    }
}
