//! Request gateway
//!
//! One HTTP attempt per call. A 200 response yields the parsed JSON body
//! unchanged; any other status becomes [`TeslaClientError::Status`] (or a
//! more specific variant) built from the status and the error body; a
//! transport failure is returned as [`TeslaClientError::Http`] untouched.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::{ClientConfig, CommandConfig, CommandMethod};
use crate::error::{Result, TeslaClientError};

const TESLA_USER_AGENT: &str = "x-tesla-user-agent";

/// Error body returned by the owner API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Issues requests against the owner API portal
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    stream_client: Client,
    portal: Url,
    commands: CommandConfig,
}

impl Gateway {
    /// Build a gateway from configuration.
    ///
    /// Identity headers and timeouts are installed once on the underlying
    /// connection pool. Streaming gets its own pool with only a connect
    /// timeout, so long-lived sessions are not cut off.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, header_value(&config.headers.user_agent)?);
        headers.insert(TESLA_USER_AGENT, header_value(&config.headers.tesla_user_agent)?);

        let client = Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .default_headers(headers.clone())
            .build()?;

        let stream_client = Client::builder()
            .connect_timeout(config.timeouts.connect())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            stream_client,
            portal: config.portal_base()?,
            commands: config.commands.clone(),
        })
    }

    /// Base URL of the portal
    pub fn portal(&self) -> &Url {
        &self.portal
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// Useful for custom requests that should reuse the connection pool
    /// and identity headers.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// HTTP client for telemetry streams; same headers, no total timeout
    pub fn stream_client(&self) -> &Client {
        &self.stream_client
    }

    /// Resolve a portal-relative path
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.portal.join(path.trim_start_matches('/'))?)
    }

    /// Read a resource: `GET {portal}{path}`
    pub async fn get_resource(&self, token: &str, path: &str) -> Result<Value> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        self.handle_response(response).await
    }

    /// Send a command to `{portal}{path}`.
    ///
    /// With the default configuration the request is a GET and the payload
    /// is sent twice: as query parameters and as a JSON body.
    pub async fn post_resource(
        &self,
        token: &str,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Value> {
        let mut url = self.url(path)?;
        if let (true, Some(payload)) = (self.commands.query, payload) {
            append_query(&mut url, payload);
        }

        let method = match self.commands.method {
            CommandMethod::Get => Method::GET,
            CommandMethod::Post => Method::POST,
        };
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, url).bearer_auth(token);
        if let (true, Some(payload)) = (self.commands.body, payload) {
            trace!("command payload: {}", payload);
            request = request.json(payload);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// POST a JSON body to an OAuth endpoint and deserialize the reply
    pub async fn post_json<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!("POST {}", url);

        let mut request: RequestBuilder = self.client.post(url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body = self.handle_response(response).await?;
        serde_json::from_value(body).map_err(|e| TeslaClientError::Parse(e.to_string()))
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Handle response and parse the JSON body
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        debug!("status {}", status);

        if status == StatusCode::OK {
            let body: Value = response
                .json()
                .await
                .map_err(|e| TeslaClientError::Parse(e.to_string()))?;
            trace!("response body: {}", body);
            Ok(body)
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    async fn extract_error_from_status(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> TeslaClientError {
        let text = response.text().await.unwrap_or_default();
        trace!("error body: {}", text);

        let message = serde_json::from_str::<ErrorResponse>(&text)
            .ok()
            .and_then(|e| {
                let non_empty = |m: &String| !m.is_empty();
                e.error_description.filter(non_empty).or(e.error.filter(non_empty))
            })
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        warn!("request failed: {} {}", status.as_u16(), message);

        match status {
            StatusCode::UNAUTHORIZED => TeslaClientError::Unauthorized(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                TeslaClientError::Timeout {
                    status: status.as_u16(),
                }
            }
            _ => TeslaClientError::status(status.as_u16(), message),
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| TeslaClientError::InvalidHeader(e.to_string()))
}

/// Append the top-level fields of an object payload as query parameters.
///
/// Scalars are written bare; nested arrays and objects as compact JSON.
fn append_query(url: &mut Url, payload: &Value) {
    let Value::Object(map) = payload else {
        return;
    };
    if map.is_empty() {
        return;
    }

    let mut pairs = url.query_pairs_mut();
    for (key, value) in map {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        pairs.append_pair(key, &rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_query() {
        let mut url = Url::parse("http://localhost/api/1/vehicles/1/command/set_temps").unwrap();
        append_query(&mut url, &json!({"driver_temp": 21.5, "passenger_temp": 20}));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("driver_temp".into(), "21.5".into())));
        assert!(pairs.contains(&("passenger_temp".into(), "20".into())));
    }

    #[test]
    fn test_append_query_nested_and_text() {
        let mut url = Url::parse("http://localhost/x").unwrap();
        append_query(&mut url, &json!({"pin": "1234", "value": {"a": 1}, "on": true}));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("pin".into(), "1234".into())));
        assert!(pairs.contains(&("value".into(), "{\"a\":1}".into())));
        assert!(pairs.contains(&("on".into(), "true".into())));
    }

    #[test]
    fn test_append_query_ignores_non_objects() {
        let mut url = Url::parse("http://localhost/x").unwrap();
        append_query(&mut url, &json!([1, 2]));
        append_query(&mut url, &json!({}));
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_url_join() {
        let config = ClientConfig::builder("http://localhost:9080").build();
        let gateway = Gateway::new(&config).unwrap();
        assert_eq!(
            gateway.url("/api/1/vehicles").unwrap().as_str(),
            "http://localhost:9080/api/1/vehicles"
        );
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = ClientConfig::builder("http://localhost:9080")
            .user_agent("bad\nagent")
            .build();
        assert!(matches!(
            Gateway::new(&config),
            Err(TeslaClientError::InvalidHeader(_))
        ));
    }
}
