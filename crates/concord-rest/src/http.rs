//! HTTP implementation of the transport seam.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, trace};

use concord_core::{
    Endpoint, RequestBody, RestConfig, Transport, TransportError, TransportResult,
};

/// [`Transport`] backed by a shared [`reqwest`] client.
///
/// Endpoints are joined onto the configured API base, and the bot token
/// (when present) is sent as an `Authorization: Bot` header on every
/// request.
pub struct HttpTransport {
    client: Client,
    config: RestConfig,
}

impl HttpTransport {
    /// Creates a transport from the given configuration.
    pub fn new(config: RestConfig) -> TransportResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::InvalidConfig(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), endpoint)
    }

    fn request(&self, method: Method, endpoint: &Endpoint) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(endpoint));
        if let Some(token) = &self.config.token {
            req = req.header("Authorization", format!("Bot {token}"));
        }
        req
    }

    async fn send(&self, req: RequestBuilder) -> TransportResult<Value> {
        let resp = req
            .send()
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        // Deletions and some callbacks answer with an empty body.
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        if bytes.is_empty() {
            trace!("empty response body");
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }

    fn with_body(&self, req: RequestBuilder, body: RequestBody) -> RequestBuilder {
        match body {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.json(&value),
            RequestBody::Multipart(multipart) => req
                .header("Content-Type", multipart.content_type())
                .body(multipart.encode()),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: Endpoint) -> TransportResult<Value> {
        debug!(%endpoint, "GET");
        self.send(self.request(Method::GET, &endpoint)).await
    }

    async fn post(&self, endpoint: Endpoint, body: RequestBody) -> TransportResult<Value> {
        debug!(%endpoint, "POST");
        let req = self.request(Method::POST, &endpoint);
        self.send(self.with_body(req, body)).await
    }

    async fn patch(&self, endpoint: Endpoint, body: RequestBody) -> TransportResult<Value> {
        debug!(%endpoint, "PATCH");
        let req = self.request(Method::PATCH, &endpoint);
        self.send(self.with_body(req, body)).await
    }

    async fn delete(&self, endpoint: Endpoint) -> TransportResult<Value> {
        debug!(%endpoint, "DELETE");
        self.send(self.request(Method::DELETE, &endpoint)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_core::Id;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(RestConfig::new().with_api_base(base).with_token("secret")).unwrap()
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let transport = transport("https://example.test/api/v10");
        let endpoint = Endpoint::InteractionCallback {
            id: Id::from("1"),
            token: "tok".to_string(),
        };
        assert_eq!(
            transport.url(&endpoint),
            "https://example.test/api/v10/interactions/1/tok/callback"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_is_collapsed() {
        let transport = transport("https://example.test/api/v10/");
        let endpoint = Endpoint::FollowUps {
            application_id: Id::from("2"),
            token: "tok".to_string(),
        };
        assert_eq!(
            transport.url(&endpoint),
            "https://example.test/api/v10/webhooks/2/tok"
        );
    }
}
