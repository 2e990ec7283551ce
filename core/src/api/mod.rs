//! Resource clients: one async method per endpoint.
//!
//! Each method builds the request with `BlogClient`, executes it through the
//! `Transport` exactly once, and parses the response. Failures are returned
//! to the caller as they are.

mod auth;
mod posts;

use crate::client::BlogClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};

#[derive(Debug, Clone)]
pub struct BlogApi<T> {
    client: BlogClient,
    transport: T,
}

impl<T: Transport> BlogApi<T> {
    pub fn new(client: BlogClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &BlogClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::trace!(method = %request.method, path = %request.path, "sending request");
        self.transport.execute(request).await
    }
}

impl BlogApi<ReqwestTransport> {
    /// API over a fresh `reqwest` transport pointed at `config.base_url`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(BlogClient::new(&config.base_url), ReqwestTransport::new())
    }

    /// Same endpoints, with `token` attached to every request.
    pub fn authenticated(&self, token: impl Into<String>) -> Self {
        Self::new(
            self.client.clone(),
            self.transport.clone().with_bearer_token(token),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::mock::MockTransport;
    use crate::types::LoginRequest;

    #[test]
    fn from_config_targets_configured_base_url() {
        let config = ClientConfig {
            base_url: "https://dummyjson.com/".to_string(),
            ..ClientConfig::default()
        };
        let api = BlogApi::from_config(&config);
        assert_eq!(api.client().base_url(), "https://dummyjson.com");

        let authed = api.authenticated("secret");
        assert_eq!(authed.client().base_url(), "https://dummyjson.com");
    }

    #[tokio::test]
    async fn each_call_executes_exactly_one_request() {
        let api = BlogApi::new(BlogClient::new("http://localhost:3000/"), MockTransport::new());
        api.transport()
            .respond(
                200,
                r#"{"id":1,"username":"emilys","email":"e@x.io","firstName":"Emily","lastName":"Johnson","accessToken":"t0k"}"#,
            )
            .respond(404, "");

        let credentials = LoginRequest {
            username: "emilys".to_string(),
            password: "emilyspass".to_string(),
        };
        let user = api.login(&credentials).await.unwrap();
        assert_eq!(user.token, "t0k");
        assert!(matches!(api.get_post(9).await, Err(ApiError::NotFound)));

        let requests = api.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].path, "http://localhost:3000/auth/login");
        assert_eq!(requests[1].path, "http://localhost:3000/auth/posts/9");
    }
}
