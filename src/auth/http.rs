//! HTTP client for the auth provider's API.

use crate::auth::{
    AuthError, AuthProvider, LoginRequest, ProviderError, ProviderResponse, SignUpRequest,
    VerifyEmailQuery,
};
use crate::pordisto::APP_USER_AGENT;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Client for the provider endpoints, one instance shared by every request.
#[derive(Debug, Clone)]
pub struct HttpAuthProvider {
    client: Client,
    base_url: String,
}

impl HttpAuthProvider {
    /// Build a provider client from its base URL.
    ///
    /// Redirects are never followed: a redirect from the provider carries
    /// the verification outcome in its headers and must reach the caller.
    ///
    /// # Errors
    /// Returns an error if the URL does not parse or the client cannot be
    /// built.
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid auth provider URL: {base_url}"))?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<ProviderResponse, AuthError> {
        let response = request.send().await?;

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let json_response: Value = response.json().await.unwrap_or(Value::Null);
            let message = json_response["message"]
                .as_str()
                .unwrap_or("Authentication request failed")
                .to_string();

            debug!("provider answered {}: {}", status, message);

            return Err(AuthError::Provider(ProviderError {
                status: status.as_u16(),
                headers,
                message,
            }));
        }

        let json_response: Value = response.json().await?;

        Ok(ProviderResponse {
            status: status.as_u16(),
            headers,
            user: json_response["user"].clone(),
        })
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn sign_up(&self, payload: &SignUpRequest) -> Result<ProviderResponse, AuthError> {
        debug!("sign-up: {}", payload.email);

        self.execute(self.client.post(self.endpoint("/sign-up/email")).json(payload))
            .await
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<ProviderResponse, AuthError> {
        debug!("login: {}", credentials.email);

        self.execute(
            self.client
                .post(self.endpoint("/sign-in/email"))
                .json(credentials),
        )
        .await
    }

    async fn verify_email(&self, query: &VerifyEmailQuery) -> Result<ProviderResponse, AuthError> {
        self.execute(self.client.get(self.endpoint("/verify-email")).query(query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let provider = HttpAuthProvider::new("http://localhost:3000/api/auth/").expect("client");

        assert_eq!(
            provider.endpoint("/sign-up/email"),
            "http://localhost:3000/api/auth/sign-up/email"
        );
    }

    #[test]
    fn rejects_unparsable_base_url() {
        assert!(HttpAuthProvider::new("not a url").is_err());
    }
}
