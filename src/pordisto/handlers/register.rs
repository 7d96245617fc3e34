use crate::auth::{AuthError, AuthProvider, SignUpRequest};
use crate::db::users::User;
use crate::pordisto::handlers::envelope;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Fixed registration reply; the verification link itself is mailed by the
/// provider.
const REGISTERED_MESSAGE: &str =
    "Account created successfully. Check your email for verification link";

#[utoipa::path(
    post,
    path= "/api/v1/register",
    request_body = SignUpRequest,
    responses (
        (status = 201, description = "Registration successful", body = [User], content_type = "application/json"),
        (status = 422, description = "User with the specified email already exists"),
    ),
    tag= "auth"
)]
// axum handler for registration
pub async fn register(
    provider: Extension<Arc<dyn AuthProvider>>,
    payload: Option<Json<SignUpRequest>>,
) -> Result<Response, AuthError> {
    let request: SignUpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return Ok((StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response()),
    };

    debug!("sign-up: {}", request.email);

    let response = provider.sign_up(&request).await?;

    Ok(envelope(&response, REGISTERED_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{LoginRequest, ProviderError, ProviderResponse, VerifyEmailQuery};
    use async_trait::async_trait;
    use axum::http::HeaderMap;
    use serde_json::json;

    struct StubProvider(fn() -> Result<ProviderResponse, AuthError>);

    #[async_trait]
    impl AuthProvider for StubProvider {
        async fn sign_up(&self, _payload: &SignUpRequest) -> Result<ProviderResponse, AuthError> {
            (self.0)()
        }

        async fn login(&self, _credentials: &LoginRequest) -> Result<ProviderResponse, AuthError> {
            (self.0)()
        }

        async fn verify_email(
            &self,
            _query: &VerifyEmailQuery,
        ) -> Result<ProviderResponse, AuthError> {
            (self.0)()
        }
    }

    fn provider(stub: fn() -> Result<ProviderResponse, AuthError>) -> Extension<Arc<dyn AuthProvider>> {
        Extension(Arc::new(StubProvider(stub)) as Arc<dyn AuthProvider>)
    }

    fn sign_up_request() -> SignUpRequest {
        serde_json::from_value(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "phone": "08012345678",
            "password": "hunter2hunter2"
        }))
        .expect("payload")
    }

    #[tokio::test]
    async fn missing_payload_is_bad_request() {
        let response = register(
            provider(|| {
                Ok(ProviderResponse {
                    status: 201,
                    headers: HeaderMap::new(),
                    user: json!({}),
                })
            }),
            None,
        )
        .await
        .expect("response")
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn mirrors_provider_status() {
        let response = register(
            provider(|| {
                Ok(ProviderResponse {
                    status: 201,
                    headers: HeaderMap::new(),
                    user: json!({ "id": "u_1" }),
                })
            }),
            Some(Json(sign_up_request())),
        )
        .await
        .expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn provider_error_bubbles_to_the_generic_renderer() {
        let result = register(
            provider(|| {
                Err(AuthError::Provider(ProviderError {
                    status: 409,
                    headers: HeaderMap::new(),
                    message: "User already exists".to_string(),
                }))
            }),
            Some(Json(sign_up_request())),
        )
        .await;

        assert!(matches!(
            result,
            Err(AuthError::Provider(ProviderError { status: 409, .. }))
        ));
    }
}
