//! Contract with the external authentication provider.
//!
//! The provider is an opaque capability with three operations: sign-up,
//! login and email verification. Handlers only see this trait plus the
//! response and error shapes below; the concrete HTTP client lives in
//! [`http`].

use async_trait::async_trait;
use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::db::users::{Address, IdentityDocumentType};

pub mod http;
pub mod verification;

pub use self::http::HttpAuthProvider;

/// Registration payload, forwarded to the provider as-is.
///
/// No field is checked here; the provider enforces its own rules and the
/// collection validator guards what it persists.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_document_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_document_type: Option<IdentityDocumentType>,
}

/// Login credentials, forwarded to the provider as-is.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Query parameters of the verification link the provider mailed out.
#[derive(IntoParams, Serialize, Deserialize, Debug)]
#[into_params(parameter_in = Query)]
pub struct VerifyEmailQuery {
    pub token: String,
    #[serde(rename = "callbackURL", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// A completed provider call: HTTP-like status, the raw response headers
/// (session cookies included) and the `user` field of the body.
///
/// A status of 0 means the provider answered without a usable status.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub user: Value,
}

/// A provider-shaped failure: status plus the headers the provider attached.
#[derive(Debug)]
pub struct ProviderError {
    pub status: u16,
    pub headers: HeaderMap,
    pub message: String,
}

impl ProviderError {
    #[must_use]
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST.as_u16(),
            headers: HeaderMap::new(),
            message: message.to_string(),
        }
    }
}

/// Everything a handler can fail with.
///
/// Only `Provider` is part of the verification-translation flow; `Internal`
/// always travels untouched to the generic rendering below.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("provider error: {}", .0.message)]
    Provider(ProviderError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Internal(error.into())
    }
}

// Generic catch-all rendering: provider errors keep their status and
// message, anything else becomes an opaque 500.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Provider(provider_error) => {
                let status = StatusCode::from_u16(provider_error.status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

                (
                    status,
                    Json(json!({ "success": false, "message": provider_error.message })),
                )
                    .into_response()
            }

            Self::Internal(error) => {
                error!("Unhandled error: {error:?}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// The external authentication service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, payload: &SignUpRequest) -> Result<ProviderResponse, AuthError>;

    async fn login(&self, credentials: &LoginRequest) -> Result<ProviderResponse, AuthError>;

    async fn verify_email(&self, query: &VerifyEmailQuery) -> Result<ProviderResponse, AuthError>;
}
