use crate::auth::{
    verification::{classify_verification_error, VerificationOutcome, DEFAULT_VERIFY_ERROR},
    AuthError, AuthProvider, ProviderError, VerifyEmailQuery,
};
use crate::db::users::User;
use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

const VERIFIED_MESSAGE: &str = "Email verified successfully";

#[utoipa::path(
    get,
    path= "/api/v1/verify-email",
    params(VerifyEmailQuery),
    responses (
        (status = 200, description = "Email verified", body = [User], content_type = "application/json"),
        (status = 400, description = "Verification failed, the message carries the reason code"),
    ),
    tag= "auth"
)]
// axum handler for the emailed verification link
pub async fn verify_email(
    provider: Extension<Arc<dyn AuthProvider>>,
    query: Option<Query<VerifyEmailQuery>>,
) -> Result<Response, AuthError> {
    let query: VerifyEmailQuery = match query {
        Some(Query(query)) => query,
        None => return Ok((StatusCode::BAD_REQUEST, "Missing token".to_string()).into_response()),
    };

    match provider.verify_email(&query).await {
        Ok(response) => {
            // A provider reply without a usable status has not verified
            // anything.
            if response.status == 0 {
                return Err(AuthError::Provider(ProviderError::bad_request(
                    DEFAULT_VERIFY_ERROR,
                )));
            }

            Ok((
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": VERIFIED_MESSAGE,
                    "data": response.user,
                })),
            )
                .into_response())
        }

        Err(AuthError::Provider(error)) => match classify_verification_error(&error.headers) {
            VerificationOutcome::AlreadyVerified => {
                debug!("verification link already consumed, provider sent a session");

                Ok((
                    StatusCode::OK,
                    Json(json!({ "success": true, "message": VERIFIED_MESSAGE })),
                )
                    .into_response())
            }

            VerificationOutcome::Failed(reason) => Err(AuthError::Provider(ProviderError {
                status: error.status,
                headers: HeaderMap::new(),
                message: reason,
            })),
        },

        // Not provider-shaped, so not a verification failure: let it travel
        // untouched to the generic renderer.
        Err(error) => Err(error),
    }
}
