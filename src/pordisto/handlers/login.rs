use crate::auth::{AuthError, AuthProvider, LoginRequest};
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

const LOGGED_IN_MESSAGE: &str = "User logged in successfully";

#[utoipa::path(
    post,
    path= "/api/v1/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful", body = [User], content_type = "application/json"),
        (status = 401, description = "Unauthorized"),
    ),
    tag= "auth"
)]
// axum handler for login
pub async fn login(
    provider: Extension<Arc<dyn AuthProvider>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Response, AuthError> {
    let credentials: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return Ok((StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response()),
    };

    debug!("login: {}", credentials.email);

    let response = provider.login(&credentials).await?;

    Ok(envelope(&response, LOGGED_IN_MESSAGE))
}
