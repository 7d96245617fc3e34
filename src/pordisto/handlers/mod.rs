pub mod health;
pub use self::health::health;

pub mod register;
pub use self::register::register;

pub mod login;
pub use self::login::login;

pub mod verify_email;
pub use self::verify_email::verify_email;

// common helpers for the handlers
use crate::auth::ProviderResponse;
use axum::{
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Shape a provider response into the service envelope: provider status,
/// forwarded session cookies, `{message, data: user}` body.
pub(crate) fn envelope(response: &ProviderResponse, message: &str) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        forwarded_cookies(&response.headers),
        Json(json!({ "message": message, "data": response.user })),
    )
        .into_response()
}

/// Copy every `set-cookie` the provider produced onto the outbound reply.
fn forwarded_cookies(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();

    for cookie in headers.get_all(SET_COOKIE) {
        forwarded.append(SET_COOKIE, cookie.clone());
    }

    forwarded
}

// axum fallback for unmatched routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::Value;

    fn provider_response() -> ProviderResponse {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("better-auth.session_token=abc; Path=/; HttpOnly"),
        );
        headers.append(SET_COOKIE, HeaderValue::from_static("csrf=zzz; Path=/"));
        headers.append(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/html"),
        );

        ProviderResponse {
            status: 201,
            headers,
            user: json!({ "id": "u_1", "email": "jane@example.com" }),
        }
    }

    #[tokio::test]
    async fn envelope_mirrors_status_and_user() {
        let response = envelope(&provider_response(), "Account created");

        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");

        assert_eq!(body["message"], json!("Account created"));
        assert_eq!(body["data"]["email"], json!("jane@example.com"));
    }

    #[test]
    fn envelope_forwards_every_cookie_and_nothing_else() {
        let response = envelope(&provider_response(), "ok");

        let cookies: Vec<_> = response.headers().get_all(SET_COOKIE).iter().collect();
        assert_eq!(cookies.len(), 2);

        // The provider's own content-type must not leak through; the
        // envelope body is this service's JSON.
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn not_found_is_enveloped() {
        let response = not_found().await.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");

        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Route not found"));
    }
}
