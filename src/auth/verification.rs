//! Decides what an email-verification failure from the provider means.
//!
//! The provider signals "this link was already consumed" by answering the
//! failed verification with a fresh session cookie. Anything else is a
//! genuine failure whose reason hides in the redirect `location` header.

use axum::http::{
    header::{LOCATION, SET_COOKIE},
    HeaderMap,
};

/// Session cookie the provider sets when the email is already verified.
pub const SESSION_TOKEN_COOKIE: &str = "better-auth.session_token";

/// Fallback message when no reason can be extracted from the headers.
pub const DEFAULT_VERIFY_ERROR: &str = "Error verifying email";

/// Outcome of inspecting a provider verification error.
#[derive(Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The provider answered with a session cookie: the address is verified,
    /// report success to the caller.
    AlreadyVerified,
    /// Genuine failure, carrying the reason code to surface.
    Failed(String),
}

/// Classify a provider verification error by its response headers.
#[must_use]
pub fn classify_verification_error(headers: &HeaderMap) -> VerificationOutcome {
    if has_session_cookie(headers) {
        VerificationOutcome::AlreadyVerified
    } else {
        VerificationOutcome::Failed(reason_code(headers))
    }
}

fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers.get_all(SET_COOKIE).iter().any(|value| {
        value
            .to_str()
            .is_ok_and(|cookie| cookie.contains(SESSION_TOKEN_COOKIE))
    })
}

/// Reason code from a redirect `location` header: second `=`-segment,
/// upper-cased. A header without `=` falls back to the same default as a
/// missing header.
fn reason_code(headers: &HeaderMap) -> String {
    headers
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|location| location.split('=').nth(1))
        .map_or_else(|| DEFAULT_VERIFY_ERROR.to_string(), str::to_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(entries: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).expect("header name"),
                HeaderValue::from_str(value).expect("header value"),
            );
        }
        map
    }

    #[test]
    fn session_cookie_means_already_verified() {
        let headers = headers(&[("set-cookie", "better-auth.session_token=abc; Path=/")]);

        assert_eq!(
            classify_verification_error(&headers),
            VerificationOutcome::AlreadyVerified
        );
    }

    #[test]
    fn session_cookie_found_among_other_cookies() {
        let headers = headers(&[
            ("set-cookie", "csrf=zzz; Path=/"),
            ("set-cookie", "better-auth.session_token=abc; HttpOnly"),
        ]);

        assert_eq!(
            classify_verification_error(&headers),
            VerificationOutcome::AlreadyVerified
        );
    }

    #[test]
    fn unrelated_cookie_is_a_failure() {
        let headers = headers(&[
            ("set-cookie", "csrf=zzz; Path=/"),
            ("location", "/verify?error=token_expired"),
        ]);

        assert_eq!(
            classify_verification_error(&headers),
            VerificationOutcome::Failed("TOKEN_EXPIRED".to_string())
        );
    }

    #[test]
    fn reason_code_is_uppercased() {
        let headers = headers(&[("location", "/verify?error=invalid_token")]);

        assert_eq!(
            classify_verification_error(&headers),
            VerificationOutcome::Failed("INVALID_TOKEN".to_string())
        );
    }

    #[test]
    fn missing_location_falls_back_to_default() {
        let headers = HeaderMap::new();

        assert_eq!(
            classify_verification_error(&headers),
            VerificationOutcome::Failed(DEFAULT_VERIFY_ERROR.to_string())
        );
    }

    #[test]
    fn location_without_separator_falls_back_to_default() {
        let headers = headers(&[("location", "/verify/failed")]);

        assert_eq!(
            classify_verification_error(&headers),
            VerificationOutcome::Failed(DEFAULT_VERIFY_ERROR.to_string())
        );
    }

    #[test]
    fn only_the_second_segment_is_taken() {
        let headers = headers(&[("location", "/verify?error=bad_token&retry=1")]);

        assert_eq!(
            classify_verification_error(&headers),
            VerificationOutcome::Failed("BAD_TOKEN&RETRY".to_string())
        );
    }
}
