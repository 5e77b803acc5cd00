use axum::{
    extract::{Extension, Request},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::common::ApiError;
use crate::domains::auth::models::phone_fingerprint;
use crate::domains::auth::{JwtService, TokenError};
use crate::server::app::AppState;

/// Authenticated user information from JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub phone_number: String,
}

/// Why a protected request was turned away
#[derive(Debug, thiserror::Error)]
pub enum TokenRejection {
    #[error("Authorization header is required")]
    MissingHeader,

    #[error("Authorization header must use the Bearer scheme")]
    MalformedScheme,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Token does not carry a phone number")]
    MissingIdentity,
}

/// Run the validation steps in order against one request's headers.
///
/// No state is kept between requests.
pub fn authenticate(headers: &HeaderMap, jwt_service: &JwtService) -> Result<AuthUser, TokenRejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(TokenRejection::MissingHeader)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(TokenRejection::MalformedScheme)?;

    let claims = jwt_service.verify_token(token)?;

    if claims.phone_number.trim().is_empty() {
        return Err(TokenRejection::MissingIdentity);
    }

    Ok(AuthUser {
        phone_number: claims.phone_number,
    })
}

/// JWT authentication middleware for protected routes
///
/// Verifies the bearer token and adds AuthUser to request extensions.
/// Requests without a valid token are answered with 401 and never reach the handler.
pub async fn require_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.deps.jwt_service) {
        Ok(user) => {
            debug!(phone = %phone_fingerprint(&user.phone_number), "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(rejection) => {
            debug!(reason = %rejection, "Rejected unauthenticated request");
            ApiError::from(rejection).into_response()
        }
    }
}

/// Admin gate, layered inside `require_auth`
///
/// Only sessions whose phone number is in the configured admin list get through.
pub async fn require_admin(
    Extension(state): Extension<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(user) = request.extensions().get::<AuthUser>() else {
        return ApiError::from(TokenRejection::MissingHeader).into_response();
    };

    if !state.deps.is_admin(&user.phone_number) {
        warn!(phone = %phone_fingerprint(&user.phone_number), "Non-admin session denied");
        return ApiError::Forbidden("Admin access required".to_string()).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "middleware_test_secret_key_0123456789";

    fn jwt_service() -> JwtService {
        JwtService::new(SECRET, "test_issuer".to_string())
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_bearer_token() {
        let jwt_service = jwt_service();
        let token = jwt_service.create_token("+910000000000").unwrap();

        let user = authenticate(&headers_with(&format!("Bearer {}", token)), &jwt_service).unwrap();
        assert_eq!(user.phone_number, "+910000000000");
    }

    #[test]
    fn test_no_auth_header() {
        let result = authenticate(&HeaderMap::new(), &jwt_service());
        assert!(matches!(result, Err(TokenRejection::MissingHeader)));
    }

    #[test]
    fn test_raw_token_without_scheme() {
        let jwt_service = jwt_service();
        let token = jwt_service.create_token("+910000000000").unwrap();

        let result = authenticate(&headers_with(&token), &jwt_service);
        assert!(matches!(result, Err(TokenRejection::MalformedScheme)));
    }

    #[test]
    fn test_empty_bearer() {
        let result = authenticate(&headers_with("Bearer "), &jwt_service());
        assert!(matches!(result, Err(TokenRejection::MalformedScheme)));
    }

    #[test]
    fn test_invalid_token() {
        let result = authenticate(&headers_with("Bearer invalid_token"), &jwt_service());
        assert!(matches!(result, Err(TokenRejection::InvalidToken(_))));
    }

    #[test]
    fn test_token_signed_elsewhere() {
        let other = JwtService::new("some_other_secret_key_0123456789abc", "test_issuer".into());
        let token = other.create_token("+910000000000").unwrap();

        let result = authenticate(&headers_with(&format!("Bearer {}", token)), &jwt_service());
        assert!(matches!(
            result,
            Err(TokenRejection::InvalidToken(TokenError::InvalidSignature))
        ));
    }

    #[test]
    fn test_blank_identity_claim() {
        let jwt_service = jwt_service();
        let token = jwt_service.create_token("   ").unwrap();

        let result = authenticate(&headers_with(&format!("Bearer {}", token)), &jwt_service);
        assert!(matches!(result, Err(TokenRejection::MissingIdentity)));
    }

    #[test]
    fn test_rejection_message_carries_diagnostic() {
        let issued_at = chrono::Utc::now() - chrono::Duration::hours(30);
        let jwt_service = jwt_service();
        let token = jwt_service.create_token_at("+910000000000", issued_at).unwrap();

        let rejection =
            authenticate(&headers_with(&format!("Bearer {}", token)), &jwt_service).unwrap_err();
        assert_eq!(rejection.to_string(), "Invalid token: token expired");
    }
}
