use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::infrastructure::observability::mask_token;
use crate::presentation::state::AppState;

use super::envelope::ApiError;

/// Rejects requests without a valid `Authorization: Bearer` token before any
/// handler runs. On success the resolved user is stored as a request extension.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .filter(|t| !t.is_empty())
        .map(String::from);

    let Some(token) = token else {
        tracing::debug!("Request without bearer token");
        return ApiError::unauthorized("Missing access token").into_response();
    };

    match state.token_verifier.verify(&token).await {
        Ok(user) => {
            tracing::debug!(user = %user.username, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(token = %mask_token(&token), error = %e, "Rejected access token");
            ApiError::unauthorized(e.to_string()).into_response()
        }
    }
}

/// Extracts the credential from `Bearer <token>`. The scheme is matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then_some(token.trim())
}
