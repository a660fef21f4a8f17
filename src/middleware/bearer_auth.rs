/*
 * Responsibility
 * - Bearer トークンの検証 (ヘッダ抽出 → 検証 → 拒否)
 * - 成功時に、認証済み主体 (Identity) を request extensions に載せる
 * - 失敗時は 401 で短絡し、後段 (handler) は実行しない
 */
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::Identity;
use crate::error::AppError;
use crate::services::auth::TokenVerifier;
use crate::state::AppState;

/// `/api/*` に認証を掛けるための middleware を適用する。
///
/// Routes (and the fallback) must already be registered on `router`;
/// `Router::layer` only wraps what exists at call time.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, bearer_middleware))
}

/// Pull the credential out of `Authorization: <scheme> <token>`.
///
/// The header is split on single spaces and the second segment is the
/// credential. The scheme word itself is not inspected, and an empty second
/// segment (`"Bearer "`) counts as no credential.
pub fn extract_credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(' ').nth(1))
        .filter(|token| !token.is_empty())
}

/// Extract + verify. `Ok` means continue with the identity, `Err` is the response to send.
pub fn authenticate(headers: &HeaderMap, verifier: &TokenVerifier) -> Result<Identity, AppError> {
    let token = extract_credential(headers).ok_or(AppError::MissingCredential)?;

    match verifier.verify(token) {
        Ok(claims) => Ok(Identity::new(claims)),
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            Err(AppError::InvalidCredential)
        }
    }
}

async fn bearer_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match authenticate(req.headers(), &state.verifier) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::debug!(path = %req.uri().path(), "rejecting unauthenticated request");
            return Err(err);
        }
    };

    tracing::debug!(sub = ?identity.claims.sub(), "request authenticated");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
