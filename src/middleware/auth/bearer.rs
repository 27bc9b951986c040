//! Bearer token (HMAC JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - 失敗時は 401 + `{"error": "..."}` を返し、後続の handler は実行しない
//! - 成功時は `AuthCtx` を request extensions に格納し、handler は `AuthCtxExtractor` で受け取る

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AuthError;
use crate::state::AppState;

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::bearer::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, bearer_middleware))
}

async fn bearer_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            tracing::warn!("authorization header is not valid ascii");
            AuthError::MalformedCredentials
        })?),
        None => None,
    };

    let auth_ctx = match state.verifier.authenticate(authorization) {
        Ok(ctx) => ctx,
        Err(err) => {
            // 検証失敗の詳細は TokenVerifier 側で warn 済み
            tracing::debug!(
                reason = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected by bearer auth"
            );
            return Err(err);
        }
    };

    tracing::debug!(
        username = %auth_ctx.username,
        jti = ?auth_ctx.jti,
        issued_at = ?auth_ctx.issued_at,
        expires_at = ?auth_ctx.expires_at,
        "request admitted"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
