/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → 依存生成 (TokenVerifier) → Router 組み立て
 * - Middleware の適用 (Bearer / HTTP / security headers / CORS)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_token_verifier;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,article_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,article_api=debug,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development では即落として気付けるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> AppState {
    // secret はここで一度だけ読み、TokenVerifier に注入する
    AppState::new(build_token_verifier(config))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let v1 = middleware::auth::bearer::apply(api::v1::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .merge(api::openapi::router())
        .nest("/api/v1", v1)
        .with_state(state);

    let router = middleware::http::apply(router, config);
    let router = middleware::http::security_headers(router);
    middleware::cors::apply(router, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v1::dto::articles::ArticleResponse;
    use crate::services::auth::test_support::{
        OTHER_SECRET, SECRET, claims_for, forge, mint, now,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use jsonwebtoken::Algorithm;
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some(SECRET.to_string()),
            _ => None,
        })
        .unwrap();
        build_router(build_state(&config), &config)
    }

    async fn send(uri: &str, authorization: Option<String>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn bearer_for(username: &str) -> Option<String> {
        let token = mint(&claims_for(username, 3600), SECRET, Algorithm::HS256);
        Some(format!("Bearer {token}"))
    }

    #[tokio::test]
    async fn authenticated_request_gets_article() {
        let response = send("/api/v1/articles/1", bearer_for("alice")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let article: ArticleResponse = body_json(response).await;
        assert_eq!(
            article,
            ArticleResponse {
                id: "1".to_string(),
                title: "Learning Rust and OpenAPI".to_string(),
                content: "The integration is simpler than it looks!".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn unknown_article_is_404() {
        let response = send("/api/v1/articles/42", bearer_for("alice")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body, json!({ "error": "article not found" }));
    }

    #[tokio::test]
    async fn article_requires_authentication() {
        let expired = mint(&claims_for("alice", -3600), SECRET, Algorithm::HS256);
        let foreign = mint(&claims_for("alice", 3600), OTHER_SECRET, Algorithm::HS256);
        let unsigned = forge("none", &claims_for("alice", 3600), "");

        let cases = [
            (None, "authorization header not found"),
            (
                Some("Token abc".to_string()),
                "invalid authorization header format",
            ),
            (Some("Bearer ".to_string()), "invalid token"),
            (Some(format!("Bearer {expired}")), "invalid token"),
            (Some(format!("Bearer {foreign}")), "invalid token"),
            (Some(format!("Bearer {unsigned}")), "invalid token"),
        ];

        for (authorization, expected) in cases {
            let response = send("/api/v1/articles/1", authorization.clone()).await;
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "authorization: {authorization:?}"
            );
            let body: serde_json::Value = body_json(response).await;
            assert_eq!(body, json!({ "error": expected }));
        }
    }

    #[tokio::test]
    async fn unknown_article_without_token_is_still_401() {
        let response = send("/api/v1/articles/42", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = send("/health", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn openapi_document_is_public() {
        let response = send("/openapi.json", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let doc: serde_json::Value = body_json(response).await;
        assert!(doc["paths"]["/api/v1/articles/{id}"]["get"].is_object());
        assert_eq!(
            doc["components"]["securitySchemes"]["bearer_auth"]["scheme"],
            "bearer"
        );
    }

    #[tokio::test]
    async fn rejections_carry_security_headers() {
        let response = send("/api/v1/articles/1", None).await;
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn default_config_rejects_recently_expired_token() {
        let token = mint(
            &json!({ "username": "alice", "exp": now() - 30 }),
            SECRET,
            Algorithm::HS256,
        );

        let response = send("/api/v1/articles/1", Some(format!("Bearer {token}"))).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body, json!({ "error": "invalid token" }));
    }

    #[tokio::test]
    async fn swagger_ui_is_public() {
        let response = send("/swagger/", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send("/swagger", None).await;
        assert!(
            response.status().is_success() || response.status().is_redirection(),
            "status: {}",
            response.status()
        );
    }

    #[tokio::test]
    async fn oversized_body_rejection_carries_security_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::CONTENT_LENGTH, "2000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    }
}
