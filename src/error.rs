/*
 * Responsibility
 * - アプリ共通のエラー定義 (AppError / AuthError)
 * - IntoResponse 実装 (HTTP status + JSON body `{"error": "<message>"}`)
 * - 認証失敗は 3 種類のメッセージだけを返し、検証の詳細 (署名/alg/exp) は外に出さない
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable reason
    #[schema(example = "article not found")]
    pub error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Bearer 認証の失敗理由。
///
/// いずれも 401 で、リトライ不可。
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization header not found")]
    MissingCredentials,
    #[error("invalid authorization header format")]
    MalformedCredentials,
    // bad signature / disallowed alg / expired / parse error はすべてここに寄せる
    #[error("invalid token")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized(auth) => auth.into_response(),
            AppError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(self.to_string()))).into_response()
            }
        }
    }
}
