/*
 * Responsibility
 * - GET /articles/{id}
 * - bearer middleware を通過したリクエストのみ到達する (AuthCtx を受け取る)
 */
use axum::{Json, extract::Path};

use crate::{
    api::v1::{dto::articles::ArticleResponse, extractors::AuthCtxExtractor},
    error::{AppError, ErrorResponse},
    repos::article_repo,
};

/// 記事を ID で取得する。
#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = String, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article found", body = ArticleResponse),
        (status = 401, description = "Missing, malformed or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "articles"
)]
pub async fn get_article(
    AuthCtxExtractor(auth): AuthCtxExtractor,
    Path(id): Path<String>,
) -> Result<Json<ArticleResponse>, AppError> {
    tracing::debug!(username = %auth.username, article_id = %id, "article lookup");

    let row = article_repo::find_by_id(&id).ok_or(AppError::not_found("article"))?;

    Ok(Json(ArticleResponse::from(row)))
}
