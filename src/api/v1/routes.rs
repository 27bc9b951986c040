/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - Bearer 認証は app.rs 側で v1 全体に掛ける (ここでは掛けない)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::articles::get_article;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/articles/{id}", get(get_article))
}
