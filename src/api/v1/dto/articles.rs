/*
 * Responsibility
 * - Articles の response DTO
 */
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::repos::article_repo::ArticleRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Learning Rust and OpenAPI")]
    pub title: String,
    #[schema(example = "The integration is simpler than it looks!")]
    pub content: String,
}

impl From<&ArticleRow> for ArticleResponse {
    fn from(row: &ArticleRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title.to_string(),
            content: row.content.to_string(),
        }
    }
}
