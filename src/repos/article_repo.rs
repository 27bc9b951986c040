/// 記事の固定カタログ (DB なし)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

const ARTICLES: &[ArticleRow] = &[ArticleRow {
    id: "1",
    title: "Learning Rust and OpenAPI",
    content: "The integration is simpler than it looks!",
}];

pub fn find_by_id(id: &str) -> Option<&'static ArticleRow> {
    ARTICLES.iter().find(|article| article.id == id)
}
