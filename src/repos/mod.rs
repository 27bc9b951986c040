/*
 * Responsibility
 * - データ取得層。永続化はせず、固定のカタログを返す
 */
pub mod article_repo;
