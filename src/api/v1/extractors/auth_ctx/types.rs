/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - TokenVerifier が検証に成功したときだけ生成される (middleware が extensions に格納)
 *
 * Notes
 * - JWT の検証ロジックは services/auth 側の責務
 * - ここは「型（契約）」として固定化する
 */
use chrono::{DateTime, Utc};

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `username` はトークンの `username` claim (主体の識別子)
/// - `jti` / `issued_at` / `expires_at` は監査・ログ相関用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub username: String,
    pub jti: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthCtx {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            jti: None,
            issued_at: None,
            expires_at: None,
        }
    }
}
