/*!
 * 認証済みコンテキスト (AuthCtx) と、それを handler に渡す extractor
 *
 * - AuthCtx: TokenVerifier が検証に成功したときだけ作られる
 *   - username (token の `username` claim)
 *   - jti / issued_at / expires_at (監査・ログ相関用)
 * - AuthCtxExtractor: bearer middleware が extensions に入れた AuthCtx を取り出す
 *   (axum 依存は core 側)
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
