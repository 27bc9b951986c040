/*
 * Responsibility
 * - handler 引数として使う extractor の公開口
 */
pub mod auth_ctx;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
