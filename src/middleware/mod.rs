/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::bearer (認証ゲート), http (request-id/trace/limit/timeout/security headers), cors
 */
pub mod auth;
pub mod cors;
pub mod http;
