//! Token minting / forging helpers shared by the unit tests.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use crate::config::JwtSecret;
use crate::services::auth::token_verifier::{TokenVerifier, VerifierOptions};
use crate::state::AppState;

pub const SECRET: &str = "test-secret-for-unit-tests";
pub const OTHER_SECRET: &str = "some-other-secret";

pub fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

pub fn secret(raw: &str) -> JwtSecret {
    JwtSecret::new(raw).unwrap()
}

pub fn verifier() -> TokenVerifier {
    TokenVerifier::new(&secret(SECRET), VerifierOptions::default())
}

pub fn state() -> AppState {
    AppState::new(std::sync::Arc::new(verifier()))
}

/// `username` + `exp = now + exp_offset_seconds` (負なら期限切れ)
pub fn claims_for(username: &str, exp_offset_seconds: i64) -> Value {
    let exp = now() as i64 + exp_offset_seconds;
    json!({
        "username": username,
        "iat": now(),
        "exp": exp,
        "jti": uuid::Uuid::new_v4().to_string(),
    })
}

/// Sign claims the way a trusted issuer would.
pub fn mint(claims: &Value, secret: &str, alg: Algorithm) -> String {
    let mut header = Header::new(alg);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

/// Assemble a token by hand with an arbitrary `alg` header (e.g. `none`, `RS256`).
pub fn forge(alg: &str, claims: &Value, signature: &str) -> String {
    let header = json!({ "alg": alg, "typ": "JWT" });
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string()),
        signature
    )
}
