/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::token_verifier::{TokenVerifier, VerifierOptions};

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    let verifier = TokenVerifier::new(
        &config.jwt_secret,
        VerifierOptions {
            issuer: config.auth_issuer.clone(),
            audience: config.auth_audience.clone(),
            leeway_seconds: config.access_token_leeway_seconds,
        },
    );

    tracing::info!(
        issuer = ?config.auth_issuer,
        audience = ?config.auth_audience,
        leeway_seconds = config.access_token_leeway_seconds,
        "token verifier ready"
    );

    Arc::new(verifier)
}
