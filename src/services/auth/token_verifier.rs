use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::api::v1::extractors::AuthCtx;
use crate::config::JwtSecret;
use crate::error::AuthError;

pub const BEARER_PREFIX: &str = "Bearer ";

/// 受け入れる署名アルゴリズム (HMAC family のみ)。
/// `none` や RS/ES/PS/EdDSA はヘッダに書かれていても decode 前に弾かれる。
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Access token (JWT) claims.
///
/// NOTE:
/// - `username` だけが必須。
/// - `iss` / `aud` / `nbf` は jsonwebtoken の Validation が raw payload 側で検証するので、ここには持たない。
/// - `exp` / `iat` は NumericDate。小数 (`1.9e9` など) も受け、秒に切り捨てる。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,

    #[serde(
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<u64>,
    #[serde(
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

fn numeric_date<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(Some(seconds.trunc() as u64)),
        Some(seconds) => Err(serde::de::Error::custom(format!(
            "invalid NumericDate: {seconds}"
        ))),
    }
}

/// 検証失敗の内部理由。ログにだけ出し、クライアントには `AuthError::InvalidToken` しか返さない。
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty 'username' claim")]
    EmptyUsername,
}

#[derive(Debug, Clone, Default)]
pub struct VerifierOptions {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

/// HMAC (HS256/384/512) bearer-token verifier.
///
/// - 構築後は immutable。`Arc` で共有して並行に呼んでよい。
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &JwtSecret, options: VerifierOptions) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = options.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;

        // exp/nbf は「あれば検証」。iss/aud は設定されたときだけ必須にする。
        validation.required_spec_claims.clear();

        if let Some(issuer) = &options.issuer {
            validation.set_issuer(&[issuer]);
            validation.required_spec_claims.insert("iss".to_string());
        }

        match &options.audience {
            Some(audience) => {
                validation.set_audience(&[audience]);
                validation.required_spec_claims.insert("aud".to_string());
            }
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature + alg + temporal claims, then decode the claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, VerificationError> {
        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.username.trim().is_empty() {
            return Err(VerificationError::EmptyUsername);
        }

        Ok(data.claims)
    }

    /// `Authorization` ヘッダの生の値から認証済みコンテキストを作る。
    ///
    /// 1. ヘッダなし / 空 → `MissingCredentials`
    /// 2. `"Bearer "` で始まらない → `MalformedCredentials`
    /// 3. 署名・alg・exp/nbf・claims の検証失敗 → `InvalidToken`
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AuthCtx, AuthError> {
        let token = extract_bearer_token(authorization)?;

        let claims = self.verify(token).map_err(|err| {
            tracing::warn!(error = %err, "access token verification failed");
            AuthError::InvalidToken
        })?;

        Ok(AuthCtx {
            jti: claims.jti,
            issued_at: claims.iat.and_then(to_datetime),
            expires_at: claims.exp.and_then(to_datetime),
            ..AuthCtx::new(claims.username)
        })
    }
}

/// `"Bearer <token>"` から token 部分を取り出す。
///
/// `"Bearer "` ちょうどの場合は空の token を返す (malformed 扱いにはしない)。
pub fn extract_bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization
        .filter(|h| !h.is_empty())
        .ok_or(AuthError::MissingCredentials)?;

    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedCredentials)
}

fn to_datetime(seconds: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(seconds).ok()?, 0)
}
