//! Bearer token issuance: compact HS256 JWT signed with the client app's secret.

use crate::domain::{App, User};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use thiserror::Error;

/// `{"alg":"HS256","typ":"JWT"}`
const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("encode claims: {0}")]
    Claims(#[from] serde_json::Error),

    #[error("signing key: {0}")]
    Key(#[from] InvalidLength),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TokenClaims {
    uid: i64,
    email: String,
    app_id: i32,
    /// Expiry, unix seconds.
    exp: i64,
}

/// Issue a token for `user` on `app`, valid for `ttl` from now.
pub fn issue_token(user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
    issue_token_at(user, app, ttl, Utc::now())
}

fn issue_token_at(
    user: &User,
    app: &App,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    let claims = TokenClaims {
        uid: user.id,
        email: user.email.clone(),
        app_id: app.id,
        exp: now.timestamp().saturating_add(ttl_secs),
    };

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(HEADER),
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
    );
    let mut mac = Hmac::<Sha256>::new_from_slice(app.secret.as_bytes())?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}
