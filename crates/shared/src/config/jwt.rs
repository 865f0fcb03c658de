//! Client-side token inspection.
//!
//! Decoded claims are advisory: they drive UX decisions such as dropping an
//! expired session at startup. They are never an authorization boundary, the
//! identity provider re-checks every request on its side.

use crate::errors::TokenError;
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, deserialize_with = "numeric_date")]
    pub exp: Option<f64>,

    #[serde(default, deserialize_with = "numeric_date")]
    pub iat: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// NumericDate may carry a fractional part. Anything that is not a number
/// reads as absent.
fn numeric_date<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64).filter(|n| n.is_finite()))
}

fn seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / 1000.0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenInspector;

impl TokenInspector {
    /// Decode without verifying the signature. Malformed input yields `None`.
    pub fn decode(token: &str) -> Option<TokenClaims> {
        match Self::try_decode(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!("Ignoring unreadable token: {e}");
                None
            }
        }
    }

    fn try_decode(token: &str) -> Result<TokenClaims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Malformed("empty token".to_string()));
        }

        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims)
    }

    pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
        Self::decode(token)
            .and_then(|claims| claims.exp)
            .and_then(|exp| DateTime::from_timestamp_millis((exp * 1000.0).floor() as i64))
    }

    pub fn is_expired(token: &str) -> bool {
        Self::is_expired_at(token, Utc::now())
    }

    /// Fail-closed: no readable `exp` claim counts as expired.
    pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
        match Self::decode(token).and_then(|claims| claims.exp) {
            Some(exp) => exp <= seconds(now),
            None => true,
        }
    }
}
