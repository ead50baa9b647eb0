//! HS256-signed JSON Web Tokens.
//!
//! Tokens use the compact `header.payload.signature` form with unpadded
//! URL-safe base64 segments. Only the `HS256` algorithm is accepted.

use crate::auth::{
    domain::{AccessToken, TokenClaims},
    ports::{TokenError, TokenIssuer},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";
const TOKEN_TYPE: &str = "JWT";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Token issuer signing claims with a shared secret.
#[derive(Clone)]
pub struct Hs256TokenIssuer {
    secret: Vec<u8>,
}

impl Hs256TokenIssuer {
    /// Creates an issuer for the given signing secret.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| TokenError::Encoding(err.to_string()))
    }
}

impl fmt::Debug for Hs256TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hs256TokenIssuer")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenIssuer for Hs256TokenIssuer {
    fn issue(&self, claims: &TokenClaims) -> Result<AccessToken, TokenError> {
        let header = Header {
            alg: ALGORITHM.to_owned(),
            typ: TOKEN_TYPE.to_owned(),
        };
        let header_json =
            serde_json::to_vec(&header).map_err(|err| TokenError::Encoding(err.to_string()))?;
        let claims_json =
            serde_json::to_vec(claims).map_err(|err| TokenError::Encoding(err.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(AccessToken::new(format!("{signing_input}.{signature}")))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let mut segments = token.trim().split('.');
        let (Some(header_segment), Some(claims_segment), Some(signature_segment), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed("expected three segments".to_owned()));
        };

        let signature = decode_segment(signature_segment)?;
        let mut mac = self.mac()?;
        mac.update(header_segment.as_bytes());
        mac.update(b".");
        mac.update(claims_segment.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let header: Header = serde_json::from_slice(&decode_segment(header_segment)?)
            .map_err(|err| TokenError::Malformed(err.to_string()))?;
        if header.alg != ALGORITHM {
            return Err(TokenError::Malformed(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }

        let claims: TokenClaims = serde_json::from_slice(&decode_segment(claims_segment)?)
            .map_err(|err| TokenError::Malformed(err.to_string()))?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| TokenError::Malformed(err.to_string()))
}
