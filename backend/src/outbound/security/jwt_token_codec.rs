//! HS256 bearer tokens via `jsonwebtoken`.
//!
//! Expiry is checked against the injected clock rather than the system time,
//! so the library's own `exp` validation is disabled. Tokens issued before
//! staff accounts existed carry only a `username` claim. They are still
//! accepted and map to [`TokenSubject::Legacy`].

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{TokenCodec, TokenCodecError};
use crate::domain::{Role, RoleParseError, TokenSubject, UserId, token_lifetime};

use super::TokenSecret;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    pub fn new(secret: &TokenSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }

    fn check_expiry(&self, exp: i64) -> Result<(), TokenCodecError> {
        if self.clock.utc().timestamp() >= exp {
            Err(TokenCodecError::expired())
        } else {
            Ok(())
        }
    }

    fn account_subject(
        &self,
        user_id: &str,
        claims: &Claims,
    ) -> Result<TokenSubject, TokenCodecError> {
        let exp = claims
            .exp
            .ok_or_else(|| TokenCodecError::invalid("account token without expiry"))?;
        self.check_expiry(exp)?;
        let user_id: UserId = user_id
            .parse()
            .map_err(|_| TokenCodecError::invalid("malformed subject id"))?;
        let role: Role = claims
            .role
            .as_deref()
            .ok_or_else(|| TokenCodecError::invalid("missing role"))?
            .parse()
            .map_err(|err: RoleParseError| TokenCodecError::invalid(err.to_string()))?;
        Ok(TokenSubject::Account { user_id, role })
    }
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenCodecError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenCodecError::expired(),
        ErrorKind::InvalidSignature => TokenCodecError::invalid("bad signature"),
        _ => TokenCodecError::invalid(error.to_string()),
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: &UserId, role: Role) -> Result<String, TokenCodecError> {
        let now = self.clock.utc();
        let claims = Claims {
            user_id: Some(user_id.to_string()),
            username: None,
            role: Some(role.as_str().to_owned()),
            iat: Some(now.timestamp()),
            exp: Some((now + token_lifetime()).timestamp()),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenCodecError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenSubject, TokenCodecError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(map_decode_error)?
            .claims;
        let subject = match (&claims.user_id, &claims.username) {
            (Some(user_id), _) => self.account_subject(user_id, &claims)?,
            (None, Some(username)) => {
                if let Some(exp) = claims.exp {
                    self.check_expiry(exp)?;
                }
                TokenSubject::Legacy {
                    username: username.clone(),
                }
            }
            (None, None) => return Err(TokenCodecError::invalid("token carries no subject")),
        };
        debug!(role = %subject.role(), "bearer token verified");
        Ok(subject)
    }
}
