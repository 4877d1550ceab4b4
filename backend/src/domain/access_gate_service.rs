//! Bearer-token access gate backed by the token codec and the account store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ports::{AccessGate, TokenCodec, UserRepository};
use super::{Error, INACTIVE_USER_MESSAGE, INVALID_TOKEN_MESSAGE, Identity, TokenSubject};

/// Resolves tokens into identities, re-checking the account on every call.
///
/// Account tokens always hit the store so a deactivated user is locked out
/// even while their token is still within its lifetime. Legacy username
/// tokens resolve to an admin identity without a lookup.
#[derive(Clone)]
pub struct TokenAccessGate {
    codec: Arc<dyn TokenCodec>,
    users: Arc<dyn UserRepository>,
}

impl TokenAccessGate {
    pub fn new(codec: Arc<dyn TokenCodec>, users: Arc<dyn UserRepository>) -> Self {
        Self { codec, users }
    }
}

#[async_trait]
impl AccessGate for TokenAccessGate {
    async fn resolve(&self, token: &str) -> Result<Identity, Error> {
        let subject = self.codec.verify(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            Error::unauthorized(INVALID_TOKEN_MESSAGE)
        })?;

        match subject {
            TokenSubject::Legacy { username } => Ok(Identity::Legacy { username }),
            TokenSubject::Account { user_id, .. } => {
                let user = self.users.find_by_id(&user_id).await?;
                match user {
                    Some(user) if user.is_active => Ok(Identity::Staff(user)),
                    _ => {
                        debug!(%user_id, "token subject missing or inactive");
                        Err(Error::unauthorized(INACTIVE_USER_MESSAGE))
                    }
                }
            }
        }
    }
}
