//! Port for issuing and verifying bearer tokens.
//!
//! Tokens are opaque to the rest of the domain. Adapters decide the wire
//! format and signing scheme; callers only see a [`TokenSubject`].

use crate::domain::{Role, TokenSubject, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised while encoding or decoding tokens.
    pub enum TokenCodecError {
        /// Signature, structure, or claims were not acceptable.
        Invalid { message: String } => "token rejected: {message}",
        /// The token carried an expiry that has passed.
        Expired => "token expired",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a token for an account, valid for the standard lifetime.
    fn issue(&self, user_id: &UserId, role: Role) -> Result<String, TokenCodecError>;

    /// Verify signature and expiry, returning who the token speaks for.
    fn verify(&self, token: &str) -> Result<TokenSubject, TokenCodecError>;
}
