//! Credential and token adapters: HS256 bearer tokens, argon2id password
//! hashes, and loading of the token signing secret.

mod argon2_password_hasher;
mod jwt_token_codec;
mod token_secret;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_codec::JwtTokenCodec;
pub use token_secret::{
    BuildMode, TOKEN_SECRET_ENV, TOKEN_SECRET_FILE_ENV, TokenSecret, TokenSecretError,
    token_secret_from_env,
};
