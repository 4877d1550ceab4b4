//! Loading of the HS256 signing secret.
//!
//! The secret comes from `JWT_SECRET`, or from the file named by
//! `JWT_SECRET_FILE` when the variable is unset. Debug builds without either
//! fall back to a random per-process secret, so tokens do not survive a
//! restart.

use std::fmt;
use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroizing;

pub const TOKEN_SECRET_ENV: &str = "JWT_SECRET";
pub const TOKEN_SECRET_FILE_ENV: &str = "JWT_SECRET_FILE";
/// Shortest secret accepted in release builds.
const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

/// Build mode used to decide whether missing secrets are tolerated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clinic_backend::outbound::security::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenSecretError {
    #[error("set {TOKEN_SECRET_ENV} or {TOKEN_SECRET_FILE_ENV} to sign access tokens")]
    Missing,
    #[error("failed to read token secret at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token secret too short: need >= {min_len} bytes, got {length}")]
    TooShort { length: usize, min_len: usize },
}

/// Signing secret bytes, wiped on drop.
#[derive(Clone)]
pub struct TokenSecret {
    bytes: Zeroizing<Vec<u8>>,
}

impl TokenSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }

    /// Random secret for development runs.
    pub fn ephemeral() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Short hex digest safe to log when comparing deployments.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

fn trim_secret(mut bytes: Vec<u8>) -> Vec<u8> {
    while bytes.last().is_some_and(u8::is_ascii_whitespace) {
        bytes.pop();
    }
    bytes
}

fn checked(bytes: Vec<u8>, mode: BuildMode) -> Result<TokenSecret, TokenSecretError> {
    let secret = TokenSecret::new(bytes);
    let length = secret.as_bytes().len();
    if length == 0 {
        return Err(TokenSecretError::Missing);
    }
    if length < TOKEN_SECRET_MIN_LEN {
        if mode == BuildMode::Release {
            return Err(TokenSecretError::TooShort {
                length,
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
        warn!(length, "token secret shorter than recommended");
    }
    Ok(secret)
}

/// Resolve the token secret from the environment.
///
/// # Errors
///
/// Release builds fail when no secret is configured or it is too short. A
/// named secret file that cannot be read fails in every build mode.
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenSecretError> {
    let secret = if let Some(value) = env.string(TOKEN_SECRET_ENV).filter(|v| !v.is_empty()) {
        checked(value.into_bytes(), mode)?
    } else if let Some(path) = env.string(TOKEN_SECRET_FILE_ENV) {
        let path = PathBuf::from(path);
        let bytes = std::fs::read(&path).map_err(|source| TokenSecretError::Read {
            path: path.clone(),
            source,
        })?;
        checked(trim_secret(bytes), mode)?
    } else if mode == BuildMode::Debug {
        warn!("no token secret configured; using a temporary one (dev only)");
        TokenSecret::ephemeral()
    } else {
        return Err(TokenSecretError::Missing);
    };
    info!(fingerprint = %secret.fingerprint(), "token secret loaded");
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    const LONG_SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[rstest]
    #[case(BuildMode::Debug)]
    #[case(BuildMode::Release)]
    fn variable_wins_over_file(#[case] mode: BuildMode) {
        let env = mock_env(&[
            (TOKEN_SECRET_ENV, LONG_SECRET),
            (TOKEN_SECRET_FILE_ENV, "/nonexistent/secret"),
        ]);
        let secret = token_secret_from_env(&env, mode).expect("secret");
        assert_eq!(secret.as_bytes(), LONG_SECRET.as_bytes());
    }

    #[rstest]
    fn file_contents_are_trimmed() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{LONG_SECRET}").expect("write secret");
        let path = file.path().to_str().expect("utf-8 path").to_owned();
        let env = mock_env(&[(TOKEN_SECRET_FILE_ENV, path.as_str())]);
        let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret");
        assert_eq!(secret.as_bytes(), LONG_SECRET.as_bytes());
    }

    #[rstest]
    fn unreadable_file_fails_even_in_debug() {
        let env = mock_env(&[(TOKEN_SECRET_FILE_ENV, "/nonexistent/secret")]);
        let err = token_secret_from_env(&env, BuildMode::Debug).expect_err("read failure");
        assert!(matches!(err, TokenSecretError::Read { .. }));
    }

    #[rstest]
    fn debug_builds_fall_back_to_ephemeral_secrets() {
        let env = mock_env(&[]);
        let first = token_secret_from_env(&env, BuildMode::Debug).expect("secret");
        let second = token_secret_from_env(&env, BuildMode::Debug).expect("secret");
        assert_eq!(first.as_bytes().len(), EPHEMERAL_SECRET_LEN);
        assert_ne!(first.fingerprint(), second.fingerprint());
    }

    #[rstest]
    fn release_builds_require_a_secret() {
        let env = mock_env(&[]);
        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("missing");
        assert!(matches!(err, TokenSecretError::Missing));
    }

    #[rstest]
    #[case(BuildMode::Debug, true)]
    #[case(BuildMode::Release, false)]
    fn short_secrets_only_pass_in_debug(#[case] mode: BuildMode, #[case] accepted: bool) {
        let env = mock_env(&[(TOKEN_SECRET_ENV, "short")]);
        assert_eq!(token_secret_from_env(&env, mode).is_ok(), accepted);
    }

    #[rstest]
    fn debug_output_hides_the_secret() {
        let secret = TokenSecret::new(LONG_SECRET);
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains(LONG_SECRET));
        assert_eq!(secret.fingerprint().len(), 16);
    }
}
