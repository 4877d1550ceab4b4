//! Port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Failures raised while hashing a password.
    pub enum PasswordHashError {
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Spend the same effort as [`PasswordHasher::verify`] without a stored
    /// hash, so unknown usernames take as long as wrong passwords.
    fn verify_absent(&self, password: &str);
}
