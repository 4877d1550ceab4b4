//! Default staff accounts for a fresh installation.

use mockable::Clock;
use tracing::info;

use super::ports::{PasswordHasher, UserRepository};
use super::{Error, Role, StaffUser, UserId};

/// One account created by the seeder when its username is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAccount {
    pub name: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub role: Role,
}

/// Accounts every new clinic starts with. Change the passwords after the
/// first login.
pub const DEFAULT_STAFF: [SeedAccount; 2] = [
    SeedAccount {
        name: "Dr. John Smith",
        username: "doctor",
        password: "doctor123",
        role: Role::Doctor,
    },
    SeedAccount {
        name: "Sarah (Receptionist)",
        username: "receptionist",
        password: "reception123",
        role: Role::Receptionist,
    },
];

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

/// Create each account whose username is not already taken.
pub async fn seed_staff(
    accounts: &[SeedAccount],
    users: &dyn UserRepository,
    hasher: &dyn PasswordHasher,
    clock: &dyn Clock,
) -> Result<SeedReport, Error> {
    let mut report = SeedReport::default();
    for account in accounts {
        if users.find_by_username(account.username).await?.is_some() {
            info!(username = account.username, "staff account already exists");
            report.skipped.push(account.username);
            continue;
        }
        let password_hash = hasher
            .hash(account.password)
            .map_err(|err| Error::internal(err.to_string()))?;
        let now = clock.utc();
        users
            .insert(&StaffUser {
                id: UserId::random(),
                name: account.name.to_owned(),
                username: account.username.to_owned(),
                email: None,
                password_hash,
                role: account.role,
                is_active: true,
                last_login: None,
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(username = account.username, role = %account.role, "staff account seeded");
        report.created.push(account.username);
    }
    Ok(report)
}
