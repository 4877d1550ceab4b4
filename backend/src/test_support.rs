//! Shared test doubles for unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Role, StaffUser, UserId};

/// Clock pinned to a settable instant.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Mid-morning on a fixed weekday, well clear of any local midnight.
pub fn fixture_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn fixed_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixture_instant()))
}

/// Active account with the given role and a placeholder hash.
pub fn staff_user(username: &str, role: Role) -> StaffUser {
    let now = fixture_instant();
    StaffUser {
        id: UserId::random(),
        name: format!("Staff {username}"),
        username: username.to_owned(),
        email: None,
        password_hash: format!("hash:{username}"),
        role,
        is_active: true,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}
