//! UUID-backed identifiers for stored records.
//!
//! Each record kind gets its own newtype so an appointment id can never be
//! passed where a patient id is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_record_id!(
    /// Identifier of a staff account.
    UserId
);
define_record_id!(
    /// Identifier of an appointment.
    AppointmentId
);
define_record_id!(
    /// Identifier of a patient record.
    PatientId
);
define_record_id!(
    /// Identifier of a doctor profile.
    DoctorId
);
define_record_id!(
    /// Identifier of a patient review.
    ReviewId
);
define_record_id!(
    /// Identifier of a blog post.
    BlogPostId
);
define_record_id!(
    /// Identifier of a contact message.
    ContactMessageId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_trimmed_uuid() {
        let id: AppointmentId = " 3fa85f64-5717-4562-b3fc-2c963f66afa6 "
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn serialises_as_plain_string() {
        let id = PatientId::from_uuid(Uuid::nil());
        let json = serde_json::to_value(id).expect("serialise");
        assert_eq!(json, serde_json::json!("00000000-0000-0000-0000-000000000000"));
    }

    #[rstest]
    fn random_ids_differ() {
        assert_ne!(UserId::random(), UserId::random());
    }
}
