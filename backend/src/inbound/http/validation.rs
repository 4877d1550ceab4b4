//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::Error;

/// Parse a path identifier.
///
/// Identifiers that cannot name a stored record are reported the same way as
/// unknown ones, using the entity's not-found message.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, not_found: &str) -> Result<T, Error> {
    raw.parse::<T>().map_err(|_| {
        Error::not_found(not_found).with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, PatientId};
    use rstest::rstest;

    #[rstest]
    fn valid_ids_parse() {
        let id = PatientId::random();
        let parsed: PatientId =
            parse_path_id(&id.to_string(), "Patient not found.").expect("valid id");
        assert_eq!(parsed, id);
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("64b7f0c2e4b0a1a2b3c4d5e6")]
    fn malformed_ids_are_not_found(#[case] raw: &str) {
        let err = parse_path_id::<PatientId>(raw, "Patient not found.").expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Patient not found.");
        assert_eq!(err.details().and_then(|d| d.get("value")), Some(&json!(raw)));
    }
}
