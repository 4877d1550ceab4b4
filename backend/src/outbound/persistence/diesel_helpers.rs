//! Small query helpers shared by the Diesel repositories.

/// Wrap `needle` for a case-insensitive substring `ILIKE`, escaping the
/// pattern metacharacters so they match literally.
pub(super) fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Postgres counts are `BIGINT`; a negative count never occurs.
pub(super) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
