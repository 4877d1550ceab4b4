//! Calendar helpers for appointment dates and day windows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Half-open interval `[start, end)` covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The calendar day containing `instant`, measured in the instant's own
    /// time zone.
    ///
    /// Returns `None` only when midnight does not exist in that zone on the
    /// relevant days.
    ///
    /// # Examples
    /// ```
    /// use chrono::{FixedOffset, TimeZone, Utc};
    /// use clinic_backend::domain::DayWindow;
    ///
    /// let zone = FixedOffset::east_opt(3 * 3600).unwrap();
    /// let now = zone.with_ymd_and_hms(2025, 6, 3, 1, 30, 0).unwrap();
    /// let window = DayWindow::containing(&now).unwrap();
    /// assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 6, 2, 21, 0, 0).unwrap());
    /// assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 6, 3, 21, 0, 0).unwrap());
    /// ```
    pub fn containing<Tz: TimeZone>(instant: &DateTime<Tz>) -> Option<Self> {
        let zone = instant.timezone();
        let today = instant.date_naive();
        let tomorrow = today.succ_opt()?;
        let start = local_midnight(&zone, today)?;
        let end = local_midnight(&zone, tomorrow)?;
        Some(Self { start, end })
    }

    /// Whether `instant` falls inside the window.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

fn local_midnight<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|value| value.with_timezone(&Utc))
}

/// Parse a client-supplied calendar instant.
///
/// Accepts RFC 3339 timestamps, bare dates (`2025-06-01`, read as UTC
/// midnight), and zone-less date-times (read as UTC).
///
/// # Examples
/// ```
/// use clinic_backend::domain::parse_calendar_instant;
///
/// let parsed = parse_calendar_instant("2025-06-01").unwrap();
/// assert_eq!(parsed.to_rfc3339(), "2025-06-01T00:00:00+00:00");
/// assert!(parse_calendar_instant("next tuesday").is_none());
/// ```
pub fn parse_calendar_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a client-supplied calendar date, discarding any time component.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    parse_calendar_instant(raw).map(|instant| instant.date_naive())
}
