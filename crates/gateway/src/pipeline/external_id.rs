//! External identifier generation
//!
//! Produces the human-facing `ART{YYYYMMDD}{seq:04}` identifier, scoped to
//! tenant and UTC day. This is a generator, not an allocator: the
//! count-then-increment is advisory and not collision-free when submissions
//! for the same tenant race within a day.

use super::store::PublicationStore;
use chrono::{DateTime, Duration, Utc};
use newsdesk_common::errors::Result;
use newsdesk_common::EXTERNAL_ID_PREFIX;
use uuid::Uuid;

/// UTC day window [start, end) containing the given instant
pub fn day_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc();
    (start, start + Duration::days(1))
}

/// Format an external id from a date and a 1-based sequence number
pub fn format_external_id(date: DateTime<Utc>, seq: u64) -> String {
    format!("{}{}{:04}", EXTERNAL_ID_PREFIX, date.format("%Y%m%d"), seq)
}

/// Generate the next external id for a tenant
pub async fn generate(
    store: &dyn PublicationStore,
    tenant_id: Uuid,
    now: DateTime<Utc>,
) -> Result<String> {
    let (start, end) = day_window(now);
    let count = store
        .count_newspaper_articles_in_window(tenant_id, start, end)
        .await?;

    Ok(format_external_id(now, count + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format() {
        let date = Utc.with_ymd_and_hms(2026, 8, 7, 13, 45, 0).unwrap();
        assert_eq!(format_external_id(date, 1), "ART202608070001");
        assert_eq!(format_external_id(date, 42), "ART202608070042");
        assert_eq!(format_external_id(date, 12345), "ART2026080712345");
    }

    #[test]
    fn test_day_window_bounds() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 23, 59, 59).unwrap();
        let (start, end) = day_window(now);

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 8, 8, 0, 0, 0).unwrap());
        assert!(start <= now && now < end);
    }
}
