//! Inclusive date-range filtering.
//!
//! Traps are filtered on their installation date, samplings on their
//! observation date. A record whose date is missing or cannot be read is out
//! of range.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use trap_core::{Sampling, TimeRange, Trap};

/// Read an upstream date as an instant.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC) and a
/// bare `YYYY-MM-DD` (UTC midnight).
#[must_use]
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn in_range(range: &TimeRange, date: Option<&str>) -> bool {
    date.and_then(parse_instant)
        .is_some_and(|instant| range.contains(instant))
}

/// Traps installed within `range`, in input order.
#[must_use]
pub fn filter_traps(traps: &[Trap], range: &TimeRange) -> Vec<Trap> {
    traps
        .iter()
        .filter(|t| in_range(range, t.installation_date()))
        .cloned()
        .collect()
}

/// Samplings observed within `range`, in input order.
#[must_use]
pub fn filter_samplings(samplings: &[Sampling], range: &TimeRange) -> Vec<Sampling> {
    samplings
        .iter()
        .filter(|s| in_range(range, s.date()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn march() -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap(),
        )
    }

    fn trap(id: i64, installed: Option<&str>) -> Trap {
        serde_json::from_value(json!({"id": id, "installationDate": installed})).unwrap()
    }

    #[rstest]
    #[case("2024-03-01T00:00:00Z", 2024, 3, 1, 0)]
    #[case("2024-03-01T02:00:00+02:00", 2024, 3, 1, 0)]
    #[case("2024-03-01T00:00:00", 2024, 3, 1, 0)]
    #[case("2024-03-01T10:00:00.250", 2024, 3, 1, 10)]
    #[case("2024-03-01", 2024, 3, 1, 0)]
    fn parses_upstream_formats(
        #[case] text: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
    ) {
        let parsed = parse_instant(text).unwrap();
        let expected = Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap();
        assert_eq!(parsed.date_naive(), expected.date_naive());
        assert_eq!(parsed.format("%H").to_string(), expected.format("%H").to_string());
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("2024-13-01")]
    #[case("01/03/2024")]
    fn rejects_unreadable_dates(#[case] text: &str) {
        assert!(parse_instant(text).is_none());
    }

    #[test]
    fn bounds_are_inclusive() {
        let traps = vec![
            trap(1, Some("2024-03-01T00:00:00Z")),
            trap(2, Some("2024-03-31T12:00:00Z")),
            trap(3, Some("2024-02-29T23:59:59.999Z")),
            trap(4, Some("2024-03-31T12:00:00.001Z")),
        ];
        let kept: Vec<String> = filter_traps(&traps, &march())
            .iter()
            .map(|t| t.id().to_string())
            .collect();
        assert_eq!(kept, vec!["1", "2"]);
    }

    #[test]
    fn missing_or_unreadable_dates_are_excluded() {
        let traps = vec![trap(1, None), trap(2, Some("soon")), trap(3, Some("2024-03-10"))];
        let kept = filter_traps(&traps, &march());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id().to_string(), "3");
    }

    #[test]
    fn samplings_filter_on_observation_date() {
        let samplings: Vec<Sampling> = serde_json::from_value(json!([
            {"id": 10, "date": "2024-03-05T08:00:00Z"},
            {"id": 11, "date": "2024-04-05T08:00:00Z"},
            {"id": 12}
        ]))
        .unwrap();
        let kept = filter_samplings(&samplings, &march());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id().to_string(), "10");
    }

    #[test]
    fn non_text_dates_are_excluded_quietly() {
        let samplings: Vec<Sampling> = serde_json::from_value(json!([
            {"id": 10, "date": "2024-03-05T08:00:00Z"},
            {"id": 11, "date": 1_709_625_600_000_i64},
            {"id": 12, "date": {"day": 5}},
            {"id": 13, "date": "2024-03-06"}
        ]))
        .unwrap();
        let kept: Vec<String> = filter_samplings(&samplings, &march())
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(kept, vec!["10", "13"]);
    }
}
