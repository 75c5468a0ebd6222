//! Collapses the 3-hour forecast timeline into daily summaries.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::model::{DailyForecastSummary, ForecastPayload, RawForecastEntry};

/// Maximum number of daily summaries produced.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Normalize using the machine's local time zone for calendar dates.
pub fn normalize(payload: &ForecastPayload) -> Vec<DailyForecastSummary> {
    normalize_in(payload, &Local)
}

/// Keep the first entry of each calendar date (in `tz`), up to five days, in
/// timeline order. Later entries of an already-seen date are ignored.
pub fn normalize_in<Tz: TimeZone>(payload: &ForecastPayload, tz: &Tz) -> Vec<DailyForecastSummary> {
    let mut days = Vec::with_capacity(MAX_FORECAST_DAYS);
    let mut seen: HashSet<NaiveDate> = HashSet::new();

    for entry in &payload.entries {
        let Some(date) = local_date(entry.timestamp_seconds, tz) else {
            tracing::debug!(ts = entry.timestamp_seconds, "skipping forecast entry with out-of-range timestamp");
            continue;
        };

        if seen.contains(&date) || days.len() >= MAX_FORECAST_DAYS {
            continue;
        }

        seen.insert(date);
        days.push(summarize(date, entry));
    }

    days
}

fn local_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(tz).date_naive())
}

fn summarize(date: NaiveDate, entry: &RawForecastEntry) -> DailyForecastSummary {
    DailyForecastSummary {
        calendar_date: date,
        day_label: date.format("%a").to_string(),
        temp_min_c: round_half_up(entry.temp_min_c),
        temp_max_c: round_half_up(entry.temp_max_c),
        condition_description: entry.condition_description.clone(),
        condition_icon: entry.condition_icon.clone(),
    }
}

/// Nearest integer, ties toward positive infinity (-2.5 -> -2, 2.5 -> 3).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
            .expect("valid test date")
    }

    fn entry(timestamp_seconds: i64, min: f64, max: f64, desc: &str) -> RawForecastEntry {
        RawForecastEntry {
            timestamp_seconds,
            temp_min_c: min,
            temp_max_c: max,
            condition_description: desc.to_string(),
            condition_icon: "01d".to_string(),
        }
    }

    fn payload(entries: Vec<RawForecastEntry>) -> ForecastPayload {
        ForecastPayload { entries }
    }

    /// 3-hour slots covering `days` days starting 2024-03-01 00:00 UTC.
    fn timeline(days: u32) -> ForecastPayload {
        let start = ts(2024, 3, 1, 0);
        let entries = (0..days * 8)
            .map(|i| {
                let t = f64::from(i);
                entry(start + i64::from(i) * 3 * 3600, t, t + 5.0, &format!("slot {i}"))
            })
            .collect();
        payload(entries)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn first_entry_of_each_day_wins() {
        let input = payload(vec![
            entry(ts(2024, 3, 1, 9), 10.0, 18.0, "light rain"),
            entry(ts(2024, 3, 1, 18), 12.0, 20.0, "clear sky"),
            entry(ts(2024, 3, 2, 9), 8.0, 15.0, "few clouds"),
        ]);

        let days = normalize_in(&input, &Utc);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].calendar_date, date(2024, 3, 1));
        assert_eq!((days[0].temp_min_c, days[0].temp_max_c), (10, 18));
        assert_eq!(days[0].condition_description, "light rain");
        assert_eq!(days[1].calendar_date, date(2024, 3, 2));
        assert_eq!((days[1].temp_min_c, days[1].temp_max_c), (8, 15));
    }

    #[test]
    fn empty_timeline_gives_no_days() {
        assert!(normalize_in(&ForecastPayload::default(), &Utc).is_empty());
    }

    #[test]
    fn caps_at_five_days() {
        let days = normalize_in(&timeline(6), &Utc);

        assert_eq!(days.len(), MAX_FORECAST_DAYS);
        assert_eq!(days[4].calendar_date, date(2024, 3, 5));
    }

    #[test]
    fn never_more_days_than_distinct_dates() {
        let days = normalize_in(&timeline(3), &Utc);
        assert_eq!(days.len(), 3);
    }

    #[test]
    fn dates_are_distinct_and_in_first_seen_order() {
        let input = payload(vec![
            entry(ts(2024, 3, 3, 0), 1.0, 2.0, "a"),
            entry(ts(2024, 3, 1, 0), 3.0, 4.0, "b"),
            entry(ts(2024, 3, 3, 12), 5.0, 6.0, "c"),
            entry(ts(2024, 3, 2, 0), 7.0, 8.0, "d"),
        ]);

        let days = normalize_in(&input, &Utc);
        let dates: Vec<_> = days.iter().map(|d| d.calendar_date).collect();

        assert_eq!(dates, vec![date(2024, 3, 3), date(2024, 3, 1), date(2024, 3, 2)]);
        assert_eq!(days[0].condition_description, "a");
    }

    #[test]
    fn each_summary_comes_from_first_slot_of_its_day() {
        let input = timeline(5);
        let days = normalize_in(&input, &Utc);

        for (i, day) in days.iter().enumerate() {
            let first_slot = &input.entries[i * 8];
            assert_eq!(day.condition_description, first_slot.condition_description);
            assert_eq!(day.temp_min_c, round_half_up(first_slot.temp_min_c));
        }
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let input = timeline(6);
        assert_eq!(normalize_in(&input, &Utc), normalize_in(&input, &Utc));
    }

    #[test]
    fn day_label_is_short_weekday() {
        // 2024-03-01 was a Friday.
        let days = normalize_in(&timeline(2), &Utc);
        assert_eq!(days[0].day_label, "Fri");
        assert_eq!(days[1].day_label, "Sat");
    }

    #[test]
    fn calendar_date_follows_time_zone() {
        let input = payload(vec![entry(ts(2024, 3, 1, 23), 1.0, 2.0, "late")]);
        let cet = FixedOffset::east_opt(2 * 3600).expect("valid offset");

        assert_eq!(normalize_in(&input, &Utc)[0].calendar_date, date(2024, 3, 1));
        assert_eq!(normalize_in(&input, &cet)[0].calendar_date, date(2024, 3, 2));
    }

    #[test]
    fn temperatures_round_half_up() {
        let input = payload(vec![entry(ts(2024, 3, 1, 0), -2.5, 17.5, "x")]);
        let days = normalize_in(&input, &Utc);

        assert_eq!(days[0].temp_min_c, -2);
        assert_eq!(days[0].temp_max_c, 18);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49), 0);
    }

    #[test]
    fn out_of_range_timestamp_is_skipped() {
        let input = payload(vec![
            entry(i64::MAX, 0.0, 0.0, "broken"),
            entry(ts(2024, 3, 1, 0), 1.0, 2.0, "ok"),
        ]);

        let days = normalize_in(&input, &Utc);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].condition_description, "ok");
    }
}
