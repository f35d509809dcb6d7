//! Folding 3-hour forecast intervals into one summary per calendar day.
//!
//! Samples are visited once, in the order given. The first sample seen for a
//! date seeds that day's summary; later samples for the same date:
//! - lower `temp_min` / raise `temp_max`
//! - add their rain (missing counts as zero) to `precipitation`
//! - overwrite humidity, wind speed, description and icon
//!
//! Days come out in first-seen order. Nothing is sorted, so an out-of-order
//! feed yields out-of-order days.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{DailySummary, IntervalSample};

/// Insertion-ordered map from date to its running summary
#[derive(Debug, Default, Clone)]
pub struct DailyIndex {
    days: Vec<DailySummary>,
    index: HashMap<NaiveDate, usize>,
}

impl DailyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the summary for its date
    pub fn push(&mut self, sample: &IntervalSample) {
        let date = sample.date();
        match self.index.get(&date) {
            Some(&slot) => {
                let day = &mut self.days[slot];
                if sample.temp_min < day.temp_min {
                    day.temp_min = sample.temp_min;
                }
                if sample.temp_max > day.temp_max {
                    day.temp_max = sample.temp_max;
                }
                day.precipitation += sample.precipitation_or_zero();
                day.humidity = sample.humidity;
                day.wind_speed = sample.wind_speed;
                day.weather.clone_from(&sample.description);
                day.icon.clone_from(&sample.icon);
            }
            None => {
                self.index.insert(date, self.days.len());
                self.days.push(DailySummary {
                    date,
                    temp_min: sample.temp_min,
                    temp_max: sample.temp_max,
                    humidity: sample.humidity,
                    wind_speed: sample.wind_speed,
                    precipitation: sample.precipitation_or_zero(),
                    weather: sample.description.clone(),
                    icon: sample.icon.clone(),
                });
            }
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailySummary> {
        self.index.get(&date).map(|&slot| &self.days[slot])
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn into_days(self) -> Vec<DailySummary> {
        self.days
    }
}

/// Aggregate interval samples into per-day summaries, in first-seen order
pub fn aggregate_daily(samples: &[IntervalSample]) -> Vec<DailySummary> {
    let mut index = DailyIndex::new();
    for sample in samples {
        index.push(sample);
    }
    tracing::debug!(
        samples = samples.len(),
        days = index.len(),
        "Aggregated forecast intervals"
    );
    index.into_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use std::collections::HashSet;

    fn sample(ts: &str, temp_min: f64, temp_max: f64, precipitation: Option<f64>) -> IntervalSample {
        IntervalSample {
            timestamp: NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap(),
            temperature: (temp_min + temp_max) / 2.0,
            temp_min,
            temp_max,
            humidity: 60,
            wind_speed: 2.0,
            precipitation,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn three_day_feed() -> Vec<IntervalSample> {
        vec![
            sample("2024-01-01 12:00:00", 10.0, 15.0, None),
            sample("2024-01-01 15:00:00", 5.0, 12.0, Some(2.0)),
            sample("2024-01-01 18:00:00", 8.0, 9.0, Some(3.0)),
            sample("2024-01-02 00:00:00", 3.0, 6.0, Some(0.5)),
            sample("2024-01-02 03:00:00", 2.0, 4.0, None),
            sample("2024-01-03 00:00:00", 1.0, 7.0, None),
        ]
    }

    #[test]
    fn test_one_summary_per_distinct_date() {
        let feed = three_day_feed();
        let days = aggregate_daily(&feed);
        let distinct: HashSet<NaiveDate> = feed.iter().map(IntervalSample::date).collect();
        assert_eq!(days.len(), distinct.len());
        assert_eq!(days.len(), 3);
    }

    #[test]
    fn test_temp_min_is_running_minimum() {
        let days = aggregate_daily(&three_day_feed());
        assert_eq!(days[0].date, date("2024-01-01"));
        assert_eq!(days[0].temp_min, 5.0);
        assert_eq!(days[0].temp_max, 15.0);
    }

    #[test]
    fn test_precipitation_sums_with_missing_as_zero() {
        let days = aggregate_daily(&three_day_feed());
        assert_eq!(days[0].precipitation, 5.0);
        assert_eq!(days[1].precipitation, 0.5);
        assert_eq!(days[2].precipitation, 0.0);
    }

    #[test]
    fn test_humidity_wind_and_condition_take_last_sample() {
        let mut feed = vec![
            sample("2024-01-01 00:00:00", 4.0, 6.0, None),
            sample("2024-01-01 03:00:00", 4.0, 6.0, None),
            sample("2024-01-01 06:00:00", 4.0, 6.0, None),
        ];
        feed[0].humidity = 90;
        feed[1].humidity = 10;
        feed[2].humidity = 50;
        feed[2].wind_speed = 7.5;
        feed[2].description = "overcast clouds".to_string();
        feed[2].icon = "04d".to_string();

        let days = aggregate_daily(&feed);
        assert_eq!(days.len(), 1);
        // Overwritten, not averaged
        assert_eq!(days[0].humidity, 50);
        assert_eq!(days[0].wind_speed, 7.5);
        assert_eq!(days[0].weather, "overcast clouds");
        assert_eq!(days[0].icon, "04d");
    }

    #[test]
    fn test_output_follows_first_seen_order() {
        let feed = vec![
            sample("2024-01-02 00:00:00", 1.0, 2.0, None),
            sample("2024-01-01 00:00:00", 1.0, 2.0, None),
            sample("2024-01-02 03:00:00", 0.0, 3.0, Some(1.0)),
        ];
        let days = aggregate_daily(&feed);
        assert_eq!(days[0].date, date("2024-01-02"));
        assert_eq!(days[1].date, date("2024-01-01"));
        assert_eq!(days[0].temp_min, 0.0);
        assert_eq!(days[0].precipitation, 1.0);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let feed = three_day_feed();
        assert_eq!(aggregate_daily(&feed), aggregate_daily(&feed));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn test_index_lookup_by_date() {
        let mut index = DailyIndex::new();
        for s in three_day_feed() {
            index.push(&s);
        }
        let day = index.get(date("2024-01-02")).unwrap();
        assert_eq!(day.temp_min, 2.0);
        assert!(index.get(date("2024-02-01")).is_none());
    }
}
