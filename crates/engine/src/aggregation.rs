//! Day by category aggregation for the line/bar chart.
//!
//! Records are bucketed by their local calendar day and category, then every
//! category of the snapshot becomes one series with a point per day of the
//! window. Days without spending are zero, and so is every point of a
//! category whose records all fall outside the window: a series never
//! disappears just because the window moved.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::{
    DateWindow, FinancialRecord, Money,
    palette::{Color, Palette},
    store::chartable_categories,
};

/// Summed amounts per `(day, category)` inside a window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buckets {
    days: BTreeMap<NaiveDate, BTreeMap<String, Money>>,
    records: usize,
}

impl Buckets {
    /// Buckets the chartable records whose local day lies in `window`.
    pub fn collect(records: &[FinancialRecord], window: &DateWindow, tz: Tz) -> Self {
        let mut buckets = Self::default();

        for record in records {
            let (Some(day), Some(amount)) = (record.local_day(tz), record.amount()) else {
                tracing::trace!(record = record.id(), "record skipped by aggregation");
                continue;
            };
            if !window.contains(day) {
                continue;
            }

            *buckets
                .days
                .entry(day)
                .or_default()
                .entry(record.category().to_string())
                .or_default() += amount;
            buckets.records += 1;
        }

        buckets
    }

    /// Sum for one day and category, zero when nothing was spent.
    pub fn get(&self, day: NaiveDate, category: &str) -> Money {
        self.days
            .get(&day)
            .and_then(|categories| categories.get(category))
            .copied()
            .unwrap_or(Money::ZERO)
    }

    /// Number of records that landed in a bucket.
    pub fn record_count(&self) -> usize {
        self.records
    }
}

/// One category's amounts, aligned to [`ChartData::labels`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub category: String,
    pub color: Color,
    pub points: Vec<Money>,
}

impl ChartSeries {
    /// Points in major units.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.to_major()).collect()
    }

    pub fn total(&self) -> Money {
        self.points.iter().copied().sum()
    }
}

/// Label axis plus one series per category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// Records that fell inside the window.
    pub records_in_window: usize,
}

impl ChartData {
    /// `false` when the window holds no record, so the chart has nothing to
    /// draw besides zero lines.
    pub fn has_data(&self) -> bool {
        self.records_in_window > 0
    }
}

/// Aggregates `records` over `window`.
///
/// Categories come from every chartable record of the input, not only the
/// ones inside the window. Series are ordered by category name.
pub fn aggregate(
    records: &[FinancialRecord],
    window: &DateWindow,
    tz: Tz,
    palette: &Palette,
) -> ChartData {
    let buckets = Buckets::collect(records, window, tz);
    let days: Vec<NaiveDate> = window.days().collect();
    let categories = chartable_categories(records);
    let colors = palette.assign(&categories);

    let series = categories
        .iter()
        .map(|&category| ChartSeries {
            category: category.to_string(),
            color: colors
                .get(category)
                .copied()
                .unwrap_or_else(|| palette.color_of(category)),
            points: days.iter().map(|&day| buckets.get(day, category)).collect(),
        })
        .collect();

    tracing::debug!(
        start = %window.start(),
        end = %window.end(),
        records = buckets.record_count(),
        "aggregated chart series"
    );

    ChartData {
        labels: window.labels(),
        series,
        records_in_window: buckets.record_count(),
    }
}

#[cfg(test)]
mod tests {
    use api_types::{RawAmount, expense::ExpenseOut};

    use super::*;
    use crate::window::parse_day;

    fn record(timestamp: &str, category: &str, amount: f64) -> FinancialRecord {
        FinancialRecord::from(ExpenseOut {
            id: Some(format!("{timestamp}-{category}")),
            amount: Some(RawAmount::Number(amount)),
            category: Some(category.to_string()),
            timestamp: Some(timestamp.to_string()),
            ..Default::default()
        })
    }

    fn window(start: &str, today: &str) -> DateWindow {
        DateWindow::starting_at(parse_day(start).unwrap(), parse_day(today).unwrap())
    }

    #[test]
    fn sums_per_day_and_category() {
        let records = vec![
            record("2024-01-01T09:00:00Z", "Food", 10.0),
            record("2024-01-01T19:00:00Z", "Food", 2.5),
            record("2024-01-01T19:00:00Z", "Fun", 7.0),
        ];
        let buckets = Buckets::collect(&records, &window("2024-01-01", "2024-01-03"), Tz::UTC);
        let day = parse_day("2024-01-01").unwrap();
        assert_eq!(buckets.get(day, "Food"), Money::new(1250));
        assert_eq!(buckets.get(day, "Fun"), Money::new(700));
        assert_eq!(buckets.get(day, "Rent"), Money::ZERO);
        assert_eq!(buckets.record_count(), 3);
    }

    #[test]
    fn gap_days_are_zero_filled() {
        let records = vec![
            record("2024-01-01", "Food", 10.0),
            record("2024-01-03", "Food", 5.0),
        ];
        let chart = aggregate(
            &records,
            &window("2024-01-01", "2024-01-03"),
            Tz::UTC,
            &Palette::default(),
        );
        assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].values(), vec![10.0, 0.0, 5.0]);
        assert_eq!(chart.series[0].total(), Money::new(1500));
    }

    #[test]
    fn categories_outside_window_keep_a_zero_series() {
        let records = vec![
            record("2024-01-02", "Food", 3.0),
            record("2023-12-01", "Travel", 300.0),
        ];
        let chart = aggregate(
            &records,
            &window("2024-01-01", "2024-01-03"),
            Tz::UTC,
            &Palette::default(),
        );
        let categories: Vec<&str> = chart.series.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["Food", "Travel"]);
        assert!(chart.series[1].points.iter().all(|p| p.is_zero()));
        assert_eq!(chart.records_in_window, 1);
    }

    #[test]
    fn boundary_days_are_included() {
        let records = vec![
            record("2024-01-01T00:00:00Z", "Food", 1.0),
            record("2024-01-03T23:59:59Z", "Food", 2.0),
            record("2024-01-04T00:00:00Z", "Food", 4.0),
        ];
        let chart = aggregate(
            &records,
            &window("2024-01-01", "2024-01-03"),
            Tz::UTC,
            &Palette::default(),
        );
        assert_eq!(chart.series[0].values(), vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn buckets_use_the_local_day() {
        let records = vec![record("2024-01-01T20:00:00Z", "Food", 8.0)];
        let chart = aggregate(
            &records,
            &window("2024-01-01", "2024-01-03"),
            chrono_tz::Asia::Tokyo,
            &Palette::default(),
        );
        assert_eq!(chart.series[0].values(), vec![0.0, 8.0, 0.0]);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let mut records = vec![record("2024-01-01", "Food", 1.0)];
        records.push(FinancialRecord::from(ExpenseOut {
            id: Some("bad".to_string()),
            amount: Some(RawAmount::Text("lots".to_string())),
            category: Some("Mystery".to_string()),
            timestamp: Some("2024-01-01".to_string()),
            ..Default::default()
        }));
        let chart = aggregate(
            &records,
            &window("2024-01-01", "2024-01-03"),
            Tz::UTC,
            &Palette::default(),
        );
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.records_in_window, 1);
    }

    #[test]
    fn empty_input_still_spans_the_window() {
        let chart = aggregate(
            &[],
            &window("2024-01-01", "2024-01-01"),
            Tz::UTC,
            &Palette::default(),
        );
        assert_eq!(chart.labels, vec!["2024-01-01"]);
        assert!(chart.series.is_empty());
        assert!(!chart.has_data());
    }
}
