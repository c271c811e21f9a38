//! Rendering of the dashboard projections, as plain text or JSON.

use std::{collections::BTreeMap, fmt::Write as _};

use api_types::summary::CategorySummary;
use engine::{
    ChartData, ChartSeries, Color, Column, DateWindow, Engine, FinancialRecord, Money, TableView,
};
use serde::Serialize;

use crate::settings::ChartKind;

const EMPTY_CHART: &str = "Please update the date filters";
const BAR_WIDTH: usize = 24;
const BARS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Everything one run of `spendview` shows.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub table: &'a TableView<'a>,
    pub window: &'a DateWindow,
    pub chart: &'a ChartData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a CategorySummary>,
}

pub fn json(report: &Report<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn text(engine: &Engine, report: &Report<'_>, kind: ChartKind) -> String {
    let mut out = String::new();
    table(&mut out, engine, report.table);
    out.push('\n');
    chart(&mut out, report.window, report.chart, kind);
    if let Some(summary) = report.summary {
        out.push('\n');
        category_summary(&mut out, engine, report.chart, summary);
    }
    out
}

fn table(out: &mut String, engine: &Engine, view: &TableView<'_>) {
    let cells: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|record| row_cells(engine, record))
        .collect();

    let sort = view.state.sort();
    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|column| {
            if *column == sort.column {
                let arrow = match sort.direction {
                    engine::SortDirection::Ascending => '↑',
                    engine::SortDirection::Descending => '↓',
                };
                format!("{} {arrow}", column.header())
            } else {
                column.header().to_string()
            }
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(out, &headers, &widths, None);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    write_row(out, &rule, &widths, None);
    for row in &cells {
        write_row(out, row, &widths, Some(&Column::ALL[..]));
    }
    if cells.is_empty() {
        out.push_str("No expenses match the filters.\n");
    }

    let _ = writeln!(
        out,
        "Page {} of {} ({} rows)",
        if view.total_pages == 0 { 0 } else { view.page_index() + 1 },
        view.total_pages,
        view.total_rows
    );
}

fn row_cells(engine: &Engine, record: &FinancialRecord) -> Vec<String> {
    Column::ALL
        .iter()
        .map(|column| engine.cell_text(record, *column))
        .collect()
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize], columns: Option<&[Column]>) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            let numeric = columns.is_some_and(|columns| columns[i].is_numeric());
            if numeric {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

fn chart(out: &mut String, window: &DateWindow, chart: &ChartData, kind: ChartKind) {
    let _ = writeln!(out, "Spending {} to {}", window.start(), window.end());
    if !chart.has_data() {
        let _ = writeln!(out, "{EMPTY_CHART}");
        return;
    }

    let name_width = chart
        .series
        .iter()
        .map(|series| series.category.chars().count())
        .max()
        .unwrap_or(0);

    match kind {
        ChartKind::Line => {
            let _ = writeln!(
                out,
                "{:name_width$}  {} .. {}",
                "",
                chart.labels.first().map(String::as_str).unwrap_or(""),
                chart.labels.last().map(String::as_str).unwrap_or("")
            );
            for series in &chart.series {
                let _ = writeln!(
                    out,
                    "{:<name_width$}  {}  {} {}",
                    series.category,
                    sparkline(&series.points),
                    series.total(),
                    series.color
                );
            }
        }
        ChartKind::Bar => {
            let max = chart
                .series
                .iter()
                .map(ChartSeries::total)
                .max()
                .unwrap_or(Money::ZERO);
            for series in &chart.series {
                let total = series.total();
                let _ = writeln!(
                    out,
                    "{:<name_width$}  {} {:>10} {}",
                    series.category,
                    bar(total, max),
                    total.to_string(),
                    series.color
                );
            }
        }
    }
}

/// Pie-chart totals, colored like the chart series of the same category.
fn category_summary(
    out: &mut String,
    engine: &Engine,
    chart: &ChartData,
    summary: &CategorySummary,
) {
    let mut colors: BTreeMap<&str, Color> = chart
        .series
        .iter()
        .map(|series| (series.category.as_str(), series.color))
        .collect();
    engine.palette().assign_missing(
        &mut colors,
        summary.by_category.iter().map(|entry| entry.category.as_str()),
    );

    let _ = writeln!(out, "By category");
    let name_width = summary
        .by_category
        .iter()
        .map(|entry| entry.category.chars().count())
        .max()
        .unwrap_or(0);
    let total = Money::from_major(summary.total_amount);
    for entry in &summary.by_category {
        let value = Money::from_major(entry.total);
        let amount = entry
            .display_amount
            .clone()
            .unwrap_or_else(|| value.to_string());
        let color = colors
            .get(entry.category.as_str())
            .copied()
            .unwrap_or_else(|| engine.palette().color_of(&entry.category));
        let _ = writeln!(
            out,
            "{:<name_width$}  {} {:>3}%  {:>10} {}",
            entry.category,
            bar(value, total),
            share(value, total),
            amount,
            color
        );
    }
    let _ = writeln!(out, "Total {total}");
}

/// Bar of `BAR_WIDTH` cells filled in proportion to `value / max`. Refunds
/// and a non-positive `max` draw an empty bar.
fn bar(value: Money, max: Money) -> String {
    let filled = if max.minor() <= 0 {
        0
    } else {
        let value = i128::from(value.minor().clamp(0, max.minor()));
        (value * BAR_WIDTH as i128 / i128::from(max.minor())) as usize
    };
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

/// Whole percent of `total` that `value` makes up, between 0 and 100.
fn share(value: Money, total: Money) -> i64 {
    if total.minor() <= 0 {
        return 0;
    }
    let value = i128::from(value.minor().clamp(0, total.minor()));
    (value * 100 / i128::from(total.minor())) as i64
}

/// One eighth-block per day, scaled to the largest day.
fn sparkline(points: &[Money]) -> String {
    let max = points.iter().copied().max().unwrap_or(Money::ZERO).minor();
    points
        .iter()
        .map(|point| {
            if max <= 0 || point.minor() <= 0 {
                " "
            } else {
                let index = i128::from(point.minor()) * 7 / i128::from(max);
                BARS[index as usize]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use api_types::{RawAmount, expense::ExpenseOut, summary::CategoryTotal};
    use engine::{ViewState, window::parse_day};

    use super::*;

    fn expense(id: &str, timestamp: &str, category: &str, amount: f64) -> FinancialRecord {
        FinancialRecord::from(ExpenseOut {
            id: Some(id.to_string()),
            amount: Some(RawAmount::Number(amount)),
            item: Some(format!("item {id}")),
            category: Some(category.to_string()),
            timestamp: Some(timestamp.to_string()),
            ..Default::default()
        })
    }

    fn cents(values: &[i64]) -> Vec<Money> {
        values.iter().copied().map(Money::new).collect()
    }

    #[test]
    fn bars_scale_to_the_maximum() {
        let half = bar(Money::new(500), Money::new(1000));
        assert_eq!(half.chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
        assert_eq!(bar(Money::new(100), Money::ZERO), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(Money::new(-300), Money::new(100)), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(Money::new(900), Money::new(100)), "█".repeat(BAR_WIDTH));
        assert_eq!(sparkline(&cents(&[0, 400, 800])), " ▄█");
        assert_eq!(sparkline(&cents(&[0, 0])), "  ");
        assert_eq!(sparkline(&cents(&[-50, 100])), " █");
        assert_eq!(share(Money::new(25), Money::new(100)), 25);
        assert_eq!(share(Money::new(1), Money::ZERO), 0);
    }

    #[test]
    fn summary_uses_the_chart_colors() {
        let engine = Engine::builder().build();
        let palette = engine.palette();
        let names: Vec<String> = (0..=40).map(|i| format!("Cat{i}")).collect();
        let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        let (first, second) = sorted
            .iter()
            .enumerate()
            .find_map(|(i, a)| {
                sorted[i + 1..]
                    .iter()
                    .find(|b| palette.color_of(a) == palette.color_of(b))
                    .map(|b| (*a, *b))
            })
            .unwrap();

        let records = vec![
            expense("1", "2024-01-01", first, 10.0),
            expense("2", "2024-01-02", second, 30.0),
        ];
        let window = engine.window_starting(
            parse_day("2024-01-01").unwrap(),
            parse_day("2024-01-03").unwrap(),
        );
        let view = engine.table_view(&records, &ViewState::default());
        let chart = engine.chart_series(&records, &window);
        let summary = CategorySummary {
            by_category: vec![
                CategoryTotal {
                    category: second.to_string(),
                    total: 30.0,
                    display_amount: None,
                },
                CategoryTotal {
                    category: first.to_string(),
                    total: 10.0,
                    display_amount: None,
                },
            ],
            total_amount: 40.0,
        };
        let report = Report {
            table: &view,
            window: &window,
            chart: &chart,
            summary: Some(&summary),
        };

        let rendered = text(&engine, &report, ChartKind::Line);
        let summary_lines: Vec<&str> = rendered
            .split("By category\n")
            .nth(1)
            .unwrap()
            .lines()
            .collect();
        for series in &chart.series {
            let line = summary_lines
                .iter()
                .find(|line| line.starts_with(&format!("{} ", series.category)))
                .unwrap();
            assert!(line.ends_with(&series.color.to_string()), "{line}");
        }
        let second_color = chart
            .series
            .iter()
            .find(|series| series.category == second)
            .unwrap()
            .color;
        assert_ne!(second_color, palette.color_of(second));
        assert!(rendered.contains("75%"));
    }

    #[test]
    fn text_report_shows_page_and_series() {
        let records = vec![
            expense("1", "2024-01-01", "Food", 10.0),
            expense("2", "2024-01-02", "Rent", 500.0),
        ];
        let engine = Engine::builder().build();
        let window = engine.window_starting(
            parse_day("2024-01-01").unwrap(),
            parse_day("2024-01-03").unwrap(),
        );
        let view = engine.table_view(&records, &ViewState::default());
        let chart = engine.chart_series(&records, &window);
        let summary = CategorySummary {
            by_category: vec![CategoryTotal {
                category: "Rent".to_string(),
                total: 500.0,
                display_amount: Some("€500.00".to_string()),
            }],
            total_amount: 500.0,
        };
        let report = Report {
            table: &view,
            window: &window,
            chart: &chart,
            summary: Some(&summary),
        };

        let rendered = text(&engine, &report, ChartKind::Bar);
        assert!(rendered.contains("Date ↓"));
        assert!(rendered.contains("Page 1 of 1 (2 rows)"));
        assert!(rendered.contains("Spending 2024-01-01 to 2024-01-03"));
        assert!(rendered.contains("500.00"));
        assert!(rendered.contains("€500.00"));
        assert!(!rendered.contains(EMPTY_CHART));

        let json = json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["table"]["total_rows"], 2);
        assert_eq!(value["chart"]["labels"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn empty_window_asks_for_other_dates() {
        let records = vec![expense("1", "2023-01-01", "Food", 10.0)];
        let engine = Engine::builder().build();
        let window = engine.window_starting(
            parse_day("2024-01-01").unwrap(),
            parse_day("2024-01-03").unwrap(),
        );
        let view = engine.table_view(&records, &ViewState::default());
        let chart = engine.chart_series(&records, &window);
        let report = Report {
            table: &view,
            window: &window,
            chart: &chart,
            summary: None,
        };

        let rendered = text(&engine, &report, ChartKind::Line);
        assert!(rendered.contains(EMPTY_CHART));
        assert!(!json(&report).unwrap().contains("summary"));
    }
}
