//! Settings for `spendview`.
//!
//! Values are layered: defaults, then the optional TOML file, then
//! `SPENDVIEW_*` environment variables, then command line flags.

use clap::{Parser, ValueEnum};
use engine::{Column, Intent, PageSize, window::parse_day};
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/spendview.toml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timezone: String,
    pub page_size: usize,
    pub window_span_days: u32,
    pub level: String,
    pub output: OutputFormat,
    pub chart: ChartKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "Europe/Rome".to_string(),
            page_size: engine::table::PAGE_SIZE_OPTIONS[0],
            window_span_days: engine::DEFAULT_SPAN_DAYS,
            level: "info".to_string(),
            output: OutputFormat::Text,
            chart: ChartKind::Line,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "spendview", about = "Table and chart views of an expenses snapshot")]
pub struct Args {
    /// Expenses snapshot, the JSON body of `GET /expenses`.
    pub snapshot: String,
    /// Category summary, the JSON body of `GET /expenses/summary`.
    #[arg(long)]
    pub summary: Option<String>,
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level.
    #[arg(long)]
    level: Option<String>,
    /// Override output format.
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,
    /// Override chart kind.
    #[arg(long, value_enum)]
    chart: Option<ChartKind>,
    /// Day used as "today" (yyyy-MM-dd); defaults to the current local day.
    #[arg(long)]
    pub today: Option<String>,
    /// First day of the chart window (yyyy-MM-dd).
    #[arg(long)]
    start: Option<String>,
    /// Column filter as COLUMN=PATTERN, repeatable.
    #[arg(long = "filter", value_name = "COLUMN=PATTERN")]
    filters: Vec<String>,
    /// Global filter across all columns.
    #[arg(long)]
    search: Option<String>,
    /// Header click on COLUMN, repeatable; clicking twice flips direction.
    #[arg(long = "sort", value_name = "COLUMN")]
    sorts: Vec<String>,
    /// Rows per page (5, 10, 20 or 50).
    #[arg(long)]
    page_size: Option<usize>,
    /// Page to show, starting at 1.
    #[arg(long)]
    page: Option<usize>,
}

impl Args {
    /// Intents described by the flags, in the order the dashboard would
    /// receive them.
    pub fn intents(&self) -> Result<Vec<Intent>> {
        let mut intents = Vec::new();

        for filter in &self.filters {
            let (column, pattern) = filter.split_once('=').ok_or_else(|| {
                AppError::Argument(format!("filter {filter:?} is not COLUMN=PATTERN"))
            })?;
            intents.push(Intent::SetColumnFilter {
                column: column.parse::<Column>()?,
                pattern: pattern.to_string(),
            });
        }
        if let Some(search) = &self.search {
            intents.push(Intent::SetGlobalFilter(search.clone()));
        }
        for column in &self.sorts {
            intents.push(Intent::ToggleSort(column.parse::<Column>()?));
        }
        if let Some(page) = self.page {
            if page == 0 {
                return Err(AppError::Argument("pages start at 1".to_string()));
            }
            intents.push(Intent::SetPage(page - 1));
        }
        if let Some(start) = &self.start {
            intents.push(Intent::SetWindowStart(parse_day(start)?));
        }

        Ok(intents)
    }
}

pub fn load() -> Result<(Settings, Args)> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPENDVIEW"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(timezone) = &args.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }
    if let Some(output) = args.output {
        settings.output = output;
    }
    if let Some(chart) = args.chart {
        settings.chart = chart;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }

    Ok((settings, args))
}

impl Settings {
    pub fn page_size(&self) -> Result<PageSize> {
        Ok(PageSize::try_from(self.page_size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["spendview", "expenses.json"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn flags_become_intents_in_order() {
        let args = args(&[
            "--filter",
            "category=food",
            "--search",
            "lunch",
            "--sort",
            "amount",
            "--page",
            "2",
            "--start",
            "2024-06-01",
        ]);
        let intents = args.intents().unwrap();
        assert_eq!(
            intents,
            vec![
                Intent::SetColumnFilter {
                    column: Column::Category,
                    pattern: "food".to_string()
                },
                Intent::SetGlobalFilter("lunch".to_string()),
                Intent::ToggleSort(Column::Amount),
                Intent::SetPage(1),
                Intent::SetWindowStart(parse_day("2024-06-01").unwrap()),
            ]
        );
    }

    #[test]
    fn malformed_flags_are_rejected() {
        assert!(args(&["--filter", "category"]).intents().is_err());
        assert!(args(&["--sort", "price"]).intents().is_err());
        assert!(args(&["--page", "0"]).intents().is_err());
        assert!(args(&["--start", "June"]).intents().is_err());
    }

    #[test]
    fn settings_reject_unoffered_page_size() {
        let settings = Settings {
            page_size: 7,
            ..Settings::default()
        };
        assert!(settings.page_size().is_err());
        assert_eq!(Settings::default().page_size().unwrap().get(), 5);
    }
}
