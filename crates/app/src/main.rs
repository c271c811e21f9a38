use api_types::summary::CategorySummary;
use chrono::Utc;
use engine::{Engine, RecordStore, window::parse_day};

use error::Result;
use settings::OutputFormat;

mod error;
mod output;
mod settings;

fn main() {
    if let Err(err) = run() {
        tracing::error!("{err}");
        eprintln!("spendview: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let (settings, args) = settings::load()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "spendview={level},engine={level}",
            level = settings.level
        ))
        .init();

    let engine = Engine::builder()
        .timezone_name(&settings.timezone)?
        .window_span_days(settings.window_span_days)
        .page_size(settings.page_size()?)
        .build();

    let store = RecordStore::from_json(&std::fs::read_to_string(&args.snapshot)?)?;
    tracing::info!(records = store.len(), snapshot = %args.snapshot, "Loaded snapshot");

    let summary: Option<CategorySummary> = match &args.summary {
        Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => None,
    };

    let today = match &args.today {
        Some(day) => parse_day(day)?,
        None => engine.today(Utc::now()),
    };

    let mut state = engine.initial_state(today);
    for intent in args.intents()? {
        tracing::debug!(?intent, "Applying intent");
        state = state.apply(intent, today);
    }

    let table = engine.table_view(store.records(), &state.view);
    let chart = engine.chart_series(store.records(), &state.window);
    let report = output::Report {
        table: &table,
        window: &state.window,
        chart: &chart,
        summary: summary.as_ref(),
    };

    let rendered = match settings.output {
        OutputFormat::Text => output::text(&engine, &report, settings.chart),
        OutputFormat::Json => output::json(&report)?,
    };
    println!("{rendered}");

    Ok(())
}
