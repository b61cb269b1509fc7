//! CLI entry point for the ridership insights tool.
//!
//! Loads a ridership CSV from a file or URL and prints the dashboard report,
//! a single view, the insight texts, or a preview of the normalized records.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ridership_insights::{
    config::DashboardConfig,
    fetch::load_source,
    filter::{RecordFilter, available_routes, available_stations, available_years},
    output::{Table, render_text, to_json, write_table_csv},
    report::{ViewKind, build_report, compute_view},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ridership_insights")]
#[command(about = "Aggregate bus ridership data into dashboard views and insights", long_about = None)]
struct Cli {
    /// JSON dashboard config file
    #[arg(long, global = true, env = "RIDERSHIP_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Selection {
    /// Path to file or URL to fetch
    #[arg(value_name = "FILE_OR_URL")]
    source: String,

    /// Only include these years (repeatable)
    #[arg(short, long = "year")]
    years: Vec<i32>,

    /// Only include these routes (repeatable)
    #[arg(short, long = "route")]
    routes: Vec<String>,

    /// Only include these boarding stations (repeatable)
    #[arg(short, long = "station")]
    stations: Vec<String>,
}

impl Selection {
    fn filter(&self) -> RecordFilter {
        RecordFilter {
            years: self.years.clone(),
            routes: self.routes.clone(),
            stations: self.stations.clone(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full dashboard report
    Report {
        #[command(flatten)]
        selection: Selection,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Print or export a single view
    View {
        #[command(flatten)]
        selection: Selection,

        #[arg(value_enum)]
        kind: ViewKind,

        /// CSV file to write the view to instead of printing it
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the insight text of every section
    Insights {
        #[command(flatten)]
        selection: Selection,
    },
    /// Print the first normalized records and the available filter options
    Preview {
        #[command(flatten)]
        selection: Selection,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/ridership_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ridership_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("RUST_LOG")
                .from_env_lossy(),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .with_env_var("RUST_LOG_JSON")
                .from_env_lossy(),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!(path = %path, "Loading dashboard config");
            DashboardConfig::load(path)?
        }
        None => DashboardConfig::default(),
    };

    match cli.command {
        Commands::Report { selection, format } => {
            let full = load_source(&selection.source).await?;
            let report = build_report(&full, &selection.filter(), &config);

            match format {
                Format::Text => println!("{}", render_text(&report, &config)),
                Format::Json => println!("{}", to_json(&report)?),
            }
        }
        Commands::View {
            selection,
            kind,
            output,
        } => {
            let full = load_source(&selection.source).await?;
            let table = compute_view(kind, &full, &selection.filter(), &config);

            match output {
                Some(path) => {
                    write_table_csv(&path, &table)?;
                    info!(path = %path, rows = table.rows.len(), "View written");
                }
                None => println!("{}", table.render()),
            }
        }
        Commands::Insights { selection } => {
            let full = load_source(&selection.source).await?;
            let report = build_report(&full, &selection.filter(), &config);

            let sections = [
                ("Overview", &report.overview.insight),
                ("Routes", &report.routes.insight),
                ("Stations", &report.stations.insight),
                ("Trends", &report.trends.insight),
                ("Fare", &report.fare.insight),
            ];
            for (title, insight) in sections {
                println!("== {title} ==\n{insight}\n");
            }
        }
        Commands::Preview { selection } => {
            let full = load_source(&selection.source).await?;
            let set = selection.filter().apply(&full);

            info!(
                years = ?available_years(&full),
                routes = available_routes(&full).len(),
                stations = available_stations(&full).len(),
                "Filter options"
            );
            println!(
                "{}",
                Table::from_records(set.head(config.preview_rows)).render()
            );
        }
    }

    Ok(())
}
