use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;

use climate_action_planner::actions;
use climate_action_planner::config::SignalConfig;
use climate_action_planner::fetch::{self, Coordinates, FetchRequest};
use climate_action_planner::logging;
use climate_action_planner::models::{
    Action, CategorizedActions, ClimateSignals, FormattedSignals, RawClimateSeries,
};
use climate_action_planner::report;
use climate_action_planner::series;
use climate_action_planner::signals;

#[derive(Parser)]
#[command(name = "climate-action-planner")]
#[command(about = "Climate change signals and adaptation actions for a location", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: SignalConfig,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute climate signals from a daily series (CSV or JSON)
    Signals {
        #[arg(long)]
        input: PathBuf,
    },
    /// Recommend actions from a signals JSON file
    Actions {
        #[arg(long)]
        signals: PathBuf,
    },
    /// Compute signals and recommend actions in one pass
    Plan {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        location: Option<String>,
        /// Print a markdown plan instead of JSON
        #[arg(long, default_value_t = false)]
        markdown: bool,
    },
    /// Download a daily projection series from Open-Meteo
    Fetch {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value = fetch::DEFAULT_MODEL)]
        model: String,
        #[arg(long, default_value = "series.json")]
        out: PathBuf,
        /// Give up on the provider after this many seconds
        #[arg(long, default_value_t = fetch::DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
    /// Write a markdown action plan
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, default_value = "plan.md")]
        out: PathBuf,
    },
}

/// Accepts bare signals or the `signals` command output.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignalsFile {
    Wrapped { signals: ClimateSignals },
    Bare(ClimateSignals),
}

impl SignalsFile {
    fn into_signals(self) -> ClimateSignals {
        match self {
            SignalsFile::Wrapped { signals } => signals,
            SignalsFile::Bare(signals) => signals,
        }
    }
}

#[derive(Serialize)]
struct SignalsOutput {
    signals: ClimateSignals,
    formatted: FormattedSignals,
}

#[derive(Serialize)]
struct ActionsOutput {
    rules: Vec<&'static str>,
    actions: Vec<Action>,
    categorized: CategorizedActions,
}

#[derive(Serialize)]
struct PlanOutput {
    signals: ClimateSignals,
    formatted: FormattedSignals,
    #[serde(flatten)]
    recommendations: ActionsOutput,
}

fn compute(input: &Path, config: &SignalConfig) -> anyhow::Result<ClimateSignals> {
    let raw: RawClimateSeries = series::load_series(input)?;
    info!(days = raw.len(), input = %input.display(), "Loaded climate series");

    let computed = signals::compute_signals(&raw, config)
        .with_context(|| format!("failed to compute climate signals from {}", input.display()))?;
    info!(
        temperature_trend = computed.temperature_trend,
        hot_days_count = computed.hot_days_count,
        rainfall_trend = computed.rainfall_trend.label(),
        "Computed climate signals"
    );
    Ok(computed)
}

fn recommend(signals: &ClimateSignals) -> ActionsOutput {
    let actions = actions::generate_actions(signals);
    let categorized = actions::categorize_actions(&actions);
    ActionsOutput {
        rules: actions::triggered_rules(signals),
        actions,
        categorized,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();
    let config = cli.config;
    config.validate().context("invalid signal window configuration")?;

    match cli.command {
        Commands::Signals { input } => {
            let computed = compute(&input, &config)?;
            let formatted = report::format_signals(&computed, config.heat_threshold_c);
            print_json(&SignalsOutput {
                signals: computed,
                formatted,
            })?;
        }
        Commands::Actions { signals } => {
            let file = std::fs::File::open(&signals)
                .with_context(|| format!("failed to open signals file {}", signals.display()))?;
            let parsed: SignalsFile = serde_json::from_reader(file)
                .with_context(|| format!("invalid climate signals in {}", signals.display()))?;
            print_json(&recommend(&parsed.into_signals()))?;
        }
        Commands::Plan {
            input,
            location,
            markdown,
        } => {
            let computed = compute(&input, &config)?;
            if markdown {
                print!("{}", report::build_report(location.as_deref(), &config, &computed));
            } else {
                let formatted = report::format_signals(&computed, config.heat_threshold_c);
                let recommendations = recommend(&computed);
                print_json(&PlanOutput {
                    signals: computed,
                    formatted,
                    recommendations,
                })?;
            }
        }
        Commands::Fetch {
            lat,
            lon,
            model,
            out,
            timeout_secs,
        } => {
            let coordinates = Coordinates::new(lat, lon)?;
            let request = FetchRequest::for_windows(coordinates, &config, &model)?;
            let client = fetch::build_client(fetch::request_timeout(timeout_secs)?)?;
            let raw = fetch::fetch_series(&client, &request).await?;
            std::fs::write(&out, serde_json::to_string(&raw)?)
                .with_context(|| format!("failed to write series to {}", out.display()))?;
            println!("Fetched {} days into {}.", raw.len(), out.display());
        }
        Commands::Report {
            input,
            location,
            out,
        } => {
            let computed = compute(&input, &config)?;
            let plan = report::build_report(location.as_deref(), &config, &computed);
            std::fs::write(&out, plan)?;
            println!("Plan written to {}.", out.display());
        }
    }

    Ok(())
}
