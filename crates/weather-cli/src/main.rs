//! Command-line interface for the weather tool
//!
//! ```bash
//! weather-cli forecast "Rio de Janeiro"
//! weather-cli --no-cache forecast "San Francisco"
//! weather-cli call get_live_weather_forecast --params '{"location": "Munich"}'
//! weather-cli --todo-dir ./todos call list_todos
//! ```

use agent_tools::builtin::TodoSandbox;
use agent_utils::{AppConfig, LogFormat};
use agent_weather::{LocationSource, LocationTable, WeatherConfig};
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "weather-cli")]
#[command(about = "Look up weather the way the trip-planner agent does", long_about = None)]
struct Args {
    /// JSON file with `locations` and `mock_weather` tables (defaults to the built-in set)
    #[arg(long, global = true)]
    locations_file: Option<PathBuf>,

    /// Per-request timeout for the live forecast API
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Do not cache live forecasts
    #[arg(long, global = true)]
    no_cache: bool,

    /// Log output format (pretty or json); overrides AGENT_LOG_FORMAT
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Directory the file tools are confined to; overrides AGENT_TODO_DIR
    #[arg(long, global = true)]
    todo_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the weather result for a location
    Forecast {
        /// Free-text location, e.g. "near Munich"
        #[arg(required = true, num_args = 1..)]
        location: Vec<String>,
    },
    /// List known locations in match order
    Locations,
    /// Print the definitions of every registered tool
    Tools,
    /// Call a registered tool with JSON parameters
    Call {
        /// Tool name
        tool: String,
        /// Parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn load_table(args: &Args) -> anyhow::Result<LocationTable> {
    match &args.locations_file {
        Some(path) => LocationTable::from_json_file(path)
            .with_context(|| format!("loading locations from {}", path.display())),
        None => Ok(LocationTable::builtin()),
    }
}

fn load_config(args: &Args) -> anyhow::Result<WeatherConfig> {
    let mut builder = WeatherConfig::builder().with_env_lookup(|name| std::env::var(name).ok())?;
    if let Some(secs) = args.timeout_secs {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    if args.no_cache {
        builder = builder.disable_cache();
    }
    Ok(builder.build()?)
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let app = AppConfig::new("weather-cli").with_env();
    agent_utils::init_tracing_with(args.log_format.unwrap_or(app.log_format));

    info!(environment = %app.environment, "Starting weather-cli");

    let table = Arc::new(load_table(&args)?);
    let config = load_config(&args)?;
    let sandbox = TodoSandbox::new(args.todo_dir.clone().unwrap_or(app.todo_dir));

    match &args.command {
        Command::Forecast { location } => {
            let registry = agent_weather::tool_registry(&config, table, &sandbox)?;
            let params = serde_json::json!({ "location": location.join(" ") });
            let result = registry
                .execute(agent_weather::tools::WEATHER_TOOL_NAME, params)
                .await?;
            print_json(&result)?;
        }
        Command::Locations => {
            for record in table.records() {
                let source = match &record.source {
                    LocationSource::Mocked { forecast, .. } => {
                        format!("demo ({})", forecast.formatted_temperature())
                    }
                    LocationSource::Live(coordinates) => format!("live ({coordinates})"),
                    LocationSource::Unavailable { .. } => "demo (missing forecast)".to_string(),
                };
                println!("{:<16} {source}", record.key);
            }
        }
        Command::Tools => {
            let registry = agent_weather::tool_registry(&config, table, &sandbox)?;
            print_json(&serde_json::to_value(registry.definitions())?)?;
        }
        Command::Call { tool, params } => {
            let params: serde_json::Value =
                serde_json::from_str(params).context("--params must be valid JSON")?;
            let registry = agent_weather::tool_registry(&config, table, &sandbox)?;
            let result = registry.execute(tool, params).await?;
            print_json(&result)?;
        }
    }

    Ok(())
}
