mod app;
mod error_mapping;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use skycast_core::{AppError, Config, ConfigError};
use skycast_weather::TemperatureUnit;

use crate::app::App;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitArg> for TemperatureUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Celsius => TemperatureUnit::Celsius,
            UnitArg::Fahrenheit => TemperatureUnit::Fahrenheit,
        }
    }
}

/// Current weather and a 5-day forecast for a city
#[derive(Debug, Parser)]
#[command(name = "skycast", version)]
struct Cli {
    /// City to look up; defaults to the last searched city
    city: Vec<String>,

    /// Display unit, remembered for later runs
    #[arg(long, value_enum)]
    unit: Option<UnitArg>,

    /// List recent searches
    #[arg(long)]
    history: bool,

    /// Forget recent searches
    #[arg(long)]
    clear_history: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = skycast_core::init() {
        eprintln!("{}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let (config, _) = Config::load_validated(cli.config.as_deref())
        .map_err(|e| AppError::Config(ConfigError::ParseError(format!("{:#}", e))))?;

    let app = App::new(config)?;
    tracing::debug!("Data directory: {}", app.config().data_dir.display());

    if let Some(unit) = cli.unit {
        app.set_unit(unit.into())?;
    }

    if cli.clear_history {
        app.clear_history()?;
        println!("Search history cleared.");
    }

    if cli.history {
        print!("{}", render::render_history(&app.history()));
    }

    let typed = cli.city.join(" ");
    let city = if !typed.trim().is_empty() {
        typed
    } else if cli.history || cli.clear_history {
        return Ok(());
    } else if let Some(last) = app.last_city() {
        last
    } else {
        println!("Enter a city name to get the current weather, e.g. `skycast London`.");
        return Ok(());
    };

    let report = app.search(&city).await?;
    print!("{}", render::render_report(&report, app.unit()));

    Ok(())
}
