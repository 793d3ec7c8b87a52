use clap::{Parser, Subcommand};
use herecast_core::{
    AlertSink, Config, ConfiguredLocationProvider, Coordinates, OpenWeatherClient,
    ScreenController, Units,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "herecast", version, about = "Current weather for your location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default location.
    Configure,

    /// Show the current weather.
    Show {
        /// Latitude override; must be given together with --lon.
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude override; must be given together with --lat.
        #[arg(long)]
        lon: Option<f64>,

        /// Unit system: metric, imperial or standard.
        #[arg(long, default_value = "metric", value_parser = parse_units)]
        units: Units,

        /// Two-letter language code for condition descriptions.
        #[arg(long, default_value = "fi")]
        lang: String,

        /// Keep the screen open and refresh on demand.
        #[arg(long)]
        watch: bool,
    },
}

fn parse_units(value: &str) -> Result<Units, String> {
    Units::try_from(value).map_err(|e| e.to_string())
}

/// Prints failed-cycle alerts to stderr, apart from the inline error view.
#[derive(Debug, Clone, Copy)]
struct TerminalAlerts;

impl AlertSink for TerminalAlerts {
    fn alert(&self, title: &str, message: &str) {
        eprintln!("[{title}] {message}");
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { lat, lon, units, lang, watch } => {
                show(lat, lon, units, lang, watch).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::from_file()?;

    let api_key = inquire::Text::new("OpenWeather API key:").prompt()?;
    cfg.set_api_key(api_key.trim().to_string());

    let store_location = inquire::Confirm::new("Store a default location?")
        .with_default(cfg.location.is_some())
        .prompt()?;
    if store_location {
        let lat = inquire::CustomType::<f64>::new("Latitude:").prompt()?;
        let lon = inquire::CustomType::<f64>::new("Longitude:").prompt()?;
        cfg.set_location(Coordinates::new(lat, lon));
    }

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    lat: Option<f64>,
    lon: Option<f64>,
    units: Units,
    lang: String,
    watch: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;

    let coordinates = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        (None, None) => config.location,
        _ => anyhow::bail!("--lat and --lon must be given together"),
    };

    let mut controller = ScreenController::new(
        config.api_key(),
        Box::new(OpenWeatherClient::new(config.api_key())),
        Box::new(ConfiguredLocationProvider::new(coordinates)),
        Box::new(TerminalAlerts),
    )
    .units(units)
    .language(lang);

    println!("{}", render::screen_to_string(controller.state()));
    controller.run_cycle().await;
    println!("{}", render::screen_to_string(controller.state()));

    if watch {
        // Refreshes run strictly one at a time; the previous reading stays
        // on screen if a refresh fails.
        loop {
            let again = inquire::Confirm::new("Refresh?").with_default(true).prompt()?;
            if !again {
                break;
            }
            controller.refresh().await;
            println!("{}", render::screen_to_string(controller.state()));
        }
    }

    Ok(())
}
