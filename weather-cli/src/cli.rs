use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode, Select, Text};
use tracing::{debug, info};
use weather_core::{
    Config, DetailsView, FixedPosition, HomePosition, LocationView, OpenWeatherProvider,
    SearchView, Units, provider_from_config, view::LOADING,
};

use crate::watch::{Step, WatchSession};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Unit system: metric, imperial or standard. Overrides config.
    #[arg(long, global = true)]
    pub units: Option<String>,

    /// API key for this invocation only. Overrides config and WEATHER_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively store the API key, units and home position.
    Configure,

    /// Show weather for a city.
    Search {
        /// City name, optionally with country code, e.g. "Paris,FR".
        city: String,
    },

    /// Show weather for the current location.
    Here {
        /// Latitude; falls back to the configured home position.
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        /// Longitude; falls back to the configured home position.
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Show the full block instead of just the place name.
        #[arg(long)]
        details: bool,
    },

    /// Show weather for a provider location id.
    Details {
        /// Numeric location id, e.g. 2643743 for London.
        id: u64,
    },

    /// Look up cities repeatedly, re-rendering on every state change.
    Watch,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match &self.command {
            Command::Configure => configure()?,
            Command::Search { city } => {
                let (config, provider) = self.connect()?;
                let mut view = SearchView::new(city.clone());
                view.search(&provider).await;
                if let Some(error) = &view.error {
                    bail!("{error}");
                }
                print_lines(&view.render(config.units));
            }
            Command::Here { lat, lon, details } => {
                let (config, provider) = self.connect()?;
                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(HomePosition { lat: *lat, lon: *lon }),
                    _ => config.home,
                };

                let mut view = LocationView::default();
                if *details {
                    view.toggle_details();
                }
                view.locate(&provider, &FixedPosition(position)).await;
                if let Some(error) = &view.error {
                    bail!("{error}");
                }
                print_lines(&view.render(config.units));
            }
            Command::Details { id } => {
                let (config, provider) = self.connect()?;
                eprintln!("{LOADING}");
                let mut view = DetailsView::new(*id);
                view.load(&provider).await;
                if view.weather.is_none() {
                    bail!("Weather details for location id {id} are unavailable");
                }
                print_lines(&view.render(config.units));
            }
            Command::Watch => {
                let (config, provider) = self.connect()?;
                watch(provider, config.units).await?;
            }
        }

        Ok(())
    }

    fn connect(&self) -> Result<(Config, OpenWeatherProvider)> {
        let config = self.resolve_config()?;
        let provider = provider_from_config(&config)?;
        Ok((config, provider))
    }

    /// Config file, then environment, then flags.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load()?;

        if let Some(units) = &self.units {
            config.units = Units::try_from(units.as_str())?;
        }
        if let Some(key) = &self.api_key {
            config.set_api_key(key.clone());
        }

        debug!(units = %config.units, base_url = config.base_url(), "resolved configuration");
        Ok(config)
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let starting = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(starting)
        .prompt()
        .context("Failed to read units")?;

    let set_home = Confirm::new("Set a home position for `weather here`?")
        .with_default(config.home.is_some())
        .prompt()?;
    config.home = if set_home {
        let lat = CustomType::<f64>::new("Latitude:").prompt()?;
        let lon = CustomType::<f64>::new("Longitude:").prompt()?;
        Some(HomePosition { lat, lon })
    } else {
        None
    };

    let path = config.save()?;
    info!(path = %path.display(), "saved configuration");
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// Interactive loop over the state store. Blank input refreshes the last city.
async fn watch(provider: OpenWeatherProvider, units: Units) -> Result<()> {
    let mut session = WatchSession::new(provider, units);

    println!("Enter a city, blank to refresh, `clear` to reset, `quit` to exit.");

    loop {
        let input = Text::new("City:").prompt().context("Failed to read city")?;
        if session.handle(&input, print_lines).await == Step::Quit {
            break;
        }
    }

    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
