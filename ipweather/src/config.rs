//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_GEO_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current weather for wherever this machine is
#[derive(Parser, Debug, Clone)]
#[command(name = "ipweather", version)]
#[command(about = "Current weather for the machine's IP location")]
pub struct Config {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Geolocation endpoint returning `{loc, city, country}`
    #[arg(long, env = "IPWEATHER_GEO_URL", default_value = DEFAULT_GEO_URL)]
    pub geo_url: String,

    /// Optional ipinfo.io access token
    #[arg(long, env = "IPINFO_TOKEN", hide_env_values = true)]
    pub ipinfo_token: Option<String>,

    /// Current-weather endpoint
    #[arg(long, env = "IPWEATHER_WEATHER_URL", default_value = DEFAULT_WEATHER_URL)]
    pub weather_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Show temperatures in Fahrenheit on start
    #[arg(long)]
    pub fahrenheit: bool,

    /// Re-locate and refresh every N seconds
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Configuration pointing at the given endpoints with defaults elsewhere
    pub fn new(
        api_key: impl Into<String>,
        geo_url: impl Into<String>,
        weather_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            geo_url: geo_url.into(),
            ipinfo_token: None,
            weather_url: weather_url.into(),
            timeout_secs: 10,
            fahrenheit: false,
            refresh_secs: None,
            log_file: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
