//! HTTP client for the geolocation and weather services
//!
//! One attempt per call, no retry. Transport failures, non-success statuses
//! and unexpected bodies all come back as structured errors so the
//! orchestrator can put them in an outcome.

use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{LocationFetchError, WeatherFetchError};
use crate::state::{Location, Weather};

// ============================================================================
// Geolocation API
// ============================================================================

/// ipinfo.io response; other fields are ignored
#[derive(Debug, Deserialize)]
struct GeoResponse {
    loc: String,
    city: String,
    country: String,
}

// ============================================================================
// Weather API
// ============================================================================

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    weather: Vec<Condition>,
    main: MainReadings,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Condition {
    id: u32,
    main: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

/// Client for both services, shared by every fetch task
#[derive(Debug, Clone)]
pub struct WeatherApi {
    http: reqwest::Client,
    geo_url: String,
    weather_url: String,
    api_key: String,
    ipinfo_token: Option<String>,
}

impl WeatherApi {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("ipweather/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            geo_url: config.geo_url.clone(),
            weather_url: config.weather_url.clone(),
            api_key: config.api_key.clone(),
            ipinfo_token: config.ipinfo_token.clone(),
        })
    }

    /// Geolocate the machine by its public IP
    pub async fn fetch_location(&self) -> Result<Location, LocationFetchError> {
        let mut request = self.http.get(&self.geo_url).header(ACCEPT, "application/json");
        if let Some(token) = &self.ipinfo_token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocationFetchError::Status(status.as_u16()));
        }

        let body: GeoResponse = response.json().await?;
        let (lat, lon) = parse_coordinates(&body.loc)?;

        Ok(Location {
            city: body.city,
            country: body.country,
            lat,
            lon,
        })
    }

    /// Current conditions at `lat`/`lon`, temperatures in Celsius
    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<Weather, WeatherFetchError> {
        let response = self
            .http
            .get(&self.weather_url)
            .header(ACCEPT, "application/json")
            .query(&[("lat", lat), ("lon", lon)])
            .query(&[("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherFetchError::Status(status.as_u16()));
        }

        let body: WeatherResponse = response.json().await?;
        let condition = body
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherFetchError::MissingCondition)?;

        Ok(Weather {
            id: condition.id,
            status: condition.main,
            temp: body.main.temp,
            wind_speed: body.wind.speed,
        })
    }
}

/// Parse a `"lat,lon"` pair such as `"51.5074,-0.1278"`
///
/// Exactly two comma-separated finite numbers, latitude within ±90 and
/// longitude within ±180.
pub fn parse_coordinates(loc: &str) -> Result<(f64, f64), LocationFetchError> {
    let malformed = || LocationFetchError::MalformedCoordinates(loc.to_string());

    let mut parts = loc.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let lon: f64 = lon.trim().parse().map_err(|_| malformed())?;

    if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
        return Err(malformed());
    }

    Ok((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("51.5,-0.12"), Ok((51.5, -0.12)));
        assert_eq!(parse_coordinates(" 40.7128, -74.0060 "), Ok((40.7128, -74.006)));
        assert_eq!(parse_coordinates("-90,180"), Ok((-90.0, 180.0)));
    }

    #[test]
    fn test_parse_coordinates_rejects_malformed() {
        for loc in ["", "51.5", "51.5,", "a,b", "1,2,3", "91,0", "0,181", "NaN,0", "inf,0"] {
            assert_eq!(
                parse_coordinates(loc),
                Err(LocationFetchError::MalformedCoordinates(loc.to_string())),
                "{loc:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_weather_response_shape() {
        let body: WeatherResponse = serde_json::from_str(
            r#"{"weather":[{"id":800,"main":"Clear","description":"clear sky"}],
                "main":{"temp":18,"humidity":40},"wind":{"speed":3.1},"name":"London"}"#,
        )
        .expect("decode");

        assert_eq!(body.weather[0].id, 800);
        assert_eq!(body.weather[0].main, "Clear");
        assert_eq!(body.main.temp, 18.0);
        assert_eq!(body.wind.speed, 3.1);
    }
}
