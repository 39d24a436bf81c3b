//! OpenWeatherMap-compatible client.
//!
//! Two calls make up a search: current conditions by city name, then the
//! 5-day/3-hour forecast for the coordinates that call returned.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::aggregate::aggregate;
use crate::error::WeatherError;
use crate::types::{Coordinates, CurrentWeather, ForecastSample, WeatherReport};
use crate::units::round_half_up;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct WireCondition {
    main: String,
    #[serde(default)]
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WireMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct WireWind {
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct WireClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct WireCurrent {
    name: String,
    coord: Coordinates,
    weather: Vec<WireCondition>,
    main: WireMain,
    wind: WireWind,
    sys: WireSys,
    clouds: WireClouds,
    visibility: Option<f64>,
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct WireForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct WireForecastItem {
    dt: i64,
    main: WireForecastMain,
    weather: Vec<WireCondition>,
}

#[derive(Debug, Deserialize)]
struct WireForecast {
    list: Vec<WireForecastItem>,
}

impl TryFrom<WireCurrent> for CurrentWeather {
    type Error = WeatherError;

    fn try_from(wire: WireCurrent) -> Result<Self, Self::Error> {
        let condition = wire
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::MalformedData("weather[] is empty".to_string()))?;

        Ok(Self {
            city: wire.name,
            country: wire.sys.country.unwrap_or_default(),
            temperature: round_half_up(wire.main.temp),
            feels_like: round_half_up(wire.main.feels_like),
            description: condition.description,
            icon: condition.icon,
            condition: condition.main,
            humidity: wire.main.humidity,
            wind_speed: wire.wind.speed,
            wind_direction: wire.wind.deg.unwrap_or(0.0),
            pressure: wire.main.pressure,
            visibility_km: wire.visibility.map(|metres| round_half_up(metres / 1000.0)),
            sunrise: wire.sys.sunrise,
            sunset: wire.sys.sunset,
            timezone_offset: wire.timezone,
            coords: wire.coord,
            cloudiness: wire.clouds.all,
        })
    }
}

impl TryFrom<WireForecastItem> for ForecastSample {
    type Error = WeatherError;

    fn try_from(item: WireForecastItem) -> Result<Self, Self::Error> {
        let dt = item.dt;
        let condition = item.weather.into_iter().next().ok_or_else(|| {
            WeatherError::MalformedData(format!("forecast entry {} has no weather", dt))
        })?;

        let sample = ForecastSample::from_unix(dt, item.main.temp, condition.main, condition.icon)?;
        Ok(if condition.description.is_empty() {
            sample
        } else {
            sample.with_description(condition.description)
        })
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    /// Create a provider for `base_url` (e.g. `https://api.openweathermap.org/data/2.5`).
    ///
    /// # Errors
    ///
    /// Fails if the base URL is not an absolute http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| WeatherError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(WeatherError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                base_url,
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, WeatherError> {
        let raw = format!("{}/{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| WeatherError::InvalidUrl(format!("{}: {}", raw, e)))?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("units", "metric")
            .append_pair("appid", &self.api_key);
        Ok(url)
    }

    /// Current conditions for a city name.
    ///
    /// # Errors
    ///
    /// `CityNotFound` for a blank name or a 404, `InvalidApiKey` for a 401,
    /// `Api` for any other non-success status, `MalformedData` if the body is
    /// missing fields, `Network` if the request itself failed.
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::CityNotFound(String::new()));
        }

        let url = self.endpoint("weather", &[("q", city.to_string())])?;
        tracing::debug!("Fetching current weather for {}", city);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(WeatherError::InvalidApiKey);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Current weather request failed with {}", status);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let wire: WireCurrent = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedData(format!("current weather: {}", e)))?;

        let current = CurrentWeather::try_from(wire)?;
        tracing::info!(
            "Current weather for {}, {}: {}°C {}",
            current.city,
            current.country,
            current.temperature,
            current.condition
        );
        Ok(current)
    }

    /// Raw 3-hourly forecast samples for a coordinate pair.
    ///
    /// # Errors
    ///
    /// `InvalidApiKey` for a 401, `Api` for any other non-success status,
    /// `MalformedData` if any entry lacks a timestamp, temperature or
    /// condition, `Network` if the request itself failed.
    pub async fn fetch_forecast(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        let url = self.endpoint(
            "forecast",
            &[("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())],
        )?;
        tracing::debug!("Fetching forecast for {}, {}", coords.lat, coords.lon);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(WeatherError::InvalidApiKey);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Forecast request failed with {}", status);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let wire: WireForecast = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedData(format!("forecast: {}", e)))?;

        let samples = wire
            .list
            .into_iter()
            .map(ForecastSample::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Received {} forecast samples", samples.len());
        Ok(samples)
    }

    /// Run a full search: current conditions, then the forecast for the
    /// returned coordinates, reduced to daily summaries.
    ///
    /// # Errors
    ///
    /// The first error from either fetch; nothing is returned partially.
    pub async fn fetch_report(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let current = self.fetch_current(city).await?;
        let samples = self.fetch_forecast(current.coords).await?;
        let daily = aggregate(&samples);

        Ok(WeatherReport {
            current,
            daily,
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> WeatherProvider {
        WeatherProvider::new(
            "https://api.example.com/data/2.5/",
            "secret",
            Duration::from_secs(10),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = WeatherProvider::new("ftp://example.com", "k", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidUrl(_)));
        assert!(WeatherProvider::new("not a url", "k", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_endpoint_encodes_city_and_appends_key() {
        let url = provider()
            .endpoint("weather", &[("q", "São Paulo".to_string())])
            .unwrap();
        assert_eq!(url.path(), "/data/2.5/weather");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "São Paulo".to_string()),
                ("units".to_string(), "metric".to_string()),
                ("appid".to_string(), "secret".to_string()),
            ]
        );
    }

    #[test]
    fn test_forecast_item_without_weather_is_malformed() {
        let item: WireForecastItem = serde_json::from_value(serde_json::json!({
            "dt": 1717200000,
            "main": { "temp": 12.0 },
            "weather": []
        }))
        .unwrap();
        let err = ForecastSample::try_from(item).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedData(_)));
    }

    #[test]
    fn test_current_conversion_rounds_and_defaults() {
        let wire: WireCurrent = serde_json::from_value(serde_json::json!({
            "name": "Reykjavik",
            "coord": { "lat": 64.1355, "lon": -21.8954 },
            "weather": [{ "main": "Clouds", "description": "overcast clouds", "icon": "04d" }],
            "main": { "temp": 7.5, "feels_like": 3.49, "humidity": 81, "pressure": 1002 },
            "wind": { "speed": 9.3 },
            "sys": { "sunrise": 1717200000, "sunset": 1717286400 },
            "clouds": { "all": 100 },
            "visibility": 9500,
            "timezone": 0
        }))
        .unwrap();

        let current = CurrentWeather::try_from(wire).unwrap();
        assert_eq!(current.temperature, 8);
        assert_eq!(current.feels_like, 3);
        assert_eq!(current.country, "");
        assert_eq!(current.wind_direction, 0.0);
        assert_eq!(current.visibility_km, Some(10));
        assert_eq!(current.condition, "Clouds");
    }
}
