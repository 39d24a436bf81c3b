use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WeatherError;

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl FromStr for TemperatureUnit {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" => Ok(Self::Celsius),
            "f" | "fahrenheit" => Ok(Self::Fahrenheit),
            other => Err(WeatherError::MalformedData(format!(
                "unknown temperature unit: {}",
                other
            ))),
        }
    }
}

/// Geographic coordinates reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One raw forecast measurement, usually at 3-hour resolution.
///
/// Only constructed through [`ForecastSample::from_unix`] or deserialization,
/// both of which reject out-of-range timestamps and non-finite temperatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SampleRecord")]
pub struct ForecastSample {
    #[serde(with = "chrono::serde::ts_seconds")]
    time: DateTime<Utc>,
    temperature: f64,
    condition: String,
    icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Deserialize)]
struct SampleRecord {
    time: i64,
    temperature: f64,
    condition: String,
    icon: String,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<SampleRecord> for ForecastSample {
    type Error = WeatherError;

    fn try_from(record: SampleRecord) -> Result<Self, Self::Error> {
        let sample =
            ForecastSample::from_unix(record.time, record.temperature, record.condition, record.icon)?;
        Ok(match record.description {
            Some(description) => sample.with_description(description),
            None => sample,
        })
    }
}

impl ForecastSample {
    /// Build a sample from a unix timestamp.
    ///
    /// # Errors
    ///
    /// Returns `MalformedData` if the timestamp is out of range or the
    /// temperature is not a finite number.
    pub fn from_unix(
        timestamp: i64,
        temperature: f64,
        condition: impl Into<String>,
        icon: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let time = DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or_else(|| {
            WeatherError::MalformedData(format!("timestamp out of range: {}", timestamp))
        })?;
        if !temperature.is_finite() {
            return Err(WeatherError::MalformedData(format!(
                "temperature is not finite at {}",
                timestamp
            )));
        }

        Ok(Self {
            time,
            temperature,
            condition: condition.into(),
            icon: icon.into(),
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Valid time of the sample
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Temperature in °C, always finite
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Condition group label, e.g. "Rain"
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Provider icon id, e.g. "10d"
    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Seconds since the epoch
    pub fn timestamp(&self) -> i64 {
        self.time.timestamp()
    }

    /// UTC calendar day this sample belongs to
    pub fn date_key(&self) -> DateKey {
        DateKey(self.time.date_naive())
    }
}

/// Calendar day used to bucket samples. Displays and parses as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(pub NaiveDate);

impl DateKey {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateKey)
            .map_err(|e| WeatherError::MalformedData(format!("invalid date key {:?}: {}", s, e)))
    }
}

/// Per-day reduction of the forecast samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Short label such as "Sat, Jun 1"
    pub label: String,
    pub date: DateKey,
    /// Rounded °C
    pub min_temp: i32,
    /// Rounded °C
    pub max_temp: i32,
    /// Most frequent condition of the day
    pub condition: String,
    pub icon: String,
    /// The day's samples in the order they were received
    pub samples: Vec<ForecastSample>,
}

/// Current conditions for a searched city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    /// Rounded °C
    pub temperature: i32,
    /// Rounded °C
    pub feels_like: i32,
    pub description: String,
    pub icon: String,
    pub condition: String,
    pub humidity: u8,
    /// m/s
    pub wind_speed: f64,
    /// Degrees the wind blows from
    pub wind_direction: f64,
    /// hPa
    pub pressure: f64,
    /// Kilometres, when reported
    pub visibility_km: Option<i32>,
    pub sunrise: i64,
    pub sunset: i64,
    /// Seconds east of UTC
    pub timezone_offset: i32,
    pub coords: Coordinates,
    /// Cloud cover in percent
    pub cloudiness: u8,
}

/// Everything one search produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub daily: Vec<DailySummary>,
    pub fetched_at: DateTime<Utc>,
}
