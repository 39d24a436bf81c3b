//! Weather service for Skycast
//!
//! Fetches current conditions and the 5-day forecast from an
//! OpenWeatherMap-compatible API, reduces the forecast to daily summaries and
//! remembers recent searches.

pub mod aggregate;
pub mod error;
pub mod format;
pub mod provider;
pub mod store;
pub mod types;
pub mod units;
pub mod wind;

pub use aggregate::{aggregate, MAX_FORECAST_DAYS};
pub use error::WeatherError;
pub use format::{format_day_label, format_local_time};
pub use provider::WeatherProvider;
pub use store::{PreferenceStore, Preferences, HISTORY_LIMIT};
pub use types::*;
pub use units::{celsius_to_fahrenheit, round_half_up};
pub use wind::wind_direction;
