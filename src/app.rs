use std::sync::Arc;
use std::time::Duration;

use skycast_core::{AppError, Config};
use skycast_weather::{PreferenceStore, TemperatureUnit, WeatherProvider, WeatherReport};

use crate::error_mapping::WeatherErrorExt;

/// Search session: provider client plus the user's stored preferences
pub struct App {
    config: Arc<Config>,
    provider: WeatherProvider,
    store: PreferenceStore,
}

impl App {
    /// Create a new application instance from a loaded configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        let weather = &config.weather;
        let provider = WeatherProvider::new(
            &weather.api_base_url,
            weather.effective_api_key(),
            Duration::from_secs(weather.request_timeout_secs),
        )
        .map_err(WeatherErrorExt::into_app_error)?;

        let store = PreferenceStore::open(&config.data_dir).map_err(WeatherErrorExt::into_app_error)?;
        tracing::debug!("Preferences at {}", store.path().display());

        Ok(Self {
            config: Arc::new(config),
            provider,
            store,
        })
    }

    /// Look up `city`, then remember it on success.
    ///
    /// A failure to save the history is logged and does not fail the search.
    pub async fn search(&self, city: &str) -> Result<WeatherReport, AppError> {
        tracing::info!("Searching weather for {}", city.trim());

        let report = self
            .provider
            .fetch_report(city)
            .await
            .map_err(WeatherErrorExt::into_app_error)?;

        if let Err(e) = self.store.record_search(city) {
            tracing::warn!("Could not update search history: {}", e);
        }

        Ok(report)
    }

    /// Unit the user last picked, else the configured default
    pub fn unit(&self) -> TemperatureUnit {
        self.store
            .unit()
            .unwrap_or_else(|| unit_from_config(self.config.weather.default_unit))
    }

    pub fn set_unit(&self, unit: TemperatureUnit) -> Result<(), AppError> {
        self.store
            .set_unit(unit)
            .map_err(WeatherErrorExt::into_app_error)
    }

    pub fn last_city(&self) -> Option<String> {
        self.store.last_city()
    }

    pub fn history(&self) -> Vec<String> {
        self.store.history()
    }

    pub fn clear_history(&self) -> Result<(), AppError> {
        tracing::info!("Clearing search history");
        self.store
            .clear_history()
            .map_err(WeatherErrorExt::into_app_error)
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn unit_from_config(unit: skycast_core::TemperatureUnit) -> TemperatureUnit {
    match unit {
        skycast_core::TemperatureUnit::Celsius => TemperatureUnit::Celsius,
        skycast_core::TemperatureUnit::Fahrenheit => TemperatureUnit::Fahrenheit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.data_dir = dir.to_path_buf();
        config.weather.api_base_url = "http://127.0.0.1:9".to_string();
        config
    }

    #[test]
    fn unit_defaults_to_config_until_chosen() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.weather.default_unit = skycast_core::TemperatureUnit::Fahrenheit;

        let app = App::new(config).unwrap();
        assert_eq!(app.unit(), TemperatureUnit::Fahrenheit);

        app.set_unit(TemperatureUnit::Celsius).unwrap();
        assert_eq!(app.unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn bad_base_url_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.weather.api_base_url = "nope".to_string();

        let err = App::new(config).err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }
}
