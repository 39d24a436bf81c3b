//! Maps weather library errors to skycast_core::AppError for consistent user-facing messages.

use skycast_core::{AppError, ConfigError, ReqwestErrorExt, WeatherError};
use skycast_weather::WeatherError as LibWeatherError;

pub trait WeatherErrorExt {
    fn into_app_error(self) -> AppError;
}

impl WeatherErrorExt for LibWeatherError {
    fn into_app_error(self) -> AppError {
        match self {
            LibWeatherError::CityNotFound(city) => {
                AppError::Weather(WeatherError::LocationNotFound(city))
            }
            LibWeatherError::InvalidApiKey => AppError::Weather(WeatherError::InvalidApiKey),
            LibWeatherError::Api { status, .. } if status >= 500 => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            LibWeatherError::Api { status, message } => {
                AppError::Weather(WeatherError::ApiError(format!("{}: {}", status, message)))
            }
            LibWeatherError::MalformedData(s) => AppError::Weather(WeatherError::MalformedData(s)),
            LibWeatherError::InvalidUrl(s) => AppError::Config(ConfigError::Invalid(s)),
            LibWeatherError::Storage(s) => AppError::Storage(s),
            LibWeatherError::Network(e) => AppError::Network(e.into_network_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_not_found_maps_to_location_not_found() {
        let err = LibWeatherError::CityNotFound("Atlantis".into()).into_app_error();
        assert!(matches!(err, AppError::Weather(WeatherError::LocationNotFound(ref c)) if c == "Atlantis"));
        assert!(err.user_message().contains("City not found"));
    }

    #[test]
    fn upstream_failure_is_service_unavailable() {
        let err = LibWeatherError::Api {
            status: 503,
            message: "down".into(),
        }
        .into_app_error();
        assert!(matches!(err, AppError::Weather(WeatherError::ServiceUnavailable)));
        assert!(err.user_message().contains("unavailable"));
    }

    #[test]
    fn client_side_api_error_keeps_status() {
        let err = LibWeatherError::Api {
            status: 429,
            message: "slow down".into(),
        }
        .into_app_error();
        assert!(matches!(err, AppError::Weather(WeatherError::ApiError(ref m)) if m == "429: slow down"));
        assert_eq!(err.user_message(), "Error fetching weather data.");
    }

    #[test]
    fn malformed_and_storage_keep_their_kind() {
        assert!(matches!(
            LibWeatherError::MalformedData("x".into()).into_app_error(),
            AppError::Weather(WeatherError::MalformedData(_))
        ));
        assert!(matches!(
            LibWeatherError::Storage("x".into()).into_app_error(),
            AppError::Storage(_)
        ));
    }
}
