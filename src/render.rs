//! Plain-text rendering of a search result.

use std::fmt::Write;

use skycast_weather::{format_local_time, wind_direction, TemperatureUnit, WeatherReport};

pub fn render_report(report: &WeatherReport, unit: TemperatureUnit) -> String {
    let current = &report.current;
    let mut out = String::new();

    let place = if current.country.is_empty() {
        current.city.clone()
    } else {
        format!("{}, {}", current.city, current.country)
    };
    let _ = writeln!(out, "{}", place);
    let _ = writeln!(
        out,
        "  {}  {} ({})  feels like {}",
        unit.display(f64::from(current.temperature)),
        current.condition,
        current.description,
        unit.display(f64::from(current.feels_like)),
    );

    let _ = writeln!(out, "  Humidity    {}%", current.humidity);
    let _ = writeln!(
        out,
        "  Wind        {:.1} m/s {}",
        current.wind_speed,
        wind_direction(current.wind_direction)
    );
    let _ = writeln!(out, "  Pressure    {} hPa", current.pressure);
    if let Some(km) = current.visibility_km {
        let _ = writeln!(out, "  Visibility  {} km", km);
    }
    let _ = writeln!(out, "  Cloudiness  {}%", current.cloudiness);
    let _ = writeln!(out, "  Sunrise     {}", local_time(current.sunrise, current.timezone_offset));
    let _ = writeln!(out, "  Sunset      {}", local_time(current.sunset, current.timezone_offset));

    if !report.daily.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}-day forecast", report.daily.len());
    }
    for day in &report.daily {
        let _ = writeln!(
            out,
            "  {:<12} {:<14} {:<4} {:>6} / {:<6}",
            day.label,
            day.condition,
            day.icon,
            unit.display(f64::from(day.min_temp)),
            unit.display(f64::from(day.max_temp)),
        );
    }

    out
}

pub fn render_history(history: &[String]) -> String {
    if history.is_empty() {
        return "No recent searches.\n".to_string();
    }
    history
        .iter()
        .enumerate()
        .map(|(i, city)| format!("{}. {}\n", i + 1, city))
        .collect()
}

fn local_time(timestamp: i64, offset: i32) -> String {
    format_local_time(timestamp, offset).unwrap_or_else(|| "--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skycast_weather::{aggregate, Coordinates, CurrentWeather, ForecastSample};

    const JUNE_1: i64 = 1_717_200_000;

    fn report() -> WeatherReport {
        let samples = vec![
            ForecastSample::from_unix(JUNE_1 + 9 * 3600, 18.0, "Rain", "10d").unwrap(),
            ForecastSample::from_unix(JUNE_1 + 12 * 3600, 22.0, "Rain", "10d").unwrap(),
            ForecastSample::from_unix(JUNE_1 + 18 * 3600, 15.0, "Clouds", "04d").unwrap(),
        ];
        WeatherReport {
            current: CurrentWeather {
                city: "Lisbon".into(),
                country: "PT".into(),
                temperature: 22,
                feels_like: 21,
                description: "light rain".into(),
                icon: "10d".into(),
                condition: "Rain".into(),
                humidity: 64,
                wind_speed: 5.0,
                wind_direction: 315.0,
                pressure: 1015.0,
                visibility_km: Some(10),
                sunrise: JUNE_1 + 5 * 3600 + 12 * 60,
                sunset: JUNE_1 + 20 * 3600 + 5 * 60,
                timezone_offset: 3600,
                coords: Coordinates { lat: 38.72, lon: -9.14 },
                cloudiness: 40,
            },
            daily: aggregate(&samples),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn renders_current_and_forecast_in_celsius() {
        let text = render_report(&report(), TemperatureUnit::Celsius);
        assert!(text.starts_with("Lisbon, PT\n"));
        assert!(text.contains("22°C  Rain (light rain)  feels like 21°C"));
        assert!(text.contains("NW"));
        assert!(text.contains("Sunrise     6:12 AM"));
        assert!(text.contains("Sunset      9:05 PM"));
        assert!(text.contains("Sat, Jun 1"));
        assert!(text.contains("15°C"));
    }

    #[test]
    fn converts_forecast_to_fahrenheit() {
        let text = render_report(&report(), TemperatureUnit::Fahrenheit);
        assert!(text.contains("72°F"));
        assert!(text.contains("59°F"));
        assert!(!text.contains("°C"));
    }

    #[test]
    fn history_listing() {
        assert_eq!(render_history(&[]), "No recent searches.\n");
        let history = vec!["Oslo".to_string(), "Lima".to_string()];
        assert_eq!(render_history(&history), "1. Oslo\n2. Lima\n");
    }
}
