//! Weather snapshot for one coordinate: current conditions plus today's range.

use crate::api::{ApiClient, FEED_TIMEOUT};
use crate::models::{Block, Forecast};
use std::error::Error;
use tracing::instrument;

const WEATHER_HEADING: &str = "### 🌤️ Weather";

/// Short description of a WMO weather interpretation code.
pub fn describe_code(code: u16) -> &'static str {
    match code {
        0 => "clear sky",
        1 => "mainly clear",
        2 => "partly cloudy",
        3 => "overcast",
        45 | 48 => "fog",
        51 | 53 | 55 | 56 | 57 => "drizzle",
        61 | 63 | 65 | 66 | 67 => "rain",
        71 | 73 | 75 | 77 => "snow",
        80..=82 => "rain showers",
        85 | 86 => "snow showers",
        95 | 96 | 99 => "thunderstorm",
        _ => "unknown conditions",
    }
}

/// Render the forecast. Current conditions are required; the daily line is
/// dropped when any of its values is missing.
///
/// # Errors
///
/// Returns an error when the response has no current conditions.
pub fn render_forecast(forecast: &Forecast) -> Result<String, Box<dyn Error>> {
    let current = forecast
        .current_weather
        .as_ref()
        .ok_or("forecast has no current conditions")?;

    let mut lines = vec![format!(
        "- Now: **{:.1}°C**, wind {:.1} km/h ({})",
        current.temperature,
        current.windspeed,
        describe_code(current.weathercode)
    )];

    fn first(values: &[Option<f64>]) -> Option<f64> {
        values.first().copied().flatten()
    }
    let today = forecast.daily.as_ref().and_then(|daily| {
        Some((
            first(&daily.temperature_2m_min)?,
            first(&daily.temperature_2m_max)?,
            first(&daily.precipitation_sum)?,
        ))
    });
    if let Some((min, max, precipitation)) = today {
        lines.push(format!(
            "- Today: {min:.1}°C – {max:.1}°C, precipitation {precipitation:.1} mm"
        ));
    }

    Ok(lines.join("\n"))
}

async fn fetch_forecast(api: &ApiClient, url: &str, lat: f64, lon: f64) -> Result<Forecast, Box<dyn Error>> {
    let (lat, lon) = (lat.to_string(), lon.to_string());
    api.get_json(
        url,
        &[
            ("latitude", lat.as_str()),
            ("longitude", lon.as_str()),
            ("current_weather", "true"),
            ("daily", "temperature_2m_max,temperature_2m_min,precipitation_sum"),
            ("timezone", "UTC"),
            ("forecast_days", "1"),
        ],
        FEED_TIMEOUT,
    )
    .await
}

#[instrument(level = "info", skip(api))]
pub async fn weather_block(api: &ApiClient, url: &str, lat: f64, lon: f64) -> Block {
    let result = fetch_forecast(api, url, lat, lon)
        .await
        .and_then(|forecast| render_forecast(&forecast));
    Block::from_result(WEATHER_HEADING, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast(json: &str) -> Forecast {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_render_forecast_full() {
        let f = forecast(
            r#"{"current_weather":{"temperature":12.34,"windspeed":10.0,"weathercode":3},
                "daily":{"temperature_2m_max":[14.0],"temperature_2m_min":[7.3],"precipitation_sum":[0.2]}}"#,
        );
        assert_eq!(
            render_forecast(&f).unwrap(),
            "- Now: **12.3°C**, wind 10.0 km/h (overcast)\n- Today: 7.3°C – 14.0°C, precipitation 0.2 mm"
        );
    }

    #[test]
    fn test_render_forecast_without_daily() {
        let f = forecast(r#"{"current_weather":{"temperature":-1.0,"windspeed":3.5,"weathercode":71}}"#);
        assert_eq!(
            render_forecast(&f).unwrap(),
            "- Now: **-1.0°C**, wind 3.5 km/h (snow)"
        );
    }

    #[test]
    fn test_render_forecast_null_daily_value_drops_line() {
        let f = forecast(
            r#"{"current_weather":{"temperature":20.0,"windspeed":1.0,"weathercode":0},
                "daily":{"temperature_2m_max":[null],"temperature_2m_min":[15.0],"precipitation_sum":[0.0]}}"#,
        );
        assert_eq!(render_forecast(&f).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_render_forecast_missing_current_is_error() {
        let f = forecast(r#"{"daily":{"temperature_2m_max":[1.0]}}"#);
        assert!(render_forecast(&f).is_err());
    }

    #[test]
    fn test_describe_code() {
        assert_eq!(describe_code(0), "clear sky");
        assert_eq!(describe_code(81), "rain showers");
        assert_eq!(describe_code(1234), "unknown conditions");
    }
}
