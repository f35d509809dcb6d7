//! Plain-text rendering of the two panels.

use std::fmt::Write;

use fieldcast_weather::{CurrentConditions, DailySummary, Units};

use crate::models::weather_panel::NO_DATA_MESSAGE;
use crate::models::{SoilPanel, WeatherPanel, WeatherView};

pub const LOADING_MESSAGE: &str = "Loading weather data...";

const DAY_FORMAT: &str = "%a, %b %-d";

pub fn render_weather(panel: &WeatherPanel) -> String {
    let report = match panel.view() {
        WeatherView::Loading => return LOADING_MESSAGE.to_string(),
        WeatherView::Error(message) => return format!("Error: {}", message),
        WeatherView::Empty => return NO_DATA_MESSAGE.to_string(),
        WeatherView::Ready(report) => report,
    };

    let mut out = String::new();
    let _ = writeln!(out, "Weather near {}", report.coordinate);
    if let Some(current) = &report.current {
        out.push('\n');
        render_current(&mut out, current, report.units);
    }
    if !report.daily.is_empty() {
        let _ = writeln!(out, "\nDaily Forecast");
        for day in &report.daily {
            render_day(&mut out, day, report.units);
        }
    }
    out
}

fn render_current(out: &mut String, current: &CurrentConditions, units: Units) {
    let _ = writeln!(out, "Current Weather");
    let _ = writeln!(out, "  {} ({})", capitalize(&current.description), current.icon_url());
    let _ = writeln!(
        out,
        "  Temperature:   {}{}",
        current.temperature,
        units.temperature_suffix()
    );
    let _ = writeln!(out, "  Humidity:      {}%", current.humidity);
    let _ = writeln!(
        out,
        "  Wind Speed:    {} {}",
        current.wind_speed,
        units.speed_suffix()
    );
    let _ = writeln!(out, "  Precipitation: {} mm", current.precipitation);
}

fn render_day(out: &mut String, day: &DailySummary, units: Units) {
    let suffix = units.temperature_suffix();
    let _ = writeln!(
        out,
        "  {:<12} {}{} / {}{}  {}%  {} {}  {} mm  {}",
        day.date.format(DAY_FORMAT).to_string(),
        day.temp_min,
        suffix,
        day.temp_max,
        suffix,
        day.humidity,
        day.wind_speed,
        units.speed_suffix(),
        day.precipitation,
        day.weather
    );
}

pub fn render_soil(panel: &SoilPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", panel.button_label());

    if let Some(message) = panel.error_message() {
        let _ = writeln!(out, "Error: {}", message);
    }

    if let Some(estimate) = panel.estimate() {
        let _ = writeln!(out, "\nSoil NPK Analysis (0-5cm depth)");
        let _ = writeln!(out, "  Nitrogen (N):   {}", estimate.nitrogen);
        let _ = writeln!(out, "  Phosphorus (P): {}", estimate.phosphorus);
        let _ = writeln!(out, "  Potassium (K):  {}", estimate.potassium);
        let _ = writeln!(out, "  Soil Texture:   {}", capitalize(estimate.texture.as_str()));
        let _ = writeln!(out, "  pH Level:       {}", estimate.ph);
    }
    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        SoilError, SoilServiceMessage, WeatherError, WeatherReport, WeatherServiceMessage,
    };
    use chrono::NaiveDateTime;
    use fieldcast_soil::{estimate, SoilReadings};
    use fieldcast_weather::{Coordinate, Forecast, IntervalSample, LocationError};

    fn sample(ts: &str, temp: f64, rain: Option<f64>) -> IntervalSample {
        IntervalSample {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            temperature: temp,
            temp_min: temp,
            temp_max: temp,
            humidity: 70,
            wind_speed: 4.5,
            precipitation: rain,
            description: "light rain".to_string(),
            icon: "10d".to_string(),
        }
    }

    fn ready_panel() -> WeatherPanel {
        let forecast = Forecast {
            coordinate: Coordinate::new(51.57, 5.39),
            units: Units::Metric,
            samples: vec![
                sample("2024-03-04 09:00:00", 8.0, None),
                sample("2024-03-04 12:00:00", 11.5, Some(1.5)),
                sample("2024-03-05 09:00:00", 6.0, Some(0.5)),
            ],
        };
        let mut panel = WeatherPanel::new();
        let (generation, _) = panel.start_current_location();
        panel.apply(WeatherServiceMessage::FetchDone {
            generation,
            result: Ok(WeatherReport::from_forecast(&forecast)),
        });
        panel
    }

    #[test]
    fn test_render_ready_weather() {
        let text = render_weather(&ready_panel());
        assert!(text.contains("Current Weather"));
        assert!(text.contains("Light rain (http://openweathermap.org/img/wn/10d.png)"));
        assert!(text.contains("Temperature:   8°C"));
        assert!(text.contains("Precipitation: 0 mm"));
        assert!(text.contains("Mon, Mar 4"));
        assert!(text.contains("Tue, Mar 5"));
        assert!(text.contains("8°C / 11.5°C"));
    }

    #[test]
    fn test_render_weather_states() {
        let mut panel = WeatherPanel::new();
        assert_eq!(render_weather(&panel), NO_DATA_MESSAGE);

        let (generation, _) = panel.submit_search("Nowhere").unwrap();
        assert_eq!(render_weather(&panel), LOADING_MESSAGE);

        panel.apply(WeatherServiceMessage::FetchDone {
            generation,
            result: Err(WeatherError::Pipeline(LocationError::CityNotFound.into())),
        });
        assert_eq!(render_weather(&panel), "Error: City not found");
    }

    #[test]
    fn test_render_soil_estimate() {
        let mut panel = SoilPanel::new();
        panel.press();
        panel.apply(SoilServiceMessage::FetchDone {
            generation: 1,
            result: Ok(estimate(&SoilReadings {
                ph: Some(6.5),
                organic_carbon_density: None,
                cec: Some(10.0),
                sand: Some(20.0),
                clay: Some(10.0),
            })),
        });

        let text = render_soil(&panel);
        assert!(text.starts_with("[Reset]"));
        assert!(text.contains("Soil NPK Analysis (0-5cm depth)"));
        assert!(text.contains("Nitrogen (N):   unavailable"));
        assert!(text.contains("Phosphorus (P): 45 mg/kg"));
        assert!(text.contains("Soil Texture:   Loamy"));
    }

    #[test]
    fn test_render_soil_error() {
        let mut panel = SoilPanel::new();
        panel.press();
        panel.apply(SoilServiceMessage::FetchDone {
            generation: 1,
            result: Err(SoilError::Pipeline(fieldcast_soil::SoilError::Status(503))),
        });
        let text = render_soil(&panel);
        assert!(text.starts_with("[Get NPK Values]"));
        assert!(text.contains("Error: Failed to fetch soil data"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize(""), "");
    }
}
