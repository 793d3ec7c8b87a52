//! Terminal rendering of the three screen views.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use herecast_core::{ScreenState, View, format_temperature, icon_url};

/// Render the screen for its current view.
pub fn screen_to_string(state: &ScreenState) -> String {
    match state.view() {
        View::Loading => "Loading weather...".to_string(),
        View::Error => format!("Error: {}", state.error),
        View::Loaded => loaded_view(state),
    }
}

fn loaded_view(state: &ScreenState) -> String {
    let Some(weather) = state.weather.as_ref() else {
        return "No weather data yet.".to_string();
    };

    let mut out = String::new();
    out.push_str(&format!("{}, {}\n\n", weather.name, weather.sys.country));

    // An empty condition list renders as absence, never an error.
    if let Some(condition) = weather.condition() {
        out.push_str(&format!("{}\n", condition.description));
        out.push_str(&format!("{}\n\n", icon_url(&condition.icon)));
    }

    out.push_str(&format!("{}\n", format_temperature(weather.main.temp)));
    out.push_str(&format!(
        "Feels like {}\n\n",
        format_temperature(weather.main.feels_like)
    ));

    row(
        &mut out,
        "Min / Max",
        format!(
            "{} / {}",
            format_temperature(weather.main.temp_min),
            format_temperature(weather.main.temp_max)
        ),
    );
    row(&mut out, "Humidity", format!("{}%", weather.main.humidity));
    row(&mut out, "Pressure", format!("{} hPa", weather.main.pressure));

    let wind = match weather.wind.gust {
        Some(gust) => format!("{} m/s (gusts {gust} m/s)", weather.wind.speed),
        None => format!("{} m/s", weather.wind.speed),
    };
    row(&mut out, "Wind", wind);

    row(&mut out, "Cloud cover", format!("{}%", weather.clouds.all));

    if let Some(visibility) = weather.visibility {
        row(
            &mut out,
            "Visibility",
            format!("{:.1} km", f64::from(visibility) / 1000.0),
        );
    }
    if let Some(rain) = weather.rain.as_ref().and_then(|r| r.last_hour) {
        row(&mut out, "Rain (1h)", format!("{rain} mm"));
    }
    if let Some(snow) = weather.snow.as_ref().and_then(|s| s.last_hour) {
        row(&mut out, "Snow (1h)", format!("{snow} mm"));
    }

    row(&mut out, "Sunrise", local_time(weather.sys.sunrise, weather.timezone));
    row(&mut out, "Sunset", local_time(weather.sys.sunset, weather.timezone));

    if let Some(location) = state.location {
        out.push_str(&format!(
            "\n@ {:.4}, {:.4}",
            location.latitude, location.longitude
        ));
    }
    out.push_str(&format!(
        "\nUpdated: {}\n",
        local_time(weather.dt, weather.timezone)
    ));

    out
}

fn row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("{label}: {value}\n"));
}

/// Format a Unix timestamp as local HH:MM using the response's UTC offset.
fn local_time(timestamp: i64, offset_secs: i32) -> String {
    let offset = FixedOffset::east_opt(offset_secs).unwrap_or_else(|| Utc.fix());
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(dt) => dt.with_timezone(&offset).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herecast_core::{Coordinates, ScreenState, WeatherResponse};

    fn loaded_state(weather_entries: serde_json::Value) -> ScreenState {
        let weather: WeatherResponse = serde_json::from_value(serde_json::json!({
            "coord": {"lon": 24.94, "lat": 60.17},
            "weather": weather_entries,
            "main": {
                "temp": 5.3, "feels_like": 2.1, "temp_min": 4.0, "temp_max": 6.5,
                "pressure": 1012, "humidity": 81
            },
            "visibility": 10000,
            "wind": {"speed": 4.1, "deg": 80, "gust": 7.2},
            "clouds": {"all": 75},
            "dt": 1700000000,
            "sys": {"country": "FI", "sunrise": 1699940000, "sunset": 1699970000},
            "timezone": 7200,
            "id": 658225,
            "name": "Helsinki",
            "cod": 200
        }))
        .expect("test payload should decode");

        ScreenState {
            loading: false,
            refreshing: false,
            error: String::new(),
            location: Some(Coordinates::new(60.17, 24.94)),
            weather: Some(weather),
        }
    }

    #[test]
    fn loading_view() {
        let state = ScreenState::new();
        assert_eq!(screen_to_string(&state), "Loading weather...");
    }

    #[test]
    fn error_view_shows_the_message() {
        let state = ScreenState {
            loading: false,
            error: "Invalid API key".to_string(),
            ..ScreenState::new()
        };
        assert_eq!(screen_to_string(&state), "Error: Invalid API key");
    }

    #[test]
    fn loaded_view_shows_rounded_temperatures_and_details() {
        let state = loaded_state(serde_json::json!([
            {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}
        ]));

        let rendered = screen_to_string(&state);

        assert!(rendered.contains("Helsinki, FI"));
        assert!(rendered.contains("light rain"));
        assert!(rendered.contains("https://openweathermap.org/img/wn/10d@2x.png"));
        assert!(rendered.contains("5°C"));
        assert!(rendered.contains("Feels like 2°C"));
        assert!(rendered.contains("Humidity: 81%"));
        assert!(rendered.contains("gusts 7.2 m/s"));
        assert!(rendered.contains("Visibility: 10.0 km"));
        assert!(rendered.contains("@ 60.1700, 24.9400"));
    }

    #[test]
    fn empty_condition_list_renders_without_panicking() {
        let state = loaded_state(serde_json::json!([]));

        let rendered = screen_to_string(&state);

        assert!(rendered.contains("Helsinki, FI"));
        assert!(rendered.contains("5°C"));
        assert!(!rendered.contains("img/wn"));
    }

    #[test]
    fn sunrise_uses_the_response_utc_offset() {
        let state = loaded_state(serde_json::json!([]));

        // 1699940000 UTC + 7200s offset = 06:53 local.
        let rendered = screen_to_string(&state);
        assert!(rendered.contains("Sunrise: 06:53"));
    }
}
