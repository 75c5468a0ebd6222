use chrono::{Days, NaiveDate};
use skyglass_core::{CurrentWeatherSnapshot, DailyForecastSummary, DashboardData};

const DEMO_DAYS: [(i32, i32, &str, &str); 5] = [
    (18, 25, "sunny", "01d"),
    (16, 23, "partly cloudy", "02d"),
    (19, 26, "clear sky", "01d"),
    (17, 22, "light rain", "10d"),
    (20, 27, "sunny", "01d"),
];

/// Sample dashboard shown until an API key is configured. Forecast starts tomorrow.
pub fn dashboard(today: NaiveDate) -> DashboardData {
    let current = CurrentWeatherSnapshot {
        place_name: "San Francisco".to_string(),
        country_code: "US".to_string(),
        temperature_c: 22.0,
        feels_like_c: 24.0,
        humidity_pct: 68,
        pressure_hpa: 1013,
        wind_speed_ms: 3.5,
        visibility_m: 10_000,
        condition_main: "Clear".to_string(),
        condition_description: "clear sky".to_string(),
        condition_icon: "01d".to_string(),
    };

    let forecast = DEMO_DAYS
        .iter()
        .zip(1u64..)
        .filter_map(|(&(min, max, description, icon), offset)| {
            let date = today.checked_add_days(Days::new(offset))?;
            Some(DailyForecastSummary {
                calendar_date: date,
                day_label: date.format("%a").to_string(),
                temp_min_c: min,
                temp_max_c: max,
                condition_description: description.to_string(),
                condition_icon: icon.to_string(),
            })
        })
        .collect();

    DashboardData { current, forecast }
}

pub const SETUP_HINT: &str = "\
SkyGlass setup required: no OpenWeatherMap API key is configured.

1. Visit https://openweathermap.org/api
2. Sign up for a free account
3. Copy your API key from the dashboard
4. Run `skyglass configure` (or pass --api-key)

Showing demo data until then.";
