use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// URL of the 2x PNG for an OpenWeatherMap icon code such as `"01d"`.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// How the caller wants the dashboard located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardMode {
    ByLocation,
    /// Place name, already trimmed and non-empty.
    ByPlaceName(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherSnapshot {
    pub place_name: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_ms: f64,
    pub visibility_m: u32,
    /// Condition group, e.g. "Clear", "Rain", "Clouds".
    pub condition_main: String,
    pub condition_description: String,
    pub condition_icon: String,
}

impl CurrentWeatherSnapshot {
    pub fn icon_url(&self) -> String {
        icon_url(&self.condition_icon)
    }
}

/// One 3-hour slot of the forecast timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastEntry {
    pub timestamp_seconds: i64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition_description: String,
    pub condition_icon: String,
}

/// Decoded forecast response; entries are chronological.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub entries: Vec<RawForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecastSummary {
    pub calendar_date: NaiveDate,
    /// Abbreviated weekday, e.g. "Mon".
    pub day_label: String,
    pub temp_min_c: i32,
    pub temp_max_c: i32,
    pub condition_description: String,
    pub condition_icon: String,
}

impl DailyForecastSummary {
    pub fn icon_url(&self) -> String {
        icon_url(&self.condition_icon)
    }
}

/// Result of one orchestration cycle, handed to the presentation layer as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub current: CurrentWeatherSnapshot,
    pub forecast: Vec<DailyForecastSummary>,
}
