use serde::Serialize;

/// Background theme picked from the current condition group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Clear,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Default,
}

impl Theme {
    /// Map an OpenWeatherMap `weather[0].main` value, case-insensitively.
    pub fn from_condition(condition_main: &str) -> Self {
        match condition_main.to_lowercase().as_str() {
            "clear" => Theme::Clear,
            "clouds" => Theme::Cloudy,
            "rain" | "drizzle" => Theme::Rainy,
            "snow" => Theme::Snowy,
            "thunderstorm" => Theme::Stormy,
            _ => Theme::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Clear => "clear",
            Theme::Cloudy => "cloudy",
            Theme::Rainy => "rainy",
            Theme::Snowy => "snowy",
            Theme::Stormy => "stormy",
            Theme::Default => "default",
        }
    }

    /// CSS class for web front-ends.
    pub fn css_class(&self) -> String {
        format!("weather-theme-{}", self.as_str())
    }

    pub fn gradient(&self) -> &'static str {
        match self {
            Theme::Clear => {
                "linear-gradient(135deg, rgba(255, 193, 7, 0.8) 0%, rgba(255, 87, 34, 0.8) 100%)"
            }
            Theme::Cloudy => {
                "linear-gradient(135deg, rgba(96, 125, 139, 0.8) 0%, rgba(84, 110, 122, 0.8) 100%)"
            }
            Theme::Rainy => {
                "linear-gradient(135deg, rgba(63, 81, 181, 0.8) 0%, rgba(33, 150, 243, 0.8) 100%)"
            }
            Theme::Snowy => {
                "linear-gradient(135deg, rgba(207, 216, 220, 0.9) 0%, rgba(159, 168, 218, 0.9) 100%)"
            }
            Theme::Stormy => {
                "linear-gradient(135deg, rgba(55, 71, 79, 0.9) 0%, rgba(38, 50, 56, 0.9) 100%)"
            }
            Theme::Default => {
                "linear-gradient(135deg, rgba(102, 126, 234, 0.8) 0%, rgba(118, 75, 162, 0.8) 100%)"
            }
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_condition_groups() {
        assert_eq!(Theme::from_condition("Clear"), Theme::Clear);
        assert_eq!(Theme::from_condition("Clouds"), Theme::Cloudy);
        assert_eq!(Theme::from_condition("Rain"), Theme::Rainy);
        assert_eq!(Theme::from_condition("Drizzle"), Theme::Rainy);
        assert_eq!(Theme::from_condition("Snow"), Theme::Snowy);
        assert_eq!(Theme::from_condition("Thunderstorm"), Theme::Stormy);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(Theme::from_condition("CLEAR"), Theme::Clear);
        assert_eq!(Theme::from_condition("rain"), Theme::Rainy);
    }

    #[test]
    fn unknown_conditions_use_default() {
        assert_eq!(Theme::from_condition("Mist"), Theme::Default);
        assert_eq!(Theme::from_condition(""), Theme::Default);
    }

    #[test]
    fn css_class_has_theme_prefix() {
        assert_eq!(Theme::Stormy.css_class(), "weather-theme-stormy");
        assert!(Theme::Snowy.gradient().starts_with("linear-gradient"));
    }
}
