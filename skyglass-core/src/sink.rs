//! Contract for whatever renders a dashboard.

use crate::model::{CurrentWeatherSnapshot, DailyForecastSummary, DashboardData};

pub trait PresentationSink {
    fn show_current(&mut self, current: &CurrentWeatherSnapshot);

    fn show_forecast(&mut self, forecast: &[DailyForecastSummary]);

    /// `condition_main` is the raw condition group, e.g. "Rain".
    fn apply_theme(&mut self, condition_main: &str);
}

/// Hand one orchestration result to a sink: current, forecast, then theme.
pub fn present<S: PresentationSink + ?Sized>(sink: &mut S, data: &DashboardData) {
    sink.show_current(&data.current);
    sink.show_forecast(&data.forecast);
    sink.apply_theme(&data.current.condition_main);
}
