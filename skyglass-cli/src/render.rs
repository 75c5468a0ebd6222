use std::io::{self, Write};

use chrono::NaiveDate;
use skyglass_core::{
    CurrentWeatherSnapshot, DailyForecastSummary, DashboardData, PresentationSink, Theme,
    forecast::round_half_up, present,
};

/// Writes a dashboard as plain text. The first write error is kept and
/// reported by [`TerminalSink::finish`].
pub struct TerminalSink<W> {
    out: W,
    today: NaiveDate,
    result: io::Result<()>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, today: NaiveDate) -> Self {
        Self { out, today, result: Ok(()) }
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.result?;
        self.out.flush()
    }

    fn write(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.result.is_ok() {
            self.result = f(&mut self.out);
        }
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn show_current(&mut self, c: &CurrentWeatherSnapshot) {
        let date = self.today.format("%A, %B %-d, %Y").to_string();
        self.write(|out| {
            writeln!(out, "{}, {}", c.place_name, c.country_code)?;
            writeln!(out, "{date}")?;
            writeln!(out)?;
            writeln!(out, "  {}°  {}", round_half_up(c.temperature_c), c.condition_description)?;
            writeln!(out, "  Feels like {}°", round_half_up(c.feels_like_c))?;
            writeln!(
                out,
                "  Humidity {}%   Wind {} km/h   Visibility {:.1} km   Pressure {} hPa",
                c.humidity_pct,
                round_half_up(c.wind_speed_ms * 3.6),
                f64::from(c.visibility_m) / 1000.0,
                c.pressure_hpa,
            )
        });
    }

    fn show_forecast(&mut self, forecast: &[DailyForecastSummary]) {
        self.write(|out| {
            writeln!(out)?;
            writeln!(out, "{}-day forecast", forecast.len())?;
            for day in forecast {
                writeln!(
                    out,
                    "  {:<5}{:<24}{:>4}° / {}°",
                    day.day_label, day.condition_description, day.temp_max_c, day.temp_min_c
                )?;
            }
            Ok(())
        });
    }

    fn apply_theme(&mut self, condition_main: &str) {
        let theme = Theme::from_condition(condition_main);
        self.write(|out| {
            writeln!(out)?;
            writeln!(out, "Theme: {theme}")
        });
    }
}

/// Print `data` to stdout, as text or as JSON with the theme attached.
pub fn print(data: &DashboardData, json: bool, today: NaiveDate) -> anyhow::Result<()> {
    let stdout = io::stdout().lock();

    if json {
        let mut value = serde_json::to_value(data)?;
        value["theme"] = serde_json::to_value(Theme::from_condition(&data.current.condition_main))?;
        let mut out = stdout;
        serde_json::to_writer_pretty(&mut out, &value)?;
        writeln!(out)?;
        return Ok(());
    }

    let mut sink = TerminalSink::new(stdout, today);
    present(&mut sink, data);
    sink.finish()?;
    Ok(())
}
