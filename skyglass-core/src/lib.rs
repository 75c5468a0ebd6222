//! Core library for the SkyGlass weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location sources (callback bridge, IP lookup, fixed coordinates)
//! - The OpenWeatherMap client
//! - Forecast normalization into daily summaries
//! - The orchestrator that turns a mode into one dashboard snapshot
//!
//! It is used by `skyglass-cli`, but can also drive other front-ends through
//! [`PresentationSink`].

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod location;
pub mod model;
pub mod provider;
pub mod sink;
pub mod theme;

pub use config::{Config, LocationConfig, LocationSourceKind};
pub use dashboard::WeatherOrchestrator;
pub use error::{DashboardError, FetchError, LocationError};
pub use forecast::{normalize, normalize_in};
pub use location::{LocationSource, PositionOptions, location_source_from_config};
pub use model::{
    Coordinates, CurrentWeatherSnapshot, DailyForecastSummary, DashboardData, DashboardMode,
    ForecastPayload, RawForecastEntry,
};
pub use provider::{WeatherProvider, provider_from_config};
pub use sink::{PresentationSink, present};
pub use theme::Theme;
