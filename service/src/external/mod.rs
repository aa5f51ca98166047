//! External API integrations

pub mod openweather;
pub mod pushover;

pub use openweather::{ForecastSource, OpenWeatherClient, RawForecast};
pub use pushover::{PushTransport, PushoverClient, PushoverMessage};
