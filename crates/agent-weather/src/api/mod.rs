//! Live forecast providers

pub mod nws;

pub use nws::{ForecastApi, ForecastPeriod, NwsClient};

#[cfg(test)]
pub use nws::MockForecastApi;
