//! Shared utilities for weather-agent-rs
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and application-level configuration.

pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::{LogFormat, init_tracing, init_tracing_with};
