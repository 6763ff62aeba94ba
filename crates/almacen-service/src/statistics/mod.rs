//! System totals.

pub mod service;

pub use service::{Statistics, StatisticsService};
