//! Climate signals and adaptation actions for a single location.
//!
//! [`signals::compute_signals`] reduces a daily temperature/precipitation series
//! into [`models::ClimateSignals`]; [`actions::generate_actions`] turns those
//! signals into a ranked list of practical actions.

pub mod actions;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod report;
pub mod series;
pub mod signals;
