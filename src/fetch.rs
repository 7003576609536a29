use std::time::Duration;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::SignalConfig;
use crate::models::RawClimateSeries;

pub const OPEN_METEO_CLIMATE_URL: &str = "https://climate-api.open-meteo.com/v1/climate";
pub const DEFAULT_MODEL: &str = "MRI_AGCM3_2_S";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DAILY_VARIABLES: &str = "temperature_2m_mean,precipitation_sum";

pub fn request_timeout(secs: u64) -> anyhow::Result<Duration> {
    if secs == 0 {
        bail!("request timeout must be at least one second");
    }
    Ok(Duration::from_secs(secs))
}

/// HTTP client whose requests give up after `timeout`.
pub fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> anyhow::Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            bail!("invalid latitude {latitude}: expected a value between -90 and 90");
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            bail!("invalid longitude {longitude}: expected a value between -180 and 180");
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub coordinates: Coordinates,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub model: String,
}

impl FetchRequest {
    /// Date range covering the baseline and projection windows in full.
    pub fn for_windows(
        coordinates: Coordinates,
        config: &SignalConfig,
        model: &str,
    ) -> anyhow::Result<Self> {
        let start_date = NaiveDate::from_ymd_opt(config.baseline_start_year, 1, 1)
            .context("baseline start year is out of range")?;
        let end_date = NaiveDate::from_ymd_opt(config.future_end_year, 12, 31)
            .context("future end year is out of range")?;

        Ok(Self {
            coordinates,
            start_date,
            end_date,
            model: model.to_string(),
        })
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.coordinates.latitude.to_string()),
            ("longitude", self.coordinates.longitude.to_string()),
            ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
            ("models", self.model.clone()),
            ("daily", DAILY_VARIABLES.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
pub struct ClimateResponse {
    pub daily: DailyValues,
}

#[derive(Debug, Deserialize)]
pub struct DailyValues {
    pub time: Vec<String>,
    pub temperature_2m_mean: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
}

impl From<ClimateResponse> for RawClimateSeries {
    fn from(response: ClimateResponse) -> Self {
        RawClimateSeries {
            dates: response.daily.time,
            temperatures: response.daily.temperature_2m_mean,
            precipitation: response.daily.precipitation_sum,
        }
    }
}

pub async fn fetch_series(
    client: &reqwest::Client,
    request: &FetchRequest,
) -> anyhow::Result<RawClimateSeries> {
    info!(
        latitude = request.coordinates.latitude,
        longitude = request.coordinates.longitude,
        model = %request.model,
        "Fetching climate projection"
    );

    let response = client
        .get(OPEN_METEO_CLIMATE_URL)
        .query(&request.query())
        .send()
        .await
        .context("failed to reach the climate projection service")?
        .error_for_status()
        .context("climate projection service rejected the request")?;

    let body: ClimateResponse = response
        .json()
        .await
        .context("failed to decode climate projection response")?;

    let series = into_series(body)?;
    debug!(days = series.len(), "Climate projection received");
    Ok(series)
}

pub fn into_series(response: ClimateResponse) -> anyhow::Result<RawClimateSeries> {
    let series = RawClimateSeries::from(response);
    if series.is_empty() {
        bail!("climate projection service returned no daily values");
    }
    Ok(series)
}
