use std::ops::Range;

use crate::config::SignalConfig;
use crate::error::SignalError;
use crate::models::{ClimateSignals, RainfallTrend, RawClimateSeries};

/// Percentage change (either direction) still classified as stable rainfall.
pub const RAINFALL_DEAD_BAND_PCT: f64 = 5.0;

// Absorbs rounding in the ratio so a change of exactly ±5% stays on the band edge.
const CHANGE_TOLERANCE_PCT: f64 = 1e-9;

pub fn compute_signals(
    series: &RawClimateSeries,
    config: &SignalConfig,
) -> Result<ClimateSignals, SignalError> {
    check_alignment(series)?;

    let baseline_start = boundary_index(&series.dates, config.baseline_start_year)?;
    let baseline_end = boundary_index(&series.dates, config.baseline_end_year)?;
    let future_start = boundary_index(&series.dates, config.future_start_year())?;
    let future_end = boundary_index(&series.dates, config.future_end_year)?;

    let baseline = baseline_start..baseline_end;
    let future = future_start..future_end;

    let avg_temp_current =
        window_mean(&series.temperatures, baseline.clone(), "baseline temperature")?;
    let avg_temp_future =
        window_mean(&series.temperatures, future.clone(), "future temperature")?;
    let temperature_trend = avg_temp_future - avg_temp_current;

    let hot_days_count = hot_days_per_year(
        &series.temperatures,
        future.clone(),
        config.heat_threshold_c,
        config.future_span_years(),
    )?;

    let avg_rainfall_current = window_mean(&series.precipitation, baseline, "baseline rainfall")?;
    let avg_rainfall_future = window_mean(&series.precipitation, future, "future rainfall")?;
    let rainfall_trend = classify_rainfall(avg_rainfall_current, avg_rainfall_future)?;

    Ok(ClimateSignals {
        temperature_trend,
        hot_days_count,
        rainfall_trend,
        avg_temp_current,
        avg_temp_future,
        avg_rainfall_current,
        avg_rainfall_future,
    })
}

fn check_alignment(series: &RawClimateSeries) -> Result<(), SignalError> {
    if series.temperatures.len() != series.len() || series.precipitation.len() != series.len() {
        return Err(SignalError::InvalidSeries(format!(
            "array lengths differ: {} dates, {} temperatures, {} precipitation values",
            series.len(),
            series.temperatures.len(),
            series.precipitation.len()
        )));
    }

    if let Some(pair) = series.dates.windows(2).find(|pair| pair[0] > pair[1]) {
        return Err(SignalError::InvalidSeries(format!(
            "dates are out of order: {} follows {}",
            pair[1], pair[0]
        )));
    }

    Ok(())
}

fn year_of(date: &str) -> Option<i32> {
    date.split('-').next()?.trim().parse().ok()
}

/// Index of the first date whose year prefix equals `year`.
pub fn boundary_index(dates: &[String], year: i32) -> Result<usize, SignalError> {
    dates
        .iter()
        .position(|date| year_of(date) == Some(year))
        .ok_or_else(|| SignalError::InvalidSeries(format!("no dates found for year {year}")))
}

fn valid_values<'a>(
    values: &'a [Option<f64>],
    window: Range<usize>,
) -> impl Iterator<Item = f64> + 'a {
    values
        .get(window)
        .unwrap_or(&[])
        .iter()
        .filter_map(|value| *value)
        .filter(|value| value.is_finite())
}

/// Arithmetic mean over the window, ignoring missing and non-numeric entries.
pub fn window_mean(
    values: &[Option<f64>],
    window: Range<usize>,
    label: &'static str,
) -> Result<f64, SignalError> {
    let (total, count) = valid_values(values, window).fold((0.0, 0usize), |(total, count), value| {
        (total + value, count + 1)
    });

    if count == 0 {
        return Err(SignalError::InsufficientData { window: label });
    }

    Ok(total / count as f64)
}

fn hot_days_per_year(
    temperatures: &[Option<f64>],
    future: Range<usize>,
    threshold: f64,
    span_years: i32,
) -> Result<u32, SignalError> {
    if span_years <= 0 {
        return Err(SignalError::InsufficientData {
            window: "future hot-day",
        });
    }

    let hot_days = valid_values(temperatures, future)
        .filter(|value| *value > threshold)
        .count();

    Ok((hot_days as f64 / span_years as f64).round() as u32)
}

pub fn classify_rainfall(current: f64, future: f64) -> Result<RainfallTrend, SignalError> {
    if current == 0.0 {
        return Err(SignalError::DivisionUndefined);
    }

    let change_pct = (future - current) / current * 100.0;
    Ok(classify_change(change_pct))
}

/// Dead-band classification: exactly ±5% is still stable.
pub fn classify_change(change_pct: f64) -> RainfallTrend {
    if change_pct > RAINFALL_DEAD_BAND_PCT + CHANGE_TOLERANCE_PCT {
        RainfallTrend::Increasing
    } else if change_pct < -(RAINFALL_DEAD_BAND_PCT + CHANGE_TOLERANCE_PCT) {
        RainfallTrend::Decreasing
    } else {
        RainfallTrend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rows: &[(&str, Option<f64>, Option<f64>)]) -> RawClimateSeries {
        RawClimateSeries {
            dates: rows.iter().map(|row| row.0.to_string()).collect(),
            temperatures: rows.iter().map(|row| row.1).collect(),
            precipitation: rows.iter().map(|row| row.2).collect(),
        }
    }

    fn two_window_series() -> RawClimateSeries {
        series(&[
            ("1990-01-01", Some(20.0), Some(10.0)),
            ("1990-07-01", Some(22.0), Some(10.0)),
            ("2020-01-01", Some(23.0), Some(10.0)),
            ("2020-07-01", Some(25.0), Some(10.0)),
            ("2030-01-01", Some(26.0), Some(10.0)),
        ])
    }

    #[test]
    fn averages_each_window() {
        let signals = compute_signals(&two_window_series(), &SignalConfig::default()).unwrap();
        assert_eq!(signals.avg_temp_current, 21.0);
        assert_eq!(signals.avg_temp_future, 24.0);
        assert!((signals.temperature_trend - 3.0).abs() < 1e-9);
        assert_eq!(signals.hot_days_count, 0);
        assert_eq!(signals.rainfall_trend, RainfallTrend::Stable);
    }

    #[test]
    fn missing_future_end_marker_is_invalid() {
        let input = series(&[
            ("1990-01-01", Some(20.0), Some(10.0)),
            ("2020-01-01", Some(23.0), Some(10.0)),
            ("2029-12-31", Some(25.0), Some(10.0)),
        ]);
        let err = compute_signals(&input, &SignalConfig::default()).unwrap_err();
        assert!(matches!(err, SignalError::InvalidSeries(_)));
    }

    #[test]
    fn misaligned_arrays_are_invalid() {
        let mut input = two_window_series();
        input.precipitation.pop();
        let err = compute_signals(&input, &SignalConfig::default()).unwrap_err();
        assert!(matches!(err, SignalError::InvalidSeries(_)));
    }

    #[test]
    fn decreasing_dates_are_invalid() {
        let mut input = two_window_series();
        input.dates.swap(0, 1);
        input.dates.swap(1, 2);
        let err = compute_signals(&input, &SignalConfig::default()).unwrap_err();
        assert!(matches!(err, SignalError::InvalidSeries(_)));
    }

    #[test]
    fn skips_missing_and_nan_values() {
        let input = series(&[
            ("1990-01-01", Some(20.0), Some(10.0)),
            ("1990-02-01", None, None),
            ("1990-03-01", Some(f64::NAN), Some(10.0)),
            ("1990-04-01", Some(22.0), Some(10.0)),
            ("2020-01-01", Some(24.0), Some(10.0)),
            ("2030-01-01", None, None),
        ]);
        let signals = compute_signals(&input, &SignalConfig::default()).unwrap();
        assert_eq!(signals.avg_temp_current, 21.0);
        assert_eq!(signals.avg_temp_future, 24.0);
    }

    #[test]
    fn empty_window_is_insufficient_data() {
        let input = series(&[
            ("1990-01-01", Some(20.0), Some(10.0)),
            ("2020-01-01", None, Some(10.0)),
            ("2020-06-01", None, Some(10.0)),
            ("2030-01-01", Some(25.0), Some(10.0)),
        ]);
        let err = compute_signals(&input, &SignalConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SignalError::InsufficientData {
                window: "future temperature"
            }
        );
    }

    #[test]
    fn zero_year_future_window_is_insufficient_data() {
        let config = SignalConfig {
            baseline_end_year: 2030,
            future_end_year: 2030,
            ..SignalConfig::default()
        };
        let input = series(&[
            ("1990-01-01", Some(20.0), Some(10.0)),
            ("2030-01-01", Some(25.0), Some(10.0)),
        ]);
        let err = compute_signals(&input, &config).unwrap_err();
        assert!(matches!(err, SignalError::InsufficientData { .. }));
    }

    #[test]
    fn hot_days_are_averaged_over_the_configured_span() {
        let mut rows: Vec<(String, Option<f64>, Option<f64>)> =
            vec![("1990-01-01".to_string(), Some(30.0), Some(5.0))];
        for day in 0..25 {
            rows.push((format!("2020-01-{:02}", day + 1), Some(36.0), Some(5.0)));
        }
        rows.push(("2020-02-01".to_string(), Some(35.0), Some(5.0)));
        rows.push(("2030-01-01".to_string(), Some(36.0), Some(5.0)));
        let input = RawClimateSeries {
            dates: rows.iter().map(|row| row.0.clone()).collect(),
            temperatures: rows.iter().map(|row| row.1).collect(),
            precipitation: rows.iter().map(|row| row.2).collect(),
        };

        // 25 hot days over 10 years rounds half up to 3; the day at exactly 35°C is not hot.
        let signals = compute_signals(&input, &SignalConfig::default()).unwrap();
        assert_eq!(signals.hot_days_count, 3);

        let mut five_year = input.clone();
        five_year.dates.last_mut().unwrap().replace_range(..4, "2025");
        let config = SignalConfig {
            future_end_year: 2025,
            ..SignalConfig::default()
        };
        let signals = compute_signals(&five_year, &config).unwrap();
        assert_eq!(signals.hot_days_count, 5);
    }

    #[test]
    fn zero_baseline_rainfall_is_undefined() {
        let input = series(&[
            ("1990-01-01", Some(20.0), Some(0.0)),
            ("2020-01-01", Some(23.0), Some(4.0)),
            ("2030-01-01", Some(25.0), Some(4.0)),
        ]);
        let err = compute_signals(&input, &SignalConfig::default()).unwrap_err();
        assert_eq!(err, SignalError::DivisionUndefined);
    }

    #[test]
    fn rainfall_dead_band_boundaries() {
        assert_eq!(classify_change(5.0), RainfallTrend::Stable);
        assert_eq!(classify_change(-5.0), RainfallTrend::Stable);
        assert_eq!(classify_change(5.01), RainfallTrend::Increasing);
        assert_eq!(classify_change(-5.01), RainfallTrend::Decreasing);
        assert_eq!(classify_change(0.0), RainfallTrend::Stable);
    }

    #[test]
    fn exact_five_percent_change_is_stable_despite_rounding() {
        // 2.0 -> 2.1 computes to 5.000000000000004% in floating point.
        assert_eq!(classify_rainfall(2.0, 2.1).unwrap(), RainfallTrend::Stable);
        assert_eq!(classify_rainfall(2.0, 1.9).unwrap(), RainfallTrend::Stable);
        assert_eq!(classify_rainfall(20.0, 21.0).unwrap(), RainfallTrend::Stable);
        assert_eq!(classify_rainfall(2.0, 2.1002).unwrap(), RainfallTrend::Increasing);
        assert_eq!(classify_rainfall(2.0, 1.8998).unwrap(), RainfallTrend::Decreasing);
    }

    #[test]
    fn rainfall_trend_follows_window_averages() {
        assert_eq!(classify_rainfall(100.0, 120.0).unwrap(), RainfallTrend::Increasing);
        assert_eq!(classify_rainfall(100.0, 80.0).unwrap(), RainfallTrend::Decreasing);
        assert_eq!(classify_rainfall(100.0, 103.0).unwrap(), RainfallTrend::Stable);
    }

    #[test]
    fn boundary_uses_first_matching_year() {
        let dates: Vec<String> = ["1989-12-31", "1990-01-01", "1990-01-02"]
            .iter()
            .map(|date| date.to_string())
            .collect();
        assert_eq!(boundary_index(&dates, 1990).unwrap(), 1);
        assert!(boundary_index(&dates, 2020).is_err());
    }
}
