use anyhow::bail;
use clap::Args;

// Window boundaries and thresholds used by the signal computation.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct SignalConfig {
    /// First year of the baseline window
    #[arg(
        long = "baseline-start",
        env = "CLIMATE_BASELINE_START",
        default_value_t = 1990,
        global = true
    )]
    pub baseline_start_year: i32,
    /// First year after the baseline window; also the first projection year
    #[arg(
        long = "baseline-end",
        env = "CLIMATE_BASELINE_END",
        default_value_t = 2020,
        global = true
    )]
    pub baseline_end_year: i32,
    /// First year after the projection window
    #[arg(
        long = "future-end",
        env = "CLIMATE_FUTURE_END",
        default_value_t = 2030,
        global = true
    )]
    pub future_end_year: i32,
    /// Daily mean temperature (°C) above which a day counts as hot
    #[arg(
        long = "heat-threshold",
        env = "CLIMATE_HEAT_THRESHOLD",
        default_value_t = 35.0,
        global = true
    )]
    pub heat_threshold_c: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            baseline_start_year: 1990,
            baseline_end_year: 2020,
            future_end_year: 2030,
            heat_threshold_c: 35.0,
        }
    }
}

impl SignalConfig {
    pub fn future_start_year(&self) -> i32 {
        self.baseline_end_year
    }

    /// Years covered by the projection window.
    pub fn future_span_years(&self) -> i32 {
        self.future_end_year - self.future_start_year()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.baseline_start_year >= self.baseline_end_year {
            bail!(
                "baseline start year {} must be before baseline end year {}",
                self.baseline_start_year,
                self.baseline_end_year
            );
        }
        if self.baseline_end_year >= self.future_end_year {
            bail!(
                "baseline end year {} must be before future end year {}",
                self.baseline_end_year,
                self.future_end_year
            );
        }
        if !self.heat_threshold_c.is_finite() {
            bail!("heat threshold must be a finite temperature");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_windows() {
        let config = SignalConfig::default();
        assert_eq!(config.future_start_year(), 2020);
        assert_eq!(config.future_span_years(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_order_years() {
        let config = SignalConfig {
            baseline_end_year: 2030,
            future_end_year: 2030,
            ..SignalConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SignalConfig {
            baseline_start_year: 2020,
            ..SignalConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
