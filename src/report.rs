use std::fmt::Write;

use crate::actions;
use crate::config::SignalConfig;
use crate::models::{
    ClimateSignals, FormattedSignals, HotDaysDisplay, RainfallDisplay, RainfallTrend,
    TemperatureDisplay,
};

pub fn rainfall_summary(trend: RainfallTrend) -> &'static str {
    match trend {
        RainfallTrend::Increasing => "More rainfall expected",
        RainfallTrend::Decreasing => "Less rainfall expected",
        RainfallTrend::Stable => "Rainfall remains similar",
    }
}

/// Display strings for a set of signals.
pub fn format_signals(signals: &ClimateSignals, heat_threshold_c: f64) -> FormattedSignals {
    let sign = if signals.temperature_trend > 0.0 { "+" } else { "" };

    FormattedSignals {
        temperature: TemperatureDisplay {
            current: format!("{:.1}°C", signals.avg_temp_current),
            future: format!("{:.1}°C", signals.avg_temp_future),
            change: format!("{sign}{:.1}°C", signals.temperature_trend),
        },
        hot_days: HotDaysDisplay {
            count: signals.hot_days_count,
            description: format!(
                "{} days above {}°C per year",
                signals.hot_days_count, heat_threshold_c
            ),
        },
        rainfall: RainfallDisplay {
            trend: signals.rainfall_trend,
            current: format!("{:.0} mm/year", signals.avg_rainfall_current),
            future: format!("{:.0} mm/year", signals.avg_rainfall_future),
            change: rainfall_summary(signals.rainfall_trend).to_string(),
        },
    }
}

pub fn build_report(
    location: Option<&str>,
    config: &SignalConfig,
    signals: &ClimateSignals,
) -> String {
    let formatted = format_signals(signals, config.heat_threshold_c);
    let recommended = actions::generate_actions(signals);
    let categorized = actions::categorize_actions(&recommended);

    let mut output = String::new();
    let location_label = location.unwrap_or("selected location");

    let _ = writeln!(output, "# Climate Action Plan");
    let _ = writeln!(
        output,
        "Generated for {} (baseline {}-{}, projection {}-{})",
        location_label,
        config.baseline_start_year,
        config.baseline_end_year - 1,
        config.future_start_year(),
        config.future_end_year - 1
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Climate Signals");
    let _ = writeln!(
        output,
        "- Temperature: {} now, {} projected ({})",
        formatted.temperature.current, formatted.temperature.future, formatted.temperature.change
    );
    let _ = writeln!(output, "- Hot days: {}", formatted.hot_days.description);
    let _ = writeln!(
        output,
        "- Rainfall: {} ({} now, {} projected)",
        formatted.rainfall.change, formatted.rainfall.current, formatted.rainfall.future
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommended Actions");

    for group in &categorized.groups {
        let _ = writeln!(output);
        let _ = writeln!(output, "### {}", group.category.heading());
        for action in &group.actions {
            let _ = writeln!(
                output,
                "- {} **{}** ({}): {}",
                action.icon,
                action.title,
                action.difficulty.label(),
                action.description
            );
            let _ = writeln!(output, "  - {}", action.rationale);
        }
    }

    output
}
