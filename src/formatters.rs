use crate::presentation::{CurrentSummary, WeatherReport};

/// Formats a weather report into a human-readable string
pub fn format_report(report: &WeatherReport) -> String {
    let mut output = format_current(&report.current);

    if let Some(alert) = &report.alert {
        output.push_str(&format!("Alert ({}): {}\n", alert.severity, alert.message));
    }
    output.push_str(&format!("Background: {}\n\n", report.background.url()));

    output.push_str("Daily Forecast:\n\n");
    if report.daily.is_empty() {
        output.push_str("  No forecast available.\n");
    }
    for day in &report.daily {
        let Some(ts) = day.timestamp else { continue };
        let local = ts.with_timezone(&report.offset);
        output.push_str(&format!(
            "{}:\n  Time: {}\n  Conditions: {}\n  Temperature: {}\u{00b0}C\n\n",
            local.format("%Y-%m-%d"),
            local.format("%H:%M"),
            day.description
                .as_deref()
                .or(day.label.as_deref())
                .unwrap_or("Unknown"),
            display_temperature(day.temperature_celsius)
        ));
    }

    if !report.series.is_empty() {
        output.push_str("Temperature Chart:\n");
        for point in &report.series {
            output.push_str(&format!(
                "  {}  {:.1}\u{00b0}C\n",
                point.time, point.temperature_celsius
            ));
        }
    }
    output
}

/// Formats the current-conditions card
pub fn format_current(current: &CurrentSummary) -> String {
    let mut output = match &current.country {
        Some(country) => format!("{}, {}\n", current.place, country),
        None => format!("{}\n", current.place),
    };

    if let Some(conditions) = current.description.as_deref().or(current.label.as_deref()) {
        output.push_str(&format!("  Conditions: {}\n", conditions));
    }
    if let Some(temperature) = current.temperature_celsius {
        output.push_str(&format!(
            "  Temperature: {}\u{00b0}C\n",
            display_temperature(temperature)
        ));
    }
    if let Some(humidity) = current.humidity {
        output.push_str(&format!("  Humidity: {}%\n", humidity));
    }
    if let Some(speed) = current.wind_speed {
        output.push_str(&format!("  Wind Speed: {} m/s\n", speed));
    }
    if let Some(icon) = &current.icon_url {
        output.push_str(&format!("  Icon: {}\n", icon));
    }
    output.push('\n');
    output
}

/// Cards show whole degrees
fn display_temperature(celsius: f64) -> i64 {
    celsius.round() as i64
}
