//! Report command: distance and time per component.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use gear_core::{ApplyResult, Component};
use serde::Serialize;

use super::util::{load_activities, load_rules};
use crate::Config;

/// JSON shape of the report.
#[derive(Debug, Serialize)]
struct ReportJson<'a> {
    components: &'a [Component],
    unassigned_activities: usize,
}

/// Formats meters as kilometers with one decimal.
pub fn format_distance(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

/// Formats seconds as hours with one decimal.
pub fn format_hours(seconds: f64) -> String {
    format!("{:.1} h", seconds / 3600.0)
}

/// Formats the human-readable report output.
pub fn format_report(result: &ApplyResult) -> String {
    let mut output = String::new();

    if result.components.is_empty() {
        writeln!(output, "No components defined.").unwrap();
        return output;
    }

    let width = result
        .components
        .iter()
        .map(|c| c.name.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("Component".len());

    writeln!(output, "{:<width$}  {:>10}  {:>8}", "Component", "Distance", "Time").unwrap();
    for component in &result.components {
        writeln!(
            output,
            "{:<width$}  {:>10}  {:>8}",
            component.name.as_str(),
            format_distance(component.distance),
            format_hours(component.time)
        )
        .unwrap();
    }

    match result.unassigned_activities {
        0 => {}
        1 => {
            writeln!(output).unwrap();
            writeln!(output, "1 activity had no components mounted.").unwrap();
        }
        n => {
            writeln!(output).unwrap();
            writeln!(output, "{n} activities had no components mounted.").unwrap();
        }
    }

    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let rules = load_rules(&config.rules_path)?;
    let activities = load_activities(&config.activities_path)?;

    let result = rules
        .apply(&activities)
        .context("failed to replay activities")?;

    if json {
        let report = ReportJson {
            components: &result.components,
            unassigned_activities: result.unassigned_activities,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(&result))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{ComponentId, ComponentName, Usage};
    use insta::assert_snapshot;

    fn component(ident: &str, name: &str, distance: f64, time: f64) -> Component {
        Component {
            distance,
            time,
            ..Component::new(
                ComponentId::new(ident).unwrap(),
                ComponentName::new(name).unwrap(),
            )
        }
    }

    #[test]
    fn test_format_distance_and_hours() {
        assert_eq!(format_distance(40_000.0), "40.0 km");
        assert_eq!(format_distance(1_260.0), "1.3 km");
        assert_eq!(format_hours(5_400.0), "1.5 h");
        assert_eq!(format_hours(0.0), "0.0 h");
    }

    #[test]
    fn test_report_columns() {
        let result = ApplyResult {
            components: vec![
                component("w1", "Front wheel", 40_000.0, 5_400.0),
                component("c1", "Chain", 0.0, 0.0),
            ],
            usage: Usage::default(),
            unassigned_activities: 0,
        };

        assert_snapshot!(format_report(&result), @r"
        Component      Distance      Time
        Front wheel     40.0 km     1.5 h
        Chain            0.0 km     0.0 h
        ");
    }

    #[test]
    fn test_report_mentions_unassigned_activities() {
        let result = ApplyResult {
            components: vec![component("c1", "Chain", 0.0, 0.0)],
            usage: Usage::default(),
            unassigned_activities: 3,
        };

        let output = format_report(&result);

        assert!(output.ends_with("\n3 activities had no components mounted.\n"));
    }

    #[test]
    fn test_report_without_components() {
        let result = ApplyResult {
            components: Vec::new(),
            usage: Usage::default(),
            unassigned_activities: 0,
        };

        assert_eq!(format_report(&result), "No components defined.\n");
    }
}
