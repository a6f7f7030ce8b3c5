//! Mounted command: the bike and hashtag assignments in force at a time.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use gear_core::{ComponentMap, Rule, Rules};

use super::util::{load_rules, parse_datetime};
use crate::Config;

fn write_components(output: &mut String, rules: &Rules, components: &ComponentMap) {
    for (ty, ident) in components {
        let Some(ident) = ident else { continue };
        match rules.component(ident) {
            Some(component) => writeln!(output, "    {ty}: {} ({ident})", component.name).unwrap(),
            None => writeln!(output, "    {ty}: {ident}").unwrap(),
        }
    }
}

/// Formats the effective assignments for display.
pub fn format_mounted(rules: &Rules, effective: &Rule, at: DateTime<Utc>) -> String {
    let mut output = String::new();
    writeln!(output, "Mounted at {}", at.to_rfc3339()).unwrap();

    if effective.bikes.is_empty() && effective.hashtags.is_empty() {
        writeln!(output, "Nothing mounted.").unwrap();
        return output;
    }

    if !effective.bikes.is_empty() {
        writeln!(output, "Bikes:").unwrap();
        for (bike, components) in &effective.bikes {
            match rules.bike_name(bike) {
                Some(name) => writeln!(output, "  {name} ({bike})").unwrap(),
                None => writeln!(output, "  {bike}").unwrap(),
            }
            write_components(&mut output, rules, components);
        }
    }

    if !effective.hashtags.is_empty() {
        writeln!(output, "Hashtags:").unwrap();
        for (tag, components) in &effective.hashtags {
            writeln!(output, "  #{tag}").unwrap();
            write_components(&mut output, rules, components);
        }
    }

    output
}

pub fn run<W: Write>(writer: &mut W, config: &Config, at: Option<&str>) -> Result<()> {
    let now = Utc::now();
    let at = at.map_or(Ok(now), |s| parse_datetime(s, now))?;
    let rules = load_rules(&config.rules_path)?;

    let effective = rules
        .effective_at(&at)
        .context("failed to resolve mounting rules")?;

    write!(writer, "{}", format_mounted(&rules, &effective, at))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use insta::assert_snapshot;

    fn rules() -> Rules {
        serde_json::from_str(
            r#"{
                "bike_names": {"b1": "Road"},
                "components": [
                    {"ident": "w1", "name": "Zipp 303"},
                    {"ident": "t1", "name": "GP5000"}
                ],
                "rules": [
                    {"since": "2024-01-01T00:00:00Z",
                     "bikes": {"b1": {"wheel": "w1", "tyre": "t1"}}},
                    {"since": "2024-05-01T00:00:00Z",
                     "bikes": {"b2": {"wheel": "w1"}},
                     "hashtags": {"race": {"tyre": "t9"}}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_mounted_resolves_names() {
        let rules = rules();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let effective = rules.effective_at(&at).unwrap();

        assert_snapshot!(format_mounted(&rules, &effective, at), @r"
        Mounted at 2024-06-01T00:00:00+00:00
        Bikes:
          Road (b1)
            tyre: GP5000 (t1)
          b2
            wheel: Zipp 303 (w1)
        Hashtags:
          #race
            tyre: t9
        ");
    }

    #[test]
    fn test_mounted_before_first_rule() {
        let rules = rules();
        let at = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let effective = rules.effective_at(&at).unwrap();

        assert_eq!(
            format_mounted(&rules, &effective, at),
            "Mounted at 2023-06-01T00:00:00+00:00\nNothing mounted.\n"
        );
    }
}
