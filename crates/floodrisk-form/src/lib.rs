//! Conversion of raw calculator form fields into a [`RiskInput`].
//!
//! Form fields arrive as the strings a user typed. Numbers are parsed
//! leniently: leading whitespace is skipped, the longest numeric prefix is
//! used, and a field with no digits becomes `NaN`, which the scorer places in
//! the fallback band of that factor.

use floodrisk_core::{RiskInput, SoilType, VegetationCover};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskForm {
    pub elevation: String,
    pub distance_from_water: String,
    pub soil_type: String,
    pub previous_flooding: String,
    pub annual_rainfall: String,
    pub include_vegetation: bool,
    pub tree_coverage: String,
    pub shrub_coverage: String,
    pub grass_coverage: String,
}

impl Default for RiskForm {
    fn default() -> Self {
        Self {
            elevation: String::new(),
            distance_from_water: String::new(),
            soil_type: "sandy".to_string(),
            previous_flooding: "no".to_string(),
            annual_rainfall: String::new(),
            include_vegetation: false,
            tree_coverage: "0".to_string(),
            shrub_coverage: "0".to_string(),
            grass_coverage: "0".to_string(),
        }
    }
}

impl RiskForm {
    pub fn to_input(&self) -> RiskInput {
        let input = RiskInput::new(
            parse_field("elevation", &self.elevation),
            parse_field("distanceFromWater", &self.distance_from_water),
            parse_soil(&self.soil_type),
            parse_flag(&self.previous_flooding),
            parse_field("annualRainfall", &self.annual_rainfall),
        );
        if !self.include_vegetation {
            return input;
        }
        input.with_vegetation(VegetationCover::new(
            parse_field("treeCoverage", &self.tree_coverage),
            parse_field("shrubCoverage", &self.shrub_coverage),
            parse_field("grassCoverage", &self.grass_coverage),
        ))
    }
}

fn parse_field(field: &'static str, raw: &str) -> f64 {
    let value = parse_number(raw);
    if value.is_nan() && !raw.trim().is_empty() {
        warn!(field, raw, "form field is not a number");
    }
    value
}

/// Longest numeric prefix of `raw`, or `NaN` when there is none.
///
/// `"12.5m"` → 12.5, `" -3e2x"` → -300, `"abc"` / `""` → NaN.
pub fn parse_number(raw: &str) -> f64 {
    let text = raw.trim_start();
    let end = numeric_prefix_len(text.as_bytes());
    text.get(..end)
        .filter(|prefix| !prefix.is_empty())
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let at = |i: usize| bytes.get(i).copied();
    let digits_from = |mut i: usize| {
        while at(i).is_some_and(|b| b.is_ascii_digit()) {
            i += 1;
        }
        i
    };

    let mut pos = usize::from(matches!(at(0), Some(b'+' | b'-')));
    let int_end = digits_from(pos);
    let mut has_digits = int_end > pos;
    pos = int_end;

    if at(pos) == Some(b'.') {
        let frac_end = digits_from(pos + 1);
        if has_digits || frac_end > pos + 1 {
            has_digits = true;
            pos = frac_end;
        }
    }
    if !has_digits {
        return 0;
    }

    if matches!(at(pos), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(at(pos + 1), Some(b'+' | b'-')));
        let exp_start = pos + 1 + sign;
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            pos = exp_end;
        }
    }
    pos
}

/// `clay` and `loam` are recognised; anything else drains like sand.
pub fn parse_soil(raw: &str) -> SoilType {
    match raw.trim().to_ascii_lowercase().as_str() {
        "clay" => SoilType::Clay,
        "loam" => SoilType::Loam,
        _ => SoilType::Sandy,
    }
}

pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "on"
    )
}
