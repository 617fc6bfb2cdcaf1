use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CombinationMode, ConfigError, ScoringConfig};
use crate::factor::{Factor, FactorScores};
use crate::input::RiskInput;
use crate::vegetation::residual_fraction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// One-line preparedness advice shown next to the tier.
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Low => {
                "Minimal likelihood of significant flooding; stay alert during heavy rain."
            }
            Self::Medium => {
                "Moderate chance of flooding; consider water barriers, drainage work and flood insurance."
            }
            Self::High => {
                "Strong possibility of flooding; prepare a flood action plan, elevate utilities and know your evacuation routes."
            }
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub level: RiskLevel,
    /// Percentage in `0..=100`.
    pub score: f64,
    pub factors: FactorScores,
}

/// Scores `input` under `config`.
///
/// Total over every input: `NaN` measurements fall into their fallback band and
/// coverage is clamped. The config is not validated here; a degenerate one
/// (e.g. zero total weight) yields a score of 0 rather than an error.
pub fn evaluate(input: &RiskInput, config: &ScoringConfig) -> RiskResult {
    let bands = &config.bands;
    let vegetation = &config.vegetation;
    let residual = input
        .vegetation
        .as_ref()
        .map(|cover| residual_fraction(cover, vegetation));

    let factors = FactorScores {
        elevation: bands.elevation.score(input.elevation_m),
        distance: bands.distance.score(input.distance_from_water_m),
        soil: bands.soil.score(input.soil_type),
        history: bands.history.score(input.previous_flooding),
        rainfall: bands.rainfall.score(input.annual_rainfall_mm),
        vegetation: residual.map_or(0.0, |r| config.max_sub_score * r),
    };

    let raw = match (vegetation.mode, residual) {
        (CombinationMode::Multiplicative, Some(r)) => weighted_percent(&factors, config, false) * r,
        (CombinationMode::Additive, Some(_)) => weighted_percent(&factors, config, true),
        (_, None) => weighted_percent(&factors, config, false),
    };
    let score = if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let level = config.thresholds.classify(score);

    debug!(
        score,
        level = %level,
        mode = ?vegetation.mode,
        vegetation = residual.is_some(),
        "flood risk evaluated"
    );

    RiskResult {
        level,
        score,
        factors,
    }
}

fn weighted_percent(factors: &FactorScores, config: &ScoringConfig, with_vegetation: bool) -> f64 {
    let active: &[Factor] = if with_vegetation {
        &Factor::ALL
    } else {
        &Factor::BASE
    };
    let (weighted, total) = active.iter().fold((0.0, 0.0), |(acc, sum), factor| {
        let w = config.weights.get(*factor);
        (acc + w * factors.get(*factor), sum + w)
    });

    let usable = total.is_finite() && total > 0.0 && config.max_sub_score > 0.0;
    if !usable {
        return 0.0;
    }
    weighted / total / config.max_sub_score * 100.0
}

/// Evaluator bound to a validated [`ScoringConfig`].
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate(&self, input: &RiskInput) -> RiskResult {
        evaluate(input, &self.config)
    }
}
