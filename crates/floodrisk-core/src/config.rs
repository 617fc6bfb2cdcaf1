use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::factor::Factor;
use crate::input::SoilType;
use crate::scorer::RiskLevel;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max sub-score must be positive and finite, got {0}")]
    MaxSubScore(f64),

    #[error("weight for {factor} must be finite and non-negative, got {value}")]
    Weight { factor: Factor, value: f64 },

    #[error("base factor weights sum to zero")]
    ZeroBaseWeight,

    #[error("thresholds must satisfy 0 <= medium ({medium}) <= high ({high}) <= 100")]
    Thresholds { medium: f64, high: f64 },

    #[error("{factor} bands invalid: {reason}")]
    Bands {
        factor: Factor,
        reason: &'static str,
    },

    #[error("vegetation {field} out of range: {value}")]
    Vegetation { field: &'static str, value: f64 },
}

/// Which side of a breakpoint counts as riskier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `value < limit` matches; smaller values are riskier.
    Below,
    /// `value > limit` matches; larger values are riskier.
    Above,
}

impl Direction {
    fn matches(self, value: f64, limit: f64) -> bool {
        match self {
            Self::Below => value < limit,
            Self::Above => value > limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub limit: f64,
    pub score: f64,
}

impl Step {
    pub const fn new(limit: f64, score: f64) -> Self {
        Self { limit, score }
    }
}

/// Monotonic step function from a raw measurement to a sub-score.
///
/// Steps are tried in order and the first match wins. A value that matches no
/// step, `NaN` included, gets `fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepScale {
    pub direction: Direction,
    pub steps: Vec<Step>,
    pub fallback: f64,
}

impl StepScale {
    pub fn score(&self, value: f64) -> f64 {
        self.steps
            .iter()
            .find(|step| self.direction.matches(value, step.limit))
            .map_or(self.fallback, |step| step.score)
    }

    fn validate(&self, factor: Factor, max_sub_score: f64) -> Result<(), ConfigError> {
        let bands = |reason| ConfigError::Bands { factor, reason };
        let in_range = |v: f64| v.is_finite() && (0.0..=max_sub_score).contains(&v);

        if !in_range(self.fallback) || self.steps.iter().any(|s| !in_range(s.score)) {
            return Err(bands("sub-score outside 0..=max_sub_score"));
        }
        if self.steps.iter().any(|s| !s.limit.is_finite()) {
            return Err(bands("non-finite breakpoint"));
        }
        for pair in self.steps.windows(2) {
            if let [a, b] = pair {
                let ordered = match self.direction {
                    Direction::Below => a.limit < b.limit,
                    Direction::Above => a.limit > b.limit,
                };
                if !ordered {
                    return Err(bands("breakpoints out of order"));
                }
                if b.score > a.score {
                    return Err(bands("sub-scores must not increase along the scale"));
                }
            }
        }
        if self.steps.last().is_some_and(|last| self.fallback > last.score) {
            return Err(bands("fallback exceeds the last step"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilScores {
    pub sandy: f64,
    pub loam: f64,
    pub clay: f64,
}

impl Default for SoilScores {
    fn default() -> Self {
        Self {
            sandy: 1.0,
            loam: 2.0,
            clay: 3.0,
        }
    }
}

impl SoilScores {
    pub const fn score(&self, soil: SoilType) -> f64 {
        match soil {
            SoilType::Sandy => self.sandy,
            SoilType::Loam => self.loam,
            SoilType::Clay => self.clay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryScores {
    pub flooded: f64,
    pub clear: f64,
}

impl Default for HistoryScores {
    fn default() -> Self {
        Self {
            flooded: 3.0,
            clear: 0.0,
        }
    }
}

impl HistoryScores {
    pub const fn score(&self, previous_flooding: bool) -> f64 {
        if previous_flooding {
            self.flooded
        } else {
            self.clear
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorBands {
    pub elevation: StepScale,
    pub distance: StepScale,
    pub rainfall: StepScale,
    pub soil: SoilScores,
    pub history: HistoryScores,
}

impl Default for FactorBands {
    fn default() -> Self {
        Self {
            elevation: StepScale {
                direction: Direction::Below,
                steps: vec![Step::new(10.0, 3.0), Step::new(30.0, 2.0), Step::new(50.0, 1.0)],
                fallback: 0.0,
            },
            distance: StepScale {
                direction: Direction::Below,
                steps: vec![
                    Step::new(100.0, 3.0),
                    Step::new(500.0, 2.0),
                    Step::new(1000.0, 1.0),
                ],
                fallback: 0.0,
            },
            rainfall: StepScale {
                direction: Direction::Above,
                steps: vec![Step::new(2000.0, 3.0), Step::new(1000.0, 2.0)],
                fallback: 1.0,
            },
            soil: SoilScores::default(),
            history: HistoryScores::default(),
        }
    }
}

impl FactorBands {
    fn validate(&self, max_sub_score: f64) -> Result<(), ConfigError> {
        self.elevation.validate(Factor::Elevation, max_sub_score)?;
        self.distance.validate(Factor::Distance, max_sub_score)?;
        self.rainfall.validate(Factor::Rainfall, max_sub_score)?;

        let in_range = |v: f64| v.is_finite() && (0.0..=max_sub_score).contains(&v);
        let soil = [self.soil.sandy, self.soil.loam, self.soil.clay];
        if !soil.into_iter().all(in_range) {
            return Err(ConfigError::Bands {
                factor: Factor::Soil,
                reason: "sub-score outside 0..=max_sub_score",
            });
        }
        if self.soil.sandy > self.soil.loam || self.soil.loam > self.soil.clay {
            return Err(ConfigError::Bands {
                factor: Factor::Soil,
                reason: "poorer drainage must not score lower",
            });
        }
        if !(in_range(self.history.flooded) && in_range(self.history.clear)) {
            return Err(ConfigError::Bands {
                factor: Factor::History,
                reason: "sub-score outside 0..=max_sub_score",
            });
        }
        if self.history.clear > self.history.flooded {
            return Err(ConfigError::Bands {
                factor: Factor::History,
                reason: "a clear record must not score above a flooded one",
            });
        }
        Ok(())
    }
}

/// Relative factor importance. Only the ratios matter: weights are
/// renormalised over the factors active in an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub elevation: f64,
    pub distance: f64,
    pub soil: f64,
    pub history: f64,
    pub rainfall: f64,
    pub vegetation: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            elevation: 0.25,
            distance: 0.20,
            soil: 0.15,
            history: 0.20,
            rainfall: 0.15,
            vegetation: 0.05,
        }
    }
}

impl WeightConfig {
    pub const fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Elevation => self.elevation,
            Factor::Distance => self.distance,
            Factor::Soil => self.soil,
            Factor::History => self.history,
            Factor::Rainfall => self.rainfall,
            Factor::Vegetation => self.vegetation,
        }
    }

    pub fn base_total(&self) -> f64 {
        Factor::BASE.iter().map(|f| self.get(*f)).sum()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for factor in Factor::ALL {
            let value = self.get(factor);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Weight { factor, value });
            }
        }
        if self.base_total() <= 0.0 {
            return Err(ConfigError::ZeroBaseWeight);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub high: f64,
    pub medium: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high: 65.0,
            medium: 35.0,
        }
    }
}

impl ThresholdConfig {
    /// Pre-adjustment tier boundaries.
    pub const LEGACY: Self = Self {
        high: 70.0,
        medium: 40.0,
    };

    pub fn classify(&self, score: f64) -> RiskLevel {
        if score >= self.high {
            RiskLevel::High
        } else if score >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.medium.is_finite()
            && self.high.is_finite()
            && 0.0 <= self.medium
            && self.medium <= self.high
            && self.high <= 100.0;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::Thresholds {
                medium: self.medium,
                high: self.high,
            })
        }
    }
}

/// How vegetation mitigation enters the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationMode {
    /// Vegetation is one more weighted factor.
    #[default]
    Additive,
    /// The base score is scaled by the residual fraction left after mitigation.
    Multiplicative,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VegetationConfig {
    pub mode: CombinationMode,
    pub tree_effectiveness: f64,
    pub shrub_effectiveness: f64,
    pub grass_effectiveness: f64,
    /// Curve steepness `k` for `(1 - e^(-k x)) / (1 - e^(-k))`; `None` keeps mitigation linear.
    pub diminishing_returns: Option<f64>,
    /// Smallest residual fraction vegetation can leave.
    pub residual_floor: f64,
    /// Cap on the mitigation ratio.
    pub max_reduction: f64,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self {
            mode: CombinationMode::Additive,
            tree_effectiveness: 0.85,
            shrub_effectiveness: 0.70,
            grass_effectiveness: 0.50,
            diminishing_returns: None,
            residual_floor: 0.0,
            max_reduction: 1.0,
        }
    }
}

impl VegetationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let effectiveness = [
            ("tree_effectiveness", self.tree_effectiveness),
            ("shrub_effectiveness", self.shrub_effectiveness),
            ("grass_effectiveness", self.grass_effectiveness),
        ];
        for (field, value) in effectiveness {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Vegetation { field, value });
            }
        }
        for (field, value) in [
            ("residual_floor", self.residual_floor),
            ("max_reduction", self.max_reduction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Vegetation { field, value });
            }
        }
        if let Some(k) = self.diminishing_returns {
            if !k.is_finite() || k <= 0.0 {
                return Err(ConfigError::Vegetation {
                    field: "diminishing_returns",
                    value: k,
                });
            }
        }
        Ok(())
    }
}

/// Everything the scorer needs besides the input itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub max_sub_score: f64,
    pub bands: FactorBands,
    pub weights: WeightConfig,
    pub thresholds: ThresholdConfig,
    pub vegetation: VegetationConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_sub_score: 3.0,
            bands: FactorBands::default(),
            weights: WeightConfig::default(),
            thresholds: ThresholdConfig::default(),
            vegetation: VegetationConfig::default(),
        }
    }
}

impl ScoringConfig {
    #[must_use]
    pub fn with_weights(mut self, weights: WeightConfig) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_vegetation(mut self, vegetation: VegetationConfig) -> Self {
        self.vegetation = vegetation;
        self
    }

    #[must_use]
    pub fn with_bands(mut self, bands: FactorBands) -> Self {
        self.bands = bands;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_sub_score.is_finite() || self.max_sub_score <= 0.0 {
            return Err(ConfigError::MaxSubScore(self.max_sub_score));
        }
        self.bands.validate(self.max_sub_score)?;
        self.weights.validate()?;
        self.thresholds.validate()?;
        self.vegetation.validate()
    }
}
