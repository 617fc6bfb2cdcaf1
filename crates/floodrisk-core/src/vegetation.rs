use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, VegetationConfig};
use crate::input::VegetationCover;

/// Raw effectiveness-weighted coverage, before any curve or cap.
///
/// Can exceed 1.0: full coverage under the default effectiveness yields 2.05.
pub fn raw_mitigation(cover: &VegetationCover, cfg: &VegetationConfig) -> f64 {
    let cover = cover.clamped();
    (cover.tree_pct * cfg.tree_effectiveness
        + cover.shrub_pct * cfg.shrub_effectiveness
        + cover.grass_pct * cfg.grass_effectiveness)
        / 100.0
}

/// Mitigation ratio in `0..=max_reduction`.
pub fn mitigation_ratio(cover: &VegetationCover, cfg: &VegetationConfig) -> f64 {
    let raw = raw_mitigation(cover, cfg);
    let curved = match cfg.diminishing_returns {
        // exp_m1 keeps tiny k close to the linear identity
        Some(k) if k.is_finite() && k > 0.0 => (-k * raw).exp_m1() / (-k).exp_m1(),
        _ => raw,
    };
    if curved.is_nan() {
        return 0.0;
    }
    // f64::clamp panics on a NaN bound
    let cap = if cfg.max_reduction.is_nan() {
        1.0
    } else {
        cfg.max_reduction.clamp(0.0, 1.0)
    };
    curved.clamp(0.0, cap)
}

/// Share of vegetation-related risk left after mitigation, never below the floor.
pub fn residual_fraction(cover: &VegetationCover, cfg: &VegetationConfig) -> f64 {
    let floor = cfg.residual_floor.clamp(0.0, 1.0);
    (1.0 - mitigation_ratio(cover, cfg)).max(floor)
}

/// Per-cover weights of the stand-alone mitigation simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationWeights {
    pub trees: f64,
    pub shrubs: f64,
    pub grass: f64,
    pub strong_at: f64,
    pub moderate_at: f64,
}

impl Default for SimulationWeights {
    fn default() -> Self {
        Self {
            trees: 0.50,
            shrubs: 0.30,
            grass: 0.20,
            strong_at: 75.0,
            moderate_at: 45.0,
        }
    }
}

impl SimulationWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("trees", self.trees),
            ("shrubs", self.shrubs),
            ("grass", self.grass),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Vegetation { field, value });
            }
        }
        for (field, value) in [
            ("moderate_at", self.moderate_at),
            ("strong_at", self.strong_at),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Vegetation { field, value });
            }
        }
        if self.moderate_at > self.strong_at {
            return Err(ConfigError::Vegetation {
                field: "moderate_at",
                value: self.moderate_at,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImpactRating {
    Limited,
    Moderate,
    Strong,
}

impl ImpactRating {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limited => "Limited",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
        }
    }
}

impl fmt::Display for ImpactRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stacked-bar breakdown of a simulated flood impact reduction, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VegetationImpact {
    pub trees: f64,
    pub shrubs: f64,
    pub grass: f64,
    pub total_reduction: f64,
    pub remaining_risk: f64,
    pub rating: ImpactRating,
}

/// Weights are taken as given; check them with [`SimulationWeights::validate`]
/// when they come from outside.
pub fn simulate_vegetation(cover: &VegetationCover, weights: &SimulationWeights) -> VegetationImpact {
    let cover = cover.clamped();
    let trees = cover.tree_pct * weights.trees;
    let shrubs = cover.shrub_pct * weights.shrubs;
    let grass = cover.grass_pct * weights.grass;

    let sum = trees + shrubs + grass;
    let total_reduction = if sum.is_nan() { 0.0 } else { sum.clamp(0.0, 100.0) };
    let rating = if total_reduction >= weights.strong_at {
        ImpactRating::Strong
    } else if total_reduction >= weights.moderate_at {
        ImpactRating::Moderate
    } else {
        ImpactRating::Limited
    };

    VegetationImpact {
        trees,
        shrubs,
        grass,
        total_reduction,
        remaining_risk: 100.0 - total_reduction,
        rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombinationMode;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn linear_mitigation_is_capped() {
        let cfg = VegetationConfig::default();
        assert!(close(raw_mitigation(&VegetationCover::full(), &cfg), 2.05));
        assert!(close(mitigation_ratio(&VegetationCover::full(), &cfg), 1.0));
        assert!(close(
            mitigation_ratio(&VegetationCover::new(40.0, 0.0, 0.0), &cfg),
            0.34
        ));
        assert!(close(residual_fraction(&VegetationCover::bare(), &cfg), 1.0));
    }

    #[test]
    fn diminishing_returns_front_loads_mitigation() {
        let curved = VegetationConfig {
            diminishing_returns: Some(2.0),
            ..VegetationConfig::default()
        };
        let linear = VegetationConfig::default();
        let cover = VegetationCover::new(30.0, 0.0, 0.0);

        assert!(mitigation_ratio(&cover, &curved) > mitigation_ratio(&cover, &linear));
        let saturated = VegetationCover::new(100.0, 0.0, 30.0);
        assert!(close(mitigation_ratio(&saturated, &curved), 1.0));
    }

    #[test]
    fn floor_and_cap_bound_the_residual() {
        let cfg = VegetationConfig {
            residual_floor: 0.3,
            max_reduction: 0.6,
            ..VegetationConfig::default()
        };
        assert!(close(residual_fraction(&VegetationCover::full(), &cfg), 0.4));

        let cfg = VegetationConfig {
            residual_floor: 0.5,
            ..VegetationConfig::default()
        };
        assert!(close(residual_fraction(&VegetationCover::full(), &cfg), 0.5));
    }

    #[test]
    fn simulation_breaks_down_segments() {
        let impact = simulate_vegetation(
            &VegetationCover::new(60.0, 50.0, 40.0),
            &SimulationWeights::default(),
        );
        assert!(close(impact.trees, 30.0));
        assert!(close(impact.shrubs, 15.0));
        assert!(close(impact.grass, 8.0));
        assert!(close(impact.total_reduction, 53.0));
        assert!(close(impact.remaining_risk, 47.0));
        assert_eq!(impact.rating, ImpactRating::Moderate);
    }

    #[test]
    fn simulation_caps_and_rates() {
        let weights = SimulationWeights::default();
        let full = simulate_vegetation(&VegetationCover::full(), &weights);
        assert!(close(full.total_reduction, 100.0));
        assert!(close(full.remaining_risk, 0.0));
        assert_eq!(full.rating, ImpactRating::Strong);

        let clamped = simulate_vegetation(&VegetationCover::new(150.0, -20.0, 0.0), &weights);
        assert!(close(clamped.trees, 50.0));
        assert!(close(clamped.shrubs, 0.0));
        assert_eq!(clamped.rating, ImpactRating::Moderate);

        let bare = simulate_vegetation(&VegetationCover::bare(), &weights);
        assert_eq!(bare.rating, ImpactRating::Limited);
    }

    #[test]
    fn tiny_curve_steepness_stays_linear() {
        let cfg = VegetationConfig {
            mode: CombinationMode::Multiplicative,
            diminishing_returns: Some(1e-300),
            ..VegetationConfig::default()
        };
        let linear = VegetationConfig::default();
        let partial = VegetationCover::new(40.0, 0.0, 0.0);
        assert!(close(
            mitigation_ratio(&partial, &cfg),
            mitigation_ratio(&partial, &linear)
        ));

        // non-finite coverage clamps to full trees
        let wild = VegetationCover::new(f64::INFINITY, f64::NEG_INFINITY, f64::NAN);
        assert!(close(mitigation_ratio(&wild, &cfg), 0.85));
        assert!(close(residual_fraction(&wild, &cfg), 0.15));
    }

    #[test]
    fn simulation_weights_validate() {
        assert_eq!(SimulationWeights::default().validate(), Ok(()));

        let negative = SimulationWeights {
            shrubs: -0.3,
            ..SimulationWeights::default()
        };
        assert_eq!(
            negative.validate(),
            Err(ConfigError::Vegetation {
                field: "shrubs",
                value: -0.3
            })
        );

        let nan = SimulationWeights {
            trees: f64::NAN,
            ..SimulationWeights::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::Vegetation { field: "trees", .. })
        ));

        let inverted = SimulationWeights {
            strong_at: 40.0,
            moderate_at: 60.0,
            ..SimulationWeights::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::Vegetation {
                field: "moderate_at",
                value: 60.0
            })
        );

        let beyond = SimulationWeights {
            strong_at: 120.0,
            ..SimulationWeights::default()
        };
        assert!(matches!(
            beyond.validate(),
            Err(ConfigError::Vegetation {
                field: "strong_at",
                ..
            })
        ));
    }
}
