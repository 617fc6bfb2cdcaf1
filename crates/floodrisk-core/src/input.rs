use std::fmt;

use serde::{Deserialize, Serialize};

/// Drainage class of the ground at the assessed location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    /// Good drainage.
    #[default]
    Sandy,
    /// Moderate drainage.
    Loam,
    /// Poor drainage.
    Clay,
}

impl SoilType {
    pub const ALL: [Self; 3] = [Self::Sandy, Self::Loam, Self::Clay];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandy => "sandy",
            Self::Loam => "loam",
            Self::Clay => "clay",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ground cover percentages. Values outside `0..=100` are accepted here and
/// clamped when scored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VegetationCover {
    pub tree_pct: f64,
    pub shrub_pct: f64,
    pub grass_pct: f64,
}

impl VegetationCover {
    pub const fn new(tree_pct: f64, shrub_pct: f64, grass_pct: f64) -> Self {
        Self {
            tree_pct,
            shrub_pct,
            grass_pct,
        }
    }

    pub const fn bare() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn full() -> Self {
        Self::new(100.0, 100.0, 100.0)
    }

    /// Copy with every percentage clamped to `0..=100`; `NaN` becomes 0.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            tree_pct: clamp_pct(self.tree_pct),
            shrub_pct: clamp_pct(self.shrub_pct),
            grass_pct: clamp_pct(self.grass_pct),
        }
    }
}

pub(crate) fn clamp_pct(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

/// Site description scored by [`crate::evaluate`].
///
/// Numeric fields may carry `NaN` when the caller could not parse a value;
/// such a field lands in the fallback band of its scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    pub elevation_m: f64,
    pub distance_from_water_m: f64,
    #[serde(default)]
    pub soil_type: SoilType,
    #[serde(default)]
    pub previous_flooding: bool,
    pub annual_rainfall_mm: f64,
    #[serde(default)]
    pub vegetation: Option<VegetationCover>,
}

impl RiskInput {
    pub const fn new(
        elevation_m: f64,
        distance_from_water_m: f64,
        soil_type: SoilType,
        previous_flooding: bool,
        annual_rainfall_mm: f64,
    ) -> Self {
        Self {
            elevation_m,
            distance_from_water_m,
            soil_type,
            previous_flooding,
            annual_rainfall_mm,
            vegetation: None,
        }
    }

    #[must_use]
    pub const fn with_vegetation(mut self, cover: VegetationCover) -> Self {
        self.vegetation = Some(cover);
        self
    }

    #[must_use]
    pub const fn without_vegetation(mut self) -> Self {
        self.vegetation = None;
        self
    }
}
