use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Elevation,
    Distance,
    Soil,
    History,
    Rainfall,
    Vegetation,
}

impl Factor {
    /// Chart order.
    pub const ALL: [Self; 6] = [
        Self::Elevation,
        Self::Distance,
        Self::Soil,
        Self::History,
        Self::Rainfall,
        Self::Vegetation,
    ];

    pub const BASE: [Self; 5] = [
        Self::Elevation,
        Self::Distance,
        Self::Soil,
        Self::History,
        Self::Rainfall,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Elevation => "elevation",
            Self::Distance => "distance",
            Self::Soil => "soil",
            Self::History => "history",
            Self::Rainfall => "rainfall",
            Self::Vegetation => "vegetation",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Elevation => "Elevation",
            Self::Distance => "Distance from Water",
            Self::Soil => "Soil Type",
            Self::History => "Flooding History",
            Self::Rainfall => "Rainfall",
            Self::Vegetation => "Vegetation",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-factor sub-scores of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorScores {
    pub elevation: f64,
    pub distance: f64,
    pub soil: f64,
    pub history: f64,
    pub rainfall: f64,
    pub vegetation: f64,
}

impl FactorScores {
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

    /// `(factor, sub-score)` pairs in [`Factor::ALL`] order, ready for a radar chart.
    pub fn entries(&self) -> [(Factor, f64); 6] {
        Factor::ALL.map(|factor| (factor, self.get(factor)))
    }
}
