use std::fs;
use std::path::Path;

use floodrisk_core::{ConfigError, RiskScorer, ScoringConfig};
use tracing::{debug, info, warn};

mod error;

pub use error::PresetError;

pub const DEFAULT_PRESET: &str = "standard";
pub const PRESET_ENV: &str = "FLOODRISK_PRESET";

pub const STANDARD_TEXT: &str = include_str!("../../../presets/standard.json");
pub const LEGACY_THRESHOLDS_TEXT: &str = include_str!("../../../presets/legacy-thresholds.json");
pub const CANOPY_DAMPENED_TEXT: &str = include_str!("../../../presets/canopy-dampened.json");

#[derive(Debug, Clone, Copy)]
pub struct PresetResource {
    pub name: &'static str,
    pub description: &'static str,
    pub text: &'static str,
}

static PRESET_RESOURCES: [PresetResource; 3] = [
    PresetResource {
        name: DEFAULT_PRESET,
        description: "Calculator weights with 65/35 tier thresholds; vegetation as a weighted factor.",
        text: STANDARD_TEXT,
    },
    PresetResource {
        name: "legacy-thresholds",
        description: "Standard formula with the pre-adjustment 70/40 tier thresholds.",
        text: LEGACY_THRESHOLDS_TEXT,
    },
    PresetResource {
        name: "canopy-dampened",
        description: "Simulation cover weights applied as a capped dampener on the base score.",
        text: CANOPY_DAMPENED_TEXT,
    },
];

pub fn resources() -> &'static [PresetResource] {
    &PRESET_RESOURCES
}

/// Bundled JSON for `name`; lookup ignores case and surrounding whitespace.
pub fn resource_text(name: &str) -> Option<&'static str> {
    let key = normalize(name);
    PRESET_RESOURCES
        .iter()
        .find(|resource| resource.name == key)
        .map(|resource| resource.text)
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn decode(name: &str, text: &str) -> Result<ScoringConfig, PresetError> {
    serde_json::from_str(text).map_err(|source| PresetError::Parse {
        name: name.to_string(),
        source,
    })
}

fn invalid(name: &str) -> impl FnOnce(ConfigError) -> PresetError + '_ {
    move |source| PresetError::Invalid {
        name: name.to_string(),
        source,
    }
}

/// Parses and validates a preset document. Missing fields take their defaults.
pub fn parse(name: &str, text: &str) -> Result<ScoringConfig, PresetError> {
    let config = decode(name, text)?;
    config.validate().map_err(invalid(name))?;
    Ok(config)
}

/// Parses a preset document into a scorer, validating it once.
pub fn parse_scorer(name: &str, text: &str) -> Result<RiskScorer, PresetError> {
    RiskScorer::new(decode(name, text)?).map_err(invalid(name))
}

fn bundled(name: &str) -> Result<&'static str, PresetError> {
    let Some(text) = resource_text(name) else {
        warn!(preset = name, "unknown flood risk preset requested");
        return Err(PresetError::Unknown(name.trim().to_string()));
    };
    debug!(preset = name, "loading bundled preset");
    Ok(text)
}

pub fn load(name: &str) -> Result<ScoringConfig, PresetError> {
    parse(&normalize(name), bundled(name)?)
}

pub fn load_file(path: impl AsRef<Path>) -> Result<ScoringConfig, PresetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PresetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&path.display().to_string(), &text)?;
    info!(path = %path.display(), "loaded preset file");
    Ok(config)
}

pub fn scorer(name: &str) -> Result<RiskScorer, PresetError> {
    parse_scorer(&normalize(name), bundled(name)?)
}

/// Resolves a preset selector: blank or absent means [`DEFAULT_PRESET`], a
/// value ending in `.json` is read from disk, anything else is a bundled name.
pub fn resolve(selector: Option<&str>) -> Result<ScoringConfig, PresetError> {
    match selector.map(str::trim).filter(|s| !s.is_empty()) {
        None => load(DEFAULT_PRESET),
        Some(s) if s.to_ascii_lowercase().ends_with(".json") => load_file(s),
        Some(s) => load(s),
    }
}

/// [`resolve`] on the value of `FLOODRISK_PRESET`.
pub fn from_env() -> Result<ScoringConfig, PresetError> {
    let selector = std::env::var(PRESET_ENV).ok();
    resolve(selector.as_deref())
}
