pub use floodrisk_core::*;
pub use floodrisk_form::{parse_flag, parse_number, parse_soil, RiskForm};
pub use floodrisk_presets::{
    from_env as preset_from_env, load as load_preset, load_file as load_preset_file,
    resolve as resolve_preset, resources as preset_resources, scorer as preset_scorer,
    PresetError, PresetResource, DEFAULT_PRESET, PRESET_ENV,
};

/// Parses `form` and scores it under the bundled preset `preset`.
pub fn assess(form: &RiskForm, preset: &str) -> Result<RiskResult, PresetError> {
    let scorer = preset_scorer(preset)?;
    Ok(scorer.evaluate(&form.to_input()))
}
