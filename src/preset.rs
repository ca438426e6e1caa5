//! JSON preset files for pipeline parameters.
//!
//! A preset is a JSON object with any subset of the [`StylizeParams`]
//! fields; missing fields keep their defaults. Command-line flags are
//! applied on top by the caller, so precedence is defaults < preset < flags.

use std::fs;
use std::path::Path;

use qr_stylize::{ScalingMode, StylizeParams};

use crate::error::AppError;

/// Load a preset file into a full parameter set.
pub fn load_preset(path: &Path) -> Result<StylizeParams, AppError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::Preset(format!("{}: {e}", path.display())))
}

/// Check parameter ranges on the fully merged set.
///
/// Presets and flags merge without individual checks, so this runs once on
/// the final values before the pipeline: scale >= 1, noise 0-100, dither
/// gamma -1..1, saturation 0..1, robustness 0-100, custom zoom -1..2 with
/// offsets in -1..1. Range checks also reject NaN.
pub fn validate(params: &StylizeParams) -> Result<(), AppError> {
    if params.scale_factor < 1 {
        return Err(AppError::InvalidParameter(
            "scale factor must be >= 1".into(),
        ));
    }
    if !(0.0..=100.0).contains(&params.noise_probability) {
        return Err(AppError::InvalidParameter(format!(
            "noise probability {} out of range 0-100",
            params.noise_probability
        )));
    }
    if !(-1.0..=1.0).contains(&params.dither_gamma) {
        return Err(AppError::InvalidParameter(format!(
            "dither gamma {} out of range -1..1",
            params.dither_gamma
        )));
    }
    if !(0.0..=1.0).contains(&params.saturation_boost) {
        return Err(AppError::InvalidParameter(format!(
            "saturation boost {} out of range 0..1",
            params.saturation_boost
        )));
    }
    if !(0.0..=100.0).contains(&params.robustness) {
        return Err(AppError::InvalidParameter(format!(
            "robustness {} out of range 0-100",
            params.robustness
        )));
    }
    if let ScalingMode::Custom {
        zoom,
        offset_x,
        offset_y,
    } = params.scaling_mode
    {
        if !(-1.0..=2.0).contains(&zoom) {
            return Err(AppError::InvalidParameter(format!(
                "zoom {zoom} out of range -1..2"
            )));
        }
        if !(-1.0..=1.0).contains(&offset_x) || !(-1.0..=1.0).contains(&offset_y) {
            return Err(AppError::InvalidParameter(format!(
                "offsets ({offset_x}, {offset_y}) out of range -1..1"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_preset(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_partial_preset_keeps_defaults() {
        let (_dir, path) = write_preset(r#"{"shine": true, "noise_probability": 25.0}"#);
        let params = load_preset(&path).unwrap();
        assert!(params.shine);
        assert_eq!(params.noise_probability, 25.0);
        assert_eq!(params.threshold, 128);
        assert_eq!(params.noise_seed, 12345);
    }

    #[test]
    fn test_unknown_field_is_reported_with_path() {
        let (_dir, path) = write_preset(r#"{"treshold": 5}"#);
        let err = load_preset(&path).unwrap_err();
        match err {
            AppError::Preset(msg) => assert!(msg.contains("preset.json"), "message: {msg}"),
            other => panic!("expected Preset error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        validate(&StylizeParams::default()).unwrap();
    }

    #[test]
    fn test_validate_catches_out_of_range_preset_values() {
        // Presets bypass the flag parser, so merged values must be checked.
        let (_dir, path) = write_preset(r#"{"scale_factor": 0}"#);
        let params = load_preset(&path).unwrap();
        assert!(matches!(
            validate(&params),
            Err(AppError::InvalidParameter(_))
        ));

        let (_dir, path) = write_preset(r#"{"noise_probability": 150.0}"#);
        let params = load_preset(&path).unwrap();
        assert!(matches!(
            validate(&params),
            Err(AppError::InvalidParameter(_))
        ));

        let (_dir, path) = write_preset(r#"{"dither_gamma": -2.0}"#);
        let params = load_preset(&path).unwrap();
        assert!(matches!(
            validate(&params),
            Err(AppError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_bounds_custom_zoom_and_offsets() {
        let (_dir, path) =
            write_preset(r#"{"scaling_mode": {"mode": "custom", "zoom": 50.0}}"#);
        let params = load_preset(&path).unwrap();
        assert!(matches!(
            validate(&params),
            Err(AppError::InvalidParameter(_))
        ));

        let (_dir, path) = write_preset(
            r#"{"scaling_mode": {"mode": "custom", "zoom": 1.5, "offset_x": -3.0}}"#,
        );
        let params = load_preset(&path).unwrap();
        assert!(matches!(
            validate(&params),
            Err(AppError::InvalidParameter(_))
        ));

        let (_dir, path) = write_preset(
            r#"{"scaling_mode": {"mode": "custom", "zoom": 1.5, "offset_x": -0.5}}"#,
        );
        let params = load_preset(&path).unwrap();
        validate(&params).unwrap();
    }

    #[test]
    fn test_custom_scaling_mode_preset() {
        let (_dir, path) = write_preset(
            r#"{"scaling_mode": {"mode": "custom", "zoom": 0.5, "offset_x": -0.25}}"#,
        );
        let params = load_preset(&path).unwrap();
        assert_eq!(
            params.scaling_mode,
            qr_stylize::ScalingMode::Custom {
                zoom: 0.5,
                offset_x: -0.25,
                offset_y: 0.0,
            }
        );
    }
}
