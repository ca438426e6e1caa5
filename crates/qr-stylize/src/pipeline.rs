//! The end-to-end stylize pipeline.
//!
//! [`stylize`] runs the full transform: encode the text into a module
//! matrix, split it into control and data layers, fit and binarize the
//! photograph, inject noise, composite the layers, recolor, optionally
//! shine, and scale to the final size. Every intermediate buffer is retained
//! in [`StylizeOutput`] so callers can inspect or dump any stage.
//!
//! All stages are pure functions over immutable buffers; the only fallible
//! external call is the matrix generation at the start, and a failure there
//! aborts the whole run with no partial output.

use serde::Deserialize;

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::composite::{overlay, overlay_diagonal_gradient};
use crate::error::StylizeError;
use crate::fit::{fit_to_dimensions, ScalingMode};
use crate::geometry::{add_margin, keep_block_centers, scale3, scale_by_factor};
use crate::mask::{apply_mask, generate_mask};
use crate::matrix::{render_matrix, MatrixSource};
use crate::noise::add_noise;
use crate::recolor::{apply_duotone, apply_original_colors, soften_lightness};
use crate::tone::{adjust_brightness_contrast, floyd_steinberg_dither, threshold_bw};

/// Quiet-zone width around the module matrix, in modules.
const MARGIN: u32 = 1;
/// Finder-pattern side length, in modules.
const FINDER_RECT: u32 = 8;
/// Shine gradient endpoint at the bottom-left corner.
const SHINE_BOTTOM_LEFT: Rgb = Rgb {
    r: 0x35,
    g: 0x45,
    b: 0x6c,
};
/// Shine gradient endpoint at the top-right corner.
const SHINE_TOP_RIGHT: Rgb = Rgb {
    r: 0xff,
    g: 0xfe,
    b: 0xa0,
};

/// How the photograph is reduced to black and white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BwMode {
    /// Hard luminance threshold.
    #[default]
    Threshold,
    /// Brightness/contrast curve followed by Floyd-Steinberg dithering.
    Dither,
}

/// All tunables accepted by [`stylize`].
///
/// Deserializes from JSON presets; every field falls back to its default
/// when absent, so a preset only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylizeParams {
    /// Text to encode. Empty input is replaced by a single space so the
    /// encoder always has payload.
    pub text: String,
    /// Black/white cut for [`BwMode::Threshold`].
    pub threshold: u8,
    /// Final nearest-neighbor up-scaling factor.
    pub scale_factor: u32,
    /// Noise probability in percent (0-100).
    pub noise_probability: f64,
    /// Duotone dark color, `#rrggbb`.
    pub dark: String,
    /// Duotone bright color, `#rrggbb`.
    pub bright: String,
    /// Restore the photograph's colors instead of duotone.
    pub use_original_colors: bool,
    /// Seed for the noise generator.
    pub noise_seed: u32,
    /// How the photo is fitted to the code grid.
    pub scaling_mode: ScalingMode,
    /// Blend a diagonal highlight gradient over the result.
    pub shine: bool,
    /// Threshold or dither.
    pub bw_mode: BwMode,
    /// Brightness/contrast for [`BwMode::Dither`], in [-1, 1].
    pub dither_gamma: f64,
    /// Saturation boost in [0, 1] for original-color mode.
    pub saturation_boost: f64,
    /// Scan robustness in [0, 100]; higher pins recolored pixels closer to
    /// pure black/white.
    pub robustness: f64,
    /// Mask the small fixed marker square near the bottom-right corner.
    pub add_fourth_square: bool,
}

impl Default for StylizeParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            threshold: 128,
            scale_factor: 3,
            noise_probability: 10.0,
            dark: "#000000".to_string(),
            bright: "#ffffff".to_string(),
            use_original_colors: false,
            noise_seed: 12345,
            scaling_mode: ScalingMode::Shrink,
            shine: false,
            bw_mode: BwMode::Threshold,
            dither_gamma: 0.0,
            saturation_boost: 0.0,
            robustness: 50.0,
            add_fourth_square: true,
        }
    }
}

/// Every stage of a pipeline run, finished result last.
///
/// Field order follows execution order. All buffers except
/// `adjusted_photo` are always produced; that one only exists in dither
/// mode.
#[derive(Debug, Clone)]
pub struct StylizeOutput {
    /// The raw matrix at one pixel per module, no margin.
    pub matrix_image: PixelBuffer,
    /// Matrix plus the one-module quiet zone.
    pub code: PixelBuffer,
    /// Control mask covering margin, finder corners, and marker square.
    pub control_mask: PixelBuffer,
    /// The code restricted to the control regions, transparent elsewhere.
    pub control_only: PixelBuffer,
    /// Control regions scaled x3.
    pub control_x3: PixelBuffer,
    /// The code with control regions blanked out.
    pub data_only: PixelBuffer,
    /// Data modules scaled x3.
    pub data_x3: PixelBuffer,
    /// Data modules thinned to block centers.
    pub data_thinned: PixelBuffer,
    /// Photograph fitted to the code grid.
    pub fitted_photo: PixelBuffer,
    /// Brightness/contrast-adjusted grayscale, dither mode only.
    pub adjusted_photo: Option<PixelBuffer>,
    /// Binarized photograph.
    pub photo_bw: PixelBuffer,
    /// Binarized photograph with noise applied.
    pub photo_bw_noise: PixelBuffer,
    /// Noisy photo with control regions stamped on.
    pub bw_with_control: PixelBuffer,
    /// Control plus thinned data stamped on.
    pub bw_with_code: PixelBuffer,
    /// Recolored composite (duotone or original colors).
    pub colored: PixelBuffer,
    /// Colored result after the optional shine gradient.
    pub shined: PixelBuffer,
    /// Final image, `shined` scaled by `scale_factor`.
    pub final_image: PixelBuffer,
}

/// Run the full pipeline.
///
/// The output side length is `(matrix_size + 2 * margin) * 3 * scale_factor`
/// pixels. Fails if the matrix source rejects the text, a hex color does not
/// parse, or an internal dimension invariant is broken.
pub fn stylize(
    source: &dyn MatrixSource,
    photo: &PixelBuffer,
    params: &StylizeParams,
) -> Result<StylizeOutput, StylizeError> {
    let dark = Rgb::from_hex(&params.dark)?;
    let bright = Rgb::from_hex(&params.bright)?;

    let text = if params.text.is_empty() {
        " "
    } else {
        params.text.as_str()
    };
    let matrix = source.generate(text)?;
    let matrix_image = render_matrix(&matrix);

    let code = add_margin(MARGIN, &matrix_image);
    let control_mask = generate_mask(&code, MARGIN, FINDER_RECT, params.add_fourth_square);
    let control_only = apply_mask(&code, &control_mask, [0, 0, 0, 0], true)?;
    let control_x3 = scale3(&control_only);
    let data_only = apply_mask(&code, &control_mask, [0, 0, 0, 0], false)?;
    let data_x3 = scale3(&data_only);
    let data_thinned = keep_block_centers(&data_x3)?;

    let fitted_photo = fit_to_dimensions(
        photo,
        data_thinned.width(),
        data_thinned.height(),
        params.scaling_mode,
    );

    let (adjusted_photo, photo_bw) = match params.bw_mode {
        BwMode::Threshold => (None, threshold_bw(&fitted_photo, params.threshold)),
        BwMode::Dither => {
            let adjusted = adjust_brightness_contrast(&fitted_photo, params.dither_gamma);
            let bw = floyd_steinberg_dither(&adjusted);
            (Some(adjusted), bw)
        }
    };

    let photo_bw_noise = add_noise(&photo_bw, params.noise_probability, params.noise_seed);
    let bw_with_control = overlay(&photo_bw_noise, &control_x3)?;
    let bw_with_code = overlay(&bw_with_control, &data_thinned)?;

    let colored = if params.use_original_colors {
        apply_original_colors(
            &bw_with_code,
            &fitted_photo,
            &data_x3,
            params.saturation_boost,
            params.robustness,
        )
    } else {
        apply_duotone(&bw_with_code, dark, bright)
    };

    let plain_palette = params.dark.eq_ignore_ascii_case("#000000")
        && params.bright.eq_ignore_ascii_case("#ffffff");
    let shined = if params.shine {
        let pre = if plain_palette {
            soften_lightness(&colored)
        } else {
            colored.clone()
        };
        overlay_diagonal_gradient(&pre, SHINE_BOTTOM_LEFT, SHINE_TOP_RIGHT)
    } else {
        colored.clone()
    };

    let final_image = scale_by_factor(&shined, params.scale_factor);

    Ok(StylizeOutput {
        matrix_image,
        code,
        control_mask,
        control_only,
        control_x3,
        data_only,
        data_x3,
        data_thinned,
        fitted_photo,
        adjusted_photo,
        photo_bw,
        photo_bw_noise,
        bw_with_control,
        bw_with_code,
        colored,
        shined,
        final_image,
    })
}
