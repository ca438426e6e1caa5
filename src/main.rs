use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photoqr::codec::{decode_png, encode_png};
use photoqr::error::AppError;
use photoqr::preset::{load_preset, validate};
use photoqr::qr::FastQr;
use qr_stylize::{stylize, BwMode, PixelBuffer, ScalingMode, StylizeOutput, StylizeParams};

#[derive(Parser)]
#[command(name = "photoqr")]
#[command(about = "Fuse a QR code with a photograph into a scannable stylized image")]
struct Cli {
    /// Text or URL to encode
    text: String,

    /// Input photograph (PNG)
    #[arg(short, long)]
    image: PathBuf,

    /// Output PNG file path
    #[arg(short, long)]
    output: PathBuf,

    /// JSON preset file; flags below override its values
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Black/white threshold (0-255)
    #[arg(long)]
    threshold: Option<u8>,

    /// Final integer up-scaling factor
    #[arg(long)]
    scale: Option<u32>,

    /// Noise probability in percent (0-100)
    #[arg(long)]
    noise: Option<f64>,

    /// Dark duotone color, e.g. "#211e59"
    #[arg(long)]
    dark: Option<String>,

    /// Bright duotone color, e.g. "#f9f7dd"
    #[arg(long)]
    bright: Option<String>,

    /// Restore the photo's colors instead of duotone
    #[arg(long)]
    original_colors: bool,

    /// Noise seed; a random seed is drawn when neither this nor a preset is given
    #[arg(long)]
    seed: Option<u32>,

    /// Photo fitting mode: shrink, grow, or stretch (use a preset for custom)
    #[arg(long)]
    scaling: Option<String>,

    /// Blend a diagonal highlight gradient over the result
    #[arg(long)]
    shine: bool,

    /// Use Floyd-Steinberg dithering instead of a hard threshold
    #[arg(long)]
    dither: bool,

    /// Brightness/contrast before dithering (-1..1)
    #[arg(long)]
    dither_gamma: Option<f64>,

    /// Saturation boost for original-color mode (0..1)
    #[arg(long)]
    saturation: Option<f64>,

    /// Scan robustness (0-100); higher keeps recolored pixels closer to black/white
    #[arg(long)]
    robustness: Option<f64>,

    /// Skip the small marker square near the bottom-right corner
    #[arg(long)]
    no_fourth_square: bool,

    /// Dump every intermediate stage as numbered PNGs into this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photoqr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let params = resolve_params(&cli)?;

    tracing::info!(
        text = %params.text,
        seed = params.noise_seed,
        scale = params.scale_factor,
        "running pipeline"
    );

    let photo = decode_png(&cli.image)?;
    let output = stylize(&FastQr, &photo, &params)?;

    if let Some(dir) = &cli.debug_dir {
        dump_intermediates(dir, &output)?;
    }

    encode_png(&cli.output, &output.final_image)?;
    tracing::info!(
        width = output.final_image.width(),
        height = output.final_image.height(),
        path = %cli.output.display(),
        "wrote result"
    );
    Ok(())
}

/// Merge defaults, preset file, and command-line flags, in that order.
fn resolve_params(cli: &Cli) -> Result<StylizeParams, AppError> {
    let mut params = match &cli.preset {
        Some(path) => load_preset(path)?,
        None => StylizeParams::default(),
    };

    params.text = cli.text.clone();
    if let Some(t) = cli.threshold {
        params.threshold = t;
    }
    if let Some(s) = cli.scale {
        params.scale_factor = s;
    }
    if let Some(n) = cli.noise {
        params.noise_probability = n;
    }
    if let Some(dark) = &cli.dark {
        params.dark = dark.clone();
    }
    if let Some(bright) = &cli.bright {
        params.bright = bright.clone();
    }
    if cli.original_colors {
        params.use_original_colors = true;
    }
    match cli.seed {
        Some(seed) => params.noise_seed = seed,
        None if cli.preset.is_none() => {
            params.noise_seed = rand::random();
            tracing::debug!(seed = params.noise_seed, "drew random noise seed");
        }
        None => {}
    }
    if let Some(mode) = &cli.scaling {
        params.scaling_mode = match mode.as_str() {
            "shrink" => ScalingMode::Shrink,
            "grow" => ScalingMode::Grow,
            "stretch" => ScalingMode::Stretch,
            other => {
                return Err(AppError::InvalidParameter(format!(
                    "unknown scaling mode {other:?} (expected shrink, grow, or stretch)"
                )))
            }
        };
    }
    if cli.shine {
        params.shine = true;
    }
    if cli.dither {
        params.bw_mode = BwMode::Dither;
    }
    if let Some(g) = cli.dither_gamma {
        params.dither_gamma = g;
    }
    if let Some(s) = cli.saturation {
        params.saturation_boost = s;
    }
    if let Some(r) = cli.robustness {
        params.robustness = r;
    }
    if cli.no_fourth_square {
        params.add_fourth_square = false;
    }

    // Presets and flags merge unchecked; one range check covers both.
    validate(&params)?;
    Ok(params)
}

/// Write every retained stage as `NN_name.png` into `dir`.
fn dump_intermediates(dir: &PathBuf, out: &StylizeOutput) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)?;

    let mut stages: Vec<(&str, &PixelBuffer)> = vec![
        ("matrix_image", &out.matrix_image),
        ("code", &out.code),
        ("control_mask", &out.control_mask),
        ("control_only", &out.control_only),
        ("control_x3", &out.control_x3),
        ("data_only", &out.data_only),
        ("data_x3", &out.data_x3),
        ("data_thinned", &out.data_thinned),
        ("fitted_photo", &out.fitted_photo),
    ];
    if let Some(adjusted) = &out.adjusted_photo {
        stages.push(("adjusted_photo", adjusted));
    }
    stages.extend([
        ("photo_bw", &out.photo_bw),
        ("photo_bw_noise", &out.photo_bw_noise),
        ("bw_with_control", &out.bw_with_control),
        ("bw_with_code", &out.bw_with_code),
        ("colored", &out.colored),
        ("shined", &out.shined),
        ("final", &out.final_image),
    ]);

    for (i, (name, buf)) in stages.iter().enumerate() {
        let path = dir.join(format!("{i:02}_{name}.png"));
        encode_png(&path, buf)?;
        tracing::debug!(stage = name, path = %path.display(), "dumped intermediate");
    }
    Ok(())
}
