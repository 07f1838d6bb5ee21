use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser as Clap_parser;
use dipvis::{
    lab_uniform, load_config, vis_cube, vis_hists, ColorSpace, Image, RasterSurface, VisConfig,
};
use image::{Rgb, RgbImage};
use palette::{FromColor, Hsv, Srgb};
use tracing::info;

#[derive(Clap_parser, Debug, Clone)]
#[command(author, version, about = "Render dipvis figures for a synthetic gradient", long_about = None)]
struct Args {
    /// rgb, hsv, lab, ycbcr or all
    #[arg(long, default_value = "all")]
    space: String,

    /// pixels to scatter, overrides the config
    #[arg(short = 'n', long = "samples")]
    samples: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long = "config", value_name = "config_path")]
    config_path: Option<PathBuf>,

    /// directory for the PNG figures, nothing is written without it
    #[arg(short, long = "out", value_name = "out_dir")]
    out_dir: Option<PathBuf>,

    /// side of the synthetic image in pixels
    #[arg(long, default_value_t = 96)]
    size: u32,
}

/// Hue sweeps left to right, value drops top to bottom.
fn gradient(size: u32) -> RgbImage {
    let side = size.max(1) as f32;
    RgbImage::from_fn(size, size, |x, y| {
        let hsv: Hsv = Hsv::new(360.0 * x as f32 / side, 0.85, 1.0 - 0.8 * y as f32 / side);
        let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsv).into_format();
        Rgb([rgb.red, rgb.green, rgb.blue])
    })
}

fn save(surface: &RasterSurface, out_dir: Option<&Path>, name: &str) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = out_dir {
        let path = dir.join(name);
        surface.canvas().save(&path)?;
        info!(path = %path.display(), "figure saved");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config_path {
        Some(path) => load_config(path)?,
        None => VisConfig::default(),
    };
    if let Some(samples) = args.samples {
        config.scatter.sample_count = samples;
    }
    if let Some(seed) = args.seed {
        config.scatter.seed = Some(seed);
    }

    let spaces = if args.space.eq_ignore_ascii_case("all") {
        ColorSpace::ALL.to_vec()
    } else {
        vec![args.space.parse::<ColorSpace>()?]
    };
    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let image = Image::from_rgb8(&gradient(args.size))?;
    let mut surface = RasterSurface::new(config.render.clone())?;

    for space in spaces {
        let now = Instant::now();
        let figure = vis_cube(&image, space, &config.scatter, &mut surface)?;
        info!(%space, points = figure.len(), elapsed = ?now.elapsed(), "scatter drawn");
        save(&surface, args.out_dir.as_deref(), &format!("{space}_cube.png"))?;
    }

    let mut hist_surface = RasterSurface::new(config.render.histogram_canvas())?;
    let now = Instant::now();
    let figure = vis_hists(&image, &config.histogram, &mut hist_surface)?;
    info!(bins = figure.counts[0].len(), elapsed = ?now.elapsed(), "histograms drawn");
    save(&hist_surface, args.out_dir.as_deref(), "hists.png")?;

    let colors = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
    for (before, after) in colors.iter().zip(lab_uniform(&colors)) {
        info!(?before, ?after, "lightness normalized");
    }

    Ok(())
}
