//! Color-space scatter plots of a random subset of an image's pixels.

use tracing::debug;

use crate::config::ScatterConfig;
use crate::error::Result;
use crate::image_array::{Image, ImageKind};
use crate::pixels::{BufferOps, ImageBuffer, Pixel, ValueRange};
use crate::projection::{project, AxisLabels, ColorSpace};
use crate::sampling::sample_indices;
use crate::surface::PlotSurface;

/// How sampled RGB values are mapped to [0, 1] marker colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayNormalization {
    /// divide by the image's declared maximum
    DeclaredRange,
    /// when the sample exceeds 1, shift by its minimum and divide by the
    /// shifted maximum. Lossy: a narrow sample gets stretched and hues drift.
    SampleMinMax,
}

impl DisplayNormalization {
    pub fn for_space(space: ColorSpace) -> DisplayNormalization {
        match space {
            ColorSpace::Rgb => DisplayNormalization::DeclaredRange,
            _ => DisplayNormalization::SampleMinMax,
        }
    }
}

/// Marker colors for sampled RGB values. Not a color space conversion.
pub fn display_colors(samples: &[Pixel], declared: ValueRange, normalization: DisplayNormalization) -> ImageBuffer {
    let by_declared = |p: &Pixel| p.map(|x| x / declared.max);

    match normalization {
        DisplayNormalization::DeclaredRange => samples.iter().map(by_declared).collect(),
        DisplayNormalization::SampleMinMax => {
            let extent = match samples.channel_extent() {
                Some(extent) if extent.max > 1.0 => extent,
                _ => return samples.to_vec(),
            };
            let span = extent.span();
            if span <= 0.0 {
                return samples.iter().map(by_declared).collect();
            }
            samples.iter().map(|p| p.map(|x| (x - extent.min) / span)).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub space: ColorSpace,
    pub kind: ImageKind,
    /// indices into the flattened pixel list
    pub indices: Vec<usize>,
    pub points: ImageBuffer,
    pub colors: ImageBuffer,
    pub labels: AxisLabels,
    pub bounds: [ValueRange; 3],
}

impl ScatterFigure {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Project, sample and color; nothing is drawn.
pub fn scatter_figure(image: &Image, space: ColorSpace, config: &ScatterConfig) -> Result<ScatterFigure> {
    let coordinates = project(image, space)?;
    let rgb = image.pixels()?;

    let mut rng = config.rng();
    let indices = sample_indices(&mut rng, coordinates.len(), config.sample_count, config.policy)?;

    let points: ImageBuffer = indices.iter().map(|i| coordinates[*i]).collect();
    let sampled_rgb: ImageBuffer = indices.iter().map(|i| rgb[*i]).collect();
    let colors = display_colors(&sampled_rgb, image.declared_range(), DisplayNormalization::for_space(space));

    debug!(%space, points = points.len(), "scatter figure ready");
    Ok(ScatterFigure {
        space,
        kind: image.kind(),
        indices,
        points,
        colors,
        labels: space.axis_labels(),
        bounds: space.axis_bounds(image.kind()),
    })
}

/// Scatter `image` in `space` on `surface`. Drawing starts only once
/// validation and sampling have succeeded.
pub fn vis_cube<S: PlotSurface + ?Sized>(
    image: &Image,
    space: ColorSpace,
    config: &ScatterConfig,
    surface: &mut S,
) -> Result<ScatterFigure> {
    let figure = scatter_figure(image, space, config)?;
    surface.draw_scatter(&figure)?;
    Ok(figure)
}

/// RGB color cube.
pub fn vis_rgb_cube<S: PlotSurface + ?Sized>(image: &Image, config: &ScatterConfig, surface: &mut S) -> Result<ScatterFigure> {
    vis_cube(image, ColorSpace::Rgb, config, surface)
}

/// HSV cylinder: hue is the angle, saturation the radius, value the height.
pub fn vis_hsv_cube<S: PlotSurface + ?Sized>(image: &Image, config: &ScatterConfig, surface: &mut S) -> Result<ScatterFigure> {
    vis_cube(image, ColorSpace::Hsv, config, surface)
}

pub fn vis_lab_cube<S: PlotSurface + ?Sized>(image: &Image, config: &ScatterConfig, surface: &mut S) -> Result<ScatterFigure> {
    vis_cube(image, ColorSpace::Lab, config, surface)
}

pub fn vis_ybr_cube<S: PlotSurface + ?Sized>(image: &Image, config: &ScatterConfig, surface: &mut S) -> Result<ScatterFigure> {
    vis_cube(image, ColorSpace::YCbCr, config, surface)
}
