#![warn(unused_extern_crates)]
//! Visualization helpers for teaching image processing: color-space scatter
//! plots, channel histograms and lightness normalization of color lists.

pub mod conditional_paralell;
pub mod config;
pub mod cst;
pub mod error;
pub mod helpers;
pub mod histogram;
pub mod image_array;
pub mod luminance;
pub mod pixels;
pub mod projection;
pub mod sampling;
pub mod scatter;
pub mod surface;

pub use config::{load_config, parse_config, HistogramConfig, RenderConfig, ScatterConfig, VisConfig};
pub use error::{Result, VisError};
pub use histogram::{histogram_figure, vis_hists, HistogramFigure};
pub use image_array::{Image, ImageKind};
pub use luminance::{clip_to_gamut, lab_uniform, normalize_lightness, PerceptualModel};
pub use pixels::{ImageBuffer, Pixel, ValueRange};
pub use projection::{project, ColorSpace};
pub use sampling::{sample_indices, SamplePolicy};
pub use scatter::{
    display_colors, scatter_figure, vis_cube, vis_hsv_cube, vis_lab_cube, vis_rgb_cube, vis_ybr_cube,
    DisplayNormalization, ScatterFigure,
};
pub use surface::{PlotSurface, RasterSurface, RecordingSurface};
