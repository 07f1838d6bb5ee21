//! Plotting surfaces the renderers draw on.
//!
//! [`RasterSurface`] paints figures into an in-memory [`RgbImage`]; writing
//! it anywhere is left to the caller. [`RecordingSurface`] just keeps every
//! figure it is handed.

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::{Result, VisError};
use crate::helpers::index2d;
use crate::histogram::HistogramFigure;
use crate::pixels::{Pixel, PixelOps, SubPixel};
use crate::scatter::ScatterFigure;

pub trait PlotSurface {
    fn draw_scatter(&mut self, figure: &ScatterFigure) -> Result<()>;
    fn draw_histograms(&mut self, figure: &HistogramFigure) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub scatters: Vec<ScatterFigure>,
    pub histograms: Vec<HistogramFigure>,
}

impl PlotSurface for RecordingSurface {
    fn draw_scatter(&mut self, figure: &ScatterFigure) -> Result<()> {
        self.scatters.push(figure.clone());
        Ok(())
    }

    fn draw_histograms(&mut self, figure: &HistogramFigure) -> Result<()> {
        self.histograms.push(figure.clone());
        Ok(())
    }
}

const AXIS_COLOR: [u8; 3] = [128, 128, 128];
const MARGIN: i64 = 10;
const SWATCH: i64 = 8;

// unit cube centred on the origin
const BOX_CORNERS: [Pixel; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Every draw call starts from a cleared canvas, so the canvas always holds
/// the last figure drawn.
pub struct RasterSurface {
    config: RenderConfig,
    canvas: RgbImage,
}

impl RasterSurface {
    pub fn new(config: RenderConfig) -> Result<RasterSurface> {
        if config.width == 0 || config.height == 0 {
            return Err(VisError::render(format!(
                "canvas must have a non-zero area, got {}x{}",
                config.width, config.height
            )));
        }
        let canvas = RgbImage::from_pixel(config.width, config.height, Rgb(config.background));
        Ok(RasterSurface { config, canvas })
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    pub fn into_canvas(self) -> RgbImage {
        self.canvas
    }

    fn clear(&mut self) {
        let background = Rgb(self.config.background);
        self.canvas.pixels_mut().for_each(|p| *p = background);
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 3]) {
        if x < 0 || y < 0 || x >= self.canvas.width() as i64 || y >= self.canvas.height() as i64 {
            return;
        }
        self.canvas.put_pixel(x as u32, y as u32, Rgb(color));
    }

    fn blend(&mut self, x: i64, y: i64, color: Pixel, alpha: SubPixel) {
        if x < 0 || y < 0 || x >= self.canvas.width() as i64 || y >= self.canvas.height() as i64 {
            return;
        }
        let Rgb(current) = *self.canvas.get_pixel(x as u32, y as u32);
        let mixed: Pixel = std::array::from_fn(|c| current[c] as SubPixel / 255.0 * (1.0 - alpha) + color[c] * alpha);
        self.put(x, y, mixed.to_rgb8());
    }

    fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: [u8; 3]) {
        let (right, bottom) = ((x + width).min(self.canvas.width() as i64), (y + height).min(self.canvas.height() as i64));
        for yy in y.max(0)..bottom {
            for xx in x.max(0)..right {
                self.put(xx, yy, color);
            }
        }
    }

    fn line(&mut self, (x0, y0): (f32, f32), (x1, y1): (f32, f32), color: [u8; 3]) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.put(x.round() as i64, y.round() as i64, color);
        }
    }

    /// Marker side in pixels, at least one and never wider than the canvas.
    fn marker_size(&self) -> i64 {
        let side = self.canvas.width().min(self.canvas.height());
        self.config.marker_size.clamp(1, side) as i64
    }

    /// Screen position and depth of a point inside the centred unit cube.
    /// Larger depth is farther from the viewer.
    fn view(&self, [x, y, z]: Pixel) -> (f32, f32, f32) {
        let (sin_az, cos_az) = self.config.azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = self.config.elevation.to_radians().sin_cos();

        let across = x * cos_az - y * sin_az;
        let toward = x * sin_az + y * cos_az;
        let up = z * cos_el - toward * sin_el;
        let depth = toward * cos_el + z * sin_el;

        let (width, height) = (self.canvas.width() as f32, self.canvas.height() as f32);
        let scale = width.min(height) / 1.8;
        (width / 2.0 + across * scale, height / 2.0 - up * scale, depth)
    }
}

/// Position of `point` inside its axis box, centred on the origin.
fn to_unit_box(point: Pixel, figure: &ScatterFigure) -> Pixel {
    std::array::from_fn(|axis| {
        let bounds = figure.bounds[axis];
        let span = bounds.span();
        if span > 0.0 {
            (point[axis] - bounds.min) / span - 0.5
        } else {
            0.0
        }
    })
}

impl PlotSurface for RasterSurface {
    fn draw_scatter(&mut self, figure: &ScatterFigure) -> Result<()> {
        if figure.points.len() != figure.colors.len() {
            return Err(VisError::render(format!(
                "{} points but {} colors",
                figure.points.len(),
                figure.colors.len()
            )));
        }
        self.clear();

        let corners = BOX_CORNERS.map(|c| self.view(c));
        for (a, b) in BOX_EDGES {
            self.line((corners[a].0, corners[a].1), (corners[b].0, corners[b].1), AXIS_COLOR);
        }

        let mut projected: Vec<(f32, f32, f32, [u8; 3])> = figure
            .points
            .iter()
            .zip(&figure.colors)
            .map(|(p, c)| {
                let (x, y, depth) = self.view(to_unit_box(*p, figure));
                (x, y, depth, c.to_rgb8())
            })
            .collect();
        // painter's order: far points first
        projected.sort_by(|a, b| b.2.total_cmp(&a.2));

        let size = self.marker_size();
        for (x, y, _, color) in projected {
            let (left, top) = (x.round() as i64 - size / 2, y.round() as i64 - size / 2);
            self.fill_rect(left, top, size, size, color);
        }

        debug!(space = %figure.space, points = figure.len(), "scatter rasterized");
        Ok(())
    }

    fn draw_histograms(&mut self, figure: &HistogramFigure) -> Result<()> {
        let bins = figure.edges.len().saturating_sub(1);
        if bins == 0 || figure.counts.iter().any(|c| c.len() != bins) {
            return Err(VisError::render(format!(
                "{} edges do not match counts of length {:?}",
                figure.edges.len(),
                figure.counts.each_ref().map(|c| c.len())
            )));
        }
        if figure.thumbnail.len() != figure.height * figure.width {
            return Err(VisError::render(format!(
                "thumbnail holds {} pixels, expected {}x{}",
                figure.thumbnail.len(),
                figure.height,
                figure.width
            )));
        }
        self.clear();

        let (width, height) = (self.canvas.width() as i64, self.canvas.height() as i64);
        let panel = width / 2;

        // left: the image, nearest neighbour, aspect kept
        if figure.height > 0 && figure.width > 0 {
            let fit_w = (panel - 2 * MARGIN).max(1) as f32 / figure.width as f32;
            let fit_h = (height - 2 * MARGIN).max(1) as f32 / figure.height as f32;
            let scale = fit_w.min(fit_h);
            let target_w = ((figure.width as f32 * scale) as usize).max(1);
            let target_h = ((figure.height as f32 * scale) as usize).max(1);
            let top = (height - target_h as i64) / 2;

            for (_, y, x) in index2d(target_h, target_w) {
                let src_y = (y * figure.height / target_h).min(figure.height - 1);
                let src_x = (x * figure.width / target_w).min(figure.width - 1);
                let color = figure.thumbnail[src_y * figure.width + src_x].to_rgb8();
                self.put(MARGIN + x as i64, top + y as i64, color);
            }
        }

        // right: overlapping channel bars
        let left = panel + MARGIN;
        let plot_w = (width - left - MARGIN).max(1);
        let baseline = height - MARGIN;
        let plot_h = (height - 2 * MARGIN).max(1);
        let max_count = figure.max_count().max(1) as f32;

        for (counts, entry) in figure.counts.iter().zip(&figure.legend) {
            for (bin, count) in counts.iter().enumerate() {
                let x0 = left + bin as i64 * plot_w / bins as i64;
                let x1 = (left + (bin as i64 + 1) * plot_w / bins as i64).max(x0 + 1);
                let bar = (*count as f32 / max_count * plot_h as f32).round() as i64;
                for y in baseline - bar..baseline {
                    for x in x0..x1 {
                        self.blend(x, y, entry.color, figure.alpha);
                    }
                }
            }
        }
        self.line((left as f32, baseline as f32), ((left + plot_w) as f32, baseline as f32), AXIS_COLOR);

        // legend swatches, upper right
        for (row, entry) in figure.legend.iter().enumerate() {
            let y = MARGIN + row as i64 * (SWATCH + 4);
            self.fill_rect(width - MARGIN - SWATCH, y, SWATCH, SWATCH, entry.color.to_rgb8());
        }

        debug!(bins, max_count = figure.max_count(), "histograms rasterized");
        Ok(())
    }
}
