//! Per-channel intensity histograms drawn next to the image.

use itertools::{Itertools, MinMaxResult};
use tracing::debug;

use crate::config::HistogramConfig;
use crate::error::{Result, VisError};
use crate::image_array::Image;
use crate::pixels::{ImageBuffer, Pixel, SubPixel};
use crate::surface::PlotSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Pixel,
}

pub const CHANNEL_LEGEND: [LegendEntry; 3] = [
    LegendEntry { label: "red", color: [1.0, 0.0, 0.0] },
    LegendEntry { label: "green", color: [0.0, 0.5, 0.0] },
    LegendEntry { label: "blue", color: [0.0, 0.0, 1.0] },
];

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramFigure {
    pub title: &'static str,
    pub height: usize,
    pub width: usize,
    /// the image rescaled to [0, 1], row-major
    pub thumbnail: ImageBuffer,
    /// `bins + 1` ascending edges shared by all three channels
    pub edges: Vec<SubPixel>,
    pub counts: [Vec<u64>; 3],
    pub alpha: SubPixel,
    pub legend: [LegendEntry; 3],
}

impl HistogramFigure {
    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// `bins + 1` evenly spaced edges from the smallest to the largest value.
/// A constant input is widened by half a unit on each side, an empty one
/// spans [0, 1].
pub fn bin_edges(values: &[SubPixel], bins: usize) -> Vec<SubPixel> {
    let (first, last) = match values.iter().copied().minmax() {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v - 0.5, v + 0.5),
        MinMaxResult::MinMax(min, max) if min == max => (min - 0.5, max + 0.5),
        MinMaxResult::MinMax(min, max) => (min, max),
    };

    let (first64, last64) = (first as f64, last as f64);
    (0..=bins)
        .map(|i| {
            if i == bins {
                return last;
            }
            (first64 + (last64 - first64) * i as f64 / bins as f64) as SubPixel
        })
        .collect()
}

/// Count `values` into the half-open bins `[e_i, e_i+1)`; the last bin is
/// closed. Values outside the edges are dropped.
pub fn bin_counts(values: &[SubPixel], edges: &[SubPixel]) -> Vec<u64> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0; bins];
    if bins == 0 {
        return counts;
    }
    let (first, last) = (edges[0], edges[bins]);

    for value in values.iter().filter(|v| (first..=last).contains(*v)) {
        let idx = edges.partition_point(|e| e <= value).saturating_sub(1).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

pub fn histogram_figure(image: &Image, config: &HistogramConfig) -> Result<HistogramFigure> {
    image.validate()?;
    if config.bins == 0 {
        return Err(VisError::validation("histogram needs at least one bin"));
    }

    let edges = bin_edges(&image.values(), config.bins);
    let counts = [
        bin_counts(&image.channel_values(0)?, &edges),
        bin_counts(&image.channel_values(1)?, &edges),
        bin_counts(&image.channel_values(2)?, &edges),
    ];
    debug!(
        first_edge = edges[0],
        last_edge = edges[config.bins],
        bins = config.bins,
        "shared histogram bins"
    );

    Ok(HistogramFigure {
        title: "Image",
        height: image.height(),
        width: image.width(),
        thumbnail: image.unit_pixels()?,
        edges,
        counts,
        alpha: config.alpha,
        legend: CHANNEL_LEGEND,
    })
}

/// Plot the image and its three channel histograms together.
pub fn vis_hists<S: PlotSurface + ?Sized>(image: &Image, config: &HistogramConfig, surface: &mut S) -> Result<HistogramFigure> {
    let figure = histogram_figure(image, config)?;
    surface.draw_histograms(&figure)?;
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_span_value_range() {
        let edges = bin_edges(&[0.0, 255.0, 17.0], 256);
        assert_eq!(edges.len(), 257);
        assert_eq!(edges[0], 0.0);
        assert_eq!(edges[256], 255.0);
        assert!(edges.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn constant_values_widen_range() {
        let edges = bin_edges(&[3.0, 3.0], 2);
        assert_eq!(edges, vec![2.5, 3.0, 3.5]);
    }

    #[test]
    fn last_bin_is_closed() {
        let edges = vec![0.0, 1.0, 2.0];
        let counts = bin_counts(&[0.0, 0.5, 1.0, 1.5, 2.0, 2.5], &edges);
        assert_eq!(counts, vec![2, 3]);
    }

    #[test]
    fn counts_add_up_per_channel() {
        let image = Image::from_integer_vec(2, 2, 3, vec![
            255, 0, 0,   0, 255, 0,
            0, 0, 255,   255, 255, 255,
        ]).unwrap();
        let figure = histogram_figure(&image, &HistogramConfig::default()).unwrap();

        assert_eq!(figure.edges.len(), 257);
        for counts in &figure.counts {
            assert_eq!(counts.iter().sum::<u64>(), 4);
            assert_eq!(counts[0], 2);
            assert_eq!(counts[255], 2);
        }
        assert_eq!(figure.max_count(), 2);
        assert_eq!(figure.thumbnail[0], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn two_channels_rejected() {
        let image = Image::from_float_vec(2, 2, 2, vec![0.0; 8]).unwrap();
        assert!(matches!(
            histogram_figure(&image, &HistogramConfig::default()),
            Err(VisError::Validation { .. })
        ));
    }

    #[test]
    fn out_of_range_float_rejected() {
        let image = Image::from_float_vec(1, 2, 3, vec![0.0, 0.5, 1.5, 0.2, 0.2, 0.2]).unwrap();
        assert!(matches!(
            histogram_figure(&image, &HistogramConfig::default()),
            Err(VisError::Validation { .. })
        ));
    }

    #[test]
    fn zero_bins_rejected() {
        let image = Image::from_float_vec(1, 1, 3, vec![0.0; 3]).unwrap();
        let config = HistogramConfig { bins: 0, alpha: 0.6 };
        assert!(histogram_figure(&image, &config).is_err());
    }
}
