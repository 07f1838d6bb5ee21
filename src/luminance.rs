//! Lightness normalization for hand-picked color lists (colormaps, label
//! palettes). Every output color keeps its hue and chroma but takes the
//! list's mean lightness, so no entry looks brighter than the others.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cst::{lab_to_rgb, oklab_to_rgb, rgb_to_lab, rgb_to_oklab};
use crate::helpers::Stats;
use crate::pixels::{Pixel, PixelOps, SubPixel};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PerceptualModel {
    /// CIE L*a*b*, D65 white, L in [0, 100]
    #[default]
    CieLab,
    /// Oklab, L in [0, 1]
    Oklab,
}

impl PerceptualModel {
    pub fn from_rgb(self, rgb: Pixel) -> Pixel {
        match self {
            PerceptualModel::CieLab => rgb_to_lab(rgb),
            PerceptualModel::Oklab => rgb_to_oklab(rgb),
        }
    }

    pub fn to_rgb(self, lab: Pixel) -> Pixel {
        match self {
            PerceptualModel::CieLab => lab_to_rgb(lab),
            PerceptualModel::Oklab => oklab_to_rgb(lab),
        }
    }

    pub fn lightness(self, rgb: Pixel) -> SubPixel {
        self.from_rgb(rgb)[0]
    }
}

/// Give every color the mean L* of the list, in CIE L*a*b*.
pub fn lab_uniform(colors: &[Pixel]) -> Vec<Pixel> {
    normalize_lightness(colors, PerceptualModel::CieLab)
}

/// Replace each color's lightness by the mean lightness of `colors` under
/// `model`. Order and length are kept. The result is not gamut clipped, so
/// channels may leave [0, 1]; see [`clip_to_gamut`].
pub fn normalize_lightness(colors: &[Pixel], model: PerceptualModel) -> Vec<Pixel> {
    if colors.is_empty() {
        return vec![];
    }

    let labs: Vec<Pixel> = colors.iter().map(|c| model.from_rgb(*c)).collect();
    let lightness: Vec<SubPixel> = labs.iter().map(|[l, _, _]| *l).collect();
    let mean = lightness.iter().mean();
    debug!(?model, mean, count = colors.len(), "normalizing lightness");

    labs.into_iter().map(|[_, a, b]| model.to_rgb([mean, a, b])).collect()
}

/// Clamp every channel into [0, 1] for display.
pub fn clip_to_gamut(colors: &[Pixel]) -> Vec<Pixel> {
    colors.iter().map(|c| c.clip()).collect()
}
