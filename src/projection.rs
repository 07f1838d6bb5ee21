//! Color-space projector: one coordinate triple per pixel.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conditional_paralell::prelude::*;
use crate::cst::{rgb_to_hsv, rgb_to_lab, rgb_to_ycbcr};
use crate::error::{Result, VisError};
use crate::image_array::{Image, ImageKind};
use crate::pixels::{ImageBuffer, Pixel, PixelOps, ValueRange};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Rgb,
    Hsv,
    Lab,
    YCbCr,
}

/// Labels for the x, y and z axes of a scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: &'static str,
    pub y: &'static str,
    pub z: &'static str,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 4] = [ColorSpace::Rgb, ColorSpace::Hsv, ColorSpace::Lab, ColorSpace::YCbCr];

    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Hsv => "hsv",
            ColorSpace::Lab => "lab",
            ColorSpace::YCbCr => "ycbcr",
        }
    }

    pub fn axis_labels(self) -> AxisLabels {
        match self {
            ColorSpace::Rgb => AxisLabels { x: "Red", y: "Green", z: "Blue" },
            ColorSpace::Hsv => AxisLabels { x: "H and S", y: "H and S", z: "Value" },
            ColorSpace::Lab => AxisLabels { x: "green->red", y: "blue->yellow", z: "Lightness" },
            ColorSpace::YCbCr => AxisLabels { x: "Lightness (Y)", y: "yellow->blue (Cb)", z: "cyan->red (Cr)" },
        }
    }

    /// Extent of each projected axis, used to frame the plot.
    pub fn axis_bounds(self, kind: ImageKind) -> [ValueRange; 3] {
        match self {
            ColorSpace::Rgb => [kind.declared_range(); 3],
            ColorSpace::Hsv => [
                ValueRange::new(-1.0, 1.0),
                ValueRange::new(-1.0, 1.0),
                ValueRange::UNIT,
            ],
            ColorSpace::Lab => [
                ValueRange::new(-128.0, 128.0),
                ValueRange::new(-128.0, 128.0),
                ValueRange::new(0.0, 100.0),
            ],
            ColorSpace::YCbCr => [ValueRange::new(16.0, 240.0); 3],
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "hsv" => Ok(ColorSpace::Hsv),
            "lab" => Ok(ColorSpace::Lab),
            "ycbcr" | "ybr" => Ok(ColorSpace::YCbCr),
            other => Err(VisError::validation(format!("unknown color space {other:?}"))),
        }
    }
}

/// Hue/saturation polar pair to cartesian, value kept as height.
#[inline]
fn hsv_to_cylinder([h, s, v]: Pixel) -> Pixel {
    let (sin, cos) = (2.0 * PI * h).sin_cos();
    [s * cos, s * sin, v]
}

/// Per-pixel coordinates of `image` in `space`, flattened row-major.
///
/// RGB returns the raw channel values after a full validation. The other
/// spaces only require three channels; integer images are rescaled to
/// [0, 1] by their declared range before conversion.
pub fn project(image: &Image, space: ColorSpace) -> Result<ImageBuffer> {
    let coordinates: ImageBuffer = match space {
        ColorSpace::Rgb => {
            image.validate()?;
            return image.pixels();
        }
        ColorSpace::Hsv => image
            .unit_pixels()?
            .par_iter()
            .map(|p| hsv_to_cylinder(rgb_to_hsv(*p)))
            .collect(),
        ColorSpace::Lab => image
            .unit_pixels()?
            .par_iter()
            .map(|p| {
                let [l, a, b] = rgb_to_lab(*p);
                [a, b, l]
            })
            .collect(),
        ColorSpace::YCbCr => image.unit_pixels()?.par_iter().map(|p| rgb_to_ycbcr(*p)).collect(),
    };

    ensure_finite(image, space, coordinates)
}

fn ensure_finite(image: &Image, space: ColorSpace, coordinates: ImageBuffer) -> Result<ImageBuffer> {
    if let Some(idx) = coordinates.iter().position(|c| !c.is_finite()) {
        let width = image.width().max(1);
        return Err(VisError::conversion(format!(
            "rgb to {space} produced {:?} at pixel {idx} (row {}, col {})",
            coordinates[idx],
            idx / width,
            idx % width
        )));
    }
    Ok(coordinates)
}
