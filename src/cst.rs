//! Per-pixel color space transforms.
//!
//! CIE L*a*b* and HSV go through `palette`, Oklab through `color`. YCbCr is
//! a plain affine transform and is done here.

use color::ColorSpaceTag;
use palette::{convert::FromColorUnclamped, white_point::D65, Hsv, Lab, Srgb};

use crate::pixels::{Pixel, SubPixel};

// ITU-R BT.601, studio swing, for RGB in [0, 1]
const YCBCR_FROM_RGB: [[f32; 3]; 3] = [
    [ 65.481, 128.553,  24.966],
    [-37.797, -74.203, 112.0  ],
    [112.0,   -93.786, -18.214],
];
const YCBCR_OFFSET: [f32; 3] = [16.0, 128.0, 128.0];

#[inline]
fn matmul(m: &[[f32; 3]; 3], x: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * x[0] + m[0][1] * x[1] + m[0][2] * x[2],
        m[1][0] * x[0] + m[1][1] * x[1] + m[1][2] * x[2],
        m[2][0] * x[0] + m[2][1] * x[1] + m[2][2] * x[2],
    ]
}

/// `[Y, Cb, Cr]` with Y in [16, 235] and Cb, Cr in [16, 240].
#[inline]
pub fn rgb_to_ycbcr(rgb: Pixel) -> Pixel {
    let [y, cb, cr] = matmul(&YCBCR_FROM_RGB, rgb);
    [y + YCBCR_OFFSET[0], cb + YCBCR_OFFSET[1], cr + YCBCR_OFFSET[2]]
}

/// `[H, S, V]`, hue as a fraction of a full turn in [0, 1).
#[inline]
pub fn rgb_to_hsv([r, g, b]: Pixel) -> Pixel {
    let hsv: Hsv = Hsv::from_color_unclamped(Srgb::new(r, g, b));
    [hsv.hue.into_positive_degrees() / 360.0, hsv.saturation, hsv.value]
}

/// CIE `[L, a, b]` against a D65 white, L in [0, 100].
#[inline]
pub fn rgb_to_lab([r, g, b]: Pixel) -> Pixel {
    let lab: Lab<D65, SubPixel> = Lab::from_color_unclamped(Srgb::new(r, g, b));
    [lab.l, lab.a, lab.b]
}

/// Inverse of [`rgb_to_lab`]. No gamut clipping.
#[inline]
pub fn lab_to_rgb([l, a, b]: Pixel) -> Pixel {
    let rgb: Srgb<SubPixel> = Srgb::from_color_unclamped(Lab::<D65, SubPixel>::new(l, a, b));
    [rgb.red, rgb.green, rgb.blue]
}

/// Oklab `[L, a, b]`, L in [0, 1].
#[inline]
pub fn rgb_to_oklab(rgb: Pixel) -> Pixel {
    ColorSpaceTag::Srgb.convert(ColorSpaceTag::Oklab, rgb)
}

/// Inverse of [`rgb_to_oklab`]. No gamut clipping.
#[inline]
pub fn oklab_to_rgb(lab: Pixel) -> Pixel {
    ColorSpaceTag::Oklab.convert(ColorSpaceTag::Srgb, lab)
}
