use ndarray::{Array3, ArrayView3, Axis};
use tracing::debug;

use crate::error::{Result, VisError};
use crate::pixels::{ImageBuffer, Pixel, SubPixel, ValueRange, CHANNELS_PER_PIXEL};

/// Numeric kind of an [`Image`], each with its own declared value range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// values in [0, 1]
    Float,
    /// values in [0, 255]
    Integer,
}

impl ImageKind {
    pub fn declared_range(self) -> ValueRange {
        match self {
            ImageKind::Float => ValueRange::UNIT,
            ImageKind::Integer => ValueRange::BYTE,
        }
    }
}

/// A (height, width, channels) array owned by the caller.
///
/// Nothing here rescales on the fly: the kind decides the declared range
/// once, and [`Image::validate`] checks the data against it.
#[derive(Clone, Debug, PartialEq)]
pub enum Image {
    Float(Array3<SubPixel>),
    Integer(Array3<i32>),
}

impl Image {
    pub fn from_float_vec(height: usize, width: usize, channels: usize, data: Vec<SubPixel>) -> Result<Image> {
        let array = Array3::from_shape_vec((height, width, channels), data)
            .map_err(|e| VisError::validation(format!("cannot shape float data as ({height}, {width}, {channels}): {e}")))?;
        Ok(Image::Float(array))
    }

    pub fn from_integer_vec(height: usize, width: usize, channels: usize, data: Vec<i32>) -> Result<Image> {
        let array = Array3::from_shape_vec((height, width, channels), data)
            .map_err(|e| VisError::validation(format!("cannot shape integer data as ({height}, {width}, {channels}): {e}")))?;
        Ok(Image::Integer(array))
    }

    /// Wrap an 8-bit RGB buffer from the `image` crate as an integer image.
    pub fn from_rgb8(rgb: &image::RgbImage) -> Result<Image> {
        let (width, height) = rgb.dimensions();
        let data = rgb.as_raw().iter().map(|v| *v as i32).collect();
        Image::from_integer_vec(height as usize, width as usize, CHANNELS_PER_PIXEL, data)
    }

    pub fn kind(&self) -> ImageKind {
        match self {
            Image::Float(_) => ImageKind::Float,
            Image::Integer(_) => ImageKind::Integer,
        }
    }

    pub fn declared_range(&self) -> ValueRange {
        self.kind().declared_range()
    }

    /// `[height, width, channels]`
    pub fn shape(&self) -> [usize; 3] {
        let dim = match self {
            Image::Float(a) => a.dim(),
            Image::Integer(a) => a.dim(),
        };
        [dim.0, dim.1, dim.2]
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    pub fn pixel_count(&self) -> usize {
        let [height, width, _] = self.shape();
        height * width
    }

    pub fn check_channels(&self) -> Result<()> {
        let shape = self.shape();
        if shape[2] != CHANNELS_PER_PIXEL {
            return Err(VisError::validation(format!(
                "image should be 3-channel, got shape {shape:?}"
            )));
        }
        Ok(())
    }

    pub fn check_range(&self) -> Result<()> {
        let declared = self.declared_range();
        let out_of_range = self.values().iter().any(|v| !declared.contains(*v));
        if out_of_range {
            let found = self.value_extent();
            let kind = match self.kind() {
                ImageKind::Float => "float",
                ImageKind::Integer => "integer",
            };
            return Err(VisError::validation(format!(
                "{kind} image should be in [{}, {}], got ({}, {})",
                declared.min, declared.max, found.min, found.max
            )));
        }
        Ok(())
    }

    /// Channel count first, then the declared value range.
    pub fn validate(&self) -> Result<()> {
        self.check_channels()?;
        self.check_range()?;
        debug!(shape = ?self.shape(), kind = ?self.kind(), "image validated");
        Ok(())
    }

    /// Actual smallest and largest value, NaN ignored. Empty images report (0, 0).
    pub fn value_extent(&self) -> ValueRange {
        let values = self.values();
        let (min, max) = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((SubPixel::INFINITY, SubPixel::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        if min > max {
            return ValueRange::new(0.0, 0.0);
        }
        ValueRange::new(min, max)
    }

    /// Every value of every channel in row-major order.
    pub fn values(&self) -> Vec<SubPixel> {
        match self {
            Image::Float(a) => a.iter().copied().collect(),
            Image::Integer(a) => a.iter().map(|v| *v as SubPixel).collect(),
        }
    }

    pub fn channel_values(&self, channel: usize) -> Result<Vec<SubPixel>> {
        self.check_channels()?;
        if channel >= CHANNELS_PER_PIXEL {
            return Err(VisError::validation(format!("no channel {channel} in a 3-channel image")));
        }
        let values = match self {
            Image::Float(a) => a.index_axis(Axis(2), channel).iter().copied().collect(),
            Image::Integer(a) => a.index_axis(Axis(2), channel).iter().map(|v| *v as SubPixel).collect(),
        };
        Ok(values)
    }

    /// Flattened pixel list in the image's own scale.
    pub fn pixels(&self) -> Result<ImageBuffer> {
        self.check_channels()?;
        let pixels = match self {
            Image::Float(a) => flatten(a.view(), |v| v),
            Image::Integer(a) => flatten(a.view(), |v| v as SubPixel),
        };
        Ok(pixels)
    }

    /// Flattened pixel list rescaled to [0, 1] by the declared range.
    pub fn unit_pixels(&self) -> Result<ImageBuffer> {
        let max = self.declared_range().max;
        let pixels = self.pixels()?;
        if max == 1.0 {
            return Ok(pixels);
        }
        Ok(pixels.into_iter().map(|p| p.map(|x| x / max)).collect())
    }
}

fn flatten<T: Copy>(array: ArrayView3<'_, T>, to_sub_pixel: impl Fn(T) -> SubPixel) -> ImageBuffer {
    array
        .lanes(Axis(2))
        .into_iter()
        .map(|lane| -> Pixel { [to_sub_pixel(lane[0]), to_sub_pixel(lane[1]), to_sub_pixel(lane[2])] })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primaries() -> Image {
        Image::from_integer_vec(2, 2, 3, vec![
            255, 0, 0,   0, 255, 0,
            0, 0, 255,   255, 255, 255,
        ]).unwrap()
    }

    #[test]
    fn pixels_are_row_major() {
        let pixels = primaries().pixels().unwrap();
        assert_eq!(pixels, vec![
            [255.0, 0.0, 0.0], [0.0, 255.0, 0.0],
            [0.0, 0.0, 255.0], [255.0, 255.0, 255.0],
        ]);
    }

    #[test]
    fn unit_pixels_use_declared_range() {
        let pixels = primaries().unit_pixels().unwrap();
        assert_eq!(pixels[0], [1.0, 0.0, 0.0]);
        assert_eq!(pixels[3], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn channel_values_pick_one_channel() {
        let green = primaries().channel_values(1).unwrap();
        assert_eq!(green, vec![0.0, 255.0, 0.0, 255.0]);
    }

    #[test]
    fn four_channels_rejected() {
        let image = Image::from_float_vec(1, 2, 4, vec![0.0; 8]).unwrap();
        let err = image.validate().unwrap_err();
        assert!(matches!(err, VisError::Validation { .. }));
        assert!(err.to_string().contains("[1, 2, 4]"));
    }

    #[test]
    fn float_out_of_range_rejected() {
        let image = Image::from_float_vec(1, 1, 3, vec![0.2, 1.5, 0.0]).unwrap();
        let err = image.validate().unwrap_err();
        assert!(err.to_string().contains("(0, 1.5)"));
    }

    #[test]
    fn integer_out_of_range_rejected() {
        let image = Image::from_integer_vec(1, 1, 3, vec![-1, 10, 300]).unwrap();
        let err = image.validate().unwrap_err();
        assert!(err.to_string().contains("(-1, 300)"));
    }

    #[test]
    fn nan_fails_range_check() {
        let image = Image::from_float_vec(1, 1, 3, vec![0.2, f32::NAN, 0.0]).unwrap();
        assert!(image.validate().is_err());
    }

    #[test]
    fn bad_shape_is_validation_error() {
        let err = Image::from_float_vec(2, 2, 3, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, VisError::Validation { .. }));
    }

    #[test]
    fn rgb8_roundtrip_shape() {
        let rgb = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
        let image = Image::from_rgb8(&rgb).unwrap();
        assert_eq!(image.shape(), [2, 3, 3]);
        assert_eq!(image.pixels().unwrap()[5], [10.0, 20.0, 30.0]);
    }
}
