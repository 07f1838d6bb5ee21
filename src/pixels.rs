pub type SubPixel = f32;
pub type Pixel = [SubPixel; CHANNELS_PER_PIXEL];
pub type ImageBuffer = Vec<Pixel>;

pub const CHANNELS_PER_PIXEL: usize = 3;

/// Closed interval of channel values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: SubPixel,
    pub max: SubPixel,
}

impl ValueRange {
    pub const UNIT: ValueRange = ValueRange { min: 0.0, max: 1.0 };
    pub const BYTE: ValueRange = ValueRange { min: 0.0, max: 255.0 };

    pub const fn new(min: SubPixel, max: SubPixel) -> ValueRange {
        ValueRange { min, max }
    }

    pub fn contains(&self, value: SubPixel) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn span(&self) -> SubPixel {
        self.max - self.min
    }
}

pub trait PixelOps {
    fn clip(self) -> Pixel;
    fn is_finite(self) -> bool;
    fn to_rgb8(self) -> [u8; 3];
}

impl PixelOps for Pixel {
    fn clip(self) -> Pixel {
        self.map(|x| x.clamp(0.0, 1.0))
    }

    fn is_finite(self) -> bool {
        self.iter().all(|x| x.is_finite())
    }

    fn to_rgb8(self) -> [u8; 3] {
        self.clip().map(|x| (x * 255.0).round() as u8)
    }
}

pub trait BufferOps {
    /// Smallest and largest sub pixel over every channel, `None` when empty.
    fn channel_extent(&self) -> Option<ValueRange>;
}

impl BufferOps for [Pixel] {
    fn channel_extent(&self) -> Option<ValueRange> {
        use itertools::{Itertools, MinMaxResult};

        match self.iter().flatten().copied().minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(v) => Some(ValueRange::new(v, v)),
            MinMaxResult::MinMax(min, max) => Some(ValueRange::new(min, max)),
        }
    }
}
