use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VisError};
use crate::pixels::SubPixel;
use crate::sampling::SamplePolicy;

/// Every tunable of the visualizations. Missing TOML keys fall back to the
/// defaults below.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct VisConfig {
    pub scatter: ScatterConfig,
    pub histogram: HistogramConfig,
    pub render: RenderConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScatterConfig {
    pub sample_count: usize,
    pub seed: Option<u64>,
    pub policy: SamplePolicy,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        ScatterConfig {
            sample_count: 5000,
            seed: None,
            policy: SamplePolicy::Clamp,
        }
    }
}

impl ScatterConfig {
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_policy(mut self, policy: SamplePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Seeded when `seed` is set, otherwise drawn from the OS.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HistogramConfig {
    pub bins: usize,
    pub alpha: SubPixel,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        HistogramConfig { bins: 256, alpha: 0.6 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// degrees above the xy plane
    pub elevation: f32,
    /// degrees around the z axis
    pub azimuth: f32,
    pub marker_size: u32,
    pub background: [u8; 3],
    /// canvas for the image-plus-histogram figure, wide to fit both panels
    pub histogram_width: u32,
    pub histogram_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 400,
            height: 400,
            elevation: 30.0,
            azimuth: -60.0,
            marker_size: 3,
            background: [255, 255, 255],
            histogram_width: 900,
            histogram_height: 300,
        }
    }
}

impl RenderConfig {
    /// The same settings on the histogram canvas size.
    pub fn histogram_canvas(&self) -> RenderConfig {
        RenderConfig {
            width: self.histogram_width,
            height: self.histogram_height,
            ..self.clone()
        }
    }
}

pub fn parse_config(data: &str) -> Result<VisConfig> {
    let config: VisConfig = toml::from_str(data).map_err(|e| VisError::config("invalid visualization config", e))?;
    return Ok(config)
}

pub fn load_config(config_path: impl AsRef<Path>) -> Result<VisConfig> {
    let config_path = config_path.as_ref();
    let data = std::fs::read_to_string(config_path)
        .map_err(|e| VisError::config(format!("cannot read {}", config_path.display()), e))?;
    parse_config(&data)
}
