use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, VisError};

/// What to do when more pixels are requested than the image has.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SamplePolicy {
    /// draw every pixel once
    #[default]
    Clamp,
    /// fail with [`VisError::Sampling`]
    Strict,
}

/// Uniformly draw `requested` distinct indices from `0..available`.
///
/// The order is whatever the draw produces. Under [`SamplePolicy::Clamp`]
/// at most `available` indices come back.
pub fn sample_indices<R: Rng + ?Sized>(
    rng: &mut R,
    available: usize,
    requested: usize,
    policy: SamplePolicy,
) -> Result<Vec<usize>> {
    let amount = if requested <= available {
        requested
    } else {
        match policy {
            SamplePolicy::Clamp => {
                warn!(requested, available, "sample count clamped to pixel count");
                available
            }
            SamplePolicy::Strict => return Err(VisError::Sampling { requested, available }),
        }
    };

    let indices = rand::seq::index::sample(rng, available, amount).into_vec();
    debug!(amount, available, "sampled pixel indices");
    Ok(indices)
}
