use std::ops::Deref;

use super::{ensure_finite, SynthesisError};
use crate::constants::MAX_SAMPLES;

/// Relative slack on `duration * fs` before flooring, so products like
/// `0.29 * 100 = 28.999999999999996` count as whole samples
const COUNT_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Evenly spaced sample instants, strictly increasing
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    samples: Vec<f64>,
}

impl Deref for TimeGrid {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

/// Build the sample instants `start + k / fs` for `k` in `0..floor(duration * fs)`
///
/// Grids longer than `MAX_SAMPLES` are rejected as an invalid duration.
pub fn generate_time_grid(start: f64, sampling_frequency: f64, duration: f64) -> Result<TimeGrid, SynthesisError> {
    ensure_finite("start time", start)?;
    if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
        return Err(SynthesisError::InvalidParameter { name: "sampling frequency", value: sampling_frequency });
    }
    if !duration.is_finite() || duration < 0.0 {
        return Err(SynthesisError::InvalidParameter { name: "duration", value: duration });
    }

    let count = (duration * sampling_frequency * (1.0 + COUNT_TOLERANCE)).floor();
    if !count.is_finite() || count > MAX_SAMPLES as f64 {
        return Err(SynthesisError::InvalidParameter { name: "duration", value: duration });
    }

    let samples = (0..count as usize).map(|k| start + k as f64 / sampling_frequency).collect();

    Ok(TimeGrid { samples })
}
