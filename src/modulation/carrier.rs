use std::f64::consts::PI;

use super::{ensure_finite, SynthesisError, Waveform};

/// `amplitude · cos(2π·frequency·t + phase)` at every instant of `time`
pub fn cosine_wave(amplitude: f64, frequency: f64, time: &[f64], phase: f64) -> Result<Waveform, SynthesisError> {
    ensure_finite("amplitude", amplitude)?;
    ensure_finite("frequency", frequency)?;
    ensure_finite("phase", phase)?;

    let omega = 2.0 * PI * frequency;
    Ok(time.iter().map(|&t| amplitude * (omega * t + phase).cos()).collect())
}
