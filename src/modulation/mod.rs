//! Signal synthesis
//!
//! Closed-form generation of message, carrier, AM and FM waveforms on an
//! evenly spaced time grid. Everything here is a pure function of its inputs.

use snafu::Snafu;
use tracing::debug;

pub use amplitude::am_signal;
pub use carrier::cosine_wave;
pub use frequency::fm_signal;
pub use time_grid::{generate_time_grid, TimeGrid};

mod amplitude;
mod carrier;
mod frequency;
mod time_grid;

/// Sampled amplitude values, one per time grid instant
pub type Waveform = Vec<f64>;

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum SynthesisError {
    /// A frequency, amplitude, duration or phase was out of range
    #[snafu(display("invalid {name}: {value}"))]
    InvalidParameter { name: &'static str, value: f64 },

    /// Message and carrier were sampled on different grids
    #[snafu(display("message has {message_len} samples but carrier has {carrier_len}"))]
    LengthMismatch { message_len: usize, carrier_len: usize },
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<(), SynthesisError> {
    if !value.is_finite() {
        return Err(SynthesisError::InvalidParameter { name, value });
    }
    Ok(())
}

fn ensure_positive(name: &'static str, value: f64) -> Result<(), SynthesisError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SynthesisError::InvalidParameter { name, value });
    }
    Ok(())
}

/// Frequencies and amplitudes for one modulation scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalParameters {
    sampling_frequency: f64,
    message_frequency: f64,
    carrier_frequency: f64,
    message_amplitude: f64,
    carrier_amplitude: f64,
}

impl SignalParameters {
    pub fn new(
        sampling_frequency: f64,
        message_frequency: f64,
        carrier_frequency: f64,
        message_amplitude: f64,
        carrier_amplitude: f64,
    ) -> Result<Self, SynthesisError> {
        ensure_positive("sampling frequency", sampling_frequency)?;
        ensure_positive("message frequency", message_frequency)?;
        ensure_positive("carrier frequency", carrier_frequency)?;
        ensure_finite("message amplitude", message_amplitude)?;
        ensure_finite("carrier amplitude", carrier_amplitude)?;

        Ok(Self {
            sampling_frequency,
            message_frequency,
            carrier_frequency,
            message_amplitude,
            carrier_amplitude,
        })
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    pub fn message_frequency(&self) -> f64 {
        self.message_frequency
    }

    pub fn carrier_frequency(&self) -> f64 {
        self.carrier_frequency
    }

    pub fn message_amplitude(&self) -> f64 {
        self.message_amplitude
    }

    pub fn carrier_amplitude(&self) -> f64 {
        self.carrier_amplitude
    }

    /// Copy with new message and carrier frequencies, validated
    pub fn with_frequencies(&self, message_frequency: f64, carrier_frequency: f64) -> Result<Self, SynthesisError> {
        Self::new(
            self.sampling_frequency,
            message_frequency,
            carrier_frequency,
            self.message_amplitude,
            self.carrier_amplitude,
        )
    }

    /// `Am·cos(2π·fm·t)`
    pub fn message(&self, time: &[f64]) -> Result<Waveform, SynthesisError> {
        cosine_wave(self.message_amplitude, self.message_frequency, time, 0.0)
    }

    /// `Ac·cos(2π·fc·t)`
    pub fn carrier(&self, time: &[f64]) -> Result<Waveform, SynthesisError> {
        cosine_wave(self.carrier_amplitude, self.carrier_frequency, time, 0.0)
    }
}

/// A modulated signal together with the grid and message it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct Modulated {
    pub time: TimeGrid,
    pub message: Waveform,
    pub signal: Waveform,
}

/// Sample an AM signal over `duration` seconds starting at t = 0
pub fn synthesize_am(params: &SignalParameters, duration: f64, modulation_index: f64) -> Result<Modulated, SynthesisError> {
    let time = generate_time_grid(0.0, params.sampling_frequency, duration)?;
    let message = params.message(&time)?;
    let carrier = params.carrier(&time)?;
    let signal = am_signal(params.carrier_amplitude, &message, &carrier, modulation_index)?;

    debug!(samples = time.len(), modulation_index, "synthesized AM signal");

    Ok(Modulated { time, message, signal })
}

/// Sample an FM signal over `duration` seconds starting at t = 0
pub fn synthesize_fm(params: &SignalParameters, duration: f64, modulation_index: f64) -> Result<Modulated, SynthesisError> {
    let time = generate_time_grid(0.0, params.sampling_frequency, duration)?;
    let message = params.message(&time)?;
    let signal = fm_signal(
        params.carrier_amplitude,
        params.carrier_frequency,
        params.message_frequency,
        modulation_index,
        &time,
    )?;

    debug!(samples = time.len(), modulation_index, "synthesized FM signal");

    Ok(Modulated { time, message, signal })
}
