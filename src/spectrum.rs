//! One-sided magnitude spectrum
//!
//! The full-length FFT of a real signal is symmetric, so only the first
//! `floor(N/2)` bins are kept. Magnitudes are raw `|X[k]|`: no window is
//! applied and nothing is divided by `N`.

use rustfft::{num_complex::Complex, FftPlanner};
use snafu::Snafu;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum SpectrumError {
    /// Nothing to transform
    #[snafu(display("cannot analyze an empty signal"))]
    InvalidInput,

    #[snafu(display("sampling frequency must be finite and positive, got {value}"))]
    InvalidSamplingFrequency { value: f64 },
}

/// Non-negative frequency bins (Hz) and their magnitudes
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumResult {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
    bin_width: f64,
}

impl SpectrumResult {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency resolution `fs / N`
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Bin with the largest magnitude, as `(frequency, magnitude)`
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(self.magnitudes.iter())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(&f, &m)| (f, m))
    }
}

/// Spectrum analysis with FFT plans cached across calls
///
/// Redrawing with the same sample count reuses the plan built on the first
/// call.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
}

impl std::fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectrumAnalyzer").finish_non_exhaustive()
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    pub fn analyze(&mut self, signal: &[f64], sampling_frequency: f64) -> Result<SpectrumResult, SpectrumError> {
        if signal.is_empty() {
            return Err(SpectrumError::InvalidInput);
        }
        if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
            return Err(SpectrumError::InvalidSamplingFrequency { value: sampling_frequency });
        }

        let n = signal.len();
        let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let half = n / 2;
        let bin_width = sampling_frequency / n as f64;
        let frequencies = (0..half).map(|k| k as f64 * sampling_frequency / n as f64).collect();
        let magnitudes = buffer[..half].iter().map(|c| c.norm()).collect();

        trace!(n, bin_width, "computed spectrum");

        Ok(SpectrumResult {
            frequencies,
            magnitudes,
            bin_width,
        })
    }
}

/// Analyze once without keeping the FFT plan around
pub fn analyze(signal: &[f64], sampling_frequency: f64) -> Result<SpectrumResult, SpectrumError> {
    SpectrumAnalyzer::new().analyze(signal, sampling_frequency)
}
