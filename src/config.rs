//! Simulation configuration

use crate::constants::*;

/// Configuration for a modulation session
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// AM sampling frequency (Hz)
    pub am_sample_rate: f64,
    /// FM sampling frequency (Hz)
    pub fm_sample_rate: f64,
    /// AM message frequency (Hz)
    pub am_message_frequency: f64,
    /// FM message frequency (Hz)
    pub fm_message_frequency: f64,
    /// Carrier frequency shared by AM and FM (Hz)
    pub carrier_frequency: f64,
    pub message_amplitude: f64,
    pub carrier_amplitude: f64,
    /// Length of each synthesized capture (seconds)
    pub duration: f64,
    /// AM index applied on start and on reset
    pub am_index: f64,
    /// FM index applied on start and on reset
    pub fm_index: f64,
    /// Allowed AM index range (slider limits)
    pub am_index_range: (f64, f64),
    /// Allowed FM index range (slider limits)
    pub fm_index_range: (f64, f64),
    /// Scroll zoom step
    pub zoom_base_scale: f64,
    /// PNG export size in pixels
    pub export_size: (u32, u32),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            am_sample_rate: AM_SAMPLE_RATE,
            fm_sample_rate: FM_SAMPLE_RATE,
            am_message_frequency: AM_MESSAGE_FREQUENCY,
            fm_message_frequency: FM_MESSAGE_FREQUENCY,
            carrier_frequency: CARRIER_FREQUENCY,
            message_amplitude: MESSAGE_AMPLITUDE,
            carrier_amplitude: CARRIER_AMPLITUDE,
            duration: DURATION,
            am_index: AM_INDEX,
            fm_index: FM_INDEX,
            am_index_range: AM_INDEX_RANGE,
            fm_index_range: FM_INDEX_RANGE,
            zoom_base_scale: ZOOM_BASE_SCALE,
            export_size: EXPORT_SIZE,
        }
    }
}
