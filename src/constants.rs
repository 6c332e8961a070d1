//! Default simulation parameters
//!
//! Frequencies are in Hz, durations in seconds, unless the name says otherwise.

pub const AM_SAMPLE_RATE: f64 = 200_000_000.0;
pub const FM_SAMPLE_RATE: f64 = 200_000_000.0;

pub const AM_MESSAGE_FREQUENCY: f64 = 500_000.0;
pub const FM_MESSAGE_FREQUENCY: f64 = 200_000.0;
pub const CARRIER_FREQUENCY: f64 = 20_000_000.0;

pub const MESSAGE_AMPLITUDE: f64 = 1.0;
pub const CARRIER_AMPLITUDE: f64 = 1.0;

/// Length of the simulated capture (100 µs)
pub const DURATION: f64 = 0.0001;

/// Longest time grid that will be allocated (512 MiB of `f64`)
pub const MAX_SAMPLES: usize = 1 << 26;

pub const AM_INDEX: f64 = 0.7;
pub const FM_INDEX: f64 = 5.0;

/// Slider ranges for the modulation indices
pub const AM_INDEX_RANGE: (f64, f64) = (0.0, 1.5);
pub const FM_INDEX_RANGE: (f64, f64) = (0.0, 15.0);

/// Scroll zoom step
pub const ZOOM_BASE_SCALE: f64 = 1.1;

/// 12 x 8 inches at 300 dpi
pub const EXPORT_SIZE: (u32, u32) = (3600, 2400);

pub const HZ_PER_KHZ: f64 = 1e3;
pub const HZ_PER_MHZ: f64 = 1e6;
pub const US_PER_S: f64 = 1e6;

/// Default time-plot windows, (x µs, y amplitude)
pub const AM_TIME_VIEW: ((f64, f64), (f64, f64)) = ((0.0, 5.0), (-3.0, 3.0));
pub const FM_TIME_VIEW: ((f64, f64), (f64, f64)) = ((0.0, 7.0), (-1.5, 1.5));

/// Half-width of the default spectrum windows around the carrier, in MHz
pub const AM_SPECTRUM_HALF_SPAN_MHZ: f64 = 2.0;
pub const FM_SPECTRUM_HALF_SPAN_MHZ: f64 = 5.0;
