//! AM and FM modulation visualizer
//!
//! Signal synthesis, spectrum analysis and cursor-anchored zoom for an
//! interactive modulation demo, with a session type that holds the UI state
//! and a PNG exporter for the four plots.

pub mod config;
pub mod constants;
pub mod modulation;
pub mod render;
pub mod session;
pub mod spectrum;
pub mod tracing_init;
pub mod viewport;

pub use config::SimulationConfig;
pub use modulation::{am_signal, cosine_wave, fm_signal, generate_time_grid, SignalParameters, TimeGrid, Waveform};
pub use session::{Frame, FrequencyInput, PlotId, Session, SessionError};
pub use spectrum::{analyze, SpectrumAnalyzer, SpectrumResult};
pub use viewport::{zoom, ViewportBounds, ZoomDirection, ZoomEvent};
