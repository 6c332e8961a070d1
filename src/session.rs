//! Interactive session state
//!
//! Holds the current signal parameters, modulation indices and the zoom state
//! of each of the four plots, and turns UI events into calls to the pure
//! synthesis, spectrum and zoom functions. Plot data is kept in display units
//! (µs for time, MHz for frequency) and zoom operates in those units.

use std::fmt;
use std::str::FromStr;

use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::config::SimulationConfig;
use crate::constants::{
    AM_SPECTRUM_HALF_SPAN_MHZ, AM_TIME_VIEW, FM_SPECTRUM_HALF_SPAN_MHZ, FM_TIME_VIEW, HZ_PER_KHZ, HZ_PER_MHZ,
    US_PER_S,
};
use crate::modulation::{synthesize_am, synthesize_fm, Modulated, SignalParameters, SynthesisError};
use crate::spectrum::{SpectrumAnalyzer, SpectrumError, SpectrumResult};
use crate::viewport::{zoom, AxisRange, ViewportBounds, ZoomEvent};

#[derive(Debug, Snafu)]
pub enum SessionError {
    /// A text field did not hold a finite, positive number
    #[snafu(display("{field}: \"{value}\" is not a valid frequency"))]
    InvalidField { field: FrequencyField, value: String },

    #[snafu(display("modulation index must be finite, got {value}"))]
    InvalidIndex { value: f64 },

    #[snafu(display("signal synthesis failed: {source}"))]
    Synthesis { source: SynthesisError },

    #[snafu(display("spectrum analysis failed: {source}"))]
    Spectrum { source: SpectrumError },
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParsePlotIdError {
    #[snafu(display("unknown plot \"{value}\" (expected am-time, am-spectrum, fm-time or fm-spectrum)"))]
    UnknownPlot { value: String },
}

/// The four plots of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotId {
    AmTime,
    AmSpectrum,
    FmTime,
    FmSpectrum,
}

impl PlotId {
    pub const ALL: [PlotId; 4] = [PlotId::AmTime, PlotId::AmSpectrum, PlotId::FmTime, PlotId::FmSpectrum];

    fn index(self) -> usize {
        match self {
            PlotId::AmTime => 0,
            PlotId::AmSpectrum => 1,
            PlotId::FmTime => 2,
            PlotId::FmSpectrum => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlotId::AmTime => "am-time",
            PlotId::AmSpectrum => "am-spectrum",
            PlotId::FmTime => "fm-time",
            PlotId::FmSpectrum => "fm-spectrum",
        }
    }
}

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotId {
    type Err = ParsePlotIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PlotId::ALL
            .into_iter()
            .find(|plot| plot.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePlotIdError::UnknownPlot { value: s.to_string() })
    }
}

/// Editable frequency fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyField {
    AmMessage,
    FmMessage,
    Carrier,
}

impl fmt::Display for FrequencyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyField::AmMessage => write!(f, "AM message frequency (kHz)"),
            FrequencyField::FmMessage => write!(f, "FM message frequency (kHz)"),
            FrequencyField::Carrier => write!(f, "carrier frequency (MHz)"),
        }
    }
}

/// Raw text of the frequency fields, as typed
#[derive(Debug, Clone, Copy)]
pub struct FrequencyInput<'a> {
    pub am_message_khz: &'a str,
    pub fm_message_khz: &'a str,
    pub carrier_mhz: &'a str,
}

fn parse_field(field: FrequencyField, text: &str) -> Result<f64, SessionError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(SessionError::InvalidField {
            field,
            value: text.to_string(),
        }),
    }
}

/// Message and modulated signal against time in µs
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTrace {
    pub time_us: Vec<f64>,
    pub message: Vec<f64>,
    pub signal: Vec<f64>,
}

impl From<Modulated> for TimeTrace {
    fn from(modulated: Modulated) -> Self {
        Self {
            time_us: modulated.time.iter().map(|t| t * US_PER_S).collect(),
            message: modulated.message,
            signal: modulated.signal,
        }
    }
}

/// Spectrum magnitude against frequency in MHz
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTrace {
    pub frequency_mhz: Vec<f64>,
    pub magnitude: Vec<f64>,
}

impl SpectrumTrace {
    /// Strongest bin as `(MHz, magnitude)`
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequency_mhz
            .iter()
            .zip(self.magnitude.iter())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(&f, &m)| (f, m))
    }
}

impl From<SpectrumResult> for SpectrumTrace {
    fn from(spectrum: SpectrumResult) -> Self {
        Self {
            frequency_mhz: spectrum.frequencies.iter().map(|f| f / HZ_PER_MHZ).collect(),
            magnitude: spectrum.magnitudes,
        }
    }
}

/// Everything needed to draw one redraw of the four plots
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub am_index: f64,
    pub fm_index: f64,
    pub carrier_mhz: f64,
    pub am_time: TimeTrace,
    pub am_spectrum: SpectrumTrace,
    pub fm_time: TimeTrace,
    pub fm_spectrum: SpectrumTrace,
}

/// Parameters, indices and per-plot zoom state of one visualizer window
#[derive(Debug)]
pub struct Session {
    config: SimulationConfig,
    am: SignalParameters,
    fm: SignalParameters,
    am_index: f64,
    fm_index: f64,
    viewports: [Option<ViewportBounds>; 4],
    analyzer: SpectrumAnalyzer,
}

impl Session {
    pub fn new(config: SimulationConfig) -> Result<Self, SessionError> {
        let am = SignalParameters::new(
            config.am_sample_rate,
            config.am_message_frequency,
            config.carrier_frequency,
            config.message_amplitude,
            config.carrier_amplitude,
        )
        .context(SynthesisSnafu)?;
        let fm = SignalParameters::new(
            config.fm_sample_rate,
            config.fm_message_frequency,
            config.carrier_frequency,
            config.message_amplitude,
            config.carrier_amplitude,
        )
        .context(SynthesisSnafu)?;

        let mut session = Self {
            am_index: 0.0,
            fm_index: 0.0,
            am,
            fm,
            config,
            viewports: [None; 4],
            analyzer: SpectrumAnalyzer::new(),
        };
        session.set_am_index(session.config.am_index)?;
        session.set_fm_index(session.config.fm_index)?;

        Ok(session)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn am_parameters(&self) -> &SignalParameters {
        &self.am
    }

    pub fn fm_parameters(&self) -> &SignalParameters {
        &self.fm
    }

    pub fn am_index(&self) -> f64 {
        self.am_index
    }

    pub fn fm_index(&self) -> f64 {
        self.fm_index
    }

    /// Move the AM depth slider; the value is limited to the slider range
    pub fn set_am_index(&mut self, value: f64) -> Result<f64, SessionError> {
        self.am_index = clamp_index(value, self.config.am_index_range)?;
        debug!(am_index = self.am_index, "AM index changed");
        Ok(self.am_index)
    }

    /// Move the FM deviation slider; the value is limited to the slider range
    pub fn set_fm_index(&mut self, value: f64) -> Result<f64, SessionError> {
        self.fm_index = clamp_index(value, self.config.fm_index_range)?;
        debug!(fm_index = self.fm_index, "FM index changed");
        Ok(self.fm_index)
    }

    /// Apply the frequency fields; all three are validated before any is applied
    ///
    /// On error the previous parameters stay in effect.
    pub fn update_frequencies(&mut self, input: &FrequencyInput<'_>) -> Result<(), SessionError> {
        let result = self.parse_frequencies(input);
        match result {
            Ok((am, fm)) => {
                self.am = am;
                self.fm = fm;
                debug!(
                    am_message_hz = am.message_frequency(),
                    fm_message_hz = fm.message_frequency(),
                    carrier_hz = am.carrier_frequency(),
                    "frequencies updated"
                );
                Ok(())
            }
            Err(err) => {
                warn!(%err, "rejected frequency update");
                Err(err)
            }
        }
    }

    fn parse_frequencies(&self, input: &FrequencyInput<'_>) -> Result<(SignalParameters, SignalParameters), SessionError> {
        let am_message = parse_field(FrequencyField::AmMessage, input.am_message_khz)? * HZ_PER_KHZ;
        let fm_message = parse_field(FrequencyField::FmMessage, input.fm_message_khz)? * HZ_PER_KHZ;
        let carrier = parse_field(FrequencyField::Carrier, input.carrier_mhz)? * HZ_PER_MHZ;

        // One carrier field drives both schemes
        let am = self.am.with_frequencies(am_message, carrier).context(SynthesisSnafu)?;
        let fm = self.fm.with_frequencies(fm_message, carrier).context(SynthesisSnafu)?;
        Ok((am, fm))
    }

    /// Restore default indices and drop every plot's zoom
    pub fn reset(&mut self) {
        // Both defaults were validated by `new`
        self.am_index = clamp_index(self.config.am_index, self.config.am_index_range).unwrap_or(self.am_index);
        self.fm_index = clamp_index(self.config.fm_index, self.config.fm_index_range).unwrap_or(self.fm_index);
        self.viewports = [None; 4];
        debug!("session reset");
    }

    /// Synthesize both schemes and their spectra with the current state
    pub fn frame(&mut self) -> Result<Frame, SessionError> {
        let duration = self.config.duration;

        let am = synthesize_am(&self.am, duration, self.am_index).context(SynthesisSnafu)?;
        let am_spectrum = self
            .analyzer
            .analyze(&am.signal, self.am.sampling_frequency())
            .context(SpectrumSnafu)?;

        let fm = synthesize_fm(&self.fm, duration, self.fm_index).context(SynthesisSnafu)?;
        let fm_spectrum = self
            .analyzer
            .analyze(&fm.signal, self.fm.sampling_frequency())
            .context(SpectrumSnafu)?;

        debug!(
            am_samples = am.signal.len(),
            fm_samples = fm.signal.len(),
            "frame computed"
        );

        Ok(Frame {
            am_index: self.am_index,
            fm_index: self.fm_index,
            carrier_mhz: self.am.carrier_frequency() / HZ_PER_MHZ,
            am_time: am.into(),
            am_spectrum: am_spectrum.into(),
            fm_time: fm.into(),
            fm_spectrum: fm_spectrum.into(),
        })
    }

    /// Bounds a plot shows when it has not been zoomed
    pub fn default_viewport(plot: PlotId, frame: &Frame) -> ViewportBounds {
        let spectrum_view = |half_span: f64, magnitude: &[f64]| {
            let x = AxisRange::new(frame.carrier_mhz - half_span, frame.carrier_mhz + half_span);
            ViewportBounds::autoscale(x, magnitude).unwrap_or(ViewportBounds { x, y: AxisRange::new(0.0, 1.0) })
        };

        match plot {
            PlotId::AmTime => ViewportBounds::new(AM_TIME_VIEW.0, AM_TIME_VIEW.1),
            PlotId::FmTime => ViewportBounds::new(FM_TIME_VIEW.0, FM_TIME_VIEW.1),
            PlotId::AmSpectrum => spectrum_view(AM_SPECTRUM_HALF_SPAN_MHZ, &frame.am_spectrum.magnitude),
            PlotId::FmSpectrum => spectrum_view(FM_SPECTRUM_HALF_SPAN_MHZ, &frame.fm_spectrum.magnitude),
        }
    }

    /// Bounds currently shown by `plot`
    pub fn viewport(&self, plot: PlotId, frame: &Frame) -> ViewportBounds {
        self.viewports[plot.index()].unwrap_or_else(|| Self::default_viewport(plot, frame))
    }

    /// Bounds of all four plots, in `PlotId::ALL` order
    pub fn viewports(&self, frame: &Frame) -> [ViewportBounds; 4] {
        PlotId::ALL.map(|plot| self.viewport(plot, frame))
    }

    pub fn is_zoomed(&self, plot: PlotId) -> bool {
        self.viewports[plot.index()].is_some()
    }

    /// Handle one scroll tick over `plot`
    ///
    /// Ticks with the cursor outside the plot are ignored, as are ticks the
    /// zoom rejects. Returns the new bounds when the plot changed.
    pub fn scroll(&mut self, plot: PlotId, event: ZoomEvent, frame: &Frame) -> Option<ViewportBounds> {
        let current = self.viewport(plot, frame);
        if !current.contains(event.cursor) {
            debug!(%plot, cursor = ?event.cursor, "scroll outside plot ignored");
            return None;
        }

        match zoom(&current, event.cursor, event.direction, self.config.zoom_base_scale) {
            Ok(bounds) => {
                debug!(%plot, direction = ?event.direction, x = ?(bounds.x.min, bounds.x.max), y = ?(bounds.y.min, bounds.y.max), "zoomed");
                self.viewports[plot.index()] = Some(bounds);
                Some(bounds)
            }
            Err(err) => {
                warn!(%plot, %err, "zoom tick ignored");
                None
            }
        }
    }
}

fn clamp_index(value: f64, (lo, hi): (f64, f64)) -> Result<f64, SessionError> {
    if !value.is_finite() {
        return Err(SessionError::InvalidIndex { value });
    }
    Ok(value.max(lo).min(hi))
}
