//! Session behavior: parameter edits, sliders, zoom state and reset

use modsim::session::FrequencyField;
use modsim::{FrequencyInput, PlotId, Session, SessionError, SimulationConfig, ZoomDirection, ZoomEvent};

use test_utils::{assert_close, init_test_tracing, small_config};

fn input<'a>(am: &'a str, fm: &'a str, carrier: &'a str) -> FrequencyInput<'a> {
    FrequencyInput {
        am_message_khz: am,
        fm_message_khz: fm,
        carrier_mhz: carrier,
    }
}

#[test]
fn test_defaults_match_configuration() {
    let session = Session::new(SimulationConfig::default()).unwrap();

    assert_eq!(session.am_index(), 0.7);
    assert_eq!(session.fm_index(), 5.0);
    assert_eq!(session.am_parameters().sampling_frequency(), 200e6);
    assert_eq!(session.am_parameters().message_frequency(), 500e3);
    assert_eq!(session.fm_parameters().message_frequency(), 200e3);
    assert_eq!(session.am_parameters().carrier_frequency(), 20e6);
    assert_eq!(session.fm_parameters().carrier_frequency(), 20e6);
}

#[test]
fn test_default_frame_sizes_and_viewports() {
    init_test_tracing();

    let mut session = Session::new(SimulationConfig::default()).unwrap();
    let frame = session.frame().unwrap();

    // 100 µs at 200 MHz
    assert_eq!(frame.am_time.signal.len(), 20_000);
    assert_eq!(frame.fm_time.signal.len(), 20_000);
    assert_eq!(frame.am_spectrum.magnitude.len(), 10_000);
    assert_eq!(frame.fm_spectrum.magnitude.len(), 10_000);

    let am_time = session.viewport(PlotId::AmTime, &frame);
    assert_eq!((am_time.x.min, am_time.x.max), (0.0, 5.0));
    assert_eq!((am_time.y.min, am_time.y.max), (-3.0, 3.0));

    let fm_time = session.viewport(PlotId::FmTime, &frame);
    assert_eq!((fm_time.x.min, fm_time.x.max), (0.0, 7.0));
    assert_eq!((fm_time.y.min, fm_time.y.max), (-1.5, 1.5));

    let am_spectrum = session.viewport(PlotId::AmSpectrum, &frame);
    assert_close(am_spectrum.x.min, 18.0, 1e-9);
    assert_close(am_spectrum.x.max, 22.0, 1e-9);
    assert!(am_spectrum.y.max > frame.am_spectrum.peak().unwrap().1);

    let fm_spectrum = session.viewport(PlotId::FmSpectrum, &frame);
    assert_close(fm_spectrum.x.min, 15.0, 1e-9);
    assert_close(fm_spectrum.x.max, 25.0, 1e-9);
}

#[test]
fn test_default_am_spectrum_peaks_at_carrier() {
    let mut session = Session::new(SimulationConfig::default()).unwrap();
    let frame = session.frame().unwrap();

    let (peak_mhz, _) = frame.am_spectrum.peak().unwrap();
    assert_close(peak_mhz, 20.0, 0.01);
}

#[test]
fn test_frequency_update_applies_carrier_to_both() {
    let mut session = Session::new(small_config()).unwrap();
    session.update_frequencies(&input("10", "4", "0.2")).unwrap();

    assert_eq!(session.am_parameters().message_frequency(), 10_000.0);
    assert_eq!(session.fm_parameters().message_frequency(), 4_000.0);
    assert_close(session.am_parameters().carrier_frequency(), 200_000.0, 1e-6);
    assert_close(session.fm_parameters().carrier_frequency(), 200_000.0, 1e-6);

    let frame = session.frame().unwrap();
    assert_close(frame.carrier_mhz, 0.2, 1e-12);
}

#[test]
fn test_invalid_field_keeps_last_good_parameters() {
    let mut session = Session::new(small_config()).unwrap();
    let before_am = *session.am_parameters();
    let before_fm = *session.fm_parameters();

    // First two fields are fine, the carrier is not
    let err = session.update_frequencies(&input("10", "4", "twenty")).unwrap_err();
    match err {
        SessionError::InvalidField { field, value } => {
            assert_eq!(field, FrequencyField::Carrier);
            assert_eq!(value, "twenty");
        }
        other => panic!("unexpected error: {}", other),
    }

    assert_eq!(*session.am_parameters(), before_am);
    assert_eq!(*session.fm_parameters(), before_fm);

    assert!(session.update_frequencies(&input("-5", "4", "0.2")).is_err());
    assert!(session.update_frequencies(&input("10", "0", "0.2")).is_err());
    assert_eq!(*session.am_parameters(), before_am);
}

#[test]
fn test_scroll_zoom_is_stored_per_plot() {
    let mut session = Session::new(small_config()).unwrap();
    let frame = session.frame().unwrap();

    let event = ZoomEvent {
        cursor: (2.5, 0.0),
        direction: ZoomDirection::In,
    };
    let zoomed = session.scroll(PlotId::AmTime, event, &frame).unwrap();

    assert_close(zoomed.x.span(), 5.0 / 1.1, 1e-12);
    assert_close(zoomed.y.span(), 6.0 / 1.1, 1e-12);
    assert!(session.is_zoomed(PlotId::AmTime));
    assert!(!session.is_zoomed(PlotId::FmTime));
    assert_eq!(session.viewport(PlotId::AmTime, &frame), zoomed);

    // Next tick continues from the stored bounds
    let again = session.scroll(PlotId::AmTime, event, &frame).unwrap();
    assert_close(again.x.span(), 5.0 / 1.1 / 1.1, 1e-12);
}

#[test]
fn test_zoom_survives_recompute() {
    let mut session = Session::new(small_config()).unwrap();
    let frame = session.frame().unwrap();

    let event = ZoomEvent {
        cursor: (0.1, 100.0),
        direction: ZoomDirection::In,
    };
    let zoomed = session.scroll(PlotId::AmSpectrum, event, &frame).unwrap();

    session.set_am_index(1.2).unwrap();
    let frame = session.frame().unwrap();
    assert_eq!(session.viewport(PlotId::AmSpectrum, &frame), zoomed);
    assert_eq!(frame.am_index, 1.2);
}

#[test]
fn test_reset_restores_indices_and_viewports() {
    let mut session = Session::new(small_config()).unwrap();
    let frame = session.frame().unwrap();

    session.set_am_index(1.4).unwrap();
    session.set_fm_index(12.0).unwrap();
    for plot in PlotId::ALL {
        let bounds = session.viewport(plot, &frame);
        let center = ((bounds.x.min + bounds.x.max) / 2.0, (bounds.y.min + bounds.y.max) / 2.0);
        let event = ZoomEvent {
            cursor: center,
            direction: ZoomDirection::Out,
        };
        assert!(session.scroll(plot, event, &frame).is_some());
    }

    session.reset();

    assert_eq!(session.am_index(), 0.7);
    assert_eq!(session.fm_index(), 5.0);
    let frame = session.frame().unwrap();
    for plot in PlotId::ALL {
        assert!(!session.is_zoomed(plot));
        assert_eq!(session.viewport(plot, &frame), Session::default_viewport(plot, &frame));
    }
}

#[test]
fn test_overmodulation_allowed_within_slider() {
    let mut session = Session::new(small_config()).unwrap();
    session.set_am_index(1.5).unwrap();
    let frame = session.frame().unwrap();

    // Envelope 1 + 1.5·m dips below zero where the message is negative
    let min_envelope = frame
        .am_time
        .message
        .iter()
        .map(|m| 1.0 + 1.5 * m)
        .fold(f64::INFINITY, f64::min);
    assert!(min_envelope < 0.0);
    assert!(frame.am_time.signal.iter().all(|s| s.is_finite()));
}
