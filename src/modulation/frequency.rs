use std::f64::consts::PI;

use super::{ensure_finite, SynthesisError, Waveform};

/// Frequency modulation by a sinusoidal message:
/// `Ac · cos(2π·fc·t + β·sin(2π·fm·t))`
///
/// β is the peak phase deviation in radians. It is not bounded; large values
/// simply spread the spectrum over more sidebands.
pub fn fm_signal(
    carrier_amplitude: f64,
    carrier_frequency: f64,
    message_frequency: f64,
    modulation_index: f64,
    time: &[f64],
) -> Result<Waveform, SynthesisError> {
    ensure_finite("carrier amplitude", carrier_amplitude)?;
    ensure_finite("carrier frequency", carrier_frequency)?;
    ensure_finite("message frequency", message_frequency)?;
    ensure_finite("modulation index", modulation_index)?;

    let carrier_omega = 2.0 * PI * carrier_frequency;
    let message_omega = 2.0 * PI * message_frequency;

    let waveform = time
        .iter()
        .map(|&t| carrier_amplitude * (carrier_omega * t + modulation_index * (message_omega * t).sin()).cos())
        .collect();

    Ok(waveform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulation::generate_time_grid;

    #[test]
    fn test_zero_index_is_plain_carrier() {
        let time = generate_time_grid(0.0, 1e6, 1e-3).unwrap();
        let fm = fm_signal(1.5, 1e5, 1e3, 0.0, &time).unwrap();

        for (&t, &s) in time.iter().zip(fm.iter()) {
            assert_eq!(s, 1.5 * (2.0 * PI * 1e5 * t).cos());
        }
    }

    #[test]
    fn test_instantaneous_phase() {
        // At a quarter message period sin(2π·fm·t) = 1, so the phase is advanced by β
        let fm = fm_signal(1.0, 0.0, 1.0, 0.75, &[0.25]).unwrap();
        assert!((fm[0] - 0.75f64.cos()).abs() < 1e-12);
    }

    #[test]
    fn test_large_index_accepted() {
        let time = generate_time_grid(0.0, 1e6, 1e-4).unwrap();
        let fm = fm_signal(1.0, 1e5, 1e3, 1e4, &time).unwrap();
        assert_eq!(fm.len(), time.len());
        assert!(fm.iter().all(|s| s.is_finite() && s.abs() <= 1.0 + 1e-12));
    }

    #[test]
    fn test_non_finite_index_rejected() {
        assert!(matches!(
            fm_signal(1.0, 1e5, 1e3, f64::NAN, &[0.0]),
            Err(SynthesisError::InvalidParameter { name: "modulation index", .. })
        ));
    }
}
