use super::{ensure_finite, SynthesisError, Waveform};

/// Amplitude modulation: `Ac · (1 + μ·message[i]) · carrier[i]`
///
/// The index is taken as given. Depths above `1 / max|message|` drive the
/// envelope through zero and invert the carrier (overmodulation); that is
/// returned as-is rather than rejected.
pub fn am_signal(
    carrier_amplitude: f64,
    message: &[f64],
    carrier: &[f64],
    modulation_index: f64,
) -> Result<Waveform, SynthesisError> {
    if message.len() != carrier.len() {
        return Err(SynthesisError::LengthMismatch {
            message_len: message.len(),
            carrier_len: carrier.len(),
        });
    }
    ensure_finite("carrier amplitude", carrier_amplitude)?;
    ensure_finite("modulation index", modulation_index)?;

    let waveform = message
        .iter()
        .zip(carrier.iter())
        .map(|(&m, &c)| carrier_amplitude * (1.0 + modulation_index * m) * c)
        .collect();

    Ok(waveform)
}
