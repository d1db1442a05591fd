//! Sample-rate conversion using rubato
//!
//! Onset analysis runs on a fixed frame grid, so every input is brought to the
//! analysis rate first. The sinc resampler's group delay is trimmed off and the
//! output is sized to `ceil(len * to / from)` samples, keeping sample `i` of the
//! input aligned with sample `i * to / from` of the output.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::BeatmapError;

const CHUNK_SIZE: usize = 1024;

/// Resample a mono signal from `from_rate` to `to_rate`
///
/// Returns the input unchanged when the rates already match.
///
/// # Errors
///
/// Returns `BeatmapError::InvalidInput` for a zero rate, or
/// `BeatmapError::ProcessingError` if rubato rejects the conversion
pub fn resample_mono(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, BeatmapError> {
    if from_rate == 0 || to_rate == 0 {
        return Err(BeatmapError::InvalidInput(format!(
            "Sample rates must be > 0, got {} -> {}",
            from_rate, to_rate
        )));
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let expected_len = (samples.len() as f64 * ratio).ceil() as usize;

    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        2.0,
        SincInterpolationParameters {
            sinc_len: 128,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        CHUNK_SIZE,
        1,
    )
    .map_err(|e| BeatmapError::ProcessingError(format!("Failed to create resampler: {}", e)))?;

    let delay = resampler.output_delay();
    let mut output: Vec<f32> = Vec::with_capacity(expected_len + delay + CHUNK_SIZE);

    let mut pos = 0;
    while samples.len() - pos >= resampler.input_frames_next() {
        let end = pos + resampler.input_frames_next();
        let chunk = resampler
            .process(&[&samples[pos..end]], None)
            .map_err(|e| BeatmapError::ProcessingError(format!("Resampling failed: {}", e)))?;
        output.extend_from_slice(&chunk[0]);
        pos = end;
    }

    if pos < samples.len() {
        let chunk = resampler
            .process_partial(Some(&[&samples[pos..]][..]), None)
            .map_err(|e| BeatmapError::ProcessingError(format!("Resampling failed: {}", e)))?;
        output.extend_from_slice(&chunk[0]);
    }

    // Flush the filter tail until the delayed signal is complete
    while output.len() < expected_len + delay {
        let chunk = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| BeatmapError::ProcessingError(format!("Resampling failed: {}", e)))?;
        if chunk[0].is_empty() {
            break;
        }
        output.extend_from_slice(&chunk[0]);
    }

    output.drain(..delay.min(output.len()));
    output.resize(expected_len, 0.0);

    log::debug!(
        "Resampled {} samples at {} Hz to {} samples at {} Hz",
        samples.len(),
        from_rate,
        output.len(),
        to_rate
    );

    Ok(output)
}
