//! Short-time Fourier transform
//!
//! Centered STFT with a periodic Hann window. Frames are centered on
//! `t * hop_length` by zero-padding `n_fft / 2` samples on both sides, so the
//! frame count is `1 + samples.len() / hop_length`.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::BeatmapError;

/// Periodic Hann window of length `n`
pub fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let t = 2.0 * std::f32::consts::PI * i as f32 / n as f32;
            0.5 - 0.5 * t.cos()
        })
        .collect()
}

/// Compute a power spectrogram
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `n_fft` - FFT size (frame length)
/// * `hop_length` - Samples between frame centers
///
/// # Returns
///
/// Power spectrogram (`n_frames × (n_fft / 2 + 1)`), each inner `Vec` one frame
///
/// # Errors
///
/// Returns `BeatmapError::InvalidInput` if `n_fft` or `hop_length` is zero
pub fn power_spectrogram(
    samples: &[f32],
    n_fft: usize,
    hop_length: usize,
) -> Result<Vec<Vec<f32>>, BeatmapError> {
    if n_fft == 0 {
        return Err(BeatmapError::InvalidInput("FFT size must be > 0".to_string()));
    }
    if hop_length == 0 {
        return Err(BeatmapError::InvalidInput("Hop length must be > 0".to_string()));
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let pad = n_fft / 2;
    let mut padded = vec![0.0f32; samples.len() + 2 * pad];
    padded[pad..pad + samples.len()].copy_from_slice(samples);

    let n_frames = 1 + (padded.len() - n_fft) / hop_length;
    let n_bins = n_fft / 2 + 1;
    let window = hann_window(n_fft);

    log::debug!(
        "STFT: {} samples, n_fft={}, hop={}, {} frames x {} bins",
        samples.len(),
        n_fft,
        hop_length,
        n_frames,
        n_bins
    );

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n_fft);
    let mut scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
    let mut buffer = vec![Complex::new(0.0f32, 0.0); n_fft];

    let mut spectrogram: Vec<Vec<f32>> = Vec::with_capacity(n_frames);
    for frame in 0..n_frames {
        let start = frame * hop_length;
        for ((slot, &x), &w) in buffer
            .iter_mut()
            .zip(&padded[start..start + n_fft])
            .zip(&window)
        {
            *slot = Complex::new(x * w, 0.0);
        }

        fft.process_with_scratch(&mut buffer, &mut scratch);

        spectrogram.push(buffer[..n_bins].iter().map(|c| c.norm_sqr()).collect());
    }

    Ok(spectrogram)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window_shape() {
        let w = hann_window(8);
        assert_eq!(w.len(), 8);
        assert!(w[0].abs() < 1e-7);
        assert!((w[4] - 1.0).abs() < 1e-6);
        assert!((w[2] - w[6]).abs() < 1e-6);
    }

    #[test]
    fn test_frame_count_centered() {
        let samples = vec![0.0f32; 22050];
        let spec = power_spectrogram(&samples, 2048, 512).unwrap();
        assert_eq!(spec.len(), 1 + 22050 / 512);
        assert!(spec.iter().all(|frame| frame.len() == 1025));
    }

    #[test]
    fn test_sine_peaks_at_expected_bin() {
        let sr = 8000.0f32;
        let n_fft = 256;
        // 1000 Hz lands exactly on bin 32 at 8 kHz / 256
        let samples: Vec<f32> = (0..4096)
            .map(|i| (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / sr).sin())
            .collect();
        let spec = power_spectrogram(&samples, n_fft, 64).unwrap();
        let mid = &spec[spec.len() / 2];
        let peak_bin = mid
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak_bin, 32);
    }

    #[test]
    fn test_empty_and_invalid() {
        assert!(power_spectrogram(&[], 2048, 512).unwrap().is_empty());
        assert!(power_spectrogram(&[0.0; 10], 0, 512).is_err());
        assert!(power_spectrogram(&[0.0; 10], 2048, 0).is_err());
    }
}
