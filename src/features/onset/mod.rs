//! Onset detection modules
//!
//! - STFT power spectrogram
//! - Mel filterbank and dB scaling
//! - Spectral flux onset strength
//! - Peak picking
//!
//! The rest of the crate only sees the [`OnsetDetector`] trait, so any source
//! of onset times (including fixed lists in tests) can drive the encoders.

pub mod mel;
pub mod peak_picking;
pub mod spectral_flux;
pub mod stft;

use crate::config::OnsetConfig;
use crate::error::BeatmapError;
use crate::preprocessing::resample::resample_mono;

use peak_picking::{peak_pick, PeakPickParams};
use spectral_flux::{normalize_envelope, onset_strength};

/// Source of onset times for a decoded waveform
pub trait OnsetDetector {
    /// Detect onsets in mono `samples` recorded at `sample_rate`
    ///
    /// Returns onset times in seconds, non-decreasing.
    fn detect(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f64>, BeatmapError>;
}

/// Convert frame indices to seconds
///
/// `seconds = frame * hop_length / sample_rate`
pub fn frames_to_time(frames: &[usize], hop_length: usize, sample_rate: u32) -> Vec<f64> {
    let seconds_per_frame = hop_length as f64 / sample_rate as f64;
    frames
        .iter()
        .map(|&frame| frame as f64 * seconds_per_frame)
        .collect()
}

/// Spectral flux onset detector with moving-window peak picking
#[derive(Debug, Clone, Default)]
pub struct SpectralFluxDetector {
    config: OnsetConfig,
}

impl SpectralFluxDetector {
    /// Create a detector with the given configuration
    pub fn new(config: OnsetConfig) -> Self {
        Self { config }
    }

    /// Detector configuration
    pub fn config(&self) -> &OnsetConfig {
        &self.config
    }

    /// Detect onset frame indices
    ///
    /// `samples` are resampled from `sample_rate` to the configured analysis
    /// rate, and the returned frames index that rate's hop grid.
    pub fn detect_frames(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<usize>, BeatmapError> {
        let analysis_rate = self.config.sample_rate;
        let samples = resample_mono(samples, sample_rate, analysis_rate)?;
        let mut envelope = onset_strength(&samples, analysis_rate, &self.config)?;

        if !normalize_envelope(&mut envelope) {
            log::debug!("Onset envelope is flat, no onsets detected");
            return Ok(Vec::new());
        }

        let params = PeakPickParams {
            pre_max: self.config.pre_max,
            post_max: self.config.post_max,
            pre_avg: self.config.pre_avg,
            post_avg: self.config.post_avg,
            delta: self.config.delta,
            wait: self.config.wait,
        };
        peak_pick(&envelope, &params)
    }
}

impl OnsetDetector for SpectralFluxDetector {
    fn detect(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f64>, BeatmapError> {
        let frames = self.detect_frames(samples, sample_rate)?;
        let times = frames_to_time(&frames, self.config.hop_length, self.config.sample_rate);

        log::debug!(
            "Detected {} onsets in {:.2} s of audio",
            times.len(),
            samples.len() as f64 / sample_rate as f64
        );

        Ok(times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generate a click track: short decaying 2 kHz bursts at the given times
    fn generate_clicks(sample_rate: u32, seconds: f32, click_times: &[f32]) -> Vec<f32> {
        let mut samples = vec![0.0f32; (seconds * sample_rate as f32) as usize];
        let burst = (0.03 * sample_rate as f32) as usize;
        for &t in click_times {
            let start = (t * sample_rate as f32) as usize;
            let end = (start + burst).min(samples.len());
            for (i, sample) in samples[start..end].iter_mut().enumerate() {
                let decay = (-(i as f32) / (burst as f32 / 6.0)).exp();
                let phase = 2.0 * std::f32::consts::PI * 2000.0 * i as f32 / sample_rate as f32;
                *sample = 0.9 * decay * phase.sin();
            }
        }
        samples
    }

    #[test]
    fn test_frames_to_time() {
        let times = frames_to_time(&[0, 43, 86], 512, 22050);
        assert_eq!(times[0], 0.0);
        assert!((times[1] - 43.0 * 512.0 / 22050.0).abs() < 1e-12);
        assert!((times[2] - 1.9969161).abs() < 1e-6);
    }

    #[test]
    fn test_detects_each_click() {
        let sr = 22050;
        let clicks = [0.5f32, 1.0, 1.5, 2.0, 2.5];
        let samples = generate_clicks(sr, 3.0, &clicks);

        let detector = SpectralFluxDetector::default();
        let onsets = detector.detect(&samples, sr).unwrap();

        for &click in &clicks {
            assert!(
                onsets.iter().any(|&t| (t - click as f64).abs() < 0.08),
                "click at {:.2}s not found in {:?}",
                click,
                onsets
            );
        }
        assert!(onsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_onsets_independent_of_input_rate() {
        let clicks = [0.5f32, 1.0, 1.5, 2.0];
        let detector = SpectralFluxDetector::default();

        let at_22k = detector.detect(&generate_clicks(22050, 2.5, &clicks), 22050).unwrap();
        let at_44k = detector.detect(&generate_clicks(44100, 2.5, &clicks), 44100).unwrap();

        assert!(!at_22k.is_empty());
        assert_eq!(at_22k, at_44k);

        // Every onset sits on the 512 / 22050 s frame grid
        for &t in &at_44k {
            let frame = t * 22050.0 / 512.0;
            assert!((frame - frame.round()).abs() < 1e-9, "{} s is off the frame grid", t);
        }
    }

    #[test]
    fn test_silence_has_no_onsets() {
        let detector = SpectralFluxDetector::default();
        let onsets = detector.detect(&vec![0.0f32; 44100], 44100).unwrap();
        assert!(onsets.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_onsets() {
        let detector = SpectralFluxDetector::default();
        assert!(detector.detect(&[], 44100).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let detector = SpectralFluxDetector::new(OnsetConfig {
            post_max: 0,
            ..OnsetConfig::default()
        });
        let samples = generate_clicks(22050, 1.0, &[0.5]);
        assert!(matches!(
            detector.detect(&samples, 22050),
            Err(BeatmapError::InvalidInput(_))
        ));
    }
}
