//! Peak picking on onset strength envelopes
//!
//! A frame `n` is kept when all of the following hold:
//! 1. `x[n] == max(x[n - pre_max .. n + post_max])`
//! 2. `x[n] >= mean(x[n - pre_avg .. n + post_avg]) + delta`
//! 3. `x[n] > 0`
//! 4. `n` is more than `wait` frames after the previously kept peak
//!
//! Windows are half-open and clipped at the signal edges.
//!
//! # Reference
//!
//! Böck, S., Krebs, F., & Schedl, M. (2012). Evaluating the Online Capabilities of Onset
//! Detection Methods. *Proceedings of the 13th International Society for Music Information
//! Retrieval Conference (ISMIR)*.

use crate::error::BeatmapError;

/// Peak picking windows and threshold, all window sizes in frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakPickParams {
    /// Frames before `n` in the max window
    pub pre_max: usize,
    /// Frames after `n` in the max window, `n` included (must be >= 1)
    pub post_max: usize,
    /// Frames before `n` in the average window
    pub pre_avg: usize,
    /// Frames after `n` in the average window, `n` included (must be >= 1)
    pub post_avg: usize,
    /// Threshold offset above the local mean (must be >= 0)
    pub delta: f32,
    /// Minimum spacing, exclusive, between kept peaks
    pub wait: usize,
}

impl PeakPickParams {
    fn validate(&self) -> Result<(), BeatmapError> {
        if self.post_max == 0 {
            return Err(BeatmapError::InvalidInput("post_max must be >= 1".to_string()));
        }
        if self.post_avg == 0 {
            return Err(BeatmapError::InvalidInput("post_avg must be >= 1".to_string()));
        }
        if !(self.delta >= 0.0) {
            return Err(BeatmapError::InvalidInput(format!(
                "delta must be non-negative, got {}",
                self.delta
            )));
        }
        Ok(())
    }
}

/// Pick peaks from an onset strength envelope
///
/// # Arguments
///
/// * `signal` - Onset strength envelope, one value per frame
/// * `params` - Window sizes, threshold and minimum spacing
///
/// # Returns
///
/// Frame indices of detected peaks, in increasing order
///
/// # Errors
///
/// Returns `BeatmapError::InvalidInput` if `post_max` or `post_avg` is zero or
/// `delta` is negative
///
/// # Example
///
/// ```
/// use onset_beatmap::features::onset::peak_picking::{peak_pick, PeakPickParams};
///
/// let signal = vec![0.0, 0.05, 1.0, 0.1, 0.0, 0.9, 0.0];
/// let params = PeakPickParams { pre_max: 1, post_max: 1, pre_avg: 1, post_avg: 1, delta: 0.07, wait: 1 };
/// assert_eq!(peak_pick(&signal, &params)?, vec![2, 5]);
/// # Ok::<(), onset_beatmap::BeatmapError>(())
/// ```
pub fn peak_pick(signal: &[f32], params: &PeakPickParams) -> Result<Vec<usize>, BeatmapError> {
    params.validate()?;

    let len = signal.len();
    let mut peaks = Vec::new();
    let mut last_peak: Option<usize> = None;

    for n in 0..len {
        let value = signal[n];
        if value <= 0.0 {
            continue;
        }

        let max_window = &signal[n.saturating_sub(params.pre_max)..(n + params.post_max).min(len)];
        let local_max = max_window.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if value < local_max {
            continue;
        }

        let avg_window = &signal[n.saturating_sub(params.pre_avg)..(n + params.post_avg).min(len)];
        let local_mean = avg_window.iter().sum::<f32>() / avg_window.len() as f32;
        if value < local_mean + params.delta {
            continue;
        }

        if let Some(last) = last_peak {
            if n <= last + params.wait {
                continue;
            }
        }

        peaks.push(n);
        last_peak = Some(n);
    }

    log::debug!(
        "Peak picking: {} peaks in {} frames (delta={:.3}, wait={})",
        peaks.len(),
        len,
        params.delta,
        params.wait
    );

    Ok(peaks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_params() -> PeakPickParams {
        PeakPickParams {
            pre_max: 1,
            post_max: 1,
            pre_avg: 1,
            post_avg: 1,
            delta: 0.07,
            wait: 1,
        }
    }

    #[test]
    fn test_peak_pick_basic() {
        let signal = vec![0.0, 0.05, 1.0, 0.1, 0.0, 0.9, 0.0];
        assert_eq!(peak_pick(&signal, &unit_params()).unwrap(), vec![2, 5]);
    }

    #[test]
    fn test_peak_pick_rising_edge_with_unit_windows() {
        // With pre_max = post_max = 1 the max window is [n - 1, n], so every
        // step up by more than 2 * delta qualifies, subject to `wait`
        let signal = vec![0.0, 0.3, 0.6, 0.9];
        assert_eq!(peak_pick(&signal, &unit_params()).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_peak_pick_wait_enforced() {
        let signal = vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let params = PeakPickParams {
            wait: 2,
            ..unit_params()
        };
        assert_eq!(peak_pick(&signal, &params).unwrap(), vec![1, 5]);

        let params = PeakPickParams {
            wait: 0,
            ..unit_params()
        };
        assert_eq!(peak_pick(&signal, &params).unwrap(), vec![1, 3, 5]);
    }

    #[test]
    fn test_peak_pick_delta_threshold() {
        // Step of 0.1 gives mean 0.95, so 1.0 fails a 0.07 delta
        let signal = vec![0.9, 1.0];
        assert!(peak_pick(&signal, &unit_params()).unwrap().is_empty());

        let params = PeakPickParams {
            delta: 0.0,
            wait: 0,
            ..unit_params()
        };
        assert_eq!(peak_pick(&signal, &params).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_peak_pick_zero_never_peaks() {
        let params = PeakPickParams {
            delta: 0.0,
            ..unit_params()
        };
        assert!(peak_pick(&[0.0; 16], &params).unwrap().is_empty());
        assert!(peak_pick(&[], &params).unwrap().is_empty());
    }

    #[test]
    fn test_peak_pick_wider_windows() {
        let signal = vec![0.0, 0.5, 0.6, 0.5, 0.0, 0.0, 0.0, 1.0, 0.0];
        let params = PeakPickParams {
            pre_max: 3,
            post_max: 4,
            pre_avg: 3,
            post_avg: 4,
            delta: 0.1,
            wait: 1,
        };
        assert_eq!(peak_pick(&signal, &params).unwrap(), vec![2, 7]);
    }

    #[test]
    fn test_peak_pick_invalid_params() {
        let signal = vec![0.0, 1.0, 0.0];
        for params in [
            PeakPickParams { post_max: 0, ..unit_params() },
            PeakPickParams { post_avg: 0, ..unit_params() },
            PeakPickParams { delta: -0.1, ..unit_params() },
            PeakPickParams { delta: f32::NAN, ..unit_params() },
        ] {
            assert!(peak_pick(&signal, &params).is_err());
        }
    }
}
