//! Configuration parameters for onset detection

/// Onset detection configuration parameters
///
/// Defaults: analysis at 22050 Hz, 2048-point STFT with a 512-sample hop, 128 mel bands, and every
/// peak-picking window fixed at one frame.
#[derive(Debug, Clone)]
pub struct OnsetConfig {
    /// Rate the waveform is resampled to before analysis, in Hz (default: 22050)
    /// Onset times always fall on the `hop_length / sample_rate` grid of this rate
    pub sample_rate: u32,

    // STFT parameters
    /// Frame size for STFT (default: 2048)
    pub n_fft: usize,

    /// Hop size for STFT (default: 512)
    /// Also sets the frame-to-seconds mapping: `seconds = frame * hop_length / sample_rate`
    pub hop_length: usize,

    // Onset strength
    /// Number of mel bands (default: 128)
    pub n_mels: usize,

    /// Dynamic range kept below the loudest bin, in dB (default: 80.0)
    pub top_db: f32,

    /// Frame lag for the spectral difference (default: 1)
    pub lag: usize,

    // Peak picking
    /// Threshold offset above the moving average (default: 0.07)
    pub delta: f32,

    /// Minimum frames between consecutive onsets, exclusive (default: 1)
    pub wait: usize,

    /// Frames before `n` in the moving-average window (default: 1)
    pub pre_avg: usize,

    /// Frames after `n` in the moving-average window, `n` included (default: 1)
    pub post_avg: usize,

    /// Frames before `n` in the moving-max window (default: 1)
    pub pre_max: usize,

    /// Frames after `n` in the moving-max window, `n` included (default: 1)
    pub post_max: usize,
}

impl Default for OnsetConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            n_fft: 2048,
            hop_length: 512,
            n_mels: 128,
            top_db: 80.0,
            lag: 1,
            delta: 0.07,
            wait: 1,
            pre_avg: 1,
            post_avg: 1,
            pre_max: 1,
            post_max: 1,
        }
    }
}

