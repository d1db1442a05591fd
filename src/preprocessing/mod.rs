//! Audio preprocessing modules
//!
//! - Channel mixing (multi-channel to mono)
//! - Resampling to the analysis rate

pub mod channel_mixer;
pub mod resample;
