//! Feature extraction modules
//!
//! - Onset detection (spectral flux + peak picking)

pub mod onset;
