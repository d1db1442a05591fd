//! Key alphabet for keyed beatmaps

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Keyboard key a player presses on an onset
///
/// Home-row layout: left hand on `A S D`, right hand on `J K L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeySymbol {
    /// `A`
    A,
    /// `S`
    S,
    /// `D`
    D,
    /// `J`
    J,
    /// `K`
    K,
    /// `L`
    L,
}

impl KeySymbol {
    /// Every key, in alphabet order
    pub const ALL: [KeySymbol; 6] = [
        KeySymbol::A,
        KeySymbol::S,
        KeySymbol::D,
        KeySymbol::J,
        KeySymbol::K,
        KeySymbol::L,
    ];

    /// Single-letter name used in serialized beatmaps
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySymbol::A => "A",
            KeySymbol::S => "S",
            KeySymbol::D => "D",
            KeySymbol::J => "J",
            KeySymbol::K => "K",
            KeySymbol::L => "L",
        }
    }

    /// Pick a key uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for KeySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
