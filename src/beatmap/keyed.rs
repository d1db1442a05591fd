//! Keyed JSON beatmaps
//!
//! Each onset becomes a single-entry object mapping a random key to the onset
//! time in whole milliseconds:
//!
//! ```text
//! {
//!     "file": "clip.mp3",
//!     "pressed_keys": [
//!         {
//!             "K": 100
//!         },
//!         ...
//!     ]
//! }
//! ```

use rand::Rng;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::keys::KeySymbol;
use crate::error::BeatmapError;

/// One key press at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressedKey {
    /// Key to press
    pub key: KeySymbol,
    /// Press time in milliseconds from the start of the audio
    pub time_ms: i64,
}

impl Serialize for PressedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key.as_str(), &self.time_ms)?;
        map.end()
    }
}

/// Beatmap pairing random keys with onset times
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedBeatmap {
    /// Audio path the beatmap was generated from, as given
    pub file: String,
    /// Key presses, in onset order
    pub pressed_keys: Vec<PressedKey>,
}

impl KeyedBeatmap {
    /// Serialize as pretty-printed JSON with 4-space indentation
    pub fn to_json_pretty(&self) -> Result<String, BeatmapError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| BeatmapError::ProcessingError(format!("JSON serialization failed: {}", e)))?;

        String::from_utf8(out)
            .map_err(|e| BeatmapError::ProcessingError(format!("JSON output is not UTF-8: {}", e)))
    }
}

/// Convert seconds to whole milliseconds
///
/// Rounds half to even: `0.0005 s -> 0 ms`, `0.0015 s -> 2 ms`.
pub fn seconds_to_millis(seconds: f64) -> i64 {
    (seconds * 1000.0).round_ties_even() as i64
}

/// Build a keyed beatmap from onset times
///
/// Each onset gets a key drawn uniformly and independently from `rng`.
///
/// # Arguments
///
/// * `onsets` - Onset times in seconds, in order
/// * `source_path` - Audio path recorded in the `file` field
/// * `rng` - Random source for key selection
pub fn encode_keyed_timestamps<R: Rng + ?Sized>(
    onsets: &[f64],
    source_path: &str,
    rng: &mut R,
) -> KeyedBeatmap {
    let pressed_keys = onsets
        .iter()
        .map(|&t| PressedKey {
            key: KeySymbol::random(rng),
            time_ms: seconds_to_millis(t),
        })
        .collect();

    KeyedBeatmap {
        file: source_path.to_string(),
        pressed_keys,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_millis_rounding_half_to_even() {
        assert_eq!(seconds_to_millis(0.0005), 0);
        assert_eq!(seconds_to_millis(0.0015), 2);
        assert_eq!(seconds_to_millis(0.0025), 2);
        assert_eq!(seconds_to_millis(1.2344), 1234);
        assert_eq!(seconds_to_millis(1.2346), 1235);
        assert_eq!(seconds_to_millis(0.0), 0);
        assert_eq!(seconds_to_millis(1.25), 1250);
    }

    #[test]
    fn test_encode_preserves_count_and_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let onsets = vec![0.1, 0.1, 0.5, 1.25, 3.0];
        let beatmap = encode_keyed_timestamps(&onsets, "clip.mp3", &mut rng);

        assert_eq!(beatmap.file, "clip.mp3");
        let times: Vec<i64> = beatmap.pressed_keys.iter().map(|p| p.time_ms).collect();
        assert_eq!(times, vec![100, 100, 500, 1250, 3000]);
    }

    #[test]
    fn test_encode_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let beatmap = encode_keyed_timestamps(&[], "silence.wav", &mut rng);
        assert!(beatmap.pressed_keys.is_empty());

        let json = beatmap.to_json_pretty().unwrap();
        assert_eq!(
            json,
            "{\n    \"file\": \"silence.wav\",\n    \"pressed_keys\": []\n}"
        );
    }

    #[test]
    fn test_encode_is_deterministic_with_seed() {
        let onsets: Vec<f64> = (0..50).map(|i| i as f64 * 0.25).collect();
        let a = encode_keyed_timestamps(&onsets, "a.wav", &mut StdRng::seed_from_u64(9));
        let b = encode_keyed_timestamps(&onsets, "a.wav", &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pretty_json_layout() {
        let beatmap = KeyedBeatmap {
            file: "clip.mp3".to_string(),
            pressed_keys: vec![
                PressedKey { key: KeySymbol::A, time_ms: 100 },
                PressedKey { key: KeySymbol::L, time_ms: 500 },
            ],
        };
        let expected = "{\n    \"file\": \"clip.mp3\",\n    \"pressed_keys\": [\n        {\n            \"A\": 100\n        },\n        {\n            \"L\": 500\n        }\n    ]\n}";
        assert_eq!(beatmap.to_json_pretty().unwrap(), expected);
    }

    #[test]
    fn test_pressed_key_is_single_entry_object() {
        let value = serde_json::to_value(PressedKey { key: KeySymbol::S, time_ms: 1250 }).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["S"], 1250);
    }
}
