//! Audio decoding using Symphonia

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::BeatmapError;
use crate::preprocessing::channel_mixer::downmix_interleaved;

/// Decode audio file to mono PCM samples
///
/// Every channel is averaged into a single mono stream. The stream is kept at
/// its native sample rate; detectors resample to their own analysis rate.
///
/// # Arguments
///
/// * `path` - Path to audio file (any container/codec enabled in Symphonia)
///
/// # Returns
///
/// Tuple of (mono samples, sample_rate)
///
/// # Errors
///
/// Returns `BeatmapError::DecodingError` if the file cannot be opened, holds no
/// decodable audio track, or the stream fails mid-way.
pub fn decode_audio(path: &Path) -> Result<(Vec<f32>, u32), BeatmapError> {
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path).map_err(|e| {
        BeatmapError::DecodingError(format!("cannot open {}: {}", path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| BeatmapError::DecodingError("no supported audio track found".to_string()))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping undecodable packet: {}", msg);
                skipped_packets += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        if sample_rate.is_none() {
            sample_rate = Some(spec.rate);
        }
        let channels = spec.channels.count();

        let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend(downmix_interleaved(buf.samples(), channels)?);
    }

    let sample_rate = match sample_rate {
        Some(rate) if rate > 0 => rate,
        _ => {
            return Err(BeatmapError::DecodingError(
                "stream does not declare a sample rate".to_string(),
            ))
        }
    };

    log::debug!(
        "Decoded {} mono samples at {} Hz ({:.2} s, {} packets skipped)",
        samples.len(),
        sample_rate,
        samples.len() as f64 / sample_rate as f64,
        skipped_packets
    );

    Ok((samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_decoding_error() {
        let result = decode_audio(Path::new("/nonexistent/dir/missing.wav"));
        match result {
            Err(BeatmapError::DecodingError(msg)) => assert!(msg.contains("missing.wav")),
            other => panic!("expected DecodingError, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_file_is_decoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.wav");
        std::fs::write(&path, b"definitely not a RIFF header").unwrap();

        let result = decode_audio(&path);
        assert!(matches!(result, Err(BeatmapError::DecodingError(_))));
    }
}
