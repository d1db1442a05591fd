//! Output path derivation and file writing

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BeatmapError;

/// Derive the output path for an input audio file
///
/// Strips the final extension of the file name and appends `suffix`. A file
/// name without an extension gets `suffix` appended as-is. Directory
/// components are left untouched.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use onset_beatmap::beatmap::writer::derive_output_path;
///
/// assert_eq!(derive_output_path(Path::new("song.wav"), ".json"), PathBuf::from("song.json"));
/// assert_eq!(derive_output_path(Path::new("archive.tar.gz"), ".json"), PathBuf::from("archive.tar.json"));
/// assert_eq!(derive_output_path(Path::new("noext"), ".beatmap.txt"), PathBuf::from("noext.beatmap.txt"));
/// ```
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = match input.file_stem() {
        Some(stem) if input.extension().is_some() => stem.to_os_string(),
        _ => match input.file_name() {
            Some(file_name) => file_name.to_os_string(),
            None => input.as_os_str().to_os_string(),
        },
    };
    name.push(suffix);

    match input.file_name() {
        Some(_) => input.with_file_name(name),
        None => PathBuf::from(name),
    }
}

/// Write `contents` to `path` in one shot, creating or truncating the file
///
/// # Errors
///
/// Returns `BeatmapError::WriteError` if the path is not writable
pub fn write_output(path: &Path, contents: &str) -> Result<(), BeatmapError> {
    fs::write(path, contents).map_err(|e| BeatmapError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
