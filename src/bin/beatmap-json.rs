//! Write `<stem>.json`: a random home-row key for every detected onset, times in ms
//!
//! Usage:
//!   beatmap-json <audio-file>

use std::process::ExitCode;

use onset_beatmap::OutputFormat;

fn main() -> ExitCode {
    onset_beatmap::cli::main_with(OutputFormat::KeyedJson)
}
