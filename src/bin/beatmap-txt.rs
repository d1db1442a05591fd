//! Write `<stem>.beatmap.txt`: one detected onset time in seconds per line
//!
//! Usage:
//!   beatmap-txt <audio-file>

use std::process::ExitCode;

use onset_beatmap::OutputFormat;

fn main() -> ExitCode {
    onset_beatmap::cli::main_with(OutputFormat::PlainText)
}
