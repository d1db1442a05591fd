//! Command-line entry point shared by the `beatmap-json` and `beatmap-txt` binaries

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::beatmap::OutputFormat;
use crate::config::OnsetConfig;
use crate::error::BeatmapError;
use crate::features::onset::SpectralFluxDetector;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(version, about = "Detect onsets in an audio file and write a beatmap next to it")]
pub struct Args {
    /// Path to the input audio file
    pub input: PathBuf,
}

/// Parse arguments, mapping parse failures to `BeatmapError::InvalidArgument`
///
/// `--help` and `--version` print and exit here.
pub fn parse_args<I, T>(args: I) -> Result<Args, BeatmapError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(args).map_err(|e| {
        if !e.use_stderr() {
            e.exit();
        }
        BeatmapError::InvalidArgument(e.to_string().trim_end().to_string())
    })
}

/// Run one binary end to end for the given output format
pub fn run(format: OutputFormat) -> Result<PathBuf, BeatmapError> {
    let args: Vec<String> = std::env::args().collect();
    log::info!("Argument list: {:?}", args);

    let args = parse_args(args)?;
    let detector = SpectralFluxDetector::new(OnsetConfig::default());
    let output = crate::generate_beatmap(&args.input, format, &detector, &mut rand::thread_rng())?;

    log::info!("Wrote {}", output.display());
    Ok(output)
}

/// `main` body for the binaries: logging setup, run, report, exit status
pub fn main_with(format: OutputFormat) -> ExitCode {
    env_logger::init();

    match run(format) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{} failed: {}", err.stage(), err);
            eprintln!("error: {} failed: {}", err.stage(), err);
            ExitCode::FAILURE
        }
    }
}
