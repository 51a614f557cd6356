use clap::Parser;
use std::path::PathBuf;

use crate::time_utils::DayKeyer;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Render chart scenes from a Messenger chat export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chatreel",
    about = "Render chart scenes from a Messenger chat export",
    version
)]
pub struct Settings {
    /// Export file, or directory containing `message_*.json` parts
    pub input: PathBuf,

    /// Composition width in pixels
    #[arg(long, default_value = "1280", value_parser = clap::value_parser!(u32).range(320..=7680))]
    pub width: u32,

    /// Composition height in pixels
    #[arg(long, default_value = "720", value_parser = clap::value_parser!(u32).range(240..=4320))]
    pub height: u32,

    /// Frames per second of the composition timeline
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: u32,

    /// Frame to render as SVG (omit together with --dump-analysis to render all frames)
    #[arg(long)]
    pub frame: Option<u32>,

    /// Print the derived analysis as JSON instead of rendering
    #[arg(long)]
    pub dump_analysis: bool,

    /// Output file (single frame / analysis) or directory (all frames).
    /// Defaults to stdout for single outputs and `./frames` otherwise
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Timezone used for calendar-day grouping (auto-detected if not specified)
    #[arg(long, default_value = "auto", value_parser = parse_timezone)]
    pub timezone: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

/// Reject unknown timezone names at argument-parse time.
fn parse_timezone(value: &str) -> std::result::Result<String, String> {
    if DayKeyer::validate_timezone(value) {
        Ok(value.to_string())
    } else {
        Err(format!("'{value}' is not a recognised IANA timezone"))
    }
}
