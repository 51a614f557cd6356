mod bootstrap;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use reel_core::settings::Settings;
use reel_core::time_utils::DayKeyer;
use reel_data::analysis::analyze_chat;
use reel_data::loader::load_chat_export;
use reel_scene::scenes::Composition;
use reel_scene::svg;

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Chatreel v{} starting", env!("CARGO_PKG_VERSION"));

    let keyer = DayKeyer::new(&settings.timezone)?;
    let dataset = load_chat_export(&settings.input)?;
    tracing::info!(
        "Loaded {} messages, {} participants from {}",
        dataset.message_count(),
        dataset.participants.len(),
        settings.input.display(),
    );

    let analysis = analyze_chat(&dataset, &keyer)?;
    tracing::info!(
        "Derived {} daily points and {} ranked senders in {:.3}s",
        analysis.metadata.days_covered,
        analysis.digit_ranking.len(),
        analysis.metadata.derive_time_seconds,
    );

    if settings.dump_analysis {
        let json = serde_json::to_string_pretty(&analysis)?;
        return write_output(settings.output.as_deref(), &json);
    }

    let composition = Composition::new(&analysis, settings.width, settings.height, settings.fps)?;

    match settings.frame {
        Some(frame) => {
            let scene_frame = composition.frame_at(frame).with_context(|| {
                format!(
                    "frame {frame} is past the end of the {}-frame timeline",
                    composition.timeline.duration_in_frames
                )
            })?;
            let markup = svg::render(&scene_frame, composition.width, composition.height);
            write_output(settings.output.as_deref(), &markup)
        }
        None => {
            let out_dir = settings
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("frames"));
            render_all_frames(&composition, &out_dir)
        }
    }
}

/// Write `content` to `path`, or to stdout when no path was given.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

/// Render every frame of the composition as `frame_NNNN.svg` under `dir`.
fn render_all_frames(composition: &Composition, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let total = composition.timeline.duration_in_frames;
    for frame in 0..total {
        // Every frame below the duration resolves; the sequence covers the
        // whole timeline.
        let Some(scene_frame) = composition.frame_at(frame) else {
            continue;
        };
        let markup = svg::render(&scene_frame, composition.width, composition.height);
        let path = dir.join(format!("frame_{frame:04}.svg"));
        std::fs::write(&path, markup).with_context(|| format!("writing {}", path.display()))?;
    }

    tracing::info!("Wrote {} frames to {}", total, dir.display());
    Ok(())
}
