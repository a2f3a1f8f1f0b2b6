//! Show media information.

use std::path::PathBuf;

use roundscope_frame_source::source::FrameSource;
use roundscope_frame_source::VideoFrameSource;
use roundscope_match_model::geometry::{DEFAULT_P1_BAR, DEFAULT_P2_BAR};

pub fn run(video: PathBuf) -> anyhow::Result<()> {
    let source = VideoFrameSource::open(&video, 2000)
        .map_err(|e| anyhow::anyhow!("Failed to open video: {e}"))?;

    let (width, height) = source.dimensions();
    let duration_secs = source.duration_ms() as f64 / 1000.0;

    println!("Media: {}", video.display());
    println!("  Resolution: {width}x{height}");
    println!("  Duration: {duration_secs:.2}s ({} ms)", source.duration_ms());
    println!();

    println!("Gauge regions at this resolution:");
    for (label, bar) in [("P1", DEFAULT_P1_BAR), ("P2", DEFAULT_P2_BAR)] {
        let scaled = bar.scaled_to(width, height);
        println!("  {label}: {scaled} ({}x{} px)", scaled.width(), scaled.height());
    }

    Ok(())
}
