pub mod analyze;
pub mod check;
pub mod events;
pub mod info;
pub mod narrate;
pub mod sample;

use roundscope_common::config::AppConfig;
use roundscope_common::timecode::{secs_to_ms, TimestampMs};
use roundscope_frame_source::{FrameSampler, FrameSource, SamplerConfig, VideoFrameSource};
use roundscope_match_model::geometry::{DEFAULT_P1_BAR, DEFAULT_P2_BAR};
use roundscope_match_model::{BarRect, HealthReading};

/// Resolve optional start/end seconds into the sampler's window form.
///
/// A lone start runs to the end of the media (the sampler clamps); a lone
/// end starts from zero.
pub(crate) fn resolve_window(
    start: Option<f64>,
    end: Option<f64>,
) -> Option<(TimestampMs, TimestampMs)> {
    match (start, end) {
        (None, None) => None,
        (start, end) => Some((
            secs_to_ms(start.unwrap_or(0.0)),
            end.map(secs_to_ms).unwrap_or(TimestampMs::MAX),
        )),
    }
}

pub(crate) fn parse_bar(arg: Option<String>, default: BarRect) -> anyhow::Result<BarRect> {
    match arg {
        Some(s) => Ok(s.parse()?),
        None => Ok(default),
    }
}

/// Open the video and run the sampler with a console progress line.
///
/// Flags override the saved configuration; unset flags fall back to it.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn sample_video(
    video: std::path::PathBuf,
    interval: Option<u64>,
    seek_timeout: Option<u64>,
    start: Option<f64>,
    end: Option<f64>,
    p1_bar: Option<String>,
    p2_bar: Option<String>,
) -> anyhow::Result<Vec<HealthReading>> {
    let defaults = AppConfig::load();
    let seek_timeout = seek_timeout.unwrap_or(defaults.sampling.seek_timeout_ms);
    let config = SamplerConfig {
        interval_ms: interval.unwrap_or(defaults.sampling.interval_ms),
        seek_timeout_ms: seek_timeout,
        window: resolve_window(start, end),
        p1_bar: parse_bar(p1_bar, DEFAULT_P1_BAR)?,
        p2_bar: parse_bar(p2_bar, DEFAULT_P2_BAR)?,
        ..Default::default()
    };

    let mut source = VideoFrameSource::open(&video, seek_timeout)
        .map_err(|e| anyhow::anyhow!("Failed to open video: {e}"))?;

    let (width, height) = source.dimensions();
    println!("Analyzing: {}", video.display());
    println!("  Resolution: {width}x{height}");
    println!("  Duration: {:.1}s", source.duration_ms() as f64 / 1000.0);

    let mut sampler = FrameSampler::new(config);
    let progress: roundscope_frame_source::sampler::ProgressFn = Box::new(|percent| {
        print!("\r  Sampling: {percent}%  ");
        use std::io::Write;
        let _ = std::io::stdout().flush();
    });

    let readings = sampler
        .run(&mut source, Some(progress))
        .await
        .map_err(|e| anyhow::anyhow!("Sampling failed: {e}"))?;
    println!();

    let stats = sampler.stats();
    println!(
        "  Sampled {} readings ({} intro frames discarded, {} seeks skipped)",
        stats.sampled, stats.discarded, stats.skipped
    );

    Ok(readings)
}
