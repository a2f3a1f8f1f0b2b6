//! Full pipeline: video to event timeline.

use std::path::PathBuf;

use roundscope_analysis_core::extract::EventExtractor;
use roundscope_analysis_core::smooth::{ReadingSmoother, SmootherConfig};

use super::events::{print_summary, write_timeline};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    video: PathBuf,
    output: PathBuf,
    json: Option<PathBuf>,
    interval: Option<u64>,
    seek_timeout: Option<u64>,
    start: Option<f64>,
    end: Option<f64>,
    p1_bar: Option<String>,
    p2_bar: Option<String>,
    smooth_window: usize,
) -> anyhow::Result<()> {
    let readings = super::sample_video(
        video,
        interval,
        seek_timeout,
        start,
        end,
        p1_bar,
        p2_bar,
    )
    .await?;

    let smoother = ReadingSmoother::new(SmootherConfig {
        window: smooth_window,
    });
    let events = EventExtractor::default().extract(&smoother.smooth(&readings));
    if events.is_empty() {
        println!("No signal: the timeline is empty.");
    }

    write_timeline(&events, &output, json.as_deref())?;
    print_summary(&events);

    Ok(())
}
