//! Sample raw gauge readings from a video into a CSV.

use std::path::PathBuf;

use roundscope_match_model::reading::serialize_readings;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    video: PathBuf,
    output: PathBuf,
    interval: Option<u64>,
    seek_timeout: Option<u64>,
    start: Option<f64>,
    end: Option<f64>,
    p1_bar: Option<String>,
    p2_bar: Option<String>,
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

    std::fs::write(&output, serialize_readings(&readings))?;
    println!("Readings written to: {}", output.display());

    Ok(())
}
