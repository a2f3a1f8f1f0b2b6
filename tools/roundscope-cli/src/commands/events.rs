//! Extract the event timeline from a readings CSV.

use std::path::PathBuf;

use roundscope_analysis_core::extract::{EventExtractor, ExtractorConfig};
use roundscope_analysis_core::smooth::{ReadingSmoother, SmootherConfig};
use roundscope_match_model::event::{serialize_events_csv, TimelineDocument};
use roundscope_match_model::reading::parse_readings;
use roundscope_match_model::GameEvent;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    json: Option<PathBuf>,
    smooth_window: usize,
    min_damage: i32,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&input)
        .map_err(|_| anyhow::anyhow!("Readings file not found: {}", input.display()))?;

    let readings = parse_readings(&text);
    println!("Loaded {} readings from {}", readings.len(), input.display());

    let smoother = ReadingSmoother::new(SmootherConfig {
        window: smooth_window,
    });
    let extractor = EventExtractor::new(ExtractorConfig {
        damage_threshold: min_damage,
        ..Default::default()
    });

    let events = extractor.extract(&smoother.smooth(&readings));
    if events.is_empty() {
        println!("No signal: the timeline is empty.");
    }

    write_timeline(&events, &output, json.as_deref())?;
    print_summary(&events);

    Ok(())
}

pub(crate) fn write_timeline(
    events: &[GameEvent],
    output: &std::path::Path,
    json: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    std::fs::write(output, serialize_events_csv(events))?;
    println!("Events written to: {}", output.display());

    if let Some(json_path) = json {
        let document = TimelineDocument::new(events.to_vec());
        std::fs::write(json_path, document.to_json()?)?;
        println!("Player JSON written to: {}", json_path.display());
    }

    Ok(())
}

pub(crate) fn print_summary(events: &[GameEvent]) {
    println!("\nTimeline ({} events):", events.len());
    for event in events {
        println!(
            "  [{}s] {} (P1 {}% / P2 {}%)",
            event.time, event.description, event.my_health, event.enemy_health
        );
    }
}
