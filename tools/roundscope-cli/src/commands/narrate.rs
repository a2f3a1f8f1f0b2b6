//! Build commentary generation requests from an events CSV.

use std::path::PathBuf;

use roundscope_match_model::event::parse_events_csv;
use roundscope_match_model::narrate::{CommentaryMode, MatchContext};

pub fn run(
    input: PathBuf,
    mode: String,
    p1_character: String,
    p2_character: String,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mode: CommentaryMode = mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let text = std::fs::read_to_string(&input)
        .map_err(|_| anyhow::anyhow!("Events file not found: {}", input.display()))?;
    let events = parse_events_csv(&text);
    if events.is_empty() {
        println!("No events in {}; nothing to narrate.", input.display());
        return Ok(());
    }

    let context = MatchContext {
        p1_character,
        p2_character,
    };
    let request = mode.build_request(&events, &context);
    let json = serde_json::to_string_pretty(&request)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!(
                "Built {} request for {} events: {}",
                request.mode.as_str(),
                events.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
