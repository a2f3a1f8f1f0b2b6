//! Commentary-request construction.
//!
//! The generation service itself is an external collaborator; this module
//! only builds the request payloads. Modes form a closed registry: each
//! variant is a pure constructor from (events, match context) to a
//! [`GenerationRequest`], dispatched once by [`CommentaryMode::build_request`]
//! rather than scattered per-mode branches.

use serde::{Deserialize, Serialize};

use crate::event::{EventType, GameEvent};

/// Speaking pace used to budget each line against the gap to the next
/// event, so generated commentary fits between moments of play.
const WORDS_PER_SECOND: f64 = 3.0;
const MIN_LINE_WORDS: usize = 2;
const MAX_LINE_WORDS: usize = 20;

/// Assumed tail room after the final event.
const FINAL_EVENT_GAP_SECS: f64 = 5.0;

/// Named commentary behavior variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentaryMode {
    /// Energetic call of each exchange as it lands.
    PlayByPlay,
    /// Calmer analysis of momentum and positioning.
    Color,
    /// Terse captions for overlays and accessibility tracks.
    Minimal,
}

impl CommentaryMode {
    pub const ALL: [CommentaryMode; 3] = [
        CommentaryMode::PlayByPlay,
        CommentaryMode::Color,
        CommentaryMode::Minimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentaryMode::PlayByPlay => "play_by_play",
            CommentaryMode::Color => "color",
            CommentaryMode::Minimal => "minimal",
        }
    }

    /// Build the generation request for this mode.
    ///
    /// Single dispatch point for the registry; every variant maps to one of
    /// the pure constructors below.
    pub fn build_request(&self, events: &[GameEvent], context: &MatchContext) -> GenerationRequest {
        let instructions = match self {
            CommentaryMode::PlayByPlay => play_by_play_instructions(context),
            CommentaryMode::Color => color_instructions(context),
            CommentaryMode::Minimal => minimal_instructions(),
        };

        GenerationRequest {
            mode: *self,
            instructions,
            timeline: timeline_lines(events, context),
        }
    }
}

impl std::str::FromStr for CommentaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play_by_play" | "play-by-play" => Ok(CommentaryMode::PlayByPlay),
            "color" => Ok(CommentaryMode::Color),
            "minimal" => Ok(CommentaryMode::Minimal),
            other => Err(format!(
                "unknown commentary mode: {other} (use play_by_play, color, or minimal)"
            )),
        }
    }
}

/// Match facts the prompts refer to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchContext {
    pub p1_character: String,
    pub p2_character: String,
}

impl Default for MatchContext {
    fn default() -> Self {
        Self {
            p1_character: "Player 1".to_string(),
            p2_character: "Player 2".to_string(),
        }
    }
}

/// A fully constructed request, ready for submission by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub mode: CommentaryMode,

    /// System-level instructions for the generation service.
    pub instructions: String,

    /// One line per event: time, what the gauges prove happened, and the
    /// word budget before the next event.
    pub timeline: Vec<String>,
}

fn play_by_play_instructions(context: &MatchContext) -> String {
    format!(
        "You are a live fighting-game commentator calling a match between \
         {p1} (player 1) and {p2} (player 2). For each timeline line, write \
         one energetic spoken call. The health facts in each line were \
         measured from the gauges and are not negotiable; never invent hits \
         that are not listed. Stay within each line's word budget so the \
         call fits before the next event.",
        p1 = context.p1_character,
        p2 = context.p2_character,
    )
}

fn color_instructions(context: &MatchContext) -> String {
    format!(
        "You are a color commentator analyzing a match between {p1} and \
         {p2}. For each timeline line, write one measured observation about \
         momentum, health lead, or risk. Use only the measured facts given; \
         respect each line's word budget.",
        p1 = context.p1_character,
        p2 = context.p2_character,
    )
}

fn minimal_instructions() -> String {
    "Write one terse caption per timeline line, suitable for an overlay. \
     State only the measured fact. Respect each line's word budget."
        .to_string()
}

fn timeline_lines(events: &[GameEvent], context: &MatchContext) -> Vec<String> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let gap_secs = events
                .get(i + 1)
                .map(|next| (next.timestamp_ms.saturating_sub(event.timestamp_ms)) as f64 / 1000.0)
                .unwrap_or(FINAL_EVENT_GAP_SECS);
            event_line(event, context, gap_secs)
        })
        .collect()
}

fn event_line(event: &GameEvent, context: &MatchContext, gap_secs: f64) -> String {
    let word_budget = ((gap_secs * WORDS_PER_SECOND) as usize)
        .clamp(MIN_LINE_WORDS, MAX_LINE_WORDS);

    let fact = match event.event_type {
        EventType::Neutral => event.description.clone(),
        EventType::DamageTaken => format!("{}: {}", context.p1_character, event.description),
        EventType::DamageGiven => format!("{}: {}", context.p2_character, event.description),
        EventType::Victory => format!("{} is knocked out", context.p2_character),
        EventType::Defeat => format!("{} is knocked out", context.p1_character),
    };

    format!(
        "[{}s] {} (P1 {}% / P2 {}%) - at most {} words",
        event.time, fact, event.my_health, event.enemy_health, word_budget
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events() -> Vec<GameEvent> {
        vec![
            GameEvent::new(0, EventType::Neutral, 100, 100, "Round Start"),
            GameEvent::new(4_000, EventType::DamageGiven, 100, 94, "Dealt 6% damage"),
            GameEvent::new(4_500, EventType::Victory, 100, 0, "Won the round by KO"),
        ]
    }

    #[test]
    fn test_every_mode_builds_a_request() {
        let context = MatchContext::default();
        let events = sample_events();
        for mode in CommentaryMode::ALL {
            let request = mode.build_request(&events, &context);
            assert_eq!(request.mode, mode);
            assert_eq!(request.timeline.len(), events.len());
            assert!(!request.instructions.is_empty());
        }
    }

    #[test]
    fn test_line_budget_follows_gap() {
        let context = MatchContext::default();
        let events = sample_events();
        let request = CommentaryMode::PlayByPlay.build_request(&events, &context);
        // 4s gap at 3 words/sec.
        assert!(request.timeline[0].ends_with("at most 12 words"));
        // 0.5s gap clamps to the minimum.
        assert!(request.timeline[1].ends_with("at most 2 words"));
        // Final event uses the assumed tail room.
        assert!(request.timeline[2].ends_with("at most 15 words"));
    }

    #[test]
    fn test_characters_appear_in_instructions() {
        let context = MatchContext {
            p1_character: "Ryu".to_string(),
            p2_character: "Chun-Li".to_string(),
        };
        let request = CommentaryMode::Color.build_request(&sample_events(), &context);
        assert!(request.instructions.contains("Ryu"));
        assert!(request.instructions.contains("Chun-Li"));
        // KO line names the knocked-out player.
        assert!(request.timeline[2].contains("Chun-Li is knocked out"));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(
            "play-by-play".parse::<CommentaryMode>().unwrap(),
            CommentaryMode::PlayByPlay
        );
        assert!("loud".parse::<CommentaryMode>().is_err());
    }
}
