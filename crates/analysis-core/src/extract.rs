//! Event extraction from the smoothed reading stream.
//!
//! A stateful reducer walks the readings once, comparing each against the
//! per-player reference values and emitting discrete events. Events come out
//! ordered by reading, and within one reading in the fixed order
//! damage_taken, damage_given, defeat, victory.

use serde::{Deserialize, Serialize};

use roundscope_match_model::{EventType, GameEvent, HealthReading};

/// Thresholds for the extraction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Readings closer than this to the first reading only re-baseline the
    /// references; round-intro overlays corrupt the first moments of play.
    pub start_buffer_ms: u64,

    /// Minimum health drop that counts as damage; smaller deltas are
    /// classification jitter.
    pub damage_threshold: i32,

    /// Health at or below this is a knockout.
    pub ko_threshold: i32,

    /// A health gain larger than this is a re-baseline signal (new round or
    /// calibration correction), never gameplay.
    pub recovery_margin: i32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            start_buffer_ms: 1500,
            damage_threshold: 2,
            ko_threshold: 1,
            recovery_margin: 5,
        }
    }
}

/// The event extraction state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventExtractor {
    config: ExtractorConfig,
}

impl EventExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Reduce a smoothed reading series to the ordered event sequence.
    ///
    /// The first reading unconditionally becomes the `neutral` round start;
    /// an empty series yields an empty sequence ("no signal").
    pub fn extract(&self, readings: &[HealthReading]) -> Vec<GameEvent> {
        let Some(first) = readings.first() else {
            return Vec::new();
        };

        let mut events = vec![GameEvent::new(
            first.timestamp_ms,
            EventType::Neutral,
            first.p1_health,
            first.p2_health,
            "Round Start",
        )];

        let start_timestamp = first.timestamp_ms;
        let mut last_p1 = first.p1_health as i32;
        let mut last_p2 = first.p2_health as i32;

        for curr in &readings[1..] {
            let p1 = curr.p1_health as i32;
            let p2 = curr.p2_health as i32;

            if curr.timestamp_ms.saturating_sub(start_timestamp) < self.config.start_buffer_ms {
                last_p1 = p1;
                last_p2 = p2;
                continue;
            }

            // KO checks compare against the references as they stood at the
            // start of this reading, so a single-step drop to zero lands
            // both the damage event and the knockout.
            let prev_p1 = last_p1;
            let prev_p2 = last_p2;

            let p1_diff = prev_p1 - p1;
            if p1_diff > self.config.damage_threshold {
                events.push(GameEvent::new(
                    curr.timestamp_ms,
                    EventType::DamageTaken,
                    curr.p1_health,
                    curr.p2_health,
                    format!("Took {p1_diff}% damage"),
                ));
                last_p1 = p1;
            }

            let p2_diff = prev_p2 - p2;
            if p2_diff > self.config.damage_threshold {
                events.push(GameEvent::new(
                    curr.timestamp_ms,
                    EventType::DamageGiven,
                    curr.p1_health,
                    curr.p2_health,
                    format!("Dealt {p2_diff}% damage"),
                ));
                last_p2 = p2;
            }

            if p1 <= self.config.ko_threshold && prev_p1 > self.config.ko_threshold {
                events.push(GameEvent::new(
                    curr.timestamp_ms,
                    EventType::Defeat,
                    0,
                    curr.p2_health,
                    "Lost the round by KO",
                ));
                last_p1 = 0;
            }

            if p2 <= self.config.ko_threshold && prev_p2 > self.config.ko_threshold {
                events.push(GameEvent::new(
                    curr.timestamp_ms,
                    EventType::Victory,
                    curr.p1_health,
                    0,
                    "Won the round by KO",
                ));
                last_p2 = 0;
            }

            if p1 > last_p1 + self.config.recovery_margin {
                last_p1 = p1;
            }
            if p2 > last_p2 + self.config.recovery_margin {
                last_p2 = p2;
            }
        }

        tracing::debug!(
            readings = readings.len(),
            events = events.len(),
            "Extracted event timeline"
        );

        events
    }
}
