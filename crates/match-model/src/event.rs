//! Discrete game events and timeline export.
//!
//! The event sequence is the sole artifact handed to downstream
//! collaborators (commentary generation, the video player, spreadsheet
//! tooling). Events are ordered by non-decreasing time and the first is
//! always the `neutral` round start.

use serde::{Deserialize, Serialize};

use roundscope_common::timecode::{format_time_label, TimestampMs};

/// Discriminant for a game event, from player 1's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Round start / no change.
    Neutral,
    /// Player 1 lost health.
    DamageTaken,
    /// Player 2 lost health.
    DamageGiven,
    /// Player 2 was knocked out.
    Victory,
    /// Player 1 was knocked out.
    Defeat,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Neutral => "neutral",
            EventType::DamageTaken => "damage_taken",
            EventType::DamageGiven => "damage_given",
            EventType::Victory => "victory",
            EventType::Defeat => "defeat",
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(EventType::Neutral),
            "damage_taken" => Ok(EventType::DamageTaken),
            "damage_given" => Ok(EventType::DamageGiven),
            "victory" => Ok(EventType::Victory),
            "defeat" => Ok(EventType::Defeat),
            other => Err(format!("unknown event type: {other}")),
        }
    }
}

/// One entry in the extracted timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Millisecond offset into the media.
    pub timestamp_ms: TimestampMs,

    /// Human-readable `seconds.tenths` label.
    pub time: String,

    pub event_type: EventType,

    /// Player 1's health after the event.
    pub my_health: u8,

    /// Player 2's health after the event.
    pub enemy_health: u8,

    /// Short prose summary, later enriched by the scene-description
    /// collaborator.
    pub description: String,
}

impl GameEvent {
    pub fn new(
        timestamp_ms: TimestampMs,
        event_type: EventType,
        my_health: u8,
        enemy_health: u8,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_ms,
            time: format_time_label(timestamp_ms),
            event_type,
            my_health: my_health.min(100),
            enemy_health: enemy_health.min(100),
            description: description.into(),
        }
    }
}

/// Serialize events to the timeline CSV layout.
pub fn serialize_events_csv(events: &[GameEvent]) -> String {
    let mut output =
        String::from("timestamp_ms,time,event_type,my_health,enemy_health,description\n");
    for e in events {
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            e.timestamp_ms,
            e.time,
            e.event_type.as_str(),
            e.my_health,
            e.enemy_health,
            e.description
        ));
    }
    output
}

/// Parse events back from the timeline CSV layout.
///
/// The description is the final column and may contain commas; rows that do
/// not parse are skipped, matching the ingestion contract for readings.
pub fn parse_events_csv(text: &str) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.splitn(6, ',').collect();
        if fields.len() < 6 {
            continue;
        }
        let (Ok(timestamp_ms), Ok(event_type), Ok(my_health), Ok(enemy_health)) = (
            fields[0].trim().parse::<TimestampMs>(),
            fields[2].trim().parse::<EventType>(),
            fields[3].trim().parse::<u8>(),
            fields[4].trim().parse::<u8>(),
        ) else {
            continue;
        };
        events.push(GameEvent {
            timestamp_ms,
            time: fields[1].trim().to_string(),
            event_type,
            my_health: my_health.min(100),
            enemy_health: enemy_health.min(100),
            description: fields[5].to_string(),
        });
    }
    events
}

/// JSON document consumed by the video-player collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineDocument {
    /// RFC 3339 export timestamp.
    pub generated_at: String,

    pub events: Vec<GameEvent>,
}

impl TimelineDocument {
    pub fn new(events: Vec<GameEvent>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            events,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events() -> Vec<GameEvent> {
        vec![
            GameEvent::new(0, EventType::Neutral, 100, 100, "Round Start"),
            GameEvent::new(2_300, EventType::DamageGiven, 100, 94, "Dealt 6% damage"),
            GameEvent::new(45_100, EventType::Victory, 62, 0, "Won the round by KO"),
        ]
    }

    #[test]
    fn test_event_type_labels_roundtrip() {
        for et in [
            EventType::Neutral,
            EventType::DamageTaken,
            EventType::DamageGiven,
            EventType::Victory,
            EventType::Defeat,
        ] {
            assert_eq!(et.as_str().parse::<EventType>().unwrap(), et);
        }
    }

    #[test]
    fn test_time_label_derived_from_timestamp() {
        let event = GameEvent::new(45_100, EventType::Neutral, 100, 100, "Round Start");
        assert_eq!(event.time, "45.1");
    }

    #[test]
    fn test_csv_roundtrip() {
        let events = sample_events();
        let parsed = parse_events_csv(&serialize_events_csv(&events));
        assert_eq!(parsed, events);
    }

    #[test]
    fn test_csv_description_may_contain_commas() {
        let events = vec![GameEvent::new(
            100,
            EventType::DamageTaken,
            70,
            90,
            "Took 30% damage, now in danger",
        )];
        let parsed = parse_events_csv(&serialize_events_csv(&events));
        assert_eq!(parsed[0].description, "Took 30% damage, now in danger");
    }

    #[test]
    fn test_csv_skips_malformed_rows() {
        let csv = "timestamp_ms,time,event_type,my_health,enemy_health,description\n\
                   oops,0.0,neutral,100,100,Round Start\n\
                   100,0.1,not_a_type,100,100,x\n\
                   200,0.2,damage_taken,94,100,Took 6% damage\n";
        let parsed = parse_events_csv(csv);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].event_type, EventType::DamageTaken);
    }

    #[test]
    fn test_json_event_type_is_snake_case() {
        let json = serde_json::to_string(&sample_events()[1]).unwrap();
        assert!(json.contains("\"event_type\":\"damage_given\""));
    }

    #[test]
    fn test_timeline_document_shape() {
        let doc = TimelineDocument::new(sample_events());
        let json = doc.to_json().unwrap();
        assert!(json.contains("generated_at"));
        assert!(json.contains("\"events\""));
        let parsed: TimelineDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.events.len(), 3);
    }
}
