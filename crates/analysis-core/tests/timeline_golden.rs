//! End-to-end pipeline tests over synthetic reading streams: both producers
//! (sampled cadence and ingested CSV) through the smoother and extractor.

use roundscope_analysis_core::extract::EventExtractor;
use roundscope_analysis_core::smooth::ReadingSmoother;
use roundscope_match_model::reading::parse_readings;
use roundscope_match_model::{EventType, HealthReading};

fn run_pipeline(readings: &[HealthReading]) -> Vec<roundscope_match_model::GameEvent> {
    let smoothed = ReadingSmoother::default().smooth(readings);
    EventExtractor::default().extract(&smoothed)
}

fn event_types(events: &[roundscope_match_model::GameEvent]) -> Vec<EventType> {
    events.iter().map(|e| e.event_type).collect()
}

/// A full synthetic round at the video path's 100 ms cadence: intro
/// flicker, a clean exchange each way, then a finish.
#[test]
fn synthetic_round_produces_expected_timeline() {
    let mut values: Vec<(u8, u8)> = Vec::new();
    // Intro: overlay glyphs corrupt the gauges for the first second.
    values.extend([(100, 100), (62, 100), (100, 48), (100, 100), (100, 100)]);
    // Neutral play until well past the start buffer.
    values.extend(std::iter::repeat((100, 100)).take(25));
    // P1 lands a combo: P2 drops to 70 and stays there.
    values.extend(std::iter::repeat((100, 70)).take(15));
    // P2 answers: P1 drops to 55.
    values.extend(std::iter::repeat((55, 70)).take(15));
    // P1 closes it out.
    values.extend(std::iter::repeat((55, 0)).take(10));

    let readings: Vec<HealthReading> = values
        .iter()
        .enumerate()
        .map(|(i, &(p1, p2))| HealthReading::new(i as u64 * 100, p1, p2))
        .collect();

    let events = run_pipeline(&readings);

    assert_eq!(events[0].event_type, EventType::Neutral);
    assert_eq!(events[0].description, "Round Start");

    // The intro flicker is fully absorbed: nothing fires before the first
    // real exchange at t=2800.
    assert_eq!(events[1].timestamp_ms, 2800);

    // The smoother spreads each large drop across its window, and every
    // ~6-point step of the descent clears the threshold-2 floor: a 30-point
    // combo lands as five damage ticks, a 45-point one as five 9-point
    // ticks, and the 70-point finish as five 14-point ticks plus the KO.
    let taken = events
        .iter()
        .filter(|e| e.event_type == EventType::DamageTaken)
        .count();
    let given = events
        .iter()
        .filter(|e| e.event_type == EventType::DamageGiven)
        .count();
    assert_eq!(taken, 5, "damage_taken ticks: {:?}", event_types(&events));
    assert_eq!(given, 10, "damage_given ticks: {:?}", event_types(&events));
    assert_eq!(events.last().unwrap().event_type, EventType::Victory);
    assert_eq!(events.last().unwrap().timestamp_ms, 6200);
    assert_eq!(events.last().unwrap().enemy_health, 0);
    assert_eq!(events.last().unwrap().my_health, 55);

    // Ordered by time, everything clamped.
    for pair in events.windows(2) {
        assert!(pair[0].timestamp_ms <= pair[1].timestamp_ms);
    }
    for e in &events {
        assert!(e.my_health <= 100 && e.enemy_health <= 100);
    }
}

/// The CSV producer feeds the identical pipeline: a sparse externally
/// measured curve with a 6-point drop comes out as one damage_given.
#[test]
fn ingested_csv_runs_the_same_pipeline() {
    let csv = "timestamp_ms,p1_health,p1_pending,p2_health\n\
               0,100,0,100\n\
               1000,100,0,100\n\
               2000,100,0,100\n\
               3000,100,0,100\n\
               4000,100,0,94\n\
               5000,100,0,94\n\
               6000,100,0,94\n\
               7000,100,0,94\n\
               8000,100,0,94\n";

    let readings = parse_readings(csv);
    assert_eq!(readings.len(), 9);

    let events = run_pipeline(&readings);
    assert_eq!(
        event_types(&events),
        vec![EventType::Neutral, EventType::DamageGiven]
    );
    // The smoother is still descending the step when the threshold trips.
    assert_eq!(events[1].timestamp_ms, 4000);
    assert_eq!(events[1].enemy_health, 96);
}

/// The extractor contract on an ingested two-row curve: the header row is
/// skipped, a 6-point drop beats the threshold-2 floor, and the event
/// carries the measured health. The drop sits past the start buffer so the
/// intro re-baseline rule stays out of the way.
#[test]
fn ingested_drop_past_start_buffer_emits_damage_given() {
    let csv = "timestamp_ms,p1,p_pending,p2\n\
               0,100,0,100\n\
               1600,100,0,94\n";

    let readings = parse_readings(csv);
    let events = EventExtractor::default().extract(&readings);

    assert_eq!(
        event_types(&events),
        vec![EventType::Neutral, EventType::DamageGiven]
    );
    assert_eq!(events[0].timestamp_ms, 0);
    assert_eq!(events[1].timestamp_ms, 1600);
    assert_eq!(events[1].enemy_health, 94);
    assert_eq!(events[1].my_health, 100);
}

/// Zero valid CSV rows degrade to an empty event sequence, not an error.
#[test]
fn empty_csv_degrades_to_no_signal() {
    let events = run_pipeline(&parse_readings("timestamp_ms,p1,pend,p2\n"));
    assert!(events.is_empty());
}
