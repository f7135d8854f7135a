use std::io::Write;

use content::{HazardKind, ItemId, SideCondition, Stat, StatusAilment, Terrain, Weather};
use serde::{Deserialize, Serialize};

use crate::battle::engine::BattleOutcome;
use crate::battle::field::SlotRef;

/// Structured events describing everything that happened during resolution.
///
/// Events are the engine's only output channel besides the final
/// `BattleResult`; observers (logs, statistics, UI) consume them without
/// influencing control flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Moves and damage
    MoveUsed {
        user: SlotRef,
        name: String,
        move_name: String,
    },
    MoveMissed {
        user: SlotRef,
        move_name: String,
    },
    AttackEffectiveness {
        target: SlotRef,
        multiplier: f64,
    },
    CriticalHit {
        target: SlotRef,
    },
    DamageDealt {
        target: SlotRef,
        name: String,
        amount: u16,
        remaining_hp: u16,
    },
    Healed {
        target: SlotRef,
        name: String,
        amount: u16,
        new_hp: u16,
    },
    Fainted {
        target: SlotRef,
        name: String,
    },

    // Stat stages and statuses
    StatStageChanged {
        target: SlotRef,
        stat: Stat,
        requested: i8,
        applied: i8,
        new_stage: i8,
    },
    StatusInflicted {
        target: SlotRef,
        name: String,
        status: StatusAilment,
    },
    StatusCleared {
        target: SlotRef,
        status: StatusAilment,
    },
    StatusDamage {
        target: SlotRef,
        status: StatusAilment,
        damage: u16,
        remaining_hp: u16,
    },

    // Switching and hazards
    Switched {
        side: usize,
        slot: usize,
        name: String,
    },
    HazardPlaced {
        side: usize,
        hazard: HazardKind,
        layers: u8,
    },
    HazardRemoved {
        side: usize,
        hazard: HazardKind,
    },
    HazardDamage {
        target: SlotRef,
        hazard: HazardKind,
        damage: u16,
    },

    // Field state
    WeatherChanged {
        weather: Option<Weather>,
    },
    TerrainChanged {
        terrain: Option<Terrain>,
    },
    SideConditionApplied {
        side: usize,
        condition: SideCondition,
    },
    SideConditionExpired {
        side: usize,
        condition: SideCondition,
    },

    // Passive effects
    ItemConsumed {
        target: SlotRef,
        item: ItemId,
    },

    // Failures and chatter
    ActionFailed {
        slot: SlotRef,
        reason: ActionFailureReason,
    },
    Message {
        text: String,
    },

    // Battle end
    SideReport {
        side: usize,
        fainted: usize,
        total: usize,
    },
    BattleEnded {
        outcome: BattleOutcome,
        turns_taken: u32,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    IsFlinching,
    LostFocus,
    NoTargetPresent,
    UnknownMove,
}

/// External observer for the event stream.
///
/// Sinks run strictly after state changes; a failing sink is logged and
/// skipped so it can never affect engine correctness.
pub trait EventSink {
    fn handle(&mut self, event: &BattleEvent) -> Result<(), Box<dyn std::error::Error>>;
}

/// Collects events for the turn in order and fans them out to sinks.
#[derive(Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn push(&mut self, event: BattleEvent) {
        for sink in &mut self.sinks {
            if let Err(err) = sink.handle(&event) {
                log::warn!("event sink failed, skipping: {}", err);
            }
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Sink that writes each event as one JSON line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn handle(&mut self, event: &BattleEvent) -> Result<(), Box<dyn std::error::Error>> {
        let line = serde_json::to_string(event)?;
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}

/// Presentation hook the engine invokes identically whether or not a real
/// presenter is attached.
pub trait Presenter {
    fn present(&mut self, event: &BattleEvent);
}

/// Default presenter that ignores everything.
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _event: &BattleEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl EventSink for FailingSink {
        fn handle(&mut self, _event: &BattleEvent) -> Result<(), Box<dyn std::error::Error>> {
            Err("sink exploded".into())
        }
    }

    #[test]
    fn failing_sink_does_not_lose_events() {
        let mut bus = EventBus::new();
        bus.attach_sink(Box::new(FailingSink));
        bus.push(BattleEvent::TurnStarted { turn_number: 1 });
        bus.push(BattleEvent::TurnEnded);
        assert_eq!(bus.len(), 2);
    }

    #[test]
    fn json_sink_writes_one_line_per_event() {
        let mut buffer = Vec::new();
        {
            let mut sink = JsonLinesSink::new(&mut buffer);
            sink.handle(&BattleEvent::TurnStarted { turn_number: 3 })
                .unwrap();
            sink.handle(&BattleEvent::TurnEnded).unwrap();
        }
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("TurnStarted"));
    }
}
