use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use content::ContentRepository;
use serde::{Deserialize, Serialize};

use crate::battle::actions::{Action, TurnContext};
use crate::battle::events::{BattleEvent, EventBus, EventSink, Presenter};
use crate::battle::field::{Field, Side};
use crate::battle::order::resolve_turn_order;
use crate::battle::phases::collection::collect_actions;
use crate::battle::phases::end_of_turn::{clear_turn_markers, end_of_turn_actions};
use crate::battle::phases::outcome::{battle_outcome, emit_side_reports};
use crate::battle::phases::replacement::fill_empty_slots;
use crate::battle::providers::ActionProvider;
use crate::battle::queue::{BattleQueue, QueueRun};
use crate::battle::rng::BattleRng;
use crate::battle::triggers::HandlerRegistry;
use crate::combatant::Combatant;
use crate::errors::{ConfigError, EngineError, EngineResult};

/// Ceiling on battle length; hitting it forces a draw.
pub const MAX_TURNS: u32 = 1000;

/// Consecutive turns with zero total-HP movement before the battle is
/// declared stagnant and drawn.
pub const MAX_TURNS_WITHOUT_HP_CHANGE: u32 = 10;

/// Terminal (or pending) disposition of a battle, from the player side's
/// perspective.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Ongoing,
    Victory,
    Defeat,
    Draw,
    /// The battle was stopped cooperatively between turns.
    Fled,
    /// Reserved for capture flows driven outside the engine; the engine
    /// itself never produces it.
    Caught,
}

/// Immutable summary produced exactly once per battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub turns_taken: u32,
}

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnginePhase {
    Uninitialized,
    Ready,
    Ended,
}

/// Everything needed to field one team.
pub struct SideConfig {
    pub party: Vec<Combatant>,
    /// One provider per slot, in slot order.
    pub providers: Vec<Box<dyn ActionProvider>>,
    pub is_player: bool,
}

/// Drives a battle from configuration to a `BattleResult`.
///
/// The engine owns all mutable battle state; callers interact through the
/// configuration given to `initialize`, the event stream, and the stop
/// handle.
pub struct CombatEngine {
    content: Arc<ContentRepository>,
    registry: HandlerRegistry,
    rng: Box<dyn BattleRng>,
    bus: EventBus,
    queue: BattleQueue,
    providers: Vec<Vec<Box<dyn ActionProvider>>>,
    field: Option<Field>,
    phase: EnginePhase,
    outcome: BattleOutcome,
    stop_requested: Arc<AtomicBool>,
}

impl CombatEngine {
    pub fn new(content: Arc<ContentRepository>, rng: Box<dyn BattleRng>) -> Self {
        Self {
            content,
            registry: HandlerRegistry::standard(),
            rng,
            bus: EventBus::new(),
            queue: BattleQueue::new(),
            providers: Vec::new(),
            field: None,
            phase: EnginePhase::Uninitialized,
            outcome: BattleOutcome::Ongoing,
            stop_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replaces the standard passive-effect registry, for tests and for
    /// rulesets with a different handler roster.
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn attach_sink(&mut self, sink: Box<dyn EventSink>) {
        self.bus.attach_sink(sink);
    }

    /// Routes every event through a presenter as it is emitted.
    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.bus.attach_sink(Box::new(PresenterSink(presenter)));
    }

    /// Handle a host can flip to end the battle cooperatively. Checked
    /// between turns only; the current turn always finishes.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_requested)
    }

    pub fn events(&self) -> &[BattleEvent] {
        self.bus.events()
    }

    /// `Ongoing` until the battle reaches a terminal state.
    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    /// Validates the configuration, builds the field, and sends out each
    /// side's leading party members through the queue so that entry effects
    /// (hazards would not exist yet, but switch-in abilities do) apply.
    ///
    /// Nothing is mutated until every check has passed.
    pub fn initialize(
        &mut self,
        sides: Vec<SideConfig>,
        slot_count: usize,
    ) -> Result<(), ConfigError> {
        if sides.len() != 2 {
            return Err(ConfigError::InvalidSideCount(sides.len()));
        }
        if slot_count == 0 {
            return Err(ConfigError::InvalidSlotCount(slot_count));
        }
        for (index, config) in sides.iter().enumerate() {
            if config.party.is_empty() {
                return Err(ConfigError::EmptyParty { side: index });
            }
            if config.providers.len() != slot_count {
                return Err(ConfigError::ProviderCountMismatch {
                    side: index,
                    expected: slot_count,
                    actual: config.providers.len(),
                });
            }
        }

        let mut built_sides = Vec::with_capacity(2);
        for config in &sides {
            built_sides.push(Side::new(config.party.clone(), slot_count, config.is_player));
        }
        let mut field = Field::new([built_sides.remove(0), built_sides.remove(0)]);
        self.providers = sides.into_iter().map(|c| c.providers).collect();

        // Lead with the first living party members, slot by slot.
        for side in 0..2 {
            let mut living = field.sides[side]
                .party
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.is_fainted())
                .map(|(i, _)| i);
            for slot in 0..slot_count {
                if let Some(party_index) = living.next() {
                    self.queue.push_back(Action::Switch {
                        side,
                        slot,
                        party_index,
                    });
                }
            }
        }
        let mut ctx = TurnContext {
            content: &self.content,
            registry: &self.registry,
            rng: self.rng.as_mut(),
            bus: &mut self.bus,
        };
        self.queue.run(&mut field, &mut ctx);

        self.field = Some(field);
        self.phase = EnginePhase::Ready;
        Ok(())
    }

    /// Runs the turn loop until a terminal outcome is reached and returns
    /// the result. Consumes the ready state; a second call fails.
    pub async fn run_battle(&mut self) -> EngineResult<BattleResult> {
        match self.phase {
            EnginePhase::Uninitialized => return Err(EngineError::NotInitialized),
            EnginePhase::Ended => return Err(EngineError::BattleAlreadyEnded),
            EnginePhase::Ready => {}
        }

        let mut stagnant_turns = 0u32;
        let mut last_total_hp = self
            .field
            .as_ref()
            .map(|f| f.total_hp())
            .unwrap_or_default();

        loop {
            if self.stop_requested.load(Ordering::Relaxed) {
                return Ok(self.finish(BattleOutcome::Fled));
            }
            let turn_number = {
                let field = self.field.as_mut().ok_or(EngineError::NotInitialized)?;
                if field.turn_number >= MAX_TURNS {
                    log::warn!("turn limit {MAX_TURNS} reached, forcing a draw");
                    return Ok(self.finish(BattleOutcome::Draw));
                }
                field.turn_number += 1;
                field.turn_number
            };
            self.bus.push(BattleEvent::TurnStarted { turn_number });

            if self.run_turn().await? == QueueRun::CapExceeded {
                return Ok(self.finish(BattleOutcome::Draw));
            }
            self.bus.push(BattleEvent::TurnEnded);

            let field = self.field.as_ref().ok_or(EngineError::NotInitialized)?;
            if let Some(outcome) = battle_outcome(field) {
                return Ok(self.finish(outcome));
            }

            let total_hp = field.total_hp();
            if total_hp == last_total_hp {
                stagnant_turns += 1;
                if stagnant_turns >= MAX_TURNS_WITHOUT_HP_CHANGE {
                    log::warn!(
                        "no HP movement for {MAX_TURNS_WITHOUT_HP_CHANGE} turns, forcing a draw"
                    );
                    return Ok(self.finish(BattleOutcome::Draw));
                }
            } else {
                stagnant_turns = 0;
                last_total_hp = total_hp;
            }
        }
    }

    /// One full turn: collect, sort, execute, end-of-turn, refill slots.
    async fn run_turn(&mut self) -> EngineResult<QueueRun> {
        let field = self.field.as_mut().ok_or(EngineError::NotInitialized)?;

        let declared = collect_actions(field, &self.content, &mut self.providers).await;
        let ordered = resolve_turn_order(field, &self.content, declared, self.rng.as_mut());

        for action in ordered {
            self.queue.push_back(action.into_action());
        }
        let mut ctx = TurnContext {
            content: &self.content,
            registry: &self.registry,
            rng: self.rng.as_mut(),
            bus: &mut self.bus,
        };
        if self.queue.run(field, &mut ctx) == QueueRun::CapExceeded {
            return Ok(QueueRun::CapExceeded);
        }

        let eot = end_of_turn_actions(field, &mut ctx);
        for action in eot {
            self.queue.push_back(action);
        }
        if self.queue.run(field, &mut ctx) == QueueRun::CapExceeded {
            return Ok(QueueRun::CapExceeded);
        }
        clear_turn_markers(field);

        Ok(fill_empty_slots(field, &mut self.queue, &mut ctx, &mut self.providers).await)
    }

    /// Seals the battle: emits the closing reports and the final event, and
    /// moves the engine to its terminal state.
    fn finish(&mut self, outcome: BattleOutcome) -> BattleResult {
        let turns_taken = self
            .field
            .as_ref()
            .map(|f| f.turn_number)
            .unwrap_or_default();
        if let Some(field) = self.field.as_ref() {
            emit_side_reports(field, &mut self.bus);
        }
        self.bus.push(BattleEvent::BattleEnded {
            outcome,
            turns_taken,
        });
        self.outcome = outcome;
        self.phase = EnginePhase::Ended;
        self.queue.clear();
        BattleResult {
            outcome,
            turns_taken,
        }
    }
}

/// Adapts a `Presenter` onto the sink interface so presentation rides the
/// same path as every other observer.
struct PresenterSink(Box<dyn Presenter>);

impl EventSink for PresenterSink {
    fn handle(&mut self, event: &BattleEvent) -> Result<(), Box<dyn std::error::Error>> {
        self.0.present(event);
        Ok(())
    }
}
