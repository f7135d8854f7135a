//! Creature Combat Engine
//!
//! A deterministic, turn-based battle resolution engine: two sides declare
//! actions simultaneously, the engine orders them by priority and speed,
//! and a depth-first action queue resolves each action together with the
//! reactions it cascades into. All randomness flows through one injected
//! generator, so a battle is exactly reproducible from its seed.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod errors;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `content` crate ---
// Re-export the shared content vocabulary so hosts only need one import.
pub use content::{
    AbilityId,
    ContentRepository,
    ElementType,
    HazardKind,
    ItemId,
    MoveBlueprint,
    MoveCategory,
    MoveEffect,
    SideCondition,
    SpeciesBlueprint,
    Stat,
    StatSet,
    StatusAilment,
    Terrain,
    Weather,
};

// --- From this crate's modules (`src/`) ---

// Core engine entry points.
pub use battle::engine::{
    BattleOutcome, BattleResult, CombatEngine, SideConfig, MAX_TURNS, MAX_TURNS_WITHOUT_HP_CHANGE,
};

// Battle state and addressing.
pub use battle::field::{Field, Side, Slot, SlotRef, StatStages, VolatileStatus};
pub use combatant::Combatant;

// Resolution primitives.
pub use battle::actions::{Action, DamageContext, TurnContext};
pub use battle::order::{ActionChoice, DeclaredAction};
pub use battle::queue::{BattleQueue, QueueRun, MAX_QUEUE_ITERATIONS};
pub use battle::triggers::{Handler, HandlerRegistry, Trigger, TriggerEvent};

// Injected collaborators.
pub use battle::events::{BattleEvent, EventBus, EventSink, JsonLinesSink, NullPresenter, Presenter};
pub use battle::providers::{ActionProvider, FirstMoveProvider, ScriptedProvider};
pub use battle::rng::{BattleRng, FixedRng, SeededRng};

// Crate-specific error and result types.
pub use errors::{ConfigError, EngineError, EngineResult, ProviderError};
