use std::fmt;

/// Configuration errors raised by `CombatEngine::initialize` before any
/// battle state is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A battle requires exactly two sides.
    InvalidSideCount(usize),
    /// Each side needs at least one active slot.
    InvalidSlotCount(usize),
    /// A side was configured with an empty party.
    EmptyParty { side: usize },
    /// Each slot needs exactly one action provider.
    ProviderCountMismatch {
        side: usize,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSideCount(count) => {
                write!(f, "a battle requires exactly two sides, got {}", count)
            }
            ConfigError::InvalidSlotCount(count) => {
                write!(f, "each side needs at least one slot, got {}", count)
            }
            ConfigError::EmptyParty { side } => {
                write!(f, "side {} was configured with an empty party", side)
            }
            ConfigError::ProviderCountMismatch {
                side,
                expected,
                actual,
            } => write!(
                f,
                "side {} needs {} action providers (one per slot), got {}",
                side, expected, actual
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors surfaced by the engine after initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `run_battle` was called before `initialize`.
    NotInitialized,
    /// The battle already produced a terminal result.
    BattleAlreadyEnded,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotInitialized => {
                write!(f, "the engine must be initialized before running a battle")
            }
            EngineError::BattleAlreadyEnded => {
                write!(f, "the battle has already produced a terminal result")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Errors returned by per-slot action providers. These are caught at the
/// collection boundary and never abort the battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider had no legal action to offer for the slot.
    NoActionAvailable,
    /// The provider failed internally (disconnected client, bad input, ...).
    Failed(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::NoActionAvailable => write!(f, "no action available"),
            ProviderError::Failed(reason) => write!(f, "provider failed: {}", reason),
        }
    }
}

impl std::error::Error for ProviderError {}

pub type EngineResult<T> = Result<T, EngineError>;
