use serde::{Deserialize, Serialize};

/// Persistent status ailments. These survive switching out, as opposed to the
/// volatile statuses tracked per slot inside the engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAilment {
    /// Loses 1/8 max HP each turn.
    Poison,
    /// Escalating poison; counter starts at 1 and grows each turn.
    Toxic { counter: u8 },
    /// Loses 1/16 max HP each turn.
    Burn,
    /// Speed quartered; 25% chance to lose the turn.
    Paralysis,
    /// Cannot act while the counter is above zero; counts down on each attempt.
    Sleep { turns_remaining: u8 },
    /// Cannot act; 25% chance to thaw on each attempt.
    Freeze,
}
