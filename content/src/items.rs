use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Held items recognized by the engine's handler registry.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
)]
pub enum ItemId {
    /// Speed multiplied by 1.5.
    ChoiceScarf,
    /// Contact attackers lose 1/6 of their max HP.
    RockyHelmet,
    /// Heals 1/16 of max HP at the end of each turn.
    Leftovers,
    /// Consumed when HP drops below half; restores 1/4 of max HP.
    SitrusBerry,
    /// Heals the holder for 1/8 of the damage its moves deal.
    ShellBell,
}
