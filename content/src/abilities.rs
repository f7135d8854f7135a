use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Passive abilities recognized by the engine's handler registry.
///
/// The engine maps these to predicate + effect handlers at startup; this
/// crate only names them.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
)]
pub enum AbilityId {
    /// Lowers the attack of opposing occupants on switch-in.
    Intimidate,
    /// 30% chance to paralyze attackers that make contact.
    Static,
    /// Contact attackers lose 1/8 of their max HP.
    RoughSkin,
    /// Immune to Ground moves and ground-bound hazards.
    Levitate,
    /// Stat stage changes are inverted.
    Contrary,
    /// Doubled speed in rain.
    SwiftSwim,
    /// Doubled speed in sun.
    Chlorophyll,
}
