use serde::{Deserialize, Serialize};
use strum::Display;

use crate::battle_data::{HazardKind, SideCondition, Terrain, Weather};
use crate::stats::Stat;
use crate::status::StatusAilment;
use crate::types::ElementType;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// How a two-turn move spends its first turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStyle {
    /// The user charges in plain sight and strikes next turn.
    Charging,
    /// The user vanishes while charging and cannot be hit until it strikes.
    SemiInvulnerable,
}

/// Which slot a move effect applies to, relative to the user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    User,
    Target,
}

/// Secondary (or, for status moves, primary) effect of a move.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum MoveEffect {
    None,
    /// Inflicts a persistent status with the given percent chance.
    InflictStatus {
        target: EffectTarget,
        status: StatusAilment,
        chance: u8,
    },
    /// Applies stat stage deltas with the given percent chance.
    ChangeStats {
        target: EffectTarget,
        changes: Vec<(Stat, i8)>,
        chance: u8,
    },
    SetWeather(Weather),
    SetTerrain(Terrain),
    /// Lays one layer of a hazard on the target's side.
    SetHazard(HazardKind),
    /// Raises a timed condition over the user's side (screens, tailwind).
    SetSideCondition(SideCondition),
    /// Chance to make the target flinch this turn.
    Flinch { chance: u8 },
    /// Chance to confuse the target.
    Confuse { chance: u8 },
    /// Plants a seed that drains the target each turn. Grass types are
    /// immune.
    LeechSeed,
}

/// Immutable blueprint for a move, looked up by id in the repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveBlueprint {
    pub name: String,
    pub element: ElementType,
    pub category: MoveCategory,
    /// Base power; ignored for status moves.
    pub power: u16,
    /// None means the move never misses.
    pub accuracy: Option<u8>,
    pub priority: i8,
    pub makes_contact: bool,
    /// Some for two-turn moves that spend their first turn charging.
    pub charge: Option<ChargeStyle>,
    /// The move fails if the user took a direct hit earlier in the turn.
    pub requires_focus: bool,
    pub effect: MoveEffect,
}

impl MoveBlueprint {
    /// Convenience constructor for a plain damaging move with no effect.
    pub fn damaging(
        name: &str,
        element: ElementType,
        category: MoveCategory,
        power: u16,
        accuracy: Option<u8>,
    ) -> Self {
        Self {
            name: name.to_string(),
            element,
            category,
            power,
            accuracy,
            priority: 0,
            makes_contact: matches!(category, MoveCategory::Physical),
            charge: None,
            requires_focus: false,
            effect: MoveEffect::None,
        }
    }

    /// Convenience constructor for a status move.
    pub fn status(name: &str, element: ElementType, effect: MoveEffect) -> Self {
        Self {
            name: name.to_string(),
            element,
            category: MoveCategory::Status,
            power: 0,
            accuracy: None,
            priority: 0,
            makes_contact: false,
            charge: None,
            requires_focus: false,
            effect,
        }
    }

    pub fn with_priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_effect(mut self, effect: MoveEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_contact(mut self, makes_contact: bool) -> Self {
        self.makes_contact = makes_contact;
        self
    }

    pub fn with_charge(mut self, style: ChargeStyle) -> Self {
        self.charge = Some(style);
        self
    }

    pub fn with_focus(mut self) -> Self {
        self.requires_focus = true;
        self
    }
}
