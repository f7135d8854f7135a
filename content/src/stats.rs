use serde::{Deserialize, Serialize};
use strum::Display;

/// A stat that can be staged up or down in battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Stat {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

/// Final, already-computed stat values for a combatant.
///
/// Stat-formula computation (level/nature -> stat) is out of scope for the
/// engine; combatants arrive with these numbers filled in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatSet {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl StatSet {
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
            // Accuracy and evasion have no base value; they exist only as stages.
            Stat::Accuracy | Stat::Evasion => 100,
        }
    }
}
