use content::{AbilityId, ElementType, ItemId, StatSet, StatusAilment};
use serde::{Deserialize, Serialize};

/// A stateful battle participant.
///
/// Stats arrive fully computed; the engine never derives them from levels or
/// natures. HP and the persistent status ailment are the only fields that
/// change over the course of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Combatant {
    pub name: String,
    /// Species id in the content repository.
    pub species: String,
    pub level: u8,
    pub types: Vec<ElementType>,
    pub stats: StatSet,
    pub ability: Option<AbilityId>,
    pub held_item: Option<ItemId>,
    /// Move ids in the content repository.
    pub moves: Vec<String>,
    current_hp: u16,
    pub status: Option<StatusAilment>,
}

impl Combatant {
    pub fn new(
        name: &str,
        species: &str,
        level: u8,
        types: Vec<ElementType>,
        stats: StatSet,
        moves: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            species: species.to_string(),
            level,
            types,
            stats,
            ability: None,
            held_item: None,
            moves,
            current_hp: stats.hp,
            status: None,
        }
    }

    pub fn with_ability(mut self, ability: AbilityId) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_item(mut self, item: ItemId) -> Self {
        self.held_item = Some(item);
        self
    }

    pub fn with_status(mut self, status: StatusAilment) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = hp.min(self.stats.hp);
        self
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, element: ElementType) -> bool {
        self.types.contains(&element)
    }

    /// Applies damage and reports whether the combatant fainted from it.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        let was_alive = self.current_hp > 0;
        self.current_hp = self.current_hp.saturating_sub(amount);
        was_alive && self.current_hp == 0
    }

    /// Heals up to max HP and returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.stats.hp.saturating_sub(self.current_hp));
        self.current_hp += restored;
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(hp: u16) -> StatSet {
        StatSet {
            hp,
            attack: 50,
            defense: 50,
            special_attack: 50,
            special_defense: 50,
            speed: 50,
        }
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut c = Combatant::new("Rattata", "rattata", 5, vec![ElementType::Normal], stats(30), vec![]);
        assert!(c.take_damage(100));
        assert_eq!(c.current_hp(), 0);
        // Already fainted; a second hit does not report a new faint.
        assert!(!c.take_damage(10));
    }

    #[test]
    fn heal_is_capped_at_max_hp() {
        let mut c = Combatant::new("Rattata", "rattata", 5, vec![ElementType::Normal], stats(30), vec![])
            .with_hp(20);
        assert_eq!(c.heal(50), 10);
        assert_eq!(c.current_hp(), 30);
    }
}
