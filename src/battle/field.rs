use std::collections::{HashMap, HashSet};

use content::{HazardKind, SideCondition, Stat, Terrain, Weather};
use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;

/// Address of one active combat position: side index plus slot index.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub side: usize,
    pub slot: usize,
}

impl SlotRef {
    pub fn new(side: usize, slot: usize) -> Self {
        Self { side, slot }
    }

    /// The opposing side's index. Exactly two sides always exist.
    pub fn opposing_side(&self) -> usize {
        1 - self.side
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeatherState {
    pub kind: Weather,
    pub turns_remaining: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TerrainState {
    pub kind: Terrain,
    pub turns_remaining: u8,
}

/// Duration tracking for a side condition.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionState {
    pub turns_remaining: u8,
}

/// Battle-scoped statuses cleared when the occupant leaves the slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolatileStatus {
    Confused,
    Flinched,
    LeechSeeded,
}

/// Per-stat stage modifiers, clamped to [-6, +6].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StatStages {
    stages: HashMap<Stat, i8>,
}

impl StatStages {
    pub fn get(&self, stat: Stat) -> i8 {
        self.stages.get(&stat).copied().unwrap_or(0)
    }

    /// Applies a delta and returns the truncated delta actually applied.
    ///
    /// At +6, a request of +3 applies 0; at +5 it applies +1.
    pub fn modify(&mut self, stat: Stat, delta: i8) -> i8 {
        let current = self.get(stat);
        let new_stage = (current + delta).clamp(-6, 6);
        self.stages.insert(stat, new_stage);
        new_stage - current
    }

    /// Multiplier for regular stats: (2+s)/2 going up, 2/(2+|s|) going down.
    pub fn multiplier(&self, stat: Stat) -> f64 {
        let stage = self.get(stat);
        if stage >= 0 {
            (2.0 + stage as f64) / 2.0
        } else {
            2.0 / (2.0 + (-stage) as f64)
        }
    }

    pub fn reset(&mut self) {
        self.stages.clear();
    }
}

/// Damage taken this turn, split by category, for effects that care about
/// what kind of hit landed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageRecord {
    pub physical: u16,
    pub special: u16,
    pub indirect: u16,
}

impl DamageRecord {
    pub fn total(&self) -> u16 {
        self.physical
            .saturating_add(self.special)
            .saturating_add(self.indirect)
    }

    pub fn reset(&mut self) {
        *self = DamageRecord::default();
    }
}

/// One active combat position on a side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Slot {
    pub index: usize,
    /// Index into the side's party; None while the slot is empty.
    pub occupant: Option<usize>,
    pub stat_stages: StatStages,
    pub volatiles: HashSet<VolatileStatus>,
    pub damage_taken: DamageRecord,
    /// Move id the occupant is locked into across a two-turn move.
    pub charging_move: Option<String>,
    /// Move id that took the occupant out of reach of incoming attacks.
    pub semi_invulnerable: Option<String>,
    /// Set when the occupant takes a direct hit; focus moves check it.
    pub hit_while_focusing: bool,
}

impl Slot {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            occupant: None,
            stat_stages: StatStages::default(),
            volatiles: HashSet::new(),
            damage_taken: DamageRecord::default(),
            charging_move: None,
            semi_invulnerable: None,
            hit_while_focusing: false,
        }
    }

    /// Places a party member in the slot, resetting all battle-scoped state.
    pub fn set_occupant(&mut self, party_index: usize) {
        self.occupant = Some(party_index);
        self.stat_stages.reset();
        self.volatiles.clear();
        self.charging_move = None;
        self.semi_invulnerable = None;
        self.clear_turn_markers();
    }

    /// Clears the transient per-turn markers at end of turn. Charging and
    /// semi-invulnerable locks survive here because they span into the next
    /// turn.
    pub fn clear_turn_markers(&mut self) {
        self.volatiles.remove(&VolatileStatus::Flinched);
        self.damage_taken.reset();
        self.hit_while_focusing = false;
    }

    /// Wipes all battle-scoped state when the occupant faints.
    pub fn clear_battle_state(&mut self) {
        self.stat_stages.reset();
        self.volatiles.clear();
        self.charging_move = None;
        self.semi_invulnerable = None;
        self.clear_turn_markers();
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// One team: active slots plus the backing party roster.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Side {
    pub slots: Vec<Slot>,
    pub party: Vec<Combatant>,
    pub conditions: HashMap<SideCondition, ConditionState>,
    pub hazards: HashMap<HazardKind, u8>,
    pub is_player: bool,
}

impl Side {
    pub fn new(party: Vec<Combatant>, slot_count: usize, is_player: bool) -> Self {
        Self {
            slots: (0..slot_count).map(Slot::new).collect(),
            party,
            conditions: HashMap::new(),
            hazards: HashMap::new(),
            is_player,
        }
    }

    pub fn hazard_layers(&self, kind: HazardKind) -> u8 {
        self.hazards.get(&kind).copied().unwrap_or(0)
    }

    /// Adds one layer of a hazard, bounded per kind, and returns the
    /// resulting layer count.
    pub fn add_hazard_layer(&mut self, kind: HazardKind) -> u8 {
        let layers = self.hazards.entry(kind).or_insert(0);
        *layers = (*layers + 1).min(kind.max_layers());
        *layers
    }

    pub fn remove_hazard(&mut self, kind: HazardKind) {
        self.hazards.remove(&kind);
    }

    pub fn add_condition(&mut self, condition: SideCondition, turns: u8) {
        self.conditions
            .insert(condition, ConditionState { turns_remaining: turns });
    }

    pub fn has_condition(&self, condition: SideCondition) -> bool {
        self.conditions.contains_key(&condition)
    }

    /// Decrements condition durations and returns the ones that expired.
    pub fn tick_conditions(&mut self) -> Vec<SideCondition> {
        let mut expired = Vec::new();
        for (condition, state) in self.conditions.iter_mut() {
            state.turns_remaining = state.turns_remaining.saturating_sub(1);
            if state.turns_remaining == 0 {
                expired.push(*condition);
            }
        }
        for condition in &expired {
            self.conditions.remove(condition);
        }
        expired
    }

    /// Party indices currently occupying a slot.
    pub fn active_party_indices(&self) -> HashSet<usize> {
        self.slots.iter().filter_map(|s| s.occupant).collect()
    }

    /// True if any non-fainted combatant remains, active or benched.
    pub fn has_usable_combatant(&self) -> bool {
        self.party.iter().any(|c| !c.is_fainted())
    }

    pub fn fainted_count(&self) -> usize {
        self.party.iter().filter(|c| c.is_fainted()).count()
    }
}

/// The whole mutable battle state: two sides plus shared field effects.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Field {
    pub sides: [Side; 2],
    pub weather: Option<WeatherState>,
    pub terrain: Option<TerrainState>,
    pub turn_number: u32,
}

impl Field {
    pub fn new(sides: [Side; 2]) -> Self {
        Self {
            sides,
            weather: None,
            terrain: None,
            turn_number: 0,
        }
    }

    pub fn slot(&self, at: SlotRef) -> &Slot {
        &self.sides[at.side].slots[at.slot]
    }

    pub fn slot_mut(&mut self, at: SlotRef) -> &mut Slot {
        &mut self.sides[at.side].slots[at.slot]
    }

    /// The combatant occupying a slot, if any.
    pub fn combatant(&self, at: SlotRef) -> Option<&Combatant> {
        let side = &self.sides[at.side];
        side.slots[at.slot]
            .occupant
            .and_then(|i| side.party.get(i))
    }

    pub fn combatant_mut(&mut self, at: SlotRef) -> Option<&mut Combatant> {
        let side = &mut self.sides[at.side];
        side.slots[at.slot]
            .occupant
            .and_then(|i| side.party.get_mut(i))
    }

    /// True when the slot holds a non-fainted occupant.
    pub fn occupant_alive(&self, at: SlotRef) -> bool {
        self.combatant(at).map_or(false, |c| !c.is_fainted())
    }

    /// All slot references, occupied or not, in side-then-slot order.
    pub fn all_slot_refs(&self) -> Vec<SlotRef> {
        (0..2)
            .flat_map(|side| {
                (0..self.sides[side].slots.len()).map(move |slot| SlotRef::new(side, slot))
            })
            .collect()
    }

    /// Slot references with a living occupant, in side-then-slot order.
    pub fn active_slot_refs(&self) -> Vec<SlotRef> {
        self.all_slot_refs()
            .into_iter()
            .filter(|r| self.occupant_alive(*r))
            .collect()
    }

    /// Sum of current HP across every combatant on both sides, used by the
    /// stagnation guard.
    pub fn total_hp(&self) -> u64 {
        self.sides
            .iter()
            .flat_map(|s| s.party.iter())
            .map(|c| c.current_hp() as u64)
            .sum()
    }
}
