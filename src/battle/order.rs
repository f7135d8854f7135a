use content::{AbilityId, ContentRepository, ItemId, SideCondition, Stat, StatusAilment, Weather};

use crate::battle::actions::Action;
use crate::battle::field::{Field, SlotRef};
use crate::battle::rng::BattleRng;

/// What a slot's controller chose to do this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionChoice {
    Move { move_id: String, target: SlotRef },
    Switch { party_index: usize },
}

/// A choice bound to the slot that made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredAction {
    pub actor: SlotRef,
    pub choice: ActionChoice,
}

impl DeclaredAction {
    pub fn into_action(self) -> Action {
        match self.choice {
            ActionChoice::Move { move_id, target } => Action::UseMove {
                user: self.actor,
                target,
                move_id,
            },
            ActionChoice::Switch { party_index } => Action::Switch {
                side: self.actor.side,
                slot: self.actor.slot,
                party_index,
            },
        }
    }
}

/// Switches always resolve before any move.
const SWITCH_BRACKET: i8 = 6;

/// Effective speed of a slot's occupant: base speed through stage
/// multipliers, then item, weather ability, side condition, and paralysis
/// modifiers.
pub fn effective_speed(field: &Field, at: SlotRef) -> u32 {
    let Some(combatant) = field.combatant(at) else {
        return 0;
    };
    let mut speed =
        combatant.stats.get(Stat::Speed) as f64 * field.slot(at).stat_stages.multiplier(Stat::Speed);

    if combatant.held_item == Some(ItemId::ChoiceScarf) {
        speed *= 1.5;
    }
    match (combatant.ability, field.weather.as_ref().map(|w| w.kind)) {
        (Some(AbilityId::SwiftSwim), Some(Weather::Rain)) => speed *= 2.0,
        (Some(AbilityId::Chlorophyll), Some(Weather::Sun)) => speed *= 2.0,
        _ => {}
    }
    if field.sides[at.side].has_condition(SideCondition::Tailwind) {
        speed *= 2.0;
    }
    if matches!(combatant.status, Some(StatusAilment::Paralysis)) {
        speed *= 0.25;
    }
    speed as u32
}

/// Sorts declared actions into execution order.
///
/// Higher priority bracket first; within a bracket, higher effective speed
/// first; exact ties are broken by a coin flip per adjacent tied pair, so
/// the relative order of tied actions is random but the sort around them is
/// stable.
pub fn resolve_turn_order(
    field: &Field,
    content: &ContentRepository,
    declared: Vec<DeclaredAction>,
    rng: &mut dyn BattleRng,
) -> Vec<DeclaredAction> {
    let mut keyed: Vec<(i8, u32, DeclaredAction)> = declared
        .into_iter()
        .map(|d| {
            let bracket = match &d.choice {
                ActionChoice::Switch { .. } => SWITCH_BRACKET,
                ActionChoice::Move { move_id, .. } => content
                    .get_move(move_id)
                    .map(|m| m.priority)
                    .unwrap_or(0),
            };
            let speed = effective_speed(field, d.actor);
            (bracket, speed, d)
        })
        .collect();

    // Stable sort keeps declaration order within exact ties, which the
    // coin-flip pass below then randomizes.
    keyed.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut i = 0;
    while i + 1 < keyed.len() {
        if keyed[i].0 == keyed[i + 1].0 && keyed[i].1 == keyed[i + 1].1 && rng.chance(50) {
            keyed.swap(i, i + 1);
        }
        i += 1;
    }

    keyed.into_iter().map(|(_, _, d)| d).collect()
}
