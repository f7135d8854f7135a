use content::{ElementType, StatusAilment, Weather};

use crate::battle::actions::{Action, DamageContext, TurnContext};
use crate::battle::events::BattleEvent;
use crate::battle::field::{Field, SlotRef, VolatileStatus};
use crate::battle::triggers::{Trigger, TriggerEvent};

/// Runs the end-of-turn bookkeeping and returns the damage/heal actions it
/// produces, in resolution order: status ticks, leech seed drain, weather
/// decay and chip, terrain decay, side-condition decay, then the end-of-turn
/// passive trigger.
pub fn end_of_turn_actions(field: &mut Field, ctx: &mut TurnContext) -> Vec<Action> {
    let mut actions = Vec::new();

    for at in field.active_slot_refs() {
        actions.extend(status_tick(field, at));
        actions.extend(leech_seed_drain(field, at));
    }

    actions.extend(weather_tick(field, ctx));
    terrain_tick(field, ctx);

    for side in 0..2 {
        for condition in field.sides[side].tick_conditions() {
            ctx.bus
                .push(BattleEvent::SideConditionExpired { side, condition });
        }
    }

    for at in field.active_slot_refs() {
        actions.extend(ctx.registry.dispatch(
            field,
            ctx.rng,
            &TriggerEvent {
                trigger: Trigger::EndOfTurn,
                subject: at,
                other: None,
                move_id: None,
                damage: 0,
            },
        ));
    }

    actions
}

/// Persistent status damage: Poison 1/8, Toxic n/16 with an escalating
/// counter, Burn 1/16.
fn status_tick(field: &mut Field, at: SlotRef) -> Vec<Action> {
    let Some(combatant) = field.combatant_mut(at) else {
        return Vec::new();
    };
    let max_hp = combatant.max_hp();
    let (amount, status) = match combatant.status.clone() {
        Some(StatusAilment::Poison) => ((max_hp / 8).max(1), StatusAilment::Poison),
        Some(StatusAilment::Toxic { counter }) => {
            combatant.status = Some(StatusAilment::Toxic {
                counter: counter.saturating_add(1),
            });
            (
                ((max_hp as u32 * counter as u32 / 16).max(1) as u16),
                StatusAilment::Toxic { counter },
            )
        }
        Some(StatusAilment::Burn) => ((max_hp / 16).max(1), StatusAilment::Burn),
        _ => return Vec::new(),
    };
    vec![Action::Damage {
        source: None,
        target: at,
        context: DamageContext::from_status(amount, status),
    }]
}

/// Leech seed drains 1/8 of the seeded combatant's max HP and feeds the
/// occupant directly across on the opposing side, when one is there to
/// receive it.
fn leech_seed_drain(field: &Field, at: SlotRef) -> Vec<Action> {
    if !field.slot(at).volatiles.contains(&VolatileStatus::LeechSeeded) {
        return Vec::new();
    }
    let Some(combatant) = field.combatant(at) else {
        return Vec::new();
    };
    let amount = (combatant.max_hp() / 8).max(1);
    let mut actions = vec![Action::Damage {
        source: None,
        target: at,
        context: DamageContext::indirect(amount),
    }];
    let drinker = SlotRef::new(at.opposing_side(), at.slot);
    if field.occupant_alive(drinker) {
        actions.push(Action::Heal {
            target: drinker,
            amount,
        });
    }
    actions
}

fn weather_tick(field: &mut Field, ctx: &mut TurnContext) -> Vec<Action> {
    let Some(state) = field.weather.as_mut() else {
        return Vec::new();
    };
    state.turns_remaining = state.turns_remaining.saturating_sub(1);
    if state.turns_remaining == 0 {
        field.weather = None;
        ctx.bus.push(BattleEvent::WeatherChanged { weather: None });
        return Vec::new();
    }

    let kind = state.kind;
    let mut actions = Vec::new();
    for at in field.active_slot_refs() {
        let Some(combatant) = field.combatant(at) else {
            continue;
        };
        let immune = match kind {
            Weather::Sandstorm => {
                combatant.has_type(ElementType::Rock)
                    || combatant.has_type(ElementType::Ground)
                    || combatant.has_type(ElementType::Steel)
            }
            Weather::Hail => combatant.has_type(ElementType::Ice),
            Weather::Rain | Weather::Sun => true,
        };
        if !immune {
            actions.push(Action::Damage {
                source: None,
                target: at,
                context: DamageContext::indirect((combatant.max_hp() / 16).max(1)),
            });
        }
    }
    actions
}

fn terrain_tick(field: &mut Field, ctx: &mut TurnContext) {
    if let Some(state) = field.terrain.as_mut() {
        state.turns_remaining = state.turns_remaining.saturating_sub(1);
        if state.turns_remaining == 0 {
            field.terrain = None;
            ctx.bus.push(BattleEvent::TerrainChanged { terrain: None });
        }
    }
}

/// Drops the transient markers that only live for one turn.
pub fn clear_turn_markers(field: &mut Field) {
    for at in field.all_slot_refs() {
        field.slot_mut(at).clear_turn_markers();
    }
}
