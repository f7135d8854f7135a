use content::{
    combined_effectiveness, AbilityId, ChargeStyle, ContentRepository, EffectTarget, ElementType,
    HazardKind, MoveBlueprint, MoveCategory, MoveEffect, SideCondition, Stat, StatusAilment,
    Terrain, Weather,
};

use crate::battle::events::{ActionFailureReason, BattleEvent, EventBus};
use crate::battle::field::{Field, SlotRef, TerrainState, VolatileStatus, WeatherState};
use crate::battle::rng::BattleRng;
use crate::battle::triggers::{HandlerRegistry, Trigger, TriggerEvent};

/// Default duration of weather, terrain, and side conditions set by a move,
/// in turns.
pub const FIELD_EFFECT_TURNS: u8 = 5;

/// Shared resolution context threaded through every action execution.
pub struct TurnContext<'a> {
    pub content: &'a ContentRepository,
    pub registry: &'a HandlerRegistry,
    pub rng: &'a mut dyn BattleRng,
    pub bus: &'a mut EventBus,
}

/// Category a damage packet is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    Physical,
    Special,
    Indirect,
}

/// Fully computed damage, carried from the point of calculation to the
/// point of application so the amount in the emitted event is exactly the
/// amount applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageContext {
    pub amount: u16,
    pub kind: DamageKind,
    pub is_critical: bool,
    /// Type effectiveness of the originating move, when there was one.
    pub effectiveness: Option<f64>,
    /// Set when the damage came from an entry hazard.
    pub hazard: Option<HazardKind>,
    /// Set when the damage came from a status ailment tick.
    pub status: Option<StatusAilment>,
    pub makes_contact: bool,
    pub move_id: Option<String>,
}

impl DamageContext {
    /// Damage from recoil, items, or other passive sources.
    pub fn indirect(amount: u16) -> Self {
        Self {
            amount,
            kind: DamageKind::Indirect,
            is_critical: false,
            effectiveness: None,
            hazard: None,
            status: None,
            makes_contact: false,
            move_id: None,
        }
    }

    pub fn from_hazard(amount: u16, hazard: HazardKind) -> Self {
        Self {
            hazard: Some(hazard),
            ..Self::indirect(amount)
        }
    }

    pub fn from_status(amount: u16, status: StatusAilment) -> Self {
        Self {
            status: Some(status),
            ..Self::indirect(amount)
        }
    }
}

/// One unit of work in battle resolution.
///
/// Executing an action mutates the field directly and returns the reactions
/// it caused; the queue runs those to completion before the next declared
/// action. Actions are consumed on execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UseMove {
        user: SlotRef,
        target: SlotRef,
        move_id: String,
    },
    Switch {
        side: usize,
        slot: usize,
        party_index: usize,
    },
    Damage {
        source: Option<SlotRef>,
        target: SlotRef,
        context: DamageContext,
    },
    Heal {
        target: SlotRef,
        amount: u16,
    },
    InflictStatus {
        source: Option<SlotRef>,
        target: SlotRef,
        status: StatusAilment,
    },
    ChangeStats {
        source: Option<SlotRef>,
        target: SlotRef,
        changes: Vec<(Stat, i8)>,
    },
    SetWeather {
        weather: Weather,
        turns: u8,
    },
    SetTerrain {
        terrain: Terrain,
        turns: u8,
    },
    PlaceHazard {
        side: usize,
        hazard: HazardKind,
    },
    SetSideCondition {
        side: usize,
        condition: SideCondition,
        turns: u8,
    },
    ApplyVolatile {
        target: SlotRef,
        volatile: VolatileStatus,
    },
    Faint {
        target: SlotRef,
    },
    ConsumeItem {
        target: SlotRef,
    },
    Message {
        text: String,
    },
}

impl Action {
    /// Executes the action against the field and returns the reactions it
    /// produced, in the order they should run.
    pub fn execute(self, field: &mut Field, ctx: &mut TurnContext) -> Vec<Action> {
        match self {
            Action::UseMove {
                user,
                target,
                move_id,
            } => execute_use_move(field, ctx, user, target, &move_id),
            Action::Switch {
                side,
                slot,
                party_index,
            } => execute_switch(field, ctx, side, slot, party_index),
            Action::Damage {
                source,
                target,
                context,
            } => execute_damage(field, ctx, source, target, context),
            Action::Heal { target, amount } => execute_heal(field, ctx, target, amount),
            Action::InflictStatus {
                source: _,
                target,
                status,
            } => execute_inflict_status(field, ctx, target, status),
            Action::ChangeStats {
                source,
                target,
                changes,
            } => execute_change_stats(field, ctx, source, target, &changes),
            Action::SetWeather { weather, turns } => {
                field.weather = Some(WeatherState {
                    kind: weather,
                    turns_remaining: turns,
                });
                ctx.bus.push(BattleEvent::WeatherChanged {
                    weather: Some(weather),
                });
                Vec::new()
            }
            Action::SetTerrain { terrain, turns } => {
                field.terrain = Some(TerrainState {
                    kind: terrain,
                    turns_remaining: turns,
                });
                ctx.bus.push(BattleEvent::TerrainChanged {
                    terrain: Some(terrain),
                });
                Vec::new()
            }
            Action::PlaceHazard { side, hazard } => {
                let layers = field.sides[side].add_hazard_layer(hazard);
                ctx.bus.push(BattleEvent::HazardPlaced {
                    side,
                    hazard,
                    layers,
                });
                Vec::new()
            }
            Action::SetSideCondition {
                side,
                condition,
                turns,
            } => {
                field.sides[side].add_condition(condition, turns);
                ctx.bus
                    .push(BattleEvent::SideConditionApplied { side, condition });
                Vec::new()
            }
            Action::ApplyVolatile { target, volatile } => {
                execute_apply_volatile(field, ctx, target, volatile)
            }
            Action::Faint { target } => {
                let name = field
                    .combatant(target)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                field.slot_mut(target).clear_battle_state();
                ctx.bus.push(BattleEvent::Fainted { target, name });
                Vec::new()
            }
            Action::ConsumeItem { target } => {
                let Some(combatant) = field.combatant_mut(target) else {
                    return Vec::new();
                };
                if let Some(item) = combatant.held_item.take() {
                    ctx.bus.push(BattleEvent::ItemConsumed { target, item });
                }
                Vec::new()
            }
            Action::Message { text } => {
                ctx.bus.push(BattleEvent::Message { text });
                Vec::new()
            }
        }
    }
}

// --- Move execution ---

fn execute_use_move(
    field: &mut Field,
    ctx: &mut TurnContext,
    user: SlotRef,
    target: SlotRef,
    move_id: &str,
) -> Vec<Action> {
    if !field.occupant_alive(user) {
        // The user was knocked out earlier in the turn; the declared action
        // simply evaporates.
        return Vec::new();
    }

    if let Some(reason) = check_prevention(field, ctx, user) {
        ctx.bus.push(BattleEvent::ActionFailed { slot: user, reason });
        return Vec::new();
    }

    if let Some(reactions) = confusion_self_hit(field, ctx, user) {
        return reactions;
    }

    let Some(blueprint) = ctx.content.get_move(move_id).cloned() else {
        ctx.bus.push(BattleEvent::ActionFailed {
            slot: user,
            reason: ActionFailureReason::UnknownMove,
        });
        return Vec::new();
    };

    if blueprint.requires_focus && field.slot(user).hit_while_focusing {
        ctx.bus.push(BattleEvent::ActionFailed {
            slot: user,
            reason: ActionFailureReason::LostFocus,
        });
        return Vec::new();
    }

    let user_name = field
        .combatant(user)
        .map(|c| c.name.clone())
        .unwrap_or_default();
    ctx.bus.push(BattleEvent::MoveUsed {
        user,
        name: user_name.clone(),
        move_name: blueprint.name.clone(),
    });

    // Two-turn moves spend their first use charging; the stored lock makes
    // the second use strike and release.
    if let Some(style) = blueprint.charge {
        let slot = field.slot_mut(user);
        if slot.charging_move.as_deref() != Some(move_id) {
            slot.charging_move = Some(move_id.to_string());
            let text = match style {
                ChargeStyle::Charging => format!("{} is charging up!", user_name),
                ChargeStyle::SemiInvulnerable => {
                    slot.semi_invulnerable = Some(move_id.to_string());
                    format!("{} vanished from sight!", user_name)
                }
            };
            ctx.bus.push(BattleEvent::Message { text });
            return Vec::new();
        }
        slot.charging_move = None;
        slot.semi_invulnerable = None;
    }

    match blueprint.category {
        MoveCategory::Status => execute_status_move(field, ctx, user, target, &blueprint),
        MoveCategory::Physical | MoveCategory::Special => {
            execute_damaging_move(field, ctx, user, target, move_id, &blueprint)
        }
    }
}

/// Sleep, freeze, paralysis, and flinch checks, in that order. Returns the
/// reason the move cannot proceed, or None when it can.
fn check_prevention(
    field: &mut Field,
    ctx: &mut TurnContext,
    user: SlotRef,
) -> Option<ActionFailureReason> {
    let status = field.combatant(user).and_then(|c| c.status.clone());
    match status {
        Some(StatusAilment::Sleep { turns_remaining }) => {
            if turns_remaining == 0 {
                clear_status(field, ctx, user);
            } else if let Some(combatant) = field.combatant_mut(user) {
                combatant.status = Some(StatusAilment::Sleep {
                    turns_remaining: turns_remaining - 1,
                });
                return Some(ActionFailureReason::IsAsleep);
            }
        }
        Some(StatusAilment::Freeze) => {
            if ctx.rng.chance(25) {
                clear_status(field, ctx, user);
            } else {
                return Some(ActionFailureReason::IsFrozen);
            }
        }
        Some(StatusAilment::Paralysis) => {
            if ctx.rng.chance(25) {
                return Some(ActionFailureReason::IsParalyzed);
            }
        }
        _ => {}
    }

    if field.slot(user).volatiles.contains(&VolatileStatus::Flinched) {
        return Some(ActionFailureReason::IsFlinching);
    }
    None
}

/// A confused combatant has a 33% chance of striking itself with a fixed
/// 40-power typeless physical hit instead of moving. Returns the resulting
/// reactions when the self-hit happens.
fn confusion_self_hit(
    field: &mut Field,
    ctx: &mut TurnContext,
    user: SlotRef,
) -> Option<Vec<Action>> {
    if !field.slot(user).volatiles.contains(&VolatileStatus::Confused) {
        return None;
    }
    if !ctx.rng.chance(33) {
        return None;
    }
    let combatant = field.combatant(user)?;
    let attack = combatant.stats.get(Stat::Attack) as f64
        * field.slot(user).stat_stages.multiplier(Stat::Attack);
    let defense = (combatant.stats.get(Stat::Defense) as f64
        * field.slot(user).stat_stages.multiplier(Stat::Defense))
    .max(1.0);
    let level_factor = (2.0 * combatant.level as f64) / 5.0 + 2.0;
    let amount = ((level_factor * 40.0 * (attack / defense)) / 50.0 + 2.0) as u16;
    Some(vec![
        Action::Message {
            text: format!("{} hurt itself in its confusion!", combatant.name),
        },
        Action::Damage {
            source: None,
            target: user,
            context: DamageContext::indirect(amount.max(1)),
        },
    ])
}

fn clear_status(field: &mut Field, ctx: &mut TurnContext, at: SlotRef) {
    if let Some(combatant) = field.combatant_mut(at) {
        if let Some(status) = combatant.status.take() {
            ctx.bus.push(BattleEvent::StatusCleared { target: at, status });
        }
    }
}

fn execute_status_move(
    field: &mut Field,
    ctx: &mut TurnContext,
    user: SlotRef,
    target: SlotRef,
    blueprint: &MoveBlueprint,
) -> Vec<Action> {
    // Target-directed status moves still need someone to aim at; field and
    // side effects do not.
    if effect_needs_target(&blueprint.effect) && !field.occupant_alive(target) {
        ctx.bus.push(BattleEvent::ActionFailed {
            slot: user,
            reason: ActionFailureReason::NoTargetPresent,
        });
        return Vec::new();
    }
    if !accuracy_check(field, ctx, user, target, blueprint) {
        ctx.bus.push(BattleEvent::MoveMissed {
            user,
            move_name: blueprint.name.clone(),
        });
        return Vec::new();
    }
    effect_actions(ctx, &blueprint.effect, user, target)
}

fn execute_damaging_move(
    field: &mut Field,
    ctx: &mut TurnContext,
    user: SlotRef,
    target: SlotRef,
    move_id: &str,
    blueprint: &MoveBlueprint,
) -> Vec<Action> {
    if !field.occupant_alive(target) {
        ctx.bus.push(BattleEvent::ActionFailed {
            slot: user,
            reason: ActionFailureReason::NoTargetPresent,
        });
        return Vec::new();
    }

    if !accuracy_check(field, ctx, user, target, blueprint) {
        ctx.bus.push(BattleEvent::MoveMissed {
            user,
            move_name: blueprint.name.clone(),
        });
        return Vec::new();
    }

    let defender = field.combatant(target).cloned();
    let Some(defender) = defender else {
        return Vec::new();
    };

    let effectiveness = move_effectiveness(field, target, blueprint, &defender.types);
    if effectiveness == 0.0 {
        ctx.bus.push(BattleEvent::AttackEffectiveness {
            target,
            multiplier: 0.0,
        });
        return Vec::new();
    }

    let is_critical = ctx.rng.next(1, 16) == 1;
    let amount = calculate_damage(field, ctx, user, target, blueprint, effectiveness, is_critical);

    let mut reactions = vec![Action::Damage {
        source: Some(user),
        target,
        context: DamageContext {
            amount,
            kind: match blueprint.category {
                MoveCategory::Physical => DamageKind::Physical,
                _ => DamageKind::Special,
            },
            is_critical,
            effectiveness: Some(effectiveness),
            hazard: None,
            status: None,
            makes_contact: blueprint.makes_contact,
            move_id: Some(move_id.to_string()),
        },
    }];

    // Secondary effect rides behind the damage packet so it observes the
    // post-hit field.
    reactions.extend(effect_actions(ctx, &blueprint.effect, user, target));
    reactions
}

fn effect_needs_target(effect: &MoveEffect) -> bool {
    matches!(
        effect,
        MoveEffect::InflictStatus {
            target: EffectTarget::Target,
            ..
        } | MoveEffect::ChangeStats {
            target: EffectTarget::Target,
            ..
        }
    )
}

/// Rolls the effect chance and translates a move effect into actions.
fn effect_actions(
    ctx: &mut TurnContext,
    effect: &MoveEffect,
    user: SlotRef,
    target: SlotRef,
) -> Vec<Action> {
    let resolve = |at: EffectTarget| match at {
        EffectTarget::User => user,
        EffectTarget::Target => target,
    };
    match effect {
        MoveEffect::None => Vec::new(),
        MoveEffect::InflictStatus {
            target: at,
            status,
            chance,
        } => {
            if !ctx.rng.chance(*chance) {
                return Vec::new();
            }
            vec![Action::InflictStatus {
                source: Some(user),
                target: resolve(*at),
                status: status.clone(),
            }]
        }
        MoveEffect::ChangeStats {
            target: at,
            changes,
            chance,
        } => {
            if !ctx.rng.chance(*chance) {
                return Vec::new();
            }
            vec![Action::ChangeStats {
                source: Some(user),
                target: resolve(*at),
                changes: changes.clone(),
            }]
        }
        MoveEffect::SetWeather(weather) => vec![Action::SetWeather {
            weather: *weather,
            turns: FIELD_EFFECT_TURNS,
        }],
        MoveEffect::SetTerrain(terrain) => vec![Action::SetTerrain {
            terrain: *terrain,
            turns: FIELD_EFFECT_TURNS,
        }],
        MoveEffect::SetHazard(hazard) => vec![Action::PlaceHazard {
            side: user.opposing_side(),
            hazard: *hazard,
        }],
        MoveEffect::SetSideCondition(condition) => vec![Action::SetSideCondition {
            side: user.side,
            condition: *condition,
            turns: FIELD_EFFECT_TURNS,
        }],
        MoveEffect::Flinch { chance } => {
            if !ctx.rng.chance(*chance) {
                return Vec::new();
            }
            vec![Action::ApplyVolatile {
                target,
                volatile: VolatileStatus::Flinched,
            }]
        }
        MoveEffect::Confuse { chance } => {
            if !ctx.rng.chance(*chance) {
                return Vec::new();
            }
            vec![Action::ApplyVolatile {
                target,
                volatile: VolatileStatus::Confused,
            }]
        }
        MoveEffect::LeechSeed => vec![Action::ApplyVolatile {
            target,
            volatile: VolatileStatus::LeechSeeded,
        }],
    }
}

fn execute_apply_volatile(
    field: &mut Field,
    ctx: &mut TurnContext,
    target: SlotRef,
    volatile: VolatileStatus,
) -> Vec<Action> {
    if !field.occupant_alive(target) {
        return Vec::new();
    }
    if volatile == VolatileStatus::LeechSeeded {
        let grass = field
            .combatant(target)
            .map_or(false, |c| c.has_type(ElementType::Grass));
        if grass {
            return Vec::new();
        }
    }
    if field.slot_mut(target).volatiles.insert(volatile) {
        if let Some(combatant) = field.combatant(target) {
            // The flinch marker is silent; it only speaks when it prevents
            // a move.
            let text = match volatile {
                VolatileStatus::Confused => Some(format!("{} became confused!", combatant.name)),
                VolatileStatus::LeechSeeded => Some(format!("{} was seeded!", combatant.name)),
                VolatileStatus::Flinched => None,
            };
            if let Some(text) = text {
                ctx.bus.push(BattleEvent::Message { text });
            }
        }
    }
    Vec::new()
}

// --- Damage math ---

fn accuracy_check(
    field: &Field,
    ctx: &mut TurnContext,
    user: SlotRef,
    target: SlotRef,
    blueprint: &MoveBlueprint,
) -> bool {
    // Nothing reaches a combatant that is out of sight mid-charge. Side
    // and field effects do not aim at the vanished slot, so they pass.
    let aims_at_target =
        blueprint.category != MoveCategory::Status || effect_needs_target(&blueprint.effect);
    if aims_at_target
        && field.occupant_alive(target)
        && field.slot(target).semi_invulnerable.is_some()
    {
        return false;
    }
    let Some(base) = blueprint.accuracy else {
        // Moves without an accuracy value never miss.
        return true;
    };
    let acc_stage = field.slot(user).stat_stages.get(Stat::Accuracy);
    let eva_stage = if field.occupant_alive(target) {
        field.slot(target).stat_stages.get(Stat::Evasion)
    } else {
        0
    };
    let net = (acc_stage - eva_stage).clamp(-6, 6);
    let multiplier = if net >= 0 {
        (3.0 + net as f64) / 3.0
    } else {
        3.0 / (3.0 - net as f64)
    };
    let threshold = ((base as f64 * multiplier) as u32).clamp(1, 100);
    ctx.rng.next(1, 100) <= threshold
}

/// Type effectiveness for a move against a defender, including the
/// Levitate ground immunity.
fn move_effectiveness(
    field: &Field,
    target: SlotRef,
    blueprint: &MoveBlueprint,
    defender_types: &[ElementType],
) -> f64 {
    if blueprint.element == ElementType::Ground {
        let levitates = field
            .combatant(target)
            .map_or(false, |c| c.ability == Some(AbilityId::Levitate));
        if levitates {
            return 0.0;
        }
    }
    combined_effectiveness(blueprint.element, defender_types)
}

fn calculate_damage(
    field: &Field,
    ctx: &mut TurnContext,
    user: SlotRef,
    target: SlotRef,
    blueprint: &MoveBlueprint,
    effectiveness: f64,
    is_critical: bool,
) -> u16 {
    let Some(attacker) = field.combatant(user) else {
        return 0;
    };
    let Some(defender) = field.combatant(target) else {
        return 0;
    };

    let (attack_stat, defense_stat) = match blueprint.category {
        MoveCategory::Physical => (Stat::Attack, Stat::Defense),
        _ => (Stat::SpecialAttack, Stat::SpecialDefense),
    };

    // A critical hit ignores stage changes that would soften it.
    let attack_stages = field.slot(user).stat_stages.get(attack_stat);
    let defense_stages = field.slot(target).stat_stages.get(defense_stat);
    let attack_multiplier = if is_critical && attack_stages < 0 {
        1.0
    } else {
        field.slot(user).stat_stages.multiplier(attack_stat)
    };
    let defense_multiplier = if is_critical && defense_stages > 0 {
        1.0
    } else {
        field.slot(target).stat_stages.multiplier(defense_stat)
    };

    let mut attack = attacker.stats.get(attack_stat) as f64 * attack_multiplier;
    let defense = (defender.stats.get(defense_stat) as f64 * defense_multiplier).max(1.0);

    // Burn halves physical output.
    if blueprint.category == MoveCategory::Physical
        && matches!(attacker.status, Some(StatusAilment::Burn))
    {
        attack *= 0.5;
    }

    let level_factor = (2.0 * attacker.level as f64) / 5.0 + 2.0;
    let mut damage =
        (level_factor * blueprint.power as f64 * (attack / defense)) / 50.0 + 2.0;

    if is_critical {
        damage *= 1.5;
    }
    // Same-type attack bonus.
    if attacker.has_type(blueprint.element) {
        damage *= 1.5;
    }
    damage *= effectiveness;
    damage *= weather_modifier(field, blueprint.element);
    // Screens soften the matching category unless the hit is critical.
    if !is_critical {
        let screen = match blueprint.category {
            MoveCategory::Physical => SideCondition::Reflect,
            _ => SideCondition::LightScreen,
        };
        if field.sides[target.side].has_condition(screen) {
            damage *= 0.5;
        }
    }
    // Uniform damage spread.
    damage *= ctx.rng.next(85, 100) as f64 / 100.0;

    (damage as u16).max(1)
}

fn weather_modifier(field: &Field, element: ElementType) -> f64 {
    match field.weather.as_ref().map(|w| w.kind) {
        Some(Weather::Rain) => match element {
            ElementType::Water => 1.5,
            ElementType::Fire => 0.5,
            _ => 1.0,
        },
        Some(Weather::Sun) => match element {
            ElementType::Fire => 1.5,
            ElementType::Water => 0.5,
            _ => 1.0,
        },
        _ => 1.0,
    }
}

// --- Damage application ---

fn execute_damage(
    field: &mut Field,
    ctx: &mut TurnContext,
    source: Option<SlotRef>,
    target: SlotRef,
    context: DamageContext,
) -> Vec<Action> {
    if !field.occupant_alive(target) {
        return Vec::new();
    }

    if context.is_critical {
        ctx.bus.push(BattleEvent::CriticalHit { target });
    }
    if let Some(multiplier) = context.effectiveness {
        if multiplier != 1.0 {
            ctx.bus.push(BattleEvent::AttackEffectiveness { target, multiplier });
        }
    }

    let (fainted, applied, remaining_hp, name) = {
        let combatant = field
            .combatant_mut(target)
            .expect("occupant_alive checked above");
        let applied = context.amount.min(combatant.current_hp());
        let fainted = combatant.take_damage(applied);
        (fainted, applied, combatant.current_hp(), combatant.name.clone())
    };
    record_damage(field, target, &context);
    if context.kind != DamageKind::Indirect {
        field.slot_mut(target).hit_while_focusing = true;
    }

    if let Some(hazard) = context.hazard {
        ctx.bus.push(BattleEvent::HazardDamage {
            target,
            hazard,
            damage: applied,
        });
    } else if let Some(status) = context.status.clone() {
        ctx.bus.push(BattleEvent::StatusDamage {
            target,
            status,
            damage: applied,
            remaining_hp,
        });
    } else {
        ctx.bus.push(BattleEvent::DamageDealt {
            target,
            name,
            amount: applied,
            remaining_hp,
        });
    }

    let mut reactions = Vec::new();
    if fainted {
        reactions.push(Action::Faint { target });
    }

    // Passive responses fire against the post-damage field.
    if !fainted {
        reactions.extend(ctx.registry.dispatch(
            field,
            ctx.rng,
            &TriggerEvent {
                trigger: Trigger::DamageTaken,
                subject: target,
                other: source,
                move_id: context.move_id.clone(),
                damage: applied,
            },
        ));
    }
    if context.makes_contact {
        reactions.extend(ctx.registry.dispatch(
            field,
            ctx.rng,
            &TriggerEvent {
                trigger: Trigger::ContactReceived,
                subject: target,
                other: source,
                move_id: context.move_id.clone(),
                damage: applied,
            },
        ));
    }
    if let (Some(user), Some(move_id)) = (source, context.move_id.as_ref()) {
        if context.kind != DamageKind::Indirect {
            reactions.extend(ctx.registry.dispatch(
                field,
                ctx.rng,
                &TriggerEvent {
                    trigger: Trigger::AfterMove,
                    subject: user,
                    other: Some(target),
                    move_id: Some(move_id.clone()),
                    damage: applied,
                },
            ));
        }
    }
    reactions
}

fn record_damage(field: &mut Field, target: SlotRef, context: &DamageContext) {
    let record = &mut field.slot_mut(target).damage_taken;
    match context.kind {
        DamageKind::Physical => record.physical = record.physical.saturating_add(context.amount),
        DamageKind::Special => record.special = record.special.saturating_add(context.amount),
        DamageKind::Indirect => record.indirect = record.indirect.saturating_add(context.amount),
    }
}

// --- Other executions ---

fn execute_heal(field: &mut Field, ctx: &mut TurnContext, target: SlotRef, amount: u16) -> Vec<Action> {
    if !field.occupant_alive(target) {
        return Vec::new();
    }
    let combatant = field
        .combatant_mut(target)
        .expect("occupant_alive checked above");
    let restored = combatant.heal(amount);
    if restored > 0 {
        let name = combatant.name.clone();
        let new_hp = combatant.current_hp();
        ctx.bus.push(BattleEvent::Healed {
            target,
            name,
            amount: restored,
            new_hp,
        });
    }
    Vec::new()
}

fn execute_inflict_status(
    field: &mut Field,
    ctx: &mut TurnContext,
    target: SlotRef,
    status: StatusAilment,
) -> Vec<Action> {
    if !field.occupant_alive(target) {
        return Vec::new();
    }
    let immune = {
        let combatant = field.combatant(target).expect("checked above");
        combatant.status.is_some() || status_immune(combatant.types.as_slice(), &status)
    };
    if immune {
        return Vec::new();
    }
    let status = match status {
        // Sleep duration is rolled at infliction time.
        StatusAilment::Sleep { .. } => StatusAilment::Sleep {
            turns_remaining: ctx.rng.next(1, 3) as u8,
        },
        other => other,
    };
    let combatant = field.combatant_mut(target).expect("checked above");
    combatant.status = Some(status.clone());
    let name = combatant.name.clone();
    ctx.bus.push(BattleEvent::StatusInflicted {
        target,
        name,
        status,
    });
    Vec::new()
}

fn status_immune(types: &[ElementType], status: &StatusAilment) -> bool {
    match status {
        StatusAilment::Poison | StatusAilment::Toxic { .. } => {
            types.contains(&ElementType::Poison) || types.contains(&ElementType::Steel)
        }
        StatusAilment::Burn => types.contains(&ElementType::Fire),
        StatusAilment::Paralysis => types.contains(&ElementType::Electric),
        StatusAilment::Freeze => types.contains(&ElementType::Ice),
        StatusAilment::Sleep { .. } => false,
    }
}

fn execute_change_stats(
    field: &mut Field,
    ctx: &mut TurnContext,
    source: Option<SlotRef>,
    target: SlotRef,
    changes: &[(Stat, i8)],
) -> Vec<Action> {
    if !field.occupant_alive(target) {
        return Vec::new();
    }
    // Mist shields a side from stat drops forced by the other side.
    let misted = field.sides[target.side].has_condition(SideCondition::Mist)
        && source.map_or(false, |s| s.side != target.side);
    let inverted = field
        .combatant(target)
        .map_or(false, |c| c.ability == Some(AbilityId::Contrary));
    for (stat, requested) in changes {
        let delta = if inverted { -requested } else { *requested };
        if misted && delta < 0 {
            ctx.bus.push(BattleEvent::Message {
                text: "The mist prevents stat reduction!".to_string(),
            });
            continue;
        }
        let applied = field.slot_mut(target).stat_stages.modify(*stat, delta);
        let new_stage = field.slot(target).stat_stages.get(*stat);
        ctx.bus.push(BattleEvent::StatStageChanged {
            target,
            stat: *stat,
            requested: delta,
            applied,
            new_stage,
        });
    }
    Vec::new()
}

// --- Switching ---

fn execute_switch(
    field: &mut Field,
    ctx: &mut TurnContext,
    side_index: usize,
    slot_index: usize,
    party_index: usize,
) -> Vec<Action> {
    let at = SlotRef::new(side_index, slot_index);
    {
        let side = &field.sides[side_index];
        let Some(incoming) = side.party.get(party_index) else {
            return Vec::new();
        };
        if incoming.is_fainted() {
            return Vec::new();
        }
        // A party member already out in another slot cannot be selected
        // again; the request is dropped rather than duplicating it.
        if side.active_party_indices().contains(&party_index)
            && side.slots[slot_index].occupant != Some(party_index)
        {
            log::warn!(
                "dropped switch for side {side_index}: party member {party_index} is already active"
            );
            return Vec::new();
        }
    }

    field.slot_mut(at).set_occupant(party_index);
    let name = field
        .combatant(at)
        .map(|c| c.name.clone())
        .unwrap_or_default();
    ctx.bus.push(BattleEvent::Switched {
        side: side_index,
        slot: slot_index,
        name,
    });

    let mut reactions = entry_hazard_actions(field, ctx, at);
    reactions.extend(ctx.registry.dispatch(
        field,
        ctx.rng,
        &TriggerEvent {
            trigger: Trigger::SwitchIn,
            subject: at,
            other: None,
            move_id: None,
            damage: 0,
        },
    ));
    reactions
}

/// Entry hazard consequences for a combatant that just switched in.
///
/// Hazards resolve in a fixed order: Spikes, Stealth Rock, Toxic Spikes,
/// Sticky Web. The order is observable when an early hazard faints the
/// entrant and the rest never land.
fn entry_hazard_actions(field: &mut Field, ctx: &mut TurnContext, at: SlotRef) -> Vec<Action> {
    let Some(combatant) = field.combatant(at).cloned() else {
        return Vec::new();
    };
    let grounded = !combatant.has_type(ElementType::Flying)
        && combatant.ability != Some(AbilityId::Levitate);
    let max_hp = combatant.max_hp();
    let mut actions = Vec::new();

    if grounded {
        let spike_layers = field.sides[at.side].hazard_layers(HazardKind::Spikes);
        if spike_layers > 0 {
            let divisor = match spike_layers {
                1 => 8,
                2 => 6,
                _ => 4,
            };
            actions.push(Action::Damage {
                source: None,
                target: at,
                context: DamageContext::from_hazard(
                    (max_hp / divisor).max(1),
                    HazardKind::Spikes,
                ),
            });
        }
    }

    if field.sides[at.side].hazard_layers(HazardKind::StealthRock) > 0 {
        let factor = combined_effectiveness(ElementType::Rock, &combatant.types);
        let amount = ((max_hp as f64 / 8.0) * factor) as u16;
        if amount > 0 {
            actions.push(Action::Damage {
                source: None,
                target: at,
                context: DamageContext::from_hazard(amount, HazardKind::StealthRock),
            });
        }
    }

    if grounded {
        let toxic_layers = field.sides[at.side].hazard_layers(HazardKind::ToxicSpikes);
        if toxic_layers > 0 {
            if combatant.has_type(ElementType::Poison) {
                // A grounded poison type soaks the spikes up on entry.
                field.sides[at.side].remove_hazard(HazardKind::ToxicSpikes);
                ctx.bus.push(BattleEvent::HazardRemoved {
                    side: at.side,
                    hazard: HazardKind::ToxicSpikes,
                });
            } else {
                let status = if toxic_layers >= 2 {
                    StatusAilment::Toxic { counter: 1 }
                } else {
                    StatusAilment::Poison
                };
                actions.push(Action::InflictStatus {
                    source: None,
                    target: at,
                    status,
                });
            }
        }

        if field.sides[at.side].hazard_layers(HazardKind::StickyWeb) > 0 {
            actions.push(Action::ChangeStats {
                source: None,
                target: at,
                changes: vec![(Stat::Speed, -1)],
            });
        }
    }

    actions
}
