use std::collections::HashMap;

use content::{AbilityId, ItemId, Stat, StatusAilment};

use crate::battle::actions::{Action, DamageContext};
use crate::battle::field::{Field, SlotRef};
use crate::battle::rng::BattleRng;

/// Named hooks at which passive ability/item effects may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    SwitchIn,
    DamageTaken,
    AfterMove,
    ContactReceived,
    EndOfTurn,
}

/// Context handed to handlers when a trigger fires.
///
/// `subject` is the slot whose ability/item is being considered; `other` is
/// the counterparty when one exists (the attacker for ContactReceived, the
/// move target for AfterMove).
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    pub trigger: Trigger,
    pub subject: SlotRef,
    pub other: Option<SlotRef>,
    pub move_id: Option<String>,
    pub damage: u16,
}

pub type HandlerPredicate = fn(&Field, &TriggerEvent) -> bool;
pub type HandlerEffect = fn(&Field, &mut dyn BattleRng, &TriggerEvent) -> Vec<Action>;

/// One passive effect: fires when its predicate holds for a trigger event.
pub struct Handler {
    pub name: &'static str,
    pub predicate: HandlerPredicate,
    pub effect: HandlerEffect,
}

/// Static mapping from trigger kind to an ordered list of handlers,
/// registered once at startup. No runtime reflection; dispatch is a linear
/// scan over plain function pointers.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<Trigger, Vec<Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, trigger: Trigger, handler: Handler) {
        self.handlers.entry(trigger).or_default().push(handler);
    }

    /// Runs every matching handler in registration order and concatenates
    /// the reaction actions they produce.
    pub fn dispatch(
        &self,
        field: &Field,
        rng: &mut dyn BattleRng,
        event: &TriggerEvent,
    ) -> Vec<Action> {
        let mut reactions = Vec::new();
        if let Some(handlers) = self.handlers.get(&event.trigger) {
            for handler in handlers {
                if (handler.predicate)(field, event) {
                    log::debug!("trigger handler fired: {}", handler.name);
                    reactions.extend((handler.effect)(field, rng, event));
                }
            }
        }
        reactions
    }

    /// The standard ability/item handler set.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(
            Trigger::SwitchIn,
            Handler {
                name: "intimidate",
                predicate: has_ability(AbilityId::Intimidate),
                effect: intimidate_effect,
            },
        );

        registry.register(
            Trigger::ContactReceived,
            Handler {
                name: "rough-skin",
                predicate: has_ability(AbilityId::RoughSkin),
                effect: rough_skin_effect,
            },
        );
        registry.register(
            Trigger::ContactReceived,
            Handler {
                name: "rocky-helmet",
                predicate: has_item(ItemId::RockyHelmet),
                effect: rocky_helmet_effect,
            },
        );
        registry.register(
            Trigger::ContactReceived,
            Handler {
                name: "static",
                predicate: has_ability(AbilityId::Static),
                effect: static_effect,
            },
        );

        registry.register(
            Trigger::DamageTaken,
            Handler {
                name: "sitrus-berry",
                predicate: sitrus_berry_ready,
                effect: sitrus_berry_effect,
            },
        );

        registry.register(
            Trigger::AfterMove,
            Handler {
                name: "shell-bell",
                predicate: shell_bell_ready,
                effect: shell_bell_effect,
            },
        );

        registry.register(
            Trigger::EndOfTurn,
            Handler {
                name: "leftovers",
                predicate: leftovers_ready,
                effect: leftovers_effect,
            },
        );

        registry
    }
}

// --- Predicate helpers ---

fn has_ability(ability: AbilityId) -> HandlerPredicate {
    // fn pointers cannot capture, so each ability gets a monomorphic check.
    match ability {
        AbilityId::Intimidate => |field, event| subject_ability(field, event) == Some(AbilityId::Intimidate),
        AbilityId::Static => |field, event| subject_ability(field, event) == Some(AbilityId::Static),
        AbilityId::RoughSkin => |field, event| subject_ability(field, event) == Some(AbilityId::RoughSkin),
        AbilityId::Levitate => |field, event| subject_ability(field, event) == Some(AbilityId::Levitate),
        AbilityId::Contrary => |field, event| subject_ability(field, event) == Some(AbilityId::Contrary),
        AbilityId::SwiftSwim => |field, event| subject_ability(field, event) == Some(AbilityId::SwiftSwim),
        AbilityId::Chlorophyll => |field, event| subject_ability(field, event) == Some(AbilityId::Chlorophyll),
    }
}

fn has_item(item: ItemId) -> HandlerPredicate {
    match item {
        ItemId::RockyHelmet => |field, event| subject_item(field, event) == Some(ItemId::RockyHelmet),
        ItemId::ChoiceScarf => |field, event| subject_item(field, event) == Some(ItemId::ChoiceScarf),
        ItemId::Leftovers => |field, event| subject_item(field, event) == Some(ItemId::Leftovers),
        ItemId::SitrusBerry => |field, event| subject_item(field, event) == Some(ItemId::SitrusBerry),
        ItemId::ShellBell => |field, event| subject_item(field, event) == Some(ItemId::ShellBell),
    }
}

fn subject_ability(field: &Field, event: &TriggerEvent) -> Option<AbilityId> {
    field.combatant(event.subject).and_then(|c| c.ability)
}

fn subject_item(field: &Field, event: &TriggerEvent) -> Option<ItemId> {
    field.combatant(event.subject).and_then(|c| c.held_item)
}

fn attacker_alive(field: &Field, event: &TriggerEvent) -> Option<SlotRef> {
    event.other.filter(|at| field.occupant_alive(*at))
}

// --- Effects ---

/// Lowers the attack of every living opposing occupant by one stage.
fn intimidate_effect(field: &Field, _rng: &mut dyn BattleRng, event: &TriggerEvent) -> Vec<Action> {
    let opposing = event.subject.opposing_side();
    field
        .active_slot_refs()
        .into_iter()
        .filter(|r| r.side == opposing)
        .map(|target| Action::ChangeStats {
            source: Some(event.subject),
            target,
            changes: vec![(Stat::Attack, -1)],
        })
        .collect()
}

/// Contact recoil: the attacker loses 1/8 of its own max HP, minimum 1.
fn rough_skin_effect(field: &Field, _rng: &mut dyn BattleRng, event: &TriggerEvent) -> Vec<Action> {
    contact_recoil(field, event, 8)
}

/// Contact recoil: the attacker loses 1/6 of its own max HP, minimum 1.
fn rocky_helmet_effect(
    field: &Field,
    _rng: &mut dyn BattleRng,
    event: &TriggerEvent,
) -> Vec<Action> {
    contact_recoil(field, event, 6)
}

fn contact_recoil(field: &Field, event: &TriggerEvent, denominator: u16) -> Vec<Action> {
    let Some(attacker) = attacker_alive(field, event) else {
        return Vec::new();
    };
    let Some(combatant) = field.combatant(attacker) else {
        return Vec::new();
    };
    let amount = (combatant.max_hp() / denominator).max(1);
    vec![Action::Damage {
        source: Some(event.subject),
        target: attacker,
        context: DamageContext::indirect(amount),
    }]
}

/// 30% chance to paralyze an attacker that made contact. The roll is local
/// and independent of the damage rolls.
fn static_effect(field: &Field, rng: &mut dyn BattleRng, event: &TriggerEvent) -> Vec<Action> {
    let Some(attacker) = attacker_alive(field, event) else {
        return Vec::new();
    };
    if !rng.chance(30) {
        return Vec::new();
    }
    vec![Action::InflictStatus {
        source: Some(event.subject),
        target: attacker,
        status: StatusAilment::Paralysis,
    }]
}

fn sitrus_berry_ready(field: &Field, event: &TriggerEvent) -> bool {
    if subject_item(field, event) != Some(ItemId::SitrusBerry) {
        return false;
    }
    field
        .combatant(event.subject)
        .map_or(false, |c| !c.is_fainted() && c.current_hp() <= c.max_hp() / 2)
}

/// Consumes the berry and restores a quarter of max HP.
fn sitrus_berry_effect(
    field: &Field,
    _rng: &mut dyn BattleRng,
    event: &TriggerEvent,
) -> Vec<Action> {
    let Some(combatant) = field.combatant(event.subject) else {
        return Vec::new();
    };
    vec![
        Action::ConsumeItem {
            target: event.subject,
        },
        Action::Heal {
            target: event.subject,
            amount: (combatant.max_hp() / 4).max(1),
        },
    ]
}

fn shell_bell_ready(field: &Field, event: &TriggerEvent) -> bool {
    if subject_item(field, event) != Some(ItemId::ShellBell) || event.damage == 0 {
        return false;
    }
    field
        .combatant(event.subject)
        .map_or(false, |c| !c.is_fainted() && c.current_hp() < c.max_hp())
}

/// Restores 1/8 of the damage the holder just dealt, minimum 1.
fn shell_bell_effect(_field: &Field, _rng: &mut dyn BattleRng, event: &TriggerEvent) -> Vec<Action> {
    vec![Action::Heal {
        target: event.subject,
        amount: (event.damage / 8).max(1),
    }]
}

fn leftovers_ready(field: &Field, event: &TriggerEvent) -> bool {
    if subject_item(field, event) != Some(ItemId::Leftovers) {
        return false;
    }
    field
        .combatant(event.subject)
        .map_or(false, |c| !c.is_fainted() && c.current_hp() < c.max_hp())
}

fn leftovers_effect(field: &Field, _rng: &mut dyn BattleRng, event: &TriggerEvent) -> Vec<Action> {
    let Some(combatant) = field.combatant(event.subject) else {
        return Vec::new();
    };
    vec![Action::Heal {
        target: event.subject,
        amount: (combatant.max_hp() / 16).max(1),
    }]
}
