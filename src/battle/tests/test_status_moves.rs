use content::{ElementType, Stat, StatusAilment, Weather};

use crate::battle::actions::{Action, TurnContext};
use crate::battle::events::{BattleEvent, EventBus};
use crate::battle::field::{Field, VolatileStatus};
use crate::battle::queue::BattleQueue;
use crate::battle::rng::FixedRng;
use crate::battle::tests::common::{
    duel_field, test_content, TestCombatantBuilder, OPPONENT_SLOT, PLAYER_SLOT,
};
use crate::battle::triggers::HandlerRegistry;
use pretty_assertions::assert_eq;

fn use_move(field: &mut Field, move_id: &str, rng_script: Vec<u32>) -> Vec<BattleEvent> {
    let content = test_content();
    let registry = HandlerRegistry::standard();
    let mut rng = FixedRng::new(rng_script).with_fallback(100);
    let mut bus = EventBus::new();
    let mut ctx = TurnContext {
        content: &content,
        registry: &registry,
        rng: &mut rng,
        bus: &mut bus,
    };
    let mut queue = BattleQueue::new();
    queue.push_back(Action::UseMove {
        user: PLAYER_SLOT,
        target: OPPONENT_SLOT,
        move_id: move_id.to_string(),
    });
    queue.run(field, &mut ctx);
    bus.events().to_vec()
}

#[test]
fn growl_lowers_the_target_attack_one_stage() {
    let mut field = duel_field(
        TestCombatantBuilder::new("User").moves(vec!["growl"]).build(),
        TestCombatantBuilder::new("Target").build(),
    );

    let events = use_move(&mut field, "growl", vec![]);

    assert_eq!(field.slot(OPPONENT_SLOT).stat_stages.get(Stat::Attack), -1);
    assert!(events.iter().any(|e| matches!(
        e,
        BattleEvent::StatStageChanged {
            stat: Stat::Attack,
            requested: -1,
            applied: -1,
            new_stage: -1,
            ..
        }
    )));
}

#[test]
fn stage_drops_truncate_at_minus_six() {
    let mut field = duel_field(
        TestCombatantBuilder::new("User").moves(vec!["growl"]).build(),
        TestCombatantBuilder::new("Target").build(),
    );
    field
        .slot_mut(OPPONENT_SLOT)
        .stat_stages
        .modify(Stat::Attack, -6);

    let events = use_move(&mut field, "growl", vec![]);

    assert_eq!(field.slot(OPPONENT_SLOT).stat_stages.get(Stat::Attack), -6);
    assert!(events.iter().any(|e| matches!(
        e,
        BattleEvent::StatStageChanged {
            requested: -1,
            applied: 0,
            new_stage: -6,
            ..
        }
    )));
}

#[test]
fn confuse_ray_applies_the_confusion_volatile() {
    let mut field = duel_field(
        TestCombatantBuilder::new("User").build(),
        TestCombatantBuilder::new("Target").build(),
    );

    use_move(&mut field, "confuse-ray", vec![]);

    assert!(field
        .slot(OPPONENT_SLOT)
        .volatiles
        .contains(&VolatileStatus::Confused));
}

#[test]
fn a_confused_combatant_can_hurt_itself_instead_of_moving() {
    let mut field = duel_field(
        TestCombatantBuilder::new("Confused").build(),
        TestCombatantBuilder::new("Target").hp(300).build(),
    );
    field
        .slot_mut(PLAYER_SLOT)
        .volatiles
        .insert(VolatileStatus::Confused);

    // Confusion roll 1 <= 33: the self-hit happens.
    let events = use_move(&mut field, "tackle", vec![1]);

    // Fixed 40-power self-hit with flat 50/50 stats at level 50: 19 damage.
    assert_eq!(field.combatant(PLAYER_SLOT).unwrap().current_hp(), 81);
    assert_eq!(field.combatant(OPPONENT_SLOT).unwrap().current_hp(), 300);
    assert!(!events
        .iter()
        .any(|e| matches!(e, BattleEvent::MoveUsed { .. })));
}

#[test]
fn a_confused_combatant_moves_through_on_a_good_roll() {
    let mut field = duel_field(
        TestCombatantBuilder::new("Confused").build(),
        TestCombatantBuilder::new("Target").hp(300).build(),
    );
    field
        .slot_mut(PLAYER_SLOT)
        .volatiles
        .insert(VolatileStatus::Confused);

    let events = use_move(&mut field, "tackle", vec![34]);

    assert!(events.iter().any(|e| matches!(e, BattleEvent::MoveUsed { .. })));
    assert!(field.combatant(OPPONENT_SLOT).unwrap().current_hp() < 300);
}

#[test]
fn leech_seed_plants_on_the_target_but_not_on_grass_types() {
    let mut field = duel_field(
        TestCombatantBuilder::new("Seeder").build(),
        TestCombatantBuilder::new("Target").build(),
    );
    use_move(&mut field, "leech-seed", vec![]);
    assert!(field
        .slot(OPPONENT_SLOT)
        .volatiles
        .contains(&VolatileStatus::LeechSeeded));

    let mut field = duel_field(
        TestCombatantBuilder::new("Seeder").build(),
        TestCombatantBuilder::new("Lawn")
            .types(vec![ElementType::Grass])
            .build(),
    );
    use_move(&mut field, "leech-seed", vec![]);
    assert!(!field
        .slot(OPPONENT_SLOT)
        .volatiles
        .contains(&VolatileStatus::LeechSeeded));
}

#[test]
fn headbutt_can_flinch_the_target() {
    let mut field = duel_field(
        TestCombatantBuilder::new("User").build(),
        TestCombatantBuilder::new("Target").hp(300).build(),
    );

    // accuracy, crit, spread, then the 30% flinch roll.
    use_move(&mut field, "headbutt", vec![100, 16, 100, 30]);

    assert!(field
        .slot(OPPONENT_SLOT)
        .volatiles
        .contains(&VolatileStatus::Flinched));
}

#[test]
fn ember_can_burn_but_never_burns_a_fire_type() {
    let mut field = duel_field(
        TestCombatantBuilder::new("User").moves(vec!["ember"]).build(),
        TestCombatantBuilder::new("Target").hp(300).build(),
    );
    // accuracy, crit, spread, then the 10% burn roll.
    use_move(&mut field, "ember", vec![100, 16, 100, 10]);
    assert_eq!(
        field.combatant(OPPONENT_SLOT).unwrap().status,
        Some(StatusAilment::Burn)
    );

    let mut field = duel_field(
        TestCombatantBuilder::new("User").moves(vec!["ember"]).build(),
        TestCombatantBuilder::new("Salamander")
            .types(vec![ElementType::Fire])
            .hp(300)
            .build(),
    );
    use_move(&mut field, "ember", vec![100, 16, 100, 10]);
    assert_eq!(field.combatant(OPPONENT_SLOT).unwrap().status, None);
}

#[test]
fn rain_dance_changes_the_weather() {
    let mut field = duel_field(
        TestCombatantBuilder::new("Dancer").build(),
        TestCombatantBuilder::new("Other").build(),
    );

    let events = use_move(&mut field, "rain-dance", vec![]);

    assert_eq!(field.weather.as_ref().map(|w| w.kind), Some(Weather::Rain));
    assert!(events.iter().any(|e| matches!(
        e,
        BattleEvent::WeatherChanged {
            weather: Some(Weather::Rain)
        }
    )));
}
