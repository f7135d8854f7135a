use content::Stat;

use crate::battle::actions::{Action, DamageContext, TurnContext};
use crate::battle::engine::BattleOutcome;
use crate::battle::events::{BattleEvent, EventBus};
use crate::battle::field::{Field, Side};
use crate::battle::phases::replacement::fill_empty_slots;
use crate::battle::providers::{ActionProvider, FirstMoveProvider};
use crate::battle::queue::BattleQueue;
use crate::battle::rng::FixedRng;
use crate::battle::tests::common::{
    duel_field, party_field, test_content, duel_engine, TestCombatantBuilder, OPPONENT_SLOT,
    PLAYER_SLOT,
};
use crate::battle::triggers::HandlerRegistry;
use pretty_assertions::assert_eq;

#[test]
fn a_lethal_hit_faints_the_target_and_clears_its_slot_state() {
    let mut field = duel_field(
        TestCombatantBuilder::new("Attacker").build(),
        TestCombatantBuilder::new("Target").hp(100).current_hp(1).build(),
    );
    field
        .slot_mut(OPPONENT_SLOT)
        .stat_stages
        .modify(Stat::Attack, 2);

    let content = test_content();
    let registry = HandlerRegistry::standard();
    let mut rng = FixedRng::new(vec![]).with_fallback(100);
    let mut bus = EventBus::new();
    let mut ctx = TurnContext {
        content: &content,
        registry: &registry,
        rng: &mut rng,
        bus: &mut bus,
    };
    let mut queue = BattleQueue::new();
    queue.push_back(Action::Damage {
        source: Some(PLAYER_SLOT),
        target: OPPONENT_SLOT,
        context: DamageContext::indirect(5),
    });
    queue.run(&mut field, &mut ctx);

    assert!(field.combatant(OPPONENT_SLOT).unwrap().is_fainted());
    assert_eq!(field.slot(OPPONENT_SLOT).stat_stages.get(Stat::Attack), 0);
    assert!(bus
        .events()
        .iter()
        .any(|e| matches!(e, BattleEvent::Fainted { .. })));
    // The event reports the damage actually dealt, not the overkill.
    assert!(bus
        .events()
        .iter()
        .any(|e| matches!(e, BattleEvent::DamageDealt { amount: 1, .. })));
}

#[tokio::test]
async fn a_fainted_slot_is_refilled_from_the_bench() {
    let mut field = party_field(
        vec![TestCombatantBuilder::new("A").build()],
        vec![
            TestCombatantBuilder::new("Down").current_hp(0).build(),
            TestCombatantBuilder::new("Next").build(),
        ],
    );
    let content = test_content();
    let registry = HandlerRegistry::standard();
    let mut rng = FixedRng::new(vec![]).with_fallback(100);
    let mut bus = EventBus::new();
    let mut ctx = TurnContext {
        content: &content,
        registry: &registry,
        rng: &mut rng,
        bus: &mut bus,
    };
    let mut queue = BattleQueue::new();
    let mut providers: Vec<Vec<Box<dyn ActionProvider>>> = vec![
        vec![Box::new(FirstMoveProvider)],
        vec![Box::new(FirstMoveProvider)],
    ];

    fill_empty_slots(&mut field, &mut queue, &mut ctx, &mut providers).await;

    assert_eq!(field.slot(OPPONENT_SLOT).occupant, Some(1));
    assert!(bus
        .events()
        .iter()
        .any(|e| matches!(e, BattleEvent::Switched { side: 1, .. })));
}

#[tokio::test]
async fn simultaneous_faints_never_pick_the_same_replacement() {
    // Side 1 runs two slots; both occupants are down with two on the bench.
    let mut side_a = Side::new(
        vec![
            TestCombatantBuilder::new("A1").build(),
            TestCombatantBuilder::new("A2").build(),
        ],
        2,
        true,
    );
    side_a.slots[0].set_occupant(0);
    side_a.slots[1].set_occupant(1);
    let mut side_b = Side::new(
        vec![
            TestCombatantBuilder::new("Down1").current_hp(0).build(),
            TestCombatantBuilder::new("Down2").current_hp(0).build(),
            TestCombatantBuilder::new("Bench1").build(),
            TestCombatantBuilder::new("Bench2").build(),
        ],
        2,
        false,
    );
    side_b.slots[0].set_occupant(0);
    side_b.slots[1].set_occupant(1);
    let mut field = Field::new([side_a, side_b]);

    let content = test_content();
    let registry = HandlerRegistry::standard();
    let mut rng = FixedRng::new(vec![]).with_fallback(100);
    let mut bus = EventBus::new();
    let mut ctx = TurnContext {
        content: &content,
        registry: &registry,
        rng: &mut rng,
        bus: &mut bus,
    };
    let mut queue = BattleQueue::new();
    let mut providers: Vec<Vec<Box<dyn ActionProvider>>> = vec![
        vec![Box::new(FirstMoveProvider), Box::new(FirstMoveProvider)],
        vec![Box::new(FirstMoveProvider), Box::new(FirstMoveProvider)],
    ];

    fill_empty_slots(&mut field, &mut queue, &mut ctx, &mut providers).await;

    let first = field.sides[1].slots[0].occupant;
    let second = field.sides[1].slots[1].occupant;
    assert!(first.is_some() && second.is_some());
    assert_ne!(first, second);
}

#[tokio::test]
async fn wiping_a_side_with_no_bench_ends_the_battle() {
    let strong = TestCombatantBuilder::new("Strong")
        .attack(200)
        .speed(90)
        .build();
    let frail = TestCombatantBuilder::new("Frail")
        .hp(20)
        .speed(10)
        .build();
    let rng = FixedRng::new(vec![]).with_fallback(100);
    let mut engine = duel_engine(strong, frail, Box::new(rng));

    let result = engine.run_battle().await.unwrap();

    assert_eq!(result.outcome, BattleOutcome::Victory);
    assert_eq!(result.turns_taken, 1);
}

#[test]
fn empty_side_with_no_replacements_stays_empty() {
    // Covered at the field level: a side whose whole party is down reports
    // no usable combatant, which is what ends the battle.
    let side = Side::new(
        vec![TestCombatantBuilder::new("Down").current_hp(0).build()],
        1,
        false,
    );
    assert!(!side.has_usable_combatant());
    assert_eq!(side.fainted_count(), 1);
}
