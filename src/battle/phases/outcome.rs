use crate::battle::engine::BattleOutcome;
use crate::battle::events::{BattleEvent, EventBus};
use crate::battle::field::Field;

/// Checks whether either side is out of usable combatants. Outcomes are
/// from the player side's perspective; both sides emptying at once is a
/// draw.
pub fn battle_outcome(field: &Field) -> Option<BattleOutcome> {
    let player = field
        .sides
        .iter()
        .position(|s| s.is_player)
        .unwrap_or(0);
    let opponent = 1 - player;

    let player_usable = field.sides[player].has_usable_combatant();
    let opponent_usable = field.sides[opponent].has_usable_combatant();
    match (player_usable, opponent_usable) {
        (false, false) => Some(BattleOutcome::Draw),
        (true, false) => Some(BattleOutcome::Victory),
        (false, true) => Some(BattleOutcome::Defeat),
        (true, true) => None,
    }
}

/// Emits the per-side casualty report that closes out a battle. Reporting
/// only; state is not touched.
pub fn emit_side_reports(field: &Field, bus: &mut EventBus) {
    for (side, state) in field.sides.iter().enumerate() {
        bus.push(BattleEvent::SideReport {
            side,
            fainted: state.fainted_count(),
            total: state.party.len(),
        });
    }
}
