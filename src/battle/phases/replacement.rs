use std::collections::HashSet;

use crate::battle::actions::{Action, TurnContext};
use crate::battle::field::{Field, SlotRef};
use crate::battle::providers::ActionProvider;
use crate::battle::queue::{BattleQueue, QueueRun};

/// Refills slots left without a living occupant, repeating until entry
/// effects stop knocking the replacements out too.
///
/// Choices are reserved side-locally per round, so two slots fainting at
/// once can never receive the same bench member. A provider fault or an
/// out-of-range pick falls back to the first available member.
pub async fn fill_empty_slots(
    field: &mut Field,
    queue: &mut BattleQueue,
    ctx: &mut TurnContext<'_>,
    providers: &mut [Vec<Box<dyn ActionProvider>>],
) -> QueueRun {
    loop {
        let mut queued_any = false;
        for side in 0..2 {
            let mut reserved: HashSet<usize> = HashSet::new();
            for slot in 0..field.sides[side].slots.len() {
                let at = SlotRef::new(side, slot);
                if field.occupant_alive(at) {
                    continue;
                }
                let available = available_members(field, side, &reserved);
                if available.is_empty() {
                    continue;
                }
                let provider = &mut providers[side][slot];
                let chosen = match provider.choose_replacement(field, at, &available).await {
                    Ok(pick) if available.contains(&pick) => pick,
                    Ok(pick) => {
                        log::warn!(
                            "side {side} chose unavailable replacement {pick}, using first available"
                        );
                        available[0]
                    }
                    Err(err) => {
                        log::warn!("side {side} replacement choice failed ({err}), using first available");
                        available[0]
                    }
                };
                reserved.insert(chosen);
                queue.push_back(Action::Switch {
                    side,
                    slot,
                    party_index: chosen,
                });
                queued_any = true;
            }
        }

        if !queued_any {
            return QueueRun::Drained;
        }
        if queue.run(field, ctx) == QueueRun::CapExceeded {
            return QueueRun::CapExceeded;
        }
    }
}

/// Benched, living, unreserved party members of a side.
fn available_members(field: &Field, side: usize, reserved: &HashSet<usize>) -> Vec<usize> {
    let active = field.sides[side].active_party_indices();
    field.sides[side]
        .party
        .iter()
        .enumerate()
        .filter(|(i, c)| !c.is_fainted() && !active.contains(i) && !reserved.contains(i))
        .map(|(i, _)| i)
        .collect()
}
