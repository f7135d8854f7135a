use std::collections::HashSet;

use content::ContentRepository;

use crate::battle::field::Field;
use crate::battle::order::{ActionChoice, DeclaredAction};
use crate::battle::providers::{default_target, ActionProvider};

/// Polls every occupied slot's provider for its choice this turn.
///
/// A slot mid-way through a two-turn move is not polled at all; it is
/// locked into releasing the stored move. Two slots on the same side asking
/// to switch to the same bench member is resolved here: the later request
/// is re-pointed to another available member, or dropped when none exists.
/// A provider error skips that slot for the turn; the rest of the battle
/// proceeds.
pub async fn collect_actions(
    field: &Field,
    content: &ContentRepository,
    providers: &mut [Vec<Box<dyn ActionProvider>>],
) -> Vec<DeclaredAction> {
    let mut declared = Vec::new();
    let mut reserved: [HashSet<usize>; 2] = [HashSet::new(), HashSet::new()];

    for at in field.active_slot_refs() {
        if let Some(move_id) = field.slot(at).charging_move.clone() {
            if let Some(target) = default_target(field, at) {
                declared.push(DeclaredAction {
                    actor: at,
                    choice: ActionChoice::Move { move_id, target },
                });
            }
            continue;
        }

        let provider = &mut providers[at.side][at.slot];
        let choice = match provider.choose_action(field, content, at).await {
            Ok(choice) => choice,
            Err(err) => {
                log::warn!(
                    "provider for side {} failed on slot {}: {err}",
                    at.side,
                    at.slot
                );
                continue;
            }
        };

        let choice = match choice {
            ActionChoice::Switch { party_index } => {
                let taken = reserved[at.side].contains(&party_index)
                    || field.sides[at.side].active_party_indices().contains(&party_index);
                if taken {
                    match alternative_bench_member(field, at.side, &reserved[at.side]) {
                        Some(alternative) => {
                            log::debug!(
                                "side {} slot {}: switch target {party_index} taken, re-pointing to {alternative}",
                                at.side,
                                at.slot
                            );
                            ActionChoice::Switch {
                                party_index: alternative,
                            }
                        }
                        None => {
                            log::warn!(
                                "side {} slot {}: no bench member available, dropping switch",
                                at.side,
                                at.slot
                            );
                            continue;
                        }
                    }
                } else {
                    ActionChoice::Switch { party_index }
                }
            }
            other => other,
        };

        if let ActionChoice::Switch { party_index } = &choice {
            reserved[at.side].insert(*party_index);
        }
        declared.push(DeclaredAction { actor: at, choice });
    }
    declared
}

fn alternative_bench_member(
    field: &Field,
    side: usize,
    reserved: &HashSet<usize>,
) -> Option<usize> {
    let active = field.sides[side].active_party_indices();
    field.sides[side]
        .party
        .iter()
        .enumerate()
        .find(|(i, c)| !c.is_fainted() && !active.contains(i) && !reserved.contains(i))
        .map(|(i, _)| i)
}
