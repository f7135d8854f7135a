use std::collections::VecDeque;

use async_trait::async_trait;
use content::ContentRepository;

use crate::battle::field::{Field, SlotRef};
use crate::battle::order::ActionChoice;
use crate::errors::ProviderError;

/// Source of decisions for one side of the battle.
///
/// Providers are polled once per occupied slot at the start of a turn, and
/// again whenever a faint opens a slot that the side can refill. They see
/// the field read-only; the engine validates and applies whatever they
/// return.
#[async_trait]
pub trait ActionProvider: Send {
    /// Chooses what the occupant of `actor` does this turn.
    async fn choose_action(
        &mut self,
        field: &Field,
        content: &ContentRepository,
        actor: SlotRef,
    ) -> Result<ActionChoice, ProviderError>;

    /// Chooses which benched party member fills an empty slot.
    /// `available` is never empty and holds valid party indices.
    async fn choose_replacement(
        &mut self,
        field: &Field,
        at: SlotRef,
        available: &[usize],
    ) -> Result<usize, ProviderError>;
}

/// Baseline opponent: always uses the occupant's first move against the
/// first living enemy, and sends out the first available replacement.
pub struct FirstMoveProvider;

#[async_trait]
impl ActionProvider for FirstMoveProvider {
    async fn choose_action(
        &mut self,
        field: &Field,
        _content: &ContentRepository,
        actor: SlotRef,
    ) -> Result<ActionChoice, ProviderError> {
        let combatant = field
            .combatant(actor)
            .ok_or(ProviderError::NoActionAvailable)?;
        let move_id = combatant
            .moves
            .first()
            .cloned()
            .ok_or(ProviderError::NoActionAvailable)?;
        let target = default_target(field, actor).ok_or(ProviderError::NoActionAvailable)?;
        Ok(ActionChoice::Move { move_id, target })
    }

    async fn choose_replacement(
        &mut self,
        _field: &Field,
        _at: SlotRef,
        available: &[usize],
    ) -> Result<usize, ProviderError> {
        available
            .first()
            .copied()
            .ok_or(ProviderError::NoActionAvailable)
    }
}

/// Test provider that replays a fixed script of choices, then falls back to
/// the first-move behavior once the script runs out.
pub struct ScriptedProvider {
    script: VecDeque<ActionChoice>,
    fallback: FirstMoveProvider,
}

impl ScriptedProvider {
    pub fn new(script: Vec<ActionChoice>) -> Self {
        Self {
            script: script.into(),
            fallback: FirstMoveProvider,
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn choose_action(
        &mut self,
        field: &Field,
        content: &ContentRepository,
        actor: SlotRef,
    ) -> Result<ActionChoice, ProviderError> {
        match self.script.pop_front() {
            Some(choice) => Ok(choice),
            None => self.fallback.choose_action(field, content, actor).await,
        }
    }

    async fn choose_replacement(
        &mut self,
        field: &Field,
        at: SlotRef,
        available: &[usize],
    ) -> Result<usize, ProviderError> {
        self.fallback.choose_replacement(field, at, available).await
    }
}

/// First living occupant on the opposing side, scanning slots in order.
pub fn default_target(field: &Field, actor: SlotRef) -> Option<SlotRef> {
    let opposing = actor.opposing_side();
    (0..field.sides[opposing].slots.len())
        .map(|slot| SlotRef::new(opposing, slot))
        .find(|r| field.occupant_alive(*r))
}
