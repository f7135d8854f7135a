use std::collections::VecDeque;

use crate::battle::actions::{Action, TurnContext};
use crate::battle::field::Field;

/// Hard ceiling on actions resolved within a single turn. Reaction chains
/// that never terminate (two recoil effects feeding each other, a buggy
/// handler) hit this instead of hanging the process.
pub const MAX_QUEUE_ITERATIONS: usize = 1000;

/// How a queue drain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueRun {
    /// Every action and reaction resolved.
    Drained,
    /// The iteration cap was hit; remaining actions were discarded.
    CapExceeded,
}

/// Depth-first action queue for one turn.
///
/// Declared actions go in back-to-front; reactions produced by an action are
/// pushed to the front so an entire reaction chain resolves before the next
/// declared action runs.
#[derive(Default)]
pub struct BattleQueue {
    actions: VecDeque<Action>,
    observers: Vec<Box<dyn FnMut(&Action)>>,
}

impl BattleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked with every action just before it
    /// executes. Observers cannot influence resolution.
    pub fn add_observer(&mut self, observer: Box<dyn FnMut(&Action)>) {
        self.observers.push(observer);
    }

    pub fn push_back(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Pushes reactions so that the first element of `reactions` is the next
    /// action to execute.
    pub fn push_reactions(&mut self, reactions: Vec<Action>) {
        for reaction in reactions.into_iter().rev() {
            self.actions.push_front(reaction);
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Drains the queue, executing actions depth-first until it is empty or
    /// the iteration cap is reached.
    pub fn run(&mut self, field: &mut Field, ctx: &mut TurnContext) -> QueueRun {
        let mut iterations = 0usize;
        while let Some(action) = self.actions.pop_front() {
            if iterations >= MAX_QUEUE_ITERATIONS {
                log::error!(
                    "action queue exceeded {MAX_QUEUE_ITERATIONS} iterations, aborting turn with {} actions pending",
                    self.actions.len() + 1
                );
                self.actions.clear();
                return QueueRun::CapExceeded;
            }
            iterations += 1;
            for observer in &mut self.observers {
                observer(&action);
            }
            let reactions = action.execute(field, ctx);
            self.push_reactions(reactions);
        }
        QueueRun::Drained
    }
}
