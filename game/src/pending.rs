//! Outbound commands awaiting reconciliation with the service.
//!
//! DESIGN
//! ======
//! The service never acknowledges emits directly. A command is considered
//! accepted when the event it should cause arrives (`player-list` for a join,
//! `game-started` for a start, a chat line or round end for a guess) and
//! rejected when an `error` event arrives while it is the oldest outstanding
//! command. Rejection hands the command back so its optimistic effect can be
//! undone.

#[cfg(test)]
#[path = "pending_test.rs"]
mod pending_test;

use std::collections::VecDeque;

use uuid::Uuid;

/// What was asked of the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingKind {
    Join { session_code: String },
    StartGame { question: String, answer: String },
    Guess,
}

/// One emitted command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCommand {
    pub id: Uuid,
    pub kind: PendingKind,
}

/// FIFO of commands in emit order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingQueue {
    commands: VecDeque<PendingCommand>,
}

impl PendingQueue {
    /// Record an emitted command and return its id.
    pub fn push(&mut self, kind: PendingKind) -> Uuid {
        let id = Uuid::new_v4();
        self.commands.push_back(PendingCommand { id, kind });
        id
    }

    /// Remove the oldest command matching `pred`, treating it as accepted.
    pub fn acknowledge(&mut self, pred: impl Fn(&PendingKind) -> bool) -> Option<PendingCommand> {
        let idx = self.commands.iter().position(|cmd| pred(&cmd.kind))?;
        self.commands.remove(idx)
    }

    /// Remove every command matching `pred`. Returns how many were settled.
    pub fn settle_all(&mut self, pred: impl Fn(&PendingKind) -> bool) -> usize {
        let before = self.commands.len();
        self.commands.retain(|cmd| !pred(&cmd.kind));
        before - self.commands.len()
    }

    /// Pop the oldest command as rejected by the service.
    pub fn reject_oldest(&mut self) -> Option<PendingCommand> {
        self.commands.pop_front()
    }

    /// Pop the most recent command, e.g. when it never left the client.
    pub fn reject_newest(&mut self) -> Option<PendingCommand> {
        self.commands.pop_back()
    }

    /// Drop everything, e.g. when the session is left.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &PendingCommand> {
        self.commands.iter()
    }
}
