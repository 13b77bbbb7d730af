//! Arena of cancellable room timers
//!
//! Each scheduled timer is a task that sleeps and then posts
//! [`RoomCommand::Timer`] back to its room. Cancelling aborts every task and
//! bumps the generation so a timer that already posted its command is
//! recognised as stale when the room processes it.

use super::RoomCommand;
use crate::state::TimerKind;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Scheduler {
    tx: mpsc::UnboundedSender<RoomCommand>,
    handles: HashMap<TimerKind, JoinHandle<()>>,
    generation: u64,
}

impl Scheduler {
    pub fn new(tx: mpsc::UnboundedSender<RoomCommand>) -> Self {
        Self {
            tx,
            handles: HashMap::new(),
            generation: 0,
        }
    }

    /// Start a timer, replacing any outstanding one of the same kind
    pub fn schedule(&mut self, kind: TimerKind, after: Duration) {
        let tx = self.tx.clone();
        let generation = self.generation;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // The room may already be gone
            let _ = tx.send(RoomCommand::Timer { kind, generation });
        });
        if let Some(previous) = self.handles.insert(kind, handle) {
            previous.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
        self.generation += 1;
    }

    /// Accept a fired timer if it was scheduled since the last cancel
    pub fn accept(&mut self, kind: TimerKind, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.handles.remove(&kind).is_some()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for handle in self.handles.values() {
            handle.abort();
        }
    }
}
