//! Async runtime around the pure [`Room`] state machine
//!
//! Every room is one tokio task that owns its `Room` exclusively. Connections
//! and timers talk to it through a command channel, so all actions and timer
//! callbacks of a room are applied one at a time.

pub mod registry;
pub mod scheduler;

pub use registry::RoomRegistry;

use crate::config::RoomConfig;
use crate::error::RoomError;
use crate::protocol::{ClientMessage, RoomView, ServerMessage};
use crate::state::{Effect, Room, TimerKind};
use crate::types::*;
use crate::ws::handlers;
use scheduler::Scheduler;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

/// Outbound channel of one connection
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

pub enum RoomCommand {
    Join {
        player_id: PlayerId,
        name: String,
        outbox: Outbox,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    Leave {
        player_id: PlayerId,
    },
    Action {
        player_id: PlayerId,
        msg: ClientMessage,
    },
    Timer {
        kind: TimerKind,
        generation: u64,
    },
    Snapshot {
        player_id: PlayerId,
        reply: oneshot::Sender<RoomView>,
    },
}

/// Cheap, cloneable reference to a running room
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    tx: mpsc::UnboundedSender<RoomCommand>,
}

impl RoomHandle {
    /// Spawn the room task. `on_dispose` runs once after the last player left.
    pub fn spawn<F>(code: RoomCode, config: RoomConfig, on_dispose: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = RoomActor {
            code: code.clone(),
            room: Room::new(config),
            connections: HashMap::new(),
            scheduler: Scheduler::new(tx.clone()),
        };
        tokio::spawn(actor.run(rx, on_dispose));
        tracing::info!("Room {} created", code);
        Self { code, tx }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub async fn join(
        &self,
        player_id: PlayerId,
        name: String,
        outbox: Outbox,
    ) -> Result<(), RoomError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(RoomCommand::Join {
                player_id,
                name,
                outbox,
                reply,
            })
            .map_err(|_| RoomError::RoomClosed)?;
        rx.await.map_err(|_| RoomError::RoomClosed)?
    }

    pub fn leave(&self, player_id: &str) {
        let _ = self.tx.send(RoomCommand::Leave {
            player_id: player_id.to_string(),
        });
    }

    pub fn send_action(&self, player_id: &str, msg: ClientMessage) {
        let _ = self.tx.send(RoomCommand::Action {
            player_id: player_id.to_string(),
            msg,
        });
    }

    /// The room as `player_id` currently sees it, None once the room is gone
    pub async fn snapshot(&self, player_id: &str) -> Option<RoomView> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(RoomCommand::Snapshot {
                player_id: player_id.to_string(),
                reply,
            })
            .ok()?;
        rx.await.ok()
    }

    /// True once the room task stopped accepting commands
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

struct RoomActor {
    code: RoomCode,
    room: Room,
    connections: HashMap<PlayerId, Outbox>,
    scheduler: Scheduler,
}

impl RoomActor {
    async fn run<F>(mut self, mut rx: mpsc::UnboundedReceiver<RoomCommand>, on_dispose: F)
    where
        F: FnOnce(),
    {
        while let Some(cmd) = rx.recv().await {
            let membership_changed = matches!(
                cmd,
                RoomCommand::Join { .. } | RoomCommand::Leave { .. }
            );
            let changed = self.handle(cmd);
            self.apply_effects();
            if changed {
                self.push_views();
            }

            if membership_changed && self.room.is_empty() {
                rx.close();
                self.scheduler.cancel_all();
                tracing::info!("Room {} disposed", self.code);
                break;
            }
        }
        on_dispose();
    }

    /// Apply one command, returning whether the state may have changed
    fn handle(&mut self, cmd: RoomCommand) -> bool {
        match cmd {
            RoomCommand::Join {
                player_id,
                name,
                outbox,
                reply,
            } => {
                let result = self.room.join(player_id.clone(), name);
                if result.is_ok() {
                    self.connections.insert(player_id, outbox);
                }
                let joined = result.is_ok();
                let _ = reply.send(result);
                joined
            }
            RoomCommand::Leave { player_id } => {
                if self.connections.remove(&player_id).is_none() {
                    return false;
                }
                self.room.leave(&player_id);
                true
            }
            RoomCommand::Action { player_id, msg } => {
                if !self.connections.contains_key(&player_id) {
                    return false;
                }
                if let Some(reply) = handlers::handle_message(msg, &player_id, &mut self.room) {
                    self.send_to(&player_id, reply);
                }
                true
            }
            RoomCommand::Timer { kind, generation } => {
                if !self.scheduler.accept(kind, generation) {
                    tracing::debug!("Dropping stale {:?} timer in room {}", kind, self.code);
                    return false;
                }
                self.room.fire_timer(kind);
                true
            }
            RoomCommand::Snapshot { player_id, reply } => {
                let _ = reply.send(self.room.view(&player_id));
                false
            }
        }
    }

    fn apply_effects(&mut self) {
        for effect in self.room.take_effects() {
            match effect {
                Effect::Broadcast(msg) => {
                    for outbox in self.connections.values() {
                        let _ = outbox.send(msg.clone());
                    }
                }
                Effect::Schedule { timer, after } => self.scheduler.schedule(timer, after),
                Effect::CancelTimers => self.scheduler.cancel_all(),
            }
        }
    }

    fn send_to(&self, player_id: &str, msg: ServerMessage) {
        if let Some(outbox) = self.connections.get(player_id) {
            let _ = outbox.send(msg);
        }
    }

    /// Replicate a personalized snapshot to every connection
    fn push_views(&self) {
        for (player_id, outbox) in &self.connections {
            let view = self.room.view(player_id);
            let _ = outbox.send(ServerMessage::State { view });
        }
    }
}
