use crate::wire::{self, DecodeError, Reply};
use crate::{BroadcastChannel, MagnifierMessage};
use core_types::FrameId;
use input_core::InputEvent;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One entry in a frame's event queue. Inputs from the host and messages
/// from other frames share the queue, so a frame handles them strictly in
/// arrival order.
#[derive(Debug)]
pub enum FrameEvent {
    Input(InputEvent),
    Message(Envelope),
    Shutdown,
}

/// A relayed payload plus who sent it.
#[derive(Debug)]
pub struct Envelope {
    pub sender: FrameId,
    pub payload: String,
    pub reply: Option<ReplyHandle>,
}

impl Envelope {
    pub fn decode(&self) -> Result<MagnifierMessage, DecodeError> {
        wire::decode(&self.payload)
    }
}

/// Reply path of a request. Dropping it without responding is allowed.
#[derive(Debug)]
pub struct ReplyHandle(Sender<String>);

impl ReplyHandle {
    pub fn respond(self, reply: Reply) {
        match wire::encode_reply(&reply) {
            // The requester may have stopped listening.
            Ok(payload) => {
                let _ = self.0.send(payload);
            }
            Err(e) => log::warn!(target: "bus.relay", "failed to encode reply: {e}"),
        }
    }
}

/// Sender-side handle for the first reply to a request.
#[derive(Debug)]
pub struct PendingReply(Receiver<String>);

impl PendingReply {
    /// A reply that will never arrive, for channels without a reply path.
    pub fn unanswered() -> Self {
        let (_tx, rx) = mpsc::channel();
        Self(rx)
    }

    /// Reply if one has arrived; `None` while pending or once every
    /// recipient dropped its handle.
    pub fn try_take(&self) -> Option<Result<Reply, DecodeError>> {
        match self.0.try_recv() {
            Ok(payload) => Some(wire::decode_reply(&payload)),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn wait(&self, timeout: Duration) -> Option<Result<Reply, DecodeError>> {
        match self.0.recv_timeout(timeout) {
            Ok(payload) => Some(wire::decode_reply(&payload)),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[derive(Default)]
struct Registry {
    frames: Vec<(FrameId, Sender<FrameEvent>)>,
}

/// In-process stand-in for the extension's message relay: every frame of a
/// tab connects once and receives everything the other frames send.
#[derive(Clone, Default)]
pub struct Relay {
    registry: Arc<Mutex<Registry>>,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `frame` and hand back its outgoing port and incoming queue.
    /// Frames connecting late only see messages sent after they connected.
    pub fn connect(&self, frame: FrameId) -> (RelayPort, Receiver<FrameEvent>) {
        let (tx, rx) = mpsc::channel();
        let mut reg = self.registry();
        reg.frames.retain(|(id, _)| *id != frame);
        reg.frames.push((frame, tx));
        log::debug!(target: "bus.relay", "frame {frame} connected");
        (
            RelayPort {
                frame,
                relay: self.clone(),
            },
            rx,
        )
    }

    pub fn disconnect(&self, frame: FrameId) {
        self.registry().frames.retain(|(id, _)| *id != frame);
    }

    /// Host-side handle used to feed `frame` its input events.
    pub fn queue(&self, frame: FrameId) -> Option<Sender<FrameEvent>> {
        self.registry()
            .frames
            .iter()
            .find(|(id, _)| *id == frame)
            .map(|(_, tx)| tx.clone())
    }

    pub fn frame_count(&self) -> usize {
        self.registry().frames.len()
    }

    fn fan_out(&self, sender: FrameId, payload: &str, reply: Option<&Sender<String>>) -> usize {
        let mut reg = self.registry();
        let mut delivered = 0;
        // Frames whose queue is gone are dropped from the registry.
        reg.frames.retain(|(id, tx)| {
            if *id == sender {
                return true;
            }
            let envelope = Envelope {
                sender,
                payload: payload.to_string(),
                reply: reply.map(|r| ReplyHandle(r.clone())),
            };
            let alive = tx.send(FrameEvent::Message(envelope)).is_ok();
            if alive {
                delivered += 1;
            } else {
                log::debug!(target: "bus.relay", "frame {id} went away");
            }
            alive
        });
        delivered
    }
}

/// A frame's connection to the [`Relay`].
#[derive(Clone)]
pub struct RelayPort {
    frame: FrameId,
    relay: Relay,
}

impl RelayPort {
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    fn encoded(&self, message: &MagnifierMessage) -> Option<String> {
        match wire::encode(message) {
            Ok(payload) => Some(payload),
            Err(e) => {
                log::warn!(
                    target: "bus.relay",
                    "frame {}: failed to encode {message:?}: {e}",
                    self.frame
                );
                None
            }
        }
    }
}

impl BroadcastChannel for RelayPort {
    fn broadcast(&self, message: &MagnifierMessage) {
        if let Some(payload) = self.encoded(message) {
            let n = self.relay.fan_out(self.frame, &payload, None);
            log::trace!(
                target: "bus.relay",
                "frame {} broadcast to {n} frame(s): {payload}",
                self.frame
            );
        }
    }

    fn request(&self, message: &MagnifierMessage) -> PendingReply {
        let (tx, rx) = mpsc::channel();
        if let Some(payload) = self.encoded(message) {
            let n = self.relay.fan_out(self.frame, &payload, Some(&tx));
            log::trace!(
                target: "bus.relay",
                "frame {} request to {n} frame(s): {payload}",
                self.frame
            );
        }
        PendingReply(rx)
    }
}
