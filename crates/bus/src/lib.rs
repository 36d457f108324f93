//! Message transport between the frames of one tab.
//!
//! Frames share no memory. Everything they tell each other travels as an
//! encoded payload through a [`Relay`], which fans a message out to every
//! other connected frame and optionally carries a reply back to the sender.

mod relay;
mod wire;

pub use relay::{Envelope, FrameEvent, PendingReply, Relay, RelayPort, ReplyHandle};
pub use wire::{DecodeError, Reply, decode, decode_reply, encode, encode_reply};

use core_types::SelectionRegion;

/// The two messages the magnifier protocol knows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MagnifierMessage {
    /// A non-coordinator frame asks the coordinator to magnify `region`
    /// (document coordinates of the requesting frame).
    ActivationRequest { region: SelectionRegion },
    /// The coordinator announces the authoritative magnified state.
    StateChange { magnified: bool },
}

/// Outgoing side of the relay as seen by one frame.
pub trait BroadcastChannel {
    /// Fire-and-forget delivery to every other frame.
    fn broadcast(&self, message: &MagnifierMessage);

    /// Delivery to every other frame with a reply path back to the sender.
    /// The caller may drop the returned handle without waiting.
    fn request(&self, message: &MagnifierMessage) -> PendingReply;
}
