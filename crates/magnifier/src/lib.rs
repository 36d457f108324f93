//! # magnifier
//!
//! Hold the modifier, drag a rectangle in any frame, release, and the top
//! frame scales that region up to fill the viewport. Press the modifier
//! again in the top frame to go back.
//!
//! Every frame runs one [`FrameAgent`]. Agents share nothing and talk only
//! through a [`BroadcastChannel`](bus::BroadcastChannel). The agent in the
//! top frame is the coordinator: it alone owns a [`MagnifierController`],
//! the only writer of page-level style, and it announces every
//! magnified/unmagnified transition to the other frames, which mirror it.

mod agent;
mod config;
mod controller;
mod overlay;

pub use agent::{FrameAgent, FrameInteractionState, FrameRole, InteractionPhase};
pub use config::MagnifierConfig;
pub use controller::{MagnifierController, PageStyleSnapshot};
pub use overlay::SelectionOverlay;
