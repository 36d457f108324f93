//! # input_core
//!
//! UI-agnostic input model consumed by the frame agents.
//!
//! The host (a content script, a test harness, the demo binary) converts
//! native capture-phase events into these types:
//! - [`KeyInput`]: a key-down or key-up, with the keyboard-repeat flag kept
//!   so fresh presses can be told apart from auto-repeat
//! - [`PointerInput`]: a pointer down/move/up in viewport coordinates,
//!   with the button and a description of the event target
//! - [`Disposition`]: what the host must do with the native event afterwards
//!
//! ## Design Principles
//!
//! This crate does not know about the page, the relay or the magnifier.
//! It depends only on `core_types` for [`Point`](core_types::Point).

mod event;
mod key;
mod pointer;

pub use event::{Disposition, InputEvent};
pub use key::{Key, KeyInput, KeyPhase};
pub use pointer::{EventTarget, PointerButton, PointerInput, PointerPhase};
