//! Per-frame interaction state machine.
//!
//! ```text
//!   Idle --modifier down--> Armed --primary down--> Dragging
//!    ^                        ^                        |
//!    |                        +-------primary up-------+
//!    +--- modifier up / {magnified: true} from anywhere ---
//! ```

use bus::{BroadcastChannel, Envelope, FrameEvent, MagnifierMessage, Reply};
use core_types::{FrameId, Point, SelectionRegion};
use geometry::normalize_rect;
use input_core::{Disposition, InputEvent, KeyInput, KeyPhase, PointerInput, PointerPhase};
use page::PageDom;

use crate::config::MagnifierConfig;
use crate::controller::MagnifierController;
use crate::overlay::SelectionOverlay;

/// Whether this frame holds page-level authority. Decided once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRole {
    /// The top-level frame: owns the controller.
    Coordinator,
    /// A nested frame: asks the coordinator and mirrors its state.
    Participant,
}

impl FrameRole {
    pub fn resolve(frame: FrameId, top: FrameId) -> Self {
        if frame == top {
            FrameRole::Coordinator
        } else {
            FrameRole::Participant
        }
    }

    pub fn is_coordinator(self) -> bool {
        self == FrameRole::Coordinator
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Armed,
    Dragging,
}

/// Local interaction state of one frame. Never shared, never persisted.
#[derive(Debug, Default)]
pub struct FrameInteractionState {
    pub modifier_held: bool,
    pub selecting: bool,
    /// Viewport coordinates of the drag start.
    pub drag_origin: Option<Point>,
    pub overlay: SelectionOverlay,
}

impl FrameInteractionState {
    pub fn phase(&self) -> InteractionPhase {
        match (self.modifier_held, self.selecting) {
            (_, true) => InteractionPhase::Dragging,
            (true, false) => InteractionPhase::Armed,
            (false, false) => InteractionPhase::Idle,
        }
    }

    /// A drag implies an origin, a live overlay and a held modifier.
    pub fn is_consistent(&self) -> bool {
        !self.selecting
            || (self.modifier_held && self.drag_origin.is_some() && self.overlay.is_live())
    }
}

pub struct FrameAgent<D, C> {
    frame: FrameId,
    role: FrameRole,
    config: MagnifierConfig,
    dom: D,
    channel: C,
    state: FrameInteractionState,
    /// Last magnified state seen. Authoritative in the coordinator (mirrors
    /// the controller), a replica everywhere else.
    magnified: bool,
    controller: Option<MagnifierController>,
}

impl<D: PageDom, C: BroadcastChannel> FrameAgent<D, C> {
    pub fn new(frame: FrameId, top: FrameId, dom: D, channel: C, config: MagnifierConfig) -> Self {
        let role = FrameRole::resolve(frame, top);
        let controller = role
            .is_coordinator()
            .then(|| MagnifierController::new(&config));
        log::debug!(target: "magnifier.agent", "frame {frame} started as {role:?}");
        Self {
            frame,
            role,
            config,
            dom,
            channel,
            state: FrameInteractionState::default(),
            magnified: false,
            controller,
        }
    }

    pub fn frame(&self) -> FrameId {
        self.frame
    }

    pub fn role(&self) -> FrameRole {
        self.role
    }

    pub fn state(&self) -> &FrameInteractionState {
        &self.state
    }

    pub fn phase(&self) -> InteractionPhase {
        self.state.phase()
    }

    pub fn is_magnified(&self) -> bool {
        match &self.controller {
            Some(c) => c.is_magnified(),
            None => self.magnified,
        }
    }

    pub fn controller(&self) -> Option<&MagnifierController> {
        self.controller.as_ref()
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Single entry point for a frame's event loop.
    pub fn handle_event(&mut self, event: FrameEvent) -> Disposition {
        let disposition = match event {
            FrameEvent::Input(InputEvent::Key(key)) => self.on_key(&key),
            FrameEvent::Input(InputEvent::Pointer(pointer)) => self.on_pointer(&pointer),
            FrameEvent::Message(envelope) => {
                self.on_envelope(envelope);
                Disposition::Pass
            }
            FrameEvent::Shutdown => Disposition::Pass,
        };
        debug_assert!(self.state.is_consistent(), "{:?}", self.state);
        disposition
    }

    pub fn on_key(&mut self, key: &KeyInput) -> Disposition {
        if key.key != self.config.modifier {
            return Disposition::Pass;
        }
        match key.phase {
            KeyPhase::Down => self.on_modifier_down(key),
            KeyPhase::Up => self.on_modifier_up(),
        }
        Disposition::Pass
    }

    fn on_modifier_down(&mut self, key: &KeyInput) {
        if !key.is_fresh_press() {
            return;
        }
        if self.is_magnified() {
            if self.role.is_coordinator() {
                self.exit();
            }
            return;
        }
        if !self.state.modifier_held {
            log::trace!(target: "magnifier.agent", "frame {} armed", self.frame);
            self.state.modifier_held = true;
        }
    }

    fn on_modifier_up(&mut self) {
        if self.state.selecting {
            log::debug!(
                target: "magnifier.agent",
                "frame {}: drag cancelled by modifier release",
                self.frame
            );
            self.cancel_drag();
        }
        self.state.modifier_held = false;
        self.dom.remove_body_class(&self.config.crosshair_class);
    }

    pub fn on_pointer(&mut self, pointer: &PointerInput) -> Disposition {
        match pointer.phase {
            PointerPhase::Down => self.on_pointer_down(pointer),
            PointerPhase::Move => self.on_pointer_move(pointer),
            PointerPhase::Up => self.on_pointer_up(pointer),
        }
    }

    fn on_pointer_down(&mut self, pointer: &PointerInput) -> Disposition {
        if !pointer.is_primary() || self.is_magnified() {
            return Disposition::Pass;
        }
        if self.state.phase() != InteractionPhase::Armed {
            return Disposition::Pass;
        }
        // Presses on the scrollbars land outside the client area.
        if !self.dom.client_size().contains(pointer.position) {
            log::trace!(
                target: "magnifier.agent",
                "frame {}: press outside client area",
                self.frame
            );
            return Disposition::Pass;
        }
        if pointer.target.accepts_text_input() {
            log::trace!(
                target: "magnifier.agent",
                "frame {}: press on <{}> keeps its native meaning",
                self.frame,
                pointer.target.tag_name
            );
            return Disposition::Pass;
        }

        let origin = pointer.position;
        self.state.selecting = true;
        self.state.drag_origin = Some(origin);
        self.state.overlay.create(&mut self.dom, &self.config.overlay_class);
        self.state
            .overlay
            .update(&mut self.dom, origin.x, origin.y, origin.x, origin.y);
        self.dom.add_body_class(&self.config.crosshair_class);
        Disposition::Suppress
    }

    fn on_pointer_move(&mut self, pointer: &PointerInput) -> Disposition {
        let Some(origin) = self.state.drag_origin.filter(|_| self.state.selecting) else {
            return Disposition::Pass;
        };
        let p = pointer.position;
        self.state.overlay.update(&mut self.dom, origin.x, origin.y, p.x, p.y);
        Disposition::Suppress
    }

    fn on_pointer_up(&mut self, pointer: &PointerInput) -> Disposition {
        if !pointer.is_primary() || !self.state.selecting {
            return Disposition::Pass;
        }
        let Some(origin) = self.state.drag_origin else {
            return Disposition::Pass;
        };

        // Back to Armed before anything leaves this frame.
        self.cancel_drag();

        let end = pointer.position;
        let rect = normalize_rect(origin.x, origin.y, end.x, end.y);
        if rect.exceeds(self.config.min_selection_px) {
            let region = rect.scrolled_by(self.dom.scroll_offset());
            self.submit(region);
        } else {
            log::trace!(
                target: "magnifier.agent",
                "frame {}: selection {rect:?} too small",
                self.frame
            );
        }
        Disposition::StopPropagation
    }

    /// Hand a finished selection (document coordinates) to the coordinator.
    fn submit(&mut self, region: SelectionRegion) {
        if self.role.is_coordinator() {
            self.activate(region);
        } else {
            log::debug!(
                target: "magnifier.agent",
                "frame {}: requesting activation of {region:?}",
                self.frame
            );
            // Nothing here depends on the acknowledgement.
            let _ = self
                .channel
                .request(&MagnifierMessage::ActivationRequest { region });
        }
    }

    fn on_envelope(&mut self, envelope: Envelope) {
        let message = match envelope.decode() {
            Ok(m) => m,
            Err(e) => {
                log::warn!(
                    target: "magnifier.agent",
                    "frame {}: dropping message from frame {}: {e}",
                    self.frame,
                    envelope.sender
                );
                return;
            }
        };
        match message {
            MagnifierMessage::ActivationRequest { region } => {
                if !self.role.is_coordinator() {
                    log::trace!(
                        target: "magnifier.agent",
                        "frame {}: activation request is not for us",
                        self.frame
                    );
                    return;
                }
                log::debug!(
                    target: "magnifier.agent",
                    "frame {}: activation requested by frame {}",
                    self.frame,
                    envelope.sender
                );
                self.activate(region);
                if let Some(reply) = envelope.reply {
                    reply.respond(Reply { success: true });
                }
            }
            MagnifierMessage::StateChange { magnified } => {
                if self.role.is_coordinator() {
                    log::debug!(
                        target: "magnifier.agent",
                        "frame {}: ignoring state change from frame {}",
                        self.frame,
                        envelope.sender
                    );
                    return;
                }
                self.apply_state_change(magnified);
            }
        }
    }

    fn activate(&mut self, region: SelectionRegion) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if controller.activate(&mut self.dom, &self.channel, region) {
            self.apply_state_change(true);
        }
    }

    fn exit(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if controller.exit(&mut self.dom, &self.channel) {
            self.state.modifier_held = false;
            self.apply_state_change(false);
        }
    }

    /// Reconcile local state with an announced global state.
    fn apply_state_change(&mut self, magnified: bool) {
        self.magnified = magnified;
        if magnified {
            // Magnification anywhere preempts selection everywhere.
            self.cancel_drag();
            self.state.modifier_held = false;
            self.dom.remove_body_class(&self.config.crosshair_class);
        }
        log::trace!(
            target: "magnifier.agent",
            "frame {} now sees magnified={magnified}, phase {:?}",
            self.frame,
            self.state.phase()
        );
    }

    /// Drop any drag in progress; the modifier state is left alone.
    fn cancel_drag(&mut self) {
        self.state.selecting = false;
        self.state.drag_origin = None;
        self.state.overlay.remove(&mut self.dom);
        self.dom.remove_body_class(&self.config.crosshair_class);
    }
}
