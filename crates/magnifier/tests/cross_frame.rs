//! Several frame agents wired through one relay, pumped in delivery order.

use bus::{BroadcastChannel, FrameEvent, MagnifierMessage, Relay, RelayPort};
use core_types::{FrameId, SelectionRegion, ViewportSize};
use input_core::{Disposition, EventTarget, InputEvent, Key, KeyInput, PointerInput};
use magnifier::{FrameAgent, InteractionPhase, MagnifierConfig};
use page::{MemoryPage, PageDom, StyleProperty, StyleTarget};
use std::sync::mpsc::Receiver;

const TOP: FrameId = 0;
const OBSERVER: FrameId = 99;

struct Frame {
    agent: FrameAgent<MemoryPage, RelayPort>,
    events: Receiver<FrameEvent>,
}

/// One tab: frame 0 is the top frame, the rest are iframes. A passive
/// observer port records everything the frames put on the relay.
struct Tab {
    relay: Relay,
    frames: Vec<Frame>,
    observer: RelayPort,
    observed: Receiver<FrameEvent>,
}

impl Tab {
    fn new(iframes: usize) -> Self {
        Self::with_top_page(iframes, page())
    }

    fn with_top_page(iframes: usize, top_page: MemoryPage) -> Self {
        let relay = Relay::new();
        let (observer, observed) = relay.connect(OBSERVER);
        let mut tab = Self {
            relay,
            frames: Vec::new(),
            observer,
            observed,
        };
        tab.attach(top_page);
        for _ in 0..iframes {
            tab.attach(page());
        }
        tab
    }

    /// Connect a new frame; returns its id.
    fn attach(&mut self, dom: MemoryPage) -> FrameId {
        let id = self.frames.len() as FrameId;
        let (port, events) = self.relay.connect(id);
        let agent = FrameAgent::new(id, TOP, dom, port, MagnifierConfig::default());
        self.frames.push(Frame { agent, events });
        id
    }

    fn agent(&self, frame: FrameId) -> &FrameAgent<MemoryPage, RelayPort> {
        &self.frames[frame as usize].agent
    }

    fn input(&mut self, frame: FrameId, event: InputEvent) -> Disposition {
        self.frames[frame as usize]
            .agent
            .handle_event(FrameEvent::Input(event))
    }

    fn key_down(&mut self, frame: FrameId) {
        self.input(frame, InputEvent::Key(KeyInput::down(Key::Shift)));
    }

    fn key_up(&mut self, frame: FrameId) {
        self.input(frame, InputEvent::Key(KeyInput::up(Key::Shift)));
    }

    fn press(&mut self, frame: FrameId, x: f64, y: f64) -> Disposition {
        self.input(
            frame,
            InputEvent::Pointer(PointerInput::down(x, y, EventTarget::element("DIV"))),
        )
    }

    fn drag_to(&mut self, frame: FrameId, x: f64, y: f64) {
        self.input(frame, InputEvent::Pointer(PointerInput::moved(x, y)));
    }

    fn release(&mut self, frame: FrameId, x: f64, y: f64) {
        self.input(frame, InputEvent::Pointer(PointerInput::up(x, y)));
    }

    /// Shift-drag from one corner to the other and let go of both.
    fn select(&mut self, frame: FrameId, from: (f64, f64), to: (f64, f64)) {
        self.key_down(frame);
        self.press(frame, from.0, from.1);
        self.drag_to(frame, to.0, to.1);
        self.release(frame, to.0, to.1);
        self.key_up(frame);
    }

    /// Deliver queued messages until every frame is idle.
    fn pump(&mut self) {
        loop {
            let mut handled = 0;
            for frame in &mut self.frames {
                while let Ok(event) = frame.events.try_recv() {
                    frame.agent.handle_event(event);
                    handled += 1;
                }
            }
            if handled == 0 {
                break;
            }
        }
    }

    /// Messages seen by the observer since the last call, with their sender.
    fn observed(&self) -> Vec<(FrameId, MagnifierMessage)> {
        self.observed
            .try_iter()
            .filter_map(|event| match event {
                FrameEvent::Message(env) => env.decode().ok().map(|m| (env.sender, m)),
                _ => None,
            })
            .collect()
    }

    fn top_styles(&self) -> Vec<(StyleTarget, StyleProperty, String)> {
        self.agent(TOP).dom().inline_styles()
    }
}

fn page() -> MemoryPage {
    MemoryPage::new(ViewportSize::new(1200.0, 800.0))
}

#[test]
fn iframe_selection_magnifies_the_top_frame() {
    let mut tab = Tab::new(2);
    tab.select(1, (100.0, 200.0), (400.0, 350.0));

    assert_eq!(
        tab.observed(),
        vec![(
            1,
            MagnifierMessage::ActivationRequest {
                region: SelectionRegion::new(100.0, 200.0, 300.0, 150.0)
            }
        )]
    );

    tab.pump();

    assert!(tab.agent(TOP).is_magnified());
    assert!(tab.agent(1).is_magnified());
    assert!(tab.agent(2).is_magnified());
    assert_eq!(
        tab.observed(),
        vec![(TOP, MagnifierMessage::StateChange { magnified: true })]
    );
    // Only the top frame's page is restyled.
    assert!(tab.agent(1).dom().inline_styles().is_empty());
    assert!(tab.agent(2).dom().inline_styles().is_empty());
}

#[test]
fn activation_twice_equals_activation_once() {
    let mut tab = Tab::new(1);
    let region = SelectionRegion::new(100.0, 200.0, 300.0, 150.0);

    let first = tab
        .observer
        .request(&MagnifierMessage::ActivationRequest { region });
    tab.pump();
    let once = tab.top_styles();
    let snapshot_once = tab.agent(TOP).controller().and_then(|c| c.snapshot()).cloned();

    let second = tab
        .observer
        .request(&MagnifierMessage::ActivationRequest { region });
    tab.pump();

    assert_eq!(tab.top_styles(), once);
    assert_eq!(
        tab.agent(TOP).controller().and_then(|c| c.snapshot()).cloned(),
        snapshot_once
    );
    assert!(tab.agent(TOP).is_magnified());

    // Both requests are acknowledged; only one transition is announced.
    for pending in [first, second] {
        let reply = pending.try_take().expect("reply").expect("decodes");
        assert!(reply.success);
    }
    let changes: Vec<_> = tab
        .observed()
        .into_iter()
        .filter(|(_, m)| matches!(m, MagnifierMessage::StateChange { .. }))
        .collect();
    assert_eq!(changes.len(), 1);
}

#[test]
fn exit_restores_styles_including_unset_ones() {
    let top_page = page()
        .with_style(StyleTarget::Root, StyleProperty::Overflow, "auto")
        .with_style(StyleTarget::Root, StyleProperty::Transform, "none");
    let mut tab = Tab::with_top_page(1, top_page);
    let before = tab.top_styles();

    tab.select(1, (10.0, 10.0), (210.0, 110.0));
    tab.pump();
    assert!(tab.agent(TOP).is_magnified());
    assert_ne!(tab.top_styles(), before);

    tab.key_down(TOP);
    tab.pump();

    assert!(!tab.agent(TOP).is_magnified());
    assert!(!tab.agent(1).is_magnified());
    assert_eq!(tab.top_styles(), before);
    let top = tab.agent(TOP).dom();
    assert_eq!(top.style(StyleTarget::Root, StyleProperty::TransformOrigin), None);
    assert_eq!(top.style(StyleTarget::Body, StyleProperty::Overflow), None);
    assert_eq!(tab.agent(TOP).phase(), InteractionPhase::Idle);
}

#[test]
fn selection_must_exceed_threshold_on_both_axes() {
    let mut tab = Tab::new(1);

    tab.select(1, (100.0, 100.0), (110.0, 110.0));
    tab.pump();
    assert!(tab.observed().is_empty());
    assert!(!tab.agent(TOP).is_magnified());

    tab.select(1, (100.0, 100.0), (111.0, 111.0));
    tab.pump();
    assert!(tab.agent(TOP).is_magnified());
    assert!(matches!(
        tab.observed().first(),
        Some((1, MagnifierMessage::ActivationRequest { region }))
            if region.width == 11.0 && region.height == 11.0
    ));
}

#[test]
fn fit_transform_reaches_the_top_page() {
    let mut tab = Tab::new(1);
    tab.select(1, (400.0, 350.0), (100.0, 200.0));
    tab.pump();

    let top = tab.agent(TOP).dom();
    assert_eq!(
        top.style(StyleTarget::Root, StyleProperty::Transform).as_deref(),
        Some("translate(-400px, -700px) scale(4)")
    );
    assert_eq!(
        top.style(StyleTarget::Root, StyleProperty::TransformOrigin).as_deref(),
        Some("0 0")
    );
}

#[test]
fn magnification_preempts_a_drag_in_another_frame() {
    let mut tab = Tab::new(2);

    tab.key_down(2);
    tab.press(2, 50.0, 50.0);
    tab.drag_to(2, 120.0, 90.0);
    assert_eq!(tab.agent(2).phase(), InteractionPhase::Dragging);
    assert_eq!(tab.agent(2).dom().overlay_count(), 1);

    tab.select(1, (100.0, 100.0), (300.0, 300.0));
    tab.pump();

    let preempted = tab.agent(2);
    assert_eq!(preempted.phase(), InteractionPhase::Idle);
    assert!(!preempted.state().selecting);
    assert_eq!(preempted.dom().overlay_count(), 0);
    assert!(!preempted.dom().has_body_class("magnifier-cursor-crosshair"));

    // Finishing the gesture afterwards sends nothing.
    tab.release(2, 200.0, 200.0);
    tab.key_up(2);
    tab.pump();
    assert!(tab.observed().iter().all(|(sender, _)| *sender != 2));
}

#[test]
fn releasing_modifier_mid_drag_cancels_the_selection() {
    let mut tab = Tab::new(1);

    tab.key_down(1);
    assert_eq!(tab.press(1, 10.0, 10.0), Disposition::Suppress);
    tab.drag_to(1, 300.0, 300.0);
    tab.key_up(1);
    assert_eq!(tab.agent(1).phase(), InteractionPhase::Idle);
    assert_eq!(tab.agent(1).dom().overlay_count(), 0);

    tab.release(1, 300.0, 300.0);
    tab.pump();

    assert!(tab.observed().is_empty());
    assert!(!tab.agent(TOP).is_magnified());
    assert!(tab.top_styles().is_empty());
}

#[test]
fn frames_stay_idle_after_exit_until_modifier_is_pressed() {
    let mut tab = Tab::new(1);
    tab.select(1, (10.0, 10.0), (210.0, 110.0));
    tab.pump();
    tab.key_down(TOP);
    tab.key_up(TOP);
    tab.pump();
    assert!(!tab.agent(1).is_magnified());
    assert_eq!(tab.agent(1).phase(), InteractionPhase::Idle);

    assert_eq!(tab.press(1, 20.0, 20.0), Disposition::Pass);
    assert_eq!(tab.agent(1).phase(), InteractionPhase::Idle);

    tab.key_down(1);
    assert_eq!(tab.agent(1).phase(), InteractionPhase::Armed);
    assert_eq!(tab.press(1, 20.0, 20.0), Disposition::Suppress);
}

#[test]
fn top_frame_selection_broadcasts_to_iframes() {
    let mut tab = Tab::new(1);
    tab.select(TOP, (0.0, 0.0), (600.0, 400.0));

    assert!(tab.agent(TOP).is_magnified());
    assert_eq!(
        tab.observed(),
        vec![(TOP, MagnifierMessage::StateChange { magnified: true })]
    );
    tab.pump();
    assert!(tab.agent(1).is_magnified());
}

#[test]
fn iframe_modifier_does_not_exit() {
    let mut tab = Tab::new(1);
    tab.select(1, (10.0, 10.0), (210.0, 110.0));
    tab.pump();
    tab.observed();

    tab.key_down(1);
    tab.pump();
    assert!(tab.agent(TOP).is_magnified());
    assert!(tab.observed().is_empty());
}

#[test]
fn top_frame_ignores_state_changes_it_did_not_send() {
    let mut tab = Tab::new(1);

    tab.key_down(TOP);
    tab.press(TOP, 50.0, 50.0);
    assert_eq!(tab.agent(TOP).phase(), InteractionPhase::Dragging);

    tab.observer
        .broadcast(&MagnifierMessage::StateChange { magnified: true });
    tab.pump();

    // The coordinator keeps its own state and its drag.
    let top = tab.agent(TOP);
    assert!(!top.is_magnified());
    assert_eq!(top.phase(), InteractionPhase::Dragging);
    assert_eq!(top.dom().overlay_count(), 1);
    assert!(tab.top_styles().is_empty());
    assert!(top.controller().and_then(|c| c.snapshot()).is_none());

    // Participants take the last announcement at face value.
    assert!(tab.agent(1).is_magnified());
    tab.key_down(1);
    assert_eq!(tab.agent(1).phase(), InteractionPhase::Idle);

    // The top frame's drag still completes normally.
    tab.release(TOP, 350.0, 250.0);
    assert!(tab.agent(TOP).is_magnified());
}

#[test]
fn malformed_payloads_are_dropped() {
    let mut tab = Tab::new(1);
    let queue = tab.relay.queue(TOP).expect("top frame connected");
    queue
        .send(FrameEvent::Message(bus::Envelope {
            sender: 1,
            payload: r#"{"type":"magnifierAction","action":"activate"}"#.to_string(),
            reply: None,
        }))
        .expect("queue open");
    tab.pump();
    assert!(!tab.agent(TOP).is_magnified());
    assert!(tab.top_styles().is_empty());
}

#[test]
fn late_frame_starts_unmagnified() {
    // Known gap: a frame attached after activation has not seen the
    // broadcast and believes the page is unmagnified until the next one.
    let mut tab = Tab::new(1);
    tab.select(1, (10.0, 10.0), (210.0, 110.0));
    tab.pump();
    assert!(tab.agent(TOP).is_magnified());

    let late = tab.attach(page());
    tab.pump();
    assert!(!tab.agent(late).is_magnified());

    tab.key_down(TOP);
    tab.pump();
    assert!(!tab.agent(late).is_magnified());
    assert_eq!(tab.agent(late).phase(), InteractionPhase::Idle);
}
