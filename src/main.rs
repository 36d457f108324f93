//! Headless demo tab: a top frame and two iframes, each on its own event
//! loop, driven by a scripted shift-drag. Set `RUST_LOG=debug` to watch the
//! protocol.

use bus::{FrameEvent, MagnifierMessage, Relay};
use core_types::{FrameId, ScrollOffset, ViewportSize};
use input_core::{EventTarget, InputEvent, Key, KeyInput, PointerInput};
use magnifier::{FrameAgent, MagnifierConfig};
use page::{MemoryPage, PageDom, StyleProperty, StyleTarget};
use runtime_frame::{InputOutcome, start_frame_runtime};
use std::error::Error;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const TOP: FrameId = 0;
const OBSERVER: FrameId = u64::MAX;
const WAIT: Duration = Duration::from_secs(5);

fn wait_for_state(observed: &Receiver<FrameEvent>) -> Result<bool, Box<dyn Error>> {
    loop {
        if let FrameEvent::Message(env) = observed.recv_timeout(WAIT)? {
            match env.decode() {
                Ok(MagnifierMessage::StateChange { magnified }) => return Ok(magnified),
                Ok(other) => log::info!("relay: frame {} sent {other:?}", env.sender),
                Err(e) => log::warn!("relay: undecodable payload from frame {}: {e}", env.sender),
            }
        }
    }
}

fn shift_drag(from: (f64, f64), to: (f64, f64)) -> Vec<InputEvent> {
    vec![
        InputEvent::Key(KeyInput::down(Key::Shift)),
        InputEvent::Key(KeyInput::repeat(Key::Shift)),
        InputEvent::Pointer(PointerInput::down(from.0, from.1, EventTarget::element("IMG"))),
        InputEvent::Pointer(PointerInput::moved((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0)),
        InputEvent::Pointer(PointerInput::up(to.0, to.1)),
        InputEvent::Key(KeyInput::up(Key::Shift)),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let relay = Relay::new();
    let (_observer, observed) = relay.connect(OBSERVER);

    let pages = [
        MemoryPage::new(ViewportSize::new(1280.0, 720.0))
            .with_client_size(ViewportSize::new(1265.0, 720.0))
            .with_style(StyleTarget::Body, StyleProperty::Overflow, "auto"),
        MemoryPage::new(ViewportSize::new(640.0, 360.0)),
        MemoryPage::new(ViewportSize::new(480.0, 320.0)).with_scroll(ScrollOffset::new(0.0, 120.0)),
    ];

    let (outcome_tx, outcomes) = mpsc::channel();
    let mut runtimes = Vec::new();
    for (id, page) in pages.into_iter().enumerate() {
        let id = id as FrameId;
        let (port, events) = relay.connect(id);
        let agent = FrameAgent::new(id, TOP, page, port, MagnifierConfig::default());
        runtimes.push(start_frame_runtime(agent, events, Some(outcome_tx.clone())));
    }
    drop(outcome_tx);

    let send = |frame: FrameId, inputs: Vec<InputEvent>| -> Result<(), Box<dyn Error>> {
        let queue = relay
            .queue(frame)
            .ok_or_else(|| format!("frame {frame} is not connected"))?;
        for input in inputs {
            queue.send(FrameEvent::Input(input))?;
        }
        Ok(())
    };

    // Drag inside the scrolled iframe; the top frame magnifies.
    send(2, shift_drag((40.0, 30.0), (200.0, 150.0)))?;
    println!("magnified: {}", wait_for_state(&observed)?);

    // Shift in the top frame restores the page.
    send(
        TOP,
        vec![
            InputEvent::Key(KeyInput::down(Key::Shift)),
            InputEvent::Key(KeyInput::up(Key::Shift)),
        ],
    )?;
    println!("magnified: {}", wait_for_state(&observed)?);

    for frame in 0..runtimes.len() as FrameId {
        if let Some(queue) = relay.queue(frame) {
            queue.send(FrameEvent::Shutdown)?;
        }
        relay.disconnect(frame);
    }
    for handle in runtimes {
        let agent = handle
            .join()
            .map_err(|_| "frame event loop panicked")?;
        let dom = agent.dom();
        println!(
            "frame {} ({:?}): magnified={} phase={:?} body overflow={:?}",
            agent.frame(),
            agent.role(),
            agent.is_magnified(),
            agent.phase(),
            dom.style(StyleTarget::Body, StyleProperty::Overflow),
        );
    }

    // What a content script would do with each native event.
    for InputOutcome {
        frame,
        seq,
        disposition,
    } in outcomes.try_iter()
    {
        println!(
            "frame {frame} input #{seq}: preventDefault={} stopPropagation={}",
            disposition.prevents_default(),
            disposition.stops_propagation()
        );
    }
    Ok(())
}
