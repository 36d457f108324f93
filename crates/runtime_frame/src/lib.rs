use bus::{BroadcastChannel, FrameEvent};
use core_types::FrameId;
use input_core::Disposition;
use magnifier::FrameAgent;
use page::PageDom;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

/// What the frame did with one input, reported back to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputOutcome {
    pub frame: FrameId,
    pub seq: u64,
    pub disposition: Disposition,
}

/// Run `agent` as its frame's event loop on a dedicated thread.
///
/// Events are handled one at a time in queue order until `Shutdown` arrives
/// or every sender is gone; the agent is handed back on exit. Each input's
/// disposition is reported on `outcomes` when given.
pub fn start_frame_runtime<D, C>(
    mut agent: FrameAgent<D, C>,
    events: Receiver<FrameEvent>,
    outcomes: Option<Sender<InputOutcome>>,
) -> JoinHandle<FrameAgent<D, C>>
where
    D: PageDom + Send + 'static,
    C: BroadcastChannel + Send + 'static,
{
    thread::spawn(move || {
        let frame = agent.frame();
        let mut seq = 0u64;
        log::debug!(target: "runtime.frame", "frame {frame} event loop started");

        while let Ok(event) = events.recv() {
            match event {
                FrameEvent::Shutdown => break,
                FrameEvent::Input(input) => {
                    let disposition = agent.handle_event(FrameEvent::Input(input));
                    if let Some(tx) = &outcomes {
                        let _ = tx.send(InputOutcome {
                            frame,
                            seq,
                            disposition,
                        });
                    }
                    seq += 1;
                }
                message @ FrameEvent::Message(_) => {
                    agent.handle_event(message);
                }
            }
        }

        log::debug!(
            target: "runtime.frame",
            "frame {frame} event loop stopped after {seq} input(s)"
        );
        agent
    })
}
