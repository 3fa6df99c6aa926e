//! Wiring between the matching engine and the event bus.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{EventBus, EventChannel, SubscriptionHandle};

use super::{MatchEngine, StepOutput, VisualIntent};

/// Subscribe `engine` to the inbound channels of `bus` and republish the
/// outcome events each step produces.
///
/// Visual intents go through `apply_intent`, the presentation layer's mutation
/// hook. Outcome events are published after the engine borrow is released, so
/// downstream reactors may inspect the engine; they still run to completion
/// before the outer publish returns (depth-first dispatch).
///
/// A rejected payload is a presentation-layer bug: it is logged and asserted
/// in debug builds rather than silently absorbed.
pub fn connect_engine(
    bus: &Rc<EventBus>,
    engine: &Rc<RefCell<MatchEngine>>,
    apply_intent: impl FnMut(VisualIntent) + 'static,
) -> Vec<SubscriptionHandle> {
    let apply: Rc<RefCell<dyn FnMut(VisualIntent)>> = Rc::new(RefCell::new(apply_intent));

    [EventChannel::Selected, EventChannel::GamePaused, EventChannel::GameResumed]
        .into_iter()
        .map(|channel| {
            let bus_ref = Rc::clone(bus);
            let engine_ref = Rc::clone(engine);
            let apply_ref = Rc::clone(&apply);
            bus.subscribe(channel, move |event| {
                let output = match engine_ref.borrow_mut().handle_event(event) {
                    Ok(output) => output,
                    Err(err) => {
                        log::error!("Matching engine rejected {:?} event: {}", channel, err);
                        debug_assert!(false, "invalid event payload: {}", err);
                        return;
                    }
                };
                dispatch_output(&bus_ref, &apply_ref, output);
            })
        })
        .collect()
}

fn dispatch_output(
    bus: &EventBus,
    apply: &RefCell<dyn FnMut(VisualIntent)>,
    output: StepOutput,
) {
    {
        let mut apply = apply.borrow_mut();
        for intent in output.intents {
            (*apply)(intent);
        }
    }
    for event in output.events {
        bus.publish(&event);
    }
}
