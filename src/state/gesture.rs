//! Touch-drag to relative-motion translation.
//!
//! One translator owns one touch anchor and one throttle. Every move computes
//! the delta from the previous raw sample and re-anchors, whether or not that
//! delta survives throttling: coalesced deltas are dropped, never summed.
//! Scaling by sensitivity happens when the throttle fires.

use std::rc::Rc;

use crate::model::{Displacement, Point, Sensitivity};
use crate::protocol::Command;
use crate::state::throttle::{Submit, Throttle, Ticket};
use crate::state::touch::TouchAnchor;
use crate::transport::{Transport, same_transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    /// Emits `mouse_move {dx, dy}`.
    Pointer,
    /// Emits `mouse_scroll {dy}`.
    Scroll,
}

/// Asks the caller to run [`GestureTranslator::on_timer`] with `ticket`
/// after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerRequest {
    pub delay_ms: u32,
    pub ticket: Ticket,
}

pub struct GestureTranslator {
    mode: GestureMode,
    anchor: TouchAnchor,
    throttle: Throttle<Displacement>,
    sensitivity: Sensitivity,
    transport: Option<Rc<dyn Transport>>,
}

impl GestureTranslator {
    pub fn new(mode: GestureMode, interval_ms: u32) -> Self {
        Self {
            mode,
            anchor: TouchAnchor::default(),
            throttle: Throttle::new(interval_ms),
            sensitivity: Sensitivity::default(),
            transport: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_active()
    }

    /// Binds the channel and sensitivity. A change of either starts a fresh
    /// throttle window so nothing pending goes out under the old binding.
    /// Returns whether that happened.
    pub fn configure(
        &mut self,
        transport: Option<Rc<dyn Transport>>,
        sensitivity: Sensitivity,
    ) -> bool {
        if same_transport(&self.transport, &transport) && self.sensitivity == sensitivity {
            return false;
        }
        if self.throttle.is_pending() {
            log::debug!("{:?} translator reconfigured, pending sample discarded", self.mode);
        }
        self.throttle.reset();
        self.transport = transport;
        self.sensitivity = sensitivity;
        true
    }

    pub fn on_touch_start(&mut self, p: Point) {
        self.anchor.start(p);
    }

    /// Returns a timer request when this sample opened a new throttle window.
    pub fn on_touch_move(&mut self, p: Point, now: f64) -> Option<TimerRequest> {
        let delta = self.anchor.advance(p)?;
        match self.throttle.submit(delta, now) {
            Submit::Armed { delay_ms, ticket } => Some(TimerRequest { delay_ms, ticket }),
            Submit::Coalesced => None,
        }
    }

    /// Ends the drag. A pending sample is still delivered by its timer.
    pub fn on_touch_end(&mut self) {
        self.anchor.clear();
    }

    /// Trailing edge of the throttle window. Returns whether a command went out.
    pub fn on_timer(&mut self, ticket: Ticket, now: f64) -> bool {
        let Some(raw) = self.throttle.fire(ticket, now) else {
            return false;
        };
        let Some(transport) = &self.transport else {
            log::debug!("no channel, {:?} sample skipped", self.mode);
            return false;
        };
        let scaled = raw.scaled(self.sensitivity);
        let command = match self.mode {
            GestureMode::Pointer => Command::mouse_move(scaled),
            GestureMode::Scroll => Command::MouseScroll { dy: scaled.dy },
        };
        match transport.emit(&command) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{} skipped: {e}", command.event_name());
                false
            }
        }
    }
}
