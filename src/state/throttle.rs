//! Trailing-edge coalescing throttle.
//!
//! ```text
//! idle ──submit──▶ pending(last, deadline)      caller arms a timer
//! pending ──submit──▶ pending(newest, deadline) args overwritten, no new timer
//! pending ──fire──▶ idle                        newest args emitted
//! ```
//!
//! The machine owns no timer. `submit` reports when a timer must be armed and
//! hands out a [`Ticket`]; the timer later calls `fire` with that ticket. A
//! ticket from before a `reset` never matches, so a stale timer is inert.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Submit {
    /// Window opened: arm a timer for `delay_ms` and fire it with `ticket`.
    Armed { delay_ms: u32, ticket: Ticket },
    /// Folded into the already pending window.
    Coalesced,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase<A> {
    Idle,
    Pending { last: A, deadline: f64, ticket: Ticket },
}

#[derive(Debug, Clone)]
pub struct Throttle<A> {
    interval_ms: u32,
    phase: Phase<A>,
    issued: u64,
}

impl<A> Throttle<A> {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            phase: Phase::Idle,
            issued: 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Offers `args` at time `now` (ms).
    pub fn submit(&mut self, args: A, now: f64) -> Submit {
        if let Phase::Pending { last, .. } = &mut self.phase {
            *last = args;
            return Submit::Coalesced;
        }
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.phase = Phase::Pending {
            last: args,
            deadline: now + f64::from(self.interval_ms),
            ticket,
        };
        Submit::Armed {
            delay_ms: self.interval_ms,
            ticket,
        }
    }

    /// Closes the pending window opened under `ticket` and yields its newest
    /// args. Returns `None` for stale tickets or when idle.
    pub fn fire(&mut self, ticket: Ticket, now: f64) -> Option<A> {
        match &self.phase {
            Phase::Pending { ticket: t, deadline, .. } if *t == ticket => {
                if now < *deadline {
                    log::trace!("throttle timer fired {:.1} ms early", deadline - now);
                }
            }
            _ => return None,
        }
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Pending { last, .. } => Some(last),
            Phase::Idle => None,
        }
    }

    /// Drops any pending window. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(s: Submit) -> Ticket {
        match s {
            Submit::Armed { ticket, .. } => ticket,
            Submit::Coalesced => panic!("expected a new window"),
        }
    }

    #[test]
    fn test_first_submit_arms_timer_for_interval() {
        let mut t = Throttle::new(16);
        let s = t.submit(1, 0.0);
        assert!(matches!(s, Submit::Armed { delay_ms: 16, .. }));
        assert!(t.is_pending());
    }

    #[test]
    fn test_submits_within_window_coalesce_to_newest() {
        // Arrange
        let mut t = Throttle::new(16);
        let ticket = armed(t.submit("a", 0.0));

        // Act
        assert_eq!(t.submit("b", 4.0), Submit::Coalesced);
        assert_eq!(t.submit("c", 9.0), Submit::Coalesced);

        // Assert: one emission carrying the most recent args
        assert_eq!(t.fire(ticket, 16.0), Some("c"));
        assert!(!t.is_pending());
        assert_eq!(t.fire(ticket, 17.0), None);
    }

    #[test]
    fn test_submit_after_fire_opens_new_window() {
        let mut t = Throttle::new(16);
        let first = armed(t.submit(1, 0.0));
        assert_eq!(t.fire(first, 16.0), Some(1));

        let second = armed(t.submit(2, 20.0));
        assert_ne!(first, second);
        assert_eq!(t.fire(second, 36.0), Some(2));
    }

    #[test]
    fn test_reset_discards_pending_and_stales_ticket() {
        let mut t = Throttle::new(16);
        let old = armed(t.submit(1, 0.0));

        t.reset();
        assert!(!t.is_pending());

        let new = armed(t.submit(2, 5.0));
        assert_eq!(t.fire(old, 16.0), None);
        assert!(t.is_pending());
        assert_eq!(t.fire(new, 21.0), Some(2));
    }

    #[test]
    fn test_fire_when_idle_is_noop() {
        let mut t: Throttle<u8> = Throttle::new(16);
        assert_eq!(t.fire(Ticket(1), 100.0), None);
    }

    #[test]
    fn test_clock_running_backwards_still_emits() {
        let mut t = Throttle::new(16);
        let ticket = armed(t.submit(3, 5_000.0));
        assert_eq!(t.fire(ticket, 1_000.0), Some(3));
        assert!(!t.is_pending());
    }

    #[test]
    fn test_early_fire_still_emits() {
        let mut t = Throttle::new(16);
        let ticket = armed(t.submit(7, 100.0));
        assert_eq!(t.fire(ticket, 115.0), Some(7));
    }
}
