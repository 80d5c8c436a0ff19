//! Generation-stamped debounce.
//!
//! Each `schedule` supersedes the previous one and pushes the deadline out.
//! Work started from a ticket must check [`Debouncer::is_current`] before
//! applying its result, so a late run from an older generation can never
//! overwrite a newer one.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    due: Instant,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn due(&self) -> Instant {
        self.due
    }
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<Ticket>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending run with one due `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) -> Ticket {
        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
            due: now + self.delay,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Drop the pending run and invalidate every ticket handed out so far.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Take the pending ticket if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<Ticket> {
        match self.pending {
            Some(ticket) if ticket.due <= now => self.pending.take(),
            _ => None,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|ticket| ticket.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_not_due_before_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.schedule(start);

        assert!(debouncer.take_due(start + Duration::from_millis(299)).is_none());
        assert!(debouncer.take_due(start + DELAY).is_some());
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_reschedule_pushes_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        let first = debouncer.schedule(start);
        let second = debouncer.schedule(start + Duration::from_millis(200));

        assert!(!debouncer.is_current(&first));
        assert!(debouncer.take_due(start + DELAY).is_none());

        let fired = debouncer.take_due(start + Duration::from_millis(500)).unwrap();
        assert_eq!(fired, second);
        assert!(debouncer.is_current(&fired));
    }

    #[test]
    fn test_cancel_invalidates_outstanding_tickets() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        let ticket = debouncer.schedule(start);

        debouncer.cancel();

        assert!(!debouncer.is_current(&ticket));
        assert!(debouncer.deadline().is_none());
        assert!(debouncer.take_due(start + DELAY * 2).is_none());
    }
}
