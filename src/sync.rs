//! # Inter-Task Handoff
//!
//! A one-slot, single-producer / single-consumer mailbox. The producer
//! publishes, the consumer takes (consume-and-clear).
//!
//! No atomics or critical sections are involved: the mailbox lives in
//! the shared context that the scheduler lends to one task at a time, so
//! producer and consumer can never touch it concurrently. A preemptive
//! port would have to back this with a compare-and-swap slot or a
//! bounded channel.
//!
//! ## Overwrite policy
//!
//! Publishing into a full slot overwrites the unconsumed value (newest
//! wins). The displaced value is handed back to the producer so it can
//! at least log the loss. With the default periods the consumer drains
//! the slot every 50 ms while a full press cycle takes at least 100 ms
//! of debouncing, so this only happens if the consumer is starved.

#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Option<T>,
}

impl<T> Mailbox<T> {
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Store `value`, returning the unconsumed value it displaced.
    pub fn publish(&mut self, value: T) -> Option<T> {
        self.slot.replace(value)
    }

    /// Consume the pending value, leaving the slot empty.
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// Look at the pending value without consuming it.
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref()
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_then_take_clears_slot() {
        let mut mb = Mailbox::new();
        assert!(!mb.is_pending());

        assert_eq!(mb.publish(7u32), None);
        assert!(mb.is_pending());
        assert_eq!(mb.peek(), Some(&7));

        assert_eq!(mb.take(), Some(7));
        assert!(!mb.is_pending());
        assert_eq!(mb.take(), None);
    }

    #[test]
    fn test_publish_into_full_slot_overwrites() {
        let mut mb = Mailbox::new();
        mb.publish(1u32);
        assert_eq!(mb.publish(2), Some(1));
        assert_eq!(mb.take(), Some(2));
    }
}
