use std::time::{Duration, Instant};

/// Handle of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    deadline: Instant,
    event: T,
}

/// Timer service turning deadlines into ordinary events.
///
/// Used for session activation timeouts, continuation-point lifetimes, and secure-channel
/// establishment timeouts. The owner calls [`collect_due()`](Self::collect_due) periodically and
/// feeds the expired events into the dispatcher queue; there is no pre-emption of in-flight
/// handlers.
#[derive(Debug)]
pub struct TimerManager<T> {
    /// Pending timers ordered by deadline, earliest last (cheap removal from the tail).
    pending: Vec<Timer<T>>,
    next_id: u64,
}

impl<T> Default for TimerManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerManager<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Schedules `event` to fire at `deadline`.
    pub fn schedule_at(&mut self, deadline: Instant, event: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let timer = Timer {
            id,
            deadline,
            event,
        };
        // Insertion keeps the earliest deadline at the tail.
        let position = self
            .pending
            .partition_point(|pending| pending.deadline > deadline);
        self.pending.insert(position, timer);
        id
    }

    /// Schedules `event` to fire after `delay` from now.
    pub fn schedule(&mut self, delay: Duration, event: T) -> TimerId {
        self.schedule_at(Instant::now() + delay, event)
    }

    /// Cancels a pending timer. Returns the event when the timer had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let position = self.pending.iter().position(|timer| timer.id == id)?;
        Some(self.pending.remove(position).event)
    }

    /// Removes and returns the events of all timers due at `now`, earliest first.
    pub fn collect_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(last) = self.pending.last() {
            if last.deadline > now {
                break;
            }
            due.push(self.pending.pop().expect("tail was just checked").event);
        }
        due
    }

    /// Deadline of the next timer to fire, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.last().map(|timer| timer.deadline)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TimerManager;

    #[test]
    fn fires_in_deadline_order() {
        let mut timers = TimerManager::new();
        let now = Instant::now();
        timers.schedule_at(now + Duration::from_millis(20), "second");
        timers.schedule_at(now + Duration::from_millis(10), "first");
        timers.schedule_at(now + Duration::from_millis(30), "third");

        assert_eq!(timers.collect_due(now), Vec::<&str>::new());
        assert_eq!(
            timers.collect_due(now + Duration::from_millis(25)),
            vec!["first", "second"]
        );
        assert_eq!(
            timers.collect_due(now + Duration::from_millis(35)),
            vec!["third"]
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn cancel_removes_pending_timer() {
        let mut timers = TimerManager::new();
        let now = Instant::now();
        let id = timers.schedule_at(now + Duration::from_millis(10), "event");
        assert_eq!(timers.cancel(id), Some("event"));
        assert_eq!(timers.cancel(id), None);
        assert!(timers.collect_due(now + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn next_deadline_tracks_earliest() {
        let mut timers = TimerManager::new();
        let now = Instant::now();
        timers.schedule_at(now + Duration::from_millis(20), 2);
        timers.schedule_at(now + Duration::from_millis(10), 1);
        assert_eq!(timers.next_deadline(), Some(now + Duration::from_millis(10)));
    }
}
