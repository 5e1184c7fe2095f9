use std::time::Duration;

/// Handle returned by [`Scheduler::schedule_in`], used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct ScheduledTask<T> {
    id: TaskId,
    due: Duration,
    payload: T,
}

/// Deterministic delayed-work queue stepped by the caller.
///
/// Nothing fires on its own: the owner calls [`Scheduler::advance`] with the
/// frame delta (or a test calls it with whatever it likes) and receives the
/// payloads that came due, ordered by due time and then by insertion order.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_in(&mut self, delay: Duration, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(ScheduledTask {
            id,
            due: self.now + delay,
            payload,
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.id != id);
        self.pending.len() != before
    }

    /// Drop every pending payload matching `predicate`. Returns how many were dropped.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| !predicate(&task.payload));
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move time forward and collect everything that came due.
    pub fn advance(&mut self, delta: Duration) -> Vec<T> {
        self.now += delta;
        let now = self.now;

        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by_key(|task| (task.due, task.id.0));
        due.into_iter().map(|task| task.payload).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_in_due_then_insertion_order() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_in(ms(300), "c");
        scheduler.schedule_in(ms(0), "a");
        scheduler.schedule_in(ms(0), "b");

        assert_eq!(scheduler.advance(ms(0)), vec!["a", "b"]);
        assert!(scheduler.advance(ms(299)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), vec!["c"]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn large_step_releases_everything_due() {
        let mut scheduler = Scheduler::default();
        for delay in [900, 300, 600] {
            scheduler.schedule_in(ms(delay), delay);
        }
        assert_eq!(scheduler.advance(ms(1000)), vec![300, 600, 900]);
    }

    #[test]
    fn cancelled_work_never_fires() {
        let mut scheduler = Scheduler::default();
        let keep = scheduler.schedule_in(ms(10), 1);
        let drop = scheduler.schedule_in(ms(10), 2);
        scheduler.schedule_in(ms(10), 3);

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop));
        assert_eq!(scheduler.cancel_where(|v| *v == 3), 1);
        assert_eq!(scheduler.advance(ms(10)), vec![1]);
        assert!(!scheduler.cancel(keep));
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut scheduler = Scheduler::default();
        scheduler.advance(ms(500));
        scheduler.schedule_in(ms(100), ());
        assert!(scheduler.advance(ms(99)).is_empty());
        assert_eq!(scheduler.advance(ms(1)).len(), 1);
        assert_eq!(scheduler.now(), ms(600));
    }
}
