use std::rc::Rc;

use gloo_timers::callback::Timeout;

use super::engine::RevealTarget;

/// Somewhere to park a reveal until its delay has elapsed.
///
/// Scheduled work is never cancelled: once handed over, a target always comes back
/// through [`RevealEngine::fire`](super::engine::RevealEngine::fire).
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, target: RevealTarget);
}

/// Browser timers. Each scheduled target becomes a forgotten `setTimeout` that
/// hands the target to `dispatch` when it expires.
#[derive(Clone)]
pub struct TimeoutScheduler {
    dispatch: Rc<dyn Fn(RevealTarget)>,
}

impl TimeoutScheduler {
    pub fn new(dispatch: impl Fn(RevealTarget) + 'static) -> Self {
        Self {
            dispatch: Rc::new(dispatch),
        }
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&mut self, delay_ms: u32, target: RevealTarget) {
        let dispatch = self.dispatch.clone();
        Timeout::new(delay_ms, move || dispatch(target)).forget();
    }
}

/// Virtual clock for tests: nothing fires until the clock is advanced.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    next_seq: u64,
    queue: Vec<(u64, u64, RevealTarget)>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Moves the clock to `at` and returns every target due by then, in firing
    /// order (deadline first, then scheduling order).
    pub fn advance_to(&mut self, at: u64) -> Vec<(u64, RevealTarget)> {
        assert!(at >= self.now, "virtual clock cannot run backwards");
        self.now = at;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|(fire_at, _, _)| *fire_at <= at);
        self.queue = rest;
        due.sort_by_key(|(fire_at, seq, _)| (*fire_at, *seq));
        due.into_iter().map(|(fire_at, _, target)| (fire_at, target)).collect()
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u32, target: RevealTarget) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push((self.now + u64::from(delay_ms), seq, target));
    }
}
