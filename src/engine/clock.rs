//! Timer facility driving the simulation.
//!
//! Time is measured as a [`Duration`] since an epoch chosen by whoever drives
//! the [`Scheduler`]: the terminal front end feeds it wall-clock time, while
//! tests step it by hand.
use crate::consts;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// The events delivered by the simulation clock
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClockEvent {
    /// Time to move the snake
    Tick,

    /// Another second of play has elapsed
    Second,
}

/// Identifies a timer created by [`Scheduler::schedule()`]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct TimerHandle(u64);

/// A facility for firing periodic [`ClockEvent`]s
pub(crate) trait Scheduler: fmt::Debug {
    /// Start a timer that fires `event` every `period`, first firing one
    /// `period` from now.
    fn schedule(&mut self, period: Duration, event: ClockEvent) -> TimerHandle;

    /// Destroy a timer.  It will not fire again, even if it is already due.
    fn cancel(&mut self, handle: TimerHandle);

    /// Stop a timer from firing while remembering how long it had left until
    /// its next firing
    fn suspend(&mut self, handle: TimerHandle);

    /// Restart a suspended timer.  Its next firing happens after the time it
    /// had left when suspended.
    fn resume(&mut self, handle: TimerHandle);

    /// Return the event of the earliest timer due at or before `now`,
    /// advancing the scheduler's clock to that timer's due time and rearming
    /// it for its next period.  If nothing is due, the clock advances to `now`
    /// and `None` is returned.
    fn poll_due(&mut self, now: Duration) -> Option<ClockEvent>;

    /// Return the time at which the next timer is due, if any are armed
    fn next_deadline(&self) -> Option<Duration>;
}

/// The standard [`Scheduler`]: a set of periodic timers keyed by handle.
/// Timers due at the same instant fire in order of creation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TimerQueue {
    now: Duration,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, Timer>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Timer {
    event: ClockEvent,
    period: Duration,
    state: TimerState,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TimerState {
    Armed { due: Duration },
    Suspended { remaining: Duration },
}

impl TimerQueue {
    pub(crate) fn new() -> TimerQueue {
        TimerQueue::default()
    }

    /// The scheduler's current notion of the time
    #[cfg(test)]
    pub(crate) fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that exist, armed or suspended
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, period: Duration, event: ClockEvent) -> TimerHandle {
        let period = period.max(consts::MIN_TIMER_PERIOD);
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.insert(
            handle,
            Timer {
                event,
                period,
                state: TimerState::Armed {
                    due: self.now + period,
                },
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }

    fn suspend(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.timers.get_mut(&handle) {
            if let TimerState::Armed { due } = timer.state {
                timer.state = TimerState::Suspended {
                    remaining: due.saturating_sub(self.now),
                };
            }
        }
    }

    fn resume(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.timers.get_mut(&handle) {
            if let TimerState::Suspended { remaining } = timer.state {
                timer.state = TimerState::Armed {
                    due: self.now + remaining,
                };
            }
        }
    }

    fn poll_due(&mut self, now: Duration) -> Option<ClockEvent> {
        let now = now.max(self.now);
        let next = self
            .timers
            .iter_mut()
            .filter_map(|(&handle, timer)| match timer.state {
                TimerState::Armed { due } if due <= now => Some((due, handle, timer)),
                _ => None,
            })
            .min_by_key(|&(due, handle, _)| (due, handle));
        match next {
            Some((due, _, timer)) => {
                self.now = due;
                timer.state = TimerState::Armed {
                    due: due + timer.period,
                };
                Some(timer.event)
            }
            None => {
                self.now = now;
                None
            }
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .values()
            .filter_map(|timer| match timer.state {
                TimerState::Armed { due } => Some(due),
                TimerState::Suspended { .. } => None,
            })
            .min()
    }
}

/// The pair of timers that pace a game: the movement tick and the one-second
/// play-time counter
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SimulationClock {
    timers: Option<[TimerHandle; 2]>,
}

impl SimulationClock {
    /// Create fresh timers, discarding any existing ones
    pub(crate) fn start<S: Scheduler>(&mut self, scheduler: &mut S, tick_period: Duration) {
        self.stop(scheduler);
        let tick = scheduler.schedule(tick_period, ClockEvent::Tick);
        let second = scheduler.schedule(consts::ELAPSED_PERIOD, ClockEvent::Second);
        self.timers = Some([tick, second]);
    }

    pub(crate) fn suspend<S: Scheduler>(&self, scheduler: &mut S) {
        for handle in self.timers.into_iter().flatten() {
            scheduler.suspend(handle);
        }
    }

    pub(crate) fn resume<S: Scheduler>(&self, scheduler: &mut S) {
        for handle in self.timers.into_iter().flatten() {
            scheduler.resume(handle);
        }
    }

    pub(crate) fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        for handle in self.timers.take().into_iter().flatten() {
            scheduler.cancel(handle);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_started(&self) -> bool {
        self.timers.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(queue: &mut TimerQueue, now: Duration) -> Vec<(ClockEvent, Duration)> {
        std::iter::from_fn(|| queue.poll_due(now).map(|ev| (ev, queue.now()))).collect()
    }

    #[test]
    fn periodic_firing() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), ClockEvent::Tick);
        assert_eq!(queue.next_deadline(), Some(ms(100)));
        assert_eq!(queue.poll_due(ms(99)), None);
        assert_eq!(
            drain(&mut queue, ms(350)),
            [
                (ClockEvent::Tick, ms(100)),
                (ClockEvent::Tick, ms(200)),
                (ClockEvent::Tick, ms(300)),
            ]
        );
        assert_eq!(queue.now(), ms(350));
        assert_eq!(queue.next_deadline(), Some(ms(400)));
    }

    #[test]
    fn interleaved_in_time_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(400), ClockEvent::Second);
        queue.schedule(ms(150), ClockEvent::Tick);
        assert_eq!(
            drain(&mut queue, ms(800)),
            [
                (ClockEvent::Tick, ms(150)),
                (ClockEvent::Tick, ms(300)),
                (ClockEvent::Second, ms(400)),
                (ClockEvent::Tick, ms(450)),
                (ClockEvent::Tick, ms(600)),
                (ClockEvent::Tick, ms(750)),
                (ClockEvent::Second, ms(800)),
            ]
        );
    }

    #[test]
    fn simultaneous_fire_in_creation_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(100), ClockEvent::Second);
        queue.schedule(ms(100), ClockEvent::Tick);
        assert_eq!(
            drain(&mut queue, ms(100)),
            [(ClockEvent::Second, ms(100)), (ClockEvent::Tick, ms(100))]
        );
    }

    #[test]
    fn cancel_due_timer() {
        let mut queue = TimerQueue::new();
        let tick = queue.schedule(ms(100), ClockEvent::Tick);
        let second = queue.schedule(ms(100), ClockEvent::Second);
        assert_eq!(queue.poll_due(ms(100)), Some(ClockEvent::Tick));
        // The second timer is already due, but cancelling it means it never fires
        queue.cancel(second);
        assert_eq!(queue.poll_due(ms(100)), None);
        queue.cancel(tick);
        assert_eq!(queue.next_deadline(), None);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn suspend_preserves_remaining_time() {
        let mut queue = TimerQueue::new();
        let tick = queue.schedule(ms(100), ClockEvent::Tick);
        assert_eq!(queue.poll_due(ms(130)), Some(ClockEvent::Tick));
        assert_eq!(queue.poll_due(ms(130)), None);
        queue.suspend(tick);
        assert_eq!(queue.next_deadline(), None);
        assert_eq!(queue.poll_due(ms(5000)), None);
        queue.resume(tick);
        // 70ms were left when suspended at 130ms
        assert_eq!(queue.next_deadline(), Some(ms(5070)));
        assert_eq!(queue.poll_due(ms(5069)), None);
        assert_eq!(queue.poll_due(ms(5070)), Some(ClockEvent::Tick));
    }

    #[test]
    fn resume_armed_timer_is_noop() {
        let mut queue = TimerQueue::new();
        let tick = queue.schedule(ms(100), ClockEvent::Tick);
        queue.resume(tick);
        assert_eq!(queue.next_deadline(), Some(ms(100)));
    }

    #[test]
    fn clock_lifecycle() {
        let mut queue = TimerQueue::new();
        let mut clock = SimulationClock::default();
        assert!(!clock.is_started());
        clock.start(&mut queue, ms(70));
        assert!(clock.is_started());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.next_deadline(), Some(ms(70)));
        clock.suspend(&mut queue);
        assert_eq!(queue.next_deadline(), None);
        clock.resume(&mut queue);
        assert_eq!(queue.next_deadline(), Some(ms(70)));
        // Restarting replaces the old timers rather than adding to them
        clock.start(&mut queue, ms(40));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.next_deadline(), Some(ms(40)));
        clock.stop(&mut queue);
        assert!(!clock.is_started());
        assert_eq!(queue.len(), 0);
    }
}
