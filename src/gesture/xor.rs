//! Mutually exclusive multi-click actions.
//!
//! Register one action per click count. Lower counts wait out the debounce
//! window in case a higher count follows; the highest registered count runs
//! immediately. At most one action is ever pending.

use crate::config::{coerce_threshold, DEFAULT_XOR_SPEED_MS};
use crate::dispatch::TapEvent;
use crate::gesture::series::ms;
use crate::input::{PointerEvent, TargetId};
use crate::timer::{Scheduler, TimerHandle};
use std::rc::Rc;
use std::time::Duration;

/// Events that carry a platform click count
pub trait ClickCount {
    fn click_count(&self) -> u32;
}

impl ClickCount for PointerEvent {
    fn click_count(&self) -> u32 {
        self.detail.unwrap_or(0)
    }
}

impl ClickCount for TapEvent {
    fn click_count(&self) -> u32 {
        self.detail
    }
}

/// An action invoked with the receiver the click was delivered to
pub type Action<E> = Rc<dyn Fn(TargetId, &E)>;

pub struct ExclusiveDispatcher<E> {
    actions: Vec<Action<E>>,
    speed: Duration,
    scheduler: Rc<dyn Scheduler>,
    pending: Option<TimerHandle>,
}

impl<E> ExclusiveDispatcher<E> {
    /// Cancel the pending lower-count action, if any
    pub fn kill(&mut self) {
        if let Some(handle) = self.pending.take() {
            if self.scheduler.cancel(handle) {
                log::debug!("pending click action canceled");
            }
        }
    }

    /// Whether a deferred action is still waiting to run
    pub fn has_pending(&self) -> bool {
        self.pending
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    /// Highest registered click count
    pub fn arity(&self) -> usize {
        self.actions.len()
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Cancel anything pending and drop every action
    pub fn dispose(&mut self) {
        self.kill();
        self.actions.clear();
    }
}

impl<E: ClickCount + Clone + 'static> ExclusiveDispatcher<E> {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            actions: Vec::new(),
            speed: ms(DEFAULT_XOR_SPEED_MS),
            scheduler,
            pending: None,
        }
    }

    /// Construct with actions ordered by click count and a raw speed in ms
    pub fn with_actions(
        scheduler: Rc<dyn Scheduler>,
        actions: Vec<Action<E>>,
        speed_ms: Option<f64>,
    ) -> Self {
        let mut dispatcher = Self::new(scheduler).with_speed_ms(speed_ms);
        dispatcher.actions = actions;
        dispatcher
    }

    /// Register the action for the next click count
    pub fn on(mut self, action: impl Fn(TargetId, &E) + 'static) -> Self {
        self.actions.push(Rc::new(action));
        self
    }

    /// Debounce window in ms; unusable values fall back to 300ms
    pub fn with_speed_ms(mut self, speed_ms: Option<f64>) -> Self {
        self.speed = ms(coerce_threshold(speed_ms, DEFAULT_XOR_SPEED_MS));
        self
    }

    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = if speed.is_zero() {
            ms(DEFAULT_XOR_SPEED_MS)
        } else {
            speed
        };
        self
    }

    /// Route one click to the action registered for its count.
    pub fn xor(&mut self, receiver: TargetId, event: &E) {
        self.kill();

        let count = event.click_count() as usize;
        let Some(action) = count
            .checked_sub(1)
            .and_then(|i| self.actions.get(i))
            .cloned()
        else {
            return;
        };

        if count < self.actions.len() {
            let snapshot = event.clone();
            log::debug!("click {} deferred for {:?}", count, self.speed);
            self.pending = Some(self.scheduler.schedule(
                self.speed,
                Box::new(move || action(receiver, &snapshot)),
            ));
        } else {
            action(receiver, event);
        }
    }
}

impl<E> Drop for ExclusiveDispatcher<E> {
    fn drop(&mut self) {
        self.kill();
    }
}
