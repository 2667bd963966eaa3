use super::series::{SeriesState, Thresholds};
use super::TapAdapter;
use crate::dispatch::{emit, Emission, EventSink};
use crate::input::{PointerEvent, PointerKind};
use crate::timer::{Clock, Scheduler, TimerHandle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Touch-driven tap detection for one target.
///
/// * start arms a stall timer that resets the series `speed` after that
///   start; only the next start re-arms it, so it outlives the end
/// * any move turns the contact into a drag: the series resets and its end is
///   not a tap
/// * an end involving more than one contact resets without emitting; the
///   gesture stays disqualified until every finger is lifted
/// * a clean end advances the series at the end position
pub struct TouchAdapter {
    thresholds: Thresholds,
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn Scheduler>,
    sink: Box<dyn EventSink>,
    state: Rc<RefCell<SeriesState>>,
    pending_reset: Option<TimerHandle>,
    dragging: bool,
    multi_contact: bool,
}

impl TouchAdapter {
    pub fn new(
        thresholds: Thresholds,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
        sink: Box<dyn EventSink>,
    ) -> Self {
        Self {
            thresholds,
            clock,
            scheduler,
            sink,
            state: Rc::new(RefCell::new(SeriesState::new())),
            pending_reset: None,
            dragging: false,
            multi_contact: false,
        }
    }

    pub fn tap_count(&self) -> u32 {
        self.state.borrow().tap_count()
    }

    /// Whether a stall timer is armed
    pub fn reset_armed(&self) -> bool {
        self.pending_reset
            .is_some_and(|handle| self.scheduler.is_pending(handle))
    }

    fn cancel_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn arm_reset(&mut self) {
        self.cancel_reset();
        let state: Weak<RefCell<SeriesState>> = Rc::downgrade(&self.state);
        let handle = self.scheduler.schedule(
            self.thresholds.speed,
            Box::new(move || {
                if let Some(state) = state.upgrade() {
                    log::debug!("touch stalled, resetting tap series");
                    state.borrow_mut().reset();
                }
            }),
        );
        self.pending_reset = Some(handle);
    }

    fn touch_start(&mut self, event: &PointerEvent) {
        if event.touches.len() > 1 {
            self.multi_contact = true;
        } else if !self.multi_contact {
            self.dragging = false;
        }
        self.arm_reset();
    }

    fn touch_end(&mut self, event: &mut PointerEvent) -> Option<Emission> {
        if event.contact_count() > 1 || self.multi_contact {
            self.state.borrow_mut().reset();
            self.multi_contact = !event.touches.is_empty();
            log::debug!("multi-touch end, tap series reset");
            return None;
        }

        if std::mem::take(&mut self.dragging) {
            return None;
        }

        let now = self.clock.now();
        let position = event.primary_contact().client;
        let series = self
            .state
            .borrow_mut()
            .advance(now, position, &self.thresholds);

        Some(emit(
            self.sink.as_mut(),
            event,
            series.tap_count,
            series.emit_double,
            now,
        ))
    }
}

impl TapAdapter for TouchAdapter {
    fn handle(&mut self, event: &mut PointerEvent) -> Option<Emission> {
        match event.kind {
            PointerKind::TouchStart => {
                self.touch_start(event);
                None
            }
            PointerKind::TouchMove => {
                self.state.borrow_mut().reset();
                self.dragging = true;
                None
            }
            PointerKind::TouchEnd => self.touch_end(event),
            PointerKind::TouchCancel => {
                self.reset();
                None
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.cancel_reset();
        self.state.borrow_mut().reset();
        self.dragging = false;
        self.multi_contact = false;
    }
}

impl Drop for TouchAdapter {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}
