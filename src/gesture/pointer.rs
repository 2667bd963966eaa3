use super::series::{SeriesState, Thresholds};
use super::TapAdapter;
use crate::dispatch::{emit, Emission, EventSink};
use crate::input::{PointerEvent, PointerKind};
use crate::timer::Clock;
use std::rc::Rc;

/// Tap detection on hosts with native clicks.
///
/// The platform's click counter is the tap count. The only local check is
/// distance from the previous click, which gates `dbltap`.
pub struct PointerAdapter {
    thresholds: Thresholds,
    clock: Rc<dyn Clock>,
    sink: Box<dyn EventSink>,
    state: SeriesState,
}

impl PointerAdapter {
    pub fn new(thresholds: Thresholds, clock: Rc<dyn Clock>, sink: Box<dyn EventSink>) -> Self {
        Self {
            thresholds,
            clock,
            sink,
            state: SeriesState::new(),
        }
    }

    pub fn tap_count(&self) -> u32 {
        self.state.tap_count()
    }
}

impl TapAdapter for PointerAdapter {
    fn handle(&mut self, event: &mut PointerEvent) -> Option<Emission> {
        if event.kind != PointerKind::Click {
            return None;
        }

        let now = self.clock.now();
        // hosts without a counter report every click as a single
        let count = event.detail.unwrap_or(1);
        let series = self
            .state
            .observe(now, event.client, count, &self.thresholds);

        Some(emit(
            self.sink.as_mut(),
            event,
            series.tap_count,
            series.emit_double,
            now,
        ))
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{DispatchHost, NativeDispatch, TapEvent, TapKind};
    use crate::input::TargetId;
    use crate::timer::ManualClock;
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<TapEvent>>>);

    impl DispatchHost for Recorder {
        fn dispatch_event(&mut self, event: &TapEvent) -> bool {
            self.0.borrow_mut().push(event.clone());
            true
        }
    }

    fn adapter() -> (Recorder, PointerAdapter) {
        let recorder = Recorder::default();
        let adapter = PointerAdapter::new(
            Thresholds::default(),
            Rc::new(ManualClock::new()),
            Box::new(NativeDispatch::new(recorder.clone())),
        );
        (recorder, adapter)
    }

    const T: TargetId = TargetId(2);

    #[test]
    fn test_platform_count_is_trusted() {
        let (recorder, mut a) = adapter();
        for detail in 1..=3 {
            a.handle(&mut PointerEvent::click(T, 5.0, 5.0, detail));
        }
        let seen: Vec<(TapKind, u32)> = recorder.0.borrow().iter().map(|e| (e.kind, e.detail)).collect();
        assert_eq!(
            seen,
            vec![
                (TapKind::Tap, 1),
                (TapKind::Tap, 2),
                (TapKind::DblTap, 2),
                (TapKind::Tap, 3)
            ]
        );
    }

    #[test]
    fn test_far_second_click_is_not_dbltap() {
        let (recorder, mut a) = adapter();
        a.handle(&mut PointerEvent::click(T, 0.0, 0.0, 1));
        let emission = a.handle(&mut PointerEvent::click(T, 0.0, 45.0, 2)).unwrap();
        assert_eq!(emission.tap_count, 2);
        assert!(emission.dbltap.is_none());
        assert_eq!(recorder.0.borrow().len(), 2);
    }

    #[test]
    fn test_only_clicks_count() {
        let (recorder, mut a) = adapter();
        let mut up = PointerEvent::click(T, 0.0, 0.0, 1);
        up.kind = PointerKind::Up;
        assert!(a.handle(&mut up).is_none());
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_missing_detail_counts_as_single() {
        let (_, mut a) = adapter();
        let mut e = PointerEvent::click(T, 0.0, 0.0, 1);
        e.detail = None;
        assert_eq!(a.handle(&mut e).unwrap().tap_count, 1);
    }
}
