use super::series::{SeriesState, Thresholds};
use super::TapAdapter;
use crate::dispatch::{emit, Emission, EventSink};
use crate::input::{PointerEvent, PointerKind, TargetId};
use crate::timer::Clock;
use std::collections::HashMap;
use std::rc::Rc;

/// Which mouse notification marks the end of a click.
///
/// Hosts that deliver both a release and a click for one physical press must
/// pick one, or every press would count twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseSource {
    /// Native click events
    #[default]
    Click,
    /// Button release, for hosts without click events (terminals)
    Up,
}

impl ReleaseSource {
    fn kind(self) -> PointerKind {
        match self {
            Self::Click => PointerKind::Click,
            Self::Up => PointerKind::Up,
        }
    }
}

/// One handler for mouse releases and touch ends alike.
///
/// Each accepted event is one step of the series, compared against the
/// previous accepted step on the same target whatever its source. Series are
/// kept per target, so a handler shared between targets never mixes them.
pub struct UnifiedTapHandler {
    thresholds: Thresholds,
    clock: Rc<dyn Clock>,
    sink: Box<dyn EventSink>,
    release: ReleaseSource,
    series: HashMap<TargetId, SeriesState>,
}

impl UnifiedTapHandler {
    pub fn new(thresholds: Thresholds, clock: Rc<dyn Clock>, sink: Box<dyn EventSink>) -> Self {
        Self {
            thresholds,
            clock,
            sink,
            release: ReleaseSource::default(),
            series: HashMap::new(),
        }
    }

    pub fn with_release(mut self, release: ReleaseSource) -> Self {
        self.release = release;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn release(&self) -> ReleaseSource {
        self.release
    }

    /// Taps counted so far in the current series of `target`
    pub fn tap_count(&self, target: TargetId) -> u32 {
        self.series.get(&target).map_or(0, SeriesState::tap_count)
    }

    fn accepts(&self, kind: PointerKind) -> bool {
        kind == PointerKind::TouchEnd || kind == self.release.kind()
    }
}

impl TapAdapter for UnifiedTapHandler {
    fn handle(&mut self, event: &mut PointerEvent) -> Option<Emission> {
        if !self.accepts(event.kind) {
            return None;
        }

        let now = self.clock.now();
        let position = event.primary_contact().client;
        let series = self
            .series
            .entry(event.target)
            .or_default()
            .advance(now, position, &self.thresholds);

        Some(emit(
            self.sink.as_mut(),
            event,
            series.tap_count,
            series.emit_double,
            now,
        ))
    }

    fn reset(&mut self) {
        self.series.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{DispatchHost, NativeDispatch, TapEvent, TapKind};
    use crate::input::{Contact, Point};
    use crate::timer::ManualClock;
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<TapEvent>>>,
        cancel_dbltap: bool,
    }

    impl DispatchHost for Recorder {
        fn dispatch_event(&mut self, event: &TapEvent) -> bool {
            self.events.borrow_mut().push(event.clone());
            !(self.cancel_dbltap && event.kind == TapKind::DblTap)
        }
    }

    fn handler(recorder: &Recorder) -> (ManualClock, UnifiedTapHandler) {
        let clock = ManualClock::new();
        let handler = UnifiedTapHandler::new(
            Thresholds::default(),
            Rc::new(clock.clone()),
            Box::new(NativeDispatch::new(recorder.clone())),
        );
        (clock, handler)
    }

    fn terminal_handler(recorder: &Recorder) -> (ManualClock, UnifiedTapHandler) {
        let (clock, handler) = handler(recorder);
        (clock, handler.with_release(ReleaseSource::Up))
    }

    fn kinds(recorder: &Recorder) -> Vec<(TapKind, u32)> {
        recorder
            .events
            .borrow()
            .iter()
            .map(|e| (e.kind, e.detail))
            .collect()
    }

    #[test]
    fn test_triple_click_fires_one_dbltap() {
        let recorder = Recorder::default();
        let (clock, mut h) = terminal_handler(&recorder);
        let t = TargetId(1);

        for _ in 0..3 {
            let mut e = PointerEvent::new(PointerKind::Up, t, Point::new(10.0, 10.0));
            h.handle(&mut e);
            clock.advance_ms(120);
        }

        assert_eq!(
            kinds(&recorder),
            vec![
                (TapKind::Tap, 1),
                (TapKind::Tap, 2),
                (TapKind::DblTap, 2),
                (TapKind::Tap, 3)
            ]
        );
    }

    #[test]
    fn test_mixed_sources_share_one_series() {
        let recorder = Recorder::default();
        let (clock, mut h) = handler(&recorder);
        let t = TargetId(1);

        let mut click = PointerEvent::click(t, 20.0, 20.0, 1);
        assert_eq!(h.handle(&mut click).unwrap().tap_count, 1);
        clock.advance_ms(100);
        let mut end = PointerEvent::touch_end(t, Contact::at(0, 25.0, 22.0));
        let emission = h.handle(&mut end).unwrap();
        assert_eq!(emission.tap_count, 2);
        assert!(emission.dbltap.is_some());
    }

    #[test]
    fn test_release_and_click_of_one_press_count_once() {
        let t = TargetId(1);
        for release in [ReleaseSource::Click, ReleaseSource::Up] {
            let recorder = Recorder::default();
            let (_, h) = handler(&recorder);
            let mut h = h.with_release(release);

            h.handle(&mut PointerEvent::new(PointerKind::Up, t, Point::new(5.0, 5.0)));
            h.handle(&mut PointerEvent::click(t, 5.0, 5.0, 1));

            assert_eq!(kinds(&recorder), vec![(TapKind::Tap, 1)]);
            assert_eq!(h.tap_count(t), 1);
        }
    }

    #[test]
    fn test_shared_handler_keeps_targets_apart() {
        let recorder = Recorder::default();
        let (clock, mut h) = handler(&recorder);
        let (a, b) = (TargetId(1), TargetId(2));

        h.handle(&mut PointerEvent::click(a, 5.0, 5.0, 1));
        clock.advance_ms(50);
        let other = h.handle(&mut PointerEvent::click(b, 5.0, 5.0, 1)).unwrap();
        assert_eq!(other.tap_count, 1);
        assert!(other.dbltap.is_none());

        clock.advance_ms(50);
        let second = h.handle(&mut PointerEvent::click(a, 5.0, 5.0, 2)).unwrap();
        assert_eq!(second.tap_count, 2);
        assert!(second.dbltap.is_some());
        assert_eq!(h.tap_count(b), 1);

        h.reset();
        assert_eq!(h.tap_count(a), 0);
    }

    #[test]
    fn test_ignores_non_release_events() {
        let recorder = Recorder::default();
        let (_, mut h) = handler(&recorder);
        let mut down = PointerEvent::new(PointerKind::Down, TargetId(1), Point::new(0.0, 0.0));
        assert!(h.handle(&mut down).is_none());
        assert!(recorder.events.borrow().is_empty());
    }

    #[test]
    fn test_slow_or_far_taps_restart() {
        let recorder = Recorder::default();
        let (clock, mut h) = handler(&recorder);
        let t = TargetId(1);

        h.handle(&mut PointerEvent::click(t, 0.0, 0.0, 1));
        clock.advance_ms(600);
        assert_eq!(h.handle(&mut PointerEvent::click(t, 0.0, 0.0, 1)).unwrap().tap_count, 1);
        clock.advance_ms(100);
        assert_eq!(h.handle(&mut PointerEvent::click(t, 0.0, 41.0, 1)).unwrap().tap_count, 1);
    }

    #[test]
    fn test_canceled_dbltap_cancels_source() {
        let recorder = Recorder {
            cancel_dbltap: true,
            ..Recorder::default()
        };
        let (clock, mut h) = handler(&recorder);
        let t = TargetId(1);

        let mut first = PointerEvent::click(t, 0.0, 0.0, 1);
        h.handle(&mut first);
        assert!(!first.default_prevented());

        clock.advance_ms(50);
        let mut second = PointerEvent::click(t, 0.0, 0.0, 2);
        h.handle(&mut second);
        assert!(second.default_prevented());
        assert!(second.propagation_stopped());
    }

    #[test]
    fn test_malformed_coordinates_restart_series() {
        let recorder = Recorder::default();
        let (clock, mut h) = terminal_handler(&recorder);
        let t = TargetId(1);

        let first = h.handle(&mut PointerEvent::new(PointerKind::Up, t, Point::parse("x", "y")));
        assert_eq!(first.unwrap().tap_count, 1);
        clock.advance_ms(10);
        let mut up = PointerEvent::new(PointerKind::Up, t, Point::new(0.0, 0.0));
        let emission = h.handle(&mut up).unwrap();
        assert_eq!(emission.tap_count, 1);
    }
}
