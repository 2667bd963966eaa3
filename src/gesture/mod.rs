pub mod legacy;
pub mod pointer;
pub mod series;
pub mod touch;
pub mod xor;

pub use legacy::{ReleaseSource, UnifiedTapHandler};
pub use pointer::PointerAdapter;
pub use series::{Series, SeriesState, Thresholds};
pub use touch::TouchAdapter;
pub use xor::{Action, ClickCount, ExclusiveDispatcher};

use crate::dispatch::{Emission, EventSink};
use crate::input::PointerEvent;
use crate::timer::{Clock, Scheduler};
use std::rc::Rc;

/// Turns raw pointer notifications for one target into tap gestures
pub trait TapAdapter {
    /// Process one raw event. Returns what was emitted, if anything.
    fn handle(&mut self, event: &mut PointerEvent) -> Option<Emission>;

    /// Forget the current series
    fn reset(&mut self);

    /// Release timers and state once the target is gone
    fn dispose(&mut self) {
        self.reset();
    }
}

/// Input modality of the host, detected once by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Touch,
    Pointer,
}

/// Tap detection bound to a single target.
///
/// The ingestion path is chosen once, at bind time.
pub enum TapBinding {
    Touch(TouchAdapter),
    Pointer(PointerAdapter),
}

impl TapBinding {
    pub fn bind(
        modality: Modality,
        thresholds: Thresholds,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
        sink: Box<dyn EventSink>,
    ) -> Self {
        log::debug!("binding tap detection for {:?} input", modality);
        match modality {
            Modality::Touch => Self::Touch(TouchAdapter::new(thresholds, clock, scheduler, sink)),
            Modality::Pointer => Self::Pointer(PointerAdapter::new(thresholds, clock, sink)),
        }
    }

    pub fn modality(&self) -> Modality {
        match self {
            Self::Touch(_) => Modality::Touch,
            Self::Pointer(_) => Modality::Pointer,
        }
    }

    pub fn tap_count(&self) -> u32 {
        match self {
            Self::Touch(a) => a.tap_count(),
            Self::Pointer(a) => a.tap_count(),
        }
    }

    fn adapter(&mut self) -> &mut dyn TapAdapter {
        match self {
            Self::Touch(a) => a,
            Self::Pointer(a) => a,
        }
    }
}

impl TapAdapter for TapBinding {
    fn handle(&mut self, event: &mut PointerEvent) -> Option<Emission> {
        self.adapter().handle(event)
    }

    fn reset(&mut self) {
        self.adapter().reset();
    }

    fn dispose(&mut self) {
        self.adapter().dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{ManualBubble, NodeTree, TapEvent, TapKind, HandlerSlot};
    use crate::input::{Contact, TargetId};
    use crate::timer::{ManualClock, TimerQueue};
    use std::cell::RefCell;

    /// Flat tree where every node handles everything
    #[derive(Clone, Default)]
    struct Everything(Rc<RefCell<Vec<TapKind>>>);

    impl NodeTree for Everything {
        fn parent(&self, _node: TargetId) -> Option<TargetId> {
            None
        }

        fn has_handler(&self, _node: TargetId, _kind: TapKind, slot: HandlerSlot) -> bool {
            slot == HandlerSlot::OnProperty
        }

        fn invoke(&mut self, _node: TargetId, kind: TapKind, _slot: HandlerSlot, _event: &TapEvent) {
            self.0.borrow_mut().push(kind);
        }
    }

    fn bind(modality: Modality) -> (ManualClock, Everything, TapBinding) {
        let clock = ManualClock::new();
        let queue = Rc::new(TimerQueue::new(Rc::new(clock.clone())));
        let tree = Everything::default();
        let binding = TapBinding::bind(
            modality,
            Thresholds::default(),
            Rc::new(clock.clone()),
            queue,
            Box::new(ManualBubble::new(tree.clone())),
        );
        (clock, tree, binding)
    }

    #[test]
    fn test_touch_binding_ignores_clicks() {
        let (_, tree, mut binding) = bind(Modality::Touch);
        assert_eq!(binding.modality(), Modality::Touch);
        assert!(binding
            .handle(&mut PointerEvent::click(TargetId(1), 0.0, 0.0, 1))
            .is_none());

        let c = Contact::at(0, 0.0, 0.0);
        binding.handle(&mut PointerEvent::touch_start(TargetId(1), c));
        assert!(binding
            .handle(&mut PointerEvent::touch_end(TargetId(1), c))
            .is_some());
        assert_eq!(*tree.0.borrow(), vec![TapKind::Tap]);
    }

    #[test]
    fn test_pointer_binding_uses_clicks() {
        let (_, tree, mut binding) = bind(Modality::Pointer);
        binding.handle(&mut PointerEvent::click(TargetId(1), 0.0, 0.0, 1));
        binding.handle(&mut PointerEvent::click(TargetId(1), 0.0, 0.0, 2));
        assert_eq!(binding.tap_count(), 2);
        assert_eq!(*tree.0.borrow(), vec![TapKind::Tap, TapKind::Tap, TapKind::DblTap]);

        binding.dispose();
        assert_eq!(binding.tap_count(), 0);
    }
}
