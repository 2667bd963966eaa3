//! Synthetic `tap` / `dbltap` delivery.
//!
//! A binding picks one [`EventSink`] when it is created and never re-checks
//! the host afterwards. [`NativeDispatch`] is the normal path; [`ManualBubble`]
//! serves hosts without a dispatch facility by walking the target's ownership
//! chain, optionally handing off to an [`EventBridge`].

use crate::input::{Button, Modifiers, Point, PointerEvent, TargetId};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapKind {
    Tap,
    DblTap,
}

impl TapKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::DblTap => "dbltap",
        }
    }
}

impl fmt::Display for TapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A synthetic gesture event. Owned and immutable, so it can be kept past the
/// raw event that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct TapEvent {
    pub kind: TapKind,
    /// Position of this tap within its series
    pub detail: u32,
    pub screen: Point,
    pub client: Point,
    pub page: Point,
    pub modifiers: Modifiers,
    pub button: Button,
    pub target: TargetId,
    pub related_target: Option<TargetId>,
    pub timestamp: Duration,
    pub bubbles: bool,
    pub cancelable: bool,
}

impl TapEvent {
    /// Copy the interaction details of `raw` into a synthetic event
    pub fn from_raw(kind: TapKind, detail: u32, raw: &PointerEvent, timestamp: Duration) -> Self {
        let contact = raw.primary_contact();
        Self {
            kind,
            detail,
            screen: contact.screen,
            client: contact.client,
            page: contact.page,
            modifiers: raw.modifiers,
            button: raw.button,
            target: raw.target,
            related_target: raw.related_target,
            timestamp,
            bubbles: true,
            cancelable: true,
        }
    }

    /// Same event re-labelled, used for the `dbltap` that follows a `tap`
    pub fn with_kind(&self, kind: TapKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }
}

/// Outcome of handing one synthetic event to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Host dispatch ran; `canceled` when a listener rejected the default action
    Dispatched { canceled: bool },
    /// A handler slot found on the ownership chain was invoked
    Invoked { node: TargetId },
    /// Handed to the third-party bridge
    Bridged,
    /// Nothing could receive the event
    Undelivered,
}

impl Delivery {
    pub fn canceled(&self) -> bool {
        matches!(self, Self::Dispatched { canceled: true })
    }

    pub fn delivered(&self) -> bool {
        !matches!(self, Self::Undelivered)
    }
}

/// Where synthetic events go.
pub trait EventSink {
    fn deliver(&mut self, event: &TapEvent) -> Delivery;
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn deliver(&mut self, event: &TapEvent) -> Delivery {
        (**self).deliver(event)
    }
}

/// Host synthetic-event facility with bubble/cancel semantics.
pub trait DispatchHost {
    /// Dispatch on `event.target`. Returns `false` if the default action was
    /// canceled by a listener.
    fn dispatch_event(&mut self, event: &TapEvent) -> bool;
}

/// Delivers through the host's own dispatch facility
pub struct NativeDispatch<H> {
    host: H,
}

impl<H: DispatchHost> NativeDispatch<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: DispatchHost> EventSink for NativeDispatch<H> {
    fn deliver(&mut self, event: &TapEvent) -> Delivery {
        let accepted = self.host.dispatch_event(event);
        Delivery::Dispatched {
            canceled: !accepted,
        }
    }
}

/// How a node exposes a gesture handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerSlot {
    /// A handler method named after the gesture (`tap`)
    Direct,
    /// An `on`-prefixed handler property (`ontap`)
    OnProperty,
}

/// The host's ownership tree, for hosts without a dispatch facility
pub trait NodeTree {
    fn parent(&self, node: TargetId) -> Option<TargetId>;

    fn has_handler(&self, node: TargetId, kind: TapKind, slot: HandlerSlot) -> bool;

    fn invoke(&mut self, node: TargetId, kind: TapKind, slot: HandlerSlot, event: &TapEvent);
}

/// Third-party event system used as a last resort
pub trait EventBridge {
    fn trigger(&mut self, origin: TargetId, event: &TapEvent);
}

/// Walks from the event target to the first node with a handler for the
/// gesture and calls it directly.
pub struct ManualBubble<T> {
    tree: T,
    bridge: Option<Box<dyn EventBridge>>,
}

impl<T: NodeTree> ManualBubble<T> {
    pub fn new(tree: T) -> Self {
        Self { tree, bridge: None }
    }

    pub fn with_bridge(mut self, bridge: Box<dyn EventBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    fn find_handler(&self, start: TargetId, kind: TapKind) -> Option<(TargetId, HandlerSlot)> {
        let mut node = Some(start);
        while let Some(current) = node {
            for slot in [HandlerSlot::Direct, HandlerSlot::OnProperty] {
                if self.tree.has_handler(current, kind, slot) {
                    return Some((current, slot));
                }
            }
            node = self.tree.parent(current);
        }
        None
    }
}

impl<T: NodeTree> EventSink for ManualBubble<T> {
    fn deliver(&mut self, event: &TapEvent) -> Delivery {
        if let Some((node, slot)) = self.find_handler(event.target, event.kind) {
            self.tree.invoke(node, event.kind, slot, event);
            return Delivery::Invoked { node };
        }

        match &mut self.bridge {
            Some(bridge) => {
                bridge.trigger(event.target, event);
                Delivery::Bridged
            }
            None => Delivery::Undelivered,
        }
    }
}

/// What one raw event produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    pub tap_count: u32,
    pub tap: Delivery,
    /// Present only on the 2nd tap of a series
    pub dbltap: Option<Delivery>,
}

impl Emission {
    pub fn canceled(&self) -> bool {
        self.tap.canceled() || self.dbltap.is_some_and(|d| d.canceled())
    }
}

/// Deliver `tap`, then `dbltap` when `double`, and cancel `raw` if either was
/// rejected.
pub fn emit(
    sink: &mut dyn EventSink,
    raw: &mut PointerEvent,
    tap_count: u32,
    double: bool,
    timestamp: Duration,
) -> Emission {
    let tap_event = TapEvent::from_raw(TapKind::Tap, tap_count, raw, timestamp);
    let tap = deliver_logged(sink, &tap_event);

    let dbltap = double.then(|| deliver_logged(sink, &tap_event.with_kind(TapKind::DblTap)));

    let emission = Emission {
        tap_count,
        tap,
        dbltap,
    };
    if emission.canceled() {
        raw.cancel();
    }
    emission
}

fn deliver_logged(sink: &mut dyn EventSink, event: &TapEvent) -> Delivery {
    let delivery = sink.deliver(event);
    if !delivery.delivered() {
        log::warn!(
            "{} on target {} had no receiver and was dropped",
            event.kind,
            event.target.0
        );
    }
    delivery
}
