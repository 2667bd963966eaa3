use std::time::Duration;

/// Identifier of a node in the host's UI tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// A 2-D position in pixels (or cells, for terminal hosts)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const NAN: Point = Point {
        x: f64::NAN,
        y: f64::NAN,
    };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point from loosely-typed host fields. Missing values become NaN.
    pub fn from_raw(x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            x: x.unwrap_or(f64::NAN),
            y: y.unwrap_or(f64::NAN),
        }
    }

    /// Parse host-provided text coordinates; anything unparsable becomes NaN.
    pub fn parse(x: &str, y: &str) -> Self {
        Self::from_raw(x.trim().parse().ok(), y.trim().parse().ok())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// `Some(self)` only when both coordinates are usable
    pub fn finite(self) -> Option<Self> {
        self.is_finite().then_some(self)
    }
}

/// Keyboard modifiers held during the interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }
}

/// Pointer button, numbered like DOM `button` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Button {
    /// Usually left
    #[default]
    Primary,
    /// Usually middle
    Auxiliary,
    /// Usually right
    Secondary,
    Other(i16),
}

impl Button {
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            n => Self::Other(n),
        }
    }

    pub fn code(&self) -> i16 {
        match self {
            Self::Primary => 0,
            Self::Auxiliary => 1,
            Self::Secondary => 2,
            Self::Other(n) => *n,
        }
    }
}

/// One finger on a touch surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contact {
    pub id: u32,
    pub client: Point,
    pub screen: Point,
    pub page: Point,
}

impl Contact {
    pub fn at(id: u32, x: f64, y: f64) -> Self {
        let p = Point::new(x, y);
        Self {
            id,
            client: p,
            screen: p,
            page: p,
        }
    }
}

/// Raw interaction kinds delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Native click, possibly carrying a platform click count
    Click,
    Down,
    Up,
    Move,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl PointerKind {
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel
        )
    }
}

/// A raw pointer or touch notification.
///
/// Handlers that reject the synthetic gesture cancel this event through
/// [`PointerEvent::cancel`].
#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: TargetId,
    pub related_target: Option<TargetId>,
    pub client: Point,
    pub screen: Point,
    pub page: Point,
    pub modifiers: Modifiers,
    pub button: Button,
    /// Platform multi-click counter, when the host supplies one
    pub detail: Option<u32>,
    /// Contacts still on the surface
    pub touches: Vec<Contact>,
    /// Contacts that changed in this notification
    pub changed_touches: Vec<Contact>,
    /// Host timestamp; informational, gesture timing uses the injected clock
    pub timestamp: Duration,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, target: TargetId, client: Point) -> Self {
        Self {
            kind,
            target,
            related_target: None,
            client,
            screen: client,
            page: client,
            modifiers: Modifiers::default(),
            button: Button::Primary,
            detail: None,
            touches: Vec::new(),
            changed_touches: Vec::new(),
            timestamp: Duration::ZERO,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Native click with a platform click count
    pub fn click(target: TargetId, x: f64, y: f64, detail: u32) -> Self {
        Self {
            detail: Some(detail),
            ..Self::new(PointerKind::Click, target, Point::new(x, y))
        }
    }

    pub fn touch_start(target: TargetId, contact: Contact) -> Self {
        Self {
            touches: vec![contact],
            changed_touches: vec![contact],
            ..Self::new(PointerKind::TouchStart, target, contact.client)
        }
    }

    pub fn touch_move(target: TargetId, contact: Contact) -> Self {
        Self {
            touches: vec![contact],
            changed_touches: vec![contact],
            ..Self::new(PointerKind::TouchMove, target, contact.client)
        }
    }

    /// Last finger lifted: `touches` is empty, the lifted contact is changed
    pub fn touch_end(target: TargetId, contact: Contact) -> Self {
        Self {
            changed_touches: vec![contact],
            ..Self::new(PointerKind::TouchEnd, target, contact.client)
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// Number of contact points involved in this notification
    pub fn contact_count(&self) -> usize {
        self.touches.len() + self.changed_touches.len()
    }

    /// The contact that produced this notification, falling back to the
    /// event's own coordinates for mouse input.
    pub fn primary_contact(&self) -> Contact {
        self.changed_touches.first().copied().unwrap_or(Contact {
            id: 0,
            client: self.client,
            screen: self.screen,
            page: self.page,
        })
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress both the default action and further propagation
    pub fn cancel(&mut self) {
        self.prevent_default();
        self.stop_propagation();
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
