pub mod event;
pub mod mouse;

pub use event::{Button, Contact, Modifiers, Point, PointerEvent, PointerKind, TargetId};
pub use mouse::map_mouse_event;
