use super::event::{Button, Modifiers, Point, PointerEvent, PointerKind, TargetId};
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

fn map_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Primary,
        MouseButton::Middle => Button::Auxiliary,
        MouseButton::Right => Button::Secondary,
    }
}

/// Maps terminal key modifiers onto gesture modifiers
pub fn map_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
        meta: modifiers.contains(KeyModifiers::SUPER) || modifiers.contains(KeyModifiers::META),
    }
}

/// Maps a raw terminal mouse event to a pointer event on `target`.
///
/// A button release is the tap source; terminals report no click count, so
/// `detail` is left empty. Scroll events are not pointer interactions.
pub fn map_mouse_event(event: MouseEvent, target: TargetId) -> Option<PointerEvent> {
    let position = Point::new(f64::from(event.column), f64::from(event.row));

    let (kind, button) = match event.kind {
        MouseEventKind::Down(b) => (PointerKind::Down, map_button(b)),
        MouseEventKind::Up(b) => (PointerKind::Up, map_button(b)),
        MouseEventKind::Drag(b) => (PointerKind::Move, map_button(b)),
        MouseEventKind::Moved => (PointerKind::Move, Button::Primary),
        _ => return None,
    };

    log::trace!("mouse {:?} at {},{}", kind, event.column, event.row);

    Some(
        PointerEvent::new(kind, target, position)
            .with_button(button)
            .with_modifiers(map_modifiers(event.modifiers)),
    )
}
