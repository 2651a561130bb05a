//! Routing of winit window events into pointer events.
//!
//! winit reports raw cursor and button input. Hit-test arbitration works on
//! higher-level pointer events (moved vs. dragged, clicked), so each window
//! keeps a [`PointerTracker`] that remembers the cursor position and held
//! buttons between events.
//!
//! ```ignore
//! use horizon_decorations::WindowDecorations;
//!
//! fn window_event(decorations: &mut WindowDecorations, id: WindowId, event: &WindowEvent) {
//!     let Some(window) = decorations.find_by_native(id) else { return };
//!     let evaluations = decorations.handle_window_event(window, event, |ctx| {
//!         if ctx.in_title_bar() && ctx.event().position.x < 200.0 {
//!             ctx.force_hit_test(true);
//!         }
//!     });
//!     // Hand `evaluations` to the native title bar layer.
//! }
//! ```

use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::dispatch::{PointerEvent, PointerEventKind};
use crate::types::Point;

/// Tracks pointer state for one window and translates winit events.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Point,
    pressed: Vec<MouseButton>,
    moved_since_press: bool,
    inside: bool,
}

impl PointerTracker {
    /// Create a tracker with the pointer outside the window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position in logical window coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Whether the pointer is inside the window.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Whether any mouse button is held.
    pub fn is_button_held(&self) -> bool {
        !self.pressed.is_empty()
    }

    /// Translate one winit event into zero or more pointer events.
    ///
    /// `scale_factor` converts physical cursor positions to logical ones.
    /// A release that follows its press without intervening motion also
    /// yields a [`PointerEventKind::Clicked`] event.
    pub fn translate(&mut self, event: &WindowEvent, scale_factor: f64) -> Vec<PointerEvent> {
        match event {
            WindowEvent::CursorEntered { .. } => {
                self.inside = true;
                vec![self.event(PointerEventKind::Entered)]
            }
            WindowEvent::CursorLeft { .. } => {
                self.inside = false;
                vec![self.event(PointerEventKind::Exited)]
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                self.position = Point::new(logical.x, logical.y);
                self.inside = true;
                if self.is_button_held() {
                    self.moved_since_press = true;
                    vec![self.event(PointerEventKind::Dragged)]
                } else {
                    vec![self.event(PointerEventKind::Moved)]
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    if !self.pressed.contains(button) {
                        self.pressed.push(*button);
                    }
                    self.moved_since_press = false;
                    vec![self.event(PointerEventKind::Pressed)]
                }
                ElementState::Released => {
                    let was_held = self.pressed.contains(button);
                    self.pressed.retain(|held| held != button);
                    let mut events = vec![self.event(PointerEventKind::Released)];
                    if was_held && !self.moved_since_press {
                        events.push(self.event(PointerEventKind::Clicked));
                    }
                    events
                }
            },
            WindowEvent::MouseWheel { .. } => vec![self.event(PointerEventKind::Wheel)],
            _ => Vec::new(),
        }
    }

    fn event(&self, kind: PointerEventKind) -> PointerEvent {
        PointerEvent::new(kind, self.position)
    }
}
