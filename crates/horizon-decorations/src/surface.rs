//! Window surfaces: the host windows custom title bars attach to.
//!
//! A [`WindowSurface`] owns the geometry of a window, the stack of UI
//! components laid out in it, and its decoration slot. The component stack
//! supplies the default hit-test heuristic used when client code does not
//! force a result for an event.

use crate::hit_test::{HitTestResult, TitleBarStrip};
use crate::registry::TitleBarId;
use crate::types::{Point, Rect, Size};

/// The kind of top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowKind {
    /// A regular application frame with minimize, maximize and close buttons.
    #[default]
    Frame,
    /// A dialog, which only has a close button.
    Dialog,
}

impl WindowKind {
    /// Number of native control buttons shown in the title bar.
    pub fn button_count(&self) -> usize {
        match self {
            Self::Frame => 3,
            Self::Dialog => 1,
        }
    }
}

/// A UI component laid out in a window, as seen by hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentRegion {
    /// Bounds in window-local coordinates.
    pub bounds: Rect,
    /// Whether the component registered pointer or cursor listeners.
    pub has_pointer_listener: bool,
}

impl ComponentRegion {
    /// A component that reacts to pointer input, such as a button.
    pub fn interactive(bounds: Rect) -> Self {
        Self {
            bounds,
            has_pointer_listener: true,
        }
    }

    /// A component without pointer listeners, such as a plain panel or label.
    pub fn passive(bounds: Rect) -> Self {
        Self {
            bounds,
            has_pointer_listener: false,
        }
    }
}

/// The default client/non-client decision for a point in the title bar.
pub trait DefaultHitTest {
    /// Decide whether `point` is client or non-client when no override was
    /// forced for the current event.
    fn default_hit_test(&self, point: Point, strip: &TitleBarStrip) -> HitTestResult;
}

/// A host window.
#[derive(Debug, Clone)]
pub struct WindowSurface {
    kind: WindowKind,
    /// Client area size in logical pixels.
    size: Size,
    scale_factor: f64,
    /// Components in paint order; the last entry is topmost.
    components: Vec<ComponentRegion>,
    decoration: Option<TitleBarId>,
}

impl WindowSurface {
    /// Create a window surface with the given kind and client size.
    pub fn new(kind: WindowKind, size: Size) -> Self {
        Self {
            kind,
            size,
            scale_factor: 1.0,
            components: Vec::new(),
            decoration: None,
        }
    }

    /// Add a component on top of the existing ones.
    pub fn with_component(mut self, component: ComponentRegion) -> Self {
        self.components.push(component);
        self
    }

    /// Set the scale factor used to convert physical input coordinates.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.set_scale_factor(scale_factor);
        self
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Set the scale factor. Non-positive or non-finite values are ignored.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Add a component on top of the existing ones.
    pub fn push_component(&mut self, component: ComponentRegion) {
        self.components.push(component);
    }

    /// Remove all components.
    pub fn clear_components(&mut self) {
        self.components.clear();
    }

    /// Components in paint order.
    pub fn components(&self) -> &[ComponentRegion] {
        &self.components
    }

    /// The topmost component under `point`, if any.
    pub fn component_at(&self, point: Point) -> Option<&ComponentRegion> {
        self.components
            .iter()
            .rev()
            .find(|component| component.bounds.contains(point))
    }

    /// The custom title bar in this window's decoration slot.
    ///
    /// `None` means the window uses the system-provided title bar.
    pub fn custom_title_bar(&self) -> Option<TitleBarId> {
        self.decoration
    }

    pub(crate) fn set_decoration(&mut self, decoration: Option<TitleBarId>) {
        self.decoration = decoration;
    }
}

impl DefaultHitTest for WindowSurface {
    /// Native controls are always non-client. Elsewhere the topmost
    /// component decides: one with pointer listeners keeps the event as
    /// client, anything else lets native title bar gestures through.
    fn default_hit_test(&self, point: Point, strip: &TitleBarStrip) -> HitTestResult {
        if strip.in_controls(point) {
            return HitTestResult::NonClient;
        }

        match self.component_at(point) {
            Some(component) if component.has_pointer_listener => HitTestResult::Client,
            _ => HitTestResult::NonClient,
        }
    }
}
