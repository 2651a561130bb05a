//! Custom window title bars for Horizon Lattice.
//!
//! This crate lets an application replace the system title bar of a window
//! with its own content while keeping the native window controls and
//! gestures:
//!
//! - **Title bars**: [`CustomTitleBar`] holds the strip height and string-keyed
//!   properties (`controls.visible`, `controls.width`, `controls.dark`, ...)
//! - **Insets**: the space the native controls occupy, per platform and
//!   window kind
//! - **Hit-test arbitration**: per pointer event, client code may force the
//!   event to be handled as client content (buttons, search fields) or as
//!   non-client area (drag, double-click maximize, system menu)
//! - **Event routing**: winit window events are translated to pointer events
//!   and arbitrated in one call
//!
//! # Example
//!
//! ```
//! use horizon_decorations::{Platform, Size, WindowDecorations, WindowKind};
//!
//! # fn main() -> horizon_decorations::DecorationResult<()> {
//! let mut decorations = WindowDecorations::with_platform(Platform::Windows);
//! let window = decorations.create_window(WindowKind::Frame, Size::new(800.0, 600.0));
//!
//! let title_bar = decorations.create_custom_title_bar();
//! {
//!     let bar = decorations.title_bar_mut(title_bar)?;
//!     bar.set_height(32.0)?;
//!     bar.put_property("controls.dark", true)?;
//! }
//! decorations.set_custom_title_bar(window, Some(title_bar))?;
//!
//! let bar = decorations.title_bar(title_bar)?;
//! assert_eq!(bar.containing_window(), Some(window));
//! assert_eq!(bar.left_inset(), 0.0);
//! assert_eq!(bar.right_inset(), 3.0 * 46.0);
//! # Ok(())
//! # }
//! ```

mod config;
mod controls;
mod decorations;
mod dispatch;
mod error;
mod event_router;
pub mod hit_test;
pub mod logging;
mod platform;
pub mod property;
mod registry;
mod surface;
mod title_bar;
mod types;

pub use config::{ControlsMetrics, DecorationConfig, TitleBarDefaults};
pub use controls::{ControlsLayout, Insets};
pub use decorations::WindowDecorations;
pub use dispatch::{HitTestContext, PointerDispatcher, PointerEvent, PointerEventKind};
pub use error::{DecorationError, DecorationResult};
pub use event_router::PointerTracker;
pub use hit_test::{
    DecisionSource, HitTestArbiter, HitTestEvaluation, HitTestOverride, HitTestResult,
    TitleBarStrip,
};
pub use platform::{Platform, PlatformCapabilities};
pub use property::{
    ControlLayer, ControlState, PropertyKey, PropertyValue, TitleBarProperties, ValueKind,
};
pub use registry::{TitleBarId, WindowHandle, WindowRegistry};
pub use surface::{ComponentRegion, DefaultHitTest, WindowKind, WindowSurface};
pub use title_bar::CustomTitleBar;
pub use types::{Color, Point, Rect, Size};

// Re-export winit types that users may need
pub use winit::event::WindowEvent;
pub use winit::window::WindowId;
