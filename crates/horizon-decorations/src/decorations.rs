//! The window decorations service.
//!
//! [`WindowDecorations`] is the entry point client code talks to: it
//! creates title bars, attaches them to windows, and runs hit-test
//! arbitration for incoming pointer input.
//!
//! # Example
//!
//! ```
//! use horizon_decorations::{
//!     ComponentRegion, HitTestResult, Platform, PointerEvent, PointerEventKind, Point, Rect,
//!     Size, WindowDecorations, WindowKind,
//! };
//!
//! # fn main() -> horizon_decorations::DecorationResult<()> {
//! let mut decorations = WindowDecorations::with_platform(Platform::Windows);
//! let window = decorations.create_window(WindowKind::Frame, Size::new(800.0, 600.0));
//!
//! // A search box in the title bar that should receive clicks.
//! decorations
//!     .window_mut(window)?
//!     .push_component(ComponentRegion::interactive(Rect::new(300.0, 4.0, 200.0, 24.0)));
//!
//! let title_bar = decorations.create_custom_title_bar();
//! decorations.title_bar_mut(title_bar)?.set_height(32.0)?;
//! decorations.set_custom_title_bar(window, Some(title_bar))?;
//!
//! // Pressing on empty title bar space lets the native layer drag the window.
//! let press = PointerEvent::new(PointerEventKind::Pressed, Point::new(100.0, 10.0));
//! let evaluation = decorations.dispatch_pointer_event(window, press, |_| {})?;
//! assert_eq!(evaluation.map(|e| e.result), Some(HitTestResult::NonClient));
//!
//! // A handler can keep the event for itself.
//! let evaluation = decorations.dispatch_pointer_event(window, press, |ctx| {
//!     ctx.force_hit_test(true);
//! })?;
//! assert_eq!(evaluation.map(|e| e.result), Some(HitTestResult::Client));
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;

use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::config::DecorationConfig;
use crate::dispatch::{HitTestContext, PointerDispatcher, PointerEvent};
use crate::error::{DecorationError, DecorationResult};
use crate::hit_test::HitTestEvaluation;
use crate::logging::targets;
use crate::platform::{Platform, PlatformCapabilities};
use crate::registry::{TitleBarId, WindowHandle, WindowRegistry};
use crate::surface::{DefaultHitTest, WindowKind, WindowSurface};
use crate::title_bar::CustomTitleBar;
use crate::types::Size;

/// Window decorations service.
///
/// Owns all registered windows, their title bars, and the pointer
/// dispatcher. Neither `Send` nor `Sync`: it lives on the UI thread that
/// delivers input.
#[derive(Debug)]
pub struct WindowDecorations {
    platform: Platform,
    config: DecorationConfig,
    registry: WindowRegistry,
    dispatcher: PointerDispatcher,
    _not_send: PhantomData<*const ()>,
}

impl Default for WindowDecorations {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowDecorations {
    /// Create a service for the current platform with default configuration.
    pub fn new() -> Self {
        Self::with_config(Platform::current(), DecorationConfig::default())
    }

    /// Create a service for a specific platform.
    pub fn with_platform(platform: Platform) -> Self {
        Self::with_config(platform, DecorationConfig::default())
    }

    /// Create a service for a specific platform and configuration.
    pub fn with_config(platform: Platform, config: DecorationConfig) -> Self {
        tracing::debug!(
            target: targets::DECORATIONS,
            %platform,
            supported = platform.supports_custom_title_bar(),
            "window decorations initialized"
        );
        Self {
            platform,
            config,
            registry: WindowRegistry::new(),
            dispatcher: PointerDispatcher::new(),
            _not_send: PhantomData,
        }
    }

    /// The platform this service targets.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Capability queries for the target platform.
    pub fn capabilities(&self) -> &dyn PlatformCapabilities {
        &self.platform
    }

    /// Whether custom title bars have any effect on this platform.
    pub fn supports_custom_title_bar(&self) -> bool {
        self.platform.supports_custom_title_bar()
    }

    /// The active configuration.
    pub fn config(&self) -> &DecorationConfig {
        &self.config
    }

    /// The window and title bar registry.
    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    /// The pointer dispatcher.
    pub fn dispatcher(&self) -> &PointerDispatcher {
        &self.dispatcher
    }

    fn ensure_supported(&self, operation: &'static str) -> DecorationResult<()> {
        if self.supports_custom_title_bar() {
            Ok(())
        } else {
            tracing::warn!(
                target: targets::DECORATIONS,
                platform = %self.platform,
                operation,
                "custom title bars unsupported"
            );
            Err(DecorationError::UnsupportedPlatform(self.platform))
        }
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Register a new window with the system title bar.
    pub fn create_window(&mut self, kind: WindowKind, size: Size) -> WindowHandle {
        self.registry.insert_window(WindowSurface::new(kind, size))
    }

    /// Register a prepared window surface.
    pub fn register_window(&mut self, surface: WindowSurface) -> WindowHandle {
        self.registry.insert_window(surface)
    }

    /// Destroy a window, its title bar, and its input state.
    pub fn destroy_window(&mut self, window: WindowHandle) -> DecorationResult<()> {
        self.registry.remove_window(window)?;
        self.dispatcher.forget(window);
        Ok(())
    }

    /// Look up a window.
    pub fn window(&self, window: WindowHandle) -> DecorationResult<&WindowSurface> {
        self.registry.window(window)
    }

    /// Look up a window for modification.
    pub fn window_mut(&mut self, window: WindowHandle) -> DecorationResult<&mut WindowSurface> {
        self.registry.window_mut(window)
    }

    /// Associate a winit window id with a window.
    pub fn bind_native_window(
        &mut self,
        window: WindowHandle,
        native: WindowId,
    ) -> DecorationResult<()> {
        self.registry.bind_native(window, native)
    }

    /// Find the window bound to a winit window id.
    pub fn find_by_native(&self, native: WindowId) -> Option<WindowHandle> {
        self.registry.find_by_native(native)
    }

    // =========================================================================
    // Title bars
    // =========================================================================

    /// Create a new unattached title bar.
    ///
    /// The title bar starts from the configured defaults. Without a
    /// configured height it is 0 and must be set before attaching.
    pub fn create_custom_title_bar(&mut self) -> TitleBarId {
        let mut title_bar = CustomTitleBar::new();
        let defaults = &self.config.title_bar;

        if let Some(height) = defaults.height
            && let Err(err) = title_bar.set_height(height)
        {
            tracing::warn!(target: targets::CONFIG, %err, "ignoring configured title bar height");
        }
        for (key, value) in &defaults.properties {
            if let Err(err) = title_bar.put_property(key, *value) {
                tracing::warn!(
                    target: targets::CONFIG,
                    %key,
                    %err,
                    "ignoring configured title bar property"
                );
            }
        }

        self.registry.insert_title_bar(title_bar)
    }

    /// Look up a title bar.
    pub fn title_bar(&self, id: TitleBarId) -> DecorationResult<&CustomTitleBar> {
        self.registry.title_bar(id)
    }

    /// Look up a title bar for modification (height, properties).
    pub fn title_bar_mut(&mut self, id: TitleBarId) -> DecorationResult<&mut CustomTitleBar> {
        self.registry.title_bar_mut(id)
    }

    /// Set up a custom title bar on `window`, or restore the system title
    /// bar with `None`.
    ///
    /// With a title bar, the system title bar is removed and the client area
    /// extends to the top of the window with the native controls painted
    /// over it. A title bar that is already attached elsewhere moves to
    /// `window`.
    ///
    /// # Errors
    ///
    /// - [`DecorationError::UnsupportedPlatform`] on platforms without custom
    ///   title bars. The window is left untouched.
    /// - [`DecorationError::InvalidArgument`] if the title bar has no height.
    /// - [`DecorationError::InvalidWindow`] / [`DecorationError::InvalidTitleBar`]
    ///   for stale handles.
    ///
    /// A pointer event being handled on an affected window is cancelled
    /// together with its override: `window` when its title bar changes, and
    /// the window a moved title bar came from.
    pub fn set_custom_title_bar(
        &mut self,
        window: WindowHandle,
        title_bar: Option<TitleBarId>,
    ) -> DecorationResult<()> {
        self.ensure_supported("set_custom_title_bar")?;

        let current = self.registry.window(window)?.custom_title_bar();
        let moved_from = match title_bar {
            Some(id) => self.registry.title_bar(id)?.containing_window(),
            None => None,
        };
        self.registry
            .attach(window, title_bar, self.platform, self.config.metrics)?;

        if current != title_bar {
            // Open turns were arbitrated against a strip that is gone.
            self.dispatcher.cancel_turn(window);
            if let Some(previous) = moved_from.filter(|previous| *previous != window) {
                self.dispatcher.cancel_turn(previous);
            }
        }
        Ok(())
    }

    /// The custom title bar of `window`, or `None` for the system title bar.
    pub fn custom_title_bar(&self, window: WindowHandle) -> DecorationResult<Option<TitleBarId>> {
        Ok(self.registry.window(window)?.custom_title_bar())
    }

    /// The window a title bar is attached to.
    ///
    /// # Errors
    ///
    /// [`DecorationError::InvalidTitleBar`] once the title bar has been
    /// destroyed (its decoration was cleared or replaced, or its window was
    /// destroyed).
    pub fn containing_window(&self, id: TitleBarId) -> DecorationResult<Option<WindowHandle>> {
        Ok(self.registry.title_bar(id)?.containing_window())
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Force client (`true`) or non-client (`false`) handling of the pointer
    /// event currently being delivered to the title bar's window.
    ///
    /// Must be called after [`begin_pointer_event`](Self::begin_pointer_event)
    /// and before [`evaluate_hit_test`](Self::evaluate_hit_test). Outside
    /// that window, and for unattached title bars, the call does nothing.
    pub fn force_hit_test(&mut self, id: TitleBarId, client: bool) -> DecorationResult<()> {
        self.ensure_supported("force_hit_test")?;
        let Some(window) = self.registry.title_bar(id)?.containing_window() else {
            tracing::debug!(
                target: targets::HIT_TEST,
                ?id,
                "hit-test override on unattached title bar ignored"
            );
            return Ok(());
        };
        self.dispatcher.force_hit_test(window, client);
        Ok(())
    }

    /// Open an arbitration turn for a pointer event delivered to `window`.
    ///
    /// Windows with the system title bar have nothing to arbitrate; any turn
    /// still open on them is closed.
    pub fn begin_pointer_event(
        &mut self,
        window: WindowHandle,
        event: PointerEvent,
    ) -> DecorationResult<()> {
        match self.registry.title_bar_strip(window)? {
            Some(strip) => {
                self.dispatcher
                    .begin_turn(window, event, strip.contains(event.position));
            }
            None => {
                self.dispatcher.cancel_turn(window);
            }
        }
        Ok(())
    }

    /// Consume the decision for the event opened by
    /// [`begin_pointer_event`](Self::begin_pointer_event).
    ///
    /// Returns `None` when no turn is open on `window` or the window has the
    /// system title bar.
    pub fn evaluate_hit_test(
        &mut self,
        window: WindowHandle,
    ) -> DecorationResult<Option<HitTestEvaluation>> {
        let Some(strip) = self.registry.title_bar_strip(window)? else {
            self.dispatcher.cancel_turn(window);
            return Ok(None);
        };
        let surface = self.registry.window(window)?;
        Ok(self
            .dispatcher
            .evaluate(window, |point| surface.default_hit_test(point, &strip)))
    }

    /// Deliver one pointer event: open a turn, run `handler`, evaluate.
    ///
    /// Returns `None` for windows with the system title bar; `handler` still
    /// runs, with a context that ignores overrides.
    pub fn dispatch_pointer_event<H>(
        &mut self,
        window: WindowHandle,
        event: PointerEvent,
        handler: H,
    ) -> DecorationResult<Option<HitTestEvaluation>>
    where
        H: FnOnce(&mut HitTestContext<'_>),
    {
        let Some(strip) = self.registry.title_bar_strip(window)? else {
            self.dispatcher.cancel_turn(window);
            handler(&mut HitTestContext::new(event, None));
            return Ok(None);
        };

        let surface = self.registry.window(window)?;
        Ok(self.dispatcher.dispatch(
            window,
            event,
            strip.contains(event.position),
            handler,
            |point| surface.default_hit_test(point, &strip),
        ))
    }

    /// Route a winit window event to `window`.
    ///
    /// Resize and scale changes update the window surface. Cursor, button
    /// and wheel input is translated into pointer events, each dispatched
    /// through `handler`. Returns one evaluation per arbitrated pointer event.
    pub fn handle_window_event<H>(
        &mut self,
        window: WindowHandle,
        event: &WindowEvent,
        mut handler: H,
    ) -> DecorationResult<Vec<HitTestEvaluation>>
    where
        H: FnMut(&mut HitTestContext<'_>),
    {
        let surface = self.registry.window_mut(window)?;
        match event {
            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<f32>(surface.scale_factor());
                surface.set_size(Size::new(logical.width, logical.height));
                return Ok(Vec::new());
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                surface.set_scale_factor(*scale_factor);
                return Ok(Vec::new());
            }
            _ => {}
        }

        let scale_factor = surface.scale_factor();
        let pointer_events = match self.dispatcher.input_mut(window) {
            Some(input) => input.tracker.translate(event, scale_factor),
            None => return Err(DecorationError::InvalidWindow),
        };

        let mut evaluations = Vec::with_capacity(pointer_events.len());
        for pointer_event in pointer_events {
            let evaluation = self.dispatch_pointer_event(window, pointer_event, &mut handler)?;
            evaluations.extend(evaluation);
        }
        Ok(evaluations)
    }
}
