//! Registry of window surfaces and their title bars.
//!
//! Windows and title bars live in slotmap arenas. Handles are generational:
//! once a window is destroyed or a title bar is cleared, every copy of its
//! handle fails lookups with [`DecorationError::InvalidWindow`] or
//! [`DecorationError::InvalidTitleBar`] instead of reaching stale state.
//!
//! A title bar is owned by the decoration slot of the window it is attached
//! to. It is destroyed when that slot is cleared, when another title bar
//! replaces it, or when the window is destroyed.

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};
use winit::window::WindowId;

use crate::config::ControlsMetrics;
use crate::controls::ControlsLayout;
use crate::error::{DecorationError, DecorationResult};
use crate::hit_test::TitleBarStrip;
use crate::logging::targets;
use crate::platform::Platform;
use crate::surface::WindowSurface;
use crate::title_bar::CustomTitleBar;
use crate::types::Rect;

new_key_type! {
    /// A non-owning handle to a registered window.
    ///
    /// Becomes invalid when the window is destroyed.
    pub struct WindowHandle;

    /// A handle to a custom title bar.
    ///
    /// Becomes invalid when the title bar's decoration is cleared or its
    /// window is destroyed.
    pub struct TitleBarId;
}

/// Arena storage for windows and title bars.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: SlotMap<WindowHandle, WindowSurface>,
    title_bars: SlotMap<TitleBarId, CustomTitleBar>,
    native_ids: HashMap<WindowId, WindowHandle>,
}

impl WindowRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Register a window surface.
    pub fn insert_window(&mut self, surface: WindowSurface) -> WindowHandle {
        let kind = surface.kind();
        let handle = self.windows.insert(surface);
        tracing::debug!(target: targets::REGISTRY, ?handle, ?kind, "registered window");
        handle
    }

    /// Remove a window together with its custom title bar.
    #[tracing::instrument(skip(self), target = "horizon_decorations::registry", level = "debug")]
    pub fn remove_window(&mut self, handle: WindowHandle) -> DecorationResult<WindowSurface> {
        let surface = self
            .windows
            .remove(handle)
            .ok_or(DecorationError::InvalidWindow)?;
        if let Some(title_bar) = surface.custom_title_bar() {
            self.title_bars.remove(title_bar);
        }
        self.native_ids.retain(|_, mapped| *mapped != handle);
        Ok(surface)
    }

    /// Look up a window.
    pub fn window(&self, handle: WindowHandle) -> DecorationResult<&WindowSurface> {
        self.windows.get(handle).ok_or(DecorationError::InvalidWindow)
    }

    /// Look up a window for modification.
    pub fn window_mut(&mut self, handle: WindowHandle) -> DecorationResult<&mut WindowSurface> {
        self.windows
            .get_mut(handle)
            .ok_or(DecorationError::InvalidWindow)
    }

    /// Check if a window handle is still valid.
    pub fn contains_window(&self, handle: WindowHandle) -> bool {
        self.windows.contains_key(handle)
    }

    /// Number of registered windows.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// All valid window handles.
    pub fn window_handles(&self) -> Vec<WindowHandle> {
        self.windows.keys().collect()
    }

    /// Associate a winit window id with a registered window.
    pub fn bind_native(&mut self, handle: WindowHandle, native: WindowId) -> DecorationResult<()> {
        if !self.contains_window(handle) {
            return Err(DecorationError::InvalidWindow);
        }
        self.native_ids.insert(native, handle);
        Ok(())
    }

    /// Find the window bound to a winit window id.
    pub fn find_by_native(&self, native: WindowId) -> Option<WindowHandle> {
        self.native_ids
            .get(&native)
            .copied()
            .filter(|handle| self.contains_window(*handle))
    }

    // =========================================================================
    // Title bars
    // =========================================================================

    /// Store a new, unattached title bar.
    pub fn insert_title_bar(&mut self, title_bar: CustomTitleBar) -> TitleBarId {
        self.title_bars.insert(title_bar)
    }

    /// Look up a title bar.
    pub fn title_bar(&self, id: TitleBarId) -> DecorationResult<&CustomTitleBar> {
        self.title_bars.get(id).ok_or(DecorationError::InvalidTitleBar)
    }

    /// Look up a title bar for modification.
    pub fn title_bar_mut(&mut self, id: TitleBarId) -> DecorationResult<&mut CustomTitleBar> {
        self.title_bars
            .get_mut(id)
            .ok_or(DecorationError::InvalidTitleBar)
    }

    /// Check if a title bar handle is still valid.
    pub fn contains_title_bar(&self, id: TitleBarId) -> bool {
        self.title_bars.contains_key(id)
    }

    /// Number of live title bars, attached or not.
    pub fn title_bar_count(&self) -> usize {
        self.title_bars.len()
    }

    /// Put `title_bar` into the decoration slot of `window`, or clear the
    /// slot with `None`.
    ///
    /// - Clearing destroys the title bar that was in the slot.
    /// - A title bar attached to another window is moved: that window
    ///   reverts to the system title bar.
    /// - A different title bar already in the slot is destroyed.
    ///
    /// # Errors
    ///
    /// Fails for invalid handles and for title bars whose height was never
    /// set. Nothing changes on failure.
    pub fn attach(
        &mut self,
        window: WindowHandle,
        title_bar: Option<TitleBarId>,
        platform: Platform,
        metrics: ControlsMetrics,
    ) -> DecorationResult<()> {
        let kind = self.window(window)?.kind();

        let Some(id) = title_bar else {
            self.clear_decoration(window)?;
            return Ok(());
        };

        let new_bar = self.title_bar(id)?;
        if !new_bar.has_valid_height() {
            return Err(DecorationError::invalid_argument(
                "title_bar",
                "height must be set before the title bar is attached",
            ));
        }

        let previous_window = new_bar.containing_window();
        if previous_window == Some(window) {
            return Ok(());
        }

        if let Some(previous) = previous_window
            && let Some(surface) = self.windows.get_mut(previous)
        {
            surface.set_decoration(None);
            tracing::debug!(
                target: targets::REGISTRY,
                ?id,
                from = ?previous,
                to = ?window,
                "moving title bar"
            );
        }

        let surface = self.window_mut(window)?;
        let replaced = surface.custom_title_bar();
        surface.set_decoration(Some(id));
        if let Some(replaced) = replaced {
            self.title_bars.remove(replaced);
        }

        let layout = ControlsLayout::new(platform, kind, metrics);
        self.title_bar_mut(id)?.attach(window, layout);
        tracing::debug!(target: targets::REGISTRY, ?id, ?window, "attached custom title bar");
        Ok(())
    }

    fn clear_decoration(&mut self, window: WindowHandle) -> DecorationResult<()> {
        let surface = self.window_mut(window)?;
        if let Some(id) = surface.custom_title_bar() {
            surface.set_decoration(None);
            if let Some(mut title_bar) = self.title_bars.remove(id) {
                title_bar.detach();
            }
            tracing::debug!(target: targets::REGISTRY, ?id, ?window, "restored system title bar");
        }
        Ok(())
    }

    /// Geometry of the custom title bar strip of `window`, if it has one.
    pub fn title_bar_strip(&self, window: WindowHandle) -> DecorationResult<Option<TitleBarStrip>> {
        let surface = self.window(window)?;
        let Some(id) = surface.custom_title_bar() else {
            return Ok(None);
        };
        let title_bar = self.title_bar(id)?;
        let bounds = Rect::new(0.0, 0.0, surface.size().width, title_bar.height());
        Ok(Some(TitleBarStrip::new(bounds, title_bar.insets())))
    }
}
