//! Layout of the native window controls painted over a custom title bar.
//!
//! The controls (minimize, maximize, close) stay native when the system
//! title bar is removed. Client code has to keep its own content clear of
//! them, so the layout reports the horizontal space they reserve as
//! left and right insets.

use crate::config::ControlsMetrics;
use crate::platform::{Platform, PlatformCapabilities};
use crate::property::TitleBarProperties;
use crate::surface::WindowKind;
use crate::types::Rect;

/// Horizontal space reserved by window controls, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
}

impl Insets {
    /// No reserved space.
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
    };

    /// Create new insets.
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

/// Everything needed to lay out the controls of an attached title bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlsLayout {
    platform: Platform,
    kind: WindowKind,
    metrics: ControlsMetrics,
}

impl ControlsLayout {
    /// Create a layout for a window of `kind` on `platform`.
    pub fn new(platform: Platform, kind: WindowKind, metrics: ControlsMetrics) -> Self {
        Self {
            platform,
            kind,
            metrics,
        }
    }

    /// The platform this layout targets.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The kind of window the controls belong to.
    pub fn window_kind(&self) -> WindowKind {
        self.kind
    }

    /// Compute the insets for the given properties.
    ///
    /// - Hidden controls reserve nothing.
    /// - Windows places the button block on the right. Its width is
    ///   `controls.width` when set, otherwise one button width per button.
    /// - macOS places the traffic lights on the left and ignores
    ///   `controls.width`.
    pub fn insets(&self, properties: &TitleBarProperties) -> Insets {
        if !self.platform.supports_custom_title_bar() || !properties.controls_visible() {
            return Insets::ZERO;
        }

        match self.platform {
            Platform::Windows => {
                let width = properties.controls_width().unwrap_or_else(|| {
                    self.metrics.windows_button_width * self.kind.button_count() as f32
                });
                Insets::new(0.0, width)
            }
            Platform::MacOs => Insets::new(self.metrics.macos_controls_width, 0.0),
            Platform::Linux | Platform::Other => Insets::ZERO,
        }
    }

    /// The rectangles covered by the controls inside a title bar strip of
    /// `strip_width` by `height`.
    pub fn control_areas(
        &self,
        properties: &TitleBarProperties,
        strip_width: f32,
        height: f32,
    ) -> Vec<Rect> {
        let insets = self.insets(properties);
        let mut areas = Vec::with_capacity(2);
        if insets.left > 0.0 {
            areas.push(Rect::new(0.0, 0.0, insets.left.min(strip_width), height));
        }
        if insets.right > 0.0 {
            let width = insets.right.min(strip_width);
            areas.push(Rect::new(strip_width - width, 0.0, width, height));
        }
        areas
    }
}
