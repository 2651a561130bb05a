//! Custom title bar state.
//!
//! A custom title bar merges window content with the native title bar: the
//! system-provided title bar is removed, the client area extends to the top
//! of the window, and native controls are painted over it. The strip keeps
//! native behavior such as dragging and double-click maximize, arbitrated
//! per pointer event by the [`hit_test`](crate::hit_test) module.
//!
//! Title bars are created unattached with a height of 0 and must be given a
//! positive height before they can be attached to a window.

use crate::controls::{ControlsLayout, Insets};
use crate::error::{DecorationError, DecorationResult};
use crate::logging::targets;
use crate::platform::PlatformCapabilities;
use crate::property::{PropertyKey, PropertyValue, TitleBarProperties};
use crate::registry::WindowHandle;

/// The state of one custom title bar.
#[derive(Debug, Clone, Default)]
pub struct CustomTitleBar {
    /// Height in logical pixels from the top of the client area, excluding
    /// the top frame border.
    height: f32,
    properties: TitleBarProperties,
    /// Set when the title bar is attached. Never owns the window.
    containing_window: Option<WindowHandle>,
    layout: Option<ControlsLayout>,
}

impl CustomTitleBar {
    /// Create an unattached title bar with a height of 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the title bar height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Set the title bar height. Must be > 0.
    ///
    /// # Errors
    ///
    /// Returns [`DecorationError::InvalidArgument`] for zero, negative or
    /// non-finite heights. The previous height is kept.
    pub fn set_height(&mut self, height: f32) -> DecorationResult<()> {
        if !(height.is_finite() && height > 0.0) {
            return Err(DecorationError::invalid_argument(
                "height",
                format!("title bar height must be > 0, got {height}"),
            ));
        }
        self.height = height;
        Ok(())
    }

    /// Whether a valid height has been set.
    pub fn has_valid_height(&self) -> bool {
        self.height > 0.0
    }

    /// Get all properties set on the title bar.
    pub fn properties(&self) -> &TitleBarProperties {
        &self.properties
    }

    /// Set a property by its string key.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys in the `controls.` namespace and for values of
    /// the wrong type. The property bag is left unchanged.
    pub fn put_property(
        &mut self,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> DecorationResult<()> {
        let key = key.parse::<PropertyKey>()?;
        self.put(key, value)
    }

    /// Set a property by its typed key.
    pub fn put(
        &mut self,
        key: PropertyKey,
        value: impl Into<PropertyValue>,
    ) -> DecorationResult<()> {
        self.warn_if_ineffective(&key);
        self.properties.insert(key, value.into())
    }

    /// Set every property from `entries`.
    ///
    /// All entries are validated before any is applied, so a failing entry
    /// leaves the property bag unchanged.
    pub fn put_properties<I, K, V>(&mut self, entries: I) -> DecorationResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PropertyValue>,
    {
        let validated = entries
            .into_iter()
            .map(|(key, value)| {
                let key = key.as_ref().parse::<PropertyKey>()?;
                let value = value.into();
                key.validate(&value)?;
                Ok((key, value))
            })
            .collect::<DecorationResult<Vec<_>>>()?;

        for (key, value) in validated {
            self.warn_if_ineffective(&key);
            self.properties.insert(key, value)?;
        }
        Ok(())
    }

    /// Space occupied by title bar controls on the left, in pixels.
    pub fn left_inset(&self) -> f32 {
        self.insets().left
    }

    /// Space occupied by title bar controls on the right, in pixels.
    pub fn right_inset(&self) -> f32 {
        self.insets().right
    }

    /// Both insets. Unattached title bars have no controls and report zero.
    pub fn insets(&self) -> Insets {
        self.layout
            .map(|layout| layout.insets(&self.properties))
            .unwrap_or(Insets::ZERO)
    }

    /// The controls layout, present while attached.
    pub fn controls_layout(&self) -> Option<&ControlsLayout> {
        self.layout.as_ref()
    }

    /// Keys that are set but have no effect on the platform the title bar is
    /// attached to, such as control styling on macOS. Empty while unattached.
    pub fn ineffective_properties(&self) -> impl Iterator<Item = &PropertyKey> {
        let styling = self
            .layout
            .map(|layout| layout.platform().supports_control_styling());
        self.properties
            .iter()
            .map(|(key, _)| key)
            .filter(move |key| styling == Some(false) && key.is_windows_only())
    }

    fn warn_if_ineffective(&self, key: &PropertyKey) {
        if let Some(layout) = self.layout
            && key.is_windows_only()
            && !layout.platform().supports_control_styling()
        {
            tracing::debug!(
                target: targets::DECORATIONS,
                %key,
                platform = %layout.platform(),
                "title bar property has no effect on this platform"
            );
        }
    }

    /// The window this title bar is attached to.
    pub fn containing_window(&self) -> Option<WindowHandle> {
        self.containing_window
    }

    /// Whether the title bar is attached to a window.
    pub fn is_attached(&self) -> bool {
        self.containing_window.is_some()
    }

    pub(crate) fn attach(&mut self, window: WindowHandle, layout: ControlsLayout) {
        self.containing_window = Some(window);
        self.layout = Some(layout);
        for key in self.ineffective_properties() {
            tracing::debug!(
                target: targets::DECORATIONS,
                %key,
                platform = %layout.platform(),
                "title bar property has no effect on this platform"
            );
        }
    }

    pub(crate) fn detach(&mut self) {
        self.containing_window = None;
        self.layout = None;
    }
}
