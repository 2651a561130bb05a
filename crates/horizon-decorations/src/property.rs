//! Title bar property vocabulary.
//!
//! Title bars carry a small property bag that tunes the native window
//! controls. Keys are namespaced strings, validated at the boundary and
//! stored as typed [`PropertyKey`]s:
//!
//! | Key | Value | Platforms |
//! |---|---|---|
//! | `controls.visible` | bool, default `true` | Windows, macOS |
//! | `controls.width` | number, width of the whole button block | Windows |
//! | `controls.dark` | bool, dark or light icon theme | Windows |
//! | `controls.<layer>.<state>` | color | Windows |
//!
//! where `<layer>` is `foreground` or `background` and `<state>` is one of
//! `normal`, `hovered`, `pressed`, `disabled`, `inactive`.
//!
//! Keys outside the `controls.` namespace are kept as
//! [`PropertyKey::Extension`] entries with any value type, so backends can
//! add their own namespaces.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DecorationError, DecorationResult};
use crate::types::Color;

const CONTROLS_NAMESPACE: &str = "controls.";

/// The paint layer of a window control button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlLayer {
    /// Icon color.
    Foreground,
    /// Button fill color.
    Background,
}

impl ControlLayer {
    /// All layers.
    pub const ALL: [ControlLayer; 2] = [Self::Foreground, Self::Background];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.as_str() == s)
    }
}

/// The interaction state of a window control button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlState {
    Normal,
    Hovered,
    Pressed,
    Disabled,
    Inactive,
}

impl ControlState {
    /// All states.
    pub const ALL: [ControlState; 5] = [
        Self::Normal,
        Self::Hovered,
        Self::Pressed,
        Self::Disabled,
        Self::Inactive,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Hovered => "hovered",
            Self::Pressed => "pressed",
            Self::Disabled => "disabled",
            Self::Inactive => "inactive",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == s)
    }
}

/// A validated title bar property key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// `controls.visible`
    ControlsVisible,
    /// `controls.width`
    ControlsWidth,
    /// `controls.dark`
    ControlsDark,
    /// `controls.<layer>.<state>`
    ControlsColor(ControlLayer, ControlState),
    /// Any key outside the `controls.` namespace.
    Extension(String),
}

impl PropertyKey {
    /// The value kind this key requires, or `None` if any kind is accepted.
    pub fn expected_kind(&self) -> Option<ValueKind> {
        match self {
            Self::ControlsVisible | Self::ControlsDark => Some(ValueKind::Bool),
            Self::ControlsWidth => Some(ValueKind::Number),
            Self::ControlsColor(..) => Some(ValueKind::Color),
            Self::Extension(_) => None,
        }
    }

    /// Whether the key only has an effect on Windows.
    pub fn is_windows_only(&self) -> bool {
        matches!(
            self,
            Self::ControlsWidth | Self::ControlsDark | Self::ControlsColor(..)
        )
    }

    /// Check that `value` is acceptable for this key.
    pub fn validate(&self, value: &PropertyValue) -> DecorationResult<()> {
        if let Some(expected) = self.expected_kind()
            && expected != value.kind()
        {
            return Err(DecorationError::PropertyTypeMismatch {
                key: self.to_string(),
                expected,
                got: value.kind(),
            });
        }

        if let (Self::ControlsWidth, PropertyValue::Number(width)) = (self, value)
            && !(width.is_finite() && *width >= 0.0 && *width <= f64::from(f32::MAX))
        {
            return Err(DecorationError::invalid_argument(
                "controls.width",
                format!("must be a finite number between 0 and {:e}, got {width}", f32::MAX),
            ));
        }

        Ok(())
    }
}

impl FromStr for PropertyKey {
    type Err = DecorationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.strip_prefix(CONTROLS_NAMESPACE) else {
            if s.is_empty() {
                return Err(DecorationError::UnknownProperty(String::new()));
            }
            return Ok(Self::Extension(s.to_owned()));
        };

        match rest {
            "visible" => Ok(Self::ControlsVisible),
            "width" => Ok(Self::ControlsWidth),
            "dark" => Ok(Self::ControlsDark),
            _ => rest
                .split_once('.')
                .and_then(|(layer, state)| {
                    Some(Self::ControlsColor(
                        ControlLayer::parse(layer)?,
                        ControlState::parse(state)?,
                    ))
                })
                .ok_or_else(|| DecorationError::UnknownProperty(s.to_owned())),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControlsVisible => f.write_str("controls.visible"),
            Self::ControlsWidth => f.write_str("controls.width"),
            Self::ControlsDark => f.write_str("controls.dark"),
            Self::ControlsColor(layer, state) => {
                write!(f, "controls.{}.{}", layer.as_str(), state.as_str())
            }
            Self::Extension(key) => f.write_str(key),
        }
    }
}

/// The type tag of a [`PropertyValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Number,
    Color,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::Color => "color",
        })
    }
}

/// A title bar property value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Color(Color),
}

impl PropertyValue {
    /// The type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::Color(_) => ValueKind::Color,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Color> for PropertyValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// The property bag of a custom title bar.
///
/// Entries are independent of each other; insertion order is not kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleBarProperties {
    entries: HashMap<PropertyKey, PropertyValue>,
}

impl TitleBarProperties {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property by its string key.
    ///
    /// Returns `None` for unset or unknown keys.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        let key = key.parse::<PropertyKey>().ok()?;
        self.entries.get(&key)
    }

    /// Look up a property by its typed key.
    pub fn get_key(&self, key: &PropertyKey) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Whether window controls are visible. Defaults to `true`.
    pub fn controls_visible(&self) -> bool {
        self.get_key(&PropertyKey::ControlsVisible)
            .and_then(PropertyValue::as_bool)
            .unwrap_or(true)
    }

    /// The explicit width of the control button block, if set.
    pub fn controls_width(&self) -> Option<f32> {
        self.get_key(&PropertyKey::ControlsWidth)
            .and_then(PropertyValue::as_number)
            .map(|width| width as f32)
    }

    /// Whether the dark control theme was requested, if set.
    pub fn controls_dark(&self) -> Option<bool> {
        self.get_key(&PropertyKey::ControlsDark)
            .and_then(PropertyValue::as_bool)
    }

    /// The color for a control layer in a given state, if set.
    pub fn control_color(&self, layer: ControlLayer, state: ControlState) -> Option<Color> {
        self.get_key(&PropertyKey::ControlsColor(layer, state))
            .and_then(PropertyValue::as_color)
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyValue)> {
        self.entries.iter()
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no properties are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a validated entry.
    pub(crate) fn insert(
        &mut self,
        key: PropertyKey,
        value: PropertyValue,
    ) -> DecorationResult<()> {
        key.validate(&value)?;
        self.entries.insert(key, value);
        Ok(())
    }
}
