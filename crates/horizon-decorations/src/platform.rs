//! Platform capability queries.
//!
//! Custom title bars are only implemented on Windows and macOS. Every
//! operation that would change what the user sees is gated through
//! [`PlatformCapabilities`], so unsupported platforms degrade to refused
//! no-ops rather than hard failures.

use std::fmt;

/// The desktop platform a decoration service targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Microsoft Windows. Window controls sit on the right.
    Windows,
    /// macOS. Window controls (traffic lights) sit on the left.
    MacOs,
    /// Linux desktops (X11 and Wayland).
    Linux,
    /// Any other target.
    Other,
}

impl Platform {
    /// Detect the platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Human-readable platform name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Other => "this platform",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability queries for window decoration features.
pub trait PlatformCapabilities {
    /// The platform these capabilities describe.
    fn platform(&self) -> Platform;

    /// Whether the system title bar can be replaced by a custom one.
    fn supports_custom_title_bar(&self) -> bool;

    /// Whether window controls can be recolored through
    /// `controls.<layer>.<state>` and resized through `controls.width`.
    fn supports_control_styling(&self) -> bool {
        false
    }
}

impl PlatformCapabilities for Platform {
    fn platform(&self) -> Platform {
        *self
    }

    fn supports_custom_title_bar(&self) -> bool {
        matches!(self, Self::Windows | Self::MacOs)
    }

    fn supports_control_styling(&self) -> bool {
        matches!(self, Self::Windows)
    }
}
