//! Logging facilities for window decorations.
//!
//! All instrumentation goes through the `tracing` crate. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_decorations::hit_test=trace")
//!     .init();
//! ```
//!
//! Attach and detach transitions log at `debug`, per-event arbitration at
//! `trace`, and refused operations on unsupported platforms at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Crate-wide target.
    pub const DECORATIONS: &str = "horizon_decorations";
    /// Window and title bar registry target.
    pub const REGISTRY: &str = "horizon_decorations::registry";
    /// Hit-test arbitration target.
    pub const HIT_TEST: &str = "horizon_decorations::hit_test";
    /// Pointer event dispatch target.
    pub const DISPATCH: &str = "horizon_decorations::dispatch";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_decorations::config";
}

/// Span names used for tracing.
pub mod span_names {
    /// One pointer event turn, from delivery to hit-test evaluation.
    pub const POINTER_TURN: &str = "horizon_decorations::pointer_turn";
}
