//! Per-event hit-test arbitration for custom title bars.
//!
//! When a window has a custom title bar, the title bar strip is part of the
//! client area but keeps some native behavior: dragging moves the window and
//! a double-click maximizes it. For every pointer event the native layer has
//! to know whether the pointer is over *client* content (the event belongs to
//! the application, no native gesture) or over *non-client* area (native
//! gestures are allowed).
//!
//! # Protocol
//!
//! 1. Input dispatch delivers a pointer event and opens a turn with
//!    [`HitTestArbiter::begin_turn`].
//! 2. Client handlers may call [`HitTestArbiter::force_hit_test`] any number
//!    of times; the last call wins.
//! 3. The native layer calls [`HitTestArbiter::evaluate`], which consumes the
//!    override and closes the turn. Without an override the window surface's
//!    default heuristic decides.
//!
//! ```text
//!            force_hit_test(true)
//!   Unset ─────────────────────────▶ ForceClient ──┐
//!     │ ▲    force_hit_test(false)                 │
//!     │ └──────────────────────────────────────────┤ evaluate / next turn
//!     └───────────────────────────▶ ForceNonClient ┘
//! ```
//!
//! An override never outlives its turn. A force issued after evaluation, or
//! outside any turn, is a no-op and the next event falls back to the default.
//! Exit and wheel events never accept an override.

use crate::controls::Insets;
use crate::dispatch::PointerEvent;
use crate::logging::targets;
use crate::types::{Point, Rect};

/// Whether a point behaves as client or non-client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTestResult {
    /// Application content. Native title bar behavior is disabled.
    Client,
    /// Native title bar area. Dragging and double-click maximize are enabled.
    NonClient,
}

impl HitTestResult {
    /// Check if native title bar gestures may start.
    pub fn allows_native_gestures(&self) -> bool {
        matches!(self, Self::NonClient)
    }
}

/// The arbitration flag for the current event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitTestOverride {
    /// No override; the default heuristic decides.
    #[default]
    Unset,
    /// Treat the point as client area.
    ForceClient,
    /// Treat the point as non-client area.
    ForceNonClient,
}

impl HitTestOverride {
    fn result(&self) -> Option<HitTestResult> {
        match self {
            Self::Unset => None,
            Self::ForceClient => Some(HitTestResult::Client),
            Self::ForceNonClient => Some(HitTestResult::NonClient),
        }
    }
}

/// What decided an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// Client code forced the result during the event.
    Override,
    /// The window surface's default heuristic.
    Heuristic,
    /// The pointer was outside the title bar strip, which is always client.
    OutsideTitleBar,
}

/// The outcome of one hit-test evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestEvaluation {
    pub result: HitTestResult,
    pub source: DecisionSource,
}

/// Geometry of a custom title bar strip in window-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleBarStrip {
    bounds: Rect,
    insets: Insets,
}

impl TitleBarStrip {
    /// Create a strip with the given bounds and reserved control insets.
    pub fn new(bounds: Rect, insets: Insets) -> Self {
        Self { bounds, insets }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Check if a point lies within the strip.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Check if a point lies over the native window controls.
    pub fn in_controls(&self, point: Point) -> bool {
        if !self.contains(point) {
            return false;
        }
        point.x < self.bounds.left() + self.insets.left
            || point.x >= self.bounds.right() - self.insets.right
    }
}

/// The event currently being handled.
#[derive(Debug, Clone, Copy)]
struct PointerTurn {
    event: PointerEvent,
    in_title_bar: bool,
}

/// Per-window arbitration state.
///
/// Owned by the pointer dispatcher, one per window. See the
/// [module documentation](self) for the protocol.
#[derive(Debug, Default)]
pub struct HitTestArbiter {
    pending: HitTestOverride,
    turn: Option<PointerTurn>,
}

impl HitTestArbiter {
    /// Create an idle arbiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a turn for a freshly delivered pointer event.
    ///
    /// A turn that was never evaluated is abandoned together with its override.
    pub fn begin_turn(&mut self, event: PointerEvent, in_title_bar: bool) {
        if let Some(previous) = self.turn.take() {
            tracing::trace!(
                target: targets::HIT_TEST,
                kind = ?previous.event.kind,
                pending = ?self.pending,
                "abandoning unevaluated pointer turn"
            );
        }
        self.pending = HitTestOverride::Unset;
        self.turn = Some(PointerTurn {
            event,
            in_title_bar,
        });
    }

    /// Force the result of the next evaluation for the current event.
    ///
    /// `client = true` treats the pointer as over client area (native title
    /// bar behavior disabled), `client = false` as non-client (native
    /// behavior enabled). Repeated calls within one event collapse to the
    /// last value.
    ///
    /// Returns `false` and changes nothing when no turn is open or the
    /// current event is an exit or wheel event.
    pub fn force_hit_test(&mut self, client: bool) -> bool {
        let Some(turn) = self.turn else {
            tracing::debug!(
                target: targets::HIT_TEST,
                client,
                "hit-test override outside a pointer turn ignored"
            );
            return false;
        };

        if !turn.event.kind.accepts_hit_test_override() {
            tracing::debug!(
                target: targets::HIT_TEST,
                kind = ?turn.event.kind,
                client,
                "hit-test override ignored for this event kind"
            );
            return false;
        }

        self.pending = if client {
            HitTestOverride::ForceClient
        } else {
            HitTestOverride::ForceNonClient
        };
        true
    }

    /// Consume the current turn's decision.
    ///
    /// `default` is consulted only when the pointer is inside the title bar
    /// strip and no override was forced. The override resets to
    /// [`HitTestOverride::Unset`] and the turn closes, whatever the outcome.
    ///
    /// Returns `None` when no turn is open.
    pub fn evaluate<F>(&mut self, default: F) -> Option<HitTestEvaluation>
    where
        F: FnOnce(Point) -> HitTestResult,
    {
        let turn = self.turn.take()?;
        let pending = std::mem::take(&mut self.pending);

        let evaluation = if !turn.in_title_bar {
            HitTestEvaluation {
                result: HitTestResult::Client,
                source: DecisionSource::OutsideTitleBar,
            }
        } else if let Some(result) = pending.result() {
            HitTestEvaluation {
                result,
                source: DecisionSource::Override,
            }
        } else {
            HitTestEvaluation {
                result: default(turn.event.position),
                source: DecisionSource::Heuristic,
            }
        };

        tracing::trace!(
            target: targets::HIT_TEST,
            kind = ?turn.event.kind,
            x = turn.event.position.x,
            y = turn.event.position.y,
            result = ?evaluation.result,
            source = ?evaluation.source,
            "hit test evaluated"
        );
        Some(evaluation)
    }

    /// Close the open turn without evaluating it, dropping its override.
    ///
    /// Used when the title bar strip the turn was opened against goes away.
    /// Returns whether a turn was open.
    pub fn cancel_turn(&mut self) -> bool {
        self.pending = HitTestOverride::Unset;
        match self.turn.take() {
            Some(turn) => {
                tracing::trace!(
                    target: targets::HIT_TEST,
                    kind = ?turn.event.kind,
                    "pointer turn cancelled"
                );
                true
            }
            None => false,
        }
    }

    /// The override recorded for the current turn.
    pub fn pending_override(&self) -> HitTestOverride {
        self.pending
    }

    /// Whether a pointer event is currently being handled.
    pub fn is_turn_active(&self) -> bool {
        self.turn.is_some()
    }

    /// The event of the open turn, if any.
    pub fn current_event(&self) -> Option<PointerEvent> {
        self.turn.map(|turn| turn.event)
    }

    /// Whether the open turn's pointer is inside the title bar strip.
    pub fn pointer_in_title_bar(&self) -> bool {
        self.turn.is_some_and(|turn| turn.in_title_bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::PointerEventKind;

    fn event(kind: PointerEventKind) -> PointerEvent {
        PointerEvent::new(kind, Point::new(100.0, 10.0))
    }

    fn heuristic_client(_: Point) -> HitTestResult {
        HitTestResult::Client
    }

    fn heuristic_non_client(_: Point) -> HitTestResult {
        HitTestResult::NonClient
    }

    #[test]
    fn test_force_client() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Pressed), true);
        assert!(arbiter.force_hit_test(true));
        assert_eq!(arbiter.pending_override(), HitTestOverride::ForceClient);

        let evaluation = arbiter.evaluate(heuristic_non_client).unwrap();
        assert_eq!(evaluation.result, HitTestResult::Client);
        assert_eq!(evaluation.source, DecisionSource::Override);
    }

    #[test]
    fn test_force_non_client() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Moved), true);
        arbiter.force_hit_test(false);

        let evaluation = arbiter.evaluate(heuristic_client).unwrap();
        assert_eq!(evaluation.result, HitTestResult::NonClient);
        assert!(evaluation.result.allows_native_gestures());
    }

    #[test]
    fn test_no_override_uses_heuristic() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Moved), true);
        let evaluation = arbiter.evaluate(heuristic_client).unwrap();
        assert_eq!(evaluation.result, HitTestResult::Client);
        assert_eq!(evaluation.source, DecisionSource::Heuristic);
    }

    #[test]
    fn test_override_does_not_persist() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Pressed), true);
        arbiter.force_hit_test(true);
        arbiter.evaluate(heuristic_non_client);
        assert_eq!(arbiter.pending_override(), HitTestOverride::Unset);
        assert!(!arbiter.is_turn_active());

        arbiter.begin_turn(event(PointerEventKind::Released), true);
        let evaluation = arbiter.evaluate(heuristic_non_client).unwrap();
        assert_eq!(evaluation.result, HitTestResult::NonClient);
        assert_eq!(evaluation.source, DecisionSource::Heuristic);
    }

    #[test]
    fn test_last_force_wins() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Clicked), true);
        arbiter.force_hit_test(true);
        arbiter.force_hit_test(false);
        arbiter.force_hit_test(true);
        arbiter.force_hit_test(false);
        let evaluation = arbiter.evaluate(heuristic_client).unwrap();
        assert_eq!(evaluation.result, HitTestResult::NonClient);
    }

    #[test]
    fn test_force_outside_turn_is_noop() {
        let mut arbiter = HitTestArbiter::new();
        assert!(!arbiter.force_hit_test(true));
        assert_eq!(arbiter.pending_override(), HitTestOverride::Unset);
        assert!(arbiter.evaluate(heuristic_client).is_none());
    }

    #[test]
    fn test_late_force_after_evaluation_is_dropped() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Dragged), true);
        arbiter.evaluate(heuristic_non_client);
        assert!(!arbiter.force_hit_test(true));

        arbiter.begin_turn(event(PointerEventKind::Dragged), true);
        let evaluation = arbiter.evaluate(heuristic_non_client).unwrap();
        assert_eq!(evaluation.result, HitTestResult::NonClient);
    }

    #[test]
    fn test_exit_and_wheel_reject_override() {
        for kind in [PointerEventKind::Exited, PointerEventKind::Wheel] {
            let mut arbiter = HitTestArbiter::new();
            arbiter.begin_turn(event(kind), true);
            assert!(!arbiter.force_hit_test(true));
            let evaluation = arbiter.evaluate(heuristic_non_client).unwrap();
            assert_eq!(evaluation.source, DecisionSource::Heuristic);
        }
    }

    #[test]
    fn test_outside_title_bar_is_client_and_consumes_override() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Pressed), false);
        assert!(arbiter.force_hit_test(false));

        let evaluation = arbiter.evaluate(heuristic_non_client).unwrap();
        assert_eq!(evaluation.result, HitTestResult::Client);
        assert_eq!(evaluation.source, DecisionSource::OutsideTitleBar);
        assert_eq!(arbiter.pending_override(), HitTestOverride::Unset);
    }

    #[test]
    fn test_new_turn_discards_unevaluated_override() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Pressed), true);
        arbiter.force_hit_test(true);

        arbiter.begin_turn(event(PointerEventKind::Moved), true);
        assert_eq!(arbiter.pending_override(), HitTestOverride::Unset);
        let evaluation = arbiter.evaluate(heuristic_non_client).unwrap();
        assert_eq!(evaluation.result, HitTestResult::NonClient);
    }

    #[test]
    fn test_cancel_turn_drops_override() {
        let mut arbiter = HitTestArbiter::new();
        arbiter.begin_turn(event(PointerEventKind::Pressed), true);
        arbiter.force_hit_test(false);

        assert!(arbiter.cancel_turn());
        assert!(!arbiter.is_turn_active());
        assert_eq!(arbiter.pending_override(), HitTestOverride::Unset);
        assert!(arbiter.evaluate(heuristic_client).is_none());
        assert!(!arbiter.cancel_turn());
    }

    #[test]
    fn test_strip_controls() {
        let strip = TitleBarStrip::new(Rect::new(0.0, 0.0, 800.0, 32.0), Insets::new(70.0, 0.0));
        assert!(strip.in_controls(Point::new(10.0, 10.0)));
        assert!(!strip.in_controls(Point::new(70.0, 10.0)));
        assert!(!strip.in_controls(Point::new(10.0, 40.0)));
        assert!(!strip.in_controls(Point::new(799.0, 10.0)));
    }
}
