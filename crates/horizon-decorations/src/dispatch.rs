//! Pointer event dispatch.
//!
//! The dispatcher owns the per-window [`HitTestArbiter`]s and drives one
//! arbitration turn per delivered pointer event. Client handlers receive a
//! [`HitTestContext`] scoped to that event, so an override can never be
//! issued against a different event than the one being handled.

use std::marker::PhantomData;

use slotmap::SecondaryMap;

use crate::event_router::PointerTracker;
use crate::hit_test::{HitTestArbiter, HitTestEvaluation, HitTestResult};
use crate::logging::{span_names, targets};
use crate::registry::WindowHandle;
use crate::types::Point;

/// The kind of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// The pointer entered the window.
    Entered,
    /// The pointer moved with no button held.
    Moved,
    /// The pointer moved with a button held.
    Dragged,
    /// A button was pressed.
    Pressed,
    /// A button was released.
    Released,
    /// A button was pressed and released without the pointer moving.
    Clicked,
    /// The pointer left the window.
    Exited,
    /// The wheel or trackpad scrolled.
    Wheel,
}

impl PointerEventKind {
    /// Whether client code may force a hit-test result while handling this
    /// kind of event.
    ///
    /// Exit and wheel events cannot start native title bar gestures, so
    /// there is nothing to arbitrate.
    pub fn accepts_hit_test_override(&self) -> bool {
        !matches!(self, Self::Exited | Self::Wheel)
    }
}

/// A pointer event in window-local logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// Access to the arbitration of the event being handled.
///
/// Handed to client handlers by [`PointerDispatcher::dispatch`] and
/// [`WindowDecorations::dispatch_pointer_event`](crate::WindowDecorations::dispatch_pointer_event).
#[derive(Debug)]
pub struct HitTestContext<'a> {
    event: PointerEvent,
    arbiter: Option<&'a mut HitTestArbiter>,
}

impl<'a> HitTestContext<'a> {
    pub(crate) fn new(event: PointerEvent, arbiter: Option<&'a mut HitTestArbiter>) -> Self {
        Self { event, arbiter }
    }

    /// The event being handled.
    pub fn event(&self) -> PointerEvent {
        self.event
    }

    /// Whether the window has a custom title bar to arbitrate.
    pub fn is_arbitrated(&self) -> bool {
        self.arbiter.is_some()
    }

    /// Whether the pointer is inside the custom title bar strip.
    pub fn in_title_bar(&self) -> bool {
        self.arbiter
            .as_deref()
            .is_some_and(HitTestArbiter::pointer_in_title_bar)
    }

    /// Force client (`true`) or non-client (`false`) handling for this event.
    ///
    /// Returns whether the override was recorded. Windows with the system
    /// title bar, exit events and wheel events ignore it.
    pub fn force_hit_test(&mut self, client: bool) -> bool {
        match self.arbiter.as_deref_mut() {
            Some(arbiter) => arbiter.force_hit_test(client),
            None => false,
        }
    }
}

/// Per-window input state for pointer dispatch.
#[derive(Debug, Default)]
pub(crate) struct WindowInput {
    pub(crate) arbiter: HitTestArbiter,
    pub(crate) tracker: PointerTracker,
}

/// Drives hit-test arbitration for all windows.
///
/// Neither `Send` nor `Sync`: the dispatcher stays on the thread that
/// delivers input.
#[derive(Debug, Default)]
pub struct PointerDispatcher {
    inputs: SecondaryMap<WindowHandle, WindowInput>,
    _not_send: PhantomData<*const ()>,
}

impl PointerDispatcher {
    /// Create a dispatcher with no window state.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn input_mut(&mut self, window: WindowHandle) -> Option<&mut WindowInput> {
        self.inputs
            .entry(window)
            .map(|entry| entry.or_insert_with(WindowInput::default))
    }

    /// The arbiter of a window, if it has received events.
    pub fn arbiter(&self, window: WindowHandle) -> Option<&HitTestArbiter> {
        self.inputs.get(window).map(|input| &input.arbiter)
    }

    /// The arbiter of a window, created on first use.
    ///
    /// Returns `None` only for handles older than a removed entry.
    pub fn arbiter_mut(&mut self, window: WindowHandle) -> Option<&mut HitTestArbiter> {
        self.input_mut(window).map(|input| &mut input.arbiter)
    }

    /// Open an arbitration turn for `event` on `window`.
    pub fn begin_turn(&mut self, window: WindowHandle, event: PointerEvent, in_title_bar: bool) {
        if let Some(arbiter) = self.arbiter_mut(window) {
            arbiter.begin_turn(event, in_title_bar);
        }
    }

    /// Force the result of the open turn on `window`.
    pub fn force_hit_test(&mut self, window: WindowHandle, client: bool) -> bool {
        self.inputs
            .get_mut(window)
            .is_some_and(|input| input.arbiter.force_hit_test(client))
    }

    /// Consume the decision of the open turn on `window`.
    pub fn evaluate<F>(&mut self, window: WindowHandle, default: F) -> Option<HitTestEvaluation>
    where
        F: FnOnce(Point) -> HitTestResult,
    {
        self.inputs.get_mut(window)?.arbiter.evaluate(default)
    }

    /// Close the open turn on `window` without evaluating it.
    ///
    /// The pointer tracker keeps its state. Returns whether a turn was open.
    pub fn cancel_turn(&mut self, window: WindowHandle) -> bool {
        self.inputs
            .get_mut(window)
            .is_some_and(|input| input.arbiter.cancel_turn())
    }

    /// Run one complete turn: open it, let `handler` react to the event,
    /// then evaluate.
    pub fn dispatch<H, F>(
        &mut self,
        window: WindowHandle,
        event: PointerEvent,
        in_title_bar: bool,
        handler: H,
        default: F,
    ) -> Option<HitTestEvaluation>
    where
        H: FnOnce(&mut HitTestContext<'_>),
        F: FnOnce(Point) -> HitTestResult,
    {
        let _span = tracing::trace_span!(
            target: targets::DISPATCH,
            span_names::POINTER_TURN,
            kind = ?event.kind
        )
        .entered();

        let arbiter = self.arbiter_mut(window)?;
        arbiter.begin_turn(event, in_title_bar);
        let mut context = HitTestContext::new(event, Some(arbiter));
        handler(&mut context);

        self.evaluate(window, default)
    }

    /// Drop all state kept for `window`.
    pub fn forget(&mut self, window: WindowHandle) {
        self.inputs.remove(window);
    }
}
