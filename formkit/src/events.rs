//! Widget notifications and event results.
//!
//! Widgets never call back into surrounding code. They push
//! [`WidgetEvent`]s onto an [`EventQueue`] which the owner drains after each
//! interaction. Listeners are fire-and-forget: nothing flows back.

use std::collections::VecDeque;

use crate::widgets::select::WidgetId;

// =============================================================================
// Widget Event Types
// =============================================================================

/// What happened to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEventKind {
    /// The dropdown panel started opening.
    Open,
    /// The dropdown panel started closing.
    Close,
    /// The selected value changed.
    Change,
}

/// A notification emitted by a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetEvent {
    /// Which kind of event
    pub kind: WidgetEventKind,
    /// Widget that emitted the event
    pub widget_id: WidgetId,
    /// ID of the bound source element
    pub source_id: String,
    /// Selected value at the time of the event
    pub value: String,
}

impl WidgetEvent {
    /// Create a new widget event.
    pub fn new(
        kind: WidgetEventKind,
        widget_id: WidgetId,
        source_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            widget_id,
            source_id: source_id.into(),
            value: value.into(),
        }
    }
}

/// Pending widget notifications, in emission order.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<WidgetEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: WidgetEvent) {
        log::debug!(
            "{:?} from {} ({}) value='{}'",
            event.kind,
            event.widget_id,
            event.source_id,
            event.value
        );
        self.events.push_back(event);
    }

    /// Take all pending events.
    pub fn drain(&mut self) -> Vec<WidgetEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// =============================================================================
// Event Result
// =============================================================================

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    /// Combine two results, keeping `Consumed` if either consumed.
    pub fn or(self, other: EventResult) -> EventResult {
        if self.is_handled() { self } else { other }
    }
}
