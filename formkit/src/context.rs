use std::time::Instant;

use formdom::Document;

use crate::events::{EventQueue, WidgetEvent};
use crate::required::RequiredState;

/// Everything a widget operation may touch.
///
/// Operations run synchronously: all state changes and element writes of
/// one call happen before it returns. Only animation progress is deferred
/// to later `tick` calls.
pub struct WidgetContext<'a> {
    pub doc: &'a mut Document,
    pub events: &'a mut EventQueue,
    pub required: &'a dyn RequiredState,
    /// The time of the event being handled.
    pub now: Instant,
}

impl<'a> WidgetContext<'a> {
    pub fn new(
        doc: &'a mut Document,
        events: &'a mut EventQueue,
        required: &'a dyn RequiredState,
        now: Instant,
    ) -> Self {
        Self {
            doc,
            events,
            required,
            now,
        }
    }

    pub fn push_event(&mut self, event: WidgetEvent) {
        self.events.push(event);
    }
}
