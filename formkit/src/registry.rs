//! Widget registry with a single active dropdown.
//!
//! The registry owns every bound widget, keyed by the ID of its source
//! element, and is the one place document-level input enters. It tracks
//! which widget's panel is open: keys, resizes and scrolls go to that
//! widget only, and a click outside it closes it.

use std::collections::HashMap;
use std::time::Instant;

use formdom::{Document, Event};

use crate::config::{FormConfig, SelectConfig};
use crate::context::WidgetContext;
use crate::error::BindError;
use crate::events::{EventQueue, EventResult, WidgetEvent};
use crate::required::{RequiredClasses, RequiredState};
use crate::widgets::select::{SelectWidget, WidgetId};

/// Registry managing all bound select widgets.
///
/// The registry tracks:
/// - All bound widgets (keyed by WidgetId)
/// - Which source element each widget is bound to
/// - The widget whose panel is open, if any
pub struct Registry {
    widgets: HashMap<WidgetId, SelectWidget>,
    by_element: HashMap<String, WidgetId>,
    active: Option<WidgetId>,
    form: FormConfig,
    required: Box<dyn RequiredState>,
    events: EventQueue,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry with the default attribute names.
    pub fn new() -> Self {
        Self::with_form_config(FormConfig::default())
    }

    pub fn with_form_config(form: FormConfig) -> Self {
        Self {
            widgets: HashMap::new(),
            by_element: HashMap::new(),
            active: None,
            required: Box::new(RequiredClasses::new(form.clone())),
            form,
            events: EventQueue::new(),
        }
    }

    /// Replace the required-state collaborator.
    pub fn with_required(mut self, required: impl RequiredState + 'static) -> Self {
        self.required = Box::new(required);
        self
    }

    pub fn form_config(&self) -> &FormConfig {
        &self.form
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// Bind a widget to the `<select>` with ID `source_id`.
    pub fn bind(
        &mut self,
        doc: &mut Document,
        source_id: &str,
        config: SelectConfig,
        now: Instant,
    ) -> Result<WidgetId, BindError> {
        if self.by_element.contains_key(source_id) {
            return Err(BindError::AlreadyBound(source_id.to_string()));
        }
        let mut cx = WidgetContext::new(doc, &mut self.events, self.required.as_ref(), now);
        let widget = SelectWidget::bind(&mut cx, source_id, config, &self.form)?;
        let id = widget.id();
        self.by_element.insert(source_id.to_string(), id);
        self.widgets.insert(id, widget);
        Ok(id)
    }

    /// Bind every element carrying the select attribute.
    ///
    /// Each element's configuration comes from the attribute value. Elements
    /// that cannot be bound are logged and skipped.
    pub fn scan(&mut self, doc: &mut Document, now: Instant) -> Vec<WidgetId> {
        let candidates: Vec<(String, String)> = doc
            .elements()
            .into_iter()
            .filter_map(|el| {
                el.get_attr(&self.form.select_attr)
                    .map(|literal| (el.id.clone(), literal.to_string()))
            })
            .collect();

        let mut bound = Vec::new();
        for (source_id, literal) in candidates {
            let config = SelectConfig::from_attribute(&literal);
            match self.bind(doc, &source_id, config, now) {
                Ok(id) => bound.push(id),
                Err(BindError::AlreadyBound(_)) => {
                    log::debug!("scan: #{} already bound", source_id);
                }
                Err(e) => log::warn!("scan: skipping #{}: {}", source_id, e),
            }
        }
        log::debug!("scan bound {} widgets", bound.len());
        bound
    }

    /// Unbind the widget on `source_id` and restore the element.
    pub fn destroy(&mut self, doc: &mut Document, source_id: &str) -> bool {
        let Some(id) = self.by_element.remove(source_id) else {
            return false;
        };
        if self.active == Some(id) {
            self.active = None;
        }
        match self.widgets.remove(&id) {
            Some(mut widget) => {
                widget.destroy(doc);
                true
            }
            None => false,
        }
    }

    pub fn destroy_all(&mut self, doc: &mut Document) {
        let sources: Vec<String> = self.by_element.keys().cloned().collect();
        for source_id in sources {
            self.destroy(doc, &source_id);
        }
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn widget(&self, id: WidgetId) -> Option<&SelectWidget> {
        self.widgets.get(&id)
    }

    /// The widget bound to `source_id`.
    pub fn widget_for(&self, source_id: &str) -> Option<&SelectWidget> {
        self.by_element
            .get(source_id)
            .and_then(|id| self.widgets.get(id))
    }

    pub fn is_bound(&self, source_id: &str) -> bool {
        self.by_element.contains_key(source_id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// The widget whose panel is open.
    pub fn active(&self) -> Option<WidgetId> {
        self.active
    }

    pub fn active_widget(&self) -> Option<&SelectWidget> {
        self.active.and_then(|id| self.widgets.get(&id))
    }

    /// Whether document-level input is currently captured by a panel.
    pub fn has_document_listeners(&self) -> bool {
        self.active.is_some()
    }

    /// Take the notifications emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        self.events.drain()
    }

    /// The widget owning an element: its source or anything in its container.
    fn owner_of(&self, doc: &Document, target: &str) -> Option<WidgetId> {
        if let Some(id) = self.by_element.get(target) {
            return Some(*id);
        }
        self.widgets
            .values()
            .find(|w| doc.contains(w.container_id(), target))
            .map(SelectWidget::id)
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    fn call<R>(
        &mut self,
        doc: &mut Document,
        id: WidgetId,
        now: Instant,
        f: impl FnOnce(&mut SelectWidget, &mut WidgetContext<'_>) -> R,
    ) -> Option<R> {
        let widget = self.widgets.get_mut(&id)?;
        let mut cx = WidgetContext::new(doc, &mut self.events, self.required.as_ref(), now);
        Some(f(widget, &mut cx))
    }

    /// Run `f` on a widget, then make it the active one if its panel opened.
    /// A previously active widget is closed.
    fn with_widget<R>(
        &mut self,
        doc: &mut Document,
        id: WidgetId,
        now: Instant,
        f: impl FnOnce(&mut SelectWidget, &mut WidgetContext<'_>) -> R,
    ) -> Option<R> {
        let result = self.call(doc, id, now, f)?;

        let open = self.widgets.get(&id).is_some_and(SelectWidget::is_open);
        if open && self.active != Some(id) {
            if let Some(previous) = self.active.replace(id) {
                self.call(doc, previous, now, |w, cx| w.close(cx));
            }
        } else if !open && self.active == Some(id) {
            self.active = None;
        }
        Some(result)
    }

    fn with_source<R>(
        &mut self,
        doc: &mut Document,
        source_id: &str,
        now: Instant,
        f: impl FnOnce(&mut SelectWidget, &mut WidgetContext<'_>) -> R,
    ) -> Option<R> {
        let id = *self.by_element.get(source_id)?;
        self.with_widget(doc, id, now, f)
    }

    pub fn open(&mut self, doc: &mut Document, source_id: &str, now: Instant) -> bool {
        self.with_source(doc, source_id, now, |w, cx| w.open(cx))
            .unwrap_or(false)
    }

    pub fn close(&mut self, doc: &mut Document, source_id: &str, now: Instant) -> bool {
        self.with_source(doc, source_id, now, |w, cx| w.close(cx))
            .unwrap_or(false)
    }

    pub fn toggle(&mut self, doc: &mut Document, source_id: &str, now: Instant) -> bool {
        self.with_source(doc, source_id, now, |w, cx| w.toggle(cx))
            .unwrap_or(false)
    }

    /// Select `value` on the widget bound to `source_id`.
    pub fn select(
        &mut self,
        doc: &mut Document,
        source_id: &str,
        value: &str,
        now: Instant,
    ) -> bool {
        self.with_source(doc, source_id, now, |w, cx| w.select(cx, value))
            .unwrap_or(false)
    }

    pub fn reset(&mut self, doc: &mut Document, source_id: &str, now: Instant) -> bool {
        self.with_source(doc, source_id, now, |w, cx| w.reset(cx))
            .is_some()
    }

    pub fn set_query(
        &mut self,
        doc: &mut Document,
        source_id: &str,
        query: &str,
        now: Instant,
    ) -> Option<usize> {
        self.with_source(doc, source_id, now, |w, cx| w.set_query(cx, query))
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Route a document-level event.
    pub fn dispatch(&mut self, doc: &mut Document, event: &Event, now: Instant) -> EventResult {
        match event {
            Event::Key { .. } => match self.active {
                Some(id) => self
                    .with_widget(doc, id, now, |w, cx| w.handle_event(cx, event))
                    .unwrap_or(EventResult::Ignored),
                None => EventResult::Ignored,
            },
            Event::Resize { width, height } => {
                doc.resize(*width, *height);
                self.close_active(doc, now)
            }
            Event::Scroll { x, y } => {
                doc.scroll_to(*x, *y);
                self.close_active(doc, now)
            }
            Event::Click {
                target,
                x,
                y,
                button,
            } => {
                let target = target.clone().or_else(|| doc.hit_test_any(*x, *y));
                let outside = match (self.active_widget(), &target) {
                    (Some(active), Some(t)) => !doc.contains(active.container_id(), t),
                    (Some(_), None) => true,
                    (None, _) => false,
                };
                let mut result = EventResult::Ignored;
                if outside {
                    log::debug!("outside click on {:?}", target);
                    result = self.close_active(doc, now);
                }
                let Some(target) = target else {
                    return result;
                };
                let event = Event::Click {
                    target: Some(target.clone()),
                    x: *x,
                    y: *y,
                    button: *button,
                };
                result.or(self.route(doc, &target, &event, now))
            }
            _ => match event.target().map(str::to_string) {
                Some(target) => self.route(doc, &target, event, now),
                None => EventResult::Ignored,
            },
        }
    }

    fn route(
        &mut self,
        doc: &mut Document,
        target: &str,
        event: &Event,
        now: Instant,
    ) -> EventResult {
        let Some(id) = self.owner_of(doc, target) else {
            return EventResult::Ignored;
        };
        self.with_widget(doc, id, now, |w, cx| w.handle_event(cx, event))
            .unwrap_or(EventResult::Ignored)
    }

    fn close_active(&mut self, doc: &mut Document, now: Instant) -> EventResult {
        let Some(id) = self.active else {
            return EventResult::Ignored;
        };
        self.with_widget(doc, id, now, |w, cx| w.close(cx));
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Frames
    // -------------------------------------------------------------------------

    /// Advance every widget's animations. Returns true while any is running.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) -> bool {
        let mut animating = false;
        for widget in self.widgets.values_mut() {
            animating |= widget.tick(doc, now);
        }
        animating
    }

    pub fn is_animating(&self) -> bool {
        self.widgets.values().any(SelectWidget::is_animating)
    }
}

#[cfg(test)]
mod tests {
    use formdom::Element;

    use super::*;

    fn document() -> Document {
        Document::new(Element::form().id("form").children(vec![
            Element::select()
                .id("a")
                .attr("data-select", "")
                .children(vec![Element::option("1", "One"), Element::option("2", "Two")]),
            Element::select()
                .id("b")
                .attr("data-select", "{\"placeholder\": \"Pick\"}")
                .child(Element::option("x", "X")),
            Element::input().id("c").attr("data-select", ""),
        ]))
        .with_viewport(800, 600)
    }

    #[test]
    fn test_scan_binds_selects_and_skips_others() {
        let mut doc = document();
        let mut registry = Registry::new();
        let bound = registry.scan(&mut doc, Instant::now());

        assert_eq!(bound.len(), 2);
        assert!(registry.is_bound("a"));
        assert!(registry.is_bound("b"));
        assert!(!registry.is_bound("c"));
        assert_eq!(registry.widget_for("b").map(SelectWidget::label), Some("Pick"));
    }

    #[test]
    fn test_double_bind_is_an_error() {
        let mut doc = document();
        let mut registry = Registry::new();
        let now = Instant::now();
        registry.bind(&mut doc, "a", SelectConfig::default(), now).unwrap();
        assert_eq!(
            registry.bind(&mut doc, "a", SelectConfig::default(), now),
            Err(BindError::AlreadyBound("a".to_string()))
        );
        // A rescan leaves the existing widget alone
        registry.scan(&mut doc, now);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_opening_one_closes_the_other() {
        let mut doc = document();
        let mut registry = Registry::new();
        let now = Instant::now();
        registry.scan(&mut doc, now);

        assert!(registry.open(&mut doc, "a", now));
        let a = registry.active();
        assert!(registry.open(&mut doc, "b", now));

        assert_ne!(registry.active(), a);
        assert!(registry.widget_for("a").is_some_and(|w| !w.is_open()));
        assert!(registry.widget_for("b").is_some_and(SelectWidget::is_open));
    }

    #[test]
    fn test_destroy_clears_active() {
        let mut doc = document();
        let mut registry = Registry::new();
        let now = Instant::now();
        registry.scan(&mut doc, now);
        registry.open(&mut doc, "a", now);

        assert!(registry.destroy(&mut doc, "a"));
        assert!(!registry.has_document_listeners());
        assert!(doc.get("a_replacement").is_none());
        assert!(doc.get("a").is_some_and(|el| !el.hidden));
    }
}
