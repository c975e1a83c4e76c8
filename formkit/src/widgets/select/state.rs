//! Select widget state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use formdom::{CancellationToken, Document, Element, Rect, Tag};

use super::dropdown::{
    DropdownController, PanelLayout, PanelMetrics, PanelState, PanelTransition, Placement,
    RenderMode, compute_layout,
};
use super::filter::SearchFilter;
use super::item::Row;
use super::options::OptionModel;
use super::render::{self, Part, PartIds};
use super::scroller::VirtualScroller;
use crate::adapter::{FormControl, SelectAdapter};
use crate::config::{FormConfig, SelectConfig};
use crate::context::WidgetContext;
use crate::error::BindError;
use crate::events::{WidgetEvent, WidgetEventKind};

/// Unique identifier for a Select widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

impl WidgetId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "select_{}", self.0)
    }
}

/// A replacement dropdown bound to one `<select>` element.
///
/// The source element stays in the document, hidden, and always carries
/// the selected value. The widget renders its own container right after
/// it and keeps the two in step.
#[derive(Debug)]
pub struct SelectWidget {
    pub(super) id: WidgetId,
    pub(super) source_id: String,
    pub(super) parts: PartIds,
    pub(super) config: SelectConfig,
    pub(super) model: OptionModel,
    pub(super) scroller: VirtualScroller,
    pub(super) filter: SearchFilter,
    pub(super) dropdown: DropdownController,
    pub(super) search_enabled: bool,
    pub(super) no_results: bool,
    pub(super) base_z: i32,
    source_was_hidden: bool,
    lifecycle: CancellationToken,
}

impl SelectWidget {
    /// Bind a widget to the `<select>` with ID `source_id`.
    pub fn bind(
        cx: &mut WidgetContext<'_>,
        source_id: &str,
        config: SelectConfig,
        form: &FormConfig,
    ) -> Result<Self, BindError> {
        let source = cx
            .doc
            .get(source_id)
            .ok_or_else(|| BindError::NotFound(source_id.to_string()))?;
        if source.tag != Tag::Select {
            return Err(BindError::NotASelect {
                id: source_id.to_string(),
                tag: source.tag.name().to_string(),
            });
        }

        let model = OptionModel::build(source, &config, form);
        let base_z = if source.z_index > 0 {
            source.z_index
        } else {
            config.z_index
        };
        let source_classes = source.classes.clone();
        let source_was_hidden = source.hidden;

        let lifecycle = CancellationToken::new();
        let widget = Self {
            id: WidgetId::new(),
            source_id: source_id.to_string(),
            parts: PartIds::new(source_id),
            scroller: VirtualScroller::new(model.total_rows(), &config, lifecycle.clone()),
            filter: SearchFilter::new(),
            dropdown: DropdownController::new(lifecycle.clone()),
            search_enabled: config.search.enabled_for(model.total_rows()),
            no_results: false,
            base_z,
            source_was_hidden,
            lifecycle,
            model,
            config,
        };

        if let Some(source) = cx.doc.get_mut(source_id) {
            if let (true, Some(placeholder), Some(options)) = (
                widget.model.synthesized_placeholder(),
                widget.model.placeholder(),
                source.child_elements_mut(),
            ) {
                options.insert(
                    0,
                    Element::option("", placeholder).id(widget.placeholder_option_id()),
                );
            }
            source.hidden = true;
        }

        let container = render::build(&widget, &source_classes);
        if !cx.doc.insert_after(source_id, container) {
            log::warn!("select {} has no parent; replacement not inserted", source_id);
        }

        widget.write_selection(cx);
        render::sync(&widget, cx.doc);
        log::debug!(
            "bound {} to #{} ({} rows, window {})",
            widget.id,
            source_id,
            widget.model.total_rows(),
            widget.scroller.window()
        );
        Ok(widget)
    }

    fn placeholder_option_id(&self) -> String {
        format!("{}_placeholder", self.source_id)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// ID of the bound source element.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn parts(&self) -> &PartIds {
        &self.parts
    }

    pub fn container_id(&self) -> &str {
        self.parts.container()
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn model(&self) -> &OptionModel {
        &self.model
    }

    pub fn scroller(&self) -> &VirtualScroller {
        &self.scroller
    }

    /// Selected value, or the empty string.
    pub fn value(&self) -> &str {
        self.model.selected_value()
    }

    /// Text shown in the closed field.
    pub fn label(&self) -> &str {
        self.model
            .selected()
            .map(|o| o.label.as_str())
            .or(self.model.placeholder())
            .unwrap_or("")
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    pub fn panel_state(&self) -> PanelState {
        self.dropdown.state()
    }

    pub fn panel_layout(&self) -> PanelLayout {
        self.dropdown.layout()
    }

    pub fn placement(&self) -> Placement {
        self.dropdown.layout().placement
    }

    pub fn render_mode(&self) -> RenderMode {
        self.dropdown.layout().mode
    }

    pub fn has_search(&self) -> bool {
        self.search_enabled
    }

    pub fn query(&self) -> &str {
        self.filter.query()
    }

    pub fn visible_count(&self) -> usize {
        self.model.visible_count()
    }

    pub fn no_results(&self) -> bool {
        self.no_results
    }

    pub fn has_scroll_affordances(&self) -> bool {
        self.scroller.has_affordances()
    }

    pub fn top_offset(&self) -> i32 {
        self.scroller.top_offset()
    }

    /// Option index of the keyboard preselection.
    pub fn preselected(&self) -> Option<usize> {
        self.dropdown.preselected()
    }

    pub fn preselected_value(&self) -> Option<&str> {
        let index = self.dropdown.preselected()?;
        self.model.option(index).map(|o| o.value.as_str())
    }

    /// Current stacking order: raised while open, less so while closing.
    pub fn z_index(&self) -> i32 {
        match self.dropdown.state() {
            PanelState::Opening | PanelState::Open => self.base_z.saturating_add(10),
            PanelState::Closing => self.base_z.saturating_add(5),
            PanelState::Closed => self.base_z,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.dropdown.is_animating() || self.scroller.is_animating()
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle.is_cancelled()
    }

    /// A token cancelled when the widget is destroyed.
    pub fn lifecycle(&self) -> &CancellationToken {
        &self.lifecycle
    }

    pub(super) fn anchor_rect(&self, doc: &Document) -> Rect {
        doc.rect(self.parts.container())
            .or_else(|| doc.rect(&self.source_id))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Select the option carrying `value` and close the panel.
    ///
    /// An empty or unknown value clears the selection when removal is
    /// permitted and is ignored otherwise. Returns true if the value changed.
    pub fn select(&mut self, cx: &mut WidgetContext<'_>, value: &str) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let previous = self.model.selected_value().to_string();

        if self.model.set_selected(value).is_none() {
            if !self.model.removal_permitted() {
                log::debug!("{}: no option '{}', selection kept", self.id, value);
                return false;
            }
            self.model.clear_selected();
        }

        let changed = previous != self.model.selected_value();
        self.write_selection(cx);
        if changed {
            log::debug!("{}: '{}' -> '{}'", self.id, previous, self.value());
            let event = self.event(WidgetEventKind::Change);
            cx.push_event(event);
        }
        self.close(cx);
        render::sync(self, cx.doc);
        changed
    }

    /// Clear the selection through the remove affordance.
    pub fn remove_selection(&mut self, cx: &mut WidgetContext<'_>) -> bool {
        if self.is_destroyed() || !self.model.removal_permitted() {
            return false;
        }
        self.reset_view();
        self.select(cx, "")
    }

    /// Clear selection (if permitted), search and scroll.
    pub fn reset(&mut self, cx: &mut WidgetContext<'_>) {
        if self.is_destroyed() {
            return;
        }
        let previous = self.model.selected_value().to_string();
        if self.model.removal_permitted() {
            self.model.clear_selected();
        }
        self.reset_view();
        self.write_selection(cx);
        if previous != self.model.selected_value() {
            let event = self.event(WidgetEventKind::Change);
            cx.push_event(event);
        }
        render::sync(self, cx.doc);
    }

    fn reset_view(&mut self) {
        self.filter.clear(&mut self.model);
        self.no_results = false;
        self.scroller.set_row_count(self.model.visible_row_count());
        self.scroller.reset();
        self.dropdown.clear_preselection();
    }

    /// Mirror the selection onto the source element and report it to the
    /// required-state collaborator.
    fn write_selection(&self, cx: &mut WidgetContext<'_>) {
        let value = self.model.selected_value();
        let mut adapter = SelectAdapter::new(cx.doc, &self.source_id, self.parts.container());
        adapter.set_selection(value);
        cx.required.set_required(&mut adapter, !value.is_empty());
    }

    fn event(&self, kind: WidgetEventKind) -> WidgetEvent {
        WidgetEvent::new(kind, self.id, self.source_id.as_str(), self.value())
    }

    // -------------------------------------------------------------------------
    // Panel
    // -------------------------------------------------------------------------

    /// Open the panel. Returns false if it is already open.
    pub fn open(&mut self, cx: &mut WidgetContext<'_>) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let layout = compute_layout(&self.panel_metrics(cx.doc), &self.config);
        let duration = self.config.reveal_duration(layout.mode == RenderMode::Fade);
        if !self.dropdown.open(layout, duration, cx.now) {
            return false;
        }

        let selected = self
            .model
            .selected_index()
            .filter(|&i| self.model.option(i).is_some_and(|o| o.visible));
        self.dropdown.preselect(selected);
        if let Some(position) = selected.and_then(|i| self.model.row_position(Row::Option(i))) {
            self.scroller.center_on(position, cx.now);
        }

        log::debug!("{}: open {:?}/{:?}", self.id, layout.placement, layout.mode);
        let event = self.event(WidgetEventKind::Open);
        cx.push_event(event);

        self.tick(cx.doc, cx.now);
        render::sync(self, cx.doc);
        if self.config.focus_search && self.search_enabled {
            cx.doc.focus(&self.parts.id(Part::Search));
        }
        true
    }

    /// Close the panel. Returns false if it is already closed.
    pub fn close(&mut self, cx: &mut WidgetContext<'_>) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let duration = self
            .config
            .reveal_duration(self.dropdown.layout().mode == RenderMode::Fade);
        if !self.dropdown.close(duration, cx.now) {
            return false;
        }
        log::debug!("{}: close", self.id);
        let event = self.event(WidgetEventKind::Close);
        cx.push_event(event);

        self.tick(cx.doc, cx.now);
        render::sync(self, cx.doc);
        true
    }

    pub fn toggle(&mut self, cx: &mut WidgetContext<'_>) -> bool {
        if self.is_open() {
            self.close(cx)
        } else {
            self.open(cx)
        }
    }

    fn panel_metrics(&self, doc: &Document) -> PanelMetrics {
        let affordance = if self.scroller.has_affordances() {
            self.config.arrow_height
        } else {
            0
        };
        let search = if self.search_enabled {
            self.config.search_height
        } else {
            0
        };
        let notice = if self.model.option_count() == 0 {
            self.config.row_height
        } else {
            0
        };
        PanelMetrics {
            anchor: self.anchor_rect(doc),
            viewport: doc.viewport(),
            chrome_above: search + affordance,
            chrome_below: affordance + notice,
            rows: self.scroller.shown_rows(),
            row_height: self.scroller.row_height(),
        }
    }

    // -------------------------------------------------------------------------
    // Search and groups
    // -------------------------------------------------------------------------

    /// Filter the options and preselect the first match.
    pub fn set_query(&mut self, cx: &mut WidgetContext<'_>, query: &str) -> usize {
        if self.is_destroyed() {
            return 0;
        }
        let count = self.filter.apply(query, &mut self.model);
        self.no_results = self.filter.is_active() && count == 0;
        self.scroller.set_row_count(self.model.visible_row_count());
        self.scroller.scroll_to(1, 0, cx.now);
        self.dropdown.preselect(self.model.first_navigable());
        render::sync(self, cx.doc);
        count
    }

    /// Collapse or expand an option group.
    /// A preselection hidden by the collapse moves to the first visible option.
    pub fn toggle_group(&mut self, cx: &mut WidgetContext<'_>, group: usize) -> bool {
        if self.is_destroyed() || !self.model.toggle_group(group) {
            return false;
        }
        self.scroller.set_row_count(self.model.visible_row_count());
        let hidden = self
            .dropdown
            .preselected()
            .is_some_and(|i| !self.model.option(i).is_some_and(|o| o.visible));
        if hidden {
            self.dropdown.preselect(self.model.first_navigable());
        }
        render::sync(self, cx.doc);
        true
    }

    // -------------------------------------------------------------------------
    // Frames and teardown
    // -------------------------------------------------------------------------

    /// Advance animations. Returns true while any is still running.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.scroller.tick(now);
        match self.dropdown.tick(now) {
            Some(PanelTransition::Closed) => {
                // The next open starts from a clean list
                self.reset_view();
                log::debug!("{}: closed", self.id);
                render::sync(self, doc);
            }
            Some(PanelTransition::Opened) => {
                log::trace!("{}: opened", self.id);
                render::sync(self, doc);
            }
            None => render::sync_motion(self, doc),
        }
        self.is_animating()
    }

    /// Remove the replacement and give the source element back.
    ///
    /// Pending animations are cancelled and every later call is a no-op.
    pub fn destroy(&mut self, doc: &mut Document) {
        if self.is_destroyed() {
            return;
        }
        self.lifecycle.cancel();
        doc.remove(self.parts.container());
        if self.model.synthesized_placeholder() {
            doc.remove(&self.placeholder_option_id());
        }
        if let Some(source) = doc.get_mut(&self.source_id) {
            source.hidden = self.source_was_hidden;
        }
        log::debug!("{}: destroyed", self.id);
    }
}
