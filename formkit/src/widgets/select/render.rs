//! Element tree of the replacement container.
//!
//! The container is inserted right after the hidden source `<select>`. Part
//! IDs are derived from the container ID so events can be routed back to
//! the part they hit:
//!
//! ```text
//! {source}_replacement
//! ├── -value
//! └── -dropdown
//!     ├── -search, -search-cancel
//!     ├── -up
//!     ├── -options
//!     │   ├── -group-{n}
//!     │   └── -opt-{n} (-opt-{n}-label, -remove)
//!     ├── -noresults, -nooptions
//!     └── -down
//! ```

use formdom::{Document, Element, Rect};

use super::dropdown::{PanelState, Placement};
use super::filter::MAX_QUERY_LEN;
use super::item::Row;
use super::state::SelectWidget;

/// A part of the replacement container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Container,
    Value,
    Dropdown,
    Search,
    SearchCancel,
    Up,
    Down,
    Options,
    Group(usize),
    Option(usize),
    Remove,
    NoResults,
    NoOptions,
}

/// Element IDs of one replacement container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartIds {
    container: String,
}

impl PartIds {
    pub fn new(source_id: &str) -> Self {
        Self {
            container: format!("{source_id}_replacement"),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn id(&self, part: Part) -> String {
        let c = &self.container;
        match part {
            Part::Container => c.clone(),
            Part::Value => format!("{c}-value"),
            Part::Dropdown => format!("{c}-dropdown"),
            Part::Search => format!("{c}-search"),
            Part::SearchCancel => format!("{c}-search-cancel"),
            Part::Up => format!("{c}-up"),
            Part::Down => format!("{c}-down"),
            Part::Options => format!("{c}-options"),
            Part::Group(n) => format!("{c}-group-{n}"),
            Part::Option(n) => format!("{c}-opt-{n}"),
            Part::Remove => format!("{c}-remove"),
            Part::NoResults => format!("{c}-noresults"),
            Part::NoOptions => format!("{c}-nooptions"),
        }
    }

    /// Which part an element ID belongs to.
    pub fn classify(&self, id: &str) -> Option<Part> {
        if id == self.container {
            return Some(Part::Container);
        }
        let rest = id.strip_prefix(self.container.as_str())?.strip_prefix('-')?;
        let part = match rest {
            "value" => Part::Value,
            "dropdown" => Part::Dropdown,
            "search" => Part::Search,
            "search-cancel" => Part::SearchCancel,
            "up" => Part::Up,
            "down" => Part::Down,
            "options" => Part::Options,
            "remove" => Part::Remove,
            "noresults" => Part::NoResults,
            "nooptions" => Part::NoOptions,
            other => {
                if let Some(n) = other.strip_prefix("group-") {
                    Part::Group(n.parse().ok()?)
                } else {
                    let n = other.strip_prefix("opt-")?;
                    let n = n.strip_suffix("-label").unwrap_or(n);
                    Part::Option(n.parse().ok()?)
                }
            }
        };
        Some(part)
    }
}

/// Build the container for a freshly bound widget.
pub(super) fn build(widget: &SelectWidget, source_classes: &[String]) -> Element {
    let parts = &widget.parts;
    let config = &widget.config;
    let model = &widget.model;

    let mut panel = Vec::new();
    if widget.search_enabled {
        panel.push(
            Element::input()
                .id(parts.id(Part::Search))
                .class("select_search")
                .attr("placeholder", config.placeholder_search.as_str())
                .attr("maxlength", MAX_QUERY_LEN.to_string()),
        );
        panel.push(
            Element::span("×")
                .id(parts.id(Part::SearchCancel))
                .class("select_search_cancel")
                .clickable(true),
        );
    }
    if widget.scroller.has_affordances() {
        panel.push(arrow(parts.id(Part::Up), "select_up"));
    }

    let rows = model
        .rows()
        .iter()
        .filter_map(|row| match *row {
            Row::Group(g) => model.group(g).map(|group| {
                Element::div()
                    .id(parts.id(Part::Group(g)))
                    .class("optgroup")
                    .text(group.label.as_str())
                    .clickable(true)
            }),
            Row::Option(i) => model.option(i).map(|option| {
                let id = parts.id(Part::Option(i));
                Element::div()
                    .id(id.as_str())
                    .class("option")
                    .attr("data-value", option.value.as_str())
                    .child(Element::span(option.label.as_str()).id(format!("{id}-label")))
                    .clickable(true)
            }),
        })
        .collect();
    panel.push(
        Element::div()
            .id(parts.id(Part::Options))
            .class("select_options")
            .children(rows),
    );

    panel.push(
        Element::div()
            .id(parts.id(Part::NoResults))
            .class("select_no_results")
            .text(config.no_search_results.as_str())
            .hidden(true),
    );
    if model.option_count() == 0 {
        panel.push(
            Element::div()
                .id(parts.id(Part::NoOptions))
                .class("select_no_options")
                .text(config.no_options.as_str()),
        );
    }
    if widget.scroller.has_affordances() {
        panel.push(arrow(parts.id(Part::Down), "select_down"));
    }

    let mut container = Element::div()
        .id(parts.container())
        .class("select")
        .z_index(widget.base_z)
        .clickable(true)
        .child(
            Element::span("")
                .id(parts.id(Part::Value))
                .class("select_value")
                .clickable(true),
        )
        .child(
            Element::div()
                .id(parts.id(Part::Dropdown))
                .class("select_dropdown")
                .children(panel)
                .hidden(true)
                .clickable(true),
        );
    for class in source_classes {
        container.add_class(class);
    }
    container
}

fn arrow(id: String, class: &str) -> Element {
    Element::div().id(id).class(class).clickable(true)
}

/// Write the widget's state onto its elements.
pub(super) fn sync(widget: &SelectWidget, doc: &mut Document) {
    let parts = &widget.parts;
    let model = &widget.model;
    let dropdown = &widget.dropdown;
    let scroller = &widget.scroller;
    let selected = model.selected();
    let removable = model.removal_permitted() && selected.is_some();

    if let Some(container) = doc.get_mut(parts.container()) {
        container.toggle_class("select_focus", dropdown.is_open());
        container.toggle_class("select_placeholder", selected.is_none());
        container.toggle_class("select_is_scrollable", scroller.has_affordances());
        container.toggle_class(
            "select_position_bottom",
            dropdown.layout().placement == Placement::Bottom,
        );
        container.z_index = widget.z_index();
    }

    if let Some(value) = doc.get_mut(&parts.id(Part::Value)) {
        let label = selected
            .map(|o| o.label.as_str())
            .or(model.placeholder())
            .unwrap_or("");
        value.set_text(label);
    }

    if let Some(search) = doc.get_mut(&parts.id(Part::Search)) {
        search.value = widget.filter.query().to_string();
    }
    for part in [Part::Up, Part::Down] {
        if let Some(el) = doc.get_mut(&parts.id(part)) {
            el.hidden = !scroller.can_scroll();
        }
    }
    if let Some(el) = doc.get_mut(&parts.id(Part::NoResults)) {
        el.hidden = !widget.no_results;
    }

    for row in model.rows() {
        let visible = model.is_row_visible(*row);
        match *row {
            Row::Group(g) => {
                let open = model.group(g).is_some_and(|group| group.open);
                if let Some(el) = doc.get_mut(&parts.id(Part::Group(g))) {
                    el.hidden = !visible;
                    el.toggle_class("optgroup_open", open);
                }
            }
            Row::Option(i) => {
                let Some(option) = model.option(i) else {
                    continue;
                };
                if let Some(el) = doc.get_mut(&parts.id(Part::Option(i))) {
                    el.hidden = !visible;
                    el.disabled = option.disabled;
                    el.toggle_class("option_selected", option.selected);
                    el.toggle_class("option_preselected", dropdown.preselected() == Some(i));
                    el.toggle_class("has_remove_selected", removable && option.selected);
                }
            }
        }
    }

    // The remove affordance follows the selected row
    let remove_id = parts.id(Part::Remove);
    doc.remove(&remove_id);
    if let (true, Some(index)) = (removable, model.selected_index()) {
        let row_id = parts.id(Part::Option(index));
        if let Some(children) = doc.get_mut(&row_id).and_then(Element::child_elements_mut) {
            children.push(
                Element::span("×")
                    .id(remove_id)
                    .class("select_remove")
                    .clickable(true),
            );
        }
    }

    sync_motion(widget, doc);
}

/// Write the animated values: panel reveal and list offset.
pub(super) fn sync_motion(widget: &SelectWidget, doc: &mut Document) {
    let parts = &widget.parts;
    let dropdown = &widget.dropdown;
    let layout = dropdown.layout();
    let anchor = widget.anchor_rect(doc);
    let closed = dropdown.state() == PanelState::Closed;

    if let Some(panel) = doc.get_mut(&parts.id(Part::Dropdown)) {
        panel.hidden = closed;
        panel.z_index = widget.z_index();
        panel.set_attr(
            "style",
            format!(
                "top: {}px; height: {}px; opacity: {:.2}",
                layout.top,
                dropdown.visible_height(),
                dropdown.opacity()
            ),
        );
    }
    if closed {
        doc.forget_rect(&parts.id(Part::Dropdown));
    } else {
        doc.set_rect(
            &parts.id(Part::Dropdown),
            Rect::new(
                anchor.x,
                anchor.y + layout.top,
                anchor.width,
                dropdown.visible_height(),
            ),
        );
    }

    if let Some(options) = doc.get_mut(&parts.id(Part::Options)) {
        options.set_attr("style", format!("top: -{}px", widget.scroller.top_offset()));
    }
}
