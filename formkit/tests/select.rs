//! Tests for the select widget through the registry.

use std::time::{Duration, Instant};

use formdom::{Document, Element, Event, MouseButton, Rect};
use formkit::config::{FormConfig, SearchThreshold, SelectConfig};
use formkit::context::WidgetContext;
use formkit::events::{EventQueue, WidgetEventKind};
use formkit::required::RequiredClasses;
use formkit::widgets::select::{Part, PanelState, Placement, RenderMode, Row};
use formkit::{Registry, SelectWidget};

fn options(count: usize) -> Vec<Element> {
    (1..=count)
        .map(|i| Element::option(format!("v{i}"), format!("Option {i}")))
        .collect()
}

fn document(select: Element) -> Document {
    let mut doc = Document::new(Element::form().id("form").children(vec![
        Element::input().id("before"),
        select,
        Element::button("Send").id("send"),
    ]))
    .with_viewport(1024, 768);
    doc.set_rect("choice", Rect::new(10, 100, 200, 30));
    doc
}

fn bind(select: Element, config: SelectConfig) -> (Registry, Document, Instant) {
    let mut doc = document(select);
    let mut registry = Registry::new();
    let now = Instant::now();
    registry.bind(&mut doc, "choice", config, now).unwrap();
    (registry, doc, now)
}

fn part_id(registry: &Registry, part: Part) -> String {
    registry.widget_for("choice").unwrap().parts().id(part)
}

fn option_id(registry: &Registry, value: &str) -> String {
    let widget = registry.widget_for("choice").unwrap();
    let index = widget.model().find(value).unwrap();
    widget.parts().id(Part::Option(index))
}

fn selected_count(registry: &Registry) -> usize {
    registry
        .widget_for("choice")
        .unwrap()
        .model()
        .options()
        .iter()
        .filter(|o| o.selected)
        .count()
}

// ============================================================================
// Binding and selection
// ============================================================================

#[test]
fn test_five_options_without_search_select_value() {
    let select = Element::select().id("choice").children(options(5));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());

    let widget = registry.widget_for("choice").unwrap();
    assert!(!widget.has_search());
    assert!(doc.get(&part_id(&registry, Part::Search)).is_none());
    // Without a placeholder the first option is selected
    assert_eq!(widget.value(), "v1");

    assert!(registry.select(&mut doc, "choice", "v3", now));

    let widget = registry.widget_for("choice").unwrap();
    assert_eq!(widget.label(), "Option 3");
    assert_eq!(doc.get("choice").map(|el| el.value.as_str()), Some("v3"));
    assert_eq!(
        doc.get(&part_id(&registry, Part::Value))
            .map(|el| el.text_content()),
        Some("Option 3")
    );
    let events = registry.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, WidgetEventKind::Change);
    assert_eq!(events[0].value, "v3");
}

#[test]
fn test_source_is_hidden_and_replacement_follows_it() {
    let select = Element::select()
        .id("choice")
        .class("wide")
        .children(options(3));
    let (registry, doc, _) = bind(select, SelectConfig::default());

    assert!(doc.get("choice").is_some_and(|el| el.hidden));
    let container = doc.get("choice_replacement").unwrap();
    assert!(container.has_class("select"));
    assert!(container.has_class("wide"));
    let form = doc.get("form").unwrap();
    let order: Vec<&str> = form.child_elements().iter().map(|el| el.id.as_str()).collect();
    assert_eq!(order, vec!["before", "choice", "choice_replacement", "send"]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_unknown_value_without_removal_keeps_selection() {
    let select = Element::select().id("choice").children(options(3));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());

    assert!(!registry.select(&mut doc, "choice", "nope", now));
    assert!(!registry.select(&mut doc, "choice", "", now));
    assert_eq!(registry.widget_for("choice").unwrap().value(), "v1");
    assert!(registry.drain_events().is_empty());
}

#[test]
fn test_placeholder_and_remove_selection() {
    let select = Element::select().id("choice").children(options(3));
    let config = SelectConfig::default().placeholder("Pick one");
    let (mut registry, mut doc, now) = bind(select, config);

    let widget = registry.widget_for("choice").unwrap();
    assert_eq!(widget.value(), "");
    assert_eq!(widget.label(), "Pick one");
    assert!(
        doc.get("choice_replacement")
            .is_some_and(|el| el.has_class("select_placeholder"))
    );
    // An empty option was added to the source
    assert_eq!(
        doc.get("choice")
            .and_then(|el| el.child_elements().first())
            .map(|el| el.value.as_str()),
        Some("")
    );

    registry.select(&mut doc, "choice", "v2", now);
    let remove = part_id(&registry, Part::Remove);
    let row = option_id(&registry, "v2");
    assert!(doc.contains(&row, &remove));

    registry.open(&mut doc, "choice", now);
    registry.dispatch(&mut doc, &Event::click(remove.as_str()), now);

    let widget = registry.widget_for("choice").unwrap();
    assert_eq!(widget.value(), "");
    assert_eq!(widget.label(), "Pick one");
    assert!(!widget.is_open());
    assert_eq!(doc.get("choice").map(|el| el.value.as_str()), Some(""));
    assert!(doc.get(&remove).is_none());
}

#[test]
fn test_at_most_one_selected() {
    let select = Element::select()
        .id("choice")
        .children(options(6))
        .attr("placeholder", "None");
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());

    for value in ["v2", "v5", "missing", "v1", "", "v6"] {
        registry.select(&mut doc, "choice", value, now);
        assert!(selected_count(&registry) <= 1);
    }
    registry.reset(&mut doc, "choice", now);
    assert_eq!(selected_count(&registry), 0);

    let source = doc.get("choice").unwrap();
    let marked = source.child_elements().iter().filter(|el| el.selected).count();
    assert_eq!(marked, 1);
    assert_eq!(source.value, "");
}

#[test]
fn test_disabled_option_click_is_ignored() {
    let select = Element::select().id("choice").children(vec![
        Element::option("a", "A"),
        Element::option("b", "B").disabled(true),
    ]);
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());
    registry.open(&mut doc, "choice", now);

    let b = option_id(&registry, "b");
    registry.dispatch(&mut doc, &Event::click(b.as_str()), now);

    let widget = registry.widget_for("choice").unwrap();
    assert_eq!(widget.value(), "a");
    assert!(widget.is_open());
}

#[test]
fn test_required_class_tracks_value() {
    let select = Element::select()
        .id("choice")
        .attr("data-required", "")
        .children(options(3));
    let config = SelectConfig::default().placeholder("Pick");
    let (mut registry, mut doc, now) = bind(select, config);

    let has_required =
        |doc: &Document, id: &str| doc.get(id).is_some_and(|el| el.has_class("required"));
    assert!(has_required(&doc, "choice"));
    assert!(has_required(&doc, "choice_replacement"));

    registry.select(&mut doc, "choice", "v1", now);
    assert!(!has_required(&doc, "choice"));
    assert!(!has_required(&doc, "choice_replacement"));
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_scroll_affordances_follow_buffer_rule() {
    let select = Element::select().id("choice").children(options(20));
    let (registry, doc, _) = bind(select, SelectConfig::default().max(13).max_buffer(3));
    assert!(registry.widget_for("choice").unwrap().has_scroll_affordances());
    assert!(doc.get(&part_id(&registry, Part::Up)).is_some());
    assert!(doc.get(&part_id(&registry, Part::Down)).is_some());

    let select = Element::select().id("choice").children(options(20));
    let (registry, doc, _) = bind(select, SelectConfig::default().max(18).max_buffer(3));
    let widget = registry.widget_for("choice").unwrap();
    assert!(!widget.has_scroll_affordances());
    assert_eq!(widget.scroller().window(), 20);
    assert!(doc.get(&part_id(&registry, Part::Up)).is_none());
}

#[test]
fn test_wheel_offsets_stay_in_range() {
    let select = Element::select().id("choice").children(options(20));
    let (mut registry, mut doc, start) = bind(select, SelectConfig::default());
    registry.open(&mut doc, "choice", start);
    let list = part_id(&registry, Part::Options);
    let max_offset = registry.widget_for("choice").unwrap().scroller().max_offset();
    assert_eq!(max_offset, 7 * 24);

    let mut now = start;
    for delta in [1, 1, 1, 1, -1, -1, -1, -1, -1] {
        now += Duration::from_millis(100);
        registry.dispatch(
            &mut doc,
            &Event::Wheel {
                target: Some(list.clone()),
                delta_y: delta,
            },
            now,
        );
        registry.tick(&mut doc, now + Duration::from_millis(95));
        let offset = registry.widget_for("choice").unwrap().top_offset();
        assert!((0..=max_offset).contains(&offset), "offset {} out of range", offset);
    }
    assert_eq!(registry.widget_for("choice").unwrap().top_offset(), 0);
}

#[test]
fn test_arrow_hover_scrolls_and_leave_settles() {
    let select = Element::select().id("choice").children(options(20));
    let (mut registry, mut doc, start) = bind(select, SelectConfig::default());
    registry.open(&mut doc, "choice", start);
    let down = part_id(&registry, Part::Down);

    registry.dispatch(&mut doc, &Event::Enter { target: down.clone() }, start);
    let mid = start + Duration::from_millis(150);
    registry.tick(&mut doc, mid);
    registry.dispatch(&mut doc, &Event::Leave { target: down }, mid);
    registry.tick(&mut doc, mid + Duration::from_millis(500));

    let offset = registry.widget_for("choice").unwrap().top_offset();
    assert_eq!(offset % 24, 0);
    assert!(offset > 0);
}

#[test]
fn test_press_scrolls_fast_and_release_resumes_normal_speed() {
    let select = Element::select().id("choice").children(options(20));
    let (mut registry, mut doc, start) = bind(select, SelectConfig::default());
    registry.open(&mut doc, "choice", start);
    let down = Some(part_id(&registry, Part::Down));
    let offset = |registry: &Registry| registry.widget_for("choice").unwrap().scroller().offset();

    // 7 rows to the edge at 30ms per row
    registry.dispatch(
        &mut doc,
        &Event::Press {
            target: down.clone(),
            button: MouseButton::Left,
        },
        start,
    );
    let pressed = start + Duration::from_millis(60);
    registry.tick(&mut doc, pressed);
    assert!((offset(&registry) - 48.0).abs() < 0.5, "offset {}", offset(&registry));

    // The remaining 5 rows at 100ms per row
    registry.dispatch(
        &mut doc,
        &Event::Release {
            target: down,
            button: MouseButton::Left,
        },
        pressed,
    );
    registry.tick(&mut doc, pressed + Duration::from_millis(100));
    assert!((offset(&registry) - 72.0).abs() < 0.5, "offset {}", offset(&registry));

    registry.tick(&mut doc, pressed + Duration::from_millis(500));
    assert_eq!(registry.widget_for("choice").unwrap().top_offset(), 7 * 24);
}

#[test]
fn test_extreme_wheel_speed_from_markup() {
    let select = Element::select()
        .id("choice")
        .attr("data-select", r#"{"scrollWheelSpeed": 18446744073709551615}"#)
        .children(options(20));
    let mut doc = document(select);
    let mut registry = Registry::new();
    let now = Instant::now();
    assert_eq!(registry.scan(&mut doc, now).len(), 1);
    registry.open(&mut doc, "choice", now);

    let list = part_id(&registry, Part::Options);
    let wheel = Event::Wheel {
        target: Some(list),
        delta_y: 1,
    };
    registry.dispatch(&mut doc, &wheel, now);
    registry.dispatch(&mut doc, &wheel, now + Duration::from_secs(1));
    registry.tick(&mut doc, now + Duration::from_secs(2));

    let widget = registry.widget_for("choice").unwrap();
    assert!(widget.config().scroll_wheel_speed < u64::MAX);
    let offset = widget.top_offset();
    assert!((0..=widget.scroller().max_offset()).contains(&offset));
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_no_results_indicator_round_trip() {
    let select = Element::select().id("choice").children(options(25));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());
    assert!(registry.widget_for("choice").unwrap().has_search());
    registry.open(&mut doc, "choice", now);

    let search = part_id(&registry, Part::Search);
    let no_results = part_id(&registry, Part::NoResults);
    let typed = |value: &str| Event::Input {
        target: search.clone(),
        value: value.to_string(),
    };

    registry.dispatch(&mut doc, &typed("zzz"), now);
    let widget = registry.widget_for("choice").unwrap();
    assert!(widget.no_results());
    assert_eq!(widget.visible_count(), 0);
    assert!(doc.get(&no_results).is_some_and(|el| !el.hidden));

    registry.dispatch(&mut doc, &typed(""), now);
    let widget = registry.widget_for("choice").unwrap();
    assert!(!widget.no_results());
    assert_eq!(widget.visible_count(), 25);
    assert!(doc.get(&no_results).is_some_and(|el| el.hidden));
}

#[test]
fn test_search_preselects_first_match() {
    let select = Element::select().id("choice").children(options(25));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());
    registry.open(&mut doc, "choice", now);

    assert_eq!(registry.set_query(&mut doc, "choice", "option 2", now), Some(7));
    let widget = registry.widget_for("choice").unwrap();
    assert_eq!(widget.preselected_value(), Some("v2"));
    assert_eq!(widget.top_offset(), 0);
}

#[test]
fn test_empty_query_restores_group_baseline() {
    let select = Element::select().id("choice").children(vec![
        Element::option("plain", "Plain"),
        Element::optgroup("Open").children(vec![
            Element::option("a1", "Alpha"),
            Element::option("a2", "Beta"),
        ]),
        Element::optgroup("Closed")
            .attr("data-optgroup-closed", "")
            .children(vec![
                Element::option("c1", "Gamma"),
                Element::option("c2", "Alpha two"),
            ]),
    ]);
    let config = SelectConfig::default().search(SearchThreshold::Toggle(true));
    let (mut registry, mut doc, now) = bind(select, config);

    let visibility = |registry: &Registry| -> Vec<bool> {
        let model = registry.widget_for("choice").unwrap().model();
        model.rows().iter().map(|row| model.is_row_visible(*row)).collect()
    };
    let baseline = visibility(&registry);
    assert_eq!(baseline, vec![true, true, true, true, true, false, false]);

    for query in ["alpha", "zz", "be", ""] {
        registry.set_query(&mut doc, "choice", query, now);
    }
    assert_eq!(visibility(&registry), baseline);
}

#[test]
fn test_group_header_click_toggles_members() {
    let select = Element::select().id("choice").children(vec![
        Element::optgroup("Fruit")
            .attr("data-optgroup-closed", "")
            .children(vec![Element::option("apple", "Apple")]),
    ]);
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());
    registry.open(&mut doc, "choice", now);

    let header = part_id(&registry, Part::Group(0));
    let apple = option_id(&registry, "apple");
    assert!(doc.get(&apple).is_some_and(|el| el.hidden));

    registry.dispatch(&mut doc, &Event::click(header.as_str()), now);
    assert!(doc.get(&apple).is_some_and(|el| !el.hidden));
    assert!(doc.get(&header).is_some_and(|el| el.has_class("optgroup_open")));
    let model = registry.widget_for("choice").unwrap().model();
    assert!(model.is_row_visible(Row::Option(0)));
}

// ============================================================================
// Panel
// ============================================================================

#[test]
fn test_open_then_close_leaves_no_listeners() {
    let select = Element::select().id("choice").children(options(5));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());

    assert!(registry.open(&mut doc, "choice", now));
    assert!(registry.has_document_listeners());
    assert!(!registry.open(&mut doc, "choice", now));
    assert!(registry.close(&mut doc, "choice", now));
    assert!(!registry.close(&mut doc, "choice", now));

    assert!(!registry.has_document_listeners());
    assert_eq!(registry.widget_for("choice").unwrap().value(), "v1");
    let kinds: Vec<_> = registry.drain_events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![WidgetEventKind::Open, WidgetEventKind::Close]);

    registry.tick(&mut doc, now + Duration::from_secs(1));
    let widget = registry.widget_for("choice").unwrap();
    assert_eq!(widget.panel_state(), PanelState::Closed);
    assert!(doc.get(&part_id(&registry, Part::Dropdown)).is_some_and(|el| el.hidden));
}

#[test]
fn test_outside_click_closes_without_change() {
    let select = Element::select().id("choice").children(options(5));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());

    let value = part_id(&registry, Part::Value);
    registry.dispatch(&mut doc, &Event::click(value.as_str()), now);
    assert!(registry.widget_for("choice").unwrap().is_open());

    // Clicks inside the panel keep it open
    let list = part_id(&registry, Part::Options);
    registry.dispatch(&mut doc, &Event::click(list.as_str()), now);
    assert!(registry.widget_for("choice").unwrap().is_open());

    registry.dispatch(&mut doc, &Event::click("send"), now);
    let widget = registry.widget_for("choice").unwrap();
    assert!(!widget.is_open());
    assert_eq!(widget.value(), "v1");
    assert!(!registry.has_document_listeners());
}

#[test]
fn test_resize_closes_active_panel() {
    let select = Element::select().id("choice").children(options(5));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());
    registry.open(&mut doc, "choice", now);

    registry.dispatch(
        &mut doc,
        &Event::Resize {
            width: 640,
            height: 480,
        },
        now,
    );
    assert!(!registry.widget_for("choice").unwrap().is_open());
    assert_eq!(doc.viewport().width, 640);
}

#[test]
fn test_stacking_order_while_open_and_closing() {
    let select = Element::select().id("choice").children(options(5));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());
    let z = |doc: &Document| doc.get("choice_replacement").map(|el| el.z_index);

    assert_eq!(z(&doc), Some(2000));
    registry.open(&mut doc, "choice", now);
    assert_eq!(z(&doc), Some(2010));
    registry.close(&mut doc, "choice", now);
    assert_eq!(z(&doc), Some(2005));
    registry.tick(&mut doc, now + Duration::from_secs(1));
    assert_eq!(z(&doc), Some(2000));
}

#[test]
fn test_source_z_index_overrides_config() {
    let select = Element::select().id("choice").z_index(50).children(options(2));
    let (_, doc, _) = bind(select, SelectConfig::default());
    assert_eq!(doc.get("choice_replacement").map(|el| el.z_index), Some(50));
}

#[test]
fn test_flips_to_top_near_viewport_bottom() {
    let select = Element::select().id("choice").children(options(5));
    let mut doc = document(select);
    doc.set_rect("choice", Rect::new(10, 700, 200, 30));
    let mut registry = Registry::new();
    let now = Instant::now();
    registry.bind(&mut doc, "choice", SelectConfig::default(), now).unwrap();

    registry.open(&mut doc, "choice", now);
    let widget = registry.widget_for("choice").unwrap();
    assert_eq!(widget.placement(), Placement::Top);
    assert_eq!(widget.render_mode(), RenderMode::Fade);
    assert!(widget.panel_layout().top < 0);
    assert!(
        doc.get("choice_replacement")
            .is_some_and(|el| !el.has_class("select_position_bottom"))
    );
}

#[test]
fn test_bottom_slide_sets_panel_geometry() {
    let select = Element::select().id("choice").children(options(5));
    let (mut registry, mut doc, now) = bind(select, SelectConfig::default());
    registry.open(&mut doc, "choice", now);
    registry.tick(&mut doc, now + Duration::from_secs(1));

    let widget = registry.widget_for("choice").unwrap();
    assert_eq!(widget.placement(), Placement::Bottom);
    assert_eq!(widget.render_mode(), RenderMode::Slide);
    assert_eq!(widget.panel_state(), PanelState::Open);
    assert_eq!(
        doc.rect(&part_id(&registry, Part::Dropdown)),
        Some(Rect::new(10, 130, 200, 5 * 24))
    );
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_calls_after_destroy_are_ignored() {
    let select = Element::select()
        .id("choice")
        .children(vec![Element::optgroup("Group").children(options(3))]);
    let mut doc = document(select);
    let mut events = EventQueue::new();
    let form = FormConfig::default();
    let required = RequiredClasses::new(form.clone());
    let now = Instant::now();

    let mut cx = WidgetContext::new(&mut doc, &mut events, &required, now);
    let mut widget = SelectWidget::bind(&mut cx, "choice", SelectConfig::default(), &form).unwrap();
    assert!(widget.open(&mut cx));
    let lifecycle = widget.lifecycle().clone();
    widget.destroy(cx.doc);

    assert!(lifecycle.is_cancelled());
    assert!(!widget.close(&mut cx));
    assert!(!widget.toggle(&mut cx));
    assert!(!widget.toggle_group(&mut cx, 0));
    assert!(!widget.select(&mut cx, "v2"));
    assert!(!widget.remove_selection(&mut cx));
    assert!(!widget.tick(cx.doc, now + Duration::from_secs(1)));

    let kinds: Vec<_> = events.drain().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![WidgetEventKind::Open]);
    assert!(doc.get("choice_replacement").is_none());
    assert!(doc.get("choice").is_some_and(|el| !el.hidden));
}
