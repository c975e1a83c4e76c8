//! Select Example
//!
//! Replaces the `<select>` elements of a small form and drives them with a
//! scripted sequence of input:
//! - Open by clicking the value
//! - Search and pick with the keyboard
//! - Remove the selection again
//! - Group headers collapse and expand
//!
//! Logs go to `select_demo.log`.

use std::fs::File;
use std::time::Instant;

use formkit::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn form() -> Document {
    let countries = [
        ("be", "Belgium"),
        ("dk", "Denmark"),
        ("fi", "Finland"),
        ("fr", "France"),
        ("de", "Germany"),
        ("it", "Italy"),
        ("nl", "Netherlands"),
        ("no", "Norway"),
        ("es", "Spain"),
        ("se", "Sweden"),
        ("ch", "Switzerland"),
        ("uk", "United Kingdom"),
        ("us", "United States"),
        ("ca", "Canada"),
        ("mx", "Mexico"),
        ("br", "Brazil"),
        ("ar", "Argentina"),
        ("jp", "Japan"),
        ("kr", "South Korea"),
        ("au", "Australia"),
        ("nz", "New Zealand"),
    ];
    let country = Element::select()
        .id("country")
        .attr("data-select", r#"{"placeholder": "Pick a country", "focusSearch": true}"#)
        .attr("data-required", "")
        .children(
            countries
                .iter()
                .map(|(value, label)| Element::option(*value, *label))
                .collect(),
        );

    let priority = Element::select()
        .id("priority")
        .attr("data-select", "")
        .children(vec![
            Element::optgroup("Normal").children(vec![
                Element::option("low", "Low"),
                Element::option("medium", "Medium"),
            ]),
            Element::optgroup("Urgent")
                .attr("data-optgroup-closed", "")
                .children(vec![
                    Element::option("high", "High"),
                    Element::option("critical", "Critical"),
                ]),
        ]);

    let mut doc = Document::new(Element::form().id("order").children(vec![
        Element::input().id("name"),
        country,
        priority,
        Element::button("Send").id("send"),
    ]))
    .with_viewport(800, 600);
    doc.set_rect("name", Rect::new(20, 20, 240, 30));
    doc.set_rect("country", Rect::new(20, 70, 240, 30));
    doc.set_rect("priority", Rect::new(20, 500, 240, 30));
    doc.set_rect("send", Rect::new(20, 550, 80, 30));
    doc
}

fn report(registry: &mut Registry, doc: &Document) {
    for event in registry.drain_events() {
        println!(
            "  {:?} #{} -> '{}'",
            event.kind, event.source_id, event.value
        );
    }
    for source in ["country", "priority"] {
        if let Some(widget) = registry.widget_for(source) {
            let required = doc
                .get(source)
                .is_some_and(|el| el.has_class("required"));
            println!(
                "  #{}: '{}' ({}){}",
                source,
                widget.label(),
                widget.value(),
                if required { " [required]" } else { "" }
            );
        }
    }
}

async fn step(registry: &mut Registry, doc: &mut Document, title: &str, events: &[Event]) {
    println!("{}", title);
    for event in events {
        registry.dispatch(doc, event, Instant::now());
    }
    run_until_idle(registry, doc).await;
    report(registry, doc);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("select_demo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let mut doc = form();
    let mut registry = Registry::new();
    let bound = registry.scan(&mut doc, Instant::now());
    println!("bound {} selects", bound.len());
    report(&mut registry, &doc);

    step(
        &mut registry,
        &mut doc,
        "open country",
        &[Event::click("country_replacement-value")],
    )
    .await;
    step(
        &mut registry,
        &mut doc,
        "search 'land' and take the second match",
        &[
            Event::Input {
                target: "country_replacement-search".to_string(),
                value: "land".to_string(),
            },
            Event::key(Key::Down),
            Event::key(Key::Enter),
        ],
    )
    .await;
    step(
        &mut registry,
        &mut doc,
        "remove the selection",
        &[
            Event::click("country_replacement-value"),
            Event::click("country_replacement-remove"),
        ],
    )
    .await;
    step(
        &mut registry,
        &mut doc,
        "expand urgent priorities and pick critical",
        &[
            Event::click("priority_replacement-value"),
            Event::click("priority_replacement-group-1"),
            Event::key(Key::Down),
            Event::key(Key::Down),
            Event::key(Key::Down),
            Event::key(Key::Enter),
        ],
    )
    .await;
    step(
        &mut registry,
        &mut doc,
        "open priority and click outside",
        &[
            Event::click("priority_replacement-value"),
            Event::click("send"),
        ],
    )
    .await;

    registry.destroy_all(&mut doc);
    println!("restored {} selects", bound.len());
}
