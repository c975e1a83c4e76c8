//! Event handling for the Select widget.

use formdom::{Event, Key, Modifiers};

use super::dropdown::{KeyAction, key_action};
use super::item::Row;
use super::render::{self, Part};
use super::scroller::ScrollDirection;
use super::state::SelectWidget;
use crate::context::WidgetContext;
use crate::events::EventResult;

impl SelectWidget {
    /// Handle an event aimed at this widget's container or source.
    pub fn handle_event(&mut self, cx: &mut WidgetContext<'_>, event: &Event) -> EventResult {
        if self.is_destroyed() {
            return EventResult::Ignored;
        }

        if let Event::Key { key, modifiers, .. } = event {
            return self.on_key(cx, *key, *modifiers);
        }
        if let Event::Focus { target } = event {
            if *target == self.source_id {
                self.open(cx);
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }

        let Some(part) = event.target().and_then(|t| self.parts.classify(t)) else {
            return EventResult::Ignored;
        };

        match event {
            Event::Click { .. } => self.on_click(cx, part),
            Event::Press { .. } => self.on_arrow(cx, part, |w, dir, now| {
                w.scroller.scroll_toward(dir, true, now)
            }),
            Event::Release { .. } | Event::Enter { .. } => {
                self.on_arrow(cx, part, |w, dir, now| w.scroller.scroll_toward(dir, false, now))
            }
            Event::Leave { .. } => self.on_arrow(cx, part, |w, _, now| w.scroller.settle(now)),
            Event::Wheel { delta_y, .. } => {
                if !self.is_open() {
                    return EventResult::Ignored;
                }
                if self.scroller.wheel(*delta_y, cx.now) {
                    render::sync_motion(self, cx.doc);
                }
                EventResult::Consumed
            }
            Event::Input { value, .. } if part == Part::Search => {
                self.set_query(cx, value);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_click(&mut self, cx: &mut WidgetContext<'_>, part: Part) -> EventResult {
        match part {
            Part::Container | Part::Value => {
                self.toggle(cx);
            }
            Part::Option(index) => {
                let Some(option) = self.model.option(index) else {
                    return EventResult::Ignored;
                };
                if option.disabled {
                    return EventResult::Consumed;
                }
                let value = option.value.clone();
                self.select(cx, &value);
            }
            Part::Group(group) => {
                self.toggle_group(cx, group);
            }
            Part::Remove => {
                self.remove_selection(cx);
            }
            Part::SearchCancel => {
                self.set_query(cx, "");
                cx.doc.focus(&self.parts.id(Part::Search));
            }
            // Clicks elsewhere inside the panel keep it open
            Part::Dropdown
            | Part::Search
            | Part::Up
            | Part::Down
            | Part::Options
            | Part::NoResults
            | Part::NoOptions => {}
        }
        EventResult::Consumed
    }

    fn on_arrow<F>(&mut self, cx: &mut WidgetContext<'_>, part: Part, action: F) -> EventResult
    where
        F: FnOnce(&mut Self, ScrollDirection, std::time::Instant),
    {
        let direction = match part {
            Part::Up => ScrollDirection::Up,
            Part::Down => ScrollDirection::Down,
            _ => return EventResult::Ignored,
        };
        if !self.is_open() || !self.scroller.can_scroll() {
            return EventResult::Consumed;
        }
        action(self, direction, cx.now);
        render::sync_motion(self, cx.doc);
        EventResult::Consumed
    }

    /// Keyboard handling while the panel is open.
    pub fn on_key(
        &mut self,
        cx: &mut WidgetContext<'_>,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult {
        if !self.is_open() {
            return EventResult::Ignored;
        }
        let Some(action) = key_action(key, modifiers) else {
            return EventResult::Ignored;
        };

        match action {
            KeyAction::Previous => self.move_preselection(cx, false),
            KeyAction::Next => self.move_preselection(cx, true),
            KeyAction::Commit => match self.preselected_value().map(str::to_string) {
                Some(value) => {
                    self.select(cx, &value);
                }
                None => {
                    self.close(cx);
                }
            },
            KeyAction::Dismiss => {
                self.close(cx);
            }
            KeyAction::TabOut => {
                self.close(cx);
                let next = cx
                    .doc
                    .next_focusable_after(&self.source_id, Some(self.parts.container()));
                if let Some(next) = next {
                    cx.doc.focus(&next);
                }
            }
        }
        EventResult::Consumed
    }

    /// Move the preselection to the next or previous navigable option,
    /// holding at either end, and centre it in the window.
    fn move_preselection(&mut self, cx: &mut WidgetContext<'_>, forward: bool) {
        let current = self.dropdown.preselected();
        let next = match current {
            None => self.model.first_navigable(),
            Some(index) if forward => self.model.next_navigable(index).or(current),
            Some(index) => self.model.prev_navigable(index).or(current),
        };
        self.dropdown.preselect(next);

        if let Some(position) = next.and_then(|i| self.model.row_position(Row::Option(i))) {
            self.scroller.center_on(position, cx.now);
        }
        render::sync(self, cx.doc);
    }
}
