//! The document: element tree plus the host-supplied geometry and focus.

use crate::element::{self, Element};
use crate::focus::{self, FocusState};
use crate::hit;
use crate::layout::{LayoutResult, Rect, Viewport};

/// A single page: one element tree, its geometry, the viewport and focus.
#[derive(Debug, Default)]
pub struct Document {
    root: Element,
    layout: LayoutResult,
    viewport: Viewport,
    focus: FocusState,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            layout: LayoutResult::new(),
            viewport: Viewport::default(),
            focus: FocusState::new(),
        }
    }

    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        element::find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        element::find_element_mut(&mut self.root, id)
    }

    /// Returns true if `id` is `ancestor` or inside it.
    pub fn contains(&self, ancestor: &str, id: &str) -> bool {
        element::contains(&self.root, ancestor, id)
    }

    /// Insert `el` as the next sibling of `sibling`.
    pub fn insert_after(&mut self, sibling: &str, el: Element) -> bool {
        element::insert_after(&mut self.root, sibling, el)
    }

    /// Detach an element and forget its geometry.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let removed = element::remove_element(&mut self.root, id)?;
        for el in element::walk(&removed) {
            self.layout.remove(&el.id);
            if self.focus.focused() == Some(el.id.as_str()) {
                self.focus.blur();
            }
        }
        Some(removed)
    }

    /// All elements in document order.
    pub fn elements(&self) -> Vec<&Element> {
        element::walk(&self.root)
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn set_rect(&mut self, id: &str, rect: Rect) {
        self.layout.insert(id.to_string(), rect);
    }

    pub fn forget_rect(&mut self, id: &str) {
        self.layout.remove(id);
    }

    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.layout.get(id).copied()
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.viewport.scroll_x = x.max(0);
        self.viewport.scroll_y = y.max(0);
    }

    /// Deepest clickable element at page coordinates.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<String> {
        hit::hit_test(&self.layout, &self.root, x, y)
    }

    /// Deepest element of any kind at page coordinates.
    pub fn hit_test_any(&self, x: i32, y: i32) -> Option<String> {
        hit::hit_test_any(&self.layout, &self.root, x, y)
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    /// Focus an element. Unknown IDs are ignored.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            log::debug!("focus: no element {}", id);
            return false;
        }
        self.focus.focus(id)
    }

    pub fn blur(&mut self) -> bool {
        self.focus.blur()
    }

    /// The control following `id` in tab order, ignoring `skip_subtree`.
    pub fn next_focusable_after(&self, id: &str, skip_subtree: Option<&str>) -> Option<String> {
        focus::next_focusable_after(&self.root, id, skip_subtree)
    }
}
