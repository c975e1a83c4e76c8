mod rect;

use std::collections::HashMap;

pub use rect::Rect;

/// Element geometry supplied by the host, keyed by element ID.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    rects: HashMap<String, Rect>,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: String, rect: Rect) {
        self.rects.insert(id, rect);
    }

    pub fn get(&self, id: &str) -> Option<&Rect> {
        self.rects.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Rect> {
        self.rects.remove(id)
    }
}

/// The visible part of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub scroll_x: i32,
    pub scroll_y: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            scroll_x: 0,
            scroll_y: 0,
        }
    }

    /// Convert a page-space rectangle to viewport space.
    pub const fn to_viewport(&self, rect: Rect) -> Rect {
        rect.translate(-self.scroll_x, -self.scroll_y)
    }
}
