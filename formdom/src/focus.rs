use crate::element::Element;

/// Tracks which element is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }
}

/// Collect focusable element IDs in document order.
/// Hidden and disabled subtrees are skipped.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, None, None, &mut result);
    result
}

/// `anchor` is collected even when it is hidden or not focusable, so that a
/// replaced control still has a place in the tab order.
fn collect_focusable_recursive(
    element: &Element,
    skip: Option<&str>,
    anchor: Option<&str>,
    result: &mut Vec<String>,
) {
    let id = element.id.as_str();
    if skip == Some(id) {
        return;
    }
    if element.hidden {
        if anchor == Some(id) {
            result.push(element.id.clone());
        }
        return;
    }
    if (element.focusable && !element.disabled) || anchor == Some(id) {
        result.push(element.id.clone());
    }
    for child in element.child_elements() {
        collect_focusable_recursive(child, skip, anchor, result);
    }
}

/// The focusable element following `id` in document order.
///
/// `id` itself may be hidden (a `<select>` replaced by a widget). Elements
/// inside `skip_subtree` are ignored. When `id` is the last control,
/// the first control of the document is returned. Returns None when there is
/// no other control to move to.
pub fn next_focusable_after(
    root: &Element,
    id: &str,
    skip_subtree: Option<&str>,
) -> Option<String> {
    let mut order = Vec::new();
    collect_focusable_recursive(root, skip_subtree, Some(id), &mut order);

    let index = order.iter().position(|candidate| candidate == id)?;
    let next = &order[(index + 1) % order.len()];
    if next == id {
        None
    } else {
        Some(next.clone())
    }
}
