use crate::element::Element;
use crate::layout::LayoutResult;

/// Find the deepest clickable element at the given page coordinates.
/// Returns None if no clickable element contains the point.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: i32, y: i32) -> Option<String> {
    hit_test_element(layout, root, x, y, &|el| el.clickable)
}

/// Find any element (clickable or not) at the given coordinates.
/// Returns the deepest element containing the point.
pub fn hit_test_any(layout: &LayoutResult, root: &Element, x: i32, y: i32) -> Option<String> {
    hit_test_element(layout, root, x, y, &|_| true)
}

fn hit_test_element(
    layout: &LayoutResult,
    element: &Element,
    x: i32,
    y: i32,
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    if element.hidden {
        return None;
    }

    // Children without geometry are still searched: they may be positioned
    // outside their parent (dropdown panels).
    for child in element.child_elements().iter().rev() {
        if let Some(id) = hit_test_element(layout, child, x, y, accept) {
            return Some(id);
        }
    }

    let rect = layout.get(&element.id)?;
    if rect.contains(x, y) && accept(element) {
        Some(element.id.clone())
    } else {
        None
    }
}
