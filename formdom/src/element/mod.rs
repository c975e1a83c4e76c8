mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children.iter_mut() {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Returns true if `id` is `ancestor` itself or one of its descendants.
pub fn contains(root: &Element, ancestor: &str, id: &str) -> bool {
    find_element(root, ancestor).is_some_and(|el| find_element(el, id).is_some())
}

/// Find the parent element of `id`.
pub fn find_parent<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    for child in root.child_elements() {
        if child.id == id {
            return Some(root);
        }
        if let Some(found) = find_parent(child, id) {
            return Some(found);
        }
    }
    None
}

/// Insert `element` as the next sibling of `sibling`.
/// Returns false if `sibling` is not in the tree or is the root.
pub fn insert_after(root: &mut Element, sibling: &str, element: Element) -> bool {
    let Some(parent_id) = find_parent(root, sibling).map(|p| p.id.clone()) else {
        return false;
    };
    let Some(children) = find_element_mut(root, &parent_id).and_then(Element::child_elements_mut)
    else {
        return false;
    };
    let Some(index) = children.iter().position(|c| c.id == sibling) else {
        return false;
    };
    children.insert(index + 1, element);
    true
}

/// Detach an element (and its subtree) from the tree.
pub fn remove_element(root: &mut Element, id: &str) -> Option<Element> {
    let parent_id = find_parent(root, id)?.id.clone();
    let children = find_element_mut(root, &parent_id)?.child_elements_mut()?;
    let index = children.iter().position(|c| c.id == id)?;
    Some(children.remove(index))
}

/// Collect all elements of the tree in document (pre-)order.
pub fn walk(root: &Element) -> Vec<&Element> {
    let mut out = Vec::new();
    walk_recursive(root, &mut out);
    out
}

fn walk_recursive<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    out.push(element);
    for child in element.child_elements() {
        walk_recursive(child, out);
    }
}
