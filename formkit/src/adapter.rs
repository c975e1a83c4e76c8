//! Adapters over bound form elements.
//!
//! Collaborators such as the required-state setter never touch a bound
//! element directly. They go through [`FormControl`], which lets a select
//! widget keep its replacement container in step with the hidden source
//! element.

use formdom::{Document, Element, Tag};

/// The interface collaborators use to read and decorate a form control.
pub trait FormControl {
    /// ID of the underlying element.
    fn id(&self) -> &str;
    fn value(&self) -> String;
    fn has_attr(&self, name: &str) -> bool;
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    /// Make `value` the control's value.
    fn set_selection(&mut self, value: &str);
}

/// A single element in isolation.
pub struct ElementAdapter<'a> {
    element: &'a mut Element,
}

impl<'a> ElementAdapter<'a> {
    pub fn new(element: &'a mut Element) -> Self {
        Self { element }
    }
}

impl FormControl for ElementAdapter<'_> {
    fn id(&self) -> &str {
        &self.element.id
    }

    fn value(&self) -> String {
        self.element.value.clone()
    }

    fn has_attr(&self, name: &str) -> bool {
        self.element.has_attr(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.has_class(class)
    }

    fn add_class(&mut self, class: &str) {
        self.element.add_class(class);
    }

    fn remove_class(&mut self, class: &str) {
        self.element.remove_class(class);
    }

    fn set_selection(&mut self, value: &str) {
        self.element.value = value.to_string();
        if self.element.tag == Tag::Select {
            mark_selected(self.element, value);
        }
    }
}

/// A `<select>` that has been replaced by a widget container.
///
/// Classes are written to both the source element and the container, so
/// styling keyed on the source (e.g. `required`) shows on the replacement.
pub struct SelectAdapter<'a> {
    doc: &'a mut Document,
    source_id: &'a str,
    container_id: &'a str,
}

impl<'a> SelectAdapter<'a> {
    pub fn new(doc: &'a mut Document, source_id: &'a str, container_id: &'a str) -> Self {
        Self {
            doc,
            source_id,
            container_id,
        }
    }

    fn source(&self) -> Option<&Element> {
        self.doc.get(self.source_id)
    }

    fn each_mirror(&mut self, mut f: impl FnMut(&mut Element)) {
        for id in [self.source_id, self.container_id] {
            if let Some(el) = self.doc.get_mut(id) {
                f(el);
            }
        }
    }
}

impl FormControl for SelectAdapter<'_> {
    fn id(&self) -> &str {
        self.source_id
    }

    fn value(&self) -> String {
        self.source().map(|el| el.value.clone()).unwrap_or_default()
    }

    fn has_attr(&self, name: &str) -> bool {
        self.source().is_some_and(|el| el.has_attr(name))
    }

    fn has_class(&self, class: &str) -> bool {
        self.source().is_some_and(|el| el.has_class(class))
    }

    fn add_class(&mut self, class: &str) {
        self.each_mirror(|el| {
            el.add_class(class);
        });
    }

    fn remove_class(&mut self, class: &str) {
        self.each_mirror(|el| {
            el.remove_class(class);
        });
    }

    fn set_selection(&mut self, value: &str) {
        let Some(source) = self.doc.get_mut(self.source_id) else {
            log::debug!("set_selection: source {} is gone", self.source_id);
            return;
        };
        source.value = value.to_string();
        mark_selected(source, value);
    }
}

/// Set the `selected` flag on the first option carrying `value` and clear
/// it everywhere else.
fn mark_selected(select: &mut Element, value: &str) {
    let mut found = false;
    mark_selected_recursive(select, value, &mut found);
}

fn mark_selected_recursive(element: &mut Element, value: &str, found: &mut bool) {
    let Some(children) = element.child_elements_mut() else {
        return;
    };
    for child in children.iter_mut() {
        match child.tag {
            Tag::Option => {
                child.selected = !*found && child.value == value;
                *found |= child.selected;
            }
            Tag::OptGroup => mark_selected_recursive(child, value, found),
            _ => {}
        }
    }
}
