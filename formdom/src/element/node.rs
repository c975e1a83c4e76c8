use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::Tag;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,

    // Content
    pub content: Content,

    // Markup
    pub attributes: HashMap<String, String>,
    pub classes: Vec<String>,

    // Form state
    /// Current value. For `select` elements this mirrors the selected option.
    pub value: String,
    /// Option selection marker (`<option selected>`).
    pub selected: bool,
    pub disabled: bool,

    // Presentation
    /// `display: none` equivalent. Hidden elements are skipped by hit tests and focus order.
    pub hidden: bool,
    pub z_index: i32,

    // Interaction
    pub focusable: bool,
    pub clickable: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: Tag::Div,
            content: Content::None,
            attributes: HashMap::new(),
            classes: Vec::new(),
            value: String::new(),
            selected: false,
            disabled: false,
            hidden: false,
            z_index: 0,
            focusable: false,
            clickable: false,
        }
    }
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        let focusable = tag.is_form_control();
        Self {
            id: generate_id(tag.name()),
            tag,
            focusable,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn span(text: impl Into<String>) -> Self {
        Self::new(Tag::Span).text(text)
    }

    pub fn form() -> Self {
        Self::new(Tag::Form)
    }

    pub fn select() -> Self {
        Self::new(Tag::Select)
    }

    /// Create an `<option>` with a value and its label text.
    pub fn option(value: impl Into<String>, label: impl Into<String>) -> Self {
        let mut el = Self::new(Tag::Option).text(label);
        el.value = value.into();
        el
    }

    /// Create an `<optgroup>` with its `label` attribute set.
    pub fn optgroup(label: impl Into<String>) -> Self {
        Self::new(Tag::OptGroup).attr("label", label)
    }

    pub fn input() -> Self {
        Self::new(Tag::Input).attr("type", "text")
    }

    pub fn textarea() -> Self {
        Self::new(Tag::Textarea)
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new(Tag::Button).text(label)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: Vec<Element>) -> Self {
        self.content = Content::Children(children);
        self
    }

    // Markup
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    // Form state
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // Presentation
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns true if it was not present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class. Returns true if it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Space separated class list, as in a `class` attribute.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Text content of this element (empty for containers).
    pub fn text_content(&self) -> &str {
        match &self.content {
            Content::Text(text) => text,
            _ => "",
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    pub fn child_elements(&self) -> &[Element] {
        self.content.children()
    }

    pub fn child_elements_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            _ => None,
        }
    }
}
