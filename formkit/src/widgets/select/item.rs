//! Options, groups and rows of a select widget.

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Option value. The empty string stands for "no selection".
    pub value: String,
    /// Display text.
    pub label: String,
    /// Index into the model's groups, if the option sits in an `<optgroup>`.
    pub group: Option<usize>,
    pub selected: bool,
    /// Disabled options are listed but cannot be chosen.
    pub disabled: bool,
    /// Derived: group open and search match.
    pub visible: bool,
    /// Result of the last search predicate.
    pub matches: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            group: None,
            selected: false,
            disabled: false,
            visible: true,
            matches: true,
        }
    }

    /// The empty-valued entry that represents "nothing selected".
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }

    /// Can keyboard navigation land here.
    pub fn is_navigable(&self) -> bool {
        self.visible && !self.disabled && !self.is_placeholder()
    }
}

/// A named, collapsible cluster of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub id: usize,
    pub label: String,
    pub open: bool,
    /// Header visibility. Headers are hidden only while a search is active
    /// and none of their members match.
    pub visible: bool,
}

impl OptionGroup {
    pub fn new(id: usize, label: impl Into<String>, open: bool) -> Self {
        Self {
            id,
            label: label.into(),
            open,
            visible: true,
        }
    }
}

/// One line of the dropdown list, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    /// A group header, by group index.
    Group(usize),
    /// An option, by option index.
    Option(usize),
}
