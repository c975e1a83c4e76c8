//! In-memory option list of a select widget.

use formdom::{Element, Tag};

use super::item::{OptionGroup, Row, SelectOption};
use crate::config::{FormConfig, SelectConfig};

/// The options and groups of one bound `<select>`, in document order.
///
/// Built once when the widget binds. Afterwards only selection, group
/// open state and search visibility change.
#[derive(Debug, Clone, Default)]
pub struct OptionModel {
    options: Vec<SelectOption>,
    groups: Vec<OptionGroup>,
    rows: Vec<Row>,
    placeholder: Option<String>,
    removal_permitted: bool,
    synthesized: bool,
    filtering: bool,
}

impl OptionModel {
    /// Parse the children of a `<select>` element.
    pub fn build(source: &Element, config: &SelectConfig, form: &FormConfig) -> Self {
        let mut model = Self::default();

        for child in source.child_elements() {
            match child.tag {
                Tag::Option => model.push_option(child, None, false),
                Tag::OptGroup => {
                    let id = model.groups.len();
                    let label = child
                        .get_attr("label")
                        .unwrap_or_else(|| child.text_content())
                        .to_string();
                    let open = !child.has_attr(&form.optgroup_closed_attr);
                    model.groups.push(OptionGroup::new(id, label, open));
                    model.rows.push(Row::Group(id));
                    for member in child.child_elements() {
                        if member.tag == Tag::Option {
                            model.push_option(member, Some(id), child.disabled);
                        }
                    }
                }
                _ => {}
            }
        }

        model.placeholder = source
            .get_attr("placeholder")
            .or(config.placeholder.as_deref())
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let first_has_value = model.options.first().map(|o| !o.value.is_empty());
        if model.placeholder.is_none() && first_has_value == Some(false) {
            model.placeholder = model
                .options
                .first()
                .map(|o| o.label.clone())
                .filter(|label| !label.is_empty());
        }

        let keeps_first = model.placeholder.is_none() && first_has_value == Some(true);
        model.removal_permitted = config.remove_selected && !keeps_first;

        if let (Some(placeholder), Some(true)) = (&model.placeholder, first_has_value) {
            model.options.insert(0, SelectOption::new("", placeholder.clone()));
            for row in &mut model.rows {
                if let Row::Option(index) = row {
                    *index += 1;
                }
            }
            model.synthesized = true;
        }

        model.select_initial();
        model.refresh();
        model
    }

    fn push_option(&mut self, element: &Element, group: Option<usize>, group_disabled: bool) {
        let mut option = SelectOption::new(element.value.clone(), element.text_content());
        option.group = group;
        option.selected = element.selected;
        option.disabled = element.disabled || group_disabled;

        if !option.is_placeholder() {
            self.rows.push(Row::Option(self.options.len()));
        }
        self.options.push(option);
    }

    /// The last explicitly selected option wins. Without a placeholder the
    /// first option is selected, as a native select would.
    fn select_initial(&mut self) {
        let explicit = self
            .options
            .iter()
            .rposition(|o| o.selected && !o.is_placeholder());
        let initial = explicit.or_else(|| {
            if self.placeholder.is_some() {
                None
            } else {
                self.options.first().filter(|o| !o.is_placeholder()).map(|_| 0)
            }
        });

        for (index, option) in self.options.iter_mut().enumerate() {
            option.selected = Some(index) == initial;
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn option(&self, index: usize) -> Option<&SelectOption> {
        self.options.get(index)
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn group(&self, id: usize) -> Option<&OptionGroup> {
        self.groups.get(id)
    }

    /// Every row, visible or not.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of real options (the placeholder entry excluded).
    pub fn option_count(&self) -> usize {
        self.options.iter().filter(|o| !o.is_placeholder()).count()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Whether the selection may be cleared back to the placeholder.
    pub fn removal_permitted(&self) -> bool {
        self.removal_permitted
    }

    /// Whether an empty leading option was added for the placeholder.
    pub fn synthesized_placeholder(&self) -> bool {
        self.synthesized
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.selected)
    }

    pub fn selected(&self) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.selected)
    }

    /// Selected value, or the empty string.
    pub fn selected_value(&self) -> &str {
        self.selected().map(|o| o.value.as_str()).unwrap_or("")
    }

    /// Index of the option carrying `value`. Empty values never match.
    pub fn find(&self, value: &str) -> Option<usize> {
        if value.is_empty() {
            return None;
        }
        self.options.iter().position(|o| o.value == value)
    }

    /// Select the option carrying `value`. Misses leave the selection alone.
    pub fn set_selected(&mut self, value: &str) -> Option<usize> {
        let index = self.find(value)?;
        for (i, option) in self.options.iter_mut().enumerate() {
            option.selected = i == index;
        }
        Some(index)
    }

    /// Returns true if something was selected.
    pub fn clear_selected(&mut self) -> bool {
        let mut cleared = false;
        for option in &mut self.options {
            cleared |= option.selected;
            option.selected = false;
        }
        cleared
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Open or close a group. Returns true if the state changed.
    pub fn set_group_open(&mut self, id: usize, open: bool) -> bool {
        let Some(group) = self.groups.get_mut(id) else {
            return false;
        };
        if group.open == open {
            return false;
        }
        group.open = open;
        self.refresh();
        true
    }

    pub fn toggle_group(&mut self, id: usize) -> bool {
        match self.groups.get(id) {
            Some(group) => self.set_group_open(id, !group.open),
            None => false,
        }
    }

    /// Restrict options to those matching `predicate`.
    pub fn set_visible<F>(&mut self, predicate: F)
    where
        F: Fn(&SelectOption) -> bool,
    {
        for option in &mut self.options {
            option.matches = predicate(option);
        }
        self.filtering = true;
        self.refresh();
    }

    /// Drop any search restriction; only group state applies.
    pub fn reset_visible(&mut self) {
        for option in &mut self.options {
            option.matches = true;
        }
        self.filtering = false;
        self.refresh();
    }

    fn refresh(&mut self) {
        let open: Vec<bool> = self.groups.iter().map(|g| g.open).collect();
        for option in &mut self.options {
            let group_open = option.group.is_none_or(|g| open.get(g).copied().unwrap_or(true));
            option.visible = !option.is_placeholder() && group_open && option.matches;
        }
        for group in &mut self.groups {
            group.visible = !self.filtering
                || self
                    .options
                    .iter()
                    .any(|o| o.group == Some(group.id) && o.matches && !o.is_placeholder());
        }
    }

    pub fn is_row_visible(&self, row: Row) -> bool {
        match row {
            Row::Group(id) => self.groups.get(id).is_some_and(|g| g.visible),
            Row::Option(index) => self.options.get(index).is_some_and(|o| o.visible),
        }
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.rows.iter().copied().filter(|row| self.is_row_visible(*row))
    }

    pub fn visible_row_count(&self) -> usize {
        self.visible_rows().count()
    }

    /// Number of visible options, headers excluded.
    pub fn visible_count(&self) -> usize {
        self.options.iter().filter(|o| o.visible).count()
    }

    /// 1-based position of `row` among the visible rows.
    pub fn row_position(&self, row: Row) -> Option<usize> {
        self.visible_rows().position(|r| r == row).map(|p| p + 1)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn first_navigable(&self) -> Option<usize> {
        self.navigable().next()
    }

    /// Next navigable option after `index` in row order, without wrapping.
    pub fn next_navigable(&self, index: usize) -> Option<usize> {
        self.navigable()
            .skip_while(|&i| i != index)
            .nth(1)
            .or_else(|| self.after_hidden(index, false))
    }

    /// Previous navigable option before `index` in row order, without wrapping.
    pub fn prev_navigable(&self, index: usize) -> Option<usize> {
        let order: Vec<usize> = self.navigable().collect();
        match order.iter().position(|&i| i == index) {
            Some(pos) => pos.checked_sub(1).map(|p| order[p]),
            None => self.after_hidden(index, true),
        }
    }

    fn navigable(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().filter_map(|row| match row {
            Row::Option(i) if self.options[*i].is_navigable() => Some(*i),
            _ => None,
        })
    }

    /// Neighbour of an option that is itself no longer navigable (hidden by
    /// a filter or a collapsed group).
    fn after_hidden(&self, index: usize, backwards: bool) -> Option<usize> {
        let row = self.rows.iter().position(|r| *r == Row::Option(index))?;
        let candidates = |r: &Row| match r {
            Row::Option(i) if *i != index && self.options[*i].is_navigable() => Some(*i),
            _ => None,
        };
        if self.options.get(index).is_some_and(SelectOption::is_navigable) {
            return None;
        }
        if backwards {
            self.rows[..row].iter().rev().find_map(candidates)
        } else {
            self.rows[row + 1..].iter().find_map(candidates)
        }
    }
}
