//! Search filtering of the option list.

use regex::{Regex, RegexBuilder};

use super::options::OptionModel;

/// Characters accepted in the search field.
pub const MAX_QUERY_LEN: usize = 30;

/// Case-insensitive label search.
///
/// The query is used as a pattern when it is a valid regular expression
/// and matched literally otherwise, so typing `(` never breaks the search.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    query: String,
    pattern: Option<Regex>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Whether `label` passes the current query.
    pub fn matches(&self, label: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(label),
            None => true,
        }
    }

    /// Filter `model` by `query` and return the number of visible options.
    ///
    /// An empty query restores the visibility implied by group state alone.
    pub fn apply(&mut self, query: &str, model: &mut OptionModel) -> usize {
        self.query = query.chars().take(MAX_QUERY_LEN).collect();
        self.pattern = compile(&self.query);

        if self.pattern.is_some() {
            model.set_visible(|option| self.matches(&option.label));
        } else {
            model.reset_visible();
        }

        let count = model.visible_count();
        log::debug!("search '{}' -> {} visible", self.query, count);
        count
    }

    /// Forget the query and show everything again.
    pub fn clear(&mut self, model: &mut OptionModel) {
        self.query.clear();
        self.pattern = None;
        model.reset_visible();
    }
}

fn compile(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use formdom::Element;

    use super::*;
    use crate::config::{FormConfig, SelectConfig};

    fn model() -> OptionModel {
        let source = Element::select().children(vec![
            Element::option("nl", "Netherlands"),
            Element::option("no", "Norway"),
            Element::option("nz", "New Zealand"),
            Element::option("pe", "Peru (PE)"),
        ]);
        OptionModel::build(&source, &SelectConfig::default(), &FormConfig::default())
    }

    #[test]
    fn test_case_insensitive_substring() {
        let mut model = model();
        let mut filter = SearchFilter::new();
        assert_eq!(filter.apply("NE", &mut model), 2);
        assert_eq!(filter.apply("way", &mut model), 1);
    }

    #[test]
    fn test_pattern_and_literal_fallback() {
        let mut model = model();
        let mut filter = SearchFilter::new();
        assert_eq!(filter.apply("^ne", &mut model), 2);
        // Unbalanced paren is matched literally
        assert_eq!(filter.apply("(pe", &mut model), 1);
    }

    #[test]
    fn test_empty_query_restores_baseline() {
        let mut model = model();
        let mut filter = SearchFilter::new();
        filter.apply("zzz", &mut model);
        assert_eq!(model.visible_count(), 0);
        assert_eq!(filter.apply("", &mut model), 4);
        assert!(!filter.is_active());
    }

    #[test]
    fn test_query_is_truncated() {
        let mut model = model();
        let mut filter = SearchFilter::new();
        filter.apply(&"a".repeat(40), &mut model);
        assert_eq!(filter.query().len(), MAX_QUERY_LEN);
    }
}
