//! Declarative widget configuration.
//!
//! A select is usually configured from markup: the value of its
//! `data-select` attribute is an object literal such as
//! `{"max": 8, "placeholder": "Pick one"}`. Every key is optional and
//! missing keys take the defaults below.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Upper bound for every duration and per-row speed, in milliseconds.
const MAX_DURATION_MS: u64 = 60_000;
/// Upper bound for row, search and arrow heights and the window margin.
const MAX_METRIC: i32 = 1_000;
const MAX_WHEEL_STEP: usize = 100;

/// When the search field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SearchThreshold {
    /// `true` always renders the field, `false` never does.
    Toggle(bool),
    /// Render the field once the list has at least this many rows.
    Rows(usize),
}

impl Default for SearchThreshold {
    fn default() -> Self {
        SearchThreshold::Rows(20)
    }
}

impl SearchThreshold {
    /// Whether a list of `rows` rows gets a search field.
    pub fn enabled_for(self, rows: usize) -> bool {
        match self {
            SearchThreshold::Toggle(on) => on,
            SearchThreshold::Rows(min) => min <= rows,
        }
    }
}

/// Preferred side of the anchor for the dropdown panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Bottom,
    Top,
}

/// How a bottom-placed panel is revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TweenMode {
    /// Slide the panel open by animating its height.
    #[default]
    Height,
    /// Fade the panel in.
    Opacity,
}

/// Per-widget configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectConfig {
    /// Text shown while nothing is selected.
    pub placeholder: Option<String>,
    pub placeholder_search: String,
    pub no_search_results: String,
    pub no_options: String,

    pub search: SearchThreshold,
    /// Move focus into the search field when the panel opens.
    pub focus_search: bool,

    /// Maximum number of rows in the scroll window.
    pub max: usize,
    /// Overflow of at most this many rows renders everything unscrolled.
    pub max_buffer: usize,

    pub position: Position,
    pub tween: TweenMode,
    /// Flip to the top when the bottom does not fit and the top does.
    pub auto_position: bool,
    /// Margin kept between the panel and the viewport edges, in pixels.
    pub window_offset: i32,

    // Speeds are milliseconds per row.
    pub scroll_speed: u64,
    pub scroll_fast: u64,
    pub scroll_wheel_speed: u64,
    pub scroll_wheel_step: usize,

    // Durations in milliseconds.
    pub dropdown_duration: u64,
    pub fade_duration: u64,
    pub settle_duration: u64,

    /// Offer a control that clears the selection.
    pub remove_selected: bool,
    pub z_index: i32,

    // Metrics a browser would measure from CSS.
    pub row_height: i32,
    pub search_height: i32,
    pub arrow_height: i32,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            placeholder: None,
            placeholder_search: "Search...".to_string(),
            no_search_results: "No options found...".to_string(),
            no_options: "There are no options...".to_string(),
            search: SearchThreshold::default(),
            focus_search: false,
            max: 13,
            max_buffer: 3,
            position: Position::Bottom,
            tween: TweenMode::Height,
            auto_position: true,
            window_offset: 10,
            scroll_speed: 100,
            scroll_fast: 30,
            scroll_wheel_speed: 30,
            scroll_wheel_step: 3,
            dropdown_duration: 250,
            fade_duration: 250,
            settle_duration: 400,
            remove_selected: true,
            z_index: 2000,
            row_height: 24,
            search_height: 30,
            arrow_height: 16,
        }
    }
}

impl SelectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an attribute value. The value must be an object literal.
    pub fn parse(literal: &str) -> Result<Self, ConfigError> {
        let trimmed = literal.trim();
        if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
            return Err(ConfigError::NotAnObject(trimmed.to_string()));
        }
        let config: Self =
            serde_json::from_str(trimmed).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(config.clamped())
    }

    /// Pull numeric options into the range the widget can work with.
    pub fn clamped(mut self) -> Self {
        for ms in [
            &mut self.scroll_speed,
            &mut self.scroll_fast,
            &mut self.scroll_wheel_speed,
            &mut self.dropdown_duration,
            &mut self.fade_duration,
            &mut self.settle_duration,
        ] {
            *ms = (*ms).min(MAX_DURATION_MS);
        }
        self.scroll_wheel_step = self.scroll_wheel_step.clamp(1, MAX_WHEEL_STEP);
        self.max = self.max.max(1);
        self.row_height = self.row_height.clamp(1, MAX_METRIC);
        self.search_height = self.search_height.clamp(0, MAX_METRIC);
        self.arrow_height = self.arrow_height.clamp(0, MAX_METRIC);
        self.window_offset = self.window_offset.clamp(-MAX_METRIC, MAX_METRIC);
        self.z_index = self.z_index.clamp(i32::MIN / 2, i32::MAX / 2);
        self
    }

    /// Parse an attribute value, falling back to the defaults.
    ///
    /// An empty attribute means "no extra options". Anything else that does
    /// not parse is logged and also yields the defaults, so one bad
    /// attribute never stops a markup scan.
    pub fn from_attribute(literal: &str) -> Self {
        if literal.trim().is_empty() {
            return Self::default();
        }
        Self::parse(literal).unwrap_or_else(|e| {
            log::warn!("ignoring select options: {}", e);
            Self::default()
        })
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn search(mut self, search: SearchThreshold) -> Self {
        self.search = search;
        self
    }

    pub fn focus_search(mut self, focus: bool) -> Self {
        self.focus_search = focus;
        self
    }

    pub fn max(mut self, rows: usize) -> Self {
        self.max = rows;
        self
    }

    pub fn max_buffer(mut self, rows: usize) -> Self {
        self.max_buffer = rows;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn tween(mut self, tween: TweenMode) -> Self {
        self.tween = tween;
        self
    }

    pub fn auto_position(mut self, auto: bool) -> Self {
        self.auto_position = auto;
        self
    }

    pub fn remove_selected(mut self, remove: bool) -> Self {
        self.remove_selected = remove;
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Panel reveal/hide duration for the given render mode.
    pub fn reveal_duration(&self, fade: bool) -> Duration {
        Duration::from_millis(if fade {
            self.fade_duration
        } else {
            self.dropdown_duration
        })
    }
}

/// Attribute and class names shared by the markup scan and the required
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    /// Marks a `<select>` for replacement. Its value is a [`SelectConfig`] literal.
    pub select_attr: String,
    pub required_attr: String,
    pub required_hidden_attr: String,
    /// Marks an `<optgroup>` that starts collapsed.
    pub optgroup_closed_attr: String,

    pub required_class: String,
    pub required_hidden_class: String,
    /// Add the hidden-required class to every required control.
    pub hide: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            select_attr: "data-select".to_string(),
            required_attr: "data-required".to_string(),
            required_hidden_attr: "data-required-hidden".to_string(),
            optgroup_closed_attr: "data-optgroup-closed".to_string(),
            required_class: "required".to_string(),
            required_hidden_class: "required_hidden".to_string(),
            hide: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_literal() {
        let config =
            SelectConfig::parse(r#"{"max": 8, "placeholder": "Pick", "search": false}"#).unwrap();
        assert_eq!(config.max, 8);
        assert_eq!(config.placeholder.as_deref(), Some("Pick"));
        assert_eq!(config.search, SearchThreshold::Toggle(false));
        assert_eq!(config.max_buffer, 3);
    }

    #[test]
    fn test_parse_enums() {
        let config = SelectConfig::parse(r#"{"position": "top", "tween": "opacity"}"#).unwrap();
        assert_eq!(config.position, Position::Top);
        assert_eq!(config.tween, TweenMode::Opacity);
    }

    #[test]
    fn test_invalid_literal_falls_back_to_default() {
        assert_eq!(SelectConfig::from_attribute("{max: 8"), SelectConfig::default());
        assert_eq!(SelectConfig::from_attribute("max=8"), SelectConfig::default());
        assert_eq!(SelectConfig::from_attribute(""), SelectConfig::default());
        assert!(matches!(
            SelectConfig::parse("[1, 2]"),
            Err(ConfigError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_out_of_range_numbers_are_clamped() {
        let config = SelectConfig::from_attribute(
            r#"{"scrollWheelSpeed": 18446744073709551615, "scrollWheelStep": 0,
                "rowHeight": 2147483647, "zIndex": 2147483647, "max": 0}"#,
        );
        assert_eq!(config.scroll_wheel_speed, MAX_DURATION_MS);
        assert_eq!(config.scroll_wheel_step, 1);
        assert_eq!(config.row_height, MAX_METRIC);
        assert_eq!(config.max, 1);
        assert!(config.z_index < i32::MAX - 10);
        // Everything else keeps its value
        assert_eq!(config.scroll_speed, 100);
    }

    #[test]
    fn test_search_threshold() {
        assert!(!SearchThreshold::Rows(20).enabled_for(5));
        assert!(SearchThreshold::Rows(20).enabled_for(20));
        assert!(SearchThreshold::Toggle(true).enabled_for(0));
        assert!(!SearchThreshold::Toggle(false).enabled_for(100));
    }
}
