//! Prelude module for convenient imports.
//!
//! ```ignore
//! use formkit::prelude::*;
//! ```

pub use crate::adapter::{FormControl, SelectAdapter};
pub use crate::config::{FormConfig, Position, SearchThreshold, SelectConfig, TweenMode};
pub use crate::context::WidgetContext;
pub use crate::driver::run_until_idle;
pub use crate::error::{BindError, ConfigError};
pub use crate::events::{EventResult, WidgetEvent, WidgetEventKind};
pub use crate::registry::Registry;
pub use crate::required::{RequiredClasses, RequiredState};
pub use crate::widgets::select::{
    OptionModel, PanelState, Placement, RenderMode, SelectWidget, WidgetId,
};

// Re-export the document model
pub use formdom::{Document, Element, Event, Key, Rect};
