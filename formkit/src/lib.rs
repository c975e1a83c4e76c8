//! Replacement dropdowns for `<select>` elements.
//!
//! A [`Registry`] scans a [`formdom::Document`] for marked selects, binds a
//! [`SelectWidget`] to each and routes document input to them. Widgets are
//! synchronous; animations advance through [`Registry::tick`] or the
//! [`driver`] frame pump.

pub mod adapter;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod events;
pub mod prelude;
pub mod registry;
pub mod required;
pub mod widgets;

pub use config::{FormConfig, SelectConfig};
pub use context::WidgetContext;
pub use error::{BindError, ConfigError};
pub use registry::Registry;
pub use widgets::select::{SelectWidget, WidgetId};
