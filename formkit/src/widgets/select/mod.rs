//! Select widget - a replacement dropdown for `<select>` elements.
//!
//! The widget is split along its concerns:
//! - [`OptionModel`]: options and groups parsed from the source element
//! - [`VirtualScroller`]: the scroll window over the rows
//! - [`SearchFilter`]: label search
//! - [`DropdownController`]: panel state, placement and preselection
//! - [`SelectWidget`]: binds them to the source element

pub mod dropdown;
mod events;
pub mod filter;
pub mod item;
pub mod options;
pub mod render;
pub mod scroller;
mod state;

pub use dropdown::{DropdownController, PanelState, Placement, RenderMode};
pub use filter::SearchFilter;
pub use item::{OptionGroup, Row, SelectOption};
pub use options::OptionModel;
pub use render::{Part, PartIds};
pub use scroller::{ScrollDirection, VirtualScroller};
pub use state::{SelectWidget, WidgetId};
