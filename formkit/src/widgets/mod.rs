//! Built-in widgets.
//!
//! Each widget binds to an element of a [`formdom::Document`], renders its
//! own elements next to it and handles the events routed to them.

pub mod select;

pub use select::SelectWidget;
