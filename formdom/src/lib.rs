pub mod animation;
pub mod document;
pub mod element;
pub mod event;
pub mod focus;
pub mod hit;
pub mod layout;
pub mod transitions;
pub mod types;

pub use animation::{TransitionProperty, Tween, TweenSlot, TweenState};
pub use document::Document;
pub use element::{Content, Element};
pub use event::{Event, Key, Modifiers, MouseButton};
pub use focus::{collect_focusable, next_focusable_after, FocusState};
pub use hit::{hit_test, hit_test_any};
pub use layout::{LayoutResult, Rect, Viewport};
pub use transitions::{Easing, TransitionConfig};
pub use types::*;

pub use tokio_util::sync::CancellationToken;
