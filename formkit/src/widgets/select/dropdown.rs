//! Dropdown panel state machine and placement.

use std::time::{Duration, Instant};

use formdom::{
    CancellationToken, Easing, Key, Modifiers, Rect, TransitionConfig, TransitionProperty, Tween,
    TweenSlot, TweenState, Viewport,
};

use crate::config::{Position, SelectConfig, TweenMode};

/// Lifecycle of the panel. Opening and closing are animation phases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Side of the anchor the panel renders on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Bottom,
    Top,
}

/// How the panel is revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    Fade,
    #[default]
    Slide,
}

/// Reported by [`DropdownController::tick`] when an animation phase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTransition {
    Opened,
    Closed,
}

/// What a key press does while the panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Previous,
    Next,
    /// Confirm the preselected option.
    Commit,
    /// Close without changing the selection.
    Dismiss,
    /// Close and move focus past the widget.
    TabOut,
}

/// Map a key to its dropdown action. Modified keys are left alone.
pub fn key_action(key: Key, modifiers: Modifiers) -> Option<KeyAction> {
    if modifiers.ctrl || modifiers.alt || modifiers.meta {
        return None;
    }
    match key {
        Key::Up => Some(KeyAction::Previous),
        Key::Down => Some(KeyAction::Next),
        Key::Enter => Some(KeyAction::Commit),
        Key::Escape => Some(KeyAction::Dismiss),
        Key::Tab => Some(KeyAction::TabOut),
        _ => None,
    }
}

/// Sizes needed to place the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelMetrics {
    /// The replacement container, in page coordinates.
    pub anchor: Rect,
    pub viewport: Viewport,
    /// Search field and up arrow.
    pub chrome_above: i32,
    /// Down arrow and notices.
    pub chrome_below: i32,
    /// Rows in the scroll window.
    pub rows: usize,
    pub row_height: i32,
}

impl PanelMetrics {
    pub fn panel_height(&self) -> i32 {
        let rows = i32::try_from(self.rows).unwrap_or(i32::MAX);
        self.chrome_above
            .saturating_add(rows.saturating_mul(self.row_height))
            .saturating_add(self.chrome_below)
    }
}

/// Where and how the panel renders for one opening.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub placement: Placement,
    pub mode: RenderMode,
    /// Panel top relative to the container top.
    pub top: i32,
    pub height: i32,
}

/// Choose the panel side from the space around the anchor.
///
/// The bottom is preferred unless configured otherwise, or it lacks room
/// while the top has it. A top panel is raised over the anchor by the
/// chrome above the rows plus as many rows as fit above it, and always
/// fades.
pub fn compute_layout(metrics: &PanelMetrics, config: &SelectConfig) -> PanelLayout {
    let anchor = metrics.viewport.to_viewport(metrics.anchor);
    let height = metrics.panel_height();
    let max_top = anchor.top() - config.window_offset;
    let max_bottom = metrics.viewport.height - anchor.bottom() - config.window_offset;

    let flip = config.auto_position && max_bottom < height && max_top > metrics.chrome_above;
    if config.position == Position::Top || flip {
        let mut raised = metrics.chrome_above;
        for _ in 0..metrics.rows {
            if raised + metrics.row_height > max_top {
                break;
            }
            raised += metrics.row_height;
        }
        return PanelLayout {
            placement: Placement::Top,
            mode: RenderMode::Fade,
            top: -raised,
            height,
        };
    }

    PanelLayout {
        placement: Placement::Bottom,
        mode: match config.tween {
            TweenMode::Height => RenderMode::Slide,
            TweenMode::Opacity => RenderMode::Fade,
        },
        top: metrics.anchor.height,
        height,
    }
}

/// Open/close state, placement and keyboard preselection of one panel.
#[derive(Debug)]
pub struct DropdownController {
    state: PanelState,
    layout: PanelLayout,
    /// Revealed fraction: height share when sliding, opacity when fading.
    revealed: f32,
    slot: TweenSlot,
    preselected: Option<usize>,
    lifecycle: CancellationToken,
}

impl DropdownController {
    pub fn new(lifecycle: CancellationToken) -> Self {
        Self {
            state: PanelState::Closed,
            layout: PanelLayout::default(),
            revealed: 0.0,
            slot: TweenSlot::new(),
            preselected: None,
            lifecycle,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Open or opening.
    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Opening | PanelState::Open)
    }

    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    pub fn revealed(&self) -> f32 {
        self.revealed
    }

    /// Panel height currently shown.
    pub fn visible_height(&self) -> i32 {
        match self.layout.mode {
            RenderMode::Slide => (self.layout.height as f32 * self.revealed).round() as i32,
            RenderMode::Fade => self.layout.height,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self.layout.mode {
            RenderMode::Slide => 1.0,
            RenderMode::Fade => self.revealed,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.slot.is_active()
    }

    /// Start opening. Returns false if already open or opening.
    pub fn open(&mut self, layout: PanelLayout, duration: Duration, now: Instant) -> bool {
        if self.is_open() || self.lifecycle.is_cancelled() {
            return false;
        }
        self.layout = layout;
        self.state = PanelState::Opening;
        self.animate(1.0, duration, now);
        true
    }

    /// Start closing. Returns false if already closed or closing.
    pub fn close(&mut self, duration: Duration, now: Instant) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = PanelState::Closing;
        self.animate(0.0, duration, now);
        true
    }

    fn animate(&mut self, to: f32, duration: Duration, now: Instant) {
        let property = match self.layout.mode {
            RenderMode::Slide => TransitionProperty::Height,
            RenderMode::Fade => TransitionProperty::Opacity,
        };
        self.slot.start(Tween::new(
            property,
            self.revealed,
            to,
            TransitionConfig::new(duration, Easing::EaseInOut),
            now,
            self.lifecycle.child_token(),
        ));
    }

    /// Advance the panel animation.
    pub fn tick(&mut self, now: Instant) -> Option<PanelTransition> {
        match self.slot.tick(now)? {
            TweenState::Running(value) => {
                self.revealed = value;
                None
            }
            TweenState::Finished(value) => {
                self.revealed = value;
                match self.state {
                    PanelState::Opening => {
                        self.state = PanelState::Open;
                        Some(PanelTransition::Opened)
                    }
                    PanelState::Closing => {
                        self.state = PanelState::Closed;
                        Some(PanelTransition::Closed)
                    }
                    PanelState::Open | PanelState::Closed => None,
                }
            }
            TweenState::Cancelled(_) => None,
        }
    }

    // -------------------------------------------------------------------------
    // Preselection
    // -------------------------------------------------------------------------

    pub fn preselected(&self) -> Option<usize> {
        self.preselected
    }

    pub fn preselect(&mut self, index: Option<usize>) {
        self.preselected = index;
    }

    pub fn clear_preselection(&mut self) {
        self.preselected = None;
    }
}
