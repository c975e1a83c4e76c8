//! Virtual scrolling of the option list.
//!
//! Only a window of rows is shown; the list is translated upwards by
//! `offset` pixels to simulate scrolling through the rest. Positions are
//! 1-based row numbers of the first row in the window.

use std::time::{Duration, Instant};

use formdom::{
    CancellationToken, Easing, TransitionConfig, TransitionProperty, Tween, TweenSlot, TweenState,
};

use crate::config::SelectConfig;

/// Direction of the last scroll movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// Per-row speeds and the settle duration, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSpeeds {
    pub normal: u64,
    pub fast: u64,
    pub wheel: u64,
    pub wheel_step: usize,
    pub settle: u64,
}

impl From<&SelectConfig> for ScrollSpeeds {
    fn from(config: &SelectConfig) -> Self {
        Self {
            normal: config.scroll_speed,
            fast: config.scroll_fast,
            wheel: config.scroll_wheel_speed,
            wheel_step: config.scroll_wheel_step,
            settle: config.settle_duration,
        }
    }
}

/// Number of rows shown at once for a list of `total` rows.
///
/// Overflowing `max` by no more than `buffer` rows shows everything
/// rather than adding scroll arrows for a handful of rows.
pub fn window_size(total: usize, max: usize, buffer: usize) -> usize {
    if total <= max || total - max <= buffer {
        total
    } else {
        max
    }
}

#[derive(Debug)]
pub struct VirtualScroller {
    row_height: i32,
    window: usize,
    total_rows: usize,
    /// Rows currently visible (after search and group collapsing).
    rows: usize,
    /// Pixels the list is moved up. Always within `0..=max_offset()`.
    offset: f32,
    direction: ScrollDirection,
    speeds: ScrollSpeeds,
    slot: TweenSlot,
    wheel_blocked_until: Option<Instant>,
    lifecycle: CancellationToken,
}

impl VirtualScroller {
    pub fn new(total_rows: usize, config: &SelectConfig, lifecycle: CancellationToken) -> Self {
        Self {
            row_height: config.row_height.max(1),
            window: window_size(total_rows, config.max, config.max_buffer),
            total_rows,
            rows: total_rows,
            offset: 0.0,
            direction: ScrollDirection::Down,
            speeds: ScrollSpeeds::from(config),
            slot: TweenSlot::new(),
            wheel_blocked_until: None,
            lifecycle,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    pub fn speeds(&self) -> ScrollSpeeds {
        self.speeds
    }

    /// Whether the list was built with up/down affordances.
    pub fn has_affordances(&self) -> bool {
        self.window < self.total_rows
    }

    /// Whether the currently visible rows overflow the window.
    pub fn can_scroll(&self) -> bool {
        self.rows > self.window
    }

    /// Rows actually shown, never more than are visible.
    pub fn shown_rows(&self) -> usize {
        self.window.min(self.rows)
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn is_animating(&self) -> bool {
        self.slot.is_active()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Current offset in whole pixels.
    pub fn top_offset(&self) -> i32 {
        self.offset.round() as i32
    }

    pub fn max_offset(&self) -> i32 {
        let rows = i32::try_from(self.rows.saturating_sub(self.window)).unwrap_or(i32::MAX);
        rows.saturating_mul(self.row_height)
    }

    /// Last position that still fills the window.
    pub fn last_position(&self) -> usize {
        self.rows.saturating_sub(self.window) + 1
    }

    pub fn clamp(&self, position: usize) -> usize {
        position.clamp(1, self.last_position())
    }

    /// Position of the row currently at the top of the window.
    pub fn position(&self) -> usize {
        (self.offset / self.row_height as f32).round() as usize + 1
    }

    /// Translation that puts `position` at the top of the window.
    /// Negative: the content moves up.
    pub fn target_offset_for(&self, position: usize) -> i32 {
        -((self.clamp(position) as i32 - 1) * self.row_height)
    }

    /// Time to travel to `position` at `speed` ms per row.
    pub fn duration_for(&self, position: usize, speed: u64) -> Duration {
        let target = -self.target_offset_for(position) as f32;
        let rows = (target - self.offset).abs() / self.row_height as f32;
        Duration::from_millis((rows * speed as f32).round() as u64)
    }

    /// Scroll so that `position` is the first row. A speed of zero jumps.
    pub fn scroll_to(&mut self, position: usize, speed: u64, now: Instant) {
        if self.lifecycle.is_cancelled() {
            return;
        }
        let target = -self.target_offset_for(position) as f32;
        let duration = self.duration_for(position, speed);
        if target != self.offset {
            self.direction = if target > self.offset {
                ScrollDirection::Down
            } else {
                ScrollDirection::Up
            };
        }

        if duration.is_zero() {
            self.slot.cancel();
            self.offset = target;
            return;
        }

        self.slot.start(Tween::new(
            TransitionProperty::Top,
            self.offset,
            target,
            TransitionConfig::linear(duration),
            now,
            self.lifecycle.child_token(),
        ));
    }

    /// Scroll by a number of rows relative to the current position.
    pub fn scroll_by(&mut self, rows: isize, speed: u64, now: Instant) {
        let position = self.position().saturating_add_signed(rows);
        self.scroll_to(position, speed, now);
    }

    /// Start moving toward one edge of the list.
    pub fn scroll_toward(&mut self, direction: ScrollDirection, fast: bool, now: Instant) {
        let speed = if fast {
            self.speeds.fast
        } else {
            self.speeds.normal
        };
        let edge = match direction {
            ScrollDirection::Up => 1,
            ScrollDirection::Down => self.last_position(),
        };
        log::trace!("scroll {:?} at {}ms/row", direction, speed);
        self.scroll_to(edge, speed, now);
    }

    /// Stop and ease to the next row boundary in the current direction.
    pub fn settle(&mut self, now: Instant) {
        self.slot.cancel();
        if self.lifecycle.is_cancelled() {
            return;
        }
        let rows = self.offset / self.row_height as f32;
        let boundary = match self.direction {
            ScrollDirection::Down => rows.ceil(),
            ScrollDirection::Up => rows.floor(),
        };
        let target = (boundary * self.row_height as f32).clamp(0.0, self.max_offset() as f32);
        if (target - self.offset).abs() < 0.5 {
            self.offset = target;
            return;
        }
        self.slot.start(Tween::new(
            TransitionProperty::Top,
            self.offset,
            target,
            TransitionConfig::millis(self.speeds.settle, Easing::SineOut),
            now,
            self.lifecycle.child_token(),
        ));
    }

    /// Scroll a fixed number of rows for one wheel notch.
    ///
    /// Notches arriving before the previous step has had time to play out
    /// are dropped. Returns true if the notch was accepted.
    pub fn wheel(&mut self, delta_y: i32, now: Instant) -> bool {
        if delta_y == 0 || !self.can_scroll() {
            return false;
        }
        if self.wheel_blocked_until.is_some_and(|until| now < until) {
            log::trace!("wheel notch dropped");
            return false;
        }
        let step = isize::try_from(self.speeds.wheel_step).unwrap_or(isize::MAX);
        let rows = if delta_y > 0 { step } else { -step };
        self.scroll_by(rows, self.speeds.wheel, now);
        let blocked = (self.speeds.wheel_step as u64).saturating_mul(self.speeds.wheel);
        self.wheel_blocked_until = now.checked_add(Duration::from_millis(blocked));
        true
    }

    /// Put `position` in the middle of the window immediately.
    pub fn center_on(&mut self, position: usize, now: Instant) {
        self.scroll_to(position.saturating_sub(self.window / 2), 0, now);
    }

    /// Update the number of visible rows, pulling the offset back in range.
    pub fn set_row_count(&mut self, rows: usize) {
        self.rows = rows;
        let max = self.max_offset() as f32;
        if self.offset > max {
            self.slot.cancel();
            self.offset = max;
        }
    }

    /// Stop any animation and return to the first row.
    pub fn reset(&mut self) {
        self.slot.cancel();
        self.offset = 0.0;
        self.direction = ScrollDirection::Down;
        self.wheel_blocked_until = None;
    }

    /// Advance the scroll animation. Returns true while it is running.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.slot.tick(now) {
            Some(TweenState::Running(value)) => {
                self.offset = value;
                true
            }
            Some(TweenState::Finished(value)) => {
                self.offset = value;
                false
            }
            Some(TweenState::Cancelled(_)) | None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller(total: usize, max: usize) -> VirtualScroller {
        let config = SelectConfig::default().max(max).max_buffer(3);
        VirtualScroller::new(total, &config, CancellationToken::new())
    }

    #[test]
    fn test_window_size_buffer_rule() {
        assert_eq!(window_size(20, 13, 3), 13);
        assert_eq!(window_size(20, 18, 3), 20);
        assert_eq!(window_size(16, 13, 3), 16);
        assert_eq!(window_size(5, 13, 3), 5);
    }

    #[test]
    fn test_target_offset_is_clamped() {
        let s = scroller(20, 13);
        assert_eq!(s.last_position(), 8);
        assert_eq!(s.target_offset_for(0), 0);
        assert_eq!(s.target_offset_for(3), -48);
        assert_eq!(s.target_offset_for(100), -7 * 24);
        assert_eq!(s.max_offset(), 7 * 24);
    }

    #[test]
    fn test_duration_proportional_to_rows() {
        let s = scroller(20, 13);
        assert_eq!(s.duration_for(5, 100), Duration::from_millis(400));
        assert_eq!(s.duration_for(5, 0), Duration::ZERO);
    }

    #[test]
    fn test_scroll_to_animates_and_lands() {
        let now = Instant::now();
        let mut s = scroller(20, 13);
        s.scroll_to(3, 100, now);
        assert!(s.is_animating());
        assert!(s.tick(now + Duration::from_millis(100)));
        assert!((s.offset() - 24.0).abs() < 0.5);
        assert!(!s.tick(now + Duration::from_millis(200)));
        assert_eq!(s.top_offset(), 48);
    }

    #[test]
    fn test_new_request_cancels_previous() {
        let now = Instant::now();
        let mut s = scroller(20, 13);
        s.scroll_toward(ScrollDirection::Down, false, now);
        s.scroll_to(1, 0, now);
        assert!(!s.is_animating());
        assert_eq!(s.top_offset(), 0);
        assert!(!s.tick(now + Duration::from_secs(1)));
        assert_eq!(s.top_offset(), 0);
    }

    #[test]
    fn test_wheel_is_rate_limited() {
        let now = Instant::now();
        let mut s = scroller(20, 13);
        assert!(s.wheel(1, now));
        assert!(!s.wheel(1, now + Duration::from_millis(50)));
        s.tick(now + Duration::from_millis(90));
        assert_eq!(s.top_offset(), 72);
        assert!(s.wheel(1, now + Duration::from_millis(90)));
    }

    #[test]
    fn test_wheel_with_extreme_speeds() {
        let now = Instant::now();
        let config = SelectConfig {
            scroll_wheel_speed: u64::MAX,
            scroll_wheel_step: usize::MAX,
            ..SelectConfig::default()
        };
        let mut s = VirtualScroller::new(20, &config, CancellationToken::new());
        assert!(s.wheel(1, now));
        assert!(!s.wheel(1, now + Duration::from_secs(1)));
        s.tick(now + Duration::from_secs(1));
        assert!((0..=s.max_offset()).contains(&s.top_offset()));
    }

    #[test]
    fn test_settle_snaps_in_scroll_direction() {
        let now = Instant::now();
        let mut s = scroller(20, 13);
        s.scroll_toward(ScrollDirection::Down, false, now);
        s.tick(now + Duration::from_millis(150));
        assert!((s.offset() - 36.0).abs() < 0.5);

        s.settle(now + Duration::from_millis(150));
        assert!(!s.tick(now + Duration::from_millis(600)));
        assert_eq!(s.top_offset(), 48);
    }

    #[test]
    fn test_row_count_clamps_offset() {
        let now = Instant::now();
        let mut s = scroller(20, 13);
        s.scroll_to(8, 0, now);
        s.set_row_count(15);
        assert_eq!(s.top_offset(), 2 * 24);
        s.set_row_count(4);
        assert_eq!(s.top_offset(), 0);
        assert!(!s.can_scroll());
    }

    #[test]
    fn test_cancelled_lifecycle_ignores_requests() {
        let lifecycle = CancellationToken::new();
        let mut s = VirtualScroller::new(20, &SelectConfig::default(), lifecycle.clone());
        lifecycle.cancel();
        s.scroll_to(5, 0, Instant::now());
        assert_eq!(s.top_offset(), 0);
    }
}
