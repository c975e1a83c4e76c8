//! Cancellable tweens of a single scalar property.
//!
//! A tween never blocks: it records where it started and is sampled with the
//! caller's clock. Each tween carries a [`CancellationToken`]; starting a new
//! tween in a [`TweenSlot`] cancels the token of the one it replaces, so any
//! continuation keyed on the old token becomes a no-op.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::transitions::{Easing, TransitionConfig};

/// Which property is being animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionProperty {
    Top,
    Height,
    Opacity,
}

/// Result of sampling a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenState {
    /// Still animating; the current value.
    Running(f32),
    /// Reached its target.
    Finished(f32),
    /// Cancelled before finishing; the value it had reached.
    Cancelled(f32),
}

/// A single active tween.
#[derive(Debug, Clone)]
pub struct Tween {
    pub property: TransitionProperty,
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
    token: CancellationToken,
}

impl Tween {
    pub fn new(
        property: TransitionProperty,
        from: f32,
        to: f32,
        config: TransitionConfig,
        start: Instant,
        token: CancellationToken,
    ) -> Self {
        Self {
            property,
            from,
            to,
            start,
            duration: config.duration,
            easing: config.easing,
            token,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Linear progress in 0.0..=1.0.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let eased = self.easing.apply(self.progress(now));
        lerp(self.from, self.to, eased)
    }

    pub fn sample(&self, now: Instant) -> TweenState {
        if self.is_cancelled() {
            return TweenState::Cancelled(self.value_at(now));
        }
        if self.progress(now) >= 1.0 {
            TweenState::Finished(self.to)
        } else {
            TweenState::Running(self.value_at(now))
        }
    }
}

/// Holds at most one tween for one property of one element.
#[derive(Debug, Default)]
pub struct TweenSlot {
    current: Option<Tween>,
}

impl TweenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween, cancelling the one in flight.
    pub fn start(&mut self, tween: Tween) -> CancellationToken {
        self.cancel();
        let token = tween.token.clone();
        log::trace!(
            "tween {:?} {} -> {} over {:?}",
            tween.property,
            tween.from,
            tween.to,
            tween.duration
        );
        self.current = Some(tween);
        token
    }

    /// Cancel the tween in flight, returning it.
    pub fn cancel(&mut self) -> Option<Tween> {
        let tween = self.current.take()?;
        tween.token.cancel();
        Some(tween)
    }

    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    pub fn current(&self) -> Option<&Tween> {
        self.current.as_ref()
    }

    /// Advance the tween. Finished or externally cancelled tweens are removed
    /// from the slot and reported once.
    pub fn tick(&mut self, now: Instant) -> Option<TweenState> {
        let state = self.current.as_ref()?.sample(now);
        if !matches!(state, TweenState::Running(_)) {
            self.current = None;
        }
        Some(state)
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
