//! Frame pump for widget animations.
//!
//! Widgets only advance when ticked. A browser host ticks them from
//! animation-frame callbacks; other hosts can run [`run_until_idle`] after
//! each burst of input.

use std::time::Duration;

use formdom::Document;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::registry::Registry;

/// Interval between frames (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Tick `registry` once per frame until no animation is running.
///
/// Returns the number of frames pumped.
pub async fn run_until_idle(registry: &mut Registry, doc: &mut Document) -> usize {
    run_until_idle_or_cancelled(registry, doc, &CancellationToken::new()).await
}

/// Like [`run_until_idle`], but stops early when `shutdown` is cancelled.
pub async fn run_until_idle_or_cancelled(
    registry: &mut Registry,
    doc: &mut Document,
    shutdown: &CancellationToken,
) -> usize {
    if !registry.is_animating() {
        return 0;
    }

    let mut interval = time::interval(FRAME_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frames = 0;
    loop {
        let instant = tokio::select! {
            instant = interval.tick() => instant,
            _ = shutdown.cancelled() => {
                log::debug!("frame pump cancelled after {} frames", frames);
                return frames;
            }
        };
        frames += 1;
        if !registry.tick(doc, instant.into_std()) {
            break;
        }
    }
    log::trace!("idle after {} frames", frames);
    frames
}
