//! Cancellable one-shot timers.

use std::time::Duration;

use bevy::prelude::*;

/// A one-shot timer that can be armed, re-armed and cancelled.
///
/// Arming while already armed replaces the pending timer. A fired timer
/// disarms itself, so [`OneShot::tick`] reports each expiry exactly once.
#[derive(Debug, Clone, Default)]
pub struct OneShot(Option<Timer>);

impl OneShot {
    pub fn arm(&mut self, seconds: f32) {
        self.0 = Some(Timer::from_seconds(seconds.max(0.0), TimerMode::Once));
    }

    pub fn cancel(&mut self) {
        self.0 = None;
    }

    pub fn is_armed(&self) -> bool {
        self.0.is_some()
    }

    /// Seconds left before the timer fires, if armed.
    pub fn remaining_secs(&self) -> Option<f32> {
        self.0.as_ref().map(Timer::remaining_secs)
    }

    /// Advance by `delta`. Returns true on the tick the timer fires.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.0.as_mut() else {
            return false;
        };

        timer.tick(delta);
        if timer.finished() {
            self.0 = None;
            true
        } else {
            false
        }
    }
}
