//! Frame clock
//!
//! Turns the frame driver's timestamps (milliseconds) into elapsed seconds.
//! The first frame only primes the clock.

use serde::{Deserialize, Serialize};

/// Last-seen frame timestamp
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FrameClock {
    /// No frame seen since (re)start
    #[default]
    NotStarted,
    /// Running; `last_ms` is the latest timestamp seen
    Running { last_ms: f64 },
}

impl FrameClock {
    pub fn new() -> Self {
        Self::NotStarted
    }

    /// Record a frame timestamp.
    ///
    /// Returns `None` on the priming frame, otherwise the seconds elapsed
    /// since the previous frame. Never negative: a timestamp older than the
    /// last one (or a non-finite one) counts as zero and does not rewind.
    pub fn advance(&mut self, timestamp_ms: f64) -> Option<f32> {
        if !timestamp_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp {}", timestamp_ms);
            return match self {
                FrameClock::NotStarted => None,
                FrameClock::Running { .. } => Some(0.0),
            };
        }

        match *self {
            FrameClock::NotStarted => {
                *self = FrameClock::Running {
                    last_ms: timestamp_ms,
                };
                None
            }
            FrameClock::Running { last_ms } => {
                if timestamp_ms < last_ms {
                    log::warn!(
                        "Frame timestamp went backwards ({:.3} -> {:.3} ms)",
                        last_ms,
                        timestamp_ms
                    );
                    return Some(0.0);
                }
                *self = FrameClock::Running {
                    last_ms: timestamp_ms,
                };
                Some(((timestamp_ms - last_ms) / 1000.0) as f32)
            }
        }
    }

    /// Forget the last timestamp; the next frame primes again
    pub fn reset(&mut self) {
        *self = FrameClock::NotStarted;
    }

    pub fn is_started(&self) -> bool {
        matches!(self, FrameClock::Running { .. })
    }
}
