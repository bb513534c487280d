//! Attack/hold/release amplitude envelope.

/// Peak amplitude of a note.
pub const PEAK_LEVEL: f64 = 0.3;

/// Attack ramp length in seconds.
pub const ATTACK_SECS: f64 = 0.02;

/// Release ramp length in seconds.
pub const RELEASE_SECS: f64 = 0.1;

/// A piecewise-linear amplitude envelope over one note: ramp up over the
/// attack, hold at peak, ramp down over the release.
///
/// Boundaries are clamped so the schedule never decreases —
/// `0 <= attack_end <= release_start <= duration` holds for every duration,
/// including notes shorter than the attack and release windows combined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    attack_end: f64,
    release_start: f64,
    duration: f64,
}

impl Envelope {
    pub fn new(duration: f64) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        let attack_end = ATTACK_SECS.min(duration);
        let release_start = (duration - RELEASE_SECS).clamp(attack_end, duration);
        Self {
            attack_end,
            release_start,
            duration,
        }
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// End of the attack ramp, seconds from note start.
    pub fn attack_end(&self) -> f64 {
        self.attack_end
    }

    /// Start of the release ramp, seconds from note start.
    pub fn release_start(&self) -> f64 {
        self.release_start
    }

    /// Amplitude at `t` seconds from note start.
    pub fn level(&self, t: f64) -> f64 {
        if t < 0.0 || t >= self.duration {
            return 0.0;
        }
        if t < self.attack_end {
            PEAK_LEVEL * t / self.attack_end
        } else if t < self.release_start {
            PEAK_LEVEL
        } else {
            let tail = self.duration - self.release_start;
            if tail <= 0.0 {
                0.0
            } else {
                PEAK_LEVEL * (self.duration - t) / tail
            }
        }
    }
}
