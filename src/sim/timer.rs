//! Timed-action primitives
//!
//! Headless stand-ins for a scene engine's action scheduler: a repeating
//! timer, a linear tween and a looping frame cycle. All advance by explicit
//! `dt` so they stay deterministic under the fixed timestep.

/// Smallest accepted interval, keeps `advance` from looping forever
const MIN_INTERVAL: f32 = 1.0e-3;

/// Fires once immediately, then every `interval` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatTimer {
    interval: f32,
    remaining: f32,
}

impl RepeatTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            remaining: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Change the period; the pending wait never exceeds the new interval
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval.max(MIN_INTERVAL);
        self.remaining = self.remaining.min(self.interval);
    }

    /// Advance by `dt`, returning how many times the timer fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.remaining -= dt;
        let mut fired = 0;
        while self.remaining <= 0.0 {
            fired += 1;
            self.remaining += self.interval;
        }
        fired
    }
}

/// Linear interpolation of a scalar over a fixed duration
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance and return the new value
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }
}

/// Endlessly looping animation over `frame_count` frames
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCycle {
    frame_count: usize,
    frame_time: f32,
    elapsed: f32,
    running: bool,
}

impl FrameCycle {
    pub fn new(frame_count: usize, frame_time: f32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_time: frame_time.max(MIN_INTERVAL),
            elapsed: 0.0,
            running: true,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        let period = self.frame_time * self.frame_count as f32;
        self.elapsed = (self.elapsed + dt) % period;
    }

    /// Index of the frame currently shown
    pub fn frame(&self) -> usize {
        ((self.elapsed / self.frame_time) as usize).min(self.frame_count - 1)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}
