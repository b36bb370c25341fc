//! Fixed frame-rate pacing
//!
//! Sleeps the host thread until the next tick boundary. Never called from
//! inside a tick.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    next: Instant,
}

impl FramePacer {
    /// `ticks_per_second` must be non-zero (checked by `Settings::validate`)
    pub fn new(ticks_per_second: u32) -> Self {
        let frame = Duration::from_secs(1) / ticks_per_second.max(1);
        Self {
            frame,
            next: Instant::now() + frame,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Block until the next boundary. A host that fell more than a frame
    /// behind resynchronizes instead of running a burst of catch-up frames.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.frame;
        } else {
            if now - self.next > self.frame {
                log::debug!("Frame overran by {:?}, resyncing", now - self.next);
            }
            self.next = now + self.frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        let pacer = FramePacer::new(60);
        assert_eq!(pacer.frame_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_wait_paces_frames() {
        let mut pacer = FramePacer::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait();
        }
        // Four 5ms frames
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
