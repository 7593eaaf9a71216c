//! Platform abstraction layer
//!
//! Handles native/browser differences for:
//! - Frame pacing (fixed 60 Hz on desktop, animation frames on web)
//! - Storage (files on desktop, LocalStorage on web)
//! - Logging backends

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use limiter::FrameLimiter;

#[cfg(not(target_arch = "wasm32"))]
mod limiter {
    use std::time::{Duration, Instant};

    /// Sleeps out the remainder of each frame to hold a fixed rate
    #[derive(Debug)]
    pub struct FrameLimiter {
        frame: Duration,
        next: Instant,
        /// Frames where the work overran the budget
        overruns: u64,
    }

    impl FrameLimiter {
        pub fn new(rate_hz: u32) -> Self {
            let frame = Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)));
            Self {
                frame,
                next: Instant::now() + frame,
                overruns: 0,
            }
        }

        pub fn frame_duration(&self) -> Duration {
            self.frame
        }

        pub fn overruns(&self) -> u64 {
            self.overruns
        }

        /// Block until the next frame boundary
        pub fn wait(&mut self) {
            let now = Instant::now();
            if now < self.next {
                std::thread::sleep(self.next - now);
                self.next += self.frame;
            } else {
                // Behind schedule: resync instead of bursting to catch up
                self.overruns += 1;
                self.next = now + self.frame;
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_frame_duration() {
            let limiter = FrameLimiter::new(60);
            let micros = limiter.frame_duration().as_micros();
            assert!((16_660..=16_670).contains(&micros));
            assert_eq!(FrameLimiter::new(0).frame_duration(), Duration::from_secs(1));
        }

        #[test]
        fn test_wait_paces_frames() {
            let mut limiter = FrameLimiter::new(200);
            let start = Instant::now();
            for _ in 0..4 {
                limiter.wait();
            }
            assert!(start.elapsed() >= Duration::from_millis(15));
        }

        #[test]
        fn test_overrun_resyncs() {
            let mut limiter = FrameLimiter::new(1000);
            std::thread::sleep(Duration::from_millis(5));
            limiter.wait();
            assert_eq!(limiter.overruns(), 1);
        }
    }
}
