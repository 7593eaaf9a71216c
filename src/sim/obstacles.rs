//! Pipe stream: scroll, evict, spawn
//!
//! Pipes are appended at the back and evicted from the front. All pipes move
//! at the same speed, so the front is always the leftmost pipe and eviction
//! never has to look past it.

use super::rng::RandomSource;
use super::state::{Obstacle, SessionState};

impl SessionState {
    /// Append a pipe at the right edge with a random gap top
    pub fn spawn_obstacle(&mut self, rng: &mut dyn RandomSource) {
        let (low, high) = self.config.gap_top_range(self.profile.gap);
        let gap_top = rng.range_u32(low, high);
        self.obstacles.push_back(Obstacle::new(self.config.width, gap_top));
    }

    /// Scroll every pipe left by the current speed, drop pipes that have
    /// fully left the playfield, and spawn when the newest pipe is far
    /// enough in.
    pub fn advance_obstacles(&mut self, rng: &mut dyn RandomSource) {
        let speed = self.speed;
        for obstacle in self.obstacles.iter_mut() {
            obstacle.x -= speed;
        }

        let width = self.config.obstacle_width;
        while self.obstacles.front().is_some_and(|o| o.x <= -width) {
            self.obstacles.pop_front();
        }

        let threshold = self.config.width - self.config.obstacle_spacing;
        if self.obstacles.back().is_none_or(|o| o.x < threshold) {
            self.spawn_obstacle(rng);
        }

        debug_assert!(
            self.obstacles.iter().all(|o| o.x > -width),
            "off-screen pipe survived eviction"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRng, SeededRng};
    use crate::tuning::Difficulty;

    #[test]
    fn test_scroll_by_speed() {
        let mut rng = ScriptedRng::constant(200);
        let mut state = SessionState::new(Difficulty::Normal, &mut rng).unwrap();
        state.advance_obstacles(&mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 1024.0 - 3.5);
    }

    #[test]
    fn test_spawn_after_spacing() {
        let mut rng = ScriptedRng::new(vec![120, 340]);
        let mut state = SessionState::new(Difficulty::Normal, &mut rng).unwrap();
        state.speed = 10.0;

        // 1024 - 300 = 724; after 30 ticks x = 724 (not yet below)
        for _ in 0..30 {
            state.advance_obstacles(&mut rng);
        }
        assert_eq!(state.obstacles.len(), 1);

        state.advance_obstacles(&mut rng);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[1], Obstacle::new(1024.0, 340));
    }

    #[test]
    fn test_evict_off_screen() {
        let mut rng = ScriptedRng::constant(150);
        let mut state = SessionState::new(Difficulty::Easy, &mut rng).unwrap();
        state.obstacles[0].x = -66.0;
        state.obstacles.push_back(Obstacle::new(800.0, 150));
        state.speed = 4.0;

        state.advance_obstacles(&mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 796.0);
    }

    #[test]
    fn test_gap_top_within_bounds() {
        let mut rng = SeededRng::new(2024);
        let mut state = SessionState::new(Difficulty::Easy, &mut rng).unwrap();
        state.speed = 50.0;
        for _ in 0..2000 {
            state.advance_obstacles(&mut rng);
            for o in &state.obstacles {
                assert!(o.gap_top >= 100);
                assert!(o.gap_top < 768 - 220 - 100);
            }
        }
    }

    #[test]
    fn test_stream_invariants_hold() {
        let mut rng = SeededRng::new(99);
        let mut state = SessionState::new(Difficulty::Hardcore, &mut rng).unwrap();
        for tick in 0..5000 {
            if tick % 500 == 0 {
                state.speed += 0.7;
            }
            state.advance_obstacles(&mut rng);
            let back = state.obstacles.back().unwrap();
            assert!(back.x >= 1024.0 - 300.0 - state.speed);
            assert!(state.obstacles.iter().all(|o| o.x > -70.0));
            let xs: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
