//! Collision geometry
//!
//! Axis-aligned boxes for the player and pipes, plus the vertical boundary
//! rule. Overlap is strict: boxes that only share an edge do not collide.

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::tuning::SessionConfig;

/// Axis-aligned bounding box (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    /// Strict overlap test
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The player's box in its fixed lane
pub fn player_box(player: &Player, config: &SessionConfig) -> Aabb {
    Aabb::new(config.player_x, player.y, config.player_size, config.player_size)
}

/// Upper and lower pipe boxes for an obstacle
pub fn obstacle_boxes(obstacle: &Obstacle, gap: u32, config: &SessionConfig) -> [Aabb; 2] {
    let top = obstacle.gap_top as f32;
    let bottom = top + gap as f32;
    [
        Aabb::new(obstacle.x, 0.0, config.obstacle_width, top),
        Aabb::new(obstacle.x, bottom, config.obstacle_width, config.height - bottom),
    ]
}

/// Does the player overlap either half of the pipe?
pub fn hits_obstacle(
    player: &Player,
    obstacle: &Obstacle,
    gap: u32,
    config: &SessionConfig,
) -> bool {
    let bird = player_box(player, config);
    obstacle_boxes(obstacle, gap, config)
        .iter()
        .any(|pipe| bird.intersects(pipe))
}

/// Outside the playfield: `y < 0 || y > height`. Both edges themselves are inside.
#[inline]
pub fn out_of_bounds(y: f32, height: f32) -> bool {
    y < 0.0 || y > height
}

/// Has the pipe's trailing edge moved behind the player's lane?
#[inline]
pub fn trailing_edge_passed(obstacle: &Obstacle, config: &SessionConfig) -> bool {
    obstacle.x + config.obstacle_width < config.player_x
}
