//! Vertical physics for the player
//!
//! Constant gravity plus a jump that *sets* velocity. Position and velocity
//! are deliberately unclamped here; leaving the playfield is handled by the
//! boundary rule in `collision`.

use super::state::{MAX_TILT_DEGREES, Player};

/// Tilt for a given vertical velocity (3° per pixel/tick, clamped)
#[inline]
pub fn tilt_for(velocity: f32) -> f32 {
    (velocity * 3.0).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES)
}

/// Apply a jump: velocity becomes the impulse, never accumulates
#[inline]
pub fn jump(player: &mut Player, impulse: f32) {
    player.velocity = impulse;
}

/// Advance one tick of gravity: `v += g; y += v`
pub fn integrate(player: &mut Player, gravity: f32) {
    player.velocity += gravity;
    player.y += player.velocity;
    player.angle = tilt_for(player.velocity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_accumulates() {
        let mut player = Player::new(384.0);
        let mut expected_y = 384.0;
        for i in 1..=10 {
            integrate(&mut player, 0.5);
            expected_y += 0.5 * i as f32;
        }
        assert_eq!(player.velocity, 5.0);
        assert_eq!(player.y, expected_y);
        assert_eq!(player.y, 411.5);
    }

    #[test]
    fn test_jump_sets_velocity() {
        let mut player = Player::new(300.0);
        player.velocity = 12.0;
        jump(&mut player, -8.0);
        assert_eq!(player.velocity, -8.0);
        jump(&mut player, -8.0);
        assert_eq!(player.velocity, -8.0);
    }

    #[test]
    fn test_tilt_is_clamped() {
        assert_eq!(tilt_for(0.0), 0.0);
        assert_eq!(tilt_for(5.0), 15.0);
        assert_eq!(tilt_for(-8.0), -24.0);
        assert_eq!(tilt_for(40.0), 45.0);
        assert_eq!(tilt_for(-40.0), -45.0);
    }

    #[test]
    fn test_no_velocity_cap() {
        let mut player = Player::new(0.0);
        for _ in 0..1000 {
            integrate(&mut player, 0.65);
        }
        assert!(player.velocity > 600.0);
        assert_eq!(player.angle, MAX_TILT_DEGREES);
    }
}
