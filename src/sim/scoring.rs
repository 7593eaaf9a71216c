//! Pass scoring, combos, coins, and speed escalation
//!
//! A pass is graded by how far the player's centre is from the gap centre.
//! Perfect and near-miss passes extend the combo; a plain pass breaks it.

use super::state::{GameEvent, PassKind, SessionState};

/// Deviation below which a pass is perfect
pub const PERFECT_DEVIATION: f32 = 10.0;
/// Deviation below which a pass is a near miss
pub const NEAR_MISS_DEVIATION: f32 = 30.0;
/// Speed escalates each time the score crosses a multiple of this
pub const SPEED_STEP_SCORE: u32 = 10;

/// Grade a pass. Lower bounds are inclusive: 10 is a near miss, 30 is plain.
pub fn classify(deviation: f32) -> PassKind {
    if deviation < PERFECT_DEVIATION {
        PassKind::Perfect
    } else if deviation < NEAR_MISS_DEVIATION {
        PassKind::NearMiss
    } else {
        PassKind::Plain
    }
}

impl PassKind {
    /// Base point plus bonus, before the difficulty multiplier
    pub fn base_points(&self) -> u32 {
        match self {
            PassKind::Perfect => 3,
            PassKind::NearMiss => 2,
            PassKind::Plain => 1,
        }
    }
}

/// Coins for a pass at the given (post-pass) combo
#[inline]
pub fn coin_award(combo: u32, multiplier: u32) -> u32 {
    (1 + combo / 3) * multiplier
}

/// Number of multiples of `SPEED_STEP_SCORE` in `(old, new]`
#[inline]
pub fn thresholds_crossed(old: u32, new: u32) -> u32 {
    (new / SPEED_STEP_SCORE).saturating_sub(old / SPEED_STEP_SCORE)
}

impl SessionState {
    /// Score a pipe passed with the given centre deviation.
    ///
    /// Pushes the pass and any speed-up onto `events`.
    pub fn apply_pass(&mut self, deviation: f32, events: &mut Vec<GameEvent>) {
        let kind = classify(deviation);
        let multiplier = self.profile.score_multiplier;
        let points = kind.base_points() * multiplier;

        let old_score = self.score;
        self.score += points;

        match kind {
            PassKind::Perfect => {
                self.combo += 1;
                self.perfect_passes += 1;
            }
            PassKind::NearMiss => {
                self.combo += 1;
                self.near_misses += 1;
            }
            PassKind::Plain => self.combo = 0,
        }
        self.max_combo = self.max_combo.max(self.combo);

        let coins = coin_award(self.combo, multiplier);
        self.coins_earned += coins;

        events.push(GameEvent::Passed {
            kind,
            points,
            coins,
            combo: self.combo,
        });

        let crossed = thresholds_crossed(old_score, self.score);
        if crossed > 0 {
            let before = self.speed;
            self.speed += self.profile.speed_increment * crossed as f32;
            debug_assert!(self.speed >= before, "speed decreased");
            log::debug!("Score {} -> speed {:.1}", self.score, self.speed);
            events.push(GameEvent::SpeedUp { speed: self.speed });
        }
    }
}
