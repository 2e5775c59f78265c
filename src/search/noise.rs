use rand::Rng;

use crate::search::difficulty::Difficulty;

/// Random bonus added to a root move's player-relative score so weaker
/// levels do not always pick the same move. Zero for Hard and Expert.
pub fn difficulty_noise<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> i32 {
    let step = difficulty.noise_step();
    if step == 0 {
        return 0;
    }
    rng.gen_range(0..=5) * step
}

/// Tie breaker between equally scored root moves.
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}
