use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn stage_multiplier(stage: i32) -> f32 {
    let s = stage.clamp(-6, 6);
    if s >= 0 {
        (2.0 + s as f32) / 2.0
    } else {
        2.0 / (2.0 - s as f32)
    }
}

/// Seedable source for every roll in a battle. Feed the returned closure
/// to the coordinator and reuse the seed to reproduce the whole battle.
pub fn rng_from_seed(seed: u64) -> impl FnMut() -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    move || rng.random::<f64>()
}
