//! Sampling helpers over an explicit seeded stream.
//!
//! Every helper takes `&mut StdRng` so the caller controls draw order; the
//! generators rely on that order being fixed for reproducibility.

use crate::error::DatasetError;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Draw `Poisson(lambda)` clamped below at `floor`.
///
/// A non-positive rate short-circuits to `floor` without consuming a draw
/// (the user-item-attr family allows `lambda = 0`).
pub fn poisson_at_least(rng: &mut StdRng, lambda: f64, floor: u64) -> Result<u64, DatasetError> {
    if lambda <= 0.0 {
        return Ok(floor);
    }
    let dist = Poisson::new(lambda).map_err(|e| DatasetError::InvalidParameter {
        name: "lambda",
        reason: format!("not a valid Poisson rate: {e}"),
    })?;
    let draw = dist.sample(rng) as u64;
    Ok(draw.max(floor))
}

/// Uniformly sample `amount` distinct indices from `0..len` without
/// replacement. `amount` must not exceed `len`; callers clamp first.
pub fn sample_without_replacement(rng: &mut StdRng, len: usize, amount: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, len, amount).into_vec()
}

/// One biased coin flip.
pub fn coin(rng: &mut StdRng, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn zero_rate_returns_floor_without_consuming_the_stream() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(poisson_at_least(&mut a, 0.0, 2).unwrap(), 2);
        // `a` consumed nothing, so both streams still agree.
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn poisson_respects_floor() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert!(poisson_at_least(&mut rng, 0.1, 1).unwrap() >= 1);
        }
    }

    #[test]
    fn sampling_is_without_replacement() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut picked = sample_without_replacement(&mut rng, 10, 10);
        picked.sort_unstable();
        assert_eq!(picked, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn identical_seeds_draw_identically() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                poisson_at_least(&mut a, 3.5, 1).unwrap(),
                poisson_at_least(&mut b, 3.5, 1).unwrap()
            );
        }
    }
}
