//! Gene vector operators.
//!
//! A gene vector is one weight per field feature. Genes live in
//! `[0.0, max_weight]`; every operator here clamps its output to that range.

use genetris_evaluator::features::FEATURE_COUNT;
use rand::Rng;
use rand_distr::Normal;

pub type Genes = [f32; FEATURE_COUNT];

/// Samples every gene uniformly from `[0.0, max_weight)`.
///
/// ```
/// use genetris_training::genes;
///
/// let genes = genes::random(&mut rand::rng(), 1.0);
/// assert!(genes.iter().all(|g| (0.0..1.0).contains(g)));
/// ```
pub fn random<R>(rng: &mut R, max_weight: f32) -> Genes
where
    R: Rng + ?Sized,
{
    std::array::from_fn(|_| rng.random_range(0.0..max_weight))
}

/// BLX-α crossover.
///
/// Each child gene is sampled uniformly from the parents' interval widened by
/// `alpha` times its length on both sides, then clamped to `[0.0, max_weight]`.
pub fn blx_alpha<R>(p1: &Genes, p2: &Genes, alpha: f32, max_weight: f32, rng: &mut R) -> Genes
where
    R: Rng + ?Sized,
{
    std::array::from_fn(|i| {
        let min = f32::min(p1[i], p2[i]);
        let max = f32::max(p1[i], p2[i]);
        let d = max - min;
        rng.random_range((min - alpha * d)..=(max + alpha * d))
            .clamp(0.0, max_weight)
    })
}

/// Gaussian mutation: with probability `rate`, adds `N(0, sigma)` noise to a
/// gene.
///
/// # Panics
///
/// Panics if `sigma` is negative or not finite, or if `rate` is outside
/// `[0.0, 1.0]`.
pub fn mutate<R>(genes: &mut Genes, sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, sigma).expect("mutation sigma must be finite and non-negative");
    for gene in genes {
        if rng.random_bool(rate.into()) {
            *gene = (*gene + rng.sample(normal)).clamp(0.0, max_weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_random_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let genes = random(&mut rng, 2.0);
            assert!(genes.iter().all(|g| (0.0..2.0).contains(g)));
        }
    }

    #[test]
    fn test_blx_alpha_identical_parents() {
        let parent = [0.1, 0.2, 0.3, 0.4, 0.5];
        let child = blx_alpha(&parent, &parent, 0.5, 1.0, &mut rng());
        assert_eq!(child, parent);
    }

    #[test]
    fn test_blx_alpha_stays_in_widened_range() {
        let p1 = [0.2; FEATURE_COUNT];
        let p2 = [0.6; FEATURE_COUNT];
        let mut rng = rng();
        for _ in 0..100 {
            let child = blx_alpha(&p1, &p2, 0.5, 1.0, &mut rng);
            assert!(child.iter().all(|g| (0.0..=0.81).contains(g)), "{child:?}");
        }
    }

    #[test]
    fn test_mutate_rate_zero_is_identity() {
        let mut genes = [0.5; FEATURE_COUNT];
        mutate(&mut genes, 1.0, 1.0, 0.0, &mut rng());
        assert_eq!(genes, [0.5; FEATURE_COUNT]);
    }

    #[test]
    fn test_mutate_clamps() {
        let mut rng = rng();
        for _ in 0..100 {
            let mut genes = [0.5; FEATURE_COUNT];
            mutate(&mut genes, 10.0, 1.0, 1.0, &mut rng);
            assert!(genes.iter().all(|g| (0.0..=1.0).contains(g)));
        }
    }
}
