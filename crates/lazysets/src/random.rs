//! Random zonotopes (uniform entries + replay tokens).
//!
//! Model
//! - Center entries uniform in `[-center_bound, center_bound]`, generator entries
//!   uniform in `[-generator_bound, generator_bound]`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG, so
//!   a stream of draws can be replayed one sample at a time.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::zonotope::Zonotope;

/// Sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZonoRandCfg {
    pub dim: usize,
    pub generators: usize,
    pub center_bound: f64,
    pub generator_bound: f64,
}

impl Default for ZonoRandCfg {
    fn default() -> Self {
        Self {
            dim: 2,
            generators: 6,
            center_bound: 1.0,
            generator_bound: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random zonotope; the same `(cfg, tok)` always yields the same set.
pub fn draw_zonotope(cfg: ZonoRandCfg, tok: ReplayToken) -> Zonotope<f64> {
    let mut rng = tok.to_std_rng();
    let cb = cfg.center_bound.abs();
    let gb = cfg.generator_bound.abs();
    let center = DVector::from_fn(cfg.dim, |_, _| uniform(&mut rng, cb));
    let generators = DMatrix::from_fn(cfg.dim, cfg.generators, |_, _| uniform(&mut rng, gb));
    Zonotope::from_parts(center, generators)
}

#[inline]
fn uniform<R: Rng>(rng: &mut R, bound: f64) -> f64 {
    if bound == 0.0 {
        return 0.0;
    }
    rng.gen_range(-bound..=bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let cfg = ZonoRandCfg {
            dim: 3,
            generators: 5,
            ..ZonoRandCfg::default()
        };
        let tok = ReplayToken { seed: 42, index: 7 };
        let z1 = draw_zonotope(cfg, tok);
        let z2 = draw_zonotope(cfg, tok);
        assert_eq!(z1, z2);
        assert_eq!(z1.dim(), 3);
        assert_eq!(z1.num_generators(), 5);
        assert_ne!(draw_zonotope(cfg, tok.next()), z1);
    }

    #[test]
    fn entries_respect_bounds() {
        let cfg = ZonoRandCfg {
            dim: 4,
            generators: 10,
            center_bound: 0.5,
            generator_bound: 2.0,
        };
        let z = draw_zonotope(cfg, ReplayToken::new(3));
        assert!(z.center().amax() <= 0.5);
        assert!(z.generators().amax() <= 2.0);
    }

    #[test]
    fn zero_bounds_give_the_origin() {
        let cfg = ZonoRandCfg {
            center_bound: 0.0,
            generator_bound: 0.0,
            ..ZonoRandCfg::default()
        };
        let z = draw_zonotope(cfg, ReplayToken::new(1));
        assert_eq!(z.vertices().unwrap(), vec![DVector::zeros(2)]);
    }
}
