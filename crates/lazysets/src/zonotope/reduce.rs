//! Girard order reduction.
//!
//! Algorithm (target order `r`, dimension `d`, `p` generators)
//! - No-op if `r · d >= p`.
//! - Score each generator by `‖g‖₁ − ‖g‖∞` (zero for axis-aligned generators).
//! - Take the `m = p − ⌊d (r − 1)⌋` lowest scores (stable on ties) and replace
//!   them by their interval hull: the diagonal box with entries `Σ |g_j[i]|`.
//! - Result: kept generators in original order, then the `d` box columns.
//!
//! The result always contains the input (overapproximation) and has at most
//! `p − m + d ≤ ⌊r d⌋` generators, so a second call with the same `r` is a no-op.

use std::cmp::Ordering;

use nalgebra::{convert, try_convert, DMatrix, RealField};

use super::{row_abs_sums, Zonotope};
use crate::error::{Result, SetError};

impl<N: RealField + Copy> Zonotope<N> {
    /// Overapproximate with at most `⌊r · d⌋` generators.
    ///
    /// Fails with `InvalidOrder` if reduction is needed and `r` is not a finite
    /// value `>= 1`.
    pub fn reduce_order(&self, r: N) -> Result<Self> {
        let d = self.dim();
        let p = self.num_generators();
        let d_n = convert::<f64, N>(d as f64);
        if r * d_n >= convert::<f64, N>(p as f64) {
            tracing::trace!(dim = d, generators = p, "order reduction not needed");
            return Ok(self.clone());
        }
        if !r.is_finite() || r < N::one() {
            return Err(SetError::InvalidOrder {
                order: try_convert::<N, f64>(r).unwrap_or(f64::NAN),
            });
        }

        let scores: Vec<N> = self
            .generators
            .column_iter()
            .map(|g| g.lp_norm(1) - g.amax())
            .collect();
        let mut by_score: Vec<usize> = (0..p).collect();
        by_score.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));

        let keep_budget = try_convert::<N, f64>((d_n * (r - N::one())).floor())
            .map(|k| k as usize)
            .unwrap_or(0);
        let m = p.saturating_sub(keep_budget).clamp(1, p);
        let (reduced, kept) = by_score.split_at(m);
        let mut kept = kept.to_vec();
        kept.sort_unstable();

        let radius = row_abs_sums(&self.generators, reduced.iter().copied());
        let mut generators = DMatrix::zeros(d, kept.len() + d);
        for (k, &j) in kept.iter().enumerate() {
            generators.set_column(k, &self.generators.column(j));
        }
        generators
            .view_mut((0, kept.len()), (d, d))
            .set_diagonal(&radius);

        tracing::debug!(
            dim = d,
            generators = p,
            reduced = m,
            result = generators.ncols(),
            "girard order reduction"
        );
        Ok(Self {
            center: self.center.clone(),
            generators,
        })
    }
}

/// Free-function form of [`Zonotope::reduce_order`].
#[inline]
pub fn reduce_order<N: RealField + Copy>(z: &Zonotope<N>, r: N) -> Result<Zonotope<N>> {
    z.reduce_order(r)
}
