//! The `LazySet` capability contract.
//!
//! A convex set is known through its support vector: the point that maximizes
//! a linear direction. Set variants implement this trait directly; generic
//! consumers (support function, bounding boxes) only ever call through it.

use nalgebra::{DVector, RealField};

use crate::error::Result;

pub trait LazySet<N: RealField + Copy> {
    /// Ambient dimension.
    fn dim(&self) -> usize;

    /// A point of the set maximizing `⟨d, x⟩`.
    ///
    /// Fails with `DimensionMismatch` when `d.len() != self.dim()`.
    fn support_vector(&self, d: &DVector<N>) -> Result<DVector<N>>;

    /// Support function ρ(d) = ⟨d, σ(d)⟩.
    fn support_function(&self, d: &DVector<N>) -> Result<N> {
        let sv = self.support_vector(d)?;
        Ok(d.dot(&sv))
    }
}

/// Free-function form of ρ for generic callers.
#[inline]
pub fn support_function<N, S>(d: &DVector<N>, set: &S) -> Result<N>
where
    N: RealField + Copy,
    S: LazySet<N> + ?Sized,
{
    set.support_function(d)
}
