//! Structural combinators over center/generators (no enumeration, no solves).

use nalgebra::{DMatrix, RealField};

use super::Zonotope;
use crate::error::{check_dim, Result};

impl<N: RealField + Copy> Zonotope<N> {
    /// Minkowski sum `self ⊕ other`.
    ///
    /// Centers add; generator matrices are concatenated with `self`'s columns first.
    pub fn minkowski_sum(&self, other: &Self) -> Result<Self> {
        check_dim("minkowski_sum", self.dim(), other.dim())?;
        let p1 = self.num_generators();
        let p2 = other.num_generators();
        let mut generators = DMatrix::zeros(self.dim(), p1 + p2);
        generators.columns_mut(0, p1).copy_from(&self.generators);
        generators.columns_mut(p1, p2).copy_from(&other.generators);
        Ok(Self {
            center: &self.center + &other.center,
            generators,
        })
    }

    /// Image under the linear map `x ↦ M x`; `M` may change the dimension.
    pub fn linear_map(&self, m: &DMatrix<N>) -> Result<Self> {
        check_dim("linear_map", self.dim(), m.ncols())?;
        Ok(Self {
            center: m * &self.center,
            generators: m * &self.generators,
        })
    }

    /// Uniform scaling by `alpha` (any sign, zero included).
    pub fn scale(&self, alpha: N) -> Self {
        Self {
            center: &self.center * alpha,
            generators: &self.generators * alpha,
        }
    }
}

/// Free-function form of [`Zonotope::minkowski_sum`].
#[inline]
pub fn minkowski_sum<N: RealField + Copy>(z1: &Zonotope<N>, z2: &Zonotope<N>) -> Result<Zonotope<N>> {
    z1.minkowski_sum(z2)
}

/// Free-function form of [`Zonotope::linear_map`].
#[inline]
pub fn linear_map<N: RealField + Copy>(m: &DMatrix<N>, z: &Zonotope<N>) -> Result<Zonotope<N>> {
    z.linear_map(m)
}

/// Free-function form of [`Zonotope::scale`].
#[inline]
pub fn scale<N: RealField + Copy>(alpha: N, z: &Zonotope<N>) -> Zonotope<N> {
    z.scale(alpha)
}
