//! Zonotopes: `{ c + Σ ξ_i g_i : ξ_i ∈ [-1, 1] }`.
//!
//! Representation
//! - `center` (length `d`) and `generators` (`d × p`, one generator per column).
//! - Immutable after construction: algebra and reduction return new values.
//! - `p = 0` is allowed (a point); `order < 1` is degenerate but not rejected.
//!
//! Layout
//! - `algebra`: Minkowski sum, linear map, scaling.
//! - `membership`: support vector (right-continuous sign) and point containment.
//! - `vertices`: 2^p sign enumeration reduced by a convex hull.
//! - `reduce`: Girard's order reduction (box overapproximation).

mod algebra;
mod membership;
mod reduce;
mod vertices;

pub use algebra::{linear_map, minkowski_sum, scale};
pub use membership::{contains, support_vector, Membership};
pub use reduce::reduce_order;
pub use vertices::vertices;

use nalgebra::{convert, DMatrix, DVector, RealField};

use crate::error::{check_dim, Result, SetError};
use crate::lazyset::LazySet;

#[derive(Clone, Debug, PartialEq)]
pub struct Zonotope<N: RealField + Copy> {
    center: DVector<N>,
    generators: DMatrix<N>,
}

impl<N: RealField + Copy> Zonotope<N> {
    /// Build from a center and a `d × p` generator matrix.
    ///
    /// Fails with `DimensionMismatch` if `generators.nrows() != center.len()`.
    pub fn new(center: DVector<N>, generators: DMatrix<N>) -> Result<Self> {
        check_dim("Zonotope::new", center.len(), generators.nrows())?;
        Ok(Self { center, generators })
    }

    /// Internal constructor for parts whose dimensions already agree.
    #[inline]
    pub(crate) fn from_parts(center: DVector<N>, generators: DMatrix<N>) -> Self {
        debug_assert_eq!(center.len(), generators.nrows());
        Self { center, generators }
    }

    /// Build from a center and a list of generator vectors (columns, in order).
    pub fn from_generator_list(center: DVector<N>, generators: &[DVector<N>]) -> Result<Self> {
        let d = center.len();
        if let Some(g) = generators.iter().find(|g| g.len() != d) {
            return Err(SetError::Ragged {
                expected: d,
                found: g.len(),
            });
        }
        let generators = if generators.is_empty() {
            DMatrix::zeros(d, 0)
        } else {
            DMatrix::from_columns(generators)
        };
        Ok(Self { center, generators })
    }

    /// Axis-aligned box `center ± radius` as a zonotope with `d` generators.
    pub fn from_box(center: DVector<N>, radius: &DVector<N>) -> Result<Self> {
        check_dim("Zonotope::from_box", center.len(), radius.len())?;
        let generators = DMatrix::from_diagonal(&radius.abs());
        Ok(Self { center, generators })
    }

    #[inline]
    pub fn center(&self) -> &DVector<N> {
        &self.center
    }

    #[inline]
    pub fn generators(&self) -> &DMatrix<N> {
        &self.generators
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.center.len()
    }

    #[inline]
    pub fn num_generators(&self) -> usize {
        self.generators.ncols()
    }

    /// Order `p / d`. Zero-dimensional zonotopes report order 0.
    pub fn order(&self) -> N {
        if self.dim() == 0 {
            return N::zero();
        }
        convert::<f64, N>(self.num_generators() as f64) / convert::<f64, N>(self.dim() as f64)
    }

    /// Tightest axis-aligned box `(low, high)` containing the zonotope.
    pub fn interval_hull(&self) -> (DVector<N>, DVector<N>) {
        let radius = row_abs_sums(&self.generators, 0..self.num_generators());
        (&self.center - &radius, &self.center + &radius)
    }
}

impl<N: RealField + Copy> LazySet<N> for Zonotope<N> {
    fn dim(&self) -> usize {
        Zonotope::dim(self)
    }

    fn support_vector(&self, d: &DVector<N>) -> Result<DVector<N>> {
        Zonotope::support_vector(self, d)
    }
}

/// `Σ_j |g_j[i]|` over the selected columns, per row `i`.
pub(crate) fn row_abs_sums<N: RealField + Copy>(
    generators: &DMatrix<N>,
    cols: impl IntoIterator<Item = usize>,
) -> DVector<N> {
    let mut acc = DVector::zeros(generators.nrows());
    for j in cols {
        acc += generators.column(j).abs();
    }
    acc
}
