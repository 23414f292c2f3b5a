//! Support vector and point containment.
//!
//! - `support_vector`: `c + G · sign⁺(Gᵀ d)` where `sign⁺(0) = +1`, so the zero
//!   direction (and every tie) picks `ξ_i = +1`.
//! - `membership`: solve `G ξ = x - c` and test `ξ ∈ [-1, 1]^p`. Square
//!   non-singular systems use LU; everything else goes through the SVD
//!   minimum-norm least-squares solution, accepted only if its residual is
//!   within `eps_feas`. When the solution is not unique (rank below `p`) and the
//!   minimum-norm one leaves the box, a phase-one simplex searches the whole
//!   solution set for a point inside the box.

use nalgebra::{convert, DVector, RealField};

use super::Zonotope;
use crate::cfg::SetCfg;
use crate::error::{check_dim, Result};
use crate::lp::unit_box_solution;

/// Outcome of the membership solve.
#[derive(Clone, Debug, PartialEq)]
pub enum Membership<N: RealField + Copy> {
    /// Solved and every coefficient lies in `[-1, 1]`.
    Feasible { xi: DVector<N> },
    /// Solvable, but no solution lies in the box; `xi` is the minimum-norm one.
    OutOfBox { xi: DVector<N> },
    /// Singular with inconsistent right-hand side, or the solver failed.
    Unsolved,
}

impl<N: RealField + Copy> Membership<N> {
    #[inline]
    pub fn is_member(&self) -> bool {
        matches!(self, Membership::Feasible { .. })
    }

    /// Coefficients of the solve, when there is one.
    pub fn coefficients(&self) -> Option<&DVector<N>> {
        match self {
            Membership::Feasible { xi } | Membership::OutOfBox { xi } => Some(xi),
            Membership::Unsolved => None,
        }
    }
}

/// Right-continuous sign: `+1` for `x >= 0`, `-1` otherwise.
#[inline]
pub(crate) fn sign_cadlag<N: RealField + Copy>(x: N) -> N {
    if x >= N::zero() {
        N::one()
    } else {
        -N::one()
    }
}

impl<N: RealField + Copy> Zonotope<N> {
    /// Support vector in direction `d`.
    pub fn support_vector(&self, d: &DVector<N>) -> Result<DVector<N>> {
        check_dim("support_vector", self.dim(), d.len())?;
        let signs = self.generators.tr_mul(d).map(sign_cadlag);
        Ok(&self.center + &self.generators * signs)
    }

    /// Point containment with default tolerances.
    pub fn contains(&self, x: &DVector<N>) -> Result<bool> {
        self.contains_with(x, &SetCfg::default())
    }

    pub fn contains_with(&self, x: &DVector<N>, cfg: &SetCfg) -> Result<bool> {
        Ok(self.membership_with(x, cfg)?.is_member())
    }

    /// Membership outcome with default tolerances.
    pub fn membership(&self, x: &DVector<N>) -> Result<Membership<N>> {
        self.membership_with(x, &SetCfg::default())
    }

    pub fn membership_with(&self, x: &DVector<N>, cfg: &SetCfg) -> Result<Membership<N>> {
        check_dim("contains", self.dim(), x.len())?;
        let b = x - &self.center;
        let Some((xi, unique)) = self.solve_coefficients(&b, cfg) else {
            tracing::debug!(
                dim = self.dim(),
                generators = self.num_generators(),
                "membership solve unsolved"
            );
            return Ok(Membership::Unsolved);
        };
        if in_unit_box(&xi, cfg) {
            return Ok(Membership::Feasible { xi });
        }
        if !unique {
            let alt = unit_box_solution(&self.generators, &b, convert(cfg.eps_feas))
                .filter(|alt| in_unit_box(alt, cfg) && self.residual_ok(alt, &b, cfg));
            tracing::trace!(
                generators = self.num_generators(),
                found = alt.is_some(),
                "box search after least-norm miss"
            );
            if let Some(xi) = alt {
                return Ok(Membership::Feasible { xi });
            }
        }
        Ok(Membership::OutOfBox { xi })
    }

    /// Solve `G ξ = b`; `None` if no solution within tolerance. The flag tells
    /// whether the solution is unique (`G` has full column rank).
    fn solve_coefficients(&self, b: &DVector<N>, cfg: &SetCfg) -> Option<(DVector<N>, bool)> {
        let (d, p) = self.generators.shape();
        if d == 0 {
            return Some((DVector::zeros(p), p == 0));
        }
        if p == 0 {
            return (b.amax() <= convert::<f64, N>(cfg.eps_feas)).then(|| (DVector::zeros(0), true));
        }
        let exact = if d == p {
            self.generators.clone().lu().solve(b)
        } else {
            None
        };
        let (xi, unique) = match exact {
            Some(xi) => (xi, true),
            None => {
                let svd = self.generators.clone().svd(true, true);
                let cutoff = svd.singular_values.amax() * convert::<f64, N>(cfg.eps_rank);
                let rank = svd.singular_values.iter().filter(|s| **s > cutoff).count();
                (svd.solve(b, cutoff).ok()?, rank == p)
            }
        };
        self.residual_ok(&xi, b, cfg).then_some((xi, unique))
    }

    fn residual_ok(&self, xi: &DVector<N>, b: &DVector<N>, cfg: &SetCfg) -> bool {
        let scale = if b.amax() > N::one() { b.amax() } else { N::one() };
        let residual = (&self.generators * xi - b).amax();
        residual <= convert::<f64, N>(cfg.eps_feas) * scale
    }
}

fn in_unit_box<N: RealField + Copy>(xi: &DVector<N>, cfg: &SetCfg) -> bool {
    let bound = N::one() + convert::<f64, N>(cfg.eps_feas);
    xi.iter().all(|&v| v <= bound && v >= -bound)
}

/// Free-function form of [`Zonotope::support_vector`].
#[inline]
pub fn support_vector<N: RealField + Copy>(d: &DVector<N>, z: &Zonotope<N>) -> Result<DVector<N>> {
    z.support_vector(d)
}

/// Free-function form of [`Zonotope::contains`].
#[inline]
pub fn contains<N: RealField + Copy>(x: &DVector<N>, z: &Zonotope<N>) -> Result<bool> {
    z.contains(x)
}
