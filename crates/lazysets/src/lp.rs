//! Phase-one simplex for equality systems with unit box bounds.
//!
//! Decides whether `{ξ : A ξ = b, -1 ≤ ξ ≤ 1}` is non-empty and returns a point
//! of it. The shift `y = ξ + 1` moves the bounds to `[0, 2]`; the upper bounds
//! become slack rows and every equality row gets an artificial variable.
//! Minimising the sum of artificials with Bland's rule either drives it to zero
//! (a feasible `ξ`) or leaves it positive (no solution in the box).
//!
//! Tableau layout: columns `[y (p) | slack (p) | artificial (d) | rhs]`, rows
//! `[equalities (d) | upper bounds (p)]`. Dense, so intended for the small
//! systems of zonotope membership.

use nalgebra::{DMatrix, DVector, RealField};

/// A point of `{ξ : a ξ = b, ‖ξ‖∞ ≤ 1}` when the phase-one optimum is within `eps`.
///
/// The caller should re-check the residual; this only decides feasibility up
/// to pivoting round-off.
pub(crate) fn unit_box_solution<N: RealField + Copy>(
    a: &DMatrix<N>,
    b: &DVector<N>,
    eps: N,
) -> Option<DVector<N>> {
    let (d, p) = a.shape();
    let two = N::one() + N::one();
    let rows = d + p;
    let cols = 2 * p + d;
    let rhs = cols;
    let shifted = b + a.column_sum();

    let mut t = DMatrix::<N>::zeros(rows, cols + 1);
    for i in 0..d {
        // Keep every right-hand side non-negative so the artificials start feasible.
        let flip = if shifted[i] < N::zero() {
            -N::one()
        } else {
            N::one()
        };
        for j in 0..p {
            t[(i, j)] = flip * a[(i, j)];
        }
        t[(i, 2 * p + i)] = N::one();
        t[(i, rhs)] = flip * shifted[i];
    }
    for j in 0..p {
        t[(d + j, j)] = N::one();
        t[(d + j, p + j)] = N::one();
        t[(d + j, rhs)] = two;
    }
    let mut basis: Vec<usize> = (0..d)
        .map(|i| 2 * p + i)
        .chain((0..p).map(|j| p + j))
        .collect();

    // Reduced costs of the artificial sum; the last entry is minus the objective.
    let mut cost = DVector::<N>::zeros(cols + 1);
    for i in 0..d {
        for k in (0..2 * p).chain(std::iter::once(rhs)) {
            cost[k] = cost[k] - t[(i, k)];
        }
    }

    let scale = if t.amax() > N::one() { t.amax() } else { N::one() };
    let tol = eps * scale;
    let limit = 50 * (rows + cols);
    for _ in 0..limit {
        let Some(enter) = (0..cols).find(|&k| cost[k] < -tol) else {
            if -cost[rhs] > tol {
                return None;
            }
            let mut xi = DVector::from_element(p, -N::one());
            for (i, &k) in basis.iter().enumerate() {
                if k < p {
                    xi[k] = t[(i, rhs)] - N::one();
                }
            }
            return Some(xi);
        };
        let mut leave: Option<(usize, N)> = None;
        for i in 0..rows {
            let coef = t[(i, enter)];
            if coef <= tol {
                continue;
            }
            let ratio = t[(i, rhs)] / coef;
            let better = match leave {
                None => true,
                Some((l, best)) => ratio < best || (ratio == best && basis[i] < basis[l]),
            };
            if better {
                leave = Some((i, ratio));
            }
        }
        // Phase one is bounded below, so a missing pivot row is numerical trouble.
        let (row, _) = leave?;
        pivot(&mut t, &mut cost, row, enter);
        basis[row] = enter;
    }
    tracing::debug!(rows, cols, limit, "phase-one simplex hit the pivot limit");
    None
}

fn pivot<N: RealField + Copy>(t: &mut DMatrix<N>, cost: &mut DVector<N>, row: usize, col: usize) {
    let width = t.ncols();
    let inv = N::one() / t[(row, col)];
    for k in 0..width {
        t[(row, k)] = t[(row, k)] * inv;
    }
    for i in 0..t.nrows() {
        let f = t[(i, col)];
        if i == row || f == N::zero() {
            continue;
        }
        for k in 0..width {
            t[(i, k)] = t[(i, k)] - f * t[(row, k)];
        }
    }
    let f = cost[col];
    for k in 0..width {
        cost[k] = cost[k] - f * t[(row, k)];
    }
}
