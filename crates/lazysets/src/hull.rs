//! Convex hull of a finite point cloud (returns the extreme points).
//!
//! Algorithm
//! - Dedup, then project onto the affine hull of the cloud (SVD of the
//!   difference matrix) so that flat clouds are handled in their own dimension.
//! - Rank 1: the two extreme points along the line.
//! - Rank 2: Andrew's monotone chain (CCW order).
//! - Rank r ≥ 3: enumerate r-tuples, keep supporting hyperplanes (all points on
//!   one side), and call a point a vertex iff the facets it saturates have
//!   normals spanning R^r.
//!
//! Complexity: O(n log n) for rank ≤ 2; O(C(n, r) · n) for rank ≥ 3, so the
//! higher-rank path is only for small clouds. Zonotope vertex enumeration in
//! rank ≥ 3 does not go through it; it derives facets from the generators.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use nalgebra::{convert, DMatrix, DVector, RealField, SVD};

use crate::cfg::SetCfg;

/// Extreme points of `points` with default tolerances.
pub fn convex_hull<N: RealField + Copy>(points: &[DVector<N>]) -> Vec<DVector<N>> {
    convex_hull_with(points, &SetCfg::default())
}

/// Extreme points of `points`; no ordering guarantee beyond CCW for planar clouds.
pub fn convex_hull_with<N: RealField + Copy>(
    points: &[DVector<N>],
    cfg: &SetCfg,
) -> Vec<DVector<N>> {
    let mut pts = points.to_vec();
    dedup_points_in_place(&mut pts, convert(cfg.eps_dedup));
    if pts.len() <= 1 {
        return pts;
    }
    let Some(local) = affine_coordinates(&pts, convert(cfg.eps_rank)) else {
        return vec![pts[0].clone()];
    };
    let rank = local[0].len();
    let scale = local
        .iter()
        .map(|y| y.amax())
        .fold(nalgebra::one::<N>(), |acc, v| if v > acc { v } else { acc });
    let tol = convert::<f64, N>(cfg.eps_feas) * scale;
    let keep = match rank {
        1 => extremes_on_line(&local),
        2 => monotone_chain(&local, tol * scale),
        _ => extremes_by_facets(&local, tol, convert(cfg.eps_rank)),
    };
    keep.into_iter().map(|i| pts[i].clone()).collect()
}

/// Lexicographic sort followed by removal of near-duplicate neighbours.
pub(crate) fn dedup_points_in_place<N: RealField + Copy>(points: &mut Vec<DVector<N>>, tol: N) {
    if points.len() < 2 {
        return;
    }
    points.sort_by(lex_cmp);
    points.dedup_by(|a, b| (&*a - &*b).norm() < tol);
}

fn lex_cmp<N: RealField + Copy>(a: &DVector<N>, b: &DVector<N>) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Coordinates of every point in an orthonormal basis of the cloud's affine hull.
///
/// Returns `None` when the cloud is a single point up to `eps_rank`.
fn affine_coordinates<N: RealField + Copy>(
    pts: &[DVector<N>],
    eps_rank: N,
) -> Option<Vec<DVector<N>>> {
    let base = &pts[0];
    let diffs = DMatrix::from_fn(base.len(), pts.len() - 1, |i, j| pts[j + 1][i] - base[i]);
    let svd = SVD::new(diffs, true, false);
    let u = svd.u?;
    let smax = svd.singular_values.amax();
    if smax <= N::zero() {
        return None;
    }
    let basis: Vec<usize> = svd
        .singular_values
        .iter()
        .enumerate()
        .filter(|(_, s)| **s > smax * eps_rank)
        .map(|(k, _)| k)
        .collect();
    let cols: Vec<DVector<N>> = basis.iter().map(|&k| u.column(k).into_owned()).collect();
    let frame = DMatrix::from_columns(&cols);
    Some(pts.iter().map(|p| frame.tr_mul(&(p - base))).collect())
}

fn extremes_on_line<N: RealField + Copy>(ys: &[DVector<N>]) -> Vec<usize> {
    let mut lo = 0;
    let mut hi = 0;
    for (i, y) in ys.iter().enumerate() {
        if y[0] < ys[lo][0] {
            lo = i;
        }
        if y[0] > ys[hi][0] {
            hi = i;
        }
    }
    vec![lo, hi]
}

/// Andrew's monotone chain on planar coordinates; returns indices in CCW order.
fn monotone_chain<N: RealField + Copy>(ys: &[DVector<N>], tol: N) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ys.len()).collect();
    order.sort_by(|&a, &b| lex_cmp(&ys[a], &ys[b]));
    let cross = |o: usize, a: usize, b: usize| {
        let (ox, oy) = (ys[o][0], ys[o][1]);
        (ys[a][0] - ox) * (ys[b][1] - oy) - (ys[a][1] - oy) * (ys[b][0] - ox)
    };
    let mut lower: Vec<usize> = Vec::with_capacity(order.len());
    for &p in &order {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= tol {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<usize> = Vec::with_capacity(order.len());
    for &p in order.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= tol {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn extremes_by_facets<N: RealField + Copy>(ys: &[DVector<N>], tol: N, eps_rank: N) -> Vec<usize> {
    let r = ys[0].len();
    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    let mut facets: Vec<(DVector<N>, Vec<usize>)> = Vec::new();
    for_each_combination(ys.len(), r, &mut |comb: &[usize]| {
        let Some(n) = hyperplane_normal(ys, comb, eps_rank) else {
            return;
        };
        let c = n.dot(&ys[comb[0]]);
        let mut above = false;
        let mut below = false;
        let mut tight = Vec::new();
        for (i, y) in ys.iter().enumerate() {
            let s = n.dot(y) - c;
            if s > tol {
                above = true;
            } else if s < -tol {
                below = true;
            } else {
                tight.push(i);
            }
            if above && below {
                return;
            }
        }
        let n = if above { -n } else { n };
        if seen.insert(tight.clone()) {
            facets.push((n, tight));
        }
    });
    tracing::trace!(points = ys.len(), rank = r, facets = facets.len(), "hull facets");

    (0..ys.len())
        .filter(|&i| {
            let normals: Vec<DVector<N>> = facets
                .iter()
                .filter(|(_, tight)| tight.binary_search(&i).is_ok())
                .map(|(n, _)| n.clone())
                .collect();
            normals.len() >= r && rank_of(&DMatrix::from_columns(&normals), eps_rank) == r
        })
        .collect()
}

/// Unit normal of the hyperplane through the points `comb`, if they are affinely independent.
pub(crate) fn hyperplane_normal<N: RealField + Copy>(
    ys: &[DVector<N>],
    comb: &[usize],
    eps_rank: N,
) -> Option<DVector<N>> {
    let r = comb.len();
    let o = &ys[comb[0]];
    // Square r×r with a zero last row, so the smallest singular value is always present.
    let a = DMatrix::from_fn(r, r, |i, j| {
        if i + 1 < r {
            ys[comb[i + 1]][j] - o[j]
        } else {
            N::zero()
        }
    });
    let svd = SVD::new(a, false, true);
    let vt = svd.v_t?;
    let s = &svd.singular_values;
    let smax = s.amax();
    if smax <= N::zero() {
        return None;
    }
    let null: Vec<usize> = (0..r).filter(|&k| s[k] <= smax * eps_rank).collect();
    if null.len() != 1 {
        return None;
    }
    let n = vt.row(null[0]).transpose();
    let norm = n.norm();
    Some(n / norm)
}

pub(crate) fn rank_of<N: RealField + Copy>(m: &DMatrix<N>, eps_rank: N) -> usize {
    let s = m.singular_values();
    let smax = s.amax();
    s.iter().filter(|v| **v > smax * eps_rank).count()
}

/// Visit every k-subset of `0..n` in lexicographic order.
pub(crate) fn for_each_combination(n: usize, k: usize, f: &mut impl FnMut(&[usize])) {
    fn rec(n: usize, k: usize, start: usize, cur: &mut Vec<usize>, f: &mut impl FnMut(&[usize])) {
        if cur.len() == k {
            f(cur.as_slice());
            return;
        }
        for i in start..n {
            cur.push(i);
            rec(n, k, i + 1, cur, f);
            cur.pop();
        }
    }
    if k == 0 || k > n {
        return;
    }
    let mut cur = Vec::with_capacity(k);
    rec(n, k, 0, &mut cur, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn contains_point(hull: &[DVector<f64>], p: &DVector<f64>) -> bool {
        hull.iter().any(|q| (q - p).norm() < 1e-9)
    }

    #[test]
    fn square_drops_interior_and_edge_midpoints() {
        let pts = vec![
            dvector![0.0, 0.0],
            dvector![1.0, 0.0],
            dvector![0.5, 0.0],
            dvector![1.0, 1.0],
            dvector![0.0, 1.0],
            dvector![0.5, 0.5],
            dvector![1.0, 1.0],
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!contains_point(&hull, &dvector![0.5, 0.0]));
        assert!(!contains_point(&hull, &dvector![0.5, 0.5]));
    }

    #[test]
    fn collinear_cloud_in_3d_keeps_endpoints() {
        let pts: Vec<DVector<f64>> = (0..5)
            .map(|k| {
                let t = k as f64;
                dvector![t, 2.0 * t, -t]
            })
            .collect();
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 2);
        assert!(contains_point(&hull, &dvector![0.0, 0.0, 0.0]));
        assert!(contains_point(&hull, &dvector![4.0, 8.0, -4.0]));
    }

    #[test]
    fn cube_with_center_has_eight_vertices() {
        let mut pts = Vec::new();
        for mask in 0..8u32 {
            let s = |b: u32| if mask & (1 << b) != 0 { 1.0 } else { -1.0 };
            pts.push(dvector![s(0), s(1), s(2)]);
        }
        pts.push(dvector![0.0, 0.0, 0.0]);
        pts.push(dvector![1.0, 0.0, 0.0]);
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 8);
        assert!(!contains_point(&hull, &dvector![1.0, 0.0, 0.0]));
    }

    #[test]
    fn planar_cloud_embedded_in_3d() {
        let pts = vec![
            dvector![0.0, 0.0, 1.0],
            dvector![2.0, 0.0, 1.0],
            dvector![0.0, 2.0, 1.0],
            dvector![0.5, 0.5, 1.0],
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 3);
    }

    #[test]
    fn single_point_survives() {
        let pts = vec![dvector![1.0, 2.0], dvector![1.0, 2.0]];
        assert_eq!(convex_hull(&pts), vec![dvector![1.0, 2.0]]);
        assert!(convex_hull::<f64>(&[]).is_empty());
    }

    #[test]
    fn combinations_count() {
        let mut count = 0;
        for_each_combination(6, 3, &mut |c| {
            assert!(c.windows(2).all(|w| w[0] < w[1]));
            count += 1;
        });
        assert_eq!(count, 20);
    }
}
