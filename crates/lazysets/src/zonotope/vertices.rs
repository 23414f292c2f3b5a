//! Vertex enumeration over the `{-1, +1}^p` sign lattice.
//!
//! Two routes, chosen by the rank `r` of the generator matrix:
//! - `r ≤ 2`: all `2^p` candidate points go through the planar hull
//!   (O(2^p log 2^p)).
//! - `r ≥ 3`: facet hyperplanes are spanned by `r - 1` generators, and each
//!   facet pins the sign of every generator off its plane. Candidates are the
//!   pinned signs with every choice for the in-plane generators; a candidate
//!   is a vertex iff the normals of the facets it lies on span the local
//!   space. At most `2 · C(p, r - 1)` facets, so in general position the
//!   candidate count is `2 · C(p, r - 1) · 2^(r - 1)` rather than `2^p`.
//!
//! Either way enumeration refuses `p > max_vertex_generators` with
//! `TooManyGenerators` instead of truncating. Reduce the order first
//! (`reduce_order`) when that limit gets in the way.
//!
//! The candidate cloud can be split by mask ranges (`sign_points`) and the
//! shards merged before the single hull step.

use std::collections::BTreeSet;
use std::ops::Range;

use nalgebra::{convert, DMatrix, DVector, RealField};

use super::Zonotope;
use crate::cfg::SetCfg;
use crate::error::{Result, SetError};
use crate::hull::{
    convex_hull_with, dedup_points_in_place, for_each_combination, hyperplane_normal, rank_of,
};

/// A facet pair `±normal` in local coordinates. Bit `k` of `off` marks active
/// generator `k` as off the plane; bit `k` of `pos` marks `normal · g_k > 0`.
struct Facet<N: RealField + Copy> {
    normal: DVector<N>,
    off: usize,
    pos: usize,
}

impl<N: RealField + Copy> Zonotope<N> {
    /// Vertices with default tolerances and generator guard.
    pub fn vertices(&self) -> Result<Vec<DVector<N>>> {
        self.vertices_with(&SetCfg::default())
    }

    /// Deduplicated, hull-minimal vertex list.
    pub fn vertices_with(&self, cfg: &SetCfg) -> Result<Vec<DVector<N>>> {
        let p = self.num_generators();
        if p > cfg.max_vertex_generators || p >= usize::BITS as usize {
            return Err(SetError::TooManyGenerators {
                generators: p,
                limit: cfg.max_vertex_generators,
            });
        }
        let frame = column_frame(&self.generators, convert(cfg.eps_rank));
        let rank = frame.as_ref().map_or(0, |f| f.ncols());
        let vertices = match frame {
            Some(frame) if rank >= 3 => self.vertices_from_facets(&frame, cfg),
            _ => convex_hull_with(&self.sign_points(0..1usize << p), cfg),
        };
        tracing::debug!(
            dim = self.dim(),
            generators = p,
            rank,
            vertices = vertices.len(),
            "zonotope vertices"
        );
        Ok(vertices)
    }

    /// Points `c + G ξ` for the sign vectors encoded by `masks`.
    ///
    /// Bit `i` of a mask set means `ξ_i = +1`, clear means `ξ_i = -1`. Masks at
    /// or beyond `2^p` are skipped.
    pub fn sign_points(&self, masks: Range<usize>) -> Vec<DVector<N>> {
        let p = self.num_generators();
        let end = masks
            .end
            .min(1usize.checked_shl(p as u32).unwrap_or(usize::MAX));
        let mut xi = DVector::from_element(p, -N::one());
        (masks.start..end)
            .map(|mask| {
                for i in 0..p {
                    xi[i] = if (mask >> i) & 1 == 1 {
                        N::one()
                    } else {
                        -N::one()
                    };
                }
                &self.center + &self.generators * &xi
            })
            .collect()
    }

    /// Vertices when the generators span `r ≥ 3` dimensions; `frame` is an
    /// orthonormal basis of their span.
    fn vertices_from_facets(&self, frame: &DMatrix<N>, cfg: &SetCfg) -> Vec<DVector<N>> {
        let eps_rank: N = convert(cfg.eps_rank);
        let r = frame.ncols();
        let local = frame.tr_mul(&self.generators);
        let norms: Vec<N> = local.column_iter().map(|g| g.amax()).collect();
        let gmax = norms
            .iter()
            .fold(N::zero(), |acc, &v| if v > acc { v } else { acc });
        let active: Vec<usize> = (0..norms.len())
            .filter(|&j| norms[j] > gmax * eps_rank)
            .collect();
        if active.len() < r {
            return convex_hull_with(&self.sign_points(0..1usize << norms.len()), cfg);
        }
        let scale = active.iter().fold(N::zero(), |acc, &j| acc + norms[j]);
        let tol = convert::<f64, N>(cfg.eps_feas) * scale;

        // Origin first, so that r-tuples `[0, g..]` describe planes through the origin.
        let mut pts = vec![DVector::zeros(r)];
        pts.extend(active.iter().map(|&j| local.column(j).into_owned()));

        let mut seen: BTreeSet<usize> = BTreeSet::new();
        let mut facets: Vec<Facet<N>> = Vec::new();
        let mut idx = Vec::with_capacity(r);
        for_each_combination(active.len(), r - 1, &mut |comb: &[usize]| {
            idx.clear();
            idx.push(0);
            idx.extend(comb.iter().map(|&k| k + 1));
            let Some(normal) = hyperplane_normal(&pts, &idx, eps_rank) else {
                return;
            };
            let mut off = 0usize;
            let mut pos = 0usize;
            for (k, g) in pts[1..].iter().enumerate() {
                let s = normal.dot(g);
                if s > tol {
                    off |= 1usize << k;
                    pos |= 1usize << k;
                } else if s < -tol {
                    off |= 1usize << k;
                }
            }
            // The in-plane set determines the plane.
            if seen.insert(off) {
                facets.push(Facet { normal, off, pos });
            }
        });

        let mut candidates: BTreeSet<usize> = BTreeSet::new();
        for f in &facets {
            let free: Vec<usize> = (0..active.len())
                .filter(|&k| f.off & (1usize << k) == 0)
                .collect();
            for pinned in [f.pos, f.off & !f.pos] {
                for sub in 0..1usize << free.len() {
                    let mut mask = pinned;
                    for (b, &k) in free.iter().enumerate() {
                        if sub & (1usize << b) != 0 {
                            mask |= 1usize << k;
                        }
                    }
                    candidates.insert(mask);
                }
            }
        }
        tracing::trace!(
            rank = r,
            facets = 2 * facets.len(),
            candidates = candidates.len(),
            "facet route"
        );

        let mut vertices: Vec<DVector<N>> = candidates
            .iter()
            .copied()
            .filter(|&mask| {
                let mut normals: Vec<DVector<N>> = Vec::new();
                for f in &facets {
                    if (mask & f.off) == f.pos {
                        normals.push(f.normal.clone());
                    } else if (mask & f.off) == (f.off & !f.pos) {
                        normals.push(-f.normal.clone());
                    }
                }
                normals.len() >= r && rank_of(&DMatrix::from_columns(&normals), eps_rank) == r
            })
            .map(|mask| self.point_for_mask(&active, mask))
            .collect();
        dedup_points_in_place(&mut vertices, convert(cfg.eps_dedup));
        vertices
    }

    /// `c + G ξ` with `ξ` read from `mask` over the active generators; the
    /// remaining (numerically zero) generators get `+1`.
    fn point_for_mask(&self, active: &[usize], mask: usize) -> DVector<N> {
        let mut xi = DVector::from_element(self.num_generators(), N::one());
        for (k, &j) in active.iter().enumerate() {
            if mask & (1usize << k) == 0 {
                xi[j] = -N::one();
            }
        }
        &self.center + &self.generators * xi
    }
}

/// Orthonormal basis (columns) of the span of `g`; `None` if `g` vanishes.
fn column_frame<N: RealField + Copy>(g: &DMatrix<N>, eps_rank: N) -> Option<DMatrix<N>> {
    if g.nrows() == 0 || g.ncols() == 0 {
        return None;
    }
    let svd = g.clone().svd(true, false);
    let u = svd.u?;
    let smax = svd.singular_values.amax();
    if smax <= N::zero() {
        return None;
    }
    let cols: Vec<DVector<N>> = svd
        .singular_values
        .iter()
        .enumerate()
        .filter(|(_, s)| **s > smax * eps_rank)
        .map(|(k, _)| u.column(k).into_owned())
        .collect();
    Some(DMatrix::from_columns(&cols))
}

/// Free-function form of [`Zonotope::vertices`].
#[inline]
pub fn vertices<N: RealField + Copy>(z: &Zonotope<N>) -> Result<Vec<DVector<N>>> {
    z.vertices()
}
