//! Tolerance defaults for set algorithms.
//!
//! Policy
//! - Defaults are fixed constants so that call sites do not juggle tolerances.
//!   Operations that care take a `SetCfg` through their `*_with` variant.

/// Slack for the `[-1, 1]` box test and for least-squares residuals.
pub const FEAS_EPS: f64 = 1e-9;
/// Relative singular-value cutoff used for rank decisions.
pub const RANK_EPS: f64 = 1e-10;
/// Distance below which two points are treated as the same point.
pub const DEDUP_EPS: f64 = 1e-9;
/// Largest generator count accepted by vertex enumeration (2^p sign vectors).
pub const MAX_VERTEX_GENERATORS: usize = 16;

/// Set configuration (tolerances and enumeration guard).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetCfg {
    pub eps_feas: f64,
    pub eps_rank: f64,
    pub eps_dedup: f64,
    pub max_vertex_generators: usize,
}

impl Default for SetCfg {
    fn default() -> Self {
        Self {
            eps_feas: FEAS_EPS,
            eps_rank: RANK_EPS,
            eps_dedup: DEDUP_EPS,
            max_vertex_generators: MAX_VERTEX_GENERATORS,
        }
    }
}
