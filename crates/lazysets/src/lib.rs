//! Lazy convex sets for reachability-style computation.
//!
//! Every set type answers one question, the support vector in a direction,
//! and everything else (support function, bounding boxes, membership for the
//! simple cases) is derived from it without building a full H- or V-rep.
//!
//! Modules
//! - `lazyset`: the `LazySet` capability trait and the generic support function.
//! - `zonotope`: center + generator representation with algebra, support,
//!   membership, vertex enumeration and Girard order reduction.
//! - `hull`: convex hull of a finite point cloud in any dimension.
//! - `random`: reproducible random zonotopes for benches and experiments.
//!
//! API Policy
//! - Breaking changes are fine when they improve clarity; there is no stable
//!   public API yet.

pub mod cfg;
pub mod error;
pub mod hull;
pub mod lazyset;
mod lp;
pub mod random;
pub mod zonotope;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::SetCfg;
pub use error::{Result, SetError};
pub use lazyset::{support_function, LazySet};
pub use nalgebra::{DMatrix, DVector};
pub use zonotope::{Membership, Zonotope};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::SetCfg;
    pub use crate::error::{Result, SetError};
    pub use crate::hull::convex_hull;
    pub use crate::lazyset::{support_function, LazySet};
    pub use crate::random::{draw_zonotope, ReplayToken, ZonoRandCfg};
    pub use crate::zonotope::{Membership, Zonotope};
    pub use nalgebra::{DMatrix, DVector};
}
