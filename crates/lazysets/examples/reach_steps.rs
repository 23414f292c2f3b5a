//! Discrete-time reachability with order reduction.
//!
//! Purpose
//! - Show the intended use of the zonotope core: `X_{k+1} = A X_k ⊕ U`, with
//!   the generator count kept bounded by Girard reduction after every step.
//! - Print the interval hull of each step so the growth is easy to eyeball.

use lazysets::prelude::*;
use nalgebra::{dmatrix, dvector};

fn main() -> Result<()> {
    let a = dmatrix![0.98, 0.1; -0.1, 0.98];
    let x0 = Zonotope::from_box(dvector![1.0, 0.0], &dvector![0.1, 0.1])?;
    let u = Zonotope::from_generator_list(
        dvector![0.0, 0.0],
        &[dvector![0.01, 0.005], dvector![-0.004, 0.01]],
    )?;

    let target_order = 3.0;
    let mut x = x0;
    for step in 1..=20 {
        x = x.linear_map(&a)?.minkowski_sum(&u)?.reduce_order(target_order)?;
        let (lo, hi) = x.interval_hull();
        println!(
            "step {step:2}: p = {:2}, x ∈ [{:+.3}, {:+.3}], y ∈ [{:+.3}, {:+.3}]",
            x.num_generators(),
            lo[0],
            hi[0],
            lo[1],
            hi[1]
        );
    }
    let vs = x.vertices()?;
    println!("final vertex count: {}", vs.len());
    Ok(())
}
