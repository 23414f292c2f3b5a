use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lazysets::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use io::{parse_vector, read_zonotope, write_json, ZonoFile};
use provenance::Provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Zonotope operations on JSON files")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the support vector and support function value in a direction
    Support {
        #[arg(long)]
        input: PathBuf,
        /// Comma-separated direction, e.g. "1,1"
        #[arg(long, allow_hyphen_values = true)]
        direction: String,
    },
    /// Print whether a point lies in the zonotope
    Contains {
        #[arg(long)]
        input: PathBuf,
        /// Comma-separated point, e.g. "1,0.1"
        #[arg(long, allow_hyphen_values = true)]
        point: String,
    },
    /// Enumerate vertices and write them as a JSON list
    Vertices {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = lazysets::cfg::MAX_VERTEX_GENERATORS)]
        max_generators: usize,
    },
    /// Girard order reduction to the given order
    Reduce {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        order: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Draw a reproducible random zonotope
    Random {
        #[arg(long, default_value_t = 2)]
        dim: usize,
        #[arg(long, default_value_t = 6)]
        generators: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let printed = match cmd.action {
        Action::Support { input, direction } => support(&input, &direction)?,
        Action::Contains { input, point } => contains(&input, &point)?,
        Action::Vertices {
            input,
            out,
            max_generators,
        } => vertices(&input, &out, max_generators)?,
        Action::Reduce { input, order, out } => reduce(&input, order, &out)?,
        Action::Random {
            dim,
            generators,
            seed,
            out,
        } => random(dim, generators, seed, &out)?,
        Action::Report => report()?,
    };
    println!("{}", serde_json::to_string_pretty(&printed)?);
    Ok(())
}

fn support(input: &Path, direction: &str) -> Result<Value> {
    tracing::info!(input = %input.display(), direction, "support");
    let z = read_zonotope(input)?;
    let d = parse_vector(direction)?;
    let sv = z.support_vector(&d).context("support vector")?;
    let rho = support_function(&d, &z).context("support function")?;
    Ok(json!({
        "support_vector": sv.as_slice(),
        "support_function": rho
    }))
}

fn contains(input: &Path, point: &str) -> Result<Value> {
    tracing::info!(input = %input.display(), point, "contains");
    let z = read_zonotope(input)?;
    let x = parse_vector(point)?;
    let outcome = z.membership(&x).context("membership")?;
    let label = match &outcome {
        Membership::Feasible { .. } => "feasible",
        Membership::OutOfBox { .. } => "out_of_box",
        Membership::Unsolved => "unsolved",
    };
    Ok(json!({
        "contains": outcome.is_member(),
        "outcome": label,
        "coefficients": outcome.coefficients().map(|xi| xi.as_slice().to_vec())
    }))
}

fn vertices(input: &Path, out: &Path, max_generators: usize) -> Result<Value> {
    tracing::info!(input = %input.display(), out = %out.display(), max_generators, "vertices");
    let z = read_zonotope(input)?;
    let cfg = SetCfg {
        max_vertex_generators: max_generators,
        ..SetCfg::default()
    };
    let vs = z.vertices_with(&cfg).context("vertex enumeration")?;
    let rows: Vec<Vec<f64>> = vs.iter().map(|v| v.as_slice().to_vec()).collect();
    write_json(out, &rows)?;
    let prov = Provenance::new("vertices")
        .input(input, &z)
        .cfg(&cfg)
        .param("vertices", rows.len())
        .write(out)?;
    tracing::info!(vertices = rows.len(), "vertices written");
    Ok(json!({
        "vertices": rows.len(),
        "out": out.to_string_lossy(),
        "provenance": prov.to_string_lossy()
    }))
}

fn reduce(input: &Path, order: f64, out: &Path) -> Result<Value> {
    tracing::info!(input = %input.display(), order, out = %out.display(), "reduce");
    let z = read_zonotope(input)?;
    let reduced = z.reduce_order(order).context("order reduction")?;
    write_json(out, &ZonoFile::from_zonotope(&reduced))?;
    let prov = Provenance::new("reduce")
        .input(input, &z)
        .result(&reduced)
        .param("order", order)
        .write(out)?;
    Ok(json!({
        "generators_before": z.num_generators(),
        "generators_after": reduced.num_generators(),
        "out": out.to_string_lossy(),
        "provenance": prov.to_string_lossy()
    }))
}

fn random(dim: usize, generators: usize, seed: u64, out: &Path) -> Result<Value> {
    tracing::info!(dim, generators, seed, out = %out.display(), "random");
    let cfg = ZonoRandCfg {
        dim,
        generators,
        ..ZonoRandCfg::default()
    };
    let z = draw_zonotope(cfg, ReplayToken::new(seed));
    write_json(out, &ZonoFile::from_zonotope(&z))?;
    let prov = Provenance::new("random")
        .result(&z)
        .param("seed", seed)
        .write(out)?;
    Ok(json!({
        "out": out.to_string_lossy(),
        "provenance": prov.to_string_lossy()
    }))
}

fn report() -> Result<Value> {
    Ok(serde_json::to_value(Provenance::new("report"))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_small_box(dir: &Path) -> PathBuf {
        let path = dir.join("box.json");
        let file = ZonoFile {
            center: vec![1.0, 0.0],
            generators: vec![vec![0.1, 0.0], vec![0.0, 0.1]],
        };
        write_json(&path, &file).unwrap();
        path
    }

    #[test]
    fn support_and_contains_report_json() {
        let dir = tempdir().unwrap();
        let input = write_small_box(dir.path());
        let s = support(&input, "1,1").unwrap();
        assert!((s["support_function"].as_f64().unwrap() - 1.2).abs() < 1e-12);
        let inside = contains(&input, "1.0,0.1").unwrap();
        assert_eq!(inside["contains"], true);
        assert_eq!(inside["outcome"], "feasible");
        let outside = contains(&input, "1.0,0.2").unwrap();
        assert_eq!(outside["contains"], false);
        assert_eq!(outside["outcome"], "out_of_box");
        assert!(contains(&input, "1.0").is_err());
    }

    #[test]
    fn vertices_writes_output_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = write_small_box(dir.path());
        let out = dir.path().join("out/vertices.json");
        let summary = vertices(&input, &out, 8).unwrap();
        assert_eq!(summary["vertices"], 4);
        let rows: Vec<Vec<f64>> = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(rows.len(), 4);
        let prov: Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("out/vertices.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(prov["op"], "vertices");
        assert_eq!(prov["input"]["generators"], 2);
        assert_eq!(prov["tolerances"]["max_vertex_generators"], 8);
        assert_eq!(prov["params"]["vertices"], 4);
        assert!(vertices(&input, &out, 1).is_err());
    }

    #[test]
    fn random_then_reduce() {
        let dir = tempdir().unwrap();
        let z_path = dir.path().join("z.json");
        random(2, 6, 7, &z_path).unwrap();
        let red_path = dir.path().join("z_red.json");
        let summary = reduce(&z_path, 1.0, &red_path).unwrap();
        assert_eq!(summary["generators_before"], 6);
        assert_eq!(summary["generators_after"], 2);
        let reduced = read_zonotope(&red_path).unwrap();
        let original = read_zonotope(&z_path).unwrap();
        assert_eq!(reduced.center(), original.center());
        assert!(reduce(&z_path, 0.5, &red_path).is_err());
    }

    #[test]
    fn support_matches_library_rho_and_report_names_version() {
        let dir = tempdir().unwrap();
        let input = write_small_box(dir.path());
        let s = support(&input, "-1,2").unwrap();
        let sv: Vec<f64> = serde_json::from_value(s["support_vector"].clone()).unwrap();
        assert!((sv[0] - 0.9).abs() < 1e-12 && (sv[1] - 0.1).abs() < 1e-12);
        assert!((s["support_function"].as_f64().unwrap() - (-0.9 + 0.2)).abs() < 1e-12);
        let r = report().unwrap();
        assert_eq!(r["op"], "report");
        assert_eq!(r["version"], lazysets::VERSION);
    }
}
