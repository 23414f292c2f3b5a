use anyhow::{bail, Context, Result};
use lazysets::{DVector, Zonotope};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk zonotope: center plus a list of generator vectors (columns).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZonoFile {
    pub center: Vec<f64>,
    #[serde(default)]
    pub generators: Vec<Vec<f64>>,
}

impl ZonoFile {
    pub fn from_zonotope(z: &Zonotope<f64>) -> Self {
        Self {
            center: z.center().iter().copied().collect(),
            generators: z
                .generators()
                .column_iter()
                .map(|g| g.iter().copied().collect())
                .collect(),
        }
    }

    pub fn to_zonotope(&self) -> Result<Zonotope<f64>> {
        let gens: Vec<DVector<f64>> = self
            .generators
            .iter()
            .map(|g| DVector::from_vec(g.clone()))
            .collect();
        Ok(Zonotope::from_generator_list(
            DVector::from_vec(self.center.clone()),
            &gens,
        )?)
    }
}

pub fn read_zonotope(path: &Path) -> Result<Zonotope<f64>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: ZonoFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing zonotope JSON {}", path.display()))?;
    file.to_zonotope()
        .with_context(|| format!("invalid zonotope in {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Parse a comma-separated vector such as `"1,0.5,-2"`.
pub fn parse_vector(s: &str) -> Result<DVector<f64>> {
    let parts = s
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<f64>()
                .with_context(|| format!("not a number: {p:?}"))
        })
        .collect::<Result<Vec<f64>>>()?;
    if parts.is_empty() {
        bail!("empty vector: {s:?}");
    }
    Ok(DVector::from_vec(parts))
}
