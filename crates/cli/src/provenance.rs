//! Provenance records written next to CLI artifacts as `<stem>.provenance.json`.

use anyhow::Result;
use lazysets::{SetCfg, Zonotope};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::io::write_json;

/// Dimension and generator count of a zonotope, without its numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub dim: usize,
    pub generators: usize,
}

impl Shape {
    pub fn of(z: &Zonotope<f64>) -> Self {
        Self {
            dim: z.dim(),
            generators: z.num_generators(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InputRecord {
    pub path: String,
    #[serde(flatten)]
    pub shape: Shape,
}

/// Tolerances the operation actually ran with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tolerances {
    pub eps_feas: f64,
    pub eps_rank: f64,
    pub eps_dedup: f64,
    pub max_vertex_generators: usize,
}

impl From<&SetCfg> for Tolerances {
    fn from(cfg: &SetCfg) -> Self {
        Self {
            eps_feas: cfg.eps_feas,
            eps_rank: cfg.eps_rank,
            eps_dedup: cfg.eps_dedup,
            max_vertex_generators: cfg.max_vertex_generators,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub version: &'static str,
    pub op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Shape>,
    pub tolerances: Tolerances,
    pub params: Map<String, Value>,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new(op: &'static str) -> Self {
        Self {
            code_rev: code_revision(),
            version: lazysets::VERSION,
            op,
            input: None,
            result: None,
            tolerances: Tolerances::from(&SetCfg::default()),
            params: Map::new(),
            outputs: Vec::new(),
        }
    }

    pub fn input(mut self, path: &Path, z: &Zonotope<f64>) -> Self {
        self.input = Some(InputRecord {
            path: path.to_string_lossy().into_owned(),
            shape: Shape::of(z),
        });
        self
    }

    pub fn result(mut self, z: &Zonotope<f64>) -> Self {
        self.result = Some(Shape::of(z));
        self
    }

    pub fn cfg(mut self, cfg: &SetCfg) -> Self {
        self.tolerances = Tolerances::from(cfg);
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_owned(), value.into());
        self
    }

    /// Record `artifact` as the output and write the sidecar next to it.
    pub fn write(mut self, artifact: &Path) -> Result<PathBuf> {
        self.outputs.push(artifact.to_string_lossy().into_owned());
        let path = sidecar_path(artifact);
        write_json(&path, &self)?;
        tracing::debug!(sidecar = %path.display(), op = self.op, "provenance written");
        Ok(path)
    }
}

/// `out/vertices.json` → `out/vertices.provenance.json`.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// `GIT_COMMIT` (runtime, then build time), else `git rev-parse`, else `"unknown"`.
pub fn code_revision() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .or_else(|| option_env!("GIT_COMMIT").map(str::to_owned))
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let out = Command::new("git")
                .args(["rev-parse", "--short=12", "HEAD"])
                .output()
                .ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
        })
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazysets::{DMatrix, DVector};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out/reduced.json")),
            Path::new("/tmp/out/reduced.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("zono")),
            Path::new("zono.provenance.json")
        );
    }

    #[test]
    fn record_carries_shapes_tolerances_and_params() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("reduced.json");
        let z = Zonotope::new(DVector::zeros(3), DMatrix::from_element(3, 7, 0.5)).unwrap();
        let cfg = SetCfg {
            max_vertex_generators: 9,
            ..SetCfg::default()
        };
        let path = Provenance::new("reduce")
            .input(Path::new("z.json"), &z)
            .cfg(&cfg)
            .param("order", 2.0)
            .write(&artifact)
            .unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["op"], "reduce");
        assert_eq!(parsed["input"]["path"], "z.json");
        assert_eq!(parsed["input"]["dim"], 3);
        assert_eq!(parsed["input"]["generators"], 7);
        assert!(parsed.get("result").is_none());
        assert_eq!(parsed["tolerances"]["max_vertex_generators"], 9);
        assert_eq!(parsed["params"]["order"], 2.0);
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["version"], lazysets::VERSION);
    }
}
