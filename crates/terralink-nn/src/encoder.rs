//! The two-layer relational actor encoder.
//!
//! Architecture: `RelGraphConv(F -> H)` → ReLU → `RelGraphConv(H -> H)` →
//! `Linear(H -> H)`. The nonlinearity sits only after the first convolution;
//! the second convolution and the final projection are left linear so the
//! embedding space keeps signed structure for cosine scoring.
//!
//! There is no training loop here: the encoder is a pure function of
//! (parameters, inputs). Parameters live in an explicit [`VarMap`] arena and
//! their origin is a caller decision via [`ParamSource`] — seeded random
//! initialization, or a safetensors checkpoint. With random parameters the
//! embeddings carry structural signal only up to the quality of the
//! initialization; rankings are still deterministic for a fixed seed.

use crate::conv::RelGraphConv;
use crate::error::{Error, Result};
use candle_core::{DType, Device, Tensor, Var};
use candle_nn::{linear, Linear, Module, VarBuilder, VarMap};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::PathBuf;

/// Encoder hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Input feature width F.
    pub in_dim: usize,
    /// Hidden and output embedding width H.
    pub hidden_dim: usize,
    /// Number of edge relation types.
    pub num_relations: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            in_dim: 3,
            hidden_dim: 16,
            num_relations: 1,
        }
    }
}

/// Where encoder parameters come from.
///
/// Never defaulted: the caller must say whether it wants random
/// initialization or a pretrained checkpoint.
#[derive(Debug, Clone)]
pub enum ParamSource {
    /// Fresh random initialization, optionally seeded for reproducibility.
    Random { seed: Option<u64> },
    /// Load from a safetensors checkpoint with the encoder's variable names
    /// (`conv1.rel_0.weight`, `conv2.self.bias`, `project.weight`, ...).
    Checkpoint(PathBuf),
}

/// Two-layer relational graph encoder.
#[derive(Debug)]
pub struct RgcnEncoder {
    conv1: RelGraphConv,
    conv2: RelGraphConv,
    project: Linear,
    config: EncoderConfig,
}

impl RgcnEncoder {
    /// Build the encoder over an existing variable builder.
    pub fn new(config: EncoderConfig, vb: VarBuilder) -> Result<Self> {
        if config.in_dim == 0 || config.hidden_dim == 0 {
            return Err(Error::InvalidConfig(
                "encoder dimensions must be nonzero".to_string(),
            ));
        }

        let conv1 = RelGraphConv::new(
            config.in_dim,
            config.hidden_dim,
            config.num_relations,
            vb.pp("conv1"),
        )?;
        let conv2 = RelGraphConv::new(
            config.hidden_dim,
            config.hidden_dim,
            config.num_relations,
            vb.pp("conv2"),
        )?;
        let project = linear(config.hidden_dim, config.hidden_dim, vb.pp("project"))?;

        Ok(Self {
            conv1,
            conv2,
            project,
            config,
        })
    }

    /// Build the encoder with its own parameter arena, filled from `source`.
    pub fn with_params(config: EncoderConfig, source: &ParamSource) -> Result<Self> {
        let device = Device::Cpu;
        let mut varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        let encoder = Self::new(config, vb)?;

        match source {
            ParamSource::Random { seed: None } => {}
            ParamSource::Random { seed: Some(seed) } => reseed(&varmap, *seed, &device)?,
            ParamSource::Checkpoint(path) => varmap.load(path)?,
        }

        Ok(encoder)
    }

    /// The configuration this encoder was built with.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Embed all nodes in one forward pass.
    ///
    /// # Arguments
    /// - `x`: node features (N x `in_dim`)
    /// - `edges`: (source id, destination id) pairs
    /// - `relations`: relation id per edge
    ///
    /// # Returns
    /// Embedding matrix (N x `hidden_dim`).
    ///
    /// # Errors
    /// Shape mismatches between `x` and the configured input width, or edge
    /// arrays that violate the node/relation ranges, abort the pass.
    pub fn forward(
        &self,
        x: &Tensor,
        edges: &[(usize, usize)],
        relations: &[usize],
    ) -> Result<Tensor> {
        let (_, cols) = x.dims2()?;
        if cols != self.config.in_dim {
            return Err(Error::FeatureWidthMismatch {
                expected: self.config.in_dim,
                got: cols,
            });
        }

        let h = self.conv1.forward(x, edges, relations)?.relu()?;
        let h = self.conv2.forward(&h, edges, relations)?;
        Ok(self.project.forward(&h)?)
    }

    /// Embed and extract plain `f32` rows, one per node id.
    pub fn embed(
        &self,
        x: &Tensor,
        edges: &[(usize, usize)],
        relations: &[usize],
    ) -> Result<Vec<Vec<f32>>> {
        Ok(self.forward(x, edges, relations)?.to_vec2::<f32>()?)
    }
}

/// Overwrite every variable in the arena with values from a seeded RNG.
///
/// Variables are filled in name order so the draw sequence does not depend on
/// hash-map iteration; the same seed always produces the same parameters.
/// Bounds follow the usual uniform(-1/sqrt(fan_in), 1/sqrt(fan_in)) scheme.
fn reseed(varmap: &VarMap, seed: u64, device: &Device) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);

    let data = varmap.data().lock().unwrap();
    let mut entries: Vec<(&String, &Var)> = data.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (_, var) in entries {
        let dims = var.shape().dims().to_vec();
        let fan_in = dims.last().copied().unwrap_or(1) as f32;
        let bound = 1.0 / fan_in.sqrt();
        let count = var.shape().elem_count();
        let values: Vec<f32> = (0..count).map(|_| rng.gen_range(-bound..bound)).collect();
        var.set(&Tensor::from_vec(values, dims, device)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(n: usize, cols: usize) -> Tensor {
        Tensor::randn(0f32, 1f32, (n, cols), &Device::Cpu).unwrap()
    }

    #[test]
    fn embeds_to_hidden_width() {
        let cfg = EncoderConfig::default();
        let encoder = RgcnEncoder::with_params(cfg, &ParamSource::Random { seed: Some(7) }).unwrap();

        let x = features(4, cfg.in_dim);
        let edges = vec![(0, 1), (1, 2), (2, 3)];
        let relations = vec![0, 0, 0];

        let z = encoder.embed(&x, &edges, &relations).unwrap();
        assert_eq!(z.len(), 4);
        assert!(z.iter().all(|row| row.len() == cfg.hidden_dim));
    }

    #[test]
    fn wrong_feature_width_is_fatal() {
        let cfg = EncoderConfig::default();
        let encoder = RgcnEncoder::with_params(cfg, &ParamSource::Random { seed: None }).unwrap();

        let x = features(4, cfg.in_dim + 2);
        let err = encoder.forward(&x, &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::FeatureWidthMismatch { expected: 3, got: 5 }
        ));
    }

    #[test]
    fn repeated_passes_match() {
        let cfg = EncoderConfig::default();
        let encoder = RgcnEncoder::with_params(cfg, &ParamSource::Random { seed: Some(1) }).unwrap();

        let x = features(3, cfg.in_dim);
        let edges = vec![(0, 1), (1, 2)];
        let relations = vec![0, 0];

        let a = encoder.embed(&x, &edges, &relations).unwrap();
        let b = encoder.embed(&x, &edges, &relations).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn checkpoint_round_trips_parameters() {
        let cfg = EncoderConfig::default();
        let device = Device::Cpu;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
        let original = RgcnEncoder::new(cfg, vb).unwrap();
        reseed(&varmap, 9, &device).unwrap();

        let path = std::env::temp_dir().join(format!(
            "terralink-encoder-{}.safetensors",
            std::process::id()
        ));
        varmap.save(&path).unwrap();
        let restored =
            RgcnEncoder::with_params(cfg, &ParamSource::Checkpoint(path.clone())).unwrap();
        let _ = std::fs::remove_file(&path);

        let x = features(4, cfg.in_dim);
        let edges = vec![(0, 1), (1, 2), (2, 3)];
        let relations = vec![0, 0, 0];
        assert_eq!(
            original.embed(&x, &edges, &relations).unwrap(),
            restored.embed(&x, &edges, &relations).unwrap()
        );
    }

    #[test]
    fn zero_dim_config_rejected() {
        let cfg = EncoderConfig {
            in_dim: 0,
            ..EncoderConfig::default()
        };
        let err = RgcnEncoder::with_params(cfg, &ParamSource::Random { seed: None }).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
