//! `SoftmaxPolicy` — a linear softmax routing model trained with REINFORCE.
//!
//! # Forward pass
//!
//! ```text
//! x̂      = layer_norm(features)          (zero mean, unit variance)
//! z_k    = Σ_j W[k][j] · x̂_j + b_k        k in 0..=warehouses
//! p      = softmax(z)
//! ```
//!
//! # Update
//!
//! One Adam step per episode on
//!
//! ```text
//! L = mean_i( log p_i(a_i) · cost_i )
//! ```
//!
//! where `a_i` is the action taken for order `i` and `cost_i` its
//! discounted cost.  Descending `L` makes costly actions less likely.
//! The gradient w.r.t. the logits is `cost_i / N · (onehot(a_i) − p_i)`.
//!
//! # Persistence
//!
//! Weights and hyperparameters serialise to JSON.  Optimiser moments and
//! the sampling mode are not saved; a loaded model starts greedy.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use lm_core::SimRng;

use crate::{
    Decision, DecisionPolicy, DecisionRecord, PolicyContext, PolicyError, PolicyResult,
    TrainablePolicy, feature_len,
};

const LAYER_NORM_EPS: f64 = 1e-5;
const ADAM_BETA1: f64 = 0.9;
const ADAM_BETA2: f64 = 0.999;
const ADAM_EPS: f64 = 1e-8;

/// Default Adam step size.
pub const DEFAULT_LEARNING_RATE: f64 = 0.0002;

/// How [`SoftmaxPolicy`] turns probabilities into an action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Sampling {
    /// Draw from the distribution (training).
    Stochastic,
    /// Take the most probable action; ties go to the lowest index.
    #[default]
    Greedy,
}

#[derive(Clone, Debug, Default)]
struct AdamState {
    step: u64,
    m: Vec<f64>,
    v: Vec<f64>,
}

/// Linear softmax over layer-normalised features.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SoftmaxPolicy {
    warehouses: usize,
    inputs: usize,
    learning_rate: f64,
    /// Row-major `(warehouses + 1) × inputs`, followed by `warehouses + 1` biases.
    params: Vec<f64>,

    #[serde(skip)]
    sampling: Sampling,
    #[serde(skip)]
    adam: AdamState,
}

impl SoftmaxPolicy {
    /// Fresh model for `warehouses` warehouses, weights drawn uniformly from
    /// `±1/√inputs`.
    pub fn new(warehouses: usize, learning_rate: f64, rng: &mut SimRng) -> Self {
        let inputs = feature_len(warehouses);
        let actions = warehouses + 1;
        let bound = 1.0 / (inputs.max(1) as f64).sqrt();
        let params = (0..actions * inputs + actions)
            .map(|_| rng.gen_range(-bound..bound))
            .collect();
        Self {
            warehouses,
            inputs,
            learning_rate,
            params,
            sampling: Sampling::Greedy,
            adam: AdamState::default(),
        }
    }

    #[inline]
    pub fn actions(&self) -> usize {
        self.warehouses + 1
    }

    pub fn warehouses(&self) -> usize {
        self.warehouses
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    pub fn set_sampling(&mut self, sampling: Sampling) {
        self.sampling = sampling;
    }

    /// Action probabilities for one feature vector.
    pub fn probabilities(&self, features: &[f64]) -> PolicyResult<Vec<f64>> {
        if features.len() != self.inputs {
            return Err(PolicyError::FeatureLength { expected: self.inputs, got: features.len() });
        }
        let x = layer_norm(features);
        Ok(softmax(&self.logits(&x)))
    }

    fn logits(&self, x: &[f64]) -> Vec<f64> {
        let (weights, bias) = self.params.split_at(self.actions() * self.inputs);
        weights
            .chunks_exact(self.inputs)
            .zip(bias)
            .map(|(row, b)| row.iter().zip(x).map(|(w, xi)| w * xi).sum::<f64>() + b)
            .collect()
    }

    // ── Persistence ───────────────────────────────────────────────────────

    pub fn save_json(&self, path: &Path) -> PolicyResult<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a model.  The parameter count is checked against the declared
    /// shape.
    pub fn load_json(path: &Path) -> PolicyResult<Self> {
        let file = std::fs::File::open(path)?;
        let model: SoftmaxPolicy = serde_json::from_reader(std::io::BufReader::new(file))?;
        let expected = model.actions() * model.inputs + model.actions();
        if model.inputs != feature_len(model.warehouses) || model.params.len() != expected {
            return Err(PolicyError::FeatureLength { expected, got: model.params.len() });
        }
        Ok(model)
    }
}

impl DecisionPolicy for SoftmaxPolicy {
    fn name(&self) -> &str {
        "SoftmaxPolicy"
    }

    fn choose(&self, ctx: &PolicyContext<'_>, rng: &mut SimRng) -> PolicyResult<Decision> {
        let probs = self.probabilities(ctx.features()?)?;
        let action = match self.sampling {
            Sampling::Stochastic => rng
                .weighted_index(&probs)
                .ok_or_else(|| PolicyError::Degenerate(format!("{probs:?}")))?,
            Sampling::Greedy => argmax(&probs),
        };
        Ok(Decision::from_action(action, self.warehouses))
    }
}

impl TrainablePolicy for SoftmaxPolicy {
    fn set_training(&mut self, training: bool) {
        self.sampling = if training { Sampling::Stochastic } else { Sampling::Greedy };
    }

    fn update(&mut self, records: &[DecisionRecord], costs: &[f64]) -> PolicyResult<f64> {
        if records.len() != costs.len() {
            return Err(PolicyError::EpisodeLength { records: records.len(), costs: costs.len() });
        }
        if records.is_empty() {
            return Ok(0.0);
        }

        let actions = self.actions();
        let n = records.len() as f64;
        let mut grad = vec![0.0; self.params.len()];
        let bias_offset = actions * self.inputs;
        let mut loss = 0.0;

        for (rec, &cost) in records.iter().zip(costs) {
            if rec.action >= actions {
                return Err(PolicyError::ActionOutOfRange { action: rec.action, actions });
            }
            if rec.features.len() != self.inputs {
                return Err(PolicyError::FeatureLength { expected: self.inputs, got: rec.features.len() });
            }
            let x = layer_norm(&rec.features);
            let p = softmax(&self.logits(&x));
            loss += p[rec.action].max(f64::MIN_POSITIVE).ln() * cost / n;

            for k in 0..actions {
                let onehot = if k == rec.action { 1.0 } else { 0.0 };
                let dz = cost / n * (onehot - p[k]);
                let row = &mut grad[k * self.inputs..(k + 1) * self.inputs];
                for (g, xi) in row.iter_mut().zip(&x) {
                    *g += dz * xi;
                }
                grad[bias_offset + k] += dz;
            }
        }

        self.adam_step(&grad);
        debug!("softmax update: {} decisions, loss {loss:.4}", records.len());
        Ok(loss)
    }
}

impl SoftmaxPolicy {
    fn adam_step(&mut self, grad: &[f64]) {
        let st = &mut self.adam;
        if st.m.len() != grad.len() {
            st.m = vec![0.0; grad.len()];
            st.v = vec![0.0; grad.len()];
            st.step = 0;
        }
        st.step += 1;
        let t = st.step as i32;
        let c1 = 1.0 - ADAM_BETA1.powi(t);
        let c2 = 1.0 - ADAM_BETA2.powi(t);
        for (i, &g) in grad.iter().enumerate() {
            st.m[i] = ADAM_BETA1 * st.m[i] + (1.0 - ADAM_BETA1) * g;
            st.v[i] = ADAM_BETA2 * st.v[i] + (1.0 - ADAM_BETA2) * g * g;
            let m_hat = st.m[i] / c1;
            let v_hat = st.v[i] / c2;
            self.params[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + ADAM_EPS);
        }
    }
}

// ── Numerics ──────────────────────────────────────────────────────────────────

pub(crate) fn layer_norm(x: &[f64]) -> Vec<f64> {
    if x.is_empty() {
        return Vec::new();
    }
    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let var = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let denom = (var + LAYER_NORM_EPS).sqrt();
    x.iter().map(|v| (v - mean) / denom).collect()
}

pub(crate) fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

pub(crate) fn argmax(p: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in p.iter().enumerate() {
        if v > p[best] {
            best = i;
        }
    }
    best
}

