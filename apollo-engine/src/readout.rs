//! Linear readout and closed-form ridge regression training.
//!
//! The readout is the only trained part of the network:
//! `output = W · features + bias`, with `W` found in one shot by ridge
//! regression over collected feature/target pairs:
//!
//! `W = (Xᵀ·X + λI)⁻¹ · Xᵀ·Y`
//!
//! Solved via Cholesky decomposition. Features are centered and
//! variance-normalized before the solve; the normalization is folded back
//! into the returned weights so the readout works on raw feature vectors.

use anyhow::{ensure, Result};

/// Trained linear readout: `output = W · features + bias`.
///
/// `W` has shape `(output_dim, state_dim)`, stored row-major.
#[derive(Debug, Clone)]
pub struct LinearReadout {
    /// Weight matrix, row-major: `weights[i * state_dim + j]`
    pub weights: Vec<f64>,
    /// Bias vector
    pub bias: Vec<f64>,
    /// Output dimension
    pub output_dim: usize,
    /// Feature dimension
    pub state_dim: usize,
}

impl LinearReadout {
    /// Create from pre-computed weights.
    pub fn from_weights(
        weights: Vec<f64>,
        bias: Vec<f64>,
        output_dim: usize,
        state_dim: usize,
    ) -> Self {
        assert_eq!(weights.len(), output_dim * state_dim);
        assert_eq!(bias.len(), output_dim);
        Self {
            weights,
            bias,
            output_dim,
            state_dim,
        }
    }

    /// Apply the readout to a feature vector.
    pub fn predict(&self, features: &[f64]) -> Vec<f64> {
        debug_assert_eq!(features.len(), self.state_dim);
        let mut output = self.bias.clone();
        for i in 0..self.output_dim {
            let row_base = i * self.state_dim;
            for j in 0..self.state_dim {
                output[i] += self.weights[row_base + j] * features[j];
            }
        }
        output
    }
}

/// Closed-form ridge regression trainer.
#[derive(Debug, Clone)]
pub struct RidgeRegression {
    /// Regularization strength (λ)
    pub lambda: f64,
}

impl RidgeRegression {
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }

    /// Train readout weights from feature/target pairs.
    ///
    /// Returns `(weights_flat, bias)` with `weights_flat` row-major
    /// `K × D`. Features are centered and variance-normalized for the
    /// solve; the returned weights are un-scaled and the bias is computed
    /// from the means, so they apply to raw features.
    pub fn train(&self, states: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<(Vec<f64>, Vec<f64>)> {
        ensure!(!states.is_empty(), "need at least one training sample");
        ensure!(
            states.len() == targets.len(),
            "states ({}) and targets ({}) must have equal length",
            states.len(),
            targets.len()
        );

        let n = states.len();
        let d = states[0].len();
        let k = targets[0].len();
        let n_f = n as f64;

        // Means for centering
        let mut state_mean = vec![0.0f64; d];
        let mut target_mean = vec![0.0f64; k];
        for s in states {
            for j in 0..d {
                state_mean[j] += s[j];
            }
        }
        for t in targets {
            for j in 0..k {
                target_mean[j] += t[j];
            }
        }
        for m in state_mean.iter_mut() {
            *m /= n_f;
        }
        for m in target_mean.iter_mut() {
            *m /= n_f;
        }

        // Per-dimension standard deviation. Normalizing to unit variance
        // keeps high-variance dimensions from dominating the regression.
        let mut state_std = vec![0.0f64; d];
        for s in states {
            for j in 0..d {
                let diff = s[j] - state_mean[j];
                state_std[j] += diff * diff;
            }
        }
        for sd in state_std.iter_mut() {
            *sd = (*sd / n_f).sqrt().max(1e-10);
        }

        // Xᵀ·X (D × D, symmetric) and Xᵀ·Y (D × K) over normalized rows
        let mut xtx = vec![0.0f64; d * d];
        let mut xty = vec![0.0f64; d * k];
        for i in 0..n {
            for a in 0..d {
                let xa = (states[i][a] - state_mean[a]) / state_std[a];
                // Upper triangle only; Xᵀ·X is symmetric
                for b in a..d {
                    let xb = (states[i][b] - state_mean[b]) / state_std[b];
                    xtx[a * d + b] += xa * xb;
                }
                for b in 0..k {
                    let yb = targets[i][b] - target_mean[b];
                    xty[a * k + b] += xa * yb;
                }
            }
        }
        for a in 0..d {
            for b in (a + 1)..d {
                xtx[b * d + a] = xtx[a * d + b];
            }
        }

        // Regularize: Xᵀ·X + λI
        for a in 0..d {
            xtx[a * d + a] += self.lambda;
        }

        // Solve (Xᵀ·X + λI) · Wᵀ = Xᵀ·Y
        let w_t = cholesky_solve(&xtx, &xty, d, k);

        // Transpose Wᵀ (D × K) → W (K × D), un-scaling by state_std so the
        // readout operates on raw (unnormalized) features.
        let mut weights = vec![0.0f64; k * d];
        for a in 0..d {
            for b in 0..k {
                weights[b * d + a] = w_t[a * k + b] / state_std[a];
            }
        }

        // Bias: b = target_mean − W · state_mean
        let mut bias = vec![0.0f64; k];
        for b in 0..k {
            let mut dot = 0.0f64;
            for a in 0..d {
                dot += weights[b * d + a] * state_mean[a];
            }
            bias[b] = target_mean[b] - dot;
        }

        Ok((weights, bias))
    }

    /// Train and return a configured [`LinearReadout`].
    pub fn train_readout(
        &self,
        states: &[Vec<f64>],
        targets: &[Vec<f64>],
    ) -> Result<LinearReadout> {
        ensure!(!states.is_empty(), "need at least one training sample");
        let state_dim = states[0].len();
        let output_dim = targets[0].len();
        let (weights, bias) = self.train(states, targets)?;
        Ok(LinearReadout::from_weights(weights, bias, output_dim, state_dim))
    }
}

/// Solve A·X = B via Cholesky decomposition.
///
/// `A` is `d × d` symmetric positive definite (row-major).
/// `B` is `d × k` (row-major).
/// Returns `X` as `d × k` (row-major).
fn cholesky_solve(a: &[f64], b: &[f64], d: usize, k: usize) -> Vec<f64> {
    // Factorize: A = L · Lᵀ
    let mut l = vec![0.0f64; d * d];
    for i in 0..d {
        for j in 0..=i {
            let mut sum = 0.0f64;
            for p in 0..j {
                sum += l[i * d + p] * l[j * d + p];
            }
            if i == j {
                let val = a[i * d + i] - sum;
                // Clamp to small positive for numerical stability
                l[i * d + j] = if val > 0.0 { val.sqrt() } else { 1e-10 };
            } else {
                l[i * d + j] = (a[i * d + j] - sum) / l[j * d + j];
            }
        }
    }

    // Forward substitution: L · y = B
    let mut y = vec![0.0f64; d * k];
    for i in 0..d {
        for col in 0..k {
            let mut sum = b[i * k + col];
            for j in 0..i {
                sum -= l[i * d + j] * y[j * k + col];
            }
            y[i * k + col] = sum / l[i * d + i];
        }
    }

    // Back substitution: Lᵀ · x = y
    let mut x = vec![0.0f64; d * k];
    for i in (0..d).rev() {
        for col in 0..k {
            let mut sum = y[i * k + col];
            for j in (i + 1)..d {
                sum -= l[j * d + i] * x[j * k + col];
            }
            x[i * k + col] = sum / l[i * d + i];
        }
    }

    x
}
