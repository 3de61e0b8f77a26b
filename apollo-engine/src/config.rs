//! Model configuration and the user-facing forecast request.
//!
//! `EsnConfig` carries everything the echo state network needs; the three
//! values a user actually chooses (horizon, reservoir size, regularization
//! strength) arrive as a `ForecastRequest` and are mapped onto a config
//! with engine defaults for the rest.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Lowest regularization exponent the request surface accepts (λ = 10⁻¹⁰).
pub const MIN_REGULARIZATION_EXPONENT: i32 = -10;
/// Highest regularization exponent the request surface accepts (λ = 10⁻²).
pub const MAX_REGULARIZATION_EXPONENT: i32 = -2;

/// Full configuration for an echo state network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsnConfig {
    /// Number of input (and output) columns the model is wired for
    pub input_dimensionality: usize,
    /// Number of reservoir neurons
    pub reservoir_dimensionality: usize,
    /// Ridge regression regularization strength (λ)
    pub regularization_parameter: f64,
    /// Target spectral radius of the recurrent weight matrix
    pub spectral_radius: f64,
    /// Leaking rate for leaky-integrator neurons (0 to 1]
    pub leak_rate: f64,
    /// Scaling factor applied to the input weights
    pub input_scaling: f64,
    /// Fraction of non-zero recurrent connections (0 to 1]
    pub connectivity: f64,
    /// Number of initial training pairs discarded while transients decay
    pub washout: usize,
    /// Seed for reservoir weight generation
    pub seed: u64,
}

impl Default for EsnConfig {
    fn default() -> Self {
        Self {
            input_dimensionality: 1,
            reservoir_dimensionality: 100,
            regularization_parameter: 1e-6,
            spectral_radius: 0.95,
            leak_rate: 0.3,
            input_scaling: 0.1,
            connectivity: 0.1,
            washout: 0,
            seed: 42,
        }
    }
}

impl EsnConfig {
    /// Config for a model reading `input_dimensionality` columns, with
    /// engine defaults for everything else.
    pub fn new(input_dimensionality: usize, reservoir_dimensionality: usize) -> Self {
        Self {
            input_dimensionality,
            reservoir_dimensionality,
            ..Default::default()
        }
    }

    /// Set the regularization strength.
    pub fn regularization_parameter(mut self, lambda: f64) -> Self {
        self.regularization_parameter = lambda;
        self
    }

    /// Set the target spectral radius.
    pub fn spectral_radius(mut self, radius: f64) -> Self {
        self.spectral_radius = radius;
        self
    }

    /// Set the leaking rate.
    pub fn leak_rate(mut self, rate: f64) -> Self {
        self.leak_rate = rate;
        self
    }

    /// Set the input weight scaling.
    pub fn input_scaling(mut self, scaling: f64) -> Self {
        self.input_scaling = scaling;
        self
    }

    /// Set the recurrent connectivity fraction.
    pub fn connectivity(mut self, connectivity: f64) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the washout length.
    pub fn washout(mut self, washout: usize) -> Self {
        self.washout = washout;
        self
    }

    /// Set the reservoir seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that every field is in its valid range.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.input_dimensionality >= 1, "input dimensionality must be at least 1");
        ensure!(
            self.reservoir_dimensionality >= 1,
            "reservoir dimensionality must be at least 1"
        );
        ensure!(
            self.regularization_parameter > 0.0 && self.regularization_parameter.is_finite(),
            "regularization parameter must be a positive finite number, got {}",
            self.regularization_parameter
        );
        ensure!(
            self.spectral_radius > 0.0 && self.spectral_radius.is_finite(),
            "spectral radius must be positive, got {}",
            self.spectral_radius
        );
        ensure!(
            self.leak_rate > 0.0 && self.leak_rate <= 1.0,
            "leak rate must be in (0, 1], got {}",
            self.leak_rate
        );
        ensure!(
            self.input_scaling > 0.0 && self.input_scaling.is_finite(),
            "input scaling must be positive, got {}",
            self.input_scaling
        );
        ensure!(
            self.connectivity > 0.0 && self.connectivity <= 1.0,
            "connectivity must be in (0, 1], got {}",
            self.connectivity
        );
        Ok(())
    }
}

/// The three user-chosen forecast parameters, re-read on every request.
///
/// The regularization strength travels as an integer exponent `p` so the
/// request surface matches a log-scale slider; `lambda()` turns it into
/// λ = 10ᵖ exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Number of future steps to forecast
    pub horizon: usize,
    /// Reservoir size for the model built for this request
    pub reservoir_dimensionality: usize,
    /// Regularization strength as a power of ten (−10 … −2)
    pub regularization_exponent: i32,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            horizon: 10,
            reservoir_dimensionality: 100,
            regularization_exponent: -6,
        }
    }
}

impl ForecastRequest {
    /// The regularization parameter, λ = 10^exponent.
    pub fn lambda(&self) -> f64 {
        10f64.powi(self.regularization_exponent)
    }

    /// Check the request against its documented ranges.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.horizon >= 1, "horizon must be at least 1");
        ensure!(
            self.reservoir_dimensionality >= 1,
            "reservoir dimensionality must be at least 1"
        );
        ensure!(
            (MIN_REGULARIZATION_EXPONENT..=MAX_REGULARIZATION_EXPONENT)
                .contains(&self.regularization_exponent),
            "regularization exponent must be between {MIN_REGULARIZATION_EXPONENT} and {MAX_REGULARIZATION_EXPONENT}, got {}",
            self.regularization_exponent
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EsnConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = EsnConfig::new(3, 250)
            .regularization_parameter(1e-4)
            .spectral_radius(0.9)
            .leak_rate(0.5)
            .washout(20)
            .seed(7);
        assert_eq!(config.input_dimensionality, 3);
        assert_eq!(config.reservoir_dimensionality, 250);
        assert!((config.regularization_parameter - 1e-4).abs() < 1e-18);
        assert_eq!(config.washout, 20);
        assert_eq!(config.seed, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        assert!(EsnConfig::new(0, 100).validate().is_err());
        assert!(EsnConfig::new(1, 0).validate().is_err());
        assert!(EsnConfig::new(1, 10).regularization_parameter(0.0).validate().is_err());
        assert!(EsnConfig::new(1, 10).regularization_parameter(-1e-6).validate().is_err());
        assert!(EsnConfig::new(1, 10).leak_rate(0.0).validate().is_err());
        assert!(EsnConfig::new(1, 10).leak_rate(1.5).validate().is_err());
        assert!(EsnConfig::new(1, 10).connectivity(0.0).validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = EsnConfig::new(2, 50).seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let restored: EsnConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.input_dimensionality, 2);
        assert_eq!(restored.reservoir_dimensionality, 50);
        assert_eq!(restored.seed, 9);
    }

    #[test]
    fn test_lambda_is_exact_power_of_ten() {
        for power in MIN_REGULARIZATION_EXPONENT..=MAX_REGULARIZATION_EXPONENT {
            let request = ForecastRequest {
                regularization_exponent: power,
                ..Default::default()
            };
            assert_eq!(request.lambda(), 10f64.powi(power), "λ mismatch at 10^{power}");
            assert!(request.validate().is_ok());
        }
    }

    #[test]
    fn test_request_validation_ranges() {
        let mut request = ForecastRequest::default();
        assert!(request.validate().is_ok());

        request.horizon = 0;
        assert!(request.validate().is_err());

        request = ForecastRequest::default();
        request.reservoir_dimensionality = 0;
        assert!(request.validate().is_err());

        request = ForecastRequest::default();
        request.regularization_exponent = -11;
        assert!(request.validate().is_err());
        request.regularization_exponent = -1;
        assert!(request.validate().is_err());
    }
}
