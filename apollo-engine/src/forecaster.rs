// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Apollo-Proprietary
// See LICENSE in the repository root for full license terms.

//! The echo state network forecaster and the forecast request handler.
//!
//! Training is single-shot and offline: the series is driven through the
//! reservoir once with teacher forcing — each sample `u(t)` produces the
//! feature vector `[u(t); x(t)]` with target `u(t+1)` — and the readout is
//! fit by ridge regression. Prediction is closed-loop: the readout output
//! at each step is fed back as the next input, for exactly `horizon`
//! steps past the final input timestamp.

use anyhow::{ensure, Context, Result};

use crate::config::{EsnConfig, ForecastRequest};
use crate::readout::{LinearReadout, RidgeRegression};
use crate::reservoir::Reservoir;
use crate::series::TimeSeries;

/// Echo state network: fixed random reservoir plus a ridge-trained linear
/// readout over `[input; state]` features.
#[derive(Debug, Clone)]
pub struct EchoStateNetwork {
    config: EsnConfig,
    reservoir: Reservoir,
    readout: Option<LinearReadout>,
    /// Final observed row, fed back as the first closed-loop input.
    last_input: Vec<f64>,
    /// Final observed timestamp and inferred sample spacing.
    last_time: f64,
    timestep: f64,
    /// Column labels carried over to the forecast.
    names: Vec<String>,
}

impl EchoStateNetwork {
    /// Build an untrained network from a validated config.
    pub fn new(config: EsnConfig) -> Result<Self> {
        config.validate()?;
        let reservoir = Reservoir::new(&config);
        Ok(Self {
            config,
            reservoir,
            readout: None,
            last_input: Vec::new(),
            last_time: 0.0,
            timestep: 0.0,
            names: Vec::new(),
        })
    }

    /// The configuration this network was built with.
    pub fn config(&self) -> &EsnConfig {
        &self.config
    }

    /// Whether `train` has run.
    pub fn is_trained(&self) -> bool {
        self.readout.is_some()
    }

    /// Fit the readout to a series with one-step-ahead teacher forcing.
    ///
    /// The series must match the configured input dimensionality and hold
    /// at least two samples (one training pair), plus enough samples to
    /// cover the configured washout. The input series is not mutated.
    pub fn train(&mut self, series: &TimeSeries) -> Result<()> {
        ensure!(
            series.num_dims() == self.config.input_dimensionality,
            "series has {} column(s) but the model is wired for {}",
            series.num_dims(),
            self.config.input_dimensionality
        );
        let n = series.len();
        ensure!(
            n >= 2,
            "series has {n} sample(s); need at least 2 to form a training pair"
        );
        ensure!(
            n - 1 > self.config.washout,
            "washout of {} leaves no training pairs for a series of {n} sample(s)",
            self.config.washout
        );

        let d = self.config.input_dimensionality;
        let feature_dim = d + self.reservoir.size();
        let pair_count = n - 1 - self.config.washout;

        self.reservoir.reset();
        let mut states = Vec::with_capacity(pair_count);
        let mut targets = Vec::with_capacity(pair_count);
        for t in 0..n - 1 {
            let input = series.row(t);
            let state = self.reservoir.update(input);
            if t >= self.config.washout {
                let mut features = Vec::with_capacity(feature_dim);
                features.extend_from_slice(input);
                features.extend_from_slice(state);
                states.push(features);
                targets.push(series.row(t + 1).to_vec());
            }
        }

        let ridge = RidgeRegression::new(self.config.regularization_parameter);
        self.readout = Some(ridge.train_readout(&states, &targets)?);

        // The reservoir has seen rows 0..n−2; the final row becomes the
        // first closed-loop input so prediction continues seamlessly.
        self.last_input = series.row(n - 1).to_vec();
        self.last_time = series.times()[n - 1];
        self.timestep = series.timestep()?;
        self.names = series.names().to_vec();
        Ok(())
    }

    /// Run the trained network forward `horizon` steps, closed-loop.
    ///
    /// Consumes reservoir state: the network is built for one train →
    /// predict cycle, matching the fresh-model-per-request lifecycle.
    pub fn predict(&mut self, horizon: usize) -> Result<TimeSeries> {
        ensure!(horizon >= 1, "horizon must be at least 1");
        let readout = self
            .readout
            .as_ref()
            .context("predict called before train")?;

        let d = self.config.input_dimensionality;
        let mut input = self.last_input.clone();
        let mut times = Vec::with_capacity(horizon);
        let mut values = Vec::with_capacity(horizon * d);

        for step in 1..=horizon {
            let state = self.reservoir.update(&input);
            let mut features = Vec::with_capacity(d + state.len());
            features.extend_from_slice(&input);
            features.extend_from_slice(state);
            let output = readout.predict(&features);

            times.push(self.last_time + self.timestep * step as f64);
            values.extend_from_slice(&output);
            input = output;
        }

        TimeSeries::new(times, values, self.names.clone())
    }
}

/// The forecast request handler.
///
/// Builds a fresh model for the request (input dimensionality taken from
/// the series, reservoir size and λ from the request), fits it to the full
/// series, and runs it forward `horizon` steps. Either returns a complete
/// forecast or fails; the input series is never mutated and nothing is
/// retried or partially returned.
pub fn forecast(series: &TimeSeries, request: &ForecastRequest) -> Result<TimeSeries> {
    request.validate()?;
    let config = EsnConfig::new(series.num_dims(), request.reservoir_dimensionality)
        .regularization_parameter(request.lambda());
    let mut model = EchoStateNetwork::new(config)?;
    model.train(series).context("fitting the forecast model")?;
    model.predict(request.horizon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_series(n: usize) -> TimeSeries {
        let times: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let values: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
        TimeSeries::new(times, values, vec!["ramp".into()]).unwrap()
    }

    #[test]
    fn test_predict_before_train_fails() {
        let mut model = EchoStateNetwork::new(EsnConfig::new(1, 10)).unwrap();
        assert!(!model.is_trained());
        assert!(model.predict(5).is_err());
    }

    #[test]
    fn test_train_rejects_dimension_mismatch() {
        let mut model = EchoStateNetwork::new(EsnConfig::new(2, 10)).unwrap();
        assert!(model.train(&ramp_series(20)).is_err());
    }

    #[test]
    fn test_train_rejects_short_series() {
        let mut model = EchoStateNetwork::new(EsnConfig::new(1, 10)).unwrap();
        let single = TimeSeries::new(vec![0.0], vec![1.0], vec!["x".into()]).unwrap();
        assert!(model.train(&single).is_err());
    }

    #[test]
    fn test_train_rejects_washout_swallowing_series() {
        let config = EsnConfig::new(1, 10).washout(30);
        let mut model = EchoStateNetwork::new(config).unwrap();
        assert!(model.train(&ramp_series(20)).is_err());
    }

    #[test]
    fn test_forecast_shape_and_times() {
        let series = ramp_series(40);
        let request = ForecastRequest {
            horizon: 7,
            reservoir_dimensionality: 30,
            regularization_exponent: -6,
        };
        let result = forecast(&series, &request).unwrap();

        assert_eq!(result.len(), 7);
        assert_eq!(result.num_dims(), 1);
        assert_eq!(result.names(), series.names());
        for (i, &t) in result.times().iter().enumerate() {
            assert!((t - (40.0 + i as f64)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_forecast_does_not_mutate_input() {
        let series = ramp_series(40);
        let before = series.clone();
        let request = ForecastRequest::default();
        forecast(&series, &request).unwrap();
        assert_eq!(series, before);
    }

    #[test]
    fn test_forecast_rejects_invalid_request() {
        let series = ramp_series(40);
        let mut request = ForecastRequest::default();
        request.horizon = 0;
        assert!(forecast(&series, &request).is_err());

        request = ForecastRequest::default();
        request.regularization_exponent = 3;
        assert!(forecast(&series, &request).is_err());
    }

    #[test]
    fn test_multivariate_forecast_keeps_columns() {
        let n = 30;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
        let mut values = Vec::with_capacity(n * 2);
        for i in 0..n {
            values.push((i as f64 * 0.3).sin());
            values.push((i as f64 * 0.3).cos());
        }
        let series =
            TimeSeries::new(times, values, vec!["sin".into(), "cos".into()]).unwrap();

        let request = ForecastRequest {
            horizon: 4,
            reservoir_dimensionality: 50,
            regularization_exponent: -6,
        };
        let result = forecast(&series, &request).unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result.num_dims(), 2);
        assert_eq!(result.names(), &["sin".to_string(), "cos".to_string()]);
        // Spacing carries over from the input series
        assert!((result.times()[0] - 15.0).abs() < 1e-9);
        assert!((result.timestep().unwrap() - 0.5).abs() < 1e-9);
    }
}
