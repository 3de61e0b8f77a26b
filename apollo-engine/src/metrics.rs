//! Forecast quality metrics.

/// Normalized mean squared error: MSE divided by target variance.
///
/// 0.0 is a perfect fit; 1.0 matches a constant mean predictor. Returns
/// the raw squared error when the targets have (near-)zero variance.
pub fn nmse(predictions: &[f64], actuals: &[f64]) -> f64 {
    assert_eq!(predictions.len(), actuals.len());
    if actuals.is_empty() {
        return 0.0;
    }

    let n = actuals.len() as f64;
    let mean = actuals.iter().sum::<f64>() / n;
    let mut se = 0.0f64;
    let mut var = 0.0f64;
    for (&p, &a) in predictions.iter().zip(actuals) {
        se += (p - a) * (p - a);
        var += (a - mean) * (a - mean);
    }

    if var > 1e-12 {
        se / var
    } else {
        se / n
    }
}

/// Root mean squared error.
pub fn rmse(predictions: &[f64], actuals: &[f64]) -> f64 {
    assert_eq!(predictions.len(), actuals.len());
    if actuals.is_empty() {
        return 0.0;
    }
    let se: f64 = predictions
        .iter()
        .zip(actuals)
        .map(|(&p, &a)| (p - a) * (p - a))
        .sum();
    (se / actuals.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nmse_perfect_fit_is_zero() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        assert!(nmse(&data, &data) < 1e-12);
    }

    #[test]
    fn test_nmse_mean_predictor_is_one() {
        let actuals = vec![1.0, 2.0, 3.0, 4.0];
        let predictions = vec![2.5; 4];
        assert!((nmse(&predictions, &actuals) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nmse_constant_target_falls_back_to_mse() {
        let actuals = vec![2.0, 2.0, 2.0];
        let predictions = vec![3.0, 3.0, 3.0];
        assert!((nmse(&predictions, &actuals) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_known_value() {
        let actuals = vec![0.0, 0.0];
        let predictions = vec![3.0, 4.0];
        // sqrt((9 + 16) / 2)
        assert!((rmse(&predictions, &actuals) - (12.5f64).sqrt()).abs() < 1e-12);
    }
}
