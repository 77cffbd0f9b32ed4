//! Goodness-of-fit between observed and simulated outlet streamflow.
//!
//! Score functions take equal-length observed and simulated slices.
//! `StreamflowComparison` pairs a forcing series' optional observations with
//! a run's discharge first, skipping days without a usable observation.

/// Nash-Sutcliffe Efficiency. Range: (-inf, 1], 1 = perfect.
pub fn nse(observed: &[f64], simulated: &[f64]) -> f64 {
    let n = observed.len();
    let mean_obs: f64 = observed.iter().sum::<f64>() / n as f64;
    let numerator: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).powi(2))
        .sum();
    let denominator: f64 = observed.iter().map(|o| (o - mean_obs).powi(2)).sum();
    if denominator == 0.0 {
        return f64::NEG_INFINITY;
    }
    1.0 - numerator / denominator
}

/// Log-transformed NSE. Uses ln(x + 0.01) so zero-flow days stay finite.
pub fn log_nse(observed: &[f64], simulated: &[f64]) -> f64 {
    let log_obs: Vec<f64> = observed.iter().map(|o| (o + 0.01).ln()).collect();
    let log_sim: Vec<f64> = simulated.iter().map(|s| (s + 0.01).ln()).collect();
    nse(&log_obs, &log_sim)
}

/// Kling-Gupta Efficiency. Range: (-inf, 1], 1 = perfect.
pub fn kge(observed: &[f64], simulated: &[f64]) -> f64 {
    let n = observed.len() as f64;
    let mean_o = observed.iter().sum::<f64>() / n;
    let mean_s = simulated.iter().sum::<f64>() / n;
    let std_o = (observed.iter().map(|o| (o - mean_o).powi(2)).sum::<f64>() / n).sqrt();
    let std_s = (simulated.iter().map(|s| (s - mean_s).powi(2)).sum::<f64>() / n).sqrt();

    let r = if std_o == 0.0 || std_s == 0.0 {
        0.0
    } else {
        observed
            .iter()
            .zip(simulated)
            .map(|(o, s)| (o - mean_o) * (s - mean_s))
            .sum::<f64>()
            / (n * std_o * std_s)
    };
    let alpha = if std_o == 0.0 { 0.0 } else { std_s / std_o };
    let beta = if mean_o == 0.0 { 0.0 } else { mean_s / mean_o };

    1.0 - ((r - 1.0).powi(2) + (alpha - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt()
}

/// Percent Bias. Optimal = 0. Positive = overestimation.
pub fn pbias(observed: &[f64], simulated: &[f64]) -> f64 {
    let sum_obs: f64 = observed.iter().sum();
    if sum_obs == 0.0 {
        return f64::INFINITY;
    }
    let diff_sum: f64 = simulated.iter().zip(observed).map(|(s, o)| s - o).sum();
    100.0 * diff_sum / sum_obs
}

/// Root Mean Square Error [m³/s]. 0 = perfect.
pub fn rmse(observed: &[f64], simulated: &[f64]) -> f64 {
    let n = observed.len() as f64;
    let mse: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).powi(2))
        .sum::<f64>()
        / n;
    mse.sqrt()
}

/// Mean Absolute Error [m³/s]. 0 = perfect.
pub fn mae(observed: &[f64], simulated: &[f64]) -> f64 {
    let n = observed.len() as f64;
    observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).abs())
        .sum::<f64>()
        / n
}

/// Keep only the days with a finite observation.
///
/// Returns (observed, simulated), equal length.
pub fn paired(observed: &[Option<f64>], simulated: &[f64]) -> (Vec<f64>, Vec<f64>) {
    observed
        .iter()
        .zip(simulated)
        .filter_map(|(o, &s)| match o {
            Some(o) if o.is_finite() => Some((*o, s)),
            _ => None,
        })
        .unzip()
}

/// All scores for one run against the observed record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamflowComparison {
    /// Days that had an observation.
    pub n_days: usize,
    pub nse: f64,
    pub log_nse: f64,
    pub kge: f64,
    pub pbias: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl StreamflowComparison {
    /// Score `simulated` [m³/s] against `observed`.
    ///
    /// `None` when fewer than two days pair up.
    pub fn compute(observed: &[Option<f64>], simulated: &[f64]) -> Option<Self> {
        let (obs, sim) = paired(observed, simulated);
        if obs.len() < 2 {
            return None;
        }
        Some(Self {
            n_days: obs.len(),
            nse: nse(&obs, &sim),
            log_nse: log_nse(&obs, &sim),
            kge: kge(&obs, &sim),
            pbias: pbias(&obs, &sim),
            rmse: rmse(&obs, &sim),
            mae: mae(&obs, &sim),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // --- NSE ---

    #[test]
    fn nse_perfect_match() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(nse(&obs, &obs), 1.0);
    }

    #[test]
    fn nse_mean_simulation_gives_zero() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sim = [3.0; 5];
        assert_relative_eq!(nse(&obs, &sim), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn nse_constant_observed_returns_neg_inf() {
        let obs = [5.0; 5];
        let sim = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(nse(&obs, &sim), f64::NEG_INFINITY);
    }

    #[test]
    fn nse_known_value() {
        // num = 0.11, den = 10 -> 0.989
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sim = [1.1, 2.2, 2.8, 4.1, 4.9];
        assert_relative_eq!(nse(&obs, &sim), 0.989, epsilon = 1e-10);
    }

    #[test]
    fn log_nse_handles_zero_flow() {
        let obs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let result = log_nse(&obs, &obs);
        assert!(result.is_finite());
        assert_relative_eq!(result, 1.0, epsilon = 1e-10);
    }

    // --- KGE ---

    #[test]
    fn kge_perfect_match() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(kge(&obs, &obs), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn kge_bias_reduces_score() {
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sim = [2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(kge(&obs, &sim) < 1.0);
    }

    #[test]
    fn kge_zero_variance_observed_is_finite() {
        let obs = [3.0; 5];
        let sim = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(kge(&obs, &sim).is_finite());
    }

    // --- PBIAS / errors ---

    #[test]
    fn pbias_known_value() {
        let obs = [10.0, 20.0, 30.0];
        let sim = [12.0, 22.0, 28.0];
        assert_relative_eq!(pbias(&obs, &sim), 100.0 * 2.0 / 60.0, epsilon = 1e-10);
    }

    #[test]
    fn pbias_zero_observed_returns_inf() {
        assert_eq!(pbias(&[0.0; 3], &[1.0, 2.0, 3.0]), f64::INFINITY);
    }

    #[test]
    fn rmse_known_value() {
        let obs = [1.0, 2.0, 3.0];
        let sim = [1.0, 2.0, 4.0];
        assert_relative_eq!(rmse(&obs, &sim), (1.0_f64 / 3.0).sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn mae_symmetric_error() {
        assert_relative_eq!(mae(&[2.0, 2.0], &[1.0, 3.0]), 1.0, epsilon = 1e-10);
    }

    // --- Pairing ---

    #[test]
    fn paired_skips_missing_and_non_finite() {
        let obs = [Some(1.0), None, Some(f64::NAN), Some(4.0)];
        let sim = [1.5, 2.0, 3.0, 3.5];
        let (o, s) = paired(&obs, &sim);
        assert_eq!(o, vec![1.0, 4.0]);
        assert_eq!(s, vec![1.5, 3.5]);
    }

    #[test]
    fn comparison_needs_two_days() {
        assert!(StreamflowComparison::compute(&[Some(1.0), None], &[1.0, 2.0]).is_none());
        assert!(StreamflowComparison::compute(&[], &[]).is_none());
    }

    #[test]
    fn comparison_perfect_run() {
        let obs = [Some(1.0), Some(2.0), None, Some(3.0)];
        let sim = [1.0, 2.0, 9.0, 3.0];
        let c = StreamflowComparison::compute(&obs, &sim).unwrap();
        assert_eq!(c.n_days, 3);
        assert_relative_eq!(c.nse, 1.0);
        assert_relative_eq!(c.kge, 1.0, epsilon = 1e-10);
        assert_relative_eq!(c.pbias, 0.0);
        assert_relative_eq!(c.rmse, 0.0);
        assert_relative_eq!(c.mae, 0.0);
    }
}
