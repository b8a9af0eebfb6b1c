//! Standard normal interval probabilities.

use statrun_core::FormulaError;

use crate::special::standard_normal_cdf;

/// Probability that Z ~ N(0, 1) falls between the given bounds.
///
/// An absent bound is unbounded on that side: `(None, upper)` is Φ(upper),
/// `(lower, None)` is 1 − Φ(lower). At least one bound must be present.
pub fn std_normal_dist_cuml(lower: Option<f64>, upper: Option<f64>) -> Result<f64, FormulaError> {
    match (lower, upper) {
        (None, None) => Err(FormulaError::InvalidCombination(
            "at least one of z_lower or z_upper is required".to_string(),
        )),
        (None, Some(upper)) => Ok(standard_normal_cdf(upper)),
        (Some(lower), None) => Ok(1.0 - standard_normal_cdf(lower)),
        (Some(lower), Some(upper)) if lower > upper => Err(FormulaError::InvalidCombination(
            format!("z_lower ({lower}) must not exceed z_upper ({upper})"),
        )),
        (Some(lower), Some(upper)) => Ok(standard_normal_cdf(upper) - standard_normal_cdf(lower)),
    }
}
