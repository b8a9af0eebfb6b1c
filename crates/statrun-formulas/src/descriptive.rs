//! Descriptive statistics over a sequence of numbers.

use statrun_core::FormulaError;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64, FormulaError> {
    if values.is_empty() {
        return Err(FormulaError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Result<f64, FormulaError> {
    if values.is_empty() {
        return Err(FormulaError::EmptyInput);
    }
    let sorted = sort(values);
    let n = sorted.len();
    if n % 2 == 0 {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Ok(sorted[n / 2])
    }
}

/// Sample variance with Bessel's correction (`n - 1` denominator).
pub fn sample_variance(values: &[f64]) -> Result<f64, FormulaError> {
    let n = values.len();
    if n < 2 {
        return Err(FormulaError::InsufficientData {
            required: 2,
            got: n,
        });
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(squares / (n - 1) as f64)
}

/// Sample standard deviation.
pub fn sample_std(values: &[f64]) -> Result<f64, FormulaError> {
    sample_variance(values).map(f64::sqrt)
}

/// Ascending copy of `values`.
pub fn sort(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
