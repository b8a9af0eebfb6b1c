//! Discrete distributions: binomial, hypergeometric, negative binomial and Poisson.
//!
//! Binomial coefficients are computed exactly with [`BigUint`] and only
//! converted to `f64` at the end. Terms whose coefficient or power would
//! leave the `f64` range are evaluated in log space instead.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use statrun_core::FormulaError;

use crate::special::ln_gamma;

/// Exact binomial coefficient C(n, k); zero when `k > n`.
pub fn comb(n: u64, k: u64) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let k = k.min(n - k);
    let mut result = BigUint::one();
    for i in 0..k {
        // C(n, i) * (n - i) / (i + 1) == C(n, i + 1), always exact
        result = result * (n - i) / (i + 1);
    }
    result
}

/// P(X = x) for X ~ Binomial(n, p).
pub fn binomial_dist(x: i64, n: i64, p: f64) -> Result<f64, FormulaError> {
    let x = non_negative("x", x)?;
    let n = non_negative("n", n)?;
    let p = probability("p", p)?;
    Ok(binomial_pmf(x, n, p))
}

/// P(X ≤ x) for X ~ Binomial(n, p). Zero for negative `x`.
pub fn binomial_dist_cuml(x: i64, n: i64, p: f64) -> Result<f64, FormulaError> {
    let n = non_negative("n", n)?;
    let p = probability("p", p)?;
    let Ok(x) = u64::try_from(x) else {
        return Ok(0.0);
    };
    Ok((0..=x.min(n)).map(|i| binomial_pmf(i, n, p)).sum())
}

/// P(X = x) when drawing `n` items without replacement from a population of
/// `population` containing `k` successes.
pub fn hypergeo_dist(x: i64, population: i64, n: i64, k: i64) -> Result<f64, FormulaError> {
    let x = non_negative("x", x)?;
    let population = non_negative("N", population)?;
    let n = non_negative("n", n)?;
    let k = non_negative("k", k)?;
    if k > population {
        return Err(FormulaError::out_of_domain(
            "k",
            format!("cannot exceed N (got {k} > {population})"),
        ));
    }
    if n > population {
        return Err(FormulaError::out_of_domain(
            "n",
            format!("cannot exceed N (got {n} > {population})"),
        ));
    }
    if x > n {
        return Err(FormulaError::out_of_domain(
            "x",
            format!("cannot exceed n (got {x} > {n})"),
        ));
    }

    let numerator = comb(k, x) * comb(population - k, n - x);
    let denominator = comb(population, n);
    Ok(ratio(&numerator, &denominator))
}

/// P(X = x) where X is the trial on which the `k`-th success occurs.
pub fn inv_binomial(x: i64, k: i64, p: f64) -> Result<f64, FormulaError> {
    let x = at_least_one("x", x)?;
    let k = at_least_one("k", k)?;
    let p = probability("p", p)?;
    if x < k {
        return Ok(0.0);
    }
    Ok(weighted(&comb(x - 1, k - 1), p, k, x - k))
}

/// P(X = x) for X ~ Poisson(mu).
pub fn poisson_dist(x: i64, mu: f64) -> Result<f64, FormulaError> {
    let x = non_negative("x", x)?;
    let mu = rate("mu", mu)?;
    Ok(poisson_pmf(x, mu))
}

/// P(X ≤ x) for X ~ Poisson(mu). Zero for negative `x`.
pub fn poisson_dist_cuml(x: i64, mu: f64) -> Result<f64, FormulaError> {
    let mu = rate("mu", mu)?;
    let Ok(x) = u64::try_from(x) else {
        return Ok(0.0);
    };
    let mut total = 0.0;
    for i in 0..=x {
        let term = poisson_pmf(i, mu);
        total += term;
        // past the mode the terms only shrink
        if i as f64 > mu && term < f64::EPSILON * total {
            break;
        }
    }
    Ok(total.min(1.0))
}

fn binomial_pmf(x: u64, n: u64, p: f64) -> f64 {
    if x > n {
        return 0.0;
    }
    weighted(&comb(n, x), p, x, n - x)
}

/// `coefficient * p^successes * (1 - p)^failures`.
fn weighted(coefficient: &BigUint, p: f64, successes: u64, failures: u64) -> f64 {
    let power = p.powf(successes as f64) * (1.0 - p).powf(failures as f64);
    if coefficient.bits() < 1000 && power >= f64::MIN_POSITIVE {
        return to_f64(coefficient) * power;
    }
    (ln_big(coefficient) + ln_pow(p, successes) + ln_pow(1.0 - p, failures)).exp()
}

/// `ln(base^exponent)`, with `0^0 == 1`.
fn ln_pow(base: f64, exponent: u64) -> f64 {
    if exponent == 0 {
        0.0
    } else {
        exponent as f64 * base.ln()
    }
}

/// Natural log of an integer too large for `f64`.
fn ln_big(value: &BigUint) -> f64 {
    let shift = value.bits().saturating_sub(1000);
    to_f64(&(value >> shift)).ln() + shift as f64 * std::f64::consts::LN_2
}

/// e^-mu mu^x / x!, evaluated in log space.
fn poisson_pmf(x: u64, mu: f64) -> f64 {
    if mu == 0.0 {
        return if x == 0 { 1.0 } else { 0.0 };
    }
    let x = x as f64;
    (-mu + x * mu.ln() - ln_gamma(x + 1.0)).exp()
}

/// `numerator / denominator` for arbitrarily large integers.
fn ratio(numerator: &BigUint, denominator: &BigUint) -> f64 {
    // keep both operands inside f64 range; the quotient is unaffected
    let shift = denominator.bits().saturating_sub(1000);
    to_f64(&(numerator >> shift)) / to_f64(&(denominator >> shift))
}

fn to_f64(value: &BigUint) -> f64 {
    value.to_f64().unwrap_or(f64::INFINITY)
}

fn non_negative(name: &str, value: i64) -> Result<u64, FormulaError> {
    u64::try_from(value).map_err(|_| {
        FormulaError::out_of_domain(name, format!("must be non-negative (got {value})"))
    })
}

fn at_least_one(name: &str, value: i64) -> Result<u64, FormulaError> {
    match u64::try_from(value) {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(FormulaError::out_of_domain(
            name,
            format!("must be at least 1 (got {value})"),
        )),
    }
}

fn probability(name: &str, p: f64) -> Result<f64, FormulaError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(FormulaError::out_of_domain(
            name,
            format!("must be between 0 and 1 (got {p})"),
        ))
    }
}

fn rate(name: &str, mu: f64) -> Result<f64, FormulaError> {
    if mu.is_finite() && mu >= 0.0 {
        Ok(mu)
    } else {
        Err(FormulaError::out_of_domain(
            name,
            format!("must be a finite non-negative number (got {mu})"),
        ))
    }
}
