use crate::errors::{LhsError, Result};
use crate::utils::prev_float;
use statrs::distribution::{ContinuousCDF, Exp, LogNormal, Normal, Triangular};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

// Largest double strictly below 1.
const ONE_MINUS_EPS: f64 = 1. - f64::EPSILON / 2.;

/// Marginal distribution of one input dimension
///
/// Each variant knows how to map a cumulative probability `p` in `[0, 1)`
/// to a value of its natural domain through its quantile function,
/// which is how stratified probabilities become sample values.
///
/// ```
/// use lhsbox::DimensionSpec;
///
/// let x = DimensionSpec::uniform(5., 10.);
/// assert_eq!(x.quantile(0.5), 7.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(tag = "family", rename_all = "snake_case")
)]
pub enum DimensionSpec {
    /// Continuous uniform distribution on `[low, high)`
    Uniform {
        /// lower bound (included)
        low: f64,
        /// upper bound (excluded)
        high: f64,
    },
    /// Normal distribution N(mean, std_dev²)
    Normal {
        /// mean
        mean: f64,
        /// standard deviation
        std_dev: f64,
    },
    /// Log-normal distribution: ln(X) ~ N(mu, sigma²)
    LogNormal {
        /// mean of ln(X)
        mu: f64,
        /// standard deviation of ln(X)
        sigma: f64,
    },
    /// Triangular distribution on `[low, high]` peaking at `mode`
    Triangular {
        /// lower bound
        low: f64,
        /// most likely value
        mode: f64,
        /// upper bound
        high: f64,
    },
    /// Exponential distribution with the given rate (inverse of the mean)
    Exponential {
        /// rate parameter
        rate: f64,
    },
}

impl DimensionSpec {
    /// Uniform distribution on `[low, high)`
    pub fn uniform(low: f64, high: f64) -> Self {
        DimensionSpec::Uniform { low, high }
    }

    /// Normal distribution of given mean and standard deviation
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        DimensionSpec::Normal { mean, std_dev }
    }

    /// Log-normal distribution, `mu` and `sigma` being the parameters of ln(X)
    pub fn log_normal(mu: f64, sigma: f64) -> Self {
        DimensionSpec::LogNormal { mu, sigma }
    }

    /// Triangular distribution on `[low, high]` with given mode
    pub fn triangular(low: f64, mode: f64, high: f64) -> Self {
        DimensionSpec::Triangular { low, mode, high }
    }

    /// Exponential distribution with given rate
    pub fn exponential(rate: f64) -> Self {
        DimensionSpec::Exponential { rate }
    }

    /// Name of the distribution family
    pub fn family(&self) -> &'static str {
        match self {
            DimensionSpec::Uniform { .. } => "uniform",
            DimensionSpec::Normal { .. } => "normal",
            DimensionSpec::LogNormal { .. } => "log_normal",
            DimensionSpec::Triangular { .. } => "triangular",
            DimensionSpec::Exponential { .. } => "exponential",
        }
    }

    /// Checks parameters against the valid domain of the family.
    ///
    /// `dimension` is the position of this dimension in the caller's dimension list,
    /// reported back in [LhsError::InvalidParameter].
    pub fn validate(&self, dimension: usize) -> Result<()> {
        let invalid = |parameter: &'static str, reason: String| {
            Err(LhsError::InvalidParameter {
                dimension,
                parameter,
                reason,
            })
        };
        match *self {
            DimensionSpec::Uniform { low, high } => {
                if !low.is_finite() {
                    return invalid("low", format!("uniform bound must be finite, got {low}"));
                }
                if !high.is_finite() {
                    return invalid("high", format!("uniform bound must be finite, got {high}"));
                }
                if low >= high {
                    return invalid(
                        "high",
                        format!("uniform requires low < high, got low={low}, high={high}"),
                    );
                }
            }
            DimensionSpec::Normal { mean, std_dev } => {
                if !mean.is_finite() {
                    return invalid("mean", format!("normal mean must be finite, got {mean}"));
                }
                if !(std_dev.is_finite() && std_dev > 0.) {
                    return invalid(
                        "std_dev",
                        format!("normal requires a finite std_dev > 0, got {std_dev}"),
                    );
                }
            }
            DimensionSpec::LogNormal { mu, sigma } => {
                if !mu.is_finite() {
                    return invalid("mu", format!("log-normal mu must be finite, got {mu}"));
                }
                if !(sigma.is_finite() && sigma > 0.) {
                    return invalid(
                        "sigma",
                        format!("log-normal requires a finite sigma > 0, got {sigma}"),
                    );
                }
            }
            DimensionSpec::Triangular { low, mode, high } => {
                if !low.is_finite() {
                    return invalid("low", format!("triangular bound must be finite, got {low}"));
                }
                if !high.is_finite() {
                    return invalid("high", format!("triangular bound must be finite, got {high}"));
                }
                if low >= high {
                    return invalid(
                        "high",
                        format!("triangular requires low < high, got low={low}, high={high}"),
                    );
                }
                if !(low <= mode && mode <= high) {
                    return invalid(
                        "mode",
                        format!("triangular requires low <= mode <= high, got mode={mode}"),
                    );
                }
            }
            DimensionSpec::Exponential { rate } => {
                if !(rate.is_finite() && rate > 0.) {
                    return invalid(
                        "rate",
                        format!("exponential requires a finite rate > 0, got {rate}"),
                    );
                }
            }
        }
        if !(self.quantile(0.).is_finite() && self.quantile(ONE_MINUS_EPS).is_finite()) {
            let parameter = match self {
                DimensionSpec::Uniform { .. } | DimensionSpec::Triangular { .. } => "high",
                DimensionSpec::Normal { .. } => "std_dev",
                DimensionSpec::LogNormal { .. } => "sigma",
                DimensionSpec::Exponential { .. } => "rate",
            };
            return invalid(
                parameter,
                format!("{} quantiles overflow the f64 range", self.family()),
            );
        }
        Ok(())
    }

    /// Quantile function (inverse CDF) at cumulative probability `p`.
    ///
    /// `p` is expected in `[0, 1)`. Unbounded families clamp it into the open
    /// interval `(0, 1)` so that the result is always finite.
    /// Parameters are assumed valid (see [DimensionSpec::validate]),
    /// otherwise NaN is returned.
    pub fn quantile(&self, p: f64) -> f64 {
        if p.is_nan() {
            return f64::NAN;
        }
        let x = match *self {
            DimensionSpec::Uniform { low, high } => Some(uniform_quantile(low, high, p)),
            DimensionSpec::Normal { mean, std_dev } => Normal::new(mean, std_dev)
                .ok()
                .map(|d| d.inverse_cdf(open(p))),
            // ln(X) ~ N(mu, sigma²)
            DimensionSpec::LogNormal { mu, sigma } => Normal::new(mu, sigma)
                .ok()
                .map(|d| d.inverse_cdf(open(p)).exp()),
            DimensionSpec::Triangular { low, mode, high } => Triangular::new(low, high, mode)
                .ok()
                .map(|d| d.inverse_cdf(p.clamp(0., 1.))),
            DimensionSpec::Exponential { rate } => {
                Exp::new(rate).ok().map(|d| d.inverse_cdf(open(p)))
            }
        };
        x.unwrap_or(f64::NAN)
    }

    /// Cumulative distribution function at `x`
    pub fn cdf(&self, x: f64) -> f64 {
        let p = match *self {
            // halved to stay finite over the whole f64 range
            DimensionSpec::Uniform { low, high } => {
                Some(((x / 2. - low / 2.) / (high / 2. - low / 2.)).clamp(0., 1.))
            }
            DimensionSpec::Normal { mean, std_dev } => {
                Normal::new(mean, std_dev).ok().map(|d| d.cdf(x))
            }
            DimensionSpec::LogNormal { mu, sigma } => {
                LogNormal::new(mu, sigma).ok().map(|d| d.cdf(x))
            }
            DimensionSpec::Triangular { low, mode, high } => {
                Triangular::new(low, high, mode).ok().map(|d| d.cdf(x))
            }
            DimensionSpec::Exponential { rate } => Exp::new(rate).ok().map(|d| d.cdf(x)),
        };
        p.unwrap_or(f64::NAN)
    }
}

/// Uniform quantile in `[low, high)`, written as a convex combination so that
/// `high - low` never overflows.
fn uniform_quantile(low: f64, high: f64, p: f64) -> f64 {
    let x = low * (1. - p) + high * p;
    if x < high {
        x.max(low)
    } else {
        prev_float(high).max(low)
    }
}

/// Validates a whole dimension set: non-empty and every dimension valid
pub(crate) fn validate_dimensions(dims: &[DimensionSpec]) -> Result<()> {
    if dims.is_empty() {
        return Err(LhsError::EmptyDimensionSet);
    }
    dims.iter()
        .enumerate()
        .try_for_each(|(i, dim)| dim.validate(i))
}

/// Restricts a probability to `(0, 1)`
fn open(p: f64) -> f64 {
    p.clamp(f64::MIN_POSITIVE, ONE_MINUS_EPS)
}

/// Keeps a drawn probability strictly below 1
pub(crate) fn below_one(p: f64) -> f64 {
    p.min(ONE_MINUS_EPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_uniform_quantile() {
        let dim = DimensionSpec::uniform(5., 10.);
        assert_eq!(dim.quantile(0.), 5.);
        assert_abs_diff_eq!(dim.quantile(0.2), 6., epsilon = 1e-12);
        assert!(dim.quantile(ONE_MINUS_EPS) < 10.);
        assert_abs_diff_eq!(dim.cdf(6.), 0.2, epsilon = 1e-12);
        assert_eq!(dim.cdf(11.), 1.);
    }

    #[test]
    fn test_uniform_upper_bound_excluded() {
        let dim = DimensionSpec::uniform(1., 3.);
        let x = dim.quantile(ONE_MINUS_EPS);
        assert!(x < 3.);
        assert!(x >= 1.);
    }

    #[test]
    fn test_uniform_narrow_range() {
        let high = 1. + 2. * f64::EPSILON;
        let dim = DimensionSpec::uniform(1., high);
        assert!(dim.validate(0).is_ok());
        for k in 0..100 {
            let x = dim.quantile(k as f64 / 100.);
            assert!((1. ..high).contains(&x), "{x}");
        }
        assert_eq!(dim.quantile(ONE_MINUS_EPS), 1. + f64::EPSILON);
    }

    #[test]
    fn test_uniform_wide_range() {
        let dim = DimensionSpec::uniform(-1e308, 1e308);
        assert!(dim.validate(0).is_ok());
        assert_eq!(dim.quantile(0.), -1e308);
        assert_eq!(dim.quantile(0.5), 0.);
        let mut prev = f64::NEG_INFINITY;
        for k in 0..20 {
            let x = dim.quantile(k as f64 / 20.);
            assert!(x.is_finite() && x > prev && x < 1e308);
            prev = x;
        }
        assert!(dim.quantile(ONE_MINUS_EPS) < 1e308);
        assert_abs_diff_eq!(dim.cdf(0.), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(dim.cdf(5e307), 0.75, epsilon = 1e-15);
    }

    #[test]
    fn test_normal_quantile() {
        let dim = DimensionSpec::normal(10., 2.);
        assert_abs_diff_eq!(dim.quantile(0.5), 10., epsilon = 1e-12);
        assert_abs_diff_eq!(dim.quantile(0.975), 10. + 2. * 1.959963984540054, epsilon = 1e-10);
        assert!(dim.quantile(0.).is_finite());
        assert!(dim.quantile(0.) < -50.);
        assert_abs_diff_eq!(dim.cdf(10.), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_log_normal_quantile() {
        let dim = DimensionSpec::log_normal(0., 1.);
        assert_abs_diff_eq!(dim.quantile(0.5), 1., epsilon = 1e-12);
        assert!(dim.quantile(0.) > 0.);
        assert_eq!(dim.cdf(-1.), 0.);
        assert_abs_diff_eq!(dim.cdf(1.), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_triangular_quantile() {
        let dim = DimensionSpec::triangular(0., 1., 4.);
        assert_eq!(dim.quantile(0.), 0.);
        // mass left of the mode is 1/4
        assert_abs_diff_eq!(dim.quantile(0.25), 1., epsilon = 1e-12);
        assert_abs_diff_eq!(dim.cdf(1.), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(dim.quantile(2. / 3.), 2., epsilon = 1e-12);
        assert_eq!(dim.cdf(4.), 1.);
    }

    #[test]
    fn test_triangular_degenerate_mode() {
        let dim = DimensionSpec::triangular(2., 2., 3.);
        assert!(dim.validate(0).is_ok());
        assert_abs_diff_eq!(dim.quantile(0.75), 2.5, epsilon = 1e-12);
        let dim = DimensionSpec::triangular(2., 3., 3.);
        assert!(dim.validate(0).is_ok());
        assert_abs_diff_eq!(dim.quantile(0.25), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_exponential_quantile() {
        let dim = DimensionSpec::exponential(2.);
        assert_abs_diff_eq!(dim.quantile(0.), 0., epsilon = 1e-300);
        assert_abs_diff_eq!(dim.quantile(0.5), std::f64::consts::LN_2 / 2., epsilon = 1e-12);
        assert!(dim.quantile(ONE_MINUS_EPS).is_finite());
        assert_abs_diff_eq!(dim.cdf(std::f64::consts::LN_2 / 2.), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_cdf_inverts_quantile() {
        let dims = [
            DimensionSpec::uniform(-3., 7.),
            DimensionSpec::normal(1., 0.5),
            DimensionSpec::log_normal(0.5, 0.25),
            DimensionSpec::triangular(-1., 0., 2.),
            DimensionSpec::exponential(0.1),
        ];
        for dim in dims {
            for k in 1..20 {
                let p = k as f64 / 20.;
                assert_abs_diff_eq!(dim.cdf(dim.quantile(p)), p, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let cases = [
            (DimensionSpec::uniform(10., 2.), "high"),
            (DimensionSpec::uniform(1., 1.), "high"),
            (DimensionSpec::uniform(f64::NAN, 1.), "low"),
            (DimensionSpec::uniform(0., f64::INFINITY), "high"),
            (DimensionSpec::normal(0., 0.), "std_dev"),
            (DimensionSpec::normal(0., -1.), "std_dev"),
            (DimensionSpec::normal(f64::NAN, 1.), "mean"),
            (DimensionSpec::log_normal(0., 0.), "sigma"),
            (DimensionSpec::triangular(0., 5., 4.), "mode"),
            (DimensionSpec::triangular(4., 4., 4.), "high"),
            (DimensionSpec::exponential(0.), "rate"),
            (DimensionSpec::exponential(f64::NAN), "rate"),
            (DimensionSpec::normal(0., 1e307), "std_dev"),
            (DimensionSpec::normal(1.7e308, 2e307), "std_dev"),
            (DimensionSpec::log_normal(0., 100.), "sigma"),
            (DimensionSpec::log_normal(710., 1.), "sigma"),
            (DimensionSpec::triangular(-1e308, 0., 1e308), "high"),
            (DimensionSpec::exponential(1e-310), "rate"),
        ];
        for (dim, expected) in cases {
            match dim.validate(3) {
                Err(LhsError::InvalidParameter {
                    dimension,
                    parameter,
                    ..
                }) => {
                    assert_eq!(dimension, 3);
                    assert_eq!(parameter, expected, "{dim:?}");
                }
                other => panic!("expected invalid parameter for {dim:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_extreme_valid_parameters() {
        let dims = [
            DimensionSpec::normal(0., 1e306),
            DimensionSpec::log_normal(0., 50.),
            DimensionSpec::triangular(-1e150, 0., 1e150),
            DimensionSpec::exponential(1e-300),
        ];
        for dim in dims {
            assert!(dim.validate(0).is_ok(), "{dim:?}");
            for p in [0., 0.5, ONE_MINUS_EPS] {
                assert!(dim.quantile(p).is_finite(), "{dim:?} at {p}");
            }
        }
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(matches!(
            validate_dimensions(&[]),
            Err(LhsError::EmptyDimensionSet)
        ));
        let dims = [DimensionSpec::uniform(0., 1.), DimensionSpec::normal(0., -2.)];
        assert!(matches!(
            validate_dimensions(&dims),
            Err(LhsError::InvalidParameter { dimension: 1, .. })
        ));
    }

    #[test]
    fn test_family() {
        assert_eq!(DimensionSpec::uniform(0., 1.).family(), "uniform");
        assert_eq!(DimensionSpec::log_normal(0., 1.).family(), "log_normal");
        assert_eq!(DimensionSpec::exponential(1.).family(), "exponential");
    }

    #[test]
    fn test_error_message() {
        let err = DimensionSpec::uniform(10., 2.).validate(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter `high` for dimension 0: uniform requires low < high, got low=10, high=2"
        );
    }
}
