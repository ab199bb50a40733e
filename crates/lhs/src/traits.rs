use crate::DimensionSpec;
use crate::errors::{LhsError, Result};
use linfa::Float;
use ndarray::Array2;

/// Sampling method allowing to generate a DoE for given marginal distributions
///
/// A sampling method is able to generate a set of `ns` samples of a random vector
/// x = (x_i) with i in [1, nx] where each component x_i follows the marginal
/// distribution given by the ith [DimensionSpec].
///
/// Samples are first drawn as cumulative probabilities in the unit hypercube
/// `[0, 1)^nx` then mapped to each dimension domain by its quantile function.
pub trait SamplingMethod<F: Float> {
    /// Returns the marginal distribution of each component of a sample
    fn dimensions(&self) -> &[DimensionSpec];

    /// Generates a (ns, nx)-shaped array of cumulative probabilities belonging to `[0., 1.)^nx`
    ///
    /// # Parameters
    ///
    /// * `ns`: number of samples
    ///
    /// # Errors
    ///
    /// * [LhsError::InvalidSampleCount] when `ns` is zero
    fn normalized_sample(&self, ns: usize) -> Result<Array2<f64>>;

    /// Generates a (ns, nx)-shaped array of samples
    ///
    /// # Parameters
    ///
    /// * `ns`: number of samples
    ///
    /// # Returns
    ///
    /// * A (ns, nx) matrix where nx is the number of dimensions,
    ///   the jth column holds the quantiles of the jth distribution at
    ///   the probabilities returned by `normalized_sample`.
    fn sample(&self, ns: usize) -> Result<Array2<F>> {
        let probabilities = self.normalized_sample(ns)?;
        Ok(quantile_transform(self.dimensions(), &probabilities))
    }
}

/// Maps each column of cumulative probabilities through the quantile function
/// of the corresponding dimension
pub(crate) fn quantile_transform<F: Float>(
    dims: &[DimensionSpec],
    probabilities: &Array2<f64>,
) -> Array2<F> {
    let mut x = Array2::zeros(probabilities.raw_dim());
    for (j, dim) in dims.iter().enumerate() {
        let col = probabilities.column(j).mapv(|p| F::cast(dim.quantile(p)));
        x.column_mut(j).assign(&col);
    }
    x
}

pub(crate) fn check_sample_count(ns: usize) -> Result<()> {
    if ns == 0 {
        return Err(LhsError::InvalidSampleCount(ns));
    }
    Ok(())
}
