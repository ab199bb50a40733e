use crate::distributions::{below_one, validate_dimensions};
use crate::errors::Result;
use crate::traits::check_sample_count;
use crate::{DimensionSpec, SamplingMethod};
use linfa::Float;
use log::debug;
use ndarray::{Array, Array2};
use ndarray_rand::{RandomExt, rand::Rng, rand::SeedableRng, rand_distr::Uniform};
use rand_xoshiro::Xoshiro256Plus;
use std::marker::PhantomData;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// The Random design consists in drawing samples independently (plain Monte Carlo).
///
/// It has no stratification property and is mostly useful as a baseline
/// when assessing the coverage of a [crate::Lhs] design.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Random<F: Float, R: Rng + Clone> {
    /// Marginal distribution of each component of x
    dims: Vec<DimensionSpec>,
    /// Random generator used for reproducibility
    rng: R,
    #[cfg_attr(feature = "serializable", serde(skip))]
    phantom: PhantomData<F>,
}

impl Random<f64, Xoshiro256Plus> {
    /// Constructor given the marginal distributions of the sample components
    ///
    /// ```
    /// use lhsbox::{DimensionSpec, Random};
    ///
    /// let doe = Random::new(&[DimensionSpec::uniform(0.0, 1.0), DimensionSpec::uniform(5.0, 10.0)]);
    /// assert!(doe.is_ok());
    /// ```
    pub fn new(dims: &[DimensionSpec]) -> Result<Self> {
        validate_dimensions(dims)?;
        Ok(Random {
            dims: dims.to_vec(),
            rng: Xoshiro256Plus::from_entropy(),
            phantom: PhantomData,
        })
    }
}

impl<F: Float, R: Rng + Clone> Random<F, R> {
    /// Constructor given the marginal distributions of the sample components
    /// and a random generator for reproducibility
    pub fn new_with_rng(dims: &[DimensionSpec], rng: R) -> Result<Self> {
        validate_dimensions(dims)?;
        Ok(Random {
            dims: dims.to_vec(),
            rng,
            phantom: PhantomData,
        })
    }

    /// Set random generator
    pub fn with_rng<R2: Rng + Clone>(self, rng: R2) -> Random<F, R2> {
        Random {
            dims: self.dims,
            rng,
            phantom: PhantomData,
        }
    }
}

impl<F: Float, R: Rng + Clone> SamplingMethod<F> for Random<F, R> {
    fn dimensions(&self) -> &[DimensionSpec] {
        &self.dims
    }

    fn normalized_sample(&self, ns: usize) -> Result<Array2<f64>> {
        check_sample_count(ns)?;
        let nx = self.dims.len();
        debug!("Random sampling of {ns} points in {nx} dimensions");
        let mut rng = self.rng.clone();
        Ok(Array::random_using((ns, nx), Uniform::new(0., 1.), &mut rng).mapv(below_one))
    }
}
