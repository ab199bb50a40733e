use crate::distributions::validate_dimensions;
use crate::errors::Result;
use crate::traits::{check_sample_count, quantile_transform};
use crate::utils::{pdist, prev_float};
use crate::{DimensionSpec, SamplingMethod};
use linfa::Float;
use log::debug;
use ndarray::{Array, Array2, aview1};
use ndarray_rand::{
    RandomExt, rand::Rng, rand::SeedableRng, rand::seq::SliceRandom, rand_distr::Uniform,
};
use ndarray_stats::QuantileExt;
use rand_xoshiro::Xoshiro256Plus;
use std::marker::PhantomData;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Number of candidate designs drawn by maximin LHS
const MAXIMIN_ITERS: usize = 5;

/// Kinds of Latin Hypercube Design
#[derive(Clone, Debug, Default, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LhsKind {
    /// sample is choosen randomly within its latin hypercube intervals
    #[default]
    Classic,
    /// sample is the middle of its latin hypercube intervals
    Centered,
    /// distance between points is maximized
    Maximin,
    /// sample is the middle of its latin hypercube intervals and distance between points is maximized
    CenteredMaximin,
}

/// The LHS design is built as follows: the cumulative probability range `[0, 1)`
/// of each dimension is divided into ns equally probable sections
/// where ns is the number of sampling points, and one probability is selected in each section.
/// Sections are then randomly paired across dimensions and probabilities are mapped
/// through the quantile function of each dimension.
/// The selection method gives different kind of LHS (see [LhsKind])
///
/// The random generator is used as a template: each sampling starts from
/// a copy of it, hence a given `Lhs` always returns the same design for a given `ns`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct Lhs<F: Float, R: Rng + Clone> {
    /// Marginal distribution of each component of x
    dims: Vec<DimensionSpec>,
    /// The requested kind of LHS
    kind: LhsKind,
    /// Random generator used for reproducibility
    rng: R,
    #[cfg_attr(feature = "serializable", serde(skip))]
    phantom: PhantomData<F>,
}

/// LHS with default random generator
impl Lhs<f64, Xoshiro256Plus> {
    /// Constructor given the marginal distributions of the sample components
    ///
    /// ```
    /// use lhsbox::{DimensionSpec, Lhs};
    ///
    /// let doe = Lhs::new(&[DimensionSpec::uniform(0., 1.), DimensionSpec::normal(5., 2.)]);
    /// assert!(doe.is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// * [crate::LhsError::EmptyDimensionSet] when `dims` is empty
    /// * [crate::LhsError::InvalidParameter] when a distribution parameter is invalid
    pub fn new(dims: &[DimensionSpec]) -> Result<Self> {
        validate_dimensions(dims)?;
        Ok(Self::new_unchecked(dims, Xoshiro256Plus::from_entropy()))
    }
}

impl<F: Float, R: Rng + Clone> SamplingMethod<F> for Lhs<F, R> {
    fn dimensions(&self) -> &[DimensionSpec] {
        &self.dims
    }

    fn normalized_sample(&self, ns: usize) -> Result<Array2<f64>> {
        self.stratified(ns).map(|(probabilities, _)| probabilities)
    }
}

impl<F: Float, R: Rng + Clone> Lhs<F, R> {
    /// Constructor with given marginal distributions and random generator.
    /// * `dims`: marginal distribution of each component of x
    /// * `rng`: random generator used for reproducibility
    pub fn new_with_rng(dims: &[DimensionSpec], rng: R) -> Result<Self> {
        validate_dimensions(dims)?;
        Ok(Self::new_unchecked(dims, rng))
    }

    /// `dims` must have been validated already
    pub(crate) fn new_unchecked(dims: &[DimensionSpec], rng: R) -> Self {
        Lhs {
            dims: dims.to_vec(),
            kind: LhsKind::default(),
            rng,
            phantom: PhantomData,
        }
    }

    /// Sets the kind of LHS
    pub fn kind(mut self, kind: LhsKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng + Clone>(self, rng: R2) -> Lhs<F, R2> {
        Lhs {
            dims: self.dims,
            kind: self.kind,
            rng,
            phantom: PhantomData,
        }
    }

    /// Generates `ns` samples together with the stratification they come from
    ///
    /// ```
    /// use lhsbox::{DimensionSpec, Lhs};
    /// use ndarray_rand::rand::SeedableRng;
    /// use rand_xoshiro::Xoshiro256Plus;
    ///
    /// let design = Lhs::new(&[DimensionSpec::uniform(0., 10.)])
    ///     .unwrap()
    ///     .with_rng(Xoshiro256Plus::seed_from_u64(42))
    ///     .design(4)
    ///     .unwrap();
    /// let mut strata = design.strata().column(0).to_vec();
    /// strata.sort();
    /// assert_eq!(strata, vec![0, 1, 2, 3]);
    /// ```
    pub fn design(&self, ns: usize) -> Result<LhsDesign<F>> {
        let (probabilities, strata) = self.stratified(ns)?;
        let samples = quantile_transform(&self.dims, &probabilities);
        Ok(LhsDesign {
            samples,
            probabilities,
            strata,
        })
    }

    fn stratified(&self, ns: usize) -> Result<(Array2<f64>, Array2<usize>)> {
        check_sample_count(ns)?;
        debug!(
            "{:?} LHS of {} points in {} dimensions",
            self.kind,
            ns,
            self.dims.len()
        );
        let mut rng = self.rng.clone();
        let res = match self.kind {
            LhsKind::Classic => self._classic_lhs(ns, &mut rng),
            LhsKind::Centered => self._centered_lhs(ns, &mut rng),
            LhsKind::Maximin => self._maximin_lhs(ns, false, MAXIMIN_ITERS, &mut rng),
            LhsKind::CenteredMaximin => self._maximin_lhs(ns, true, MAXIMIN_ITERS, &mut rng),
        };
        Ok(res)
    }

    /// Draws one random permutation of the strata `0..ns` per dimension
    fn _permutations(&self, ns: usize, rng: &mut R) -> Array2<usize> {
        let nx = self.dims.len();
        let mut strata = Array2::zeros((ns, nx));
        let mut perm: Vec<usize> = (0..ns).collect();
        for mut col in strata.columns_mut() {
            perm.shuffle(rng);
            col.assign(&aview1(&perm));
        }
        strata
    }

    fn _classic_lhs(&self, ns: usize, rng: &mut R) -> (Array2<f64>, Array2<usize>) {
        let nx = self.dims.len();
        let rnd = Array::random_using((ns, nx), Uniform::new(0., 1.), rng);
        let strata = self._permutations(ns, rng);

        let n = ns as f64;
        let mut lhs = Array2::zeros((ns, nx));
        for ((i, j), p) in lhs.indexed_iter_mut() {
            let k = strata[[i, j]];
            // rounding must not push p into the next stratum
            *p = ((k as f64 + rnd[[k, j]]) / n).min(prev_float((k + 1) as f64 / n));
        }
        (lhs, strata)
    }

    fn _centered_lhs(&self, ns: usize, rng: &mut R) -> (Array2<f64>, Array2<usize>) {
        let strata = self._permutations(ns, rng);
        let n = ns as f64;
        let lhs = strata.mapv(|k| (k as f64 + 0.5) / n);
        (lhs, strata)
    }

    fn _candidate_lhs(
        &self,
        ns: usize,
        centered: bool,
        rng: &mut R,
    ) -> (Array2<f64>, Array2<usize>) {
        if centered {
            self._centered_lhs(ns, rng)
        } else {
            self._classic_lhs(ns, rng)
        }
    }

    fn _maximin_lhs(
        &self,
        ns: usize,
        centered: bool,
        max_iters: usize,
        rng: &mut R,
    ) -> (Array2<f64>, Array2<usize>) {
        let mut lhs_maximin = self._candidate_lhs(ns, centered, rng);
        if ns < 2 {
            return lhs_maximin;
        }
        let mut max_dist = min_distance(&lhs_maximin.0);
        for _ in 1..max_iters {
            let lhs = self._candidate_lhs(ns, centered, rng);
            let d_min = min_distance(&lhs.0);
            if max_dist < d_min {
                max_dist = d_min;
                lhs_maximin = lhs;
            }
        }
        debug!("Maximin LHS min distance = {max_dist}");
        lhs_maximin
    }
}

fn min_distance(x: &Array2<f64>) -> f64 {
    *pdist(x).min().unwrap_or(&0.)
}

/// Result of a Latin Hypercube sampling with its stratification.
///
/// All arrays are (ns, nx)-shaped and aligned element-wise: the sample
/// `samples[[i, j]]` is the quantile of the jth distribution at
/// `probabilities[[i, j]]` which belongs to the stratum
/// `[k/ns, (k+1)/ns)` with `k = strata[[i, j]]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct LhsDesign<F: Float> {
    samples: Array2<F>,
    probabilities: Array2<f64>,
    strata: Array2<usize>,
}

impl<F: Float> LhsDesign<F> {
    /// Sample points, one row per sample
    pub fn samples(&self) -> &Array2<F> {
        &self.samples
    }

    /// Cumulative probabilities the samples are drawn from
    pub fn probabilities(&self) -> &Array2<f64> {
        &self.probabilities
    }

    /// Stratum index of each probability
    pub fn strata(&self) -> &Array2<usize> {
        &self.strata
    }

    /// Number of samples
    pub fn nsamples(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of dimensions
    pub fn ndims(&self) -> usize {
        self.samples.ncols()
    }

    /// Consumes the design keeping only the sample points
    pub fn into_samples(self) -> Array2<F> {
        self.samples
    }
}

/// Draws `ns` classic Latin Hypercube samples of the given marginal distributions.
///
/// When a `seed` is given the result is reproducible, otherwise the random
/// generator is seeded from system entropy.
///
/// ```
/// use lhsbox::{DimensionSpec, sample};
///
/// let dims = [DimensionSpec::uniform(0., 1.), DimensionSpec::normal(0., 1.)];
/// let x = sample(5, &dims, Some(42)).unwrap();
/// assert_eq!(x.dim(), (5, 2));
/// assert_eq!(x, sample(5, &dims, Some(42)).unwrap());
/// ```
///
/// # Errors
///
/// * [crate::LhsError::EmptyDimensionSet] when `dimensions` is empty
/// * [crate::LhsError::InvalidParameter] when a distribution parameter is invalid
/// * [crate::LhsError::InvalidSampleCount] when `ns` is zero
pub fn sample(ns: usize, dimensions: &[DimensionSpec], seed: Option<u64>) -> Result<Array2<f64>> {
    validate_dimensions(dimensions)?;
    check_sample_count(ns)?;
    Lhs::<f64, _>::new_unchecked(dimensions, seeded_rng(seed)).sample(ns)
}

/// Generator seeded from `seed` or from system entropy, to be called once
/// the request has been validated
pub(crate) fn seeded_rng(seed: Option<u64>) -> Xoshiro256Plus {
    match seed {
        Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
        None => Xoshiro256Plus::from_entropy(),
    }
}
