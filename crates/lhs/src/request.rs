use crate::distributions::validate_dimensions;
use crate::errors::Result;
use crate::lhs::seeded_rng;
use crate::traits::check_sample_count;
use crate::{DimensionSpec, Lhs, LhsDesign, LhsKind};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// A sampling request as submitted by a front-end (dashboard, CLI, ...)
///
/// ```
/// use lhsbox::{DimensionSpec, SampleRequest};
///
/// let design = SampleRequest::new(100, vec![DimensionSpec::uniform(0., 1.); 3])
///     .seed(42)
///     .execute()
///     .unwrap();
/// assert_eq!(design.samples().dim(), (100, 3));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct SampleRequest {
    /// Number of samples
    pub samples: usize,
    /// Marginal distribution of each dimension
    pub dimensions: Vec<DimensionSpec>,
    /// Seed for reproducibility, drawn from system entropy when missing
    #[cfg_attr(feature = "serializable", serde(default))]
    pub seed: Option<u64>,
    /// Kind of LHS
    #[cfg_attr(feature = "serializable", serde(default))]
    pub kind: LhsKind,
}

impl SampleRequest {
    /// Request of `samples` classic LHS samples without seed
    pub fn new(samples: usize, dimensions: Vec<DimensionSpec>) -> Self {
        SampleRequest {
            samples,
            dimensions,
            seed: None,
            kind: LhsKind::default(),
        }
    }

    /// Sets the seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the kind of LHS
    pub fn kind(mut self, kind: LhsKind) -> Self {
        self.kind = kind;
        self
    }

    /// Parses a JSON request such as
    /// `{"samples": 10, "dimensions": [{"family": "uniform", "low": 0, "high": 1}], "seed": 42}`
    #[cfg(feature = "serializable")]
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Validates the request and draws the Latin Hypercube design
    pub fn execute(&self) -> Result<LhsDesign<f64>> {
        validate_dimensions(&self.dimensions)?;
        check_sample_count(self.samples)?;
        Lhs::<f64, _>::new_unchecked(&self.dimensions, seeded_rng(self.seed))
            .kind(self.kind)
            .design(self.samples)
    }
}
