/*!
This library implements [Latin Hypercube sampling](https://en.wikipedia.org/wiki/Latin_hypercube_sampling)
(LHS) of random vectors given the marginal distribution of each of their components.
Compared to independent random sampling, LHS covers the joint input space more evenly
which is what Monte Carlo estimations of expectations (uncertainty quantification,
engineering simulations, ...) benefit from.

The cumulative probability range `[0, 1)` of each dimension is divided into `ns` equally
probable strata, one probability is drawn within each stratum, strata are randomly paired
across dimensions and probabilities are finally mapped to the dimension domain by its
quantile function (inverse CDF).

Example:
```
use lhsbox::{DimensionSpec, Lhs, LhsKind, Random, SamplingMethod, sample};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

// Samples are 2-dimensional: x0 ~ U[5, 10), x1 ~ N(0, 1)
let dims = [DimensionSpec::uniform(5., 10.), DimensionSpec::normal(0., 1.)];
// We generate five reproducible samples using classic Latin Hypercube sampling.
let samples = sample(5, &dims, Some(42)).unwrap();
// or else with centered Latin Hypercube sampling
let samples = Lhs::new(&dims).unwrap().kind(LhsKind::Centered).sample(5).unwrap();
// or else randomly with random generator for reproducibility
let samples = Random::new(&dims)
    .unwrap()
    .with_rng(Xoshiro256Plus::seed_from_u64(42))
    .sample(5)
    .unwrap();
```

This library contains two sampling methods:
* [Latin Hypercube Sampling](crate::lhs::Lhs),
* [Random Sampling](crate::random::Random)

With the `serializable` feature, distributions, requests and designs can be
(de)serialized with [serde](https://serde.rs), see `SampleRequest::from_json`.

*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod distributions;
mod errors;
mod lhs;
mod random;
mod request;
mod traits;
mod utils;

pub use distributions::*;
pub use errors::*;
pub use lhs::*;
pub use random::*;
pub use request::*;
pub use traits::*;
