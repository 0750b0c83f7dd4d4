use std::fmt::{self, Display};
use rand::RngCore;
use serde::{Serialize, Deserialize};
use mathru::special::gamma;

mod uniform;

pub use uniform::*;

mod betabinom;

pub use betabinom::*;

mod zipf;

pub use zipf::*;

/// Capability set shared by the candidate discrete families: each family
/// names its parameters, evaluates the log of its probability mass given a
/// packed parameter vector, and generates random variates.
///
/// Parameters are packed in the order reported by `param_names`, with the
/// integer location shift always last. Parameters that are integers by nature
/// (interval endpoints, trial count, location) are rounded to the nearest
/// integer at evaluation time, so a continuous optimizer can search over them.
/// A parameter vector outside the family's valid region, or an observation
/// outside the support it implies, evaluates to `-inf`; implementations never
/// panic on such inputs.
pub trait Discrete {

    /// Parameter names in packing order; the location shift is last.
    fn param_names(&self) -> &'static [&'static str];

    /// Natural log of the probability mass at `x` under the packed parameters.
    fn log_pmf(&self, params : &[f64], x : i64) -> f64;

    /// Draws one variate per destination slot under the packed parameters.
    fn sample_into(&self, params : &[f64], dst : &mut [i64], rng : &mut dyn RngCore);

    fn pmf(&self, params : &[f64], x : i64) -> f64 {
        self.log_pmf(params, x).exp()
    }

    fn sample(&self, params : &[f64], n : usize, rng : &mut dyn RngCore) -> Vec<i64> {
        let mut dst = vec![0; n];
        self.sample_into(params, &mut dst[..], rng);
        dst
    }

    /// Negative log-likelihood of the observations under the packed
    /// parameters; infinite when any observation falls outside the implied
    /// support or the parameters are invalid. Families whose normalizer is
    /// expensive override this to hoist it out of the observation loop.
    fn nll(&self, params : &[f64], obs : &[i64]) -> f64 {
        obs.iter().map(|x| -self.log_pmf(params, *x)).sum()
    }

}

/// The closed set of families the tool fits, in fitting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {

    Uniform,

    BetaBinomial,

    Zipf

}

impl Family {

    pub const ALL : [Family; 3] = [Family::Uniform, Family::BetaBinomial, Family::Zipf];

    pub fn name(&self) -> &'static str {
        match self {
            Family::Uniform => "uniform",
            Family::BetaBinomial => "betabinom",
            Family::Zipf => "zipf"
        }
    }

    pub fn distr(&self) -> &'static dyn Discrete {
        match self {
            Family::Uniform => &DiscreteUniform,
            Family::BetaBinomial => &BetaBinomial,
            Family::Zipf => &Zipf
        }
    }

}

impl Display for Family {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }

}

/// ln of the binomial coefficient n choose k, via the gamma function.
pub(crate) fn ln_choose(n : i64, k : i64) -> f64 {
    if k < 0 || k > n {
        return f64::NEG_INFINITY;
    }
    gamma::ln_gamma(n as f64 + 1.) - gamma::ln_gamma(k as f64 + 1.) - gamma::ln_gamma((n - k) as f64 + 1.)
}

/// ln of the beta function B(a, b).
pub(crate) fn ln_beta(a : f64, b : f64) -> f64 {
    gamma::ln_gamma(a) + gamma::ln_gamma(b) - gamma::ln_gamma(a + b)
}

/// Nearest-integer rounding of a parameter that is an integer by nature.
pub(crate) fn round_param(p : f64) -> i64 {
    p.round() as i64
}

#[test]
fn choose_matches_pascal() {
    assert!((ln_choose(5, 2).exp() - 10.).abs() < 1E-9);
    assert!((ln_choose(10, 0).exp() - 1.).abs() < 1E-9);
    assert_eq!(ln_choose(3, 4), f64::NEG_INFINITY);
}
