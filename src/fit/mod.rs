use std::collections::HashMap;
use nalgebra::DVector;
use crate::prob::{Discrete, Family};
use crate::sample::Sample;

mod swarm;

pub use swarm::*;

/// Objective value standing in for an infinite or undefined negative
/// log-likelihood, so the swarm ordering stays well-defined.
pub(crate) const INVALID_NLL : f64 = 1E12;

/// Per-parameter closed search intervals constraining the fitting optimizer.
/// Keys are family-specific; a fixed value is an interval with equal
/// endpoints. No internal-consistency check happens here: an inverted or
/// missing interval surfaces later as a fit failure, not as a distinct error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {

    intervals : HashMap<String, (f64, f64)>

}

impl Bounds {

    pub fn new() -> Self {
        Self { intervals : HashMap::new() }
    }

    pub fn interval(mut self, name : &str, lo : f64, hi : f64) -> Self {
        self.intervals.insert(name.to_string(), (lo, hi));
        self
    }

    pub fn fixed(mut self, name : &str, value : f64) -> Self {
        self.interval(name, value, value)
    }

    pub fn get(&self, name : &str) -> Option<(f64, f64)> {
        self.intervals.get(name).copied()
    }

    /// Packs the intervals into lower/upper vectors following the family's
    /// parameter order. Returns None when any parameter lacks an interval.
    pub(crate) fn pack(&self, names : &[&str]) -> Option<(DVector<f64>, DVector<f64>)> {
        let mut lower = DVector::zeros(names.len());
        let mut upper = DVector::zeros(names.len());
        for (i, name) in names.iter().enumerate() {
            let (lo, hi) = self.get(name)?;
            lower[i] = lo;
            upper[i] = hi;
        }
        Some((lower, upper))
    }

}

/// Derives a plausible search range per parameter from the extrema of the
/// observed data. This is a rough rule of thumb keyed to typical small-sample
/// integer data: the ranges are not guaranteed to contain the true optimum
/// and may need manual widening for pathological samples. Deterministic in
/// the sample's min and max only, so the observation order is irrelevant.
pub fn guess_bounds(sample : &Sample, family : Family) -> Bounds {
    let low = sample.min().unwrap_or(0) as f64;
    let high = sample.max().unwrap_or(0) as f64;
    match family {
        Family::Uniform => Bounds::new()
            .interval("low", low, high + 1.)
            .interval("high", low, high + 1.)
            .interval("loc", low - 1., high),
        Family::BetaBinomial => Bounds::new()
            .fixed("n", high - low)
            .interval("a", 0., high * 10.)
            .interval("b", 0., high * 10.)
            .interval("loc", low - 1., high),
        Family::Zipf => Bounds::new()
            .interval("a", -1., high * 10.)
            .interval("loc", low - 1., high)
    }
}

/// Negative log-likelihood of the observations under a family with the given
/// packed parameters. Infinite when any observation falls outside the support
/// the parameters imply, or when the parameters are invalid for the family.
pub fn nll(family : Family, params : &[f64], obs : &[i64]) -> f64 {
    family.distr().nll(params, obs)
}

/// Finite stand-in for an infinite objective. Grading the penalty by the
/// share of observations left outside the support orders near-covering
/// parameter points below far ones, which gives the bounded search a path
/// toward full coverage instead of a flat plateau.
pub(crate) fn penalized_nll(family : Family, params : &[f64], obs : &[i64]) -> f64 {
    let distr = family.distr();
    let value = distr.nll(params, obs);
    if value.is_finite() {
        return value;
    }
    let outside = obs.iter().filter(|x| !distr.log_pmf(params, **x).is_finite()).count();
    INVALID_NLL * (1. + outside as f64 / obs.len().max(1) as f64)
}

/// The outcome of fitting one family to one sample. Callers must check
/// `success` before trusting the parameters: a failed fit carries whatever
/// point the search last visited.
#[derive(Debug, Clone)]
pub struct FitResult {

    family : Family,

    params : DVector<f64>,

    success : bool,

    nll : f64

}

impl FitResult {

    pub fn converged(family : Family, params : DVector<f64>, nll : f64) -> Self {
        Self { family, params, success : true, nll }
    }

    pub fn failed(family : Family) -> Self {
        let k = family.distr().param_names().len();
        Self { family, params : DVector::zeros(k), success : false, nll : f64::INFINITY }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn params(&self) -> &DVector<f64> {
        &self.params
    }

    /// Fitted value of a parameter, by the family's parameter name.
    pub fn param(&self, name : &str) -> Option<f64> {
        self.family.distr().param_names().iter()
            .position(|n| *n == name)
            .map(|i| self.params[i])
    }

    /// Named `(parameter, value)` pairs in the family's packing order.
    pub fn named_params(&self) -> Vec<(&'static str, f64)> {
        self.family.distr().param_names().iter()
            .zip(self.params.iter())
            .map(|(n, v)| (*n, *v))
            .collect()
    }

    /// The objective at the fitted parameters, over the fitting sample.
    pub fn nllf(&self) -> f64 {
        self.nll
    }

    /// Negative log-likelihood of arbitrary data under the fitted parameters.
    pub fn nllf_on(&self, sample : &Sample) -> f64 {
        nll(self.family, self.params.as_slice(), sample.as_slice())
    }

    /// Probability mass at `x` under the fitted parameters.
    pub fn pmf(&self, x : i64) -> f64 {
        self.family.distr().pmf(self.params.as_slice(), x)
    }

}

/// Trait shared by maximum-likelihood fitting backends, the single seam in
/// front of the optimizer. The search algorithm behind `fit` is opaque to the
/// rest of the crate, which lets the reporting and plotting logic run against
/// a stub backend in tests. Failure is part of the result, never a panic:
/// non-convergence, inconsistent bounds and empty samples all come back as
/// `success = false`.
pub trait Estimator {

    fn fit(&self, family : Family, sample : &Sample, bounds : &Bounds) -> FitResult;

}
