use argmin::prelude::*;
use argmin::solver::particleswarm::ParticleSwarm;
use nalgebra::DVector;
use serde::{Serialize, Deserialize};
use crate::prob::{Discrete, Family};
use crate::sample::Sample;
use super::{Bounds, Estimator, FitResult, penalized_nll, INVALID_NLL};

// Clerc-Kennedy constriction coefficients.
const WEIGHT_INERTIA : f64 = 0.7213475204444817;
const WEIGHT_COGNITIVE : f64 = 1.1931471805599454;
const WEIGHT_SOCIAL : f64 = 1.1931471805599454;

/// Bounded maximum-likelihood estimator backed by argmin's particle swarm.
/// The swarm searches the boxed region given by the bounds without needing a
/// gradient of the (piecewise-constant in the rounded parameters) objective;
/// candidate points are projected back onto the region before evaluation, so
/// the reported optimum always satisfies the constraints.
#[derive(Debug, Clone)]
pub struct SwarmFit {

    particles : usize,

    iters : u64

}

impl SwarmFit {

    pub fn new() -> Self {
        Self { particles : 40, iters : 200 }
    }

    pub fn particles(mut self, particles : usize) -> Self {
        self.particles = particles;
        self
    }

    pub fn iterations(mut self, iters : u64) -> Self {
        self.iters = iters;
        self
    }

}

impl Default for SwarmFit {

    fn default() -> Self {
        Self::new()
    }

}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NllProblem {

    family : Family,

    obs : Vec<i64>,

    lower : Vec<f64>,

    upper : Vec<f64>

}

impl NllProblem {

    // projection onto the boxed region; the swarm itself does not keep
    // particles inside the bounds
    fn clamp(&self, p : &[f64]) -> Vec<f64> {
        p.iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .map(|(v, (l, u))| v.max(*l).min(*u))
            .collect()
    }

}

impl ArgminOp for NllProblem {

    type Param = Vec<f64>;
    type Output = f64;
    type Hessian = ();
    type Jacobian = ();
    type Float = f64;

    fn apply(&self, p : &Self::Param) -> Result<Self::Output, Error> {
        let p = self.clamp(&p[..]);
        Ok(penalized_nll(self.family, &p[..], &self.obs[..]))
    }

}

impl Estimator for SwarmFit {

    fn fit(&self, family : Family, sample : &Sample, bounds : &Bounds) -> FitResult {
        let names = family.distr().param_names();
        let (lower, upper) = match bounds.pack(names) {
            Some(packed) => packed,
            None => return FitResult::failed(family)
        };
        if sample.is_empty() || lower.iter().zip(upper.iter()).any(|(l, u)| *l > *u) {
            return FitResult::failed(family);
        }
        // a fixed parameter is a zero-width interval; the swarm draws its
        // initial positions from an open region
        let upper = DVector::from_iterator(
            upper.nrows(),
            upper.iter().zip(lower.iter()).map(|(u, l)| if *u - *l < 1E-9 { *l + 1E-9 } else { *u })
        );
        let init : Vec<f64> = lower.iter().zip(upper.iter()).map(|(l, u)| 0.5 * (*l + *u)).collect();
        let op = NllProblem {
            family,
            obs : sample.as_slice().to_vec(),
            lower : lower.iter().copied().collect(),
            upper : upper.iter().copied().collect()
        };
        let clamp = op.clone();
        let solver = match ParticleSwarm::new(
            (op.lower.clone(), op.upper.clone()),
            self.particles,
            WEIGHT_INERTIA,
            WEIGHT_COGNITIVE,
            WEIGHT_SOCIAL
        ) {
            Ok(solver) => solver,
            Err(_) => return FitResult::failed(family)
        };
        let res = match Executor::new(op, solver, init).max_iters(self.iters).run() {
            Ok(res) => res,
            Err(_) => return FitResult::failed(family)
        };
        let best = DVector::from_vec(clamp.clamp(&res.state.get_best_param()[..]));
        let nll = res.state.get_best_cost();
        if nll.is_finite() && nll < INVALID_NLL {
            FitResult::converged(family, best, nll)
        } else {
            FitResult::failed(family)
        }
    }

}
