use rand::RngCore;
use rand_distr::Distribution;
use super::{Discrete, ln_beta, ln_choose, round_param};

/// The beta-binomial distribution counts successes among `n` trials whose
/// success probability is itself drawn from a Beta(a, b); it is the usual
/// over-dispersed alternative to the plain binomial and is flexible enough
/// to accommodate uniform-like count data. With `n = 0` the mass degenerates
/// to a single point at zero, which this implementation keeps well-defined.
#[derive(Debug, Clone, Copy)]
pub struct BetaBinomial;

impl Discrete for BetaBinomial {

    fn param_names(&self) -> &'static [&'static str] {
        &["n", "a", "b", "loc"]
    }

    fn log_pmf(&self, params : &[f64], x : i64) -> f64 {
        let n = round_param(params[0]);
        let a = params[1];
        let b = params[2];
        let loc = round_param(params[3]);
        if n < 0 || !(a > 0.) || !(b > 0.) {
            return f64::NEG_INFINITY;
        }
        let k = x - loc;
        if k < 0 || k > n {
            return f64::NEG_INFINITY;
        }
        ln_choose(n, k) + ln_beta(k as f64 + a, (n - k) as f64 + b) - ln_beta(a, b)
    }

    fn sample_into(&self, params : &[f64], dst : &mut [i64], rng : &mut dyn RngCore) {
        let n = round_param(params[0]);
        let a = params[1];
        let b = params[2];
        let loc = round_param(params[3]);
        assert!(n >= 0 && a > 0. && b > 0., "invalid beta-binomial parameters");
        let beta = rand_distr::Beta::new(a, b).unwrap();
        for d in dst.iter_mut() {
            let p = beta.sample(&mut *rng);
            let binom = rand_distr::Binomial::new(n as u64, p).unwrap();
            *d = binom.sample(&mut *rng) as i64 + loc;
        }
    }

}

#[test]
fn flat_shapes_reduce_to_uniform() {
    // a = b = 1 makes the success probability uniform on [0,1], which makes
    // the count uniform on 0..=n
    let d = BetaBinomial;
    let p = [2., 1., 1., 0.];
    for k in 0..3 {
        assert!((d.pmf(&p, k) - 1. / 3.).abs() < 1E-9);
    }
    assert_eq!(d.log_pmf(&p, 3), f64::NEG_INFINITY);
}

#[test]
fn degenerate_single_point() {
    let d = BetaBinomial;
    let p = [0., 2., 3., 5.];
    assert!((d.pmf(&p, 5) - 1.).abs() < 1E-12);
    assert_eq!(d.log_pmf(&p, 6), f64::NEG_INFINITY);
}
