use rand::{Rng, RngCore};
use super::{Discrete, round_param};

/// The Zipfian (zeta) distribution is a power law over the positive integers
/// with mass `k^-a / zeta(a)`, shifted by an integer location. The mass is
/// normalizable only for exponents a > 1; parameter vectors outside that
/// region evaluate to `-inf` and are avoided by the bounded optimizer even
/// when the guessed search range reaches below the valid region.
#[derive(Debug, Clone, Copy)]
pub struct Zipf;

impl Discrete for Zipf {

    fn param_names(&self) -> &'static [&'static str] {
        &["a", "loc"]
    }

    fn log_pmf(&self, params : &[f64], x : i64) -> f64 {
        let a = params[0];
        let loc = round_param(params[1]);
        if !(a > 1.) {
            return f64::NEG_INFINITY;
        }
        let k = x - loc;
        if k < 1 {
            return f64::NEG_INFINITY;
        }
        -a * (k as f64).ln() - zeta(a).ln()
    }

    fn sample_into(&self, params : &[f64], dst : &mut [i64], rng : &mut dyn RngCore) {
        let a = params[0];
        let loc = round_param(params[1]);
        assert!(a > 1., "zipf exponent must exceed 1");
        for d in dst.iter_mut() {
            *d = draw(a, rng) + loc;
        }
    }

    // the zeta normalizer does not depend on the observation
    fn nll(&self, params : &[f64], obs : &[i64]) -> f64 {
        let a = params[0];
        let loc = round_param(params[1]);
        if !(a > 1.) {
            return f64::INFINITY;
        }
        let ln_z = zeta(a).ln();
        let mut total = 0.;
        for x in obs {
            let k = x - loc;
            if k < 1 {
                return f64::INFINITY;
            }
            total += a * (k as f64).ln() + ln_z;
        }
        total
    }

}

/// Rejection sampler for the zeta distribution (Devroye, ch. X.6).
fn draw(a : f64, rng : &mut dyn RngCore) -> i64 {
    let b = 2f64.powf(a - 1.);
    loop {
        let u = 1. - rng.gen::<f64>();
        let v : f64 = rng.gen();
        let x = u.powf(-1. / (a - 1.)).floor();
        let t = (1. + 1. / x).powf(a - 1.);
        if v * x * (t - 1.) / (b - 1.) <= t / b && x < i64::MAX as f64 {
            return x as i64;
        }
    }
}

/// Riemann zeta for real argument a > 1: direct summation of the first
/// terms plus the Euler-Maclaurin tail.
pub(crate) fn zeta(a : f64) -> f64 {
    const N : usize = 100;
    let mut s = 0.;
    for k in 1..=N {
        s += (k as f64).powf(-a);
    }
    let n = N as f64;
    s + n.powf(1. - a) / (a - 1.) - 0.5 * n.powf(-a) + a * n.powf(-a - 1.) / 12.
}

#[test]
fn zeta_known_values() {
    let pi = std::f64::consts::PI;
    assert!((zeta(2.) - pi * pi / 6.).abs() < 1E-9);
    assert!((zeta(4.) - pi.powi(4) / 90.).abs() < 1E-9);
}

#[test]
fn zipf_mass() {
    let d = Zipf;
    let p = [2., 0.];
    assert!((d.pmf(&p, 1) - 1. / zeta(2.)).abs() < 1E-9);
    assert_eq!(d.log_pmf(&p, 0), f64::NEG_INFINITY);
    assert_eq!(d.log_pmf(&[0.5, 0.], 1), f64::NEG_INFINITY);
}

#[test]
fn draws_stay_in_support() {
    let mut rng = rand::thread_rng();
    let sample = Zipf.sample(&[3., 2.], 200, &mut rng);
    assert!(sample.iter().all(|x| *x >= 3));
}
