use rand::{Rng, RngCore};
use super::{Discrete, round_param};

/// The discrete uniform distribution assigns equal probability to each
/// integer of the half-open range `[low, high)`, shifted by an integer
/// location. Its mass is `1/(high - low)` inside the range and zero outside,
/// so its likelihood depends on the parameters only through the width of the
/// narrowest range still covering the data.
#[derive(Debug, Clone, Copy)]
pub struct DiscreteUniform;

impl Discrete for DiscreteUniform {

    fn param_names(&self) -> &'static [&'static str] {
        &["low", "high", "loc"]
    }

    fn log_pmf(&self, params : &[f64], x : i64) -> f64 {
        let low = round_param(params[0]);
        let high = round_param(params[1]);
        let loc = round_param(params[2]);
        if high <= low {
            return f64::NEG_INFINITY;
        }
        let k = x - loc;
        if k >= low && k < high {
            -((high - low) as f64).ln()
        } else {
            f64::NEG_INFINITY
        }
    }

    fn sample_into(&self, params : &[f64], dst : &mut [i64], rng : &mut dyn RngCore) {
        let low = round_param(params[0]);
        let high = round_param(params[1]);
        let loc = round_param(params[2]);
        assert!(high > low, "empty uniform support");
        for d in dst.iter_mut() {
            *d = rng.gen_range(low, high) + loc;
        }
    }

}

#[test]
fn uniform_mass() {
    let d = DiscreteUniform;
    let p = [0., 11., 0.];
    for x in 0..11 {
        assert!((d.pmf(&p, x) - 1. / 11.).abs() < 1E-12);
    }
    assert_eq!(d.log_pmf(&p, 11), f64::NEG_INFINITY);
    assert_eq!(d.log_pmf(&p, -1), f64::NEG_INFINITY);
    // location shifts the support
    assert!(d.log_pmf(&[0., 11., 2.], 12).is_finite());
}
