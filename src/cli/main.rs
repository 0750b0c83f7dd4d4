use structopt::StructOpt;
use anyhow::Context;
use indicatif::ProgressBar;
use serde::Serialize;
use fitdist::prob::Family;
use fitdist::sample::Sample;
use fitdist::fit::{guess_bounds, Estimator, FitResult, SwarmFit};
use fitdist::viz;

/// Fit candidate discrete distributions (uniform, beta-binomial, zipfian)
/// to a sample of integer observations and compare their likelihoods
#[derive(StructOpt, Debug)]
struct Fitdist {

    /// Whitespace-separated text file of integer observations
    #[structopt(default_value = "test_data.txt")]
    data : String,

    /// Print the report without opening the chart view
    #[structopt(long)]
    headless : bool,

    /// Write the fit report as JSON to the given path
    #[structopt(short, long)]
    output : Option<String>,

    /// Number of particles in the optimizer swarm
    #[structopt(long, default_value = "40")]
    particles : usize,

    /// Maximum optimizer iterations per family
    #[structopt(long, default_value = "200")]
    iters : u64

}

#[derive(Serialize)]
struct Report {

    family : String,

    success : bool,

    params : Vec<(String, f64)>,

    nll : Option<f64>

}

impl Report {

    fn build(res : &FitResult) -> Self {
        let params = if res.success() {
            res.named_params().iter().map(|(n, v)| (n.to_string(), *v)).collect()
        } else {
            Vec::new()
        };
        Self {
            family : res.family().name().to_string(),
            success : res.success(),
            params,
            nll : if res.success() { Some(res.nllf()) } else { None }
        }
    }

}

fn print_result(pb : &ProgressBar, res : &FitResult) {
    if res.success() {
        let params = res.named_params().iter()
            .map(|(n, v)| format!("{} = {:.4}", n, v))
            .collect::<Vec<_>>()
            .join(", ");
        pb.println(format!("Successfully fitted the {} distribution:", res.family()));
        pb.println(format!("    fit parameters: {}", params));
        pb.println(format!("    negative log likelihood: {:.4}", res.nllf()));
    } else {
        pb.println(format!("Failed to fit the {} distribution. Check the bounds!", res.family()));
    }
}

fn main() -> anyhow::Result<()> {
    let opt = Fitdist::from_args();
    let sample = Sample::open(&opt.data)
        .with_context(|| format!("loading observations from {}", opt.data))?;
    let fitter = SwarmFit::new().particles(opt.particles).iterations(opt.iters);
    let pb = ProgressBar::new(Family::ALL.len() as u64);
    let mut results = Vec::new();
    for family in Family::ALL.iter().copied() {
        let bounds = guess_bounds(&sample, family);
        let res = fitter.fit(family, &sample, &bounds);
        print_result(&pb, &res);
        results.push(res);
        pb.inc(1);
    }
    pb.finish_and_clear();
    if let Some(path) = &opt.output {
        let reports : Vec<Report> = results.iter().map(Report::build).collect();
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(path, json).with_context(|| format!("writing report to {}", path))?;
    }
    if !opt.headless {
        viz::show(&sample, &results)?;
    }
    Ok(())
}
